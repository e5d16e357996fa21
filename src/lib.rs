//! # Reno
//!
//! 住宅改造費用估算引擎的統一入口：重新導出核心資料模型
//! （reno-core）與計算引擎（reno-calc）。

pub use reno_calc::{
    BudgetBreakdown, BudgetCalculator, CalculationLine, CalculationWarning,
    HeatDemandCalculator, LaborCalculator, LaborCosts, LaborLine, MaintenanceCalculator,
    MaintenanceProjection, MeasureCalculationResult, MeasurePricer, MeasurePricing,
    PriceCalculator, VariableResolver, DEFAULT_HORIZON_YEARS,
};
pub use reno_core::{
    CalcError, CalcStepKind, Calculation, FinancialSettings, HeatDemandEntry, HeatDemandTable,
    MaintenanceJob, Measure, PriceRule, PricesPerType, ResidenceRecord, ResidenceType,
};
