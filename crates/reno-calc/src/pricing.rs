//! 措施定價協調
//!
//! 把五個計算器串成單一入口：材料費、人工費、單措施利潤/BTW
//! 加成、維護攤提、熱需求與警告，一次算完。批次入口以 rayon
//! 對整份目錄並行計算——所有計算器都是純函數，併發安全。

use rayon::prelude::*;
use reno_core::{FinancialSettings, Measure, PriceRule, ResidenceRecord, ResidenceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::heat_demand::HeatDemandCalculator;
use crate::labor::{LaborCalculator, LaborCosts};
use crate::maintenance::{MaintenanceCalculator, MaintenanceProjection, DEFAULT_HORIZON_YEARS};
use crate::price::PriceCalculator;
use crate::warnings::{CalculationWarning, WarningCalculator};
use crate::MeasureCalculationResult;

/// 單一措施的完整定價
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurePricing {
    /// 措施名稱
    pub measure_name: String,

    /// 材料費（價格結果無效時為 0）
    pub material_cost: Decimal,

    /// 人工費合計
    pub labor_cost: Decimal,

    /// 人工明細
    pub labor_details: Vec<crate::LaborLine>,

    /// 一次性費用（材料＋人工，不含 BTW）
    pub base_cost: Decimal,

    /// 含利潤
    pub with_profit: Decimal,

    /// 含利潤與 BTW
    pub with_vat: Decimal,

    /// 價格計算結果（明細與錯誤訊息）
    pub price_result: MeasureCalculationResult,

    /// 維護計算結果
    pub maintenance_result: MeasureCalculationResult,

    /// 維護攤提（年限內總額與年平均）
    pub maintenance: MaintenanceProjection,

    /// 熱需求值
    pub heat_demand_value: Decimal,

    /// 警告列表
    pub warnings: Vec<CalculationWarning>,
}

impl MeasurePricing {
    /// 是否有任何警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// 措施定價器
///
/// 持有一份財務設定快照；單一批次期間設定視為不可變。
pub struct MeasurePricer {
    settings: FinancialSettings,
}

impl MeasurePricer {
    /// 創建新的定價器
    pub fn new(settings: FinancialSettings) -> Self {
        Self { settings }
    }

    /// 獲取設定快照引用
    pub fn settings(&self) -> &FinancialSettings {
        &self.settings
    }

    /// 對單一措施完整定價
    ///
    /// `residence` 為 `None` 時價格與維護結果都是無效狀態（資料
    /// 尚未載入），金額為零。
    pub fn price(
        &self,
        measure: &Measure,
        residence: Option<&ResidenceRecord>,
        residence_type: ResidenceType,
        build_period: &str,
    ) -> MeasurePricing {
        tracing::debug!(measure = %measure.name, %residence_type, "開始措施定價");

        // Step 1: 材料費（split 模式由措施決定）
        let price_result = PriceCalculator::evaluate(
            &measure.measure_prices,
            residence,
            residence_type,
            measure.split_prices,
        );

        // Step 2: 維護規則求值（維護永不拆分）
        let maintenance_rules: Vec<PriceRule> = measure
            .mjob_prices
            .iter()
            .map(|job| job.rule.clone())
            .collect();
        let maintenance_result =
            PriceCalculator::evaluate(&maintenance_rules, residence, residence_type, false);

        // Step 3: 維護攤提（年限慣用 40 年，通膨率來自設定）
        let inflation_rate = self.settings.inflation_percentage / Decimal::ONE_HUNDRED;
        let maintenance = MaintenanceCalculator::amortize(
            &maintenance_result,
            &measure.mjob_prices,
            DEFAULT_HORIZON_YEARS,
            inflation_rate,
        );

        // Step 4: 人工費（價格結果有效時才計）
        let labor = if price_result.is_valid {
            LaborCalculator::compute(
                &measure.measure_prices,
                &price_result,
                self.settings.hourly_labor_cost,
            )
        } else {
            LaborCosts::default()
        };

        // Step 5: 一次性費用與利潤/BTW 加成
        let material_cost = if price_result.is_valid {
            price_result.price
        } else {
            Decimal::ZERO
        };
        let base_cost = material_cost + labor.total;

        let profit_factor =
            Decimal::ONE + self.settings.profit_percentage / Decimal::ONE_HUNDRED;
        let vat_factor = Decimal::ONE + self.settings.vat_percentage / Decimal::ONE_HUNDRED;
        let with_profit = base_cost * profit_factor;
        let with_vat = with_profit * vat_factor;

        // Step 6: 熱需求與警告
        let heat_demand_value =
            HeatDemandCalculator::value_for(measure, residence_type, build_period);
        let warnings = WarningCalculator::derive(
            measure,
            &price_result,
            &maintenance_result,
            heat_demand_value,
            with_vat,
        );

        tracing::debug!(
            measure = %measure.name,
            base_cost = %base_cost,
            maintenance_total = %maintenance.total,
            warnings = warnings.len(),
            "措施定價完成"
        );

        MeasurePricing {
            measure_name: measure.name.clone(),
            material_cost,
            labor_cost: labor.total,
            labor_details: labor.details,
            base_cost,
            with_profit,
            with_vat,
            price_result,
            maintenance_result,
            maintenance,
            heat_demand_value,
            warnings,
        }
    }

    /// 批次定價整份目錄
    ///
    /// 先以住宅類型過濾不適用的措施，再並行定價；輸出順序與
    /// 輸入順序一致。
    pub fn price_catalog(
        &self,
        measures: &[Measure],
        residence: Option<&ResidenceRecord>,
        residence_type: ResidenceType,
        build_period: &str,
    ) -> Vec<MeasurePricing> {
        tracing::info!(
            measures = measures.len(),
            %residence_type,
            "開始批次定價"
        );

        let pricings: Vec<MeasurePricing> = measures
            .par_iter()
            .filter(|measure| measure.applies_to(residence_type))
            .map(|measure| self.price(measure, residence, residence_type, build_period))
            .collect();

        tracing::info!(priced = pricings.len(), "批次定價完成");
        pricings
    }

    /// 一組已定價措施的一次性費用合計（預算鏈的基礎金額）
    pub fn combined_base_cost(pricings: &[MeasurePricing]) -> Decimal {
        pricings.iter().map(|pricing| pricing.base_cost).sum()
    }
}
