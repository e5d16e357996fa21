//! 熱需求查表
//!
//! 措施可以帶一張依住宅類型與建造時期分列的熱需求表。查不到
//! 對應資料時回傳零；是否把「預期有值卻為零」升級成警告由
//! `warnings` 模組判斷。

use reno_core::{Measure, ResidenceType};
use rust_decimal::Decimal;

/// 熱需求計算器
pub struct HeatDemandCalculator;

impl HeatDemandCalculator {
    /// 查詢措施在某住宅類型、某建造時期下的熱需求值
    pub fn value_for(
        measure: &Measure,
        residence_type: ResidenceType,
        build_period: &str,
    ) -> Decimal {
        let Some(table) = &measure.heat_demand else {
            return Decimal::ZERO;
        };

        table
            .rows_for(residence_type)
            .iter()
            .find(|entry| entry.period == build_period)
            .map(|entry| entry.value)
            .unwrap_or(Decimal::ZERO)
    }
}
