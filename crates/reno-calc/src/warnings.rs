//! 計算警告
//!
//! 把一次措施計算裡值得使用者注意的狀態整理成型別化的警告列表。
//! 合法的 €0 與無效結果是兩種不同的狀態：零總價仍是有效計算，
//! 但對使用者可見、值得標示。

use reno_core::Measure;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MeasureCalculationResult;

/// 單一措施的計算警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalculationWarning {
    /// 價格無法計算
    #[error("價格無法計算: {message}")]
    PriceInvalid { message: String },

    /// 總價恰為 €0（有效但值得注意）
    #[error("總價為 €0,00")]
    ZeroTotal,

    /// 維護費用無法計算
    #[error("維護費用無法計算: {message}")]
    MaintenanceInvalid { message: String },

    /// 維護明細含乘以零的行
    #[error("維護計算含乘以零的行")]
    MaintenanceZeroMultiplication,

    /// 預期有熱需求資料卻缺少或為零
    #[error("此住宅類型/建造時期缺少熱需求值或值為零")]
    MissingHeatDemand,

    /// 預期有施工干擾指標卻是空白
    #[error("缺少施工干擾指標")]
    MissingNuisance,
}

/// 警告推導器
pub struct WarningCalculator;

impl WarningCalculator {
    /// 推導一次措施計算的警告列表
    ///
    /// # 參數
    /// * `total_price` - 對使用者顯示的最終金額（含利潤與 BTW）
    pub fn derive(
        measure: &Measure,
        price_result: &MeasureCalculationResult,
        maintenance_result: &MeasureCalculationResult,
        heat_demand_value: Decimal,
        total_price: Decimal,
    ) -> Vec<CalculationWarning> {
        let mut warnings = Vec::new();

        if !price_result.is_valid {
            warnings.push(CalculationWarning::PriceInvalid {
                message: price_result
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "原因不明".to_string()),
            });
        }

        if total_price == Decimal::ZERO {
            warnings.push(CalculationWarning::ZeroTotal);
        }

        if !measure.mjob_prices.is_empty() && !maintenance_result.is_valid {
            warnings.push(CalculationWarning::MaintenanceInvalid {
                message: maintenance_result
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "原因不明".to_string()),
            });
        }

        if maintenance_result.is_valid
            && maintenance_result.calculations.iter().any(|line| {
                line.quantity == Decimal::ZERO || line.unit_price == Decimal::ZERO
            })
        {
            warnings.push(CalculationWarning::MaintenanceZeroMultiplication);
        }

        let expects_heat_demand = measure
            .heat_demand
            .as_ref()
            .map(|table| !table.is_empty())
            .unwrap_or(false);
        if expects_heat_demand && heat_demand_value == Decimal::ZERO {
            warnings.push(CalculationWarning::MissingHeatDemand);
        }

        // 目錄欄位存在但內容空白：指標應填而未填
        if measure.nuisance.as_deref() == Some("") {
            warnings.push(CalculationWarning::MissingNuisance);
        }

        warnings
    }
}
