//! # Reno Calculation Engine
//!
//! 改造費用計算引擎：變數解析、價格公式求值、人工成本、
//! 維護費用攤提與預算加成鏈。
//!
//! 所有計算器都是純函數：相同輸入必得到相同輸出，沒有共享可變
//! 狀態，可以安全地併發呼叫（見 `pricing` 的批次計算）。

pub mod budget;
pub mod heat_demand;
pub mod labor;
pub mod maintenance;
pub mod price;
pub mod pricing;
pub mod variables;
pub mod warnings;

// Re-export 主要類型
pub use budget::{BudgetBreakdown, BudgetCalculator};
pub use heat_demand::HeatDemandCalculator;
pub use labor::{LaborCalculator, LaborCosts, LaborLine};
pub use maintenance::{MaintenanceCalculator, MaintenanceProjection, DEFAULT_HORIZON_YEARS};
pub use price::PriceCalculator;
pub use pricing::{MeasurePricer, MeasurePricing};
pub use variables::VariableResolver;
pub use warnings::CalculationWarning;

use reno_core::{PriceRule, ResidenceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 一行已解析的費用明細
///
/// 欄位名稱是與顯示層之間的資料契約。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationLine {
    /// 來源規則ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<Uuid>,

    /// 規則名稱
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 單位標籤
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// 解析出的數量
    pub quantity: Decimal,

    /// 單價
    pub unit_price: Decimal,

    /// 行費用（quantity × unitPrice）
    pub total_price: Decimal,

    /// split 模式下此行所屬的住宅類型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_type: Option<ResidenceType>,
}

/// 單一措施的計算結果
///
/// 規則層級的失敗不會外拋：`is_valid=false` 加第一個錯誤訊息是唯一
/// 的失敗通道，部分成功不會被回報成有效價格。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureCalculationResult {
    /// 所有規則是否都解析成功
    pub is_valid: bool,

    /// 總價（所有行費用之和；無效時為 0）
    pub price: Decimal,

    /// 費用明細行（無效時保留已解析的部分供稽核）
    pub calculations: Vec<CalculationLine>,

    /// 第一個錯誤訊息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl MeasureCalculationResult {
    /// 創建有效結果，總價為明細行費用之和
    pub fn valid(calculations: Vec<CalculationLine>) -> Self {
        let price = calculations.iter().map(|line| line.total_price).sum();
        Self {
            is_valid: true,
            price,
            calculations,
            error_message: None,
        }
    }

    /// 創建無效結果，保留已解析的部分明細
    pub fn invalid(message: String, calculations: Vec<CalculationLine>) -> Self {
        Self {
            is_valid: false,
            price: Decimal::ZERO,
            calculations,
            error_message: Some(message),
        }
    }

    /// 有效且總價恰為零
    ///
    /// 合法的 €0 不是錯誤，但對使用者是值得注意的狀態，
    /// 與無效結果分開呈現。
    pub fn is_zero_total(&self) -> bool {
        self.is_valid && self.price == Decimal::ZERO
    }

    /// 找出某規則對應的明細行
    ///
    /// 優先以規則ID對應，退回以名稱對應（手工組裝的結果可能沒有ID）。
    pub fn line_for_rule(&self, rule: &PriceRule) -> Option<&CalculationLine> {
        self.calculations
            .iter()
            .find(|line| line.rule_id == Some(rule.id))
            .or_else(|| {
                rule.name.as_deref().and_then(|name| {
                    self.calculations
                        .iter()
                        .find(|line| line.name.as_deref() == Some(name))
                })
            })
    }
}
