//! # Reno Core
//!
//! 改造費用引擎的核心資料模型與類型定義

pub mod measure;
pub mod residence;
pub mod settings;

// Re-export 主要類型
pub use measure::{
    CalcStepKind, Calculation, HeatDemandEntry, HeatDemandTable, MaintenanceJob, Measure,
    PriceRule, PricesPerType,
};
pub use residence::{ResidenceRecord, ResidenceType};
pub use settings::FinancialSettings;

/// 計算錯誤類型
///
/// 單一規則的錯誤不會以例外的形式往外拋，而是由計算器收斂成
/// `isValid=false` 加上第一個錯誤訊息（見 reno-calc）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("未知變數: {0}")]
    UnknownVariable(String),

    #[error("價格規則 {rule} 缺少住宅類型 {residence_type} 的單價")]
    MissingTypedPrice {
        rule: String,
        residence_type: residence::ResidenceType,
    },

    #[error("價格規則缺少單價: {0}")]
    MissingPrice(String),

    #[error("缺少住宅資料，無法計算價格")]
    NoBuildingData,

    #[error("價格規則 {0} 的計算步驟除以零")]
    DivisionByZero(String),

    #[error("價格規則 {0} 沒有任何計算步驟")]
    EmptyCalculation(String),

    #[error("規則名稱重複: {0}")]
    DuplicateRuleName(String),

    #[error("住宅記錄包含未知欄位: {0}")]
    UnknownResidenceField(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
