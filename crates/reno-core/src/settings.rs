//! 財務設定模型
//!
//! 組織層級的財務設定快照：各項加成百分比、BTW、通膨率、工資率與
//! 兩個自訂費用行。百分比一律以整數百分比表示（21 代表 21%），
//! 計算時才除以 100。單次計算期間視為不可變。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 財務設定快照
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSettings {
    /// ABK / 機具設備加成（%）
    pub abk_materieel: Decimal,

    /// 買斷（afkoop）加成（%）
    pub afkoop: Decimal,

    /// 細部計畫擬定費用（%）
    pub kosten_planuitwerking: Decimal,

    /// 售後服務（nazorg/service）加成（%）
    pub nazorg_service: Decimal,

    /// CAR / PI / DIC 保險（%）
    pub car_pi_dic_verzekering: Decimal,

    /// 銀行保證（%）
    pub bankgarantie: Decimal,

    /// 一般管理費用 AK（%）
    pub algemene_kosten: Decimal,

    /// 風險準備（%）
    pub risico: Decimal,

    /// 利潤（%）
    pub winst: Decimal,

    /// 計畫前期準備（%）
    pub planvoorbereiding: Decimal,

    /// 租戶輔導（%）
    pub huurdersbegeleiding: Decimal,

    /// BTW 稅率（%）
    pub vat_percentage: Decimal,

    /// 年通膨率（%）
    pub inflation_percentage: Decimal,

    /// 每小時人工成本（歐元）
    pub hourly_labor_cost: Decimal,

    /// 單一措施的利潤率（%）
    pub profit_percentage: Decimal,

    /// 邊間住宅修正（%）
    pub corner_house_correction: Decimal,

    /// 自訂費用行 1（固定金額）
    pub custom_value1: Decimal,

    /// 自訂費用行 1 的標籤
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_value1_name: Option<String>,

    /// 自訂費用行 2（固定金額）
    pub custom_value2: Decimal,

    /// 自訂費用行 2 的標籤
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_value2_name: Option<String>,
}

impl Default for FinancialSettings {
    /// 預設值：設定尚未載入時的後備值
    fn default() -> Self {
        Self {
            abk_materieel: Decimal::ZERO,
            afkoop: Decimal::ZERO,
            kosten_planuitwerking: Decimal::ZERO,
            nazorg_service: Decimal::ZERO,
            car_pi_dic_verzekering: Decimal::ZERO,
            bankgarantie: Decimal::ZERO,
            algemene_kosten: Decimal::ZERO,
            risico: Decimal::ZERO,
            winst: Decimal::ZERO,
            planvoorbereiding: Decimal::ZERO,
            huurdersbegeleiding: Decimal::ZERO,
            vat_percentage: Decimal::from(21),
            inflation_percentage: Decimal::ONE,
            hourly_labor_cost: Decimal::from(51),
            profit_percentage: Decimal::from(25),
            corner_house_correction: Decimal::from(-10),
            custom_value1: Decimal::ZERO,
            custom_value1_name: None,
            custom_value2: Decimal::ZERO,
            custom_value2_name: None,
        }
    }
}

impl FinancialSettings {
    /// 創建預設設定
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置 ABK / 機具設備加成
    pub fn with_abk_materieel(mut self, pct: Decimal) -> Self {
        self.abk_materieel = pct;
        self
    }

    /// 建構器模式：設置買斷加成
    pub fn with_afkoop(mut self, pct: Decimal) -> Self {
        self.afkoop = pct;
        self
    }

    /// 建構器模式：設置細部計畫擬定費用
    pub fn with_kosten_planuitwerking(mut self, pct: Decimal) -> Self {
        self.kosten_planuitwerking = pct;
        self
    }

    /// 建構器模式：設置售後服務加成
    pub fn with_nazorg_service(mut self, pct: Decimal) -> Self {
        self.nazorg_service = pct;
        self
    }

    /// 建構器模式：設置保險費率
    pub fn with_car_pi_dic_verzekering(mut self, pct: Decimal) -> Self {
        self.car_pi_dic_verzekering = pct;
        self
    }

    /// 建構器模式：設置銀行保證費率
    pub fn with_bankgarantie(mut self, pct: Decimal) -> Self {
        self.bankgarantie = pct;
        self
    }

    /// 建構器模式：設置一般管理費用
    pub fn with_algemene_kosten(mut self, pct: Decimal) -> Self {
        self.algemene_kosten = pct;
        self
    }

    /// 建構器模式：設置風險準備
    pub fn with_risico(mut self, pct: Decimal) -> Self {
        self.risico = pct;
        self
    }

    /// 建構器模式：設置利潤加成
    pub fn with_winst(mut self, pct: Decimal) -> Self {
        self.winst = pct;
        self
    }

    /// 建構器模式：設置計畫前期準備費率
    pub fn with_planvoorbereiding(mut self, pct: Decimal) -> Self {
        self.planvoorbereiding = pct;
        self
    }

    /// 建構器模式：設置租戶輔導費率
    pub fn with_huurdersbegeleiding(mut self, pct: Decimal) -> Self {
        self.huurdersbegeleiding = pct;
        self
    }

    /// 建構器模式：設置 BTW 稅率
    pub fn with_vat_percentage(mut self, pct: Decimal) -> Self {
        self.vat_percentage = pct;
        self
    }

    /// 建構器模式：設置年通膨率
    pub fn with_inflation_percentage(mut self, pct: Decimal) -> Self {
        self.inflation_percentage = pct;
        self
    }

    /// 建構器模式：設置每小時人工成本
    pub fn with_hourly_labor_cost(mut self, cost: Decimal) -> Self {
        self.hourly_labor_cost = cost;
        self
    }

    /// 建構器模式：設置單一措施利潤率
    pub fn with_profit_percentage(mut self, pct: Decimal) -> Self {
        self.profit_percentage = pct;
        self
    }

    /// 建構器模式：設置自訂費用行 1
    pub fn with_custom_value1(mut self, amount: Decimal, name: Option<&str>) -> Self {
        self.custom_value1 = amount;
        self.custom_value1_name = name.map(str::to_string);
        self
    }

    /// 建構器模式：設置自訂費用行 2
    pub fn with_custom_value2(mut self, amount: Decimal, name: Option<&str>) -> Self {
        self.custom_value2 = amount;
        self.custom_value2_name = name.map(str::to_string);
        self
    }

    /// 將所有加成百分比歸零（測試與基準情境用）
    pub fn with_zeroed_percentages(mut self) -> Self {
        self.abk_materieel = Decimal::ZERO;
        self.afkoop = Decimal::ZERO;
        self.kosten_planuitwerking = Decimal::ZERO;
        self.nazorg_service = Decimal::ZERO;
        self.car_pi_dic_verzekering = Decimal::ZERO;
        self.bankgarantie = Decimal::ZERO;
        self.algemene_kosten = Decimal::ZERO;
        self.risico = Decimal::ZERO;
        self.winst = Decimal::ZERO;
        self.planvoorbereiding = Decimal::ZERO;
        self.huurdersbegeleiding = Decimal::ZERO;
        self.vat_percentage = Decimal::ZERO;
        self
    }
}
