//! 改造措施模型
//!
//! 措施（measure）由目錄提供，對本引擎唯讀。每條措施帶有價格規則
//! 列表與可選的週期性維護規則列表，欄位名稱即與顯示層之間的資料契約。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::residence::ResidenceType;

/// 計算步驟類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcStepKind {
    /// 變數引用
    Variable,
    /// 數值常量
    Literal,
    /// 加上一個值
    Add,
    /// 減去一個值
    Subtract,
    /// 乘上一個值
    Multiply,
    /// 除以一個值
    Divide,
}

/// 計算步驟
///
/// `value` 是變數名稱或數值常量字串，由變數解析器統一解析。
/// 有 `position` 的步驟依其升冪排序，沒有的排在所有已定位步驟之後，
/// 其餘維持原始順序。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    /// 步驟類型
    #[serde(rename = "type")]
    pub kind: CalcStepKind,

    /// 變數名稱或數值常量
    pub value: String,

    /// 排序位置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Calculation {
    /// 創建新的計算步驟
    pub fn new(kind: CalcStepKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            position: None,
        }
    }

    /// 建構器模式：設置排序位置
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

/// 每類住宅的單價
///
/// 缺少的類型視為「該類型沒有價格」，在非 split 模式下對作用中的
/// 類型是規則層級的錯誤，不會悄悄補零。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricesPerType {
    /// 地面層住宅單價
    #[serde(default, rename = "grondgebonden")]
    pub ground_level: Option<Decimal>,

    /// 樓梯間公寓單價
    #[serde(default, rename = "portiek")]
    pub stairwell: Option<Decimal>,

    /// 外廊公寓單價
    #[serde(default, rename = "gallerij")]
    pub gallery: Option<Decimal>,
}

impl PricesPerType {
    /// 創建三類皆有的單價表
    pub fn new(ground_level: Decimal, stairwell: Decimal, gallery: Decimal) -> Self {
        Self {
            ground_level: Some(ground_level),
            stairwell: Some(stairwell),
            gallery: Some(gallery),
        }
    }

    /// 查詢某住宅類型的單價
    pub fn for_type(&self, residence_type: ResidenceType) -> Option<Decimal> {
        match residence_type {
            ResidenceType::GroundLevel => self.ground_level,
            ResidenceType::Stairwell => self.stairwell,
            ResidenceType::Gallery => self.gallery,
        }
    }
}

/// 價格規則
///
/// 一條規則求值出一個數量，乘上單價得到一行費用。單價來源是
/// 固定價或每類住宅單價表，兩者擇一。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRule {
    /// 規則ID（與人工、維護明細行的穩定對應鍵）
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// 規則名稱
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 單位標籤（m²、m¹、st）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// 計算步驟（非空）
    pub calculation: Vec<Calculation>,

    /// 固定單價
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// 每類住宅單價
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices_per_type: Option<PricesPerType>,

    /// 是否含人工
    #[serde(default)]
    pub include_labor: bool,

    /// 人工工時定額（每單位小時數）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_norm: Option<Decimal>,
}

impl PriceRule {
    /// 創建新的價格規則
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            unit: None,
            calculation: Vec::new(),
            price: None,
            prices_per_type: None,
            include_labor: false,
            labor_norm: None,
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// 建構器模式：設置單位標籤
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// 建構器模式：附加計算步驟
    pub fn with_step(mut self, step: Calculation) -> Self {
        self.calculation.push(step);
        self
    }

    /// 建構器模式：設置固定單價
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// 建構器模式：設置每類住宅單價
    pub fn with_prices_per_type(mut self, prices: PricesPerType) -> Self {
        self.prices_per_type = Some(prices);
        self
    }

    /// 建構器模式：啟用人工並設置工時定額
    pub fn with_labor(mut self, norm: Decimal) -> Self {
        self.include_labor = true;
        self.labor_norm = Some(norm);
        self
    }

    /// 顯示用名稱
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(naamloos)")
    }

    /// 依 position 排序後的計算步驟
    ///
    /// 穩定排序：有 position 者升冪在前，無 position 者照原順序在後。
    pub fn ordered_steps(&self) -> Vec<&Calculation> {
        let mut steps: Vec<&Calculation> = self.calculation.iter().collect();
        steps.sort_by_key(|step| match step.position {
            Some(position) => (0u8, position),
            None => (1u8, 0),
        });
        steps
    }

    /// 是否參與人工計算
    pub fn carries_labor(&self) -> bool {
        self.include_labor && self.labor_norm.map_or(false, |norm| norm > Decimal::ZERO)
    }
}

impl Default for PriceRule {
    fn default() -> Self {
        Self::new()
    }
}

/// 維護規則
///
/// 價格規則加上週期屬性：`cycle_start` 為首次發生的年偏移（預設 0），
/// `cycle` 為重複間隔年數，`cycle <= 0` 視為無效並忽略。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceJob {
    /// 規則本體
    #[serde(flatten)]
    pub rule: PriceRule,

    /// 首次發生的年偏移
    #[serde(default, rename = "cycleStart", skip_serializing_if = "Option::is_none")]
    pub cycle_start: Option<i64>,

    /// 重複間隔（年）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<i64>,
}

impl MaintenanceJob {
    /// 創建新的維護規則
    pub fn new(rule: PriceRule) -> Self {
        Self {
            rule,
            cycle_start: None,
            cycle: None,
        }
    }

    /// 建構器模式：設置重複間隔
    pub fn with_cycle(mut self, cycle: i64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// 建構器模式：設置首次發生年偏移
    pub fn with_cycle_start(mut self, cycle_start: i64) -> Self {
        self.cycle_start = Some(cycle_start);
        self
    }

    /// 生效的首年偏移（負值視為 0）
    pub fn effective_cycle_start(&self) -> i64 {
        self.cycle_start.unwrap_or(0).max(0)
    }
}

/// 單筆熱需求資料（依建造時期）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatDemandEntry {
    /// 建造時期（如 "1965-1974"）
    pub period: String,
    /// 熱需求值
    pub value: Decimal,
}

/// 措施的熱需求表（依住宅類型）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeatDemandTable {
    #[serde(default, rename = "grondgebonden")]
    pub ground_level: Vec<HeatDemandEntry>,

    #[serde(default, rename = "portiek")]
    pub stairwell: Vec<HeatDemandEntry>,

    #[serde(default, rename = "gallerij")]
    pub gallery: Vec<HeatDemandEntry>,
}

impl HeatDemandTable {
    /// 某住宅類型的熱需求資料
    pub fn rows_for(&self, residence_type: ResidenceType) -> &[HeatDemandEntry] {
        match residence_type {
            ResidenceType::GroundLevel => &self.ground_level,
            ResidenceType::Stairwell => &self.stairwell,
            ResidenceType::Gallery => &self.gallery,
        }
    }

    /// 是否完全沒有資料
    pub fn is_empty(&self) -> bool {
        self.ground_level.is_empty() && self.stairwell.is_empty() && self.gallery.is_empty()
    }
}

/// 改造措施
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    /// 措施名稱
    pub name: String,

    /// 分組（dak、kozijnen、ventilatie ...）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// 價格規則
    #[serde(default)]
    pub measure_prices: Vec<PriceRule>,

    /// 維護規則
    #[serde(default)]
    pub mjob_prices: Vec<MaintenanceJob>,

    /// 是否依住宅類型拆分輸出
    #[serde(default, rename = "splitPrices")]
    pub split_prices: bool,

    /// 適用的住宅類型（空表示全部適用）
    #[serde(default, rename = "applicableWoningTypes")]
    pub applicable_residence_types: Vec<ResidenceType>,

    /// 熱需求表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_demand: Option<HeatDemandTable>,

    /// 施工干擾指標（存在但為空字串表示目錄缺漏）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuisance: Option<String>,
}

impl Measure {
    /// 創建新的措施
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            group: None,
            measure_prices: Vec::new(),
            mjob_prices: Vec::new(),
            split_prices: false,
            applicable_residence_types: Vec::new(),
            heat_demand: None,
            nuisance: None,
        }
    }

    /// 建構器模式：設置分組
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// 建構器模式：附加價格規則
    pub fn with_price_rule(mut self, rule: PriceRule) -> Self {
        self.measure_prices.push(rule);
        self
    }

    /// 建構器模式：附加維護規則
    pub fn with_maintenance_job(mut self, job: MaintenanceJob) -> Self {
        self.mjob_prices.push(job);
        self
    }

    /// 建構器模式：啟用依住宅類型拆分
    pub fn with_split_prices(mut self) -> Self {
        self.split_prices = true;
        self
    }

    /// 建構器模式：限制適用住宅類型
    pub fn with_applicable_types(mut self, types: &[ResidenceType]) -> Self {
        self.applicable_residence_types = types.to_vec();
        self
    }

    /// 建構器模式：設置熱需求表
    pub fn with_heat_demand(mut self, table: HeatDemandTable) -> Self {
        self.heat_demand = Some(table);
        self
    }

    /// 建構器模式：設置施工干擾指標
    pub fn with_nuisance(mut self, nuisance: &str) -> Self {
        self.nuisance = Some(nuisance.to_string());
        self
    }

    /// 措施是否適用於某住宅類型
    ///
    /// 未指定任何類型時適用於全部類型。
    pub fn applies_to(&self, residence_type: ResidenceType) -> bool {
        self.applicable_residence_types.is_empty()
            || self.applicable_residence_types.contains(&residence_type)
    }

    /// 是否帶有維護規則（至少一條有名稱）
    pub fn has_maintenance(&self) -> bool {
        self.mjob_prices.iter().any(|job| job.rule.name.is_some())
    }

    /// 載入時驗證
    ///
    /// 同一列表內重複的非空規則名稱會讓按名稱對應的明細行語義不明，
    /// 一律拒絕；沒有計算步驟的規則也在此攔下。
    pub fn validate(&self) -> crate::Result<()> {
        Self::validate_rules(self.measure_prices.iter())?;
        Self::validate_rules(self.mjob_prices.iter().map(|job| &job.rule))?;
        Ok(())
    }

    fn validate_rules<'a>(rules: impl Iterator<Item = &'a PriceRule>) -> crate::Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for rule in rules {
            if rule.calculation.is_empty() {
                return Err(crate::CalcError::EmptyCalculation(
                    rule.display_name().to_string(),
                ));
            }
            if let Some(name) = rule.name.as_deref() {
                if seen.contains(&name) {
                    return Err(crate::CalcError::DuplicateRuleName(name.to_string()));
                }
                seen.push(name);
            }
        }
        Ok(())
    }
}
