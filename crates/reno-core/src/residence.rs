//! 住宅模型
//!
//! 住宅記錄提供兩個互不重疊的變數命名空間：`geometry`（直接量測的
//! 幾何欄位）與 `derived`（上游彙總計算出的欄位）。兩個命名空間都是
//! 封閉詞彙表，載入時以 [`ResidenceRecord::validate`] 驗證，未知欄位
//! 一律拒絕，而不是在公式求值深處才失敗。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 住宅類型（結構分類，決定每類單價的取用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidenceType {
    /// 地面層住宅（grondgebonden）
    #[serde(rename = "grondgebonden")]
    GroundLevel,
    /// 樓梯間公寓（portiek）
    #[serde(rename = "portiek")]
    Stairwell,
    /// 外廊公寓（gallerij）
    #[serde(rename = "gallerij")]
    Gallery,
}

impl ResidenceType {
    /// 全部住宅類型（split 模式的輸出順序）
    pub fn all() -> [ResidenceType; 3] {
        [
            ResidenceType::GroundLevel,
            ResidenceType::Stairwell,
            ResidenceType::Gallery,
        ]
    }

    /// 從自由格式的住宅類型描述分類
    ///
    /// 比對規則沿用目錄資料的慣例：描述包含 "portiek" 視為樓梯間公寓，
    /// 包含 "galerij" 或 "gallerij" 視為外廊公寓，其餘視為地面層住宅。
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("portiek") {
            ResidenceType::Stairwell
        } else if lower.contains("galerij") || lower.contains("gallerij") {
            ResidenceType::Gallery
        } else {
            ResidenceType::GroundLevel
        }
    }

    /// 目錄中使用的類型鍵
    pub fn key(&self) -> &'static str {
        match self {
            ResidenceType::GroundLevel => "grondgebonden",
            ResidenceType::Stairwell => "portiek",
            ResidenceType::Gallery => "gallerij",
        }
    }
}

impl std::fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// 幾何變數詞彙表（直接量測欄位）
pub const GEOMETRY_VARIABLES: &[&str] = &[
    // 基本
    "typeFlat",
    "isGrondgebonden",
    "isPortiekflat",
    "isGalerieflat",
    "breed",
    "diepte",
    "goothoogte",
    "zadeldak",
    "aantalWoningen",
    "hoogte",
    // 門
    "voordeur_breedte",
    "voordeur_hoogte",
    "achterdeur_breedte",
    "achterdeur_hoogte",
    // 客廳
    "woonkamer_raam1_breedte",
    "woonkamer_raam1_hoogte",
    "woonkamer_raam2_breedte",
    "woonkamer_raam2_hoogte",
    "woonkamer_raam3_breedte",
    "woonkamer_raam3_hoogte",
    "woonkamer_breedte",
    "woonkamer_lengte",
    // 客廳 2
    "woonkamer2_raam1_breedte",
    "woonkamer2_raam1_hoogte",
    "woonkamer2_raam2_breedte",
    "woonkamer2_raam2_hoogte",
    "woonkamer2_raam3_breedte",
    "woonkamer2_raam3_hoogte",
    // 臥室 1
    "slaapkamer1_raam1_breedte",
    "slaapkamer1_raam1_hoogte",
    "slaapkamer1_raam2_breedte",
    "slaapkamer1_raam2_hoogte",
    "slaapkamer1_breedte",
    "slaapkamer1_lengte",
    // 臥室 1 (2)
    "slaapkamer1_2_raam1_breedte",
    "slaapkamer1_2_raam1_hoogte",
    // 臥室 2
    "slaapkamer2_raam1_breedte",
    "slaapkamer2_raam1_hoogte",
    "slaapkamer2_raam2_breedte",
    "slaapkamer2_raam2_hoogte",
    "slaapkamer2_breedte",
    "slaapkamer2_lengte",
    // 其他房間
    "achterkamer_breedte",
    "achterkamer_lengte",
    "slaapkamer3_breedte",
    "slaapkamer3_lengte",
    "keuken_breedte",
    "keuken_lengte",
    "badkamer_breedte",
    "badkamer_lengte",
    "hal_breedte",
    "hal_lengte",
    "toilet_breedte",
    "toilet_lengte",
];

/// 彙總變數詞彙表（上游計算欄位）
pub const DERIVED_VARIABLES: &[&str] = &[
    // 基本量測
    "breedte",
    "gootHoogte",
    "nokHoogte",
    "heeftPlatDak",
    "bouwlagen",
    "breedteComplex",
    "kopgevels",
    "portieken",
    "breedteWoningPlusHoogte",
    // 立面
    "gevelOppervlakVoor",
    "gevelOppervlakAchter",
    "gevelOppervlakTotaal",
    "gevelOppervlakNetto",
    "brutoKopgevelOppervlak",
    // 屋頂
    "dakOppervlak",
    "dakOppervlakTotaal",
    "dakLengte",
    "dakLengteTotaal",
    "dakOverstekOppervlak",
    "dakTotaalMetOverhang",
    "lengteDakvlak",
    "lengteDakvlakPlusBreedteWoning",
    // 樓板
    "vloerOppervlak",
    "vloerOppervlakTotaal",
    "vloerOppervlakteBeganeGrond",
    "oppervlakteKelder",
    // 窗框
    "kozijnOppervlakVoorTotaal",
    "kozijnOppervlakAchterTotaal",
    "kozijnOppervlakTotaal",
    "kozijnRendementTotaal",
    "kozijnOmtrekTotaal",
    "kozijnOppervlakteWoning",
    "glasOppervlakteWoning",
    // 窗框尺寸分級
    "kozijn05",
    "kozijn10",
    "kozijn15",
    "kozijn20",
    "kozijn25",
    "kozijn30",
    "kozijn35",
    "kozijn40",
    // 窗台與周長
    "vensterbankLengte",
    "vensterbankLengteTotaal",
    "omtrekVoordeur",
    "omtrekAchterdeur",
    "omtrekKozijnen",
    "omtrekDraaidelen",
    // 踢腳線等
    "vloerplintLengte",
    "vloerplintLengteTotaal",
    "omtrekSandwichElementen",
    // 房間
    "oppervlakteHal",
    "aantalSlaapkamers",
    // 通風
    "zrRooster",
    "zrRoosterLengte",
    // 太陽能板
    "aantalPVPanelenGGB",
    "oppervlaktePVPanelenGGB",
    "aantalPVPanelenKop",
    "oppervlaktePVPanelenKop",
    "aantalPVPanelenLangs",
    "oppervlaktePVPanelenLangs",
    // 專案總量
    "projectGevelOppervlak",
    "projectKozijnenOppervlak",
    "projectDakOppervlak",
    "projectOmtrek",
];

/// 舊版變數名稱對照表（向後相容）
///
/// 舊目錄使用大寫開頭的變數名，解析時先轉成現行名稱再查表。
pub const VARIABLE_ALIASES: &[(&str, &str)] = &[
    ("AantalWoningen", "aantalWoningen"),
    ("Dakoppervlak", "dakOppervlak"),
    ("LengteDakvlak", "lengteDakvlak"),
    ("BreedteWoning", "breedte"),
    ("NettoGevelOppervlak", "gevelOppervlakNetto"),
    ("Hoogte", "hoogte"),
    ("VensterbankLengte", "vensterbankLengte"),
    ("VloerOppervlakteBeganeGrond", "vloerOppervlakteBeganeGrond"),
    ("OmtrekKozijnen", "omtrekKozijnen"),
];

/// 查詢舊版變數名稱對應的現行名稱
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    VARIABLE_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == name)
        .map(|(_, current)| *current)
}

/// 檢查名稱是否屬於任一詞彙表（含舊版別名）
pub fn is_known_variable(name: &str) -> bool {
    GEOMETRY_VARIABLES.contains(&name)
        || DERIVED_VARIABLES.contains(&name)
        || resolve_alias(name).is_some()
}

/// 住宅記錄
///
/// 公式求值的唯一資料來源。數值一律使用 `Decimal`，布林欄位
/// （如 `zadeldak`）以 0/1 表示。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidenceRecord {
    /// 幾何欄位
    #[serde(default)]
    pub geometry: HashMap<String, Decimal>,

    /// 彙總計算欄位
    #[serde(default)]
    pub derived: HashMap<String, Decimal>,
}

impl ResidenceRecord {
    /// 創建空的住宅記錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置幾何欄位
    pub fn with_geometry(mut self, name: &str, value: Decimal) -> Self {
        self.geometry.insert(name.to_string(), value);
        self
    }

    /// 建構器模式：設置彙總欄位
    pub fn with_derived(mut self, name: &str, value: Decimal) -> Self {
        self.derived.insert(name.to_string(), value);
        self
    }

    /// 查詢幾何欄位
    pub fn geometry_value(&self, name: &str) -> Option<Decimal> {
        self.geometry.get(name).copied()
    }

    /// 查詢彙總欄位
    pub fn derived_value(&self, name: &str) -> Option<Decimal> {
        self.derived.get(name).copied()
    }

    /// 驗證所有欄位名稱都在封閉詞彙表內
    ///
    /// 未知欄位視為資料錯誤，在載入邊界就拒絕。
    pub fn validate(&self) -> crate::Result<()> {
        for name in self.geometry.keys() {
            if !GEOMETRY_VARIABLES.contains(&name.as_str()) {
                return Err(crate::CalcError::UnknownResidenceField(name.clone()));
            }
        }
        for name in self.derived.keys() {
            if !DERIVED_VARIABLES.contains(&name.as_str()) {
                return Err(crate::CalcError::UnknownResidenceField(name.clone()));
            }
        }
        Ok(())
    }
}
