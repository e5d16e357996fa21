//! 人工成本計算
//!
//! 只有標記含人工且工時定額為正的規則參與。每條參與規則要對應到
//! 已解析的明細行才能取得數量；對應不到（資料不一致）就跳過該條，
//! 貢獻零人工成本——這是可恢復的資料缺口，不是致命錯誤。

use reno_core::PriceRule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MeasureCalculationResult;

/// 一行人工成本明細（與材料明細並列，供顯示與稽核）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborLine {
    /// 來源規則ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<Uuid>,

    /// 名稱（規則未命名時退回目錄慣用的 "Arbeidskosten"）
    pub name: String,

    /// 工時定額（每單位小時數）
    pub norm: Decimal,

    /// 對應明細行的數量
    pub quantity: Decimal,

    /// 此行人工成本
    pub cost: Decimal,
}

/// 人工成本計算結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCosts {
    /// 人工成本合計
    pub total: Decimal,

    /// 明細行
    pub details: Vec<LaborLine>,
}

/// 人工成本計算器
pub struct LaborCalculator;

impl LaborCalculator {
    /// 計算一組規則的人工成本
    ///
    /// `itemLaborCost = 定額 × 數量 × 時薪`
    pub fn compute(
        rules: &[PriceRule],
        calc_result: &MeasureCalculationResult,
        hourly_rate: Decimal,
    ) -> LaborCosts {
        let mut costs = LaborCosts::default();

        for rule in rules.iter().filter(|rule| rule.carries_labor()) {
            let Some(line) = calc_result.line_for_rule(rule) else {
                tracing::debug!(rule = rule.display_name(), "人工規則找不到對應明細行，跳過");
                continue;
            };
            // carries_labor 已保證定額存在且為正
            let norm = rule.labor_norm.unwrap_or(Decimal::ZERO);

            let cost = norm * line.quantity * hourly_rate;
            costs.total += cost;
            costs.details.push(LaborLine {
                rule_id: Some(rule.id),
                name: rule
                    .name
                    .clone()
                    .unwrap_or_else(|| "Arbeidskosten".to_string()),
                norm,
                quantity: line.quantity,
                cost,
            });
        }

        costs
    }
}
