//! 價格公式求值
//!
//! 逐條價格規則解析出數量、取得單價、得到行費用，再彙總成單一
//! 措施的計算結果。任一規則失敗整體即為無效，剩餘規則仍會求值
//! （明細保留供稽核），但部分成功不會被回報為有效價格。

use reno_core::{
    CalcError, CalcStepKind, PriceRule, ResidenceRecord, ResidenceType,
};
use rust_decimal::Decimal;

use crate::variables::VariableResolver;
use crate::{CalculationLine, MeasureCalculationResult};

/// 價格計算器
pub struct PriceCalculator;

impl PriceCalculator {
    /// 對一組價格規則求值
    ///
    /// # 參數
    /// * `residence` - 住宅記錄；`None` 表示資料尚未載入，回傳無效
    ///   結果（預期中的暫態，不是程式錯誤）
    /// * `residence_type` - 作用中的住宅類型，決定每類單價的取用
    /// * `split` - 帶有每類單價的規則是否要展開成一類一行
    pub fn evaluate(
        rules: &[PriceRule],
        residence: Option<&ResidenceRecord>,
        residence_type: ResidenceType,
        split: bool,
    ) -> MeasureCalculationResult {
        let Some(residence) = residence else {
            return MeasureCalculationResult::invalid(
                CalcError::NoBuildingData.to_string(),
                Vec::new(),
            );
        };

        let mut lines = Vec::new();
        let mut first_error: Option<CalcError> = None;

        for rule in rules {
            match Self::evaluate_rule(rule, residence, residence_type, split) {
                Ok(mut rule_lines) => lines.append(&mut rule_lines),
                Err(error) => {
                    tracing::debug!(
                        rule = rule.display_name(),
                        %error,
                        "價格規則求值失敗"
                    );
                    first_error.get_or_insert(error);
                }
            }
        }

        match first_error {
            Some(error) => MeasureCalculationResult::invalid(error.to_string(), lines),
            None => {
                let result = MeasureCalculationResult::valid(lines);
                tracing::debug!(
                    price = %result.price,
                    lines = result.calculations.len(),
                    "價格規則求值完成"
                );
                result
            }
        }
    }

    /// 單條規則求值
    fn evaluate_rule(
        rule: &PriceRule,
        residence: &ResidenceRecord,
        residence_type: ResidenceType,
        split: bool,
    ) -> reno_core::Result<Vec<CalculationLine>> {
        let quantity = Self::resolve_quantity(rule, residence)?;

        // split 模式：同一數量，每個帶價的住宅類型各出一行
        if split {
            if let Some(prices) = &rule.prices_per_type {
                let lines: Vec<CalculationLine> = ResidenceType::all()
                    .into_iter()
                    .filter_map(|tier| {
                        prices.for_type(tier).map(|unit_price| {
                            Self::line(rule, quantity, unit_price, Some(tier))
                        })
                    })
                    .collect();

                if lines.is_empty() {
                    return Err(CalcError::MissingTypedPrice {
                        rule: rule.display_name().to_string(),
                        residence_type,
                    });
                }
                return Ok(lines);
            }
        }

        let unit_price = match &rule.prices_per_type {
            Some(prices) => {
                prices
                    .for_type(residence_type)
                    .ok_or_else(|| CalcError::MissingTypedPrice {
                        rule: rule.display_name().to_string(),
                        residence_type,
                    })?
            }
            None => rule
                .price
                .ok_or_else(|| CalcError::MissingPrice(rule.display_name().to_string()))?,
        };

        Ok(vec![Self::line(rule, quantity, unit_price, None)])
    }

    /// 把規則的計算步驟折疊成單一數量
    ///
    /// 第一個步驟的值作為初值；之後每一步依步驟類型併入累計值。
    /// 沒有運算子的步驟（變數、常量）以乘法併入——目錄裡的公式
    /// 是「寬 × 高 × 數量」這類維度鏈。
    fn resolve_quantity(rule: &PriceRule, residence: &ResidenceRecord) -> reno_core::Result<Decimal> {
        let steps = rule.ordered_steps();
        let mut iter = steps.iter();

        let first = iter
            .next()
            .ok_or_else(|| CalcError::EmptyCalculation(rule.display_name().to_string()))?;
        let mut quantity = VariableResolver::resolve(&first.value, residence)?;

        for step in iter {
            let value = VariableResolver::resolve(&step.value, residence)?;
            quantity = match step.kind {
                CalcStepKind::Add => quantity + value,
                CalcStepKind::Subtract => quantity - value,
                CalcStepKind::Divide => {
                    if value == Decimal::ZERO {
                        return Err(CalcError::DivisionByZero(
                            rule.display_name().to_string(),
                        ));
                    }
                    quantity / value
                }
                CalcStepKind::Multiply | CalcStepKind::Variable | CalcStepKind::Literal => {
                    quantity * value
                }
            };
        }

        Ok(quantity)
    }

    fn line(
        rule: &PriceRule,
        quantity: Decimal,
        unit_price: Decimal,
        residence_type: Option<ResidenceType>,
    ) -> CalculationLine {
        CalculationLine {
            rule_id: Some(rule.id),
            name: rule.name.clone(),
            unit: rule.unit.clone(),
            quantity,
            unit_price,
            total_price: quantity * unit_price,
            residence_type,
        }
    }
}
