//! 變數解析
//!
//! 把公式裡的變數名稱解析成數值。解析順序：數值常量、幾何欄位、
//! 彙總欄位、舊版別名。都找不到就回傳 [`CalcError::UnknownVariable`]，
//! 絕不以零代替——零是合法的計算值，不能與「缺少」混淆。

use reno_core::{residence, CalcError, ResidenceRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 變數解析器
pub struct VariableResolver;

impl VariableResolver {
    /// 解析一個變數名稱
    pub fn resolve(name: &str, residence: &ResidenceRecord) -> reno_core::Result<Decimal> {
        let name = name.trim();

        // 內嵌數值常量（"0.3"、"2.39"）直接解析為自身
        if let Ok(literal) = Decimal::from_str(name) {
            return Ok(literal);
        }

        if let Some(value) = Self::lookup(name, residence) {
            return Ok(value);
        }

        // 舊版變數名稱：先換成現行名稱再查一次
        if let Some(current) = residence::resolve_alias(name) {
            if let Some(value) = Self::lookup(current, residence) {
                return Ok(value);
            }
        }

        Err(CalcError::UnknownVariable(name.to_string()))
    }

    /// 依命名空間順序查詢：幾何欄位先於彙總欄位
    fn lookup(name: &str, residence: &ResidenceRecord) -> Option<Decimal> {
        residence
            .geometry_value(name)
            .or_else(|| residence.derived_value(name))
    }
}
