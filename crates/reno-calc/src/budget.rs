//! 預算加成鏈
//!
//! 把基礎金額經過一連串百分比加成推到含 BTW 的最終預算。除了
//! 標明的例外，每一段加成的計算基數都是固定的「直接費用＋自訂
//! 費用小計」，而不是一路滾動的累計值。所有中間小計都保留在
//! 輸出結構裡，重算必須能從 `baseAmount` 與設定精確重現每一項。

use reno_core::FinancialSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預算明細
///
/// 欄位順序即加成鏈的計算順序，欄位名稱是顯示層契約。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    /// 直接費用（基礎金額，低於零時取零）
    pub direct_costs: Decimal,

    /// 自訂費用行 1
    pub custom_value1_amount: Decimal,

    /// 自訂費用行 2
    pub custom_value2_amount: Decimal,

    /// 直接費用＋自訂費用小計（下列各段加成的固定基數）
    pub subtotal_direct_and_custom: Decimal,

    /// ABK / 機具設備
    pub abk_materieel_amount: Decimal,

    /// ABK 之後小計
    pub subtotal_after_abk: Decimal,

    /// 買斷（afkoop）
    pub afkoop_amount: Decimal,

    /// 直接費用＋ABK＋買斷小計
    pub subtotal_direct_abk_afkoop: Decimal,

    /// 細部計畫擬定費用
    pub planuitwerking_amount: Decimal,

    /// 計畫擬定之後小計
    pub subtotal_after_planuitwerking: Decimal,

    /// 售後服務
    pub nazorg_service_amount: Decimal,

    /// CAR / PI / DIC 保險
    pub car_pi_dic_amount: Decimal,

    /// 銀行保證
    pub bankgarantie_amount: Decimal,

    /// 一般管理費用 AK
    pub algemene_kosten_amount: Decimal,

    /// 風險準備
    pub risico_amount: Decimal,

    /// 利潤
    pub winst_amount: Decimal,

    /// 營建費用小計（bouwkosten）
    pub subtotal_bouwkosten: Decimal,

    /// 計畫前期準備
    pub planvoorbereiding_amount: Decimal,

    /// 租戶輔導
    pub huurdersbegeleiding_amount: Decimal,

    /// 附加費用之後小計
    pub subtotal_after_bijkomende_kosten: Decimal,

    /// 不含 BTW 總額
    pub total_excl_vat: Decimal,

    /// BTW
    pub vat: Decimal,

    /// 含 BTW 最終金額
    pub final_amount: Decimal,
}

/// 預算計算器
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// 對基礎金額套用完整加成鏈
    pub fn cascade(base_amount: Decimal, settings: &FinancialSettings) -> BudgetBreakdown {
        // 直接費用不得為負
        let direct_costs = base_amount.max(Decimal::ZERO);

        // 自訂費用行只在有直接費用時計入
        let (custom_value1_amount, custom_value2_amount) = if direct_costs > Decimal::ZERO {
            (settings.custom_value1, settings.custom_value2)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        // 固定基數：之後所有百分比加成都以此為底
        let subtotal_direct_and_custom =
            direct_costs + custom_value1_amount + custom_value2_amount;
        let base = subtotal_direct_and_custom;

        // ABK / 機具設備
        let abk_materieel_amount = Self::pct_of(base, settings.abk_materieel);
        let subtotal_after_abk = subtotal_direct_and_custom + abk_materieel_amount;

        // 買斷
        let afkoop_amount = Self::pct_of(base, settings.afkoop);
        let subtotal_direct_abk_afkoop = subtotal_after_abk + afkoop_amount;

        // 細部計畫擬定
        let planuitwerking_amount = Self::pct_of(base, settings.kosten_planuitwerking);
        let subtotal_after_planuitwerking = subtotal_direct_abk_afkoop + planuitwerking_amount;

        // 六項並列加成，一起累加成營建費用小計
        let nazorg_service_amount = Self::pct_of(base, settings.nazorg_service);
        let car_pi_dic_amount = Self::pct_of(base, settings.car_pi_dic_verzekering);
        let bankgarantie_amount = Self::pct_of(base, settings.bankgarantie);
        let algemene_kosten_amount = Self::pct_of(base, settings.algemene_kosten);
        let risico_amount = Self::pct_of(base, settings.risico);
        let winst_amount = Self::pct_of(base, settings.winst);

        let subtotal_bouwkosten = subtotal_after_planuitwerking
            + nazorg_service_amount
            + car_pi_dic_amount
            + bankgarantie_amount
            + algemene_kosten_amount
            + risico_amount
            + winst_amount;

        // 附加費用
        let planvoorbereiding_amount = Self::pct_of(base, settings.planvoorbereiding);
        let huurdersbegeleiding_amount = Self::pct_of(base, settings.huurdersbegeleiding);
        let subtotal_after_bijkomende_kosten =
            subtotal_bouwkosten + planvoorbereiding_amount + huurdersbegeleiding_amount;

        // BTW 以不含稅總額為基數（唯一的例外段）
        let total_excl_vat = subtotal_after_bijkomende_kosten;
        let vat = Self::pct_of(total_excl_vat, settings.vat_percentage);
        let final_amount = total_excl_vat + vat;

        BudgetBreakdown {
            direct_costs,
            custom_value1_amount,
            custom_value2_amount,
            subtotal_direct_and_custom,
            abk_materieel_amount,
            subtotal_after_abk,
            afkoop_amount,
            subtotal_direct_abk_afkoop,
            planuitwerking_amount,
            subtotal_after_planuitwerking,
            nazorg_service_amount,
            car_pi_dic_amount,
            bankgarantie_amount,
            algemene_kosten_amount,
            risico_amount,
            winst_amount,
            subtotal_bouwkosten,
            planvoorbereiding_amount,
            huurdersbegeleiding_amount,
            subtotal_after_bijkomende_kosten,
            total_excl_vat,
            vat,
            final_amount,
        }
    }

    /// 整數百分比 → 金額（百分比在此除以 100）
    fn pct_of(base: Decimal, pct: Decimal) -> Decimal {
        base * pct / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_base_without_custom_values_is_all_zero() {
        let settings = FinancialSettings::new()
            .with_abk_materieel(Decimal::from(5))
            .with_winst(Decimal::from(3));

        let breakdown = BudgetCalculator::cascade(Decimal::ZERO, &settings);

        assert_eq!(breakdown.direct_costs, Decimal::ZERO);
        assert_eq!(breakdown.custom_value1_amount, Decimal::ZERO);
        assert_eq!(breakdown.subtotal_direct_and_custom, Decimal::ZERO);
        assert_eq!(breakdown.final_amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_base_clamps_to_zero() {
        let settings = FinancialSettings::new();
        let breakdown = BudgetCalculator::cascade(Decimal::from(-500), &settings);

        assert_eq!(breakdown.direct_costs, Decimal::ZERO);
        assert_eq!(breakdown.final_amount, Decimal::ZERO);
    }

    #[test]
    fn test_custom_values_only_applied_with_positive_direct_costs() {
        let settings = FinancialSettings::new()
            .with_custom_value1(Decimal::from(1500), Some("Steigerwerk"))
            .with_custom_value2(Decimal::from(300), None);

        let without_base = BudgetCalculator::cascade(Decimal::ZERO, &settings);
        assert_eq!(without_base.custom_value1_amount, Decimal::ZERO);
        assert_eq!(without_base.custom_value2_amount, Decimal::ZERO);

        let with_base = BudgetCalculator::cascade(Decimal::from(100), &settings);
        assert_eq!(with_base.custom_value1_amount, Decimal::from(1500));
        assert_eq!(with_base.custom_value2_amount, Decimal::from(300));
        assert_eq!(with_base.subtotal_direct_and_custom, Decimal::from(1900));
    }

    #[test]
    fn test_reference_scenario_abk_and_vat() {
        // 10000 基礎、ABK 5%、其餘 0%、BTW 21%
        let settings = FinancialSettings::new()
            .with_zeroed_percentages()
            .with_abk_materieel(Decimal::from(5))
            .with_vat_percentage(Decimal::from(21));

        let breakdown = BudgetCalculator::cascade(Decimal::from(10000), &settings);

        assert_eq!(breakdown.subtotal_direct_and_custom, Decimal::from(10000));
        assert_eq!(breakdown.abk_materieel_amount, Decimal::from(500));
        assert_eq!(breakdown.subtotal_after_abk, Decimal::from(10500));
        // 零百分比段原封不動傳遞
        assert_eq!(breakdown.subtotal_direct_abk_afkoop, Decimal::from(10500));
        assert_eq!(breakdown.subtotal_bouwkosten, Decimal::from(10500));
        assert_eq!(breakdown.total_excl_vat, Decimal::from(10500));
        assert_eq!(breakdown.vat, Decimal::from(2205));
        assert_eq!(breakdown.final_amount, Decimal::from(12705));
    }

    #[test]
    fn test_surcharges_use_fixed_base_not_running_total() {
        // ABK 10% 與 afkoop 10% 都以 1000 為基數，各 100，
        // afkoop 不以 1100 為基數
        let settings = FinancialSettings::new()
            .with_zeroed_percentages()
            .with_abk_materieel(Decimal::from(10))
            .with_afkoop(Decimal::from(10));

        let breakdown = BudgetCalculator::cascade(Decimal::from(1000), &settings);

        assert_eq!(breakdown.abk_materieel_amount, Decimal::from(100));
        assert_eq!(breakdown.afkoop_amount, Decimal::from(100));
        assert_eq!(breakdown.subtotal_direct_abk_afkoop, Decimal::from(1200));
    }

    #[test]
    fn test_all_intermediates_reconstruct_chain() {
        let settings = FinancialSettings::new()
            .with_zeroed_percentages()
            .with_abk_materieel(Decimal::from(5))
            .with_afkoop(Decimal::from(2))
            .with_kosten_planuitwerking(Decimal::from(3))
            .with_nazorg_service(Decimal::ONE)
            .with_car_pi_dic_verzekering(Decimal::ONE)
            .with_bankgarantie(Decimal::ONE)
            .with_algemene_kosten(Decimal::from(6))
            .with_risico(Decimal::from(2))
            .with_winst(Decimal::from(4))
            .with_planvoorbereiding(Decimal::from(2))
            .with_huurdersbegeleiding(Decimal::ONE)
            .with_vat_percentage(Decimal::from(21));

        let base = Decimal::from(20000);
        let b = BudgetCalculator::cascade(base, &settings);

        assert_eq!(b.subtotal_after_abk, b.subtotal_direct_and_custom + b.abk_materieel_amount);
        assert_eq!(b.subtotal_direct_abk_afkoop, b.subtotal_after_abk + b.afkoop_amount);
        assert_eq!(
            b.subtotal_after_planuitwerking,
            b.subtotal_direct_abk_afkoop + b.planuitwerking_amount
        );
        assert_eq!(
            b.subtotal_bouwkosten,
            b.subtotal_after_planuitwerking
                + b.nazorg_service_amount
                + b.car_pi_dic_amount
                + b.bankgarantie_amount
                + b.algemene_kosten_amount
                + b.risico_amount
                + b.winst_amount
        );
        assert_eq!(
            b.subtotal_after_bijkomende_kosten,
            b.subtotal_bouwkosten + b.planvoorbereiding_amount + b.huurdersbegeleiding_amount
        );
        assert_eq!(b.total_excl_vat, b.subtotal_after_bijkomende_kosten);
        assert_eq!(b.final_amount, b.total_excl_vat + b.vat);

        // 每段加成都以固定基數計算
        let pct = |p: Decimal| b.subtotal_direct_and_custom * p / Decimal::ONE_HUNDRED;
        assert_eq!(b.abk_materieel_amount, pct(Decimal::from(5)));
        assert_eq!(b.winst_amount, pct(Decimal::from(4)));
        assert_eq!(b.huurdersbegeleiding_amount, pct(Decimal::ONE));
    }

    proptest! {
        #[test]
        fn prop_cascade_is_pure_and_idempotent(base in -100_000i64..1_000_000i64) {
            let settings = FinancialSettings::new()
                .with_abk_materieel(Decimal::from(5))
                .with_afkoop(Decimal::from(2))
                .with_winst(Decimal::from(3));

            let base = Decimal::from(base);
            let first = BudgetCalculator::cascade(base, &settings);
            let second = BudgetCalculator::cascade(base, &settings);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_final_amount_is_excl_vat_plus_vat(base in 0i64..1_000_000i64) {
            let settings = FinancialSettings::new()
                .with_abk_materieel(Decimal::from(8))
                .with_vat_percentage(Decimal::from(21));

            let b = BudgetCalculator::cascade(Decimal::from(base), &settings);
            prop_assert_eq!(b.final_amount, b.total_excl_vat + b.vat);
            prop_assert!(b.direct_costs >= Decimal::ZERO);
        }
    }
}
