//! 維護費用攤提
//!
//! 把週期性維護規則的單次費用投影到固定年限上：每次發生的費用
//! 依「距第 0 年的經過年數」複利計入通膨，再彙總並求年平均。
//! 不同週期的兩項工作若在同一年發生，通膨係數必須相同。

use reno_core::MaintenanceJob;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MeasureCalculationResult;

/// 慣用的攤提年限（年）
pub const DEFAULT_HORIZON_YEARS: u32 = 40;

/// 攤提結果
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceProjection {
    /// 年限內的維護費用總額（含通膨）
    pub total: Decimal,

    /// 年平均（total / 年限，單純平均，不再折現）
    pub per_year: Decimal,
}

/// 維護費用計算器
pub struct MaintenanceCalculator;

impl MaintenanceCalculator {
    /// 攤提一組維護規則
    ///
    /// # 參數
    /// * `maintenance_result` - 維護規則的求值結果；無效時不認列任何
    ///   維護義務，回傳零
    /// * `horizon_years` - 攤提年限（由呼叫端提供，慣用 40）
    /// * `annual_inflation_rate` - 年通膨率，小數表示（1% 即 0.01）
    ///
    /// 對應不到明細行的規則跳過；`cycle <= 0` 或首年偏移落在年限外
    /// 的規則不貢獻任何費用。
    pub fn amortize(
        maintenance_result: &MeasureCalculationResult,
        jobs: &[MaintenanceJob],
        horizon_years: u32,
        annual_inflation_rate: Decimal,
    ) -> MaintenanceProjection {
        if !maintenance_result.is_valid || jobs.is_empty() || horizon_years == 0 {
            return MaintenanceProjection::default();
        }

        let horizon = i64::from(horizon_years);
        let factor = Decimal::ONE + annual_inflation_rate;
        let mut total = Decimal::ZERO;

        for job in jobs {
            let Some(line) = maintenance_result.line_for_rule(&job.rule) else {
                tracing::debug!(
                    job = job.rule.display_name(),
                    "維護規則找不到對應明細行，跳過"
                );
                continue;
            };

            let Some(cycle) = job.cycle.filter(|cycle| *cycle > 0) else {
                continue;
            };
            let start = job.effective_cycle_start();
            if start >= horizon {
                continue;
            }

            // 發生年序列 start, start+cycle, ... < horizon；
            // 通膨係數按經過年數遞增，不是按第幾次發生
            let base = line.total_price;
            let step_factor = Self::pow(factor, cycle);
            let mut inflated = base * Self::pow(factor, start);
            let mut year = start;
            while year < horizon {
                total += inflated;
                inflated *= step_factor;
                year += cycle;
            }
        }

        MaintenanceProjection {
            total,
            per_year: total / Decimal::from(horizon_years),
        }
    }

    fn pow(factor: Decimal, exponent: i64) -> Decimal {
        let mut result = Decimal::ONE;
        for _ in 0..exponent {
            result *= factor;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalculationLine;
    use reno_core::{CalcStepKind, Calculation, PriceRule};

    fn job(name: &str, cycle: i64) -> MaintenanceJob {
        let rule = PriceRule::new()
            .with_name(name)
            .with_step(Calculation::new(CalcStepKind::Variable, "gevelOppervlakNetto"))
            .with_price(Decimal::from(25));
        MaintenanceJob::new(rule).with_cycle(cycle)
    }

    fn result_for(job: &MaintenanceJob, total_price: Decimal) -> MeasureCalculationResult {
        MeasureCalculationResult::valid(vec![CalculationLine {
            rule_id: Some(job.rule.id),
            name: job.rule.name.clone(),
            unit: None,
            quantity: Decimal::ONE,
            unit_price: total_price,
            total_price,
            residence_type: None,
        }])
    }

    #[test]
    fn test_invalid_result_yields_zero() {
        let job = job("schilderwerk", 10);
        let invalid =
            MeasureCalculationResult::invalid("未知變數: x".to_string(), Vec::new());

        let projection = MaintenanceCalculator::amortize(
            &invalid,
            std::slice::from_ref(&job),
            40,
            Decimal::ZERO,
        );

        assert_eq!(projection.total, Decimal::ZERO);
        assert_eq!(projection.per_year, Decimal::ZERO);
    }

    #[test]
    fn test_no_jobs_yields_zero() {
        let projection = MaintenanceCalculator::amortize(
            &MeasureCalculationResult::valid(Vec::new()),
            &[],
            40,
            Decimal::ZERO,
        );
        assert_eq!(projection.total, Decimal::ZERO);
    }

    #[test]
    fn test_cycle_10_over_40_years_without_inflation() {
        // 第 0、10、20、30 年各發生一次，每次 1000
        let job = job("dakgoten", 10);
        let result = result_for(&job, Decimal::from(1000));

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::ZERO,
        );

        assert_eq!(projection.total, Decimal::from(4000));
        assert_eq!(projection.per_year, Decimal::from(100));
    }

    #[test]
    fn test_inflation_compounds_per_elapsed_year() {
        // total = 1000 × (1.01⁰ + 1.01¹⁰ + 1.01²⁰ + 1.01³⁰)
        let job = job("dakgoten", 10);
        let result = result_for(&job, Decimal::from(1000));

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::new(1, 2),
        );

        let factor = Decimal::ONE + Decimal::new(1, 2);
        let mut p10 = Decimal::ONE;
        for _ in 0..10 {
            p10 *= factor;
        }
        let p20 = p10 * p10;
        let p30 = p20 * p10;
        let expected = Decimal::from(1000) * (Decimal::ONE + p10 + p20 + p30);

        assert!((projection.total - expected).abs() < Decimal::new(1, 6));
        assert!(
            (projection.per_year - expected / Decimal::from(40)).abs() < Decimal::new(1, 6)
        );
    }

    #[test]
    fn test_same_year_same_inflation_factor_across_jobs() {
        // 週期 4 與週期 5 都在第 20 年發生，通膨係數必須一致：
        // 兩項各只看第 20 年的差即可由總額驗證
        let job_a = job("a", 20);
        let job_b = {
            let rule = PriceRule::new()
                .with_name("b")
                .with_step(Calculation::new(CalcStepKind::Variable, "dakOppervlak"))
                .with_price(Decimal::from(25));
            MaintenanceJob::new(rule).with_cycle(20)
        };

        let lines = vec![
            CalculationLine {
                rule_id: Some(job_a.rule.id),
                name: job_a.rule.name.clone(),
                unit: None,
                quantity: Decimal::ONE,
                unit_price: Decimal::from(100),
                total_price: Decimal::from(100),
                residence_type: None,
            },
            CalculationLine {
                rule_id: Some(job_b.rule.id),
                name: job_b.rule.name.clone(),
                unit: None,
                quantity: Decimal::ONE,
                unit_price: Decimal::from(100),
                total_price: Decimal::from(100),
                residence_type: None,
            },
        ];
        let result = MeasureCalculationResult::valid(lines);

        let jobs = vec![job_a, job_b];
        let projection =
            MaintenanceCalculator::amortize(&result, &jobs, 40, Decimal::new(2, 2));

        let factor = Decimal::ONE + Decimal::new(2, 2);
        let p20 = MaintenanceCalculator::pow(factor, 20);
        let expected = (Decimal::from(100) + Decimal::from(100) * p20) * Decimal::from(2);

        assert!((projection.total - expected).abs() < Decimal::new(1, 6));
    }

    #[test]
    fn test_cycle_start_beyond_horizon_contributes_nothing() {
        let job = job("ketelvervanging", 10).with_cycle_start(45);
        let result = result_for(&job, Decimal::from(5000));

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::new(1, 2),
        );

        assert_eq!(projection.total, Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_cycle_is_ignored() {
        let mut job = job("ongeldig", 0);
        let result = result_for(&job, Decimal::from(1000));
        job.cycle = Some(0);

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::ZERO,
        );
        assert_eq!(projection.total, Decimal::ZERO);

        job.cycle = None;
        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::ZERO,
        );
        assert_eq!(projection.total, Decimal::ZERO);
    }

    #[test]
    fn test_unmatched_job_is_skipped_not_fatal() {
        let matched = job("aanwezig", 10);
        let unmatched = job("afwezig", 5);
        let result = result_for(&matched, Decimal::from(1000));

        let jobs = vec![matched, unmatched];
        let projection =
            MaintenanceCalculator::amortize(&result, &jobs, 40, Decimal::ZERO);

        assert_eq!(projection.total, Decimal::from(4000));
    }

    #[test]
    fn test_cycle_start_shifts_occurrences() {
        // start=5, cycle=10, horizon=40 → 第 5、15、25、35 年
        let job = job("schilderwerk", 10).with_cycle_start(5);
        let result = result_for(&job, Decimal::from(200));

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            40,
            Decimal::ZERO,
        );

        assert_eq!(projection.total, Decimal::from(800));
    }

    #[test]
    fn test_custom_horizon() {
        // 年限是參數：horizon=20 時只剩第 0、10 年
        let job = job("dakgoten", 10);
        let result = result_for(&job, Decimal::from(1000));

        let projection = MaintenanceCalculator::amortize(
            &result,
            std::slice::from_ref(&job),
            20,
            Decimal::ZERO,
        );

        assert_eq!(projection.total, Decimal::from(2000));
        assert_eq!(projection.per_year, Decimal::from(100));
    }
}
