//! 改造報價完整範例
//!
//! 展示從措施目錄到含 BTW 預算明細的完整定價流程

use reno::*;
use rust_decimal::Decimal;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    println!("===== Renovation Quote Example =====\n");

    // 步驟 1: 住宅記錄（樓梯間公寓，1965-1974）
    println!("[1] Residence Record");
    let residence = ResidenceRecord::new()
        .with_geometry("breed", Decimal::new(62, 1))
        .with_geometry("diepte", Decimal::new(95, 1))
        .with_geometry("aantalWoningen", Decimal::from(24))
        .with_geometry("hoogte", Decimal::from(12))
        .with_derived("dakOppervlak", Decimal::new(589, 1))
        .with_derived("gevelOppervlakNetto", Decimal::new(465, 1))
        .with_derived("kozijnOppervlakTotaal", Decimal::new(142, 1));
    residence.validate()?;

    let residence_type = ResidenceType::classify("Portiekflat 1965-1974");
    println!("    Type: {}\n", residence_type);

    // 步驟 2: 財務設定快照
    println!("[2] Financial Settings");
    let settings = FinancialSettings::new()
        .with_abk_materieel(Decimal::from(5))
        .with_afkoop(Decimal::from(2))
        .with_algemene_kosten(Decimal::from(6))
        .with_winst(Decimal::from(3))
        .with_custom_value1(Decimal::from(1500), Some("Steigerwerk"));
    println!("    ABK 5%, afkoop 2%, AK 6%, winst 3%, BTW 21%\n");

    // 步驟 3: 措施目錄
    println!("[3] Measure Catalog");
    let measures = vec![
        Measure::new("2.1 Dakisolatie")
            .with_group("dak")
            .with_price_rule(
                PriceRule::new()
                    .with_name("dakisolatie")
                    .with_unit("m2")
                    .with_step(Calculation::new(CalcStepKind::Variable, "dakOppervlak"))
                    .with_step(Calculation::new(CalcStepKind::Literal, "1.05"))
                    .with_price(Decimal::from(45))
                    .with_labor(Decimal::new(25, 2)),
            )
            .with_maintenance_job(
                MaintenanceJob::new(
                    PriceRule::new()
                        .with_name("dakinspectie")
                        .with_unit("m2")
                        .with_step(Calculation::new(CalcStepKind::Variable, "dakOppervlak"))
                        .with_price(Decimal::from(2)),
                )
                .with_cycle(10),
            ),
        Measure::new("5.3 Kozijnen vervangen")
            .with_group("kozijnen")
            .with_price_rule(
                PriceRule::new()
                    .with_name("kozijnen")
                    .with_unit("m2")
                    .with_step(Calculation::new(
                        CalcStepKind::Variable,
                        "kozijnOppervlakTotaal",
                    ))
                    .with_prices_per_type(PricesPerType::new(
                        Decimal::from(250),
                        Decimal::from(280),
                        Decimal::from(300),
                    )),
            ),
    ];
    for measure in &measures {
        measure.validate()?;
        println!("    {}", measure.name);
    }
    println!();

    // 步驟 4: 批次定價
    println!("[4] Price Catalog");
    let pricer = MeasurePricer::new(settings.clone());
    let pricings =
        pricer.price_catalog(&measures, Some(&residence), residence_type, "1965-1974");

    for pricing in &pricings {
        println!("    {}", pricing.measure_name);
        for line in &pricing.price_result.calculations {
            println!(
                "      - {} {:.2} {} x EUR {:.2} = EUR {:.2}",
                line.name.as_deref().unwrap_or("-"),
                line.quantity,
                line.unit.as_deref().unwrap_or(""),
                line.unit_price,
                line.total_price
            );
        }
        for labor in &pricing.labor_details {
            println!(
                "      - arbeid {} ({} u x {:.2}) = EUR {:.2}",
                labor.name, labor.norm, labor.quantity, labor.cost
            );
        }
        println!("      materiaal  EUR {:.2}", pricing.material_cost);
        println!("      arbeid     EUR {:.2}", pricing.labor_cost);
        println!("      eenmalig   EUR {:.2}", pricing.base_cost);
        if pricing.maintenance.total > Decimal::ZERO {
            println!(
                "      onderhoud  EUR {:.2} over 40 jaar (EUR {:.2} p.j.)",
                pricing.maintenance.total, pricing.maintenance.per_year
            );
        }
        for warning in &pricing.warnings {
            println!("      ! {}", warning);
        }
    }
    println!();

    // 步驟 5: 預算加成鏈
    println!("[5] Budget Breakdown");
    let combined = MeasurePricer::combined_base_cost(&pricings);
    let breakdown = BudgetCalculator::cascade(combined, &settings);

    println!("    Directe kosten        EUR {:.2}", breakdown.direct_costs);
    println!(
        "    {}            EUR {:.2}",
        settings.custom_value1_name.as_deref().unwrap_or("Extra"),
        breakdown.custom_value1_amount
    );
    println!(
        "    Subtotaal             EUR {:.2}",
        breakdown.subtotal_direct_and_custom
    );
    println!(
        "    ABK / materieel       EUR {:.2}",
        breakdown.abk_materieel_amount
    );
    println!("    Afkoop                EUR {:.2}", breakdown.afkoop_amount);
    println!(
        "    Algemene kosten       EUR {:.2}",
        breakdown.algemene_kosten_amount
    );
    println!("    Winst                 EUR {:.2}", breakdown.winst_amount);
    println!(
        "    Totaal excl. BTW      EUR {:.2}",
        breakdown.total_excl_vat
    );
    println!("    BTW (21%)             EUR {:.2}", breakdown.vat);
    println!(
        "    Totaal incl. BTW      EUR {:.2}",
        breakdown.final_amount
    );

    Ok(())
}
