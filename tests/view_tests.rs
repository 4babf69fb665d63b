use approx::assert_relative_eq;
use chrono::NaiveDate;
use supply_dash::model::*;
use supply_dash::palette;
use supply_dash::table::{format_currency, styled_table, TABLE_HEADERS};
use supply_dash::view::*;

fn supplier(id: &str, name: &str, category: &str, volume: f64) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: name.to_string(),
        country: "Germany".to_string(),
        category: category.to_string(),
        tier: Tier::Tier1,
        contract_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        annual_volume_usd: volume,
        certifications: vec!["ISO9001".to_string()],
    }
}

fn summary(id: &str, performance: f64, risk: f64, year: i32) -> SupplierScoreSummary {
    SupplierScoreSummary {
        supplier_id: id.to_string(),
        overall_performance_score: performance,
        supply_risk_score: risk,
        quality_score: performance,
        delivery_score: performance,
        year,
    }
}

fn sample_rows() -> Vec<SupplyChainRow> {
    let suppliers = vec![
        supplier("SUP001", "Acme Electronics", "Electronics", 1_000_000.0),
        supplier("SUP002", "Bolt Mechanical", "Mechanical Parts", 2_000_000.0),
        supplier("SUP003", "Chip Works", "Electronics", 3_000_000.0),
        supplier("SUP004", "Delta Freight", "Logistics Services", 500_000.0),
    ];
    let summaries = vec![
        summary("SUP001", 90.0, 20.0, 2024),
        summary("SUP002", 80.0, 40.0, 2024),
        summary("SUP003", 70.0, 60.0, 2023),
    ];
    join_supply_chain(&suppliers, &summaries)
}

// ═══════════════════════════════════════════════════════════════════════
// Join and year filter
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_left_join_keeps_unscored_suppliers() {
    let rows = sample_rows();
    assert_eq!(rows.len(), 4);
    assert!(rows[3].summary.is_none());
    assert_eq!(rows[3].year(), None);
    assert_eq!(rows[0].year(), Some(2024));
}

#[test]
fn test_filter_year() {
    let rows = sample_rows();
    let y2024 = filter_year(&rows, Some(2024));
    assert_eq!(y2024.len(), 2);
    assert_eq!(filter_year(&rows, Some(2023)).len(), 1);
    assert!(filter_year(&rows, Some(2020)).is_empty());
    assert_eq!(filter_year(&rows, None).len(), 4);
}

#[test]
fn test_aggregate_groups_by_name_and_category() {
    let mut rows = sample_rows();
    // Same supplier scored twice in one year
    let mut dup = rows[0].clone();
    dup.summary = Some(summary("SUP001", 70.0, 40.0, 2024));
    rows.push(dup);

    let view = aggregate_by_supplier(&filter_year(&rows, Some(2024)));
    assert_eq!(view.len(), 2);
    let acme = view.iter().find(|v| v.supplier_name == "Acme Electronics").unwrap();
    assert_relative_eq!(acme.total_volume_usd, 2_000_000.0);
    assert_relative_eq!(acme.overall_performance_score.unwrap(), 80.0);
    assert_relative_eq!(acme.supply_risk_score.unwrap(), 30.0);
}

#[test]
fn test_aggregate_unscored_rows_have_no_scores() {
    let rows = sample_rows();
    let view = aggregate_by_supplier(&filter_year(&rows, None));
    let delta = view.iter().find(|v| v.supplier_name == "Delta Freight").unwrap();
    assert_eq!(delta.overall_performance_score, None);
    assert!(!delta.has_column(Column::SupplyRisk));
    assert!(delta.has_column(Column::TotalVolume));
}

// ═══════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_search_matches_name_or_category_case_insensitive() {
    let view = aggregate_by_supplier(&filter_year(&sample_rows(), None));

    let by_category = search(&view, "ELECTRONICS");
    assert_eq!(by_category.len(), 2);

    let by_name = search(&view, "bolt");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].category, "Mechanical Parts");

    assert!(search(&view, "nothing like this").is_empty());
    assert_eq!(search(&view, "   ").len(), view.len(), "Blank query keeps everything");
    // Surrounding whitespace is part of the substring
    assert!(search(&view, "works ").is_empty());
    assert_eq!(search(&view, " works").len(), 1);
}

#[test]
fn test_category_volumes() {
    let view = aggregate_by_supplier(&filter_year(&sample_rows(), None));
    let volumes = category_volumes(&view);
    assert_eq!(volumes.len(), 3);
    let electronics = volumes.iter().find(|v| v.category == "Electronics").unwrap();
    assert_relative_eq!(electronics.total_volume_usd, 4_000_000.0);
}

#[test]
fn test_kpi_row() {
    let view = aggregate_by_supplier(&filter_year(&sample_rows(), None));
    let kpis = KpiRow::from_view(&view);
    assert_eq!(kpis.total_suppliers, 4);
    assert_relative_eq!(kpis.total_spend_usd, 6_500_000.0);
    assert_relative_eq!(kpis.avg_performance.unwrap(), 80.0);
    assert_relative_eq!(kpis.avg_risk.unwrap(), 40.0);

    let empty = KpiRow::from_view(&[]);
    assert_eq!(empty.total_suppliers, 0);
    assert_eq!(empty.avg_performance, None);
}

// ═══════════════════════════════════════════════════════════════════════
// Styled table
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_format_currency() {
    assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(999.5), "$999.50");
    assert_eq!(format_currency(-1500.0), "-$1,500.00");
}

#[test]
fn test_styled_table_formats_and_shades() {
    let view = aggregate_by_supplier(&filter_year(&sample_rows(), Some(2024)));
    let table = styled_table(&view).unwrap();
    assert_eq!(table.headers, TABLE_HEADERS.to_vec());
    assert_eq!(table.rows.len(), 2);

    let acme = &table.rows[0];
    assert_eq!(acme[0].text, "Acme Electronics");
    assert_eq!(acme[2].text, "$1,000,000.00");
    assert_eq!(acme[3].text, "90.0%");
    assert_eq!(acme[4].text, "20.0");
    assert!(acme[0].background.is_none());
    assert_eq!(acme[3].background, Some(palette::red_yellow_green(90.0, 0.0, 100.0)));
    assert_eq!(acme[4].background, Some(palette::red_yellow_green_reversed(20.0, 0.0, 100.0)));
}

#[test]
fn test_styled_table_requires_scores() {
    let view = aggregate_by_supplier(&filter_year(&sample_rows(), None));
    match styled_table(&view) {
        Err(supply_dash::error::DashError::MissingData { fields }) => {
            assert_eq!(fields, vec!["overall_performance_score", "supply_risk_score"]);
        }
        other => panic!("Expected missing data, got {:?}", other),
    }
}
