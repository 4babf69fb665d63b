use approx::assert_relative_eq;
use supply_dash::charts::*;
use supply_dash::error::DashError;
use supply_dash::figure::{ColorSpec, SizeSpec, Trace, Values};
use supply_dash::model::{CategoryVolume, SupplierView};
use supply_dash::palette;

fn view(name: &str, category: &str, volume: f64, performance: f64, risk: f64) -> SupplierView {
    SupplierView {
        supplier_name: name.to_string(),
        category: category.to_string(),
        total_volume_usd: volume,
        overall_performance_score: Some(performance),
        supply_risk_score: Some(risk),
    }
}

fn sample_view() -> Vec<SupplierView> {
    vec![
        view("Acme Electronics", "Electronics", 5_000_000.0, 92.0, 20.0),
        view("Bolt Mechanical", "Mechanical Parts", 2_000_000.0, 81.0, 45.0),
        view("Chip Works", "Electronics", 3_000_000.0, 88.0, 25.0),
        view("Delta Freight International Holdings", "Logistics Services", 800_000.0, 76.0, 72.0),
    ]
}

fn bar(trace: &Trace) -> &supply_dash::figure::Bar {
    match trace {
        Trace::Bar(b) => b,
        other => panic!("Expected bar trace, got {:?}", other.name()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Required columns
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_scores_rejected_by_every_supplier_chart() {
    let mut rows = sample_view();
    rows[1].supply_risk_score = None;

    for result in [
        overview_dashboard(&rows),
        risk_matrix(&rows),
    ] {
        match result {
            Err(DashError::MissingData { fields }) => assert_eq!(fields, vec!["supply_risk_score"]),
            other => panic!("Expected missing data, got {:?}", other.map(|_| ())),
        }
    }

    // Performance dashboard does not bind to risk
    assert!(performance_dashboard(&rows).is_ok());
}

#[test]
fn test_missing_data_message_names_fields() {
    let mut rows = sample_view();
    rows[0].overall_performance_score = None;
    rows[0].supply_risk_score = None;
    let err = overview_dashboard(&rows).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing data: required fields absent: overall_performance_score, supply_risk_score"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Overview dashboard
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_overview_has_four_panels() {
    let fig = overview_dashboard(&sample_view()).unwrap();
    assert_eq!(fig.data.len(), 4);
    assert_eq!(fig.layout.height, Some(900));
    assert!(fig.layout.axes.contains_key("xaxis4"));
    assert_eq!(fig.layout.paper_bgcolor.as_deref(), Some(palette::BACKGROUND));
}

#[test]
fn test_overview_performance_sorted_ascending() {
    let fig = overview_dashboard(&sample_view()).unwrap();
    let perf = bar(&fig.data[0]);
    let Values::Labels(categories) = &perf.x else { panic!("categories on x") };
    assert_eq!(categories, &vec!["Logistics Services", "Mechanical Parts", "Electronics"]);
    assert_eq!(perf.text.as_ref().unwrap(), &vec!["76.0", "81.0", "90.0"]);
}

#[test]
fn test_overview_folds_small_categories_into_others() {
    let rows: Vec<SupplierView> = (0..13)
        .map(|i| view(&format!("S{}", i), &format!("Cat {:02}", i), (i + 1) as f64 * 1_000_000.0, 80.0, 30.0))
        .collect();
    let fig = overview_dashboard(&rows).unwrap();
    let volume = bar(&fig.data[1]);
    let Values::Labels(labels) = &volume.y else { panic!("categories on y") };
    assert_eq!(labels.len(), TOP_CATEGORIES + 1);
    assert_eq!(labels[0], "Others");
    let Values::Numbers(values) = &volume.x else { panic!("values on x") };
    // Cat 00..02 -> 1 + 2 + 3 million
    assert_relative_eq!(values[0], 6.0);
}

#[test]
fn test_overview_bubble_sizes_normalised() {
    let fig = overview_dashboard(&sample_view()).unwrap();
    let Trace::Scatter(bubbles) = &fig.data[2] else { panic!("bubble trace") };
    let Some(SizeSpec::PerPoint(sizes)) = &bubbles.marker.size else { panic!("sizes") };
    let min = sizes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sizes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(min, 20.0);
    assert_relative_eq!(max, 60.0);
}

#[test]
fn test_overview_top_suppliers_risk_coloured_and_truncated() {
    let fig = overview_dashboard(&sample_view()).unwrap();
    let top = bar(&fig.data[3]);
    let Values::Labels(names) = &top.y else { panic!("names on y") };
    assert!(names.iter().all(|n| n.chars().count() <= 20));
    assert_eq!(names.last().unwrap(), "Acme Electronics", "Largest volume last");
    let Some(ColorSpec::PerPoint(colors)) = &top.marker.color else { panic!("colors") };
    // Ascending volume: Delta (72), Bolt (45), Chip (25), Acme (20)
    assert_eq!(colors, &vec![palette::DANGER, palette::WARNING, palette::SUCCESS, palette::SUCCESS]);
}

#[test]
fn test_normalize_sizes_flat_series() {
    assert_eq!(normalize_sizes(&[5.0, 5.0], 20.0, 60.0), vec![40.0, 40.0]);
    assert!(normalize_sizes(&[], 20.0, 60.0).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Other charts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_performance_dashboard_bar_and_pie() {
    let fig = performance_dashboard(&sample_view()).unwrap();
    assert_eq!(fig.data.len(), 2);
    let Trace::Pie(pie) = &fig.data[1] else { panic!("pie trace") };
    assert_eq!(pie.labels[0], "Electronics");
    assert_eq!(pie.values, vec![2.0, 1.0, 1.0]);
    assert!(pie.domain.is_some());
    assert_eq!(fig.layout.showlegend, Some(false));
}

#[test]
fn test_risk_matrix_quadrants_and_sizes() {
    let fig = risk_matrix(&sample_view()).unwrap();
    assert_eq!(fig.layout.shapes.len(), 4);
    let labels: Vec<&str> = fig.layout.annotations.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(labels, vec!["GOOD", "WATCH", "IMPROVE", "CRITICAL"]);
    assert_eq!(fig.layout.axes["xaxis"].range, Some([0.0, 100.0]));
    assert_eq!(fig.layout.axes["yaxis"].range, Some([0.0, 100.0]));

    let Trace::Scatter(points) = &fig.data[0] else { panic!("scatter") };
    let Some(SizeSpec::PerPoint(sizes)) = &points.marker.size else { panic!("sizes") };
    assert_relative_eq!(sizes[0], 60.0);
    assert_relative_eq!(sizes[1], 2.0 / 5.0 * 50.0 + 10.0);
}

#[test]
fn test_volume_chart_labels_in_millions() {
    let rows = vec![
        CategoryVolume { category: "Electronics".into(), total_volume_usd: 8_000_000.0 },
        CategoryVolume { category: "Logistics".into(), total_volume_usd: 1_300_000.0 },
    ];
    let fig = volume_chart(&rows).unwrap();
    let b = bar(&fig.data[0]);
    assert_eq!(b.x, Values::Labels(vec!["Logistics".into(), "Electronics".into()]));
    let texts: Vec<&str> = fig.layout.annotations.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["$1.3M", "$8.0M"]);
    assert_eq!(fig.layout.height, Some(500));
}

#[test]
fn test_figure_serializes_for_plotly() {
    let fig = risk_matrix(&sample_view()).unwrap();
    let json = fig.to_value().unwrap();
    assert_eq!(json["data"][0]["type"], "scatter");
    assert_eq!(json["data"][0]["mode"], "markers+text");
    assert_eq!(json["layout"]["xaxis"]["range"][1], 100.0);
    assert_eq!(json["layout"]["shapes"][3]["fillcolor"], palette::DANGER);
}

#[test]
fn test_empty_view_still_renders() {
    let fig = overview_dashboard(&[]).unwrap();
    assert!(fig.data.iter().all(|t| t.is_empty()));
    assert!(volume_chart(&[]).unwrap().layout.annotations.is_empty());
}
