//! Chart builders. Each one is a pure function from a typed slice to a
//! [`Figure`]; the required columns are checked before anything is built.

use crate::error::Result;
use crate::figure::*;
use crate::metrics::mean;
use crate::model::{require_columns, CategoryVolume, Column, SupplierView};
use crate::palette::{self, generate_color_palette, risk_color};
use crate::scorecard::SupplierScorecard;
use std::collections::BTreeMap;

/// Categories shown individually in the overview; the rest fold into "Others".
pub const TOP_CATEGORIES: usize = 10;
/// Suppliers shown in the overview volume ranking.
pub const TOP_SUPPLIERS: usize = 15;
/// Suppliers shown in the scorecard volume panel.
pub const SCORECARD_TOP_SUPPLIERS: usize = 8;

pub const OVERVIEW_COLUMNS: [Column; 5] = [
    Column::SupplierName,
    Column::Category,
    Column::TotalVolume,
    Column::OverallPerformance,
    Column::SupplyRisk,
];

pub const PERFORMANCE_COLUMNS: [Column; 3] = [
    Column::SupplierName,
    Column::Category,
    Column::OverallPerformance,
];

pub const RISK_MATRIX_COLUMNS: [Column; 4] = [
    Column::SupplierName,
    Column::TotalVolume,
    Column::OverallPerformance,
    Column::SupplyRisk,
];

pub const VOLUME_COLUMNS: [Column; 2] = [Column::Category, Column::TotalVolume];

pub const SCORECARD_COLUMNS: [Column; 17] = [
    Column::SupplierName,
    Column::TotalVolume,
    Column::OverallPerformance,
    Column::SupplyRisk,
    Column::AvgUnitCost,
    Column::CostCompetitiveness,
    Column::AvgQuality,
    Column::AvgDefectRate,
    Column::QualityTrend,
    Column::AvgDeliveryRate,
    Column::DeliveryConsistency,
    Column::OtifRate,
    Column::AvgLeadTime,
    Column::InnovationScore,
    Column::SustainabilityScore,
    Column::FinancialStability,
    Column::StrategicValue,
];

fn truncate(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

fn millions(value: f64) -> f64 {
    value / 1_000_000.0
}

/// Min-max scale into `[lo, hi]`; a flat series maps to the midpoint.
pub fn normalize_sizes(values: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if span > 0.0 {
                (v - min) / span * (hi - lo) + lo
            } else {
                (lo + hi) / 2.0
            }
        })
        .collect()
}

struct CategoryStats {
    suppliers: usize,
    volume: f64,
    performance: Vec<f64>,
    risk: Vec<f64>,
}

fn category_stats(rows: &[SupplierView]) -> BTreeMap<String, CategoryStats> {
    let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for r in rows {
        let entry = stats.entry(r.category.clone()).or_insert(CategoryStats {
            suppliers: 0,
            volume: 0.0,
            performance: Vec::new(),
            risk: Vec::new(),
        });
        entry.suppliers += 1;
        entry.volume += r.total_volume_usd;
        entry.performance.extend(r.overall_performance_score);
        entry.risk.extend(r.supply_risk_score);
    }
    stats
}

/// Dark theme pass: axes, backgrounds, fonts and legend.
pub fn apply_dark_theme(fig: &mut Figure) {
    for axis in fig.layout.axes.values_mut() {
        axis.showgrid = Some(true);
        axis.gridwidth = Some(1.0);
        axis.gridcolor = Some(palette::GRID.to_string());
        axis.zeroline = Some(false);
        axis.showline = Some(true);
        axis.linewidth = Some(1.0);
        axis.linecolor = Some(palette::BORDER.to_string());
        axis.tickfont = Some(Font::color(palette::TEXT));
        if let Some(title) = axis.title.as_mut() {
            title.font.get_or_insert_with(Default::default).color = Some(palette::TEXT.to_string());
        }
    }

    let layout = &mut fig.layout;
    layout.paper_bgcolor = Some(palette::BACKGROUND.to_string());
    layout.plot_bgcolor = Some(palette::BACKGROUND.to_string());
    layout.font = Some(Font::color(palette::TEXT));
    if let Some(title) = layout.title.as_mut() {
        title.font.get_or_insert_with(Default::default).color = Some(palette::TEXT.to_string());
    }
    let legend = layout.legend.get_or_insert_with(Default::default);
    legend.font = Some(Font::color(palette::TEXT));
    legend.bgcolor = Some("rgba(0,0,0,0)".to_string());
    legend.bordercolor = Some(palette::BORDER.to_string());
}

/// Four-panel overview: performance by category, volume by category,
/// category risk/performance bubbles and the top supplier volumes.
pub fn overview_dashboard(rows: &[SupplierView]) -> Result<Figure> {
    require_columns(rows, &OVERVIEW_COLUMNS)?;

    let grid = SubplotGrid::new(2, 2, 0.15, 0.25);
    let mut fig = Figure::new();
    grid.apply(
        &mut fig.layout,
        &[
            "Performance by Category",
            "Category Distribution",
            "Risk vs Performance Matrix",
            "Volume Distribution",
        ],
        &[],
    );

    let stats = category_stats(rows);

    // Mean performance per category, ascending
    let mut performance: Vec<(String, f64)> = stats
        .iter()
        .map(|(c, s)| (c.clone(), mean(&s.performance)))
        .collect();
    performance.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut bar = Bar::new(
        "Performance",
        Values::Labels(performance.iter().map(|(c, _)| c.clone()).collect()),
        Values::Numbers(performance.iter().map(|(_, p)| *p).collect()),
    );
    bar.marker.color = Some(ColorSpec::PerPoint(generate_color_palette(performance.len())));
    bar.text = Some(performance.iter().map(|(_, p)| format!("{:.1}", p)).collect());
    bar.textposition = Some("outside");
    fig.add_trace(grid.place(Trace::Bar(bar), 1, 1));

    // Volume per category, ascending, keeping the top categories
    let mut volumes: Vec<(String, f64)> = stats.iter().map(|(c, s)| (c.clone(), s.volume)).collect();
    volumes.sort_by(|a, b| a.1.total_cmp(&b.1));
    if volumes.len() > TOP_CATEGORIES {
        let cut = volumes.len() - TOP_CATEGORIES;
        let others: f64 = volumes[..cut].iter().map(|(_, v)| v).sum();
        let mut kept = vec![("Others".to_string(), others)];
        kept.extend(volumes.drain(cut..));
        volumes = kept;
    }
    let mut bar = Bar::horizontal(
        "Volume",
        volumes.iter().map(|(c, _)| c.clone()).collect(),
        volumes.iter().map(|(_, v)| millions(*v)).collect(),
    );
    bar.marker.color = Some(ColorSpec::PerPoint(generate_color_palette(volumes.len())));
    bar.text = Some(volumes.iter().map(|(_, v)| format!("{:.1}M", millions(*v))).collect());
    bar.textposition = Some("outside");
    fig.add_trace(grid.place(Trace::Bar(bar), 1, 2));

    // Category bubbles, sizes normalised into [20, 60]
    let categories: Vec<String> = stats.keys().cloned().collect();
    let category_volumes: Vec<f64> = stats.values().map(|s| s.volume).collect();
    let mut scatter = Scatter::markers(
        "Categories",
        stats.values().map(|s| mean(&s.risk)).collect(),
        stats.values().map(|s| mean(&s.performance)).collect(),
    );
    scatter.text = Some(categories);
    scatter.marker.size = Some(SizeSpec::PerPoint(normalize_sizes(&category_volumes, 20.0, 60.0)));
    scatter.marker.color = Some(ColorSpec::PerPoint(generate_color_palette(stats.len())));
    scatter.marker.line = Some(Line {
        color: Some("white".to_string()),
        width: Some(1.0),
    });
    scatter.customdata = Some(category_volumes.iter().map(|v| millions(*v)).collect());
    scatter.hovertemplate = Some(
        "<b>%{text}</b><br>Risk Score: %{x:.1f}<br>Performance Score: %{y:.1f}<br>Volume: $%{customdata:.1f}M<extra></extra>"
            .to_string(),
    );
    fig.add_trace(grid.place(Trace::Scatter(scatter), 2, 1));

    // Top suppliers by volume, colour coded by risk
    let mut suppliers: Vec<&SupplierView> = rows.iter().collect();
    suppliers.sort_by(|a, b| a.total_volume_usd.total_cmp(&b.total_volume_usd));
    let top = &suppliers[suppliers.len().saturating_sub(TOP_SUPPLIERS)..];
    let risks: Vec<f64> = top.iter().map(|r| r.supply_risk_score.unwrap_or_default()).collect();
    let mut bar = Bar::horizontal(
        "Volume",
        top.iter().map(|r| truncate(&r.supplier_name, 20)).collect(),
        top.iter().map(|r| millions(r.total_volume_usd)).collect(),
    );
    bar.marker.color = Some(ColorSpec::PerPoint(
        risks.iter().map(|r| risk_color(*r).to_string()).collect(),
    ));
    bar.text = Some(top.iter().map(|r| format!("{:.1}M", millions(r.total_volume_usd))).collect());
    bar.textposition = Some("outside");
    bar.customdata = Some(risks);
    bar.hovertemplate = Some(
        "<b>%{y}</b><br>Volume: $%{x:.1f}M<br>Risk Score: %{customdata:.1f}<extra></extra>".to_string(),
    );
    fig.add_trace(grid.place(Trace::Bar(bar), 2, 2));

    grid.set_axis_titles(&mut fig.layout, 1, 1, "Category", "Performance Score (%)");
    grid.set_axis_titles(&mut fig.layout, 1, 2, "Volume (Millions USD)", "Category");
    grid.set_axis_titles(&mut fig.layout, 2, 1, "Risk Score", "Performance Score (%)");
    grid.set_axis_titles(&mut fig.layout, 2, 2, "Volume (Millions USD)", "Supplier");

    fig.layout.height = Some(900);
    fig.layout.showlegend = Some(true);
    fig.layout.margin = Some(Margin { t: 100, l: 80, r: 80, b: 80 });
    fig.layout.legend = Some(Legend::bottom(-0.15));
    fig.layout.title = Some(Title {
        x: Some(0.5),
        y: Some(0.98),
        xanchor: Some("center"),
        yanchor: Some("top"),
        ..Title::new("Supply Chain Performance Dashboard").with_font(Font::sized(24.0, palette::TEXT))
    });

    apply_dark_theme(&mut fig);
    Ok(fig)
}

/// Performance per category next to the supplier count per category.
pub fn performance_dashboard(rows: &[SupplierView]) -> Result<Figure> {
    require_columns(rows, &PERFORMANCE_COLUMNS)?;

    let grid = SubplotGrid::new(1, 2, 0.15, 0.0);
    let mut fig = Figure::new();
    grid.apply(
        &mut fig.layout,
        &["Performance by Category", "Supplier Distribution"],
        &[(1, 2)],
    );

    let stats = category_stats(rows);
    let mut bar = Bar::new(
        "Performance Score",
        Values::Labels(stats.keys().cloned().collect()),
        Values::Numbers(stats.values().map(|s| mean(&s.performance)).collect()),
    );
    bar.marker.color = Some(ColorSpec::Single(palette::PRIMARY.to_string()));
    fig.add_trace(grid.place(Trace::Bar(bar), 1, 1));

    // Largest categories first, ties by name
    let mut counts: Vec<(&String, usize)> = stats.iter().map(|(c, s)| (c, s.suppliers)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let pie = Pie {
        name: "Suppliers".to_string(),
        labels: counts.iter().map(|(c, _)| (*c).clone()).collect(),
        values: counts.iter().map(|(_, n)| *n as f64).collect(),
        marker: Marker {
            colors: Some(
                [palette::PRIMARY, palette::SUCCESS, palette::WARNING, palette::ACCENT]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            ..Default::default()
        },
        domain: None,
    };
    fig.add_trace(grid.place(Trace::Pie(pie), 1, 2));

    fig.layout.height = Some(400);
    fig.layout.showlegend = Some(false);
    fig.layout.title = Some(Title::new("Supply Chain Performance Overview"));

    apply_dark_theme(&mut fig);
    Ok(fig)
}

/// Supplier risk matrix: risk on x, performance on y, bubble size and
/// colour by volume, over four shaded quadrants split at 50/50.
pub fn risk_matrix(rows: &[SupplierView]) -> Result<Figure> {
    require_columns(rows, &RISK_MATRIX_COLUMNS)?;

    const MID: f64 = 50.0;
    let mut fig = Figure::new();

    fig.layout.shapes = vec![
        Shape::rect(0.0, MID, MID, 100.0, palette::SUCCESS, 0.1),
        Shape::rect(MID, 100.0, MID, 100.0, palette::WARNING, 0.1),
        Shape::rect(0.0, MID, 0.0, MID, palette::WARNING, 0.1),
        Shape::rect(MID, 100.0, 0.0, MID, palette::DANGER, 0.1),
    ];

    let volumes: Vec<f64> = rows.iter().map(|r| r.total_volume_usd).collect();
    let max_volume = volumes.iter().cloned().fold(0.0_f64, f64::max);
    let sizes: Vec<f64> = volumes
        .iter()
        .map(|v| if max_volume > 0.0 { v / max_volume * 50.0 + 10.0 } else { 10.0 })
        .collect();

    let mut scatter = Scatter::markers(
        "Suppliers",
        rows.iter().map(|r| r.supply_risk_score.unwrap_or_default()).collect(),
        rows.iter().map(|r| r.overall_performance_score.unwrap_or_default()).collect(),
    );
    scatter.mode = "markers+text";
    scatter.marker = Marker {
        size: Some(SizeSpec::PerPoint(sizes)),
        color: Some(ColorSpec::Scale(volumes)),
        colorscale: Some(ColorScale::Stops(vec![
            (0.0, palette::ACCENT.to_string()),
            (0.5, palette::PRIMARY.to_string()),
            (1.0, palette::SECONDARY.to_string()),
        ])),
        showscale: Some(true),
        colorbar: Some(ColorBar {
            title: Some(Title::new("Volume").with_font(Font::color(palette::TEXT))),
            tickfont: Some(Font::color(palette::TEXT)),
            ..Default::default()
        }),
        line: Some(Line {
            color: Some(palette::BORDER.to_string()),
            width: Some(1.0),
        }),
        ..Default::default()
    };
    scatter.text = Some(rows.iter().map(|r| r.supplier_name.clone()).collect());
    scatter.textposition = Some("top center");
    scatter.textfont = Some(Font::sized(10.0, palette::TEXT));
    scatter.hovertemplate = Some(
        "<b>%{text}</b><br>Risk Score: %{x:.1f}<br>Performance: %{y:.1f}%<br>Volume: $%{marker.color:,.0f}<br><extra></extra>"
            .to_string(),
    );
    fig.add_trace(Trace::Scatter(scatter));

    for key in ["xaxis", "yaxis"] {
        let axis = fig.layout.axis_mut(key);
        axis.range = Some([0.0, 100.0]);
    }
    fig.layout.axis_mut("xaxis").title =
        Some(Title::new("Risk Score").with_font(Font::sized(14.0, palette::TEXT)));
    fig.layout.axis_mut("yaxis").title =
        Some(Title::new("Performance Score").with_font(Font::sized(14.0, palette::TEXT)));

    let quadrant_labels = [
        (MID / 2.0, MID + (100.0 - MID) / 2.0, "GOOD", palette::SUCCESS),
        (MID + (100.0 - MID) / 2.0, MID + (100.0 - MID) / 2.0, "WATCH", palette::WARNING),
        (MID / 2.0, MID / 2.0, "IMPROVE", palette::WARNING),
        (MID + (100.0 - MID) / 2.0, MID / 2.0, "CRITICAL", palette::DANGER),
    ];
    for (x, y, text, color) in quadrant_labels {
        let mut a = Annotation::text_at(Position::At(x), y, text);
        a.xanchor = Some("center");
        a.yanchor = Some("middle");
        a.font = Some(Font::sized(14.0, color));
        fig.add_annotation(a);
    }

    fig.layout.title = Some(Title::new("Supplier Risk Matrix").with_font(Font::sized(20.0, palette::TEXT)));
    fig.layout.height = Some(600);
    fig.layout.showlegend = Some(false);

    apply_dark_theme(&mut fig);
    // Quadrants are the reference frame, so no zero lines or axis lines
    for key in ["xaxis", "yaxis"] {
        let axis = fig.layout.axis_mut(key);
        axis.showline = None;
        axis.linewidth = None;
        axis.linecolor = None;
    }
    Ok(fig)
}

/// Category volume bars in $M, ascending, with value labels.
pub fn volume_chart(rows: &[CategoryVolume]) -> Result<Figure> {
    require_columns(rows, &VOLUME_COLUMNS)?;

    let mut sorted: Vec<&CategoryVolume> = rows.iter().collect();
    sorted.sort_by(|a, b| a.total_volume_usd.total_cmp(&b.total_volume_usd));

    let mut fig = Figure::new();
    let mut bar = Bar::new(
        "Volume",
        Values::Labels(sorted.iter().map(|r| r.category.clone()).collect()),
        Values::Numbers(sorted.iter().map(|r| millions(r.total_volume_usd)).collect()),
    );
    bar.marker = Marker {
        color: Some(ColorSpec::Scale(sorted.iter().map(|r| r.total_volume_usd).collect())),
        colorscale: Some(ColorScale::Stops(vec![
            (0.0, palette::ACCENT.to_string()),
            (1.0, palette::PRIMARY.to_string()),
        ])),
        showscale: Some(true),
        colorbar: Some(ColorBar {
            title: Some(Title::new("Volume").with_font(Font::color(palette::TEXT))),
            ticksuffix: Some("M".to_string()),
            tickfont: Some(Font::color(palette::TEXT)),
            ..Default::default()
        }),
        ..Default::default()
    };
    bar.hovertemplate = Some("<b>%{x}</b><br>Volume: $%{y:.1f}M<br><extra></extra>".to_string());
    fig.add_trace(Trace::Bar(bar));

    for r in &sorted {
        let value = millions(r.total_volume_usd);
        let mut a = Annotation::text_at(Position::Label(r.category.clone()), value, format!("${:.1}M", value));
        a.yshift = Some(10.0);
        a.font = Some(Font::color(palette::TEXT));
        fig.add_annotation(a);
    }

    fig.layout.title =
        Some(Title::new("Volume Distribution by Category").with_font(Font::sized(20.0, palette::TEXT)));
    fig.layout.axis_mut("xaxis").title = Some(Title::new("Category").with_font(Font::sized(14.0, palette::TEXT)));
    fig.layout.axis_mut("yaxis").title =
        Some(Title::new("Volume (Millions USD)").with_font(Font::sized(14.0, palette::TEXT)));
    fig.layout.height = Some(500);
    fig.layout.bargap = Some(0.2);

    apply_dark_theme(&mut fig);
    Ok(fig)
}

/// Six-panel supplier scorecard built from ledger-derived scores.
pub fn scorecard_dashboard(cards: &[SupplierScorecard]) -> Result<Figure> {
    require_columns(cards, &SCORECARD_COLUMNS)?;

    let grid = SubplotGrid::new(2, 3, 0.2, 0.35);
    let mut fig = Figure::new();
    grid.apply(
        &mut fig.layout,
        &[
            "<b>Performance vs Risk Matrix</b>",
            "<b>Cost Competitiveness Analysis</b>",
            "<b>Quality Performance</b>",
            "<b>Delivery Excellence</b>",
            "<b>Volume Distribution</b>",
            "<b>Strategic Value Assessment</b>",
        ],
        &[],
    );

    let names: Vec<String> = cards.iter().map(|c| c.supplier_name.clone()).collect();
    let strategic: Vec<f64> = cards.iter().map(|c| c.strategic_value_score).collect();

    let mut s = Scatter::markers(
        "Suppliers",
        cards.iter().map(|c| c.overall_performance_score.unwrap_or_default()).collect(),
        cards.iter().map(|c| c.supply_risk_score.unwrap_or_default()).collect(),
    );
    s.text = Some(names.iter().map(|n| truncate(n, 10)).collect());
    s.marker = Marker {
        size: Some(SizeSpec::PerPoint(cards.iter().map(|c| c.total_volume_usd / 250_000.0).collect())),
        color: Some(ColorSpec::Scale(strategic.clone())),
        colorscale: Some(ColorScale::Named("Viridis")),
        showscale: Some(true),
        colorbar: Some(ColorBar {
            title: Some(Title::new("Strategic Value")),
            x: Some(0.35),
            len: Some(0.3),
            thickness: Some(10.0),
            tickfont: Some(Font {
                size: Some(8.0),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };
    s.hovertemplate = Some(
        "<b>%{text}</b><br>Performance: %{x:.1f}%<br>Risk: %{y:.1f}%<extra></extra>".to_string(),
    );
    fig.add_trace(grid.place(Trace::Scatter(s), 1, 1));

    let mut s = Scatter::markers(
        "Cost",
        cards.iter().map(|c| c.avg_unit_cost).collect(),
        cards.iter().map(|c| c.cost_competitiveness_score).collect(),
    );
    s.text = Some(names.clone());
    s.marker = Marker {
        size: Some(SizeSpec::Fixed(12.0)),
        color: Some(ColorSpec::Scale(cards.iter().map(|c| c.avg_quality_score).collect())),
        colorscale: Some(ColorScale::Named("RdYlGn")),
        ..Default::default()
    };
    s.hovertemplate = Some(
        "<b>%{text}</b><br>Unit Cost: $%{x:.2f}<br>Competitiveness: %{y:.1f}%<extra></extra>".to_string(),
    );
    fig.add_trace(grid.place(Trace::Scatter(s), 1, 2));

    let mut s = Scatter::markers(
        "Quality",
        cards.iter().map(|c| c.avg_quality_score).collect(),
        cards.iter().map(|c| c.avg_defect_rate_ppm).collect(),
    );
    s.text = Some(names.clone());
    s.marker = Marker {
        size: Some(SizeSpec::Fixed(10.0)),
        color: Some(ColorSpec::Scale(cards.iter().map(|c| c.quality_trend.value() as f64).collect())),
        colorscale: Some(ColorScale::Named("RdYlGn")),
        ..Default::default()
    };
    s.hovertemplate =
        Some("<b>%{text}</b><br>Quality: %{x:.1f}%<br>Defects: %{y:.0f} PPM<extra></extra>".to_string());
    fig.add_trace(grid.place(Trace::Scatter(s), 1, 3));

    let mut s = Scatter::markers(
        "Delivery",
        cards.iter().map(|c| c.avg_delivery_rate).collect(),
        cards.iter().map(|c| c.delivery_consistency).collect(),
    );
    s.text = Some(names.clone());
    s.marker = Marker {
        size: Some(SizeSpec::PerPoint(cards.iter().map(|c| c.otif_rate / 3.0).collect())),
        color: Some(ColorSpec::Scale(cards.iter().map(|c| c.avg_lead_time).collect())),
        colorscale: Some(ColorScale::Named("RdBu")),
        ..Default::default()
    };
    s.hovertemplate = Some(
        "<b>%{text}</b><br>Delivery: %{x:.1f}%<br>Consistency: %{y:.1f}%<extra></extra>".to_string(),
    );
    fig.add_trace(grid.place(Trace::Scatter(s), 2, 1));

    let mut by_volume: Vec<&SupplierScorecard> = cards.iter().collect();
    by_volume.sort_by(|a, b| a.total_volume_usd.total_cmp(&b.total_volume_usd));
    let top = &by_volume[by_volume.len().saturating_sub(SCORECARD_TOP_SUPPLIERS)..];
    let mut bar = Bar::horizontal(
        "Volume (Risk-coded)",
        top.iter().map(|c| truncate(&c.supplier_name, 10)).collect(),
        top.iter().map(|c| millions(c.total_volume_usd)).collect(),
    );
    bar.marker.color = Some(ColorSpec::PerPoint(
        top.iter()
            .map(|c| risk_color(c.supply_risk_score.unwrap_or_default()).to_string())
            .collect(),
    ));
    bar.width = Some(0.7);
    bar.hovertemplate = Some("<b>%{y}</b><br>Volume: $%{x:.1f}M<extra></extra>".to_string());
    fig.add_trace(grid.place(Trace::Bar(bar), 2, 2));

    let mut s = Scatter::markers(
        "Strategic Value",
        cards.iter().map(|c| c.innovation_score).collect(),
        cards.iter().map(|c| c.sustainability_score).collect(),
    );
    s.text = Some(names);
    s.marker = Marker {
        size: Some(SizeSpec::PerPoint(
            cards.iter().map(|c| c.financial_stability_score * 2.0).collect(),
        )),
        color: Some(ColorSpec::Scale(strategic)),
        colorscale: Some(ColorScale::Named("Plasma")),
        ..Default::default()
    };
    s.hovertemplate = Some(
        "<b>%{text}</b><br>Innovation: %{x:.1f}<br>Sustainability: %{y:.1f}<extra></extra>".to_string(),
    );
    fig.add_trace(grid.place(Trace::Scatter(s), 2, 3));

    if let Some(top) = cards.iter().max_by(|a, b| {
        a.overall_performance_score
            .unwrap_or_default()
            .total_cmp(&b.overall_performance_score.unwrap_or_default())
    }) {
        let mut a = Annotation::paper(0.5, 1.05, format!("Top Performer: {}", truncate(&top.supplier_name, 10)));
        a.font = Some(Font::sized(16.0, palette::SUCCESS));
        fig.add_annotation(a);
    }

    let axis_titles = [
        (1, 1, "Performance Score (%)", "Risk Score (%)"),
        (1, 2, "Unit Cost ($)", "Cost Competitiveness (%)"),
        (1, 3, "Quality Score (%)", "Defect Rate (PPM)"),
        (2, 1, "Delivery Rate (%)", "Consistency (%)"),
        (2, 2, "Volume ($M)", "Suppliers"),
        (2, 3, "Innovation Score", "Sustainability Score"),
    ];
    for (row, col, x, y) in axis_titles {
        grid.set_axis_titles(&mut fig.layout, row, col, &format!("<b>{}</b>", x), &format!("<b>{}</b>", y));
        let (xkey, ykey) = grid.axis_keys(row, col);
        for key in [xkey, ykey] {
            let axis = fig.layout.axis_mut(&key);
            axis.nticks = Some(6);
            axis.automargin = Some(true);
        }
        fig.layout.axis_mut(&grid.axis_keys(row, col).0).rangemode = Some("tozero");
    }

    fig.layout.height = Some(1200);
    fig.layout.margin = Some(Margin { t: 160, l: 130, r: 130, b: 140 });
    fig.layout.showlegend = Some(true);
    fig.layout.legend = Some(Legend::bottom(-0.25));
    fig.layout.title = Some(Title {
        x: Some(0.5),
        y: Some(0.99),
        xanchor: Some("center"),
        yanchor: Some("top"),
        ..Title::new("<b>Supplier Scorecard</b>").with_font(Font::sized(28.0, palette::TEXT))
    });

    apply_dark_theme(&mut fig);
    Ok(fig)
}
