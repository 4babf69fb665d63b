use crate::error::Result;
use crate::model::{require_columns, Column, SupplierView};
use crate::palette::{contrast_text, red_yellow_green, red_yellow_green_reversed};

pub const TABLE_HEADERS: [&str; 5] = [
    "Supplier",
    "Category",
    "Total Volume (USD)",
    "Performance",
    "Supply Risk",
];

const TABLE_COLUMNS: [Column; 5] = [
    Column::SupplierName,
    Column::Category,
    Column::TotalVolume,
    Column::OverallPerformance,
    Column::SupplyRisk,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub background: Option<String>,
    pub color: Option<&'static str>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            background: None,
            color: None,
        }
    }

    fn shaded(text: String, background: String) -> Self {
        let color = contrast_text(&background);
        Cell {
            text,
            background: Some(background),
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl StyledTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `$1,234,567.89`
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, frac)
}

/// Detailed supplier table: formatted values, performance shaded
/// red-to-green and risk green-to-red over 0-100.
pub fn styled_table(rows: &[SupplierView]) -> Result<StyledTable> {
    require_columns(rows, &TABLE_COLUMNS)?;

    let body = rows
        .iter()
        .map(|r| {
            let performance = r.overall_performance_score.unwrap_or_default();
            let risk = r.supply_risk_score.unwrap_or_default();
            vec![
                Cell::plain(r.supplier_name.clone()),
                Cell::plain(r.category.clone()),
                Cell::plain(format_currency(r.total_volume_usd)),
                Cell::shaded(
                    format!("{:.1}%", performance),
                    red_yellow_green(performance, 0.0, 100.0),
                ),
                Cell::shaded(
                    format!("{:.1}", risk),
                    red_yellow_green_reversed(risk, 0.0, 100.0),
                ),
            ]
        })
        .collect();

    Ok(StyledTable {
        headers: TABLE_HEADERS.to_vec(),
        rows: body,
    })
}
