use crate::error::Result;
use crate::figure::Figure;
use crate::model::{PerformanceRecord, Supplier, SupplierScoreSummary};
use crate::scorecard::SupplierScorecard;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn save_serialized<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    create_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the supplier roster to CSV, certifications joined with `+`.
pub fn save_roster_csv(suppliers: &[Supplier], path: &Path) -> Result<()> {
    create_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "supplier_id",
        "supplier_name",
        "country",
        "category",
        "tier",
        "contract_start",
        "annual_volume_usd",
        "certifications",
    ])?;

    for s in suppliers {
        wtr.write_record(&[
            s.id.clone(),
            s.name.clone(),
            s.country.clone(),
            s.category.clone(),
            s.tier.label().to_string(),
            s.contract_start.format("%Y-%m-%d").to_string(),
            format!("{:.2}", s.annual_volume_usd),
            s.certification_label(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the monthly performance ledger to CSV.
pub fn save_ledger_csv(ledger: &[PerformanceRecord], path: &Path) -> Result<()> {
    save_serialized(ledger, path)
}

pub fn save_summaries_csv(summaries: &[SupplierScoreSummary], path: &Path) -> Result<()> {
    save_serialized(summaries, path)
}

pub fn save_scorecards_csv(cards: &[SupplierScorecard], path: &Path) -> Result<()> {
    save_serialized(cards, path)
}

/// Save a figure as plotly JSON.
pub fn save_figure_json(figure: &Figure, path: &Path) -> Result<()> {
    create_parent(path)?;
    fs::write(path, figure.to_json()?)?;
    Ok(())
}

/// Save raw bytes, e.g. an exported workbook.
pub fn save_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    create_parent(path)?;
    fs::write(path, bytes)?;
    Ok(())
}
