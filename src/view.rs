//! Year filter, supplier aggregation, search and KPI row for the
//! dashboard view.

use crate::metrics::mean;
use crate::model::{CategoryVolume, SupplierView, SupplyChainRow};
use std::collections::{BTreeMap, BTreeSet};

/// Rows whose score summary belongs to `year`. `None` keeps every row.
pub fn filter_year(rows: &[SupplyChainRow], year: Option<i32>) -> Vec<&SupplyChainRow> {
    rows.iter()
        .filter(|r| match year {
            Some(y) => r.year() == Some(y),
            None => true,
        })
        .collect()
}

/// Group by (supplier name, category): volumes are summed, scores
/// averaged over the rows that carry them. Output is ordered by key.
pub fn aggregate_by_supplier(rows: &[&SupplyChainRow]) -> Vec<SupplierView> {
    #[derive(Default)]
    struct Acc {
        volume: f64,
        performance: Vec<f64>,
        risk: Vec<f64>,
    }

    let mut groups: BTreeMap<(String, String), Acc> = BTreeMap::new();
    for row in rows {
        let key = (row.supplier.name.clone(), row.supplier.category.clone());
        let acc = groups.entry(key).or_default();
        acc.volume += row.supplier.annual_volume_usd;
        if let Some(summary) = &row.summary {
            acc.performance.push(summary.overall_performance_score);
            acc.risk.push(summary.supply_risk_score);
        }
    }

    groups
        .into_iter()
        .map(|((name, category), acc)| SupplierView {
            supplier_name: name,
            category,
            total_volume_usd: acc.volume,
            overall_performance_score: mean_of(&acc.performance),
            supply_risk_score: mean_of(&acc.risk),
        })
        .collect()
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(mean(values))
    }
}

/// Case-insensitive substring match on supplier name or category.
/// A blank query matches everything.
pub fn matches_search(row: &SupplierView, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    row.supplier_name.to_lowercase().contains(&query)
        || row.category.to_lowercase().contains(&query)
}

pub fn search(rows: &[SupplierView], query: &str) -> Vec<SupplierView> {
    rows.iter()
        .filter(|r| matches_search(r, query))
        .cloned()
        .collect()
}

/// Total volume per category, ordered by category name.
pub fn category_volumes(rows: &[SupplierView]) -> Vec<CategoryVolume> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.category.as_str()).or_insert(0.0) += row.total_volume_usd;
    }
    totals
        .into_iter()
        .map(|(category, total)| CategoryVolume {
            category: category.to_string(),
            total_volume_usd: total,
        })
        .collect()
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRow {
    pub total_suppliers: usize,
    pub total_spend_usd: f64,
    pub avg_performance: Option<f64>,
    pub avg_risk: Option<f64>,
}

impl KpiRow {
    pub fn from_view(rows: &[SupplierView]) -> Self {
        let names: BTreeSet<&str> = rows.iter().map(|r| r.supplier_name.as_str()).collect();
        let performance: Vec<f64> = rows.iter().filter_map(|r| r.overall_performance_score).collect();
        let risk: Vec<f64> = rows.iter().filter_map(|r| r.supply_risk_score).collect();

        KpiRow {
            total_suppliers: names.len(),
            total_spend_usd: rows.iter().map(|r| r.total_volume_usd).sum(),
            avg_performance: mean_of(&performance),
            avg_risk: mean_of(&risk),
        }
    }
}
