//! Typed schema for the supplier roster, the monthly ledger and the
//! derived score tables.
//!
//! Every table the presentation layer consumes implements [`Tabular`], so
//! chart builders can check the fields they bind to once, up front, and
//! report all absent fields in a single [`DashError::MissingData`].

use crate::error::{DashError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ordinal supplier classification. Tier 1 is the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
}

impl Tier {
    /// Scoring multiplier applied to quality and delivery baselines.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Tier1 => 1.0,
            Self::Tier2 => 0.9,
            Self::Tier3 => 0.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Tier 1" | "1" => Ok(Self::Tier1),
            "Tier 2" | "2" => Ok(Self::Tier2),
            "Tier 3" | "3" => Ok(Self::Tier3),
            other => Err(format!("unknown supplier tier: {}", other)),
        }
    }
}

/// Static identity record, created once at generation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub country: String,
    pub category: String,
    pub tier: Tier,
    pub contract_start: NaiveDate,
    pub annual_volume_usd: f64,
    pub certifications: Vec<String>,
}

impl Supplier {
    /// Certifications joined the way they are shown in reports, e.g.
    /// `ISO9001+AS9100`, or `None` for an empty set.
    pub fn certification_label(&self) -> String {
        if self.certifications.is_empty() {
            "None".to_string()
        } else {
            self.certifications.join("+")
        }
    }
}

/// Parse a `+`-joined certification string. `None` yields an empty set.
pub fn parse_certifications(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    raw.split('+')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// One supplier's performance for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub supplier_id: String,
    pub month: String,
    pub date: NaiveDate,
    pub units_ordered: u64,
    pub units_delivered: u64,
    pub on_time_delivery_rate: f64,
    pub quality_score: f64,
    pub unit_cost_usd: f64,
    pub lead_time_days: u32,
    pub defect_rate_ppm: f64,
    pub first_pass_yield: f64,
    pub communication_response_hours: f64,
    pub invoice_accuracy_rate: f64,
    pub sustainability_score: f64,
    pub innovation_score: f64,
    pub financial_stability_score: f64,
    pub capacity_utilization: f64,
    // Derived at creation
    pub total_cost_usd: f64,
    pub otif_rate: f64,
}

/// Aggregate scores for one supplier in one evaluation year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierScoreSummary {
    pub supplier_id: String,
    pub overall_performance_score: f64,
    pub supply_risk_score: f64,
    pub quality_score: f64,
    pub delivery_score: f64,
    pub year: i32,
}

/// Left join of a supplier with its (optional) score summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyChainRow {
    pub supplier: Supplier,
    pub summary: Option<SupplierScoreSummary>,
}

impl SupplyChainRow {
    pub fn year(&self) -> Option<i32> {
        self.summary.as_ref().map(|s| s.year)
    }
}

/// Left join on supplier id. Suppliers without a summary keep `None`.
pub fn join_supply_chain(
    suppliers: &[Supplier],
    summaries: &[SupplierScoreSummary],
) -> Vec<SupplyChainRow> {
    suppliers
        .iter()
        .map(|s| SupplyChainRow {
            supplier: s.clone(),
            summary: summaries.iter().find(|m| m.supplier_id == s.id).cloned(),
        })
        .collect()
}

/// Supplier-level row of the filtered dashboard view, grouped by
/// supplier name and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierView {
    pub supplier_name: String,
    pub category: String,
    pub total_volume_usd: f64,
    pub overall_performance_score: Option<f64>,
    pub supply_risk_score: Option<f64>,
}

/// Total contracted volume of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVolume {
    pub category: String,
    pub total_volume_usd: f64,
}

/// Named fields a chart or table can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    SupplierName,
    Category,
    TotalVolume,
    OverallPerformance,
    SupplyRisk,
    AvgUnitCost,
    CostCompetitiveness,
    AvgQuality,
    AvgDefectRate,
    QualityTrend,
    AvgDeliveryRate,
    DeliveryConsistency,
    OtifRate,
    AvgLeadTime,
    InnovationScore,
    SustainabilityScore,
    FinancialStability,
    StrategicValue,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SupplierName => "supplier_name",
            Self::Category => "category",
            Self::TotalVolume => "total_volume_usd",
            Self::OverallPerformance => "overall_performance_score",
            Self::SupplyRisk => "supply_risk_score",
            Self::AvgUnitCost => "avg_unit_cost",
            Self::CostCompetitiveness => "cost_competitiveness_score",
            Self::AvgQuality => "avg_quality_score",
            Self::AvgDefectRate => "avg_defect_rate_ppm",
            Self::QualityTrend => "quality_trend",
            Self::AvgDeliveryRate => "avg_delivery_rate",
            Self::DeliveryConsistency => "delivery_consistency",
            Self::OtifRate => "otif_rate",
            Self::AvgLeadTime => "avg_lead_time",
            Self::InnovationScore => "innovation_score",
            Self::SustainabilityScore => "sustainability_score",
            Self::FinancialStability => "financial_stability_score",
            Self::StrategicValue => "strategic_value_score",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row type whose fields can be checked by [`Column`].
pub trait Tabular {
    fn has_column(&self, column: Column) -> bool;
}

impl Tabular for SupplierView {
    fn has_column(&self, column: Column) -> bool {
        match column {
            Column::SupplierName | Column::Category | Column::TotalVolume => true,
            Column::OverallPerformance => self.overall_performance_score.is_some(),
            Column::SupplyRisk => self.supply_risk_score.is_some(),
            _ => false,
        }
    }
}

impl Tabular for CategoryVolume {
    fn has_column(&self, column: Column) -> bool {
        matches!(column, Column::Category | Column::TotalVolume)
    }
}

/// Fail with every column that at least one row lacks, in request order.
pub fn require_columns<T: Tabular>(rows: &[T], required: &[Column]) -> Result<()> {
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|c| rows.iter().any(|r| !r.has_column(**c)))
        .map(|c| c.name())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashError::missing(missing))
    }
}
