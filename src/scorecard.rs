//! Ledger-derived supplier scorecards: cost, quality, delivery and
//! strategic value per supplier, plus the factor-based supply risk.

use crate::generator::Dataset;
use crate::metrics::{
    calculate_trend, classify_performance, cost_competitiveness, mean, risk_from_factors,
    std_dev, PerformanceClass, Trend,
};
use crate::model::{Column, PerformanceRecord, SupplierScoreSummary, Tabular};
use chrono::Datelike;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierScorecard {
    pub supplier_id: String,
    pub supplier_name: String,
    pub category: String,
    pub months_observed: usize,
    pub total_volume_usd: f64,
    pub avg_unit_cost: f64,
    pub cost_competitiveness_score: f64,
    pub avg_quality_score: f64,
    pub avg_defect_rate_ppm: f64,
    #[serde(serialize_with = "serialize_trend")]
    pub quality_trend: Trend,
    pub avg_delivery_rate: f64,
    pub delivery_consistency: f64,
    pub otif_rate: f64,
    pub avg_lead_time: f64,
    pub innovation_score: f64,
    pub sustainability_score: f64,
    pub financial_stability_score: f64,
    pub strategic_value_score: f64,
    /// Factor-based composite risk, distinct from the summary's risk.
    pub composite_risk_score: f64,
    pub overall_performance_score: Option<f64>,
    pub supply_risk_score: Option<f64>,
    pub performance_class: Option<PerformanceClass>,
}

fn serialize_trend<S: serde::Serializer>(trend: &Trend, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i8(trend.value())
}

impl Tabular for SupplierScorecard {
    fn has_column(&self, column: Column) -> bool {
        match column {
            Column::OverallPerformance => self.overall_performance_score.is_some(),
            Column::SupplyRisk => self.supply_risk_score.is_some(),
            _ => true,
        }
    }
}

/// Spread of on-time rates mapped into a 0-100 consistency score.
pub fn delivery_consistency(on_time_rates: &[f64]) -> f64 {
    (100.0 - 2.0 * std_dev(on_time_rates)).clamp(0.0, 100.0)
}

/// Mean of the three qualitative 1-10 scores, scaled to 0-100.
pub fn strategic_value(innovation: f64, sustainability: f64, financial_stability: f64) -> f64 {
    ((innovation + sustainability + financial_stability) / 3.0 * 10.0).clamp(0.0, 100.0)
}

/// Build one scorecard per supplier that has ledger records in `year`
/// (all years when `None`). Cost competitiveness is ranked against every
/// unit cost in the full ledger.
pub fn build_scorecards(
    dataset: &Dataset,
    summaries: &[SupplierScoreSummary],
    year: Option<i32>,
) -> Vec<SupplierScorecard> {
    let all_costs = dataset.unit_costs();
    let mut cards = Vec::new();

    for supplier in &dataset.suppliers {
        let mut records: Vec<&PerformanceRecord> = dataset
            .records_for(&supplier.id)
            .filter(|r| year.map_or(true, |y| r.date.year() == y))
            .collect();
        if records.is_empty() {
            continue;
        }
        records.sort_by_key(|r| r.date);

        let field = |f: fn(&PerformanceRecord) -> f64| -> Vec<f64> {
            records.iter().map(|r| f(r)).collect()
        };
        let unit_costs = field(|r| r.unit_cost_usd);
        let quality = field(|r| r.quality_score);
        let on_time = field(|r| r.on_time_delivery_rate);
        let financial = mean(&field(|r| r.financial_stability_score));
        let innovation = mean(&field(|r| r.innovation_score));
        let sustainability = mean(&field(|r| r.sustainability_score));

        let avg_unit_cost = mean(&unit_costs);
        let consistency = delivery_consistency(&on_time);
        let summary = summaries.iter().find(|s| s.supplier_id == supplier.id);

        cards.push(SupplierScorecard {
            supplier_id: supplier.id.clone(),
            supplier_name: supplier.name.clone(),
            category: supplier.category.clone(),
            months_observed: records.len(),
            total_volume_usd: supplier.annual_volume_usd,
            avg_unit_cost,
            cost_competitiveness_score: cost_competitiveness(avg_unit_cost, &all_costs),
            avg_quality_score: mean(&quality),
            avg_defect_rate_ppm: mean(&field(|r| r.defect_rate_ppm)),
            quality_trend: calculate_trend(&quality),
            avg_delivery_rate: mean(&on_time),
            delivery_consistency: consistency,
            otif_rate: mean(&field(|r| r.otif_rate)),
            avg_lead_time: mean(&field(|r| r.lead_time_days as f64)),
            innovation_score: innovation,
            sustainability_score: sustainability,
            financial_stability_score: financial,
            strategic_value_score: strategic_value(innovation, sustainability, financial),
            composite_risk_score: risk_from_factors(
                &supplier.country,
                consistency,
                financial,
                supplier.annual_volume_usd,
            ),
            overall_performance_score: summary.map(|s| s.overall_performance_score),
            supply_risk_score: summary.map(|s| s.supply_risk_score),
            performance_class: summary.map(|s| classify_performance(s.overall_performance_score)),
        });
    }

    cards
}
