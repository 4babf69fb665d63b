use crate::model::{Supplier, SupplierScoreSummary, Tier};
use serde::Serialize;
use std::fmt;

const TIER_1_COUNTRIES: [&str; 5] = ["Germany", "Japan", "USA", "Switzerland", "Netherlands"];
const TIER_2_COUNTRIES: [&str; 6] = ["UK", "France", "Italy", "South Korea", "Taiwan", "Singapore"];

/// Window length, in periods, used for trend comparison.
pub const TREND_WINDOW: usize = 6;

/// Country reliability bucket: 1.0, 0.9 or 0.8.
pub fn country_reliability(country: &str) -> f64 {
    if TIER_1_COUNTRIES.contains(&country) {
        1.0
    } else if TIER_2_COUNTRIES.contains(&country) {
        0.9
    } else {
        0.8
    }
}

/// Baseline quality score from static attributes, capped at 98.
pub fn base_quality_score(tier: Tier, country: &str) -> f64 {
    (75.0 + tier.multiplier() * 20.0 + country_reliability(country) * 5.0).min(98.0)
}

/// Baseline delivery score from static attributes, capped at 98.
pub fn base_delivery_score(tier: Tier, country: &str) -> f64 {
    (70.0 + tier.multiplier() * 25.0 + country_reliability(country) * 5.0).min(98.0)
}

/// Supply risk as the inverse of quality, floored at 20.
pub fn risk_from_quality(quality_score: f64) -> f64 {
    (100.0 - quality_score).max(20.0).min(100.0)
}

/// Composite supply risk from country, delivery consistency, financial
/// stability and volume concentration. Result is in [0, 100].
pub fn risk_from_factors(
    country: &str,
    delivery_consistency: f64,
    financial_stability: f64,
    volume_usd: f64,
) -> f64 {
    let country_risk = (1.0 - country_reliability(country)) * 40.0;
    let delivery_risk = (100.0 - delivery_consistency) * 0.3;
    let financial_risk = (10.0 - financial_stability) * 5.0;
    let concentration_risk = (volume_usd / 1_000_000.0 * 2.0).min(20.0);
    let total = country_risk + delivery_risk + financial_risk + concentration_risk;
    if total.is_nan() {
        return 100.0;
    }
    total.clamp(0.0, 100.0)
}

/// Cost competitiveness of `unit_cost` against every observed unit cost.
/// Cheaper scores higher. Returns 50 when nothing has been observed.
pub fn cost_competitiveness(unit_cost: f64, observed_costs: &[f64]) -> f64 {
    let max_cost = observed_costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if observed_costs.is_empty() || max_cost <= 0.0 {
        return 50.0;
    }
    (100.0 - unit_cost / max_cost * 100.0).clamp(0.0, 100.0)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score the supplier from its tier and country for `year`.
pub fn summarize_supplier(supplier: &Supplier, year: i32) -> SupplierScoreSummary {
    let quality = base_quality_score(supplier.tier, &supplier.country);
    let delivery = base_delivery_score(supplier.tier, &supplier.country);
    let risk = risk_from_quality(quality);

    SupplierScoreSummary {
        supplier_id: supplier.id.clone(),
        overall_performance_score: round1((quality + delivery) / 2.0),
        supply_risk_score: round1(risk),
        quality_score: round1(quality),
        delivery_score: round1(delivery),
        year,
    }
}

pub fn summarize_all(suppliers: &[Supplier], year: i32) -> Vec<SupplierScoreSummary> {
    suppliers.iter().map(|s| summarize_supplier(s, year)).collect()
}

/// Ordinal performance class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PerformanceClass {
    NeedsImprovement,
    Acceptable,
    Good,
    Excellent,
}

impl PerformanceClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thresholds are inclusive: a score on a boundary takes the higher class.
pub fn classify_performance(score: f64) -> PerformanceClass {
    if score >= 85.0 {
        PerformanceClass::Excellent
    } else if score >= 75.0 {
        PerformanceClass::Good
    } else if score >= 65.0 {
        PerformanceClass::Acceptable
    } else {
        PerformanceClass::NeedsImprovement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Declining,
    Stable,
    Improving,
}

impl Trend {
    pub fn value(&self) -> i8 {
        match self {
            Self::Declining => -1,
            Self::Stable => 0,
            Self::Improving => 1,
        }
    }
}

/// Trend of a chronologically ordered series (oldest first).
///
/// The mean of the last [`TREND_WINDOW`] values is compared with the mean
/// of the first [`TREND_WINDOW`]; a move beyond 5% either way is a trend.
/// Series shorter than two points are stable.
pub fn calculate_trend(series: &[f64]) -> Trend {
    if series.len() < 2 {
        return Trend::Stable;
    }
    let window = TREND_WINDOW.min(series.len());
    let older = mean(&series[..window]);
    let recent = mean(&series[series.len() - window..]);

    if recent > older * 1.05 {
        Trend::Improving
    } else if recent < older * 0.95 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
