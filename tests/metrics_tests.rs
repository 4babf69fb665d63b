use approx::assert_relative_eq;
use supply_dash::metrics::*;
use supply_dash::model::Tier;
use supply_dash::roster::supplier_roster;
use supply_dash::scorecard::{delivery_consistency, strategic_value};

// ═══════════════════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_classify_boundaries() {
    assert_eq!(classify_performance(85.0), PerformanceClass::Excellent);
    assert_eq!(classify_performance(84.9), PerformanceClass::Good);
    assert_eq!(classify_performance(75.0), PerformanceClass::Good);
    assert_eq!(classify_performance(74.99), PerformanceClass::Acceptable);
    assert_eq!(classify_performance(65.0), PerformanceClass::Acceptable);
    assert_eq!(classify_performance(64.9), PerformanceClass::NeedsImprovement);
    assert_eq!(classify_performance(0.0).label(), "Needs Improvement");
}

// ═══════════════════════════════════════════════════════════════════════
// Trend
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_trend_increasing_series() {
    let series: Vec<f64> = (1..=12).map(|v| v as f64).collect();
    assert_eq!(calculate_trend(&series).value(), 1);
}

#[test]
fn test_trend_decreasing_series() {
    let series: Vec<f64> = (1..=12).rev().map(|v| v as f64).collect();
    assert_eq!(calculate_trend(&series), Trend::Declining);
}

#[test]
fn test_trend_short_and_flat_series() {
    assert_eq!(calculate_trend(&[90.0]).value(), 0);
    assert_eq!(calculate_trend(&[]).value(), 0);
    assert_eq!(calculate_trend(&[90.0; 12]), Trend::Stable);
    // Within the 5% band
    let series = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 104.0, 104.0, 104.0, 104.0, 104.0, 104.0];
    assert_eq!(calculate_trend(&series), Trend::Stable);
}

// ═══════════════════════════════════════════════════════════════════════
// Risk
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_risk_from_factors_clamps_large_volume() {
    let risk = risk_from_factors("Vietnam", 0.0, 1.0, 500_000_000.0);
    assert_relative_eq!(risk, 100.0);

    let low = risk_from_factors("Germany", 100.0, 10.0, 0.0);
    assert_relative_eq!(low, 0.0);
}

#[test]
fn test_risk_from_factors_components() {
    // country 0.8 -> 8, consistency 90 -> 3, stability 7 -> 15, $5M -> 10
    let risk = risk_from_factors("India", 90.0, 7.0, 5_000_000.0);
    assert_relative_eq!(risk, 36.0, epsilon = 1e-9);

    // Concentration caps at 20
    let capped = risk_from_factors("Germany", 100.0, 10.0, 50_000_000.0);
    assert_relative_eq!(capped, 20.0);
}

#[test]
fn test_risk_from_quality_floor() {
    assert_relative_eq!(risk_from_quality(98.0), 20.0);
    assert_relative_eq!(risk_from_quality(70.0), 30.0);
    assert_relative_eq!(risk_from_quality(-10.0), 100.0);
}

// ═══════════════════════════════════════════════════════════════════════
// Base scores and summaries
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_country_reliability_buckets() {
    assert_relative_eq!(country_reliability("Germany"), 1.0);
    assert_relative_eq!(country_reliability("Taiwan"), 0.9);
    assert_relative_eq!(country_reliability("Brazil"), 0.8);
}

#[test]
fn test_base_scores_capped() {
    assert_relative_eq!(base_quality_score(Tier::Tier1, "Germany"), 98.0);
    assert_relative_eq!(base_delivery_score(Tier::Tier1, "Germany"), 98.0);
    // 75 + 0.8*20 + 0.8*5
    assert_relative_eq!(base_quality_score(Tier::Tier3, "Mexico"), 95.0, epsilon = 1e-9);
    // 70 + 0.8*25 + 0.8*5
    assert_relative_eq!(base_delivery_score(Tier::Tier3, "Mexico"), 94.0, epsilon = 1e-9);
}

#[test]
fn test_summary_rounded_and_in_range() {
    let roster = supplier_roster();
    let summaries = summarize_all(&roster, 2024);
    assert_eq!(summaries.len(), roster.len());
    for s in &summaries {
        assert_eq!(s.year, 2024);
        for v in [s.overall_performance_score, s.supply_risk_score, s.quality_score, s.delivery_score] {
            assert!((0.0..=100.0).contains(&v));
            assert_relative_eq!(v, round1(v));
        }
        assert_relative_eq!(
            s.overall_performance_score,
            round1((s.quality_score + s.delivery_score) / 2.0),
            epsilon = 0.051
        );
    }
}

#[test]
fn test_cost_competitiveness() {
    let costs = [50.0, 100.0, 80.0];
    assert_relative_eq!(cost_competitiveness(50.0, &costs), 50.0);
    assert_relative_eq!(cost_competitiveness(100.0, &costs), 0.0);
    assert_relative_eq!(cost_competitiveness(10.0, &[]), 50.0);
}

#[test]
fn test_scorecard_formulas() {
    assert_relative_eq!(delivery_consistency(&[90.0, 90.0, 90.0]), 100.0);
    // std of [80, 100] is 10
    assert_relative_eq!(delivery_consistency(&[80.0, 100.0]), 80.0);
    assert_relative_eq!(delivery_consistency(&[0.0, 100.0]), 0.0);

    assert_relative_eq!(strategic_value(7.0, 6.0, 8.0), 70.0);
    assert_relative_eq!(strategic_value(10.0, 10.0, 12.0), 100.0);
}

#[test]
fn test_mean_and_std() {
    assert_relative_eq!(mean(&[]), 0.0);
    assert_relative_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    assert_relative_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
}
