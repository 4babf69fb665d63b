use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use supply_dash::error::DashError;
use supply_dash::generator::{DataGenerator, Dataset};
use supply_dash::model::Tier;
use supply_dash::roster::{supplier_roster, ROSTER_SIZE};

const TEST_SEED: u64 = 42;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 15).unwrap()
}

fn generate(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    DataGenerator::new(24, as_of()).generate(&mut rng).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Roster
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_roster_has_fixed_suppliers() {
    let roster = supplier_roster();
    assert_eq!(roster.len(), ROSTER_SIZE);
    assert_eq!(roster[0].id, "SUP001");
    assert_eq!(roster[0].name, "TechNova Electronics");
    assert_eq!(roster[24].id, "SUP025");
    assert_eq!(roster[24].country, "Switzerland");
}

#[test]
fn test_roster_certifications_parsed() {
    let roster = supplier_roster();
    let fast_track = roster.iter().find(|s| s.name == "FastTrack Logistics").unwrap();
    assert!(fast_track.certifications.is_empty(), "'None' should parse to an empty set");
    assert_eq!(fast_track.certification_label(), "None");

    let global = roster.iter().find(|s| s.name == "GlobalTech Partners").unwrap();
    assert_eq!(global.certifications, vec!["ISO9001", "AS9100", "ISO27001"]);
    assert_eq!(global.tier, Tier::Tier1);
}

// ═══════════════════════════════════════════════════════════════════════
// Determinism
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_same_seed_same_dataset() {
    let a = generate(TEST_SEED);
    let b = generate(TEST_SEED);
    assert_eq!(a, b, "Same seed must reproduce the dataset exactly");

    let roster_a = serde_json::to_string(&a.suppliers).unwrap();
    let roster_b = serde_json::to_string(&b.suppliers).unwrap();
    assert_eq!(roster_a, roster_b, "Rosters should serialize byte-identically");
}

#[test]
fn test_different_seed_different_ledger() {
    let a = generate(1);
    let b = generate(2);
    assert_eq!(a.suppliers, b.suppliers, "Roster is fixed");
    assert_ne!(a.ledger, b.ledger, "Ledger should depend on the seed");
}

// ═══════════════════════════════════════════════════════════════════════
// Ledger shape and bounds
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_ledger_size() {
    let data = generate(TEST_SEED);
    assert_eq!(data.ledger.len(), ROSTER_SIZE * 24);
    for s in &data.suppliers {
        assert_eq!(data.records_for(&s.id).count(), 24, "{} should have 24 months", s.id);
    }
}

#[test]
fn test_ledger_dates_step_back_thirty_days() {
    let data = generate(TEST_SEED);
    let records: Vec<_> = data.records_for("SUP001").collect();
    assert_eq!(records[0].date, as_of());
    assert_eq!(records[0].month, "2024-12");
    for pair in records.windows(2) {
        assert_eq!((pair[0].date - pair[1].date).num_days(), 30);
    }
}

#[test]
fn test_delivered_never_exceeds_ordered() {
    for seed in [1, 7, 42, 1234] {
        let data = generate(seed);
        for r in &data.ledger {
            assert!(
                r.units_delivered <= r.units_ordered,
                "seed {}: {} {} delivered {} > ordered {}",
                seed,
                r.supplier_id,
                r.month,
                r.units_delivered,
                r.units_ordered
            );
        }
    }
}

#[test]
fn test_percentage_fields_within_bounds() {
    let data = generate(TEST_SEED);
    for r in &data.ledger {
        assert!((60.0..=100.0).contains(&r.quality_score), "quality {}", r.quality_score);
        assert!((60.0..=100.0).contains(&r.on_time_delivery_rate), "on-time {}", r.on_time_delivery_rate);
        assert!((90.0..=100.0).contains(&r.invoice_accuracy_rate), "invoice {}", r.invoice_accuracy_rate);
        assert!((80.0..=100.0).contains(&r.first_pass_yield));
        assert!((40.0..=100.0).contains(&r.capacity_utilization));
        assert!((1.0..=10.0).contains(&r.sustainability_score));
        assert!((1.0..=10.0).contains(&r.innovation_score));
        assert!((1.0..=10.0).contains(&r.financial_stability_score));
        assert!(r.defect_rate_ppm >= 0.0);
        assert!(r.communication_response_hours >= 0.5);
        assert!(r.lead_time_days >= 1);
    }
}

#[test]
fn test_derived_fields() {
    let data = generate(TEST_SEED);
    for r in &data.ledger {
        let total = r.units_delivered as f64 * r.unit_cost_usd;
        assert!((r.total_cost_usd - total).abs() < 1e-6);
        let otif = r.on_time_delivery_rate * r.quality_score / 100.0;
        assert!((r.otif_rate - otif).abs() < 1e-9);
    }
}

#[test]
fn test_validate_rejects_overdelivery() {
    let mut data = generate(TEST_SEED);
    data.ledger[3].units_delivered = data.ledger[3].units_ordered + 1;
    match data.validate() {
        Err(DashError::Schema(msg)) => assert!(msg.contains("exceeds ordered"), "{}", msg),
        other => panic!("Expected schema error, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_out_of_range_score() {
    let mut data = generate(TEST_SEED);
    data.ledger[0].quality_score = 101.0;
    assert!(matches!(data.validate(), Err(DashError::Schema(_))));
}

#[test]
fn test_month_date_out_of_range_is_error() {
    let generator = DataGenerator::new(24, NaiveDate::MIN);
    assert_eq!(generator.month_date(0).unwrap(), NaiveDate::MIN);
    assert!(matches!(generator.month_date(1), Err(DashError::Config(_))));

    let mut rng = StdRng::seed_from_u64(TEST_SEED);
    assert!(matches!(generator.generate(&mut rng), Err(DashError::Config(_))));

    let far = DataGenerator::new(24, as_of());
    assert!(matches!(far.month_date(usize::MAX), Err(DashError::Config(_))));
    assert_eq!(far.month_date(2).unwrap(), NaiveDate::from_ymd_opt(2024, 10, 16).unwrap());
}
