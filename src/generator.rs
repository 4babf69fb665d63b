//! Synthetic supplier ecosystem.
//!
//! The roster is fixed; the monthly ledger is drawn from the injected RNG,
//! so a seeded `StdRng` reproduces the same dataset on every run.

use crate::error::{DashError, Result};
use crate::metrics::{base_delivery_score, base_quality_score, country_reliability};
use crate::model::{PerformanceRecord, Supplier};
use crate::roster::supplier_roster;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Exp1, StandardNormal};
use std::collections::HashSet;
use std::f64::consts::PI;

/// Days between consecutive ledger months.
const DAYS_PER_MONTH: i64 = 30;

/// Roster plus ledger, validated against the schema bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub suppliers: Vec<Supplier>,
    pub ledger: Vec<PerformanceRecord>,
}

impl Dataset {
    pub fn records_for<'a>(&'a self, supplier_id: &'a str) -> impl Iterator<Item = &'a PerformanceRecord> + 'a {
        self.ledger.iter().filter(move |r| r.supplier_id == supplier_id)
    }

    pub fn unit_costs(&self) -> Vec<f64> {
        self.ledger.iter().map(|r| r.unit_cost_usd).collect()
    }

    /// Check every bound the generator promises.
    pub fn validate(&self) -> Result<()> {
        let ids: HashSet<&str> = self.suppliers.iter().map(|s| s.id.as_str()).collect();
        if ids.len() != self.suppliers.len() {
            return Err(DashError::Schema("duplicate supplier ids in roster".into()));
        }

        for r in &self.ledger {
            if !ids.contains(r.supplier_id.as_str()) {
                return Err(DashError::Schema(format!(
                    "ledger record references unknown supplier {}",
                    r.supplier_id
                )));
            }
            if r.units_delivered > r.units_ordered {
                return Err(DashError::Schema(format!(
                    "{} {}: delivered {} exceeds ordered {}",
                    r.supplier_id, r.month, r.units_delivered, r.units_ordered
                )));
            }
            let bounds = [
                ("quality_score", r.quality_score, 60.0, 100.0),
                ("on_time_delivery_rate", r.on_time_delivery_rate, 60.0, 100.0),
                ("first_pass_yield", r.first_pass_yield, 80.0, 100.0),
                ("invoice_accuracy_rate", r.invoice_accuracy_rate, 90.0, 100.0),
                ("sustainability_score", r.sustainability_score, 1.0, 10.0),
                ("innovation_score", r.innovation_score, 1.0, 10.0),
                ("financial_stability_score", r.financial_stability_score, 1.0, 10.0),
                ("capacity_utilization", r.capacity_utilization, 40.0, 100.0),
                ("otif_rate", r.otif_rate, 0.0, 100.0),
            ];
            for (field, value, lo, hi) in bounds {
                if !(lo..=hi).contains(&value) {
                    return Err(DashError::Schema(format!(
                        "{} {}: {} = {} outside [{}, {}]",
                        r.supplier_id, r.month, field, value, lo, hi
                    )));
                }
            }
            if r.defect_rate_ppm < 0.0 || r.communication_response_hours < 0.5 || r.lead_time_days < 1 {
                return Err(DashError::Schema(format!(
                    "{} {}: negative rate or sub-minimum lead/response time",
                    r.supplier_id, r.month
                )));
            }
        }
        Ok(())
    }
}

pub struct DataGenerator {
    pub months: usize,
    pub as_of: NaiveDate,
}

impl DataGenerator {
    pub fn new(months: usize, as_of: NaiveDate) -> Self {
        DataGenerator { months, as_of }
    }

    /// Generate the roster and ledger and validate them.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset> {
        let suppliers = supplier_roster();
        let ledger = self.generate_ledger(&suppliers, rng)?;
        let dataset = Dataset { suppliers, ledger };
        dataset.validate()?;
        log::debug!(
            "generated {} suppliers, {} ledger records ({} months as of {})",
            dataset.suppliers.len(),
            dataset.ledger.len(),
            self.months,
            self.as_of
        );
        Ok(dataset)
    }

    /// Date of the ledger month `month_offset` steps before `as_of`.
    pub fn month_date(&self, month_offset: usize) -> Result<NaiveDate> {
        let out_of_range = || {
            DashError::Config(format!(
                "ledger month {} before {} is outside the supported date range",
                month_offset, self.as_of
            ))
        };
        let days = i64::try_from(month_offset)
            .ok()
            .and_then(|k| k.checked_mul(DAYS_PER_MONTH))
            .and_then(Duration::try_days)
            .ok_or_else(out_of_range)?;
        self.as_of.checked_sub_signed(days).ok_or_else(out_of_range)
    }

    /// Monthly ledger, newest month first within each supplier.
    pub fn generate_ledger<R: Rng + ?Sized>(
        &self,
        suppliers: &[Supplier],
        rng: &mut R,
    ) -> Result<Vec<PerformanceRecord>> {
        let mut records = Vec::new();

        for supplier in suppliers {
            let tier_multiplier = supplier.tier.multiplier();
            let reliability = country_reliability(&supplier.country);
            let base_quality = base_quality_score(supplier.tier, &supplier.country);
            let base_delivery = base_delivery_score(supplier.tier, &supplier.country);
            let base_cost_competitiveness = 0.7 + 0.6 * rng.gen::<f64>();

            for month_offset in 0..self.months {
                let k = month_offset as f64;
                let date = self.month_date(month_offset)?;
                let seasonal = 1.0 + 0.1 * (2.0 * PI * k / 12.0).sin();
                let trend = 1.0 + k * 0.002;

                let quality = (base_quality + normal(rng, 0.0, 4.0) * seasonal).clamp(60.0, 100.0);
                let on_time = (base_delivery + normal(rng, 0.0, 6.0) * seasonal).clamp(60.0, 100.0);

                let base_volume = supplier.annual_volume_usd / 12.0;
                let variation = normal(rng, 1.0, 0.15) * seasonal * trend;
                let monthly_volume = (base_volume * variation).max(0.0);

                let units_ordered = (monthly_volume / rng.gen_range(20.0..80.0)).floor() as u64;
                let units_delivered = (units_ordered as f64 * (on_time / 100.0)).floor() as u64;

                let unit_cost = rng.gen_range(25.0..120.0) * base_cost_competitiveness;
                let lead_time = normal(rng, 12.0, 5.0).floor().max(1.0) as u32;
                let defect_ppm = exponential(rng, 150.0).max(0.0);
                let first_pass_yield = (quality + normal(rng, 0.0, 3.0)).clamp(80.0, 100.0);
                let response_hours = exponential(rng, 4.0).max(0.5);
                let invoice_accuracy = (96.0 + normal(rng, 0.0, 2.0)).clamp(90.0, 100.0);
                let sustainability = (5.0 + reliability + normal(rng, 0.0, 1.0)).clamp(1.0, 10.0);
                let innovation = (tier_multiplier * 7.0 + normal(rng, 0.0, 1.5)).clamp(1.0, 10.0);
                let financial = (6.0 + reliability + normal(rng, 0.0, 1.0)).clamp(1.0, 10.0);
                let capacity = (75.0 + normal(rng, 0.0, 15.0)).clamp(40.0, 100.0);

                records.push(PerformanceRecord {
                    supplier_id: supplier.id.clone(),
                    month: date.format("%Y-%m").to_string(),
                    date,
                    units_ordered,
                    units_delivered,
                    on_time_delivery_rate: on_time,
                    quality_score: quality,
                    unit_cost_usd: unit_cost,
                    lead_time_days: lead_time,
                    defect_rate_ppm: defect_ppm,
                    first_pass_yield,
                    communication_response_hours: response_hours,
                    invoice_accuracy_rate: invoice_accuracy,
                    sustainability_score: sustainability,
                    innovation_score: innovation,
                    financial_stability_score: financial,
                    capacity_utilization: capacity,
                    total_cost_usd: units_delivered as f64 * unit_cost,
                    otif_rate: on_time * (quality / 100.0),
                });
            }
        }

        Ok(records)
    }
}

fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + sigma * z
}

fn exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    let e: f64 = rng.sample(Exp1);
    mean * e
}
