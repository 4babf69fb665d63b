use crate::model::{parse_certifications, Supplier, Tier};
use chrono::NaiveDate;

/// Number of suppliers in the synthetic portfolio.
pub const ROSTER_SIZE: usize = 25;

struct RosterEntry {
    name: &'static str,
    country: &'static str,
    category: &'static str,
    tier: Tier,
    contract_start: (i32, u32, u32),
    annual_volume_usd: f64,
    certifications: &'static str,
}

const fn entry(
    name: &'static str,
    country: &'static str,
    category: &'static str,
    tier: Tier,
    contract_start: (i32, u32, u32),
    annual_volume_usd: f64,
    certifications: &'static str,
) -> RosterEntry {
    RosterEntry {
        name,
        country,
        category,
        tier,
        contract_start,
        annual_volume_usd,
        certifications,
    }
}

use Tier::{Tier1, Tier2, Tier3};

const ROSTER: [RosterEntry; ROSTER_SIZE] = [
    entry("TechNova Electronics", "Germany", "Electronics", Tier1, (2020, 1, 15), 5_500_000.0, "ISO9001+AS9100"),
    entry("GlobalMech Industries", "China", "Mechanical Parts", Tier2, (2019, 6, 1), 3_200_000.0, "ISO9001"),
    entry("PrecisionCast Ltd", "USA", "Castings & Forgings", Tier1, (2021, 3, 10), 4_800_000.0, "ISO9001+ISO14001"),
    entry("RapidLogistics GmbH", "Germany", "Logistics Services", Tier3, (2022, 11, 20), 1_200_000.0, "ISO9001"),
    entry("EcoSustain Materials", "Netherlands", "Raw Materials", Tier2, (2020, 5, 1), 6_200_000.0, "ISO14001+OHSAS18001"),
    entry("QualityPrime Manufacturing", "Japan", "Assemblies", Tier1, (2019, 9, 15), 4_500_000.0, "ISO9001+AS9100"),
    entry("InnovateTech Solutions", "South Korea", "Electronics", Tier1, (2021, 2, 1), 3_800_000.0, "ISO9001+ISO27001"),
    entry("MetalWorks International", "Italy", "Metal Components", Tier2, (2020, 12, 1), 2_900_000.0, "ISO9001+ISO14001"),
    entry("ChemSupply Corp", "India", "Chemical Supplies", Tier2, (2021, 4, 15), 2_100_000.0, "ISO9001"),
    entry("ComponentsPlus Ltd", "UK", "Electronic Components", Tier2, (2019, 8, 1), 3_400_000.0, "ISO9001"),
    entry("FastTrack Logistics", "Mexico", "Logistics Services", Tier3, (2022, 1, 10), 800_000.0, "None"),
    entry("ReliableParts Co", "Turkey", "Mechanical Parts", Tier2, (2020, 7, 15), 2_800_000.0, "ISO9001"),
    entry("AdvancedMaterials Inc", "Canada", "Advanced Materials", Tier1, (2021, 6, 1), 5_100_000.0, "ISO9001+AS9100+ISO14001"),
    entry("SmartComponents SA", "France", "Smart Components", Tier1, (2019, 11, 20), 4_200_000.0, "ISO9001+ISO27001"),
    entry("FlexiManufacturing", "Brazil", "Manufacturing Services", Tier2, (2022, 3, 15), 1_900_000.0, "ISO9001"),
    entry("TechAssembly Group", "Vietnam", "Assembly Services", Tier2, (2020, 9, 1), 2_500_000.0, "ISO9001"),
    entry("PremiumParts Ltd", "Poland", "Precision Parts", Tier1, (2021, 5, 20), 4_700_000.0, "ISO9001+AS9100"),
    entry("IndustrialSupply Co", "Czech Republic", "Industrial Supplies", Tier2, (2020, 2, 28), 1_800_000.0, "ISO9001"),
    entry("NextGen Components", "Malaysia", "High-Tech Components", Tier1, (2019, 12, 15), 5_800_000.0, "ISO9001+AS9100+ISO14001"),
    entry("ProManufacturing Solutions", "Thailand", "Manufacturing Solutions", Tier1, (2021, 8, 10), 4_100_000.0, "ISO9001+AS9100"),
    entry("EliteSuppliers Inc", "Taiwan", "Premium Components", Tier1, (2020, 10, 5), 6_800_000.0, "ISO9001+AS9100"),
    entry("MegaCorp Industries", "Singapore", "Heavy Industry", Tier2, (2019, 4, 12), 7_200_000.0, "ISO9001+ISO14001"),
    entry("SpecialtyMaterials Ltd", "Spain", "Specialty Materials", Tier2, (2022, 2, 28), 2_300_000.0, "ISO9001+ISO14001"),
    entry("TechVision Components", "Belgium", "Tech Components", Tier1, (2021, 1, 18), 3_900_000.0, "ISO9001+AS9100"),
    entry("GlobalTech Partners", "Switzerland", "Technology Solutions", Tier1, (2020, 6, 22), 5_600_000.0, "ISO9001+AS9100+ISO27001"),
];

/// Build the fixed 25-supplier portfolio, ids `SUP001`..`SUP025`.
pub fn supplier_roster() -> Vec<Supplier> {
    ROSTER
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let (y, m, d) = e.contract_start;
            Supplier {
                id: format!("SUP{:03}", i + 1),
                name: e.name.to_string(),
                country: e.country.to_string(),
                category: e.category.to_string(),
                tier: e.tier,
                contract_start: NaiveDate::from_ymd_opt(y, m, d)
                    .expect("roster contract dates are valid calendar dates"),
                annual_volume_usd: e.annual_volume_usd,
                certifications: parse_certifications(e.certifications),
            }
        })
        .collect()
}
