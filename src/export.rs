use crate::analyzer::KeyMetrics;
use crate::error::Result;
use crate::model::Supplier;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub const SUPPLIER_SHEET: &str = "Supplier Data";
pub const METRICS_SHEET: &str = "Key Metrics";

pub const SUPPLIER_HEADERS: [&str; 8] = [
    "Supplier_ID",
    "Supplier_Name",
    "Country",
    "Category",
    "Supplier_Tier",
    "Contract_Start",
    "Annual_Volume_USD",
    "Certification_Level",
];

fn write_header(sheet: &mut Worksheet, headers: &[&str], bold: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
    }
    Ok(())
}

/// Workbook with the full roster and the headline metrics, as bytes.
pub fn build_workbook(suppliers: &[Supplier], metrics: &KeyMetrics) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUPPLIER_SHEET)?;
        write_header(sheet, &SUPPLIER_HEADERS, &bold)?;
        for (i, s) in suppliers.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &s.id)?;
            sheet.write_string(row, 1, &s.name)?;
            sheet.write_string(row, 2, &s.country)?;
            sheet.write_string(row, 3, &s.category)?;
            sheet.write_string(row, 4, s.tier.label())?;
            sheet.write_string(row, 5, s.contract_start.format("%Y-%m-%d").to_string())?;
            sheet.write_number(row, 6, s.annual_volume_usd)?;
            sheet.write_string(row, 7, s.certification_label())?;
        }
        sheet.autofit();
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(METRICS_SHEET)?;
        write_header(sheet, &["Metric", "Value"], &bold)?;
        let rows = [
            ("Active Suppliers", metrics.active_suppliers as f64),
            ("Total Volume (USD)", metrics.total_volume_usd),
            ("Performance Score", metrics.performance_score),
            ("High Risk Suppliers", metrics.high_risk_suppliers as f64),
        ];
        for (i, (label, value)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *label)?;
            sheet.write_number(row, 1, *value)?;
        }
        sheet.autofit();
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("built workbook: {} suppliers, {} bytes", suppliers.len(), bytes.len());
    Ok(bytes)
}
