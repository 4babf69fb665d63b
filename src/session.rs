//! Per-session dashboard state.
//!
//! A [`Session`] owns the analyzer and the viewer's filter selections for
//! as long as the session lasts; nothing is shared between sessions.

use crate::analyzer::Analyzer;
use crate::charts::{
    overview_dashboard, performance_dashboard, risk_matrix, scorecard_dashboard, volume_chart,
};
use crate::config::DashboardConfig;
use crate::dashboard::{ChartPanel, KpiCard, Page};
use crate::error::{DashError, Result};
use crate::model::SupplierView;
use crate::table::{format_currency, styled_table, StyledTable};
use crate::view::{aggregate_by_supplier, category_volumes, filter_year, search, KpiRow};
use std::fmt;
use std::str::FromStr;

/// Years offered by the period selector before the evaluation year.
pub const YEAR_LOOKBACK: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    SupplierAnalytics,
    SupplyChainPerformance,
    RiskManagement,
}

impl DashboardKind {
    pub fn all() -> [DashboardKind; 3] {
        [
            Self::SupplierAnalytics,
            Self::SupplyChainPerformance,
            Self::RiskManagement,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SupplierAnalytics => "Supplier Analytics",
            Self::SupplyChainPerformance => "Supply Chain Performance",
            Self::RiskManagement => "Risk Management",
        }
    }

    /// File-name friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::SupplierAnalytics => "supplier-analytics",
            Self::SupplyChainPerformance => "supply-chain-performance",
            Self::RiskManagement => "risk-management",
        }
    }
}

impl fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DashboardKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(&['_', ' '][..], "-");
        Self::all()
            .into_iter()
            .find(|k| k.slug() == key)
            .ok_or_else(|| {
                format!(
                    "unknown dashboard '{}', expected one of: supplier-analytics, supply-chain-performance, risk-management",
                    s
                )
            })
    }
}

pub struct Session {
    analyzer: Analyzer,
    year: Option<i32>,
    search: String,
}

impl Session {
    /// Start a session: data is generated and scored up front, and the
    /// most recent year is selected.
    pub fn start(config: DashboardConfig) -> Result<Self> {
        Self::with_analyzer(Analyzer::new(config))
    }

    pub fn with_analyzer(mut analyzer: Analyzer) -> Result<Self> {
        analyzer.calculate_metrics()?;
        let year = Some(analyzer.evaluation_year());
        log::info!("session started (year {})", analyzer.evaluation_year());
        Ok(Session {
            analyzer,
            year,
            search: String::new(),
        })
    }

    pub fn analyzer(&mut self) -> &mut Analyzer {
        &mut self.analyzer
    }

    pub fn config(&self) -> &DashboardConfig {
        self.analyzer.config()
    }

    /// Selectable years, oldest first.
    pub fn year_options(&self) -> Vec<i32> {
        let latest = self.analyzer.evaluation_year();
        (latest - YEAR_LOOKBACK..=latest).collect()
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
    }

    /// Select a year from [`Session::year_options`], or `None` for all years.
    pub fn select_year(&mut self, year: Option<i32>) -> Result<()> {
        if let Some(y) = year {
            if !self.year_options().contains(&y) {
                return Err(DashError::InvalidArgument(format!(
                    "year {} is not one of {:?}",
                    y,
                    self.year_options()
                )));
            }
        }
        self.year = year;
        Ok(())
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Year-filtered rows grouped per supplier, before search.
    pub fn view(&mut self) -> Result<Vec<SupplierView>> {
        let rows = self.analyzer.supply_chain_data()?;
        let filtered = filter_year(&rows, self.year);
        Ok(aggregate_by_supplier(&filtered))
    }

    /// [`Session::view`] narrowed by the search query.
    pub fn searched_view(&mut self) -> Result<Vec<SupplierView>> {
        Ok(search(&self.view()?, &self.search))
    }

    pub fn table(&mut self) -> Result<StyledTable> {
        styled_table(&self.searched_view()?)
    }

    pub fn kpis(&mut self) -> Result<Vec<KpiCard>> {
        let row = KpiRow::from_view(&self.view()?);
        let deltas = self.analyzer.kpi_deltas();
        Ok(vec![
            KpiCard {
                label: "Total Suppliers",
                value: row.total_suppliers.to_string(),
                delta: Some(deltas.supplier_growth),
                inverse: false,
            },
            KpiCard {
                label: "Total Spend",
                value: format_currency(row.total_spend_usd.round())
                    .trim_end_matches(".00")
                    .to_string(),
                delta: Some(deltas.volume_growth),
                inverse: false,
            },
            KpiCard {
                label: "Avg. Performance",
                value: row
                    .avg_performance
                    .map_or_else(|| "n/a".to_string(), |p| format!("{:.1}%", p)),
                delta: Some(deltas.performance_change),
                inverse: false,
            },
            KpiCard {
                label: "Avg. Risk Score",
                value: row
                    .avg_risk
                    .map_or_else(|| "n/a".to_string(), |r| format!("{:.1}", r)),
                delta: Some(deltas.risk_change),
                inverse: true,
            },
        ])
    }

    /// Build the page for one dashboard under the current filters.
    pub fn render(&mut self, kind: DashboardKind) -> Result<Page> {
        let view = self.view()?;
        let searched = search(&view, &self.search);

        let mut overview = vec![ChartPanel::new(
            "Supply Chain Overview",
            "Performance, volume and risk across categories and suppliers",
            overview_dashboard(&view)?,
        )];
        if kind == DashboardKind::SupplyChainPerformance {
            overview.push(ChartPanel::new(
                "Category Performance",
                "Average performance and supplier count per category",
                performance_dashboard(&view)?,
            ));
        }
        overview.push(ChartPanel::new(
            "Volume Distribution by Category",
            "Distribution of total volume across different categories",
            volume_chart(&category_volumes(&view))?,
        ));

        let mut analysis = vec![ChartPanel::new(
            "Risk Assessment",
            "Performance vs Risk analysis of suppliers",
            risk_matrix(&searched)?,
        )];
        if kind == DashboardKind::RiskManagement {
            let cards = self.analyzer.scorecards(self.year)?;
            analysis.push(ChartPanel::new(
                "Supplier Scorecard",
                "Cost, quality, delivery and strategic value per supplier",
                scorecard_dashboard(&cards)?,
            ));
        }

        let kpis = if kind == DashboardKind::SupplierAnalytics {
            self.kpis()?
        } else {
            Vec::new()
        };

        log::debug!(
            "rendered {} ({} suppliers, {} after search)",
            kind,
            view.len(),
            searched.len()
        );

        Ok(Page {
            dashboard: kind.name().to_string(),
            year: self.year,
            search: self.search.clone(),
            kpis,
            overview,
            analysis,
            table: styled_table(&searched)?,
            insights: self.analyzer.strategic_insights()?,
            export_href: Some(self.export_file_name()),
        })
    }

    /// Workbook bytes for the download button.
    pub fn export(&mut self) -> Result<Vec<u8>> {
        self.analyzer.export_report()
    }

    pub fn export_file_name(&self) -> String {
        let year = self.year.unwrap_or_else(|| self.analyzer.evaluation_year());
        format!("supply_chain_report_{}.xlsx", year)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::info!("session ended");
    }
}
