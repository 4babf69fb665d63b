use crate::analyzer::StrategicInsights;
use crate::error::Result;
use crate::figure::Figure;
use crate::palette;
use crate::table::StyledTable;
use std::fmt::Write as _;
use std::path::Path;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

// ═══════════════════════════════════════════════════════════════════════
// Page content
// ═══════════════════════════════════════════════════════════════════════

/// One headline number with its simulated change.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub delta: Option<f64>,
    /// Risk-style metric: a negative delta is shown as good news.
    pub inverse: bool,
}

#[derive(Debug, Clone)]
pub struct ChartPanel {
    pub title: String,
    pub caption: String,
    pub figure: Figure,
}

impl ChartPanel {
    pub fn new(title: impl Into<String>, caption: impl Into<String>, figure: Figure) -> Self {
        ChartPanel {
            title: title.into(),
            caption: caption.into(),
            figure,
        }
    }
}

/// Everything one dashboard page shows.
#[derive(Debug, Clone)]
pub struct Page {
    pub dashboard: String,
    pub year: Option<i32>,
    pub search: String,
    pub kpis: Vec<KpiCard>,
    /// Charts on the Performance Overview tab.
    pub overview: Vec<ChartPanel>,
    /// Charts on the Detailed Analysis tab.
    pub analysis: Vec<ChartPanel>,
    pub table: StyledTable,
    pub insights: StrategicInsights,
    pub export_href: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// HTML helpers
// ═══════════════════════════════════════════════════════════════════════

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn kpis_html(kpis: &[KpiCard]) -> String {
    if kpis.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"metrics-grid\">\n");
    for k in kpis {
        let delta = match k.delta {
            Some(d) => {
                let good = if k.inverse { d <= 0.0 } else { d >= 0.0 };
                let arrow = if d >= 0.0 { "&#9650;" } else { "&#9660;" };
                format!(
                    "<span class=\"delta {}\">{} {:.1}</span>",
                    if good { "up" } else { "down" },
                    arrow,
                    d
                )
            }
            None => String::new(),
        };
        let _ = writeln!(
            html,
            " <div class=\"metric\"><span class=\"label\">{}</span><span class=\"value\">{}</span>{}</div>",
            escape_html(k.label),
            escape_html(&k.value),
            delta
        );
    }
    html.push_str("</div>\n");
    html
}

fn table_html(table: &StyledTable) -> String {
    let mut html = String::from("<table class=\"data\">\n<tr>");
    for h in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape_html(h));
    }
    html.push_str("</tr>\n");

    if table.is_empty() {
        let _ = writeln!(
            html,
            "<tr><td colspan=\"{}\" class=\"empty\">No suppliers match the current filters</td></tr>",
            table.headers.len()
        );
    }
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let mut style = String::new();
            if let Some(bg) = &cell.background {
                let _ = write!(style, "background:{};", bg);
            }
            if let Some(color) = cell.color {
                let _ = write!(style, "color:{};", color);
            }
            if style.is_empty() {
                let _ = write!(html, "<td>{}</td>", escape_html(&cell.text));
            } else {
                let _ = write!(html, "<td style=\"{}\">{}</td>", style, escape_html(&cell.text));
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn insights_html(insights: &StrategicInsights) -> String {
    let mut summary = String::from("<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
    for (metric, value) in &insights.executive_summary {
        let _ = writeln!(
            summary,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(metric),
            escape_html(value)
        );
    }
    summary.push_str("</table>\n");

    let mut recommendations = String::from("<table>\n<tr><th>Area</th><th>Action</th></tr>\n");
    for r in &insights.recommendations {
        let _ = writeln!(
            recommendations,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(r.area),
            escape_html(r.action)
        );
    }
    recommendations.push_str("</table>\n");

    format!(
        r#"<div class="chart-row">
 <section><h3>Executive Summary</h3><p class="caption">High-level performance overview</p>
{summary}</section>
 <section><h3>Key Recommendations</h3><p class="caption">Strategic action items</p>
{recommendations}</section>
</div>
"#
    )
}

/// Chart containers plus the script that draws them. `prefix` keeps
/// element ids unique across tabs.
fn panels_html(panels: &[ChartPanel], prefix: &str) -> Result<(String, String)> {
    let mut html = String::new();
    let mut script = String::new();
    for (i, p) in panels.iter().enumerate() {
        let id = format!("{}-{}", prefix, i + 1);
        let _ = writeln!(
            html,
            "<section class=\"chart-box\"><h3>{}</h3><p class=\"caption\">{}</p><div id=\"{}\" class=\"plot\"></div></section>",
            escape_html(&p.title),
            escape_html(&p.caption),
            id
        );
        // `</` would close the surrounding script element
        let json = p.figure.to_json()?.replace("</", "<\\/");
        let _ = writeln!(
            script,
            "draw('{}', {});",
            id, json
        );
    }
    Ok((html, script))
}

// ═══════════════════════════════════════════════════════════════════════
// Page generation
// ═══════════════════════════════════════════════════════════════════════

impl Page {
    pub fn render(&self) -> Result<String> {
        let (overview_html, overview_js) = panels_html(&self.overview, "overview")?;
        let (analysis_html, analysis_js) = panels_html(&self.analysis, "analysis")?;

        let period = match self.year {
            Some(y) => format!("Time period: {}", y),
            None => "Time period: all years".to_string(),
        };
        let search = if self.search.trim().is_empty() {
            String::new()
        } else {
            format!(" &middot; Search: &ldquo;{}&rdquo;", escape_html(self.search.trim()))
        };
        let export = match &self.export_href {
            Some(href) => format!(
                "<a class=\"export\" href=\"{}\" download>Export Dashboard</a>",
                escape_html(href)
            ),
            None => String::new(),
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Supply Chain Analytics: {title}</title>
<script src="{plotly}"></script>
<style>
:root{{--primary:{primary};--accent:{accent};--bg:{bg};--surface:{surface};--text:{text};--muted:{muted};--border:{border};--success:{success};--danger:{danger}}}
*{{margin:0;padding:0;box-sizing:border-box}}
body{{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:var(--bg);color:var(--text)}}
header{{padding:32px;display:flex;align-items:center;justify-content:space-between;gap:20px;border-bottom:1px solid var(--border)}}
header h1{{font-size:2em;font-weight:700;background:linear-gradient(135deg,var(--primary),var(--accent));-webkit-background-clip:text;-webkit-text-fill-color:transparent}}
header p{{color:var(--muted);margin-top:8px}}
.export{{background:var(--primary);color:var(--bg);padding:10px 18px;border-radius:6px;font-weight:600;text-decoration:none}}
main{{max-width:1400px;margin:0 auto;padding:24px}}
section{{background:var(--surface);border:1px solid var(--border);border-radius:8px;padding:24px;margin-bottom:20px}}
section h3{{font-size:1.15em;margin-bottom:4px}}
.caption{{color:var(--muted);font-size:0.9em;margin-bottom:12px}}
.metrics-grid{{display:grid;grid-template-columns:repeat(4,1fr);gap:12px;margin-bottom:24px}}
.metric{{background:var(--surface);border:1px solid var(--border);border-radius:8px;padding:16px}}
.metric .label{{display:block;font-size:0.8em;color:var(--muted);text-transform:uppercase;letter-spacing:0.5px}}
.metric .value{{display:block;font-size:1.6em;font-weight:600;margin-top:6px}}
.delta{{display:inline-block;margin-top:6px;font-size:0.85em}}
.delta.up{{color:var(--success)}}
.delta.down{{color:var(--danger)}}
.tabs{{display:flex;gap:8px;margin-bottom:20px;border-bottom:1px solid var(--border)}}
.tab{{background:none;border:none;color:var(--muted);padding:10px 16px;font-size:1em;cursor:pointer;border-bottom:2px solid transparent}}
.tab.active{{color:var(--text);border-bottom-color:var(--primary)}}
.panel{{display:none}}
.panel.active{{display:block}}
.chart-row{{display:grid;grid-template-columns:1fr 1fr;gap:20px}}
@media(max-width:900px){{.chart-row,.metrics-grid{{grid-template-columns:1fr}}}}
table{{width:100%;border-collapse:collapse;font-size:0.9em}}
th,td{{padding:8px 12px;text-align:left;border-bottom:1px solid var(--border)}}
th{{color:var(--muted);font-weight:600}}
td.empty{{color:var(--muted);text-align:center}}
footer{{text-align:center;padding:16px;color:var(--muted);font-size:0.8em}}
</style>
</head>
<body>
<header>
 <div>
  <h1>{title}</h1>
  <p>Comprehensive analytics and insights for your supply chain management</p>
  <p>{period}{search}</p>
 </div>
 {export}
</header>
<main>
{kpis}
<nav class="tabs">
 <button class="tab active" data-panel="overview">Performance Overview</button>
 <button class="tab" data-panel="analysis">Detailed Analysis</button>
 <button class="tab" data-panel="insights">Strategic Insights</button>
</nav>

<div id="overview" class="panel active">
{overview_html}
<section>
<h3>Detailed Supply Chain Data</h3>
<p class="caption">Comprehensive view of all supplier metrics</p>
{table}
</section>
</div>

<div id="analysis" class="panel">
{analysis_html}
</div>

<div id="insights" class="panel">
{insights}
</div>
</main>
<footer>Generated from synthetic supplier data</footer>
<script>
const plotConfig = {{displaylogo: false, responsive: true}};
function draw(id, fig) {{ Plotly.newPlot(id, fig.data, fig.layout, plotConfig); }}
{overview_js}
{analysis_js}
document.querySelectorAll('.tab').forEach(btn => btn.addEventListener('click', () => {{
  document.querySelectorAll('.tab').forEach(b => b.classList.toggle('active', b === btn));
  document.querySelectorAll('.panel').forEach(p => p.classList.toggle('active', p.id === btn.dataset.panel));
  document.querySelectorAll('#' + btn.dataset.panel + ' .plot').forEach(el => Plotly.Plots.resize(el));
}}));
</script>
</body>
</html>
"#,
            title = escape_html(&self.dashboard),
            plotly = PLOTLY_CDN,
            primary = palette::PRIMARY,
            accent = palette::ACCENT,
            bg = palette::BACKGROUND,
            surface = palette::SURFACE,
            text = palette::TEXT,
            muted = palette::MUTED,
            border = palette::BORDER,
            success = palette::SUCCESS,
            danger = palette::DANGER,
            kpis = kpis_html(&self.kpis),
            table = table_html(&self.table),
            insights = insights_html(&self.insights),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// File I/O
// ═══════════════════════════════════════════════════════════════════════

pub fn save_page(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
