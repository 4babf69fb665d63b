//! Renderable figure specifications.
//!
//! A [`Figure`] serializes to the JSON shape plotly.js consumes
//! (`{"data": [...], "layout": {...}}`), so the HTML page can hand it to
//! `Plotly.newPlot` unchanged.

use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(v) => v.len(),
            Self::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
    /// Numeric values mapped through the marker's colour scale.
    Scale(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Fixed(f64),
    PerPoint(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    Named(&'static str),
    Stops(Vec<(f64, String)>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Position {
    At(f64),
    Label(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl Font {
    pub fn color(color: &str) -> Self {
        Font {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn sized(size: f64, color: &str) -> Self {
        Font {
            size: Some(size),
            color: Some(color.to_string()),
            family: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<&'static str>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorBar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticksuffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    /// Slice colours, pie traces only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub name: String,
    pub x: Values,
    pub y: Values,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Bar {
    pub fn new(name: impl Into<String>, x: Values, y: Values) -> Self {
        Bar {
            name: name.into(),
            x,
            y,
            orientation: None,
            marker: Marker::default(),
            text: None,
            textposition: None,
            hovertemplate: None,
            customdata: None,
            width: None,
            xaxis: None,
            yaxis: None,
        }
    }

    /// Horizontal bars: categories on y, values on x.
    pub fn horizontal(name: impl Into<String>, labels: Vec<String>, values: Vec<f64>) -> Self {
        let mut bar = Bar::new(name, Values::Numbers(values), Values::Labels(labels));
        bar.orientation = Some("h");
        bar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Scatter {
    pub fn markers(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Scatter {
            name: name.into(),
            mode: "markers",
            x,
            y,
            marker: Marker::default(),
            text: None,
            textposition: None,
            textfont: None,
            hovertemplate: None,
            customdata: None,
            xaxis: None,
            yaxis: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pie {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(Bar),
    Scatter(Scatter),
    Pie(Pie),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Self::Bar(b) => &b.name,
            Self::Scatter(s) => &s.name,
            Self::Pie(p) => &p.name,
        }
    }

    /// Number of plotted points or slices.
    pub fn len(&self) -> usize {
        match self {
            Self::Bar(b) => b.x.len(),
            Self::Scatter(s) => s.x.len(),
            Self::Pie(p) => p.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automargin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub l: u32,
    pub r: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Legend {
    /// Horizontal legend centred below the plot area.
    pub fn bottom(y: f64) -> Self {
        Legend {
            orientation: Some("h"),
            x: Some(0.5),
            y: Some(y),
            xanchor: Some("center"),
            yanchor: Some("bottom"),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub fillcolor: String,
    pub opacity: f64,
    pub line: Line,
    pub layer: &'static str,
}

impl Shape {
    pub fn rect(x0: f64, x1: f64, y0: f64, y1: f64, fill: &str, opacity: f64) -> Self {
        Shape {
            kind: "rect",
            x0,
            x1,
            y0,
            y1,
            fillcolor: fill.to_string(),
            opacity,
            line: Line {
                color: None,
                width: Some(0.0),
            },
            layer: "below",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: Position,
    pub y: f64,
    pub text: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yshift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Annotation {
    pub fn text_at(x: Position, y: f64, text: impl Into<String>) -> Self {
        Annotation {
            x,
            y,
            text: text.into(),
            showarrow: false,
            xref: None,
            yref: None,
            xanchor: None,
            yanchor: None,
            yshift: None,
            font: None,
        }
    }

    /// Annotation positioned in paper coordinates (0-1 across the figure).
    pub fn paper(x: f64, y: f64, text: impl Into<String>) -> Self {
        let mut a = Annotation::text_at(Position::At(x), y, text);
        a.xref = Some("paper");
        a.yref = Some("paper");
        a
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// `xaxis`, `yaxis`, `xaxis2`, ... keyed the way plotly expects.
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
}

impl Layout {
    pub fn axis_mut(&mut self, key: &str) -> &mut Axis {
        self.axes.entry(key.to_string()).or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Grid layout of subplots sharing one figure, row 1 at the top.
#[derive(Debug, Clone, Copy)]
pub struct SubplotGrid {
    pub rows: usize,
    pub cols: usize,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl SubplotGrid {
    pub fn new(rows: usize, cols: usize, horizontal_spacing: f64, vertical_spacing: f64) -> Self {
        SubplotGrid {
            rows,
            cols,
            horizontal_spacing,
            vertical_spacing,
        }
    }

    fn cell_width(&self) -> f64 {
        (1.0 - self.horizontal_spacing * (self.cols as f64 - 1.0)) / self.cols as f64
    }

    fn cell_height(&self) -> f64 {
        (1.0 - self.vertical_spacing * (self.rows as f64 - 1.0)) / self.rows as f64
    }

    /// Paper-coordinate domain of a 1-based cell.
    pub fn domain(&self, row: usize, col: usize) -> Domain {
        let w = self.cell_width();
        let h = self.cell_height();
        let x0 = (col - 1) as f64 * (w + self.horizontal_spacing);
        let y1 = 1.0 - (row - 1) as f64 * (h + self.vertical_spacing);
        Domain {
            x: [x0, (x0 + w).min(1.0)],
            y: [(y1 - h).max(0.0), y1],
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.cols + col
    }

    /// Trace references for a cell, e.g. `("x2", "y2")`.
    pub fn axis_refs(&self, row: usize, col: usize) -> (String, String) {
        match self.index(row, col) {
            1 => ("x".to_string(), "y".to_string()),
            n => (format!("x{}", n), format!("y{}", n)),
        }
    }

    /// Layout keys for a cell, e.g. `("xaxis2", "yaxis2")`.
    pub fn axis_keys(&self, row: usize, col: usize) -> (String, String) {
        match self.index(row, col) {
            1 => ("xaxis".to_string(), "yaxis".to_string()),
            n => (format!("xaxis{}", n), format!("yaxis{}", n)),
        }
    }

    /// Create axes for every cell not listed in `pie_cells` and add the
    /// subplot titles (row-major order) as paper annotations.
    pub fn apply(&self, layout: &mut Layout, titles: &[&str], pie_cells: &[(usize, usize)]) {
        for row in 1..=self.rows {
            for col in 1..=self.cols {
                let domain = self.domain(row, col);
                if !pie_cells.contains(&(row, col)) {
                    let (xref, yref) = self.axis_refs(row, col);
                    let (xkey, ykey) = self.axis_keys(row, col);
                    let x_axis = layout.axis_mut(&xkey);
                    x_axis.domain = Some(domain.x);
                    x_axis.anchor = Some(yref);
                    let y_axis = layout.axis_mut(&ykey);
                    y_axis.domain = Some(domain.y);
                    y_axis.anchor = Some(xref);
                }

                if let Some(title) = titles.get(self.index(row, col) - 1) {
                    let mut a = Annotation::paper((domain.x[0] + domain.x[1]) / 2.0, domain.y[1], *title);
                    a.xanchor = Some("center");
                    a.yanchor = Some("bottom");
                    layout.annotations.push(a);
                }
            }
        }
    }

    /// Bind a trace to a cell: axes for cartesian traces, domain for pies.
    pub fn place(&self, trace: Trace, row: usize, col: usize) -> Trace {
        let (xref, yref) = self.axis_refs(row, col);
        match trace {
            Trace::Bar(mut b) => {
                b.xaxis = Some(xref);
                b.yaxis = Some(yref);
                Trace::Bar(b)
            }
            Trace::Scatter(mut s) => {
                s.xaxis = Some(xref);
                s.yaxis = Some(yref);
                Trace::Scatter(s)
            }
            Trace::Pie(mut p) => {
                p.domain = Some(self.domain(row, col));
                Trace::Pie(p)
            }
        }
    }

    pub fn set_axis_titles(&self, layout: &mut Layout, row: usize, col: usize, x: &str, y: &str) {
        let (xkey, ykey) = self.axis_keys(row, col);
        layout.axis_mut(&xkey).title = Some(Title::new(x));
        layout.axis_mut(&ykey).title = Some(Title::new(y));
    }
}
