//! Fixed dark palette and colour helpers shared by charts and tables.

pub const PRIMARY: &str = "#60a5fa";
pub const SECONDARY: &str = "#c084fc";
pub const ACCENT: &str = "#7dd3fc";
pub const SUCCESS: &str = "#4ade80";
pub const WARNING: &str = "#fbbf24";
pub const DANGER: &str = "#f87171";
pub const BACKGROUND: &str = "#0f172a";
pub const SURFACE: &str = "#1e293b";
pub const TEXT: &str = "#f8fafc";
pub const MUTED: &str = "#94a3b8";
pub const BORDER: &str = "#334155";
pub const GRID: &str = "rgba(148, 163, 184, 0.1)";
pub const HIGHLIGHT: &str = "#38bdf8";

pub const CHART_COLORS: [&str; 6] = [PRIMARY, SUCCESS, WARNING, DANGER, SECONDARY, HIGHLIGHT];

/// Colourblind-friendly base palette.
const BASE_PALETTE: [&str; 10] = [
    "#4ade80", "#60a5fa", "#f87171", "#fbbf24", "#c084fc", "#34d399", "#f472b6", "#fb923c",
    "#94a3b8", "#818cf8",
];

const RD_YL_GN: [(f64, &str); 11] = [
    (0.0, "#a50026"),
    (0.1, "#d73027"),
    (0.2, "#f46d43"),
    (0.3, "#fdae61"),
    (0.4, "#fee08b"),
    (0.5, "#ffffbf"),
    (0.6, "#d9ef8b"),
    (0.7, "#a6d96a"),
    (0.8, "#66bd63"),
    (0.9, "#1a9850"),
    (1.0, "#006837"),
];

pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}

fn to_hex(r: f64, g: f64, b: f64) -> String {
    let c = |v: f64| v.clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", c(r), c(g), c(b))
}

/// Linear blend of two hex colours; `t` = 0 gives `from`.
pub fn mix(from: &str, to: &str, t: f64) -> String {
    let (Some(a), Some(b)) = (parse_hex(from), parse_hex(to)) else {
        return from.to_string();
    };
    let lerp = |x: u8, y: u8| x as f64 + t * (y as f64 - x as f64);
    to_hex(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// `n` distinct colours. Beyond the ten base colours, neighbours are
/// interpolated.
pub fn generate_color_palette(n: usize) -> Vec<String> {
    if n <= BASE_PALETTE.len() {
        return BASE_PALETTE[..n].iter().map(|c| c.to_string()).collect();
    }
    let step = BASE_PALETTE.len() as f64 / n as f64;
    (0..n)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos.floor() as usize;
            let t = pos.fract();
            mix(
                BASE_PALETTE[idx % BASE_PALETTE.len()],
                BASE_PALETTE[(idx + 1) % BASE_PALETTE.len()],
                t,
            )
        })
        .collect()
}

/// Traffic-light colour for a supply risk score.
pub fn risk_color(score: f64) -> &'static str {
    if score < 30.0 {
        SUCCESS
    } else if score < 60.0 {
        WARNING
    } else {
        DANGER
    }
}

/// Red-yellow-green gradient over `[vmin, vmax]`; values are clamped.
pub fn red_yellow_green(value: f64, vmin: f64, vmax: f64) -> String {
    let span = vmax - vmin;
    let t = if span > 0.0 {
        ((value - vmin) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    for pair in RD_YL_GN.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            return mix(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    RD_YL_GN[RD_YL_GN.len() - 1].1.to_string()
}

/// Reversed gradient: high values are red.
pub fn red_yellow_green_reversed(value: f64, vmin: f64, vmax: f64) -> String {
    red_yellow_green(vmax - (value - vmin), vmin, vmax)
}

/// Black or white text, whichever reads better on `background`.
pub fn contrast_text(background: &str) -> &'static str {
    match parse_hex(background) {
        Some((r, g, b)) => {
            let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            if luminance > 150.0 {
                "#000000"
            } else {
                "#f1f1f1"
            }
        }
        None => TEXT,
    }
}
