//! Bar charts of a quote, rendered as standalone SVG.

use crate::domain::QuoteResult;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const BAR_COLOR: &str = "#87ceeb";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Cost,
    TransitTime,
    Emissions,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Cost, ChartKind::TransitTime, ChartKind::Emissions];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Cost => "Total Cost by Mode",
            Self::TransitTime => "Transit Time by Mode",
            Self::Emissions => "CO₂ Emissions by Mode",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Self::Cost => "Total Cost (USD)",
            Self::TransitTime => "Transit Time (Days)",
            Self::Emissions => "CO₂ Emissions (kg/km)",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Cost => "chart_cost.svg",
            Self::TransitTime => "chart_time.svg",
            Self::Emissions => "chart_emissions.svg",
        }
    }

    fn value(&self, result: &QuoteResult) -> f64 {
        match self {
            Self::Cost => result.total_cost,
            Self::TransitTime => result.transit_days(),
            Self::Emissions => result.co2_per_km(),
        }
    }

    /// One bar per result, labelled by mode, in result order.
    pub fn bars(&self, results: &[QuoteResult]) -> Vec<(String, f64)> {
        results
            .iter()
            .map(|result| (result.mode().to_string(), self.value(result)))
            .collect()
    }

    pub fn render(&self, results: &[QuoteResult]) -> String {
        bar_chart_svg(self.title(), self.y_label(), &self.bars(results))
    }
}

/// Render a simple vertical bar chart.
pub fn bar_chart_svg(title: &str, y_label: &str, bars: &[(String, f64)]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max = bars
        .iter()
        .map(|(_, value)| *value)
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { plot_h / max } else { 0.0 };
    let slot = if bars.is_empty() { plot_w } else { plot_w / bars.len() as f64 };
    let bar_w = slot * 0.6;
    let baseline = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    ));
    svg.push_str(&format!(r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#));
    svg.push_str(&format!(
        r#"<text x="{}" y="24" text-anchor="middle" font-size="15" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    ));
    svg.push_str(&format!(
        r#"<text x="16" y="{y}" text-anchor="middle" font-size="11" transform="rotate(-90 16 {y})">{}</text>"#,
        escape(y_label),
        y = MARGIN_TOP + plot_h / 2.0
    ));
    svg.push_str(&format!(
        r##"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="#333"/>"##,
        WIDTH - MARGIN_RIGHT
    ));
    svg.push_str(&format!(
        r##"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="#333"/>"##
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="end" font-size="10">{}</text>"#,
        MARGIN_LEFT - 6.0,
        MARGIN_TOP + 4.0,
        format_value(max)
    ));

    for (idx, (label, value)) in bars.iter().enumerate() {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        let height = value * scale;
        let x = MARGIN_LEFT + slot * idx as f64 + (slot - bar_w) / 2.0;
        let center = x + bar_w / 2.0;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{:.1}" width="{bar_w:.1}" height="{height:.1}" fill="{BAR_COLOR}"/>"#,
            baseline - height
        ));
        svg.push_str(&format!(
            r#"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="10">{}</text>"#,
            baseline - height - 4.0,
            format_value(value)
        ));
        svg.push_str(&format!(
            r#"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
            baseline + 18.0,
            escape(label)
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="11">Transport Mode</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str("</svg>");
    svg
}

fn format_value(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
