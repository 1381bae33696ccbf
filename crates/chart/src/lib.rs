//! Bar-chart rendering for smoothed telemetry series.
//!
//! Charts are emitted as standalone SVG documents: one category slot per
//! x label (or per value, whichever is longer), one bar per finite value.

pub mod axis;
pub mod svg;

pub use axis::YRange;

use axis::label_step;
use simstat_core::{Result, Series, SimError};
use simstat_theme::{CanvasStyle, SeriesStyle, Theme};
use std::fmt::Write as _;
use std::path::Path;
use svg::escape;
use tracing::{debug, warn};

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 56.0;

/// Fraction of each category slot filled by its bar.
const BAR_FILL: f64 = 0.8;

/// A single-dataset bar chart.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub labels:  Vec<String>,
    pub values:  Vec<f64>,
    /// Fixed y range; `None` scales to the data.
    pub y_range: Option<(f64, f64)>,
    pub style:   SeriesStyle,
}

impl BarChart {
    /// Chart a series with the theme's style for its channel.
    pub fn from_series(series: &Series, theme: &Theme) -> Self {
        Self {
            labels:  series.labels.clone(),
            values:  series.values.clone(),
            y_range: None,
            style:   theme.series(series.channel),
        }
    }

    #[must_use]
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    fn slots(&self) -> usize {
        self.labels.len().max(self.values.len())
    }

    /// Render the chart as an SVG document of `width` × `height` pixels.
    pub fn render(&self, canvas: &CanvasStyle, width: u32, height: u32) -> Result<String> {
        if width == 0 || height == 0 {
            return Err(SimError::Chart(format!("invalid chart size {width}x{height}")));
        }
        if self.values.is_empty() {
            warn!("Rendering '{}' chart with no data", self.style.label);
        }

        let mut out = String::with_capacity(4096 + self.slots() * 96);
        self.draw(&mut out, canvas, f64::from(width), f64::from(height))
            .map_err(|e| SimError::Chart(format!("SVG formatting failed: {e}")))?;
        Ok(out)
    }

    /// Render and write to `path`, creating parent directories.
    pub fn write_svg(
        &self,
        path: impl AsRef<Path>,
        canvas: &CanvasStyle,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let path = path.as_ref();
        let doc = self.render(canvas, width, height)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, doc)?;

        debug!("Wrote chart {}", path.display());
        Ok(())
    }

    fn draw(&self, out: &mut String, canvas: &CanvasStyle, width: f64, height: f64) -> std::fmt::Result {
        let range = YRange::resolve(self.y_range, &self.values);
        let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let bottom = MARGIN_TOP + plot_h;
        let fg = canvas.foreground.to_hex();
        let font = escape(&canvas.font);
        let size = canvas.font_size;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}" fill-opacity="{}"/>"#,
            canvas.background.to_hex(),
            canvas.background.opacity()
        )?;

        // ── Legend ────────────────────────────────────────────────────────────
        let legend_x = width / 2.0;
        writeln!(
            out,
            r#"<rect x="{:.1}" y="14" width="28" height="12" fill="{}" fill-opacity="{}"/>"#,
            legend_x - 40.0,
            self.style.fill.to_hex(),
            self.style.fill.opacity()
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="25" font-family="{font}" font-size="{size}" fill="{fg}">{}</text>"#,
            legend_x - 6.0,
            escape(&self.style.label)
        )?;

        // ── Y axis + gridlines ────────────────────────────────────────────────
        for tick in range.ticks() {
            let y = bottom - range.fraction(tick) * plot_h;
            writeln!(
                out,
                r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{fg}" stroke-opacity="0.15"/>"#,
                MARGIN_LEFT + plot_w
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="{font}" font-size="{size}" fill="{fg}">{}</text>"#,
                MARGIN_LEFT - 6.0,
                y + size as f64 / 3.0,
                range.format_tick(tick)
            )?;
        }

        // ── Bars ──────────────────────────────────────────────────────────────
        let slots = self.slots().max(1);
        let slot_w = plot_w / slots as f64;
        let bar_w = slot_w * BAR_FILL;
        let fill = self.style.fill.to_hex();
        let opacity = self.style.fill.opacity();

        for (i, value) in self.values.iter().enumerate() {
            if !value.is_finite() {
                continue;
            }
            let h = range.fraction(*value) * plot_h;
            let x = MARGIN_LEFT + i as f64 * slot_w + (slot_w - bar_w) / 2.0;
            writeln!(
                out,
                r#"<rect x="{x:.2}" y="{:.2}" width="{bar_w:.2}" height="{h:.2}" fill="{fill}" fill-opacity="{opacity}"/>"#,
                bottom - h
            )?;
        }

        // ── X axis ────────────────────────────────────────────────────────────
        writeln!(
            out,
            r#"<line x1="{MARGIN_LEFT}" y1="{bottom:.1}" x2="{:.1}" y2="{bottom:.1}" stroke="{fg}"/>"#,
            MARGIN_LEFT + plot_w
        )?;
        let step = label_step(self.labels.len());
        for (i, label) in self.labels.iter().enumerate().step_by(step) {
            let x = MARGIN_LEFT + (i as f64 + 0.5) * slot_w;
            writeln!(
                out,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-family="{font}" font-size="{size}" fill="{fg}">{}</text>"#,
                bottom + 18.0,
                escape(label)
            )?;
        }

        writeln!(out, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstat_core::Channel;

    fn bars(doc: &str) -> usize {
        // background + legend swatch are the two non-bar rects
        doc.matches("<rect").count() - 2
    }

    #[test]
    fn one_bar_per_finite_value() {
        let theme = Theme::default();
        let series = Series::indexed(Channel::Cpu, vec![10.0, f64::NAN, 30.0, 50.0]);
        let doc = BarChart::from_series(&series, &theme)
            .with_y_range(0.0, 100.0)
            .render(&theme.canvas(), 800, 600)
            .unwrap();

        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(bars(&doc), 3);
        assert!(doc.contains("Cpu usage"));
        assert!(doc.contains("#0000ff"));
    }

    #[test]
    fn memory_bars_use_secondary_color() {
        let theme = Theme::default();
        let series = Series::indexed(Channel::Memory, vec![100.0]);
        let doc = BarChart::from_series(&series, &theme)
            .render(&theme.canvas(), 400, 300)
            .unwrap();
        assert!(doc.contains("#ff0000"));
    }

    #[test]
    fn empty_chart_still_renders() {
        let theme = Theme::default();
        let series = Series::indexed(Channel::Rtt, vec![]);
        let doc = BarChart::from_series(&series, &theme)
            .render(&theme.canvas(), 400, 300)
            .unwrap();
        assert_eq!(bars(&doc), 0);
    }

    #[test]
    fn labels_are_escaped_and_thinned() {
        let theme = Theme::default();
        let labels: Vec<String> = (0..100).map(|i| format!("<{i}>")).collect();
        let series = Series::with_labels(Channel::Rtt, labels, vec![1.0; 100]);
        let doc = BarChart::from_series(&series, &theme)
            .render(&theme.canvas(), 800, 600)
            .unwrap();
        assert!(doc.contains("&lt;0&gt;"));
        assert!(!doc.contains("&lt;1&gt;"));
        assert!(doc.contains("&lt;5&gt;"));
    }

    #[test]
    fn zero_size_is_rejected() {
        let theme = Theme::default();
        let chart = BarChart::from_series(&Series::indexed(Channel::Cpu, vec![1.0]), &theme);
        assert!(matches!(chart.render(&theme.canvas(), 0, 10), Err(SimError::Chart(_))));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("chart_cpu_nc01.svg");
        let theme = Theme::default();
        BarChart::from_series(&Series::indexed(Channel::Cpu, vec![1.0, 2.0]), &theme)
            .write_svg(&path, &theme.canvas(), 200, 100)
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
