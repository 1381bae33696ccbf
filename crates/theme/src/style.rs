use crate::colors::Color;

/// Visual settings for the chart canvas itself.
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    pub background: Color,
    /// Axis lines, tick labels and title.
    pub foreground: Color,
    pub font:       String,
    pub font_size:  f32,
}

/// Per-series visual settings passed to the bar renderer.
#[derive(Debug, Clone)]
pub struct SeriesStyle {
    pub fill:  Color,
    /// Legend text.
    pub label: String,
}
