pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{CanvasStyle, SeriesStyle};

use simstat_config::ChartConfig;
use simstat_core::Channel;

/// Compiled theme derived from [`ChartConfig`].
///
/// All colors are pre-parsed from hex strings.  Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// CPU, RTT and network bars.
    pub primary:    Color,
    /// Memory bars.
    pub secondary:  Color,
    pub font:       String,
    pub font_size:  f32,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[chart]` section.
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::WHITE),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::GRAY),
            primary:    Color::from_hex(&cfg.primary).unwrap_or(Color::BLUE),
            secondary:  Color::from_hex(&cfg.secondary).unwrap_or(Color::RED),
            font:       cfg.font.clone(),
            font_size:  cfg.font_size,
        }
    }

    pub fn canvas(&self) -> CanvasStyle {
        CanvasStyle {
            background: self.background,
            foreground: self.foreground,
            font:       self.font.clone(),
            font_size:  self.font_size,
        }
    }

    /// Bar style for a channel.
    pub fn series(&self, channel: Channel) -> SeriesStyle {
        let fill = match channel {
            Channel::Memory => self.secondary,
            _ => self.primary,
        };
        SeriesStyle { fill, label: channel.label().to_string() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}
