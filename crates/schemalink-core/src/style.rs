//! Highlight style configuration.
//!
//! [`StyleConfig`] bundles every knob of the navigation highlight: border
//! color and width, fill, animation, timing, and the document-save options.
//! It is a plain value shared between the script renderer and the persisted
//! styles record; serde support sits behind the `serde` feature.

use crate::error::PatternError;
use crate::pattern::{CUSTOM_STYLE_NAME, PatternSpec, compile_style};

/// Named colors available for borders and fills. Acrobat's JavaScript color
/// constants cover all but orange, which is spelled out as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HighlightColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Magenta,
    Cyan,
    White,
    Black,
}

impl HighlightColor {
    /// The viewer JavaScript expression for this color.
    pub fn js_expr(&self) -> &'static str {
        match self {
            HighlightColor::Red => "color.red",
            HighlightColor::Green => "color.green",
            HighlightColor::Blue => "color.blue",
            HighlightColor::Yellow => "color.yellow",
            HighlightColor::Orange => "[\"RGB\", 0.976, 0.451, 0.086]",
            HighlightColor::Magenta => "color.magenta",
            HighlightColor::Cyan => "color.cyan",
            HighlightColor::White => "color.white",
            HighlightColor::Black => "color.black",
        }
    }
}

/// Fill color choice: follow the border color or pick a named one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillColor {
    #[default]
    SameAsBorder,
    Named(HighlightColor),
}

impl FillColor {
    pub fn js_expr(&self, border: HighlightColor) -> &'static str {
        match self {
            FillColor::SameAsBorder => border.js_expr(),
            FillColor::Named(color) => color.js_expr(),
        }
    }
}

/// Border line style. Viewer JavaScript has no dotted border, so dotted
/// renders as dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Blink interval presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlinkSpeed {
    Fast,
    #[default]
    Normal,
    Slow,
    None,
}

impl BlinkSpeed {
    /// Interval between visibility toggles, in milliseconds. Zero disables
    /// blinking entirely.
    pub fn millis(&self) -> u32 {
        match self {
            BlinkSpeed::Fast => 300,
            BlinkSpeed::Normal => 500,
            BlinkSpeed::Slow => 800,
            BlinkSpeed::None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillStyle {
    #[default]
    None,
    Translucent,
    Solid,
}

/// Highlight animation. Fade and pulse degrade to the same visibility toggle
/// the viewer supports; the distinction is kept for the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnimationType {
    #[default]
    Blink,
    Fade,
    Pulse,
    None,
}

/// Extra visual effect. Not expressible in viewer JavaScript; carried in the
/// record and ignored at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    #[default]
    None,
    SoftShadow,
    Glow,
}

/// Complete highlight and export configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleConfig {
    /// Name of the reference style in use; [`CUSTOM_STYLE_NAME`] selects
    /// `custom_pattern`.
    pub pattern: String,
    /// Custom pattern text (template or raw regex), used when `pattern` is
    /// the custom style.
    pub custom_pattern: String,
    pub color: HighlightColor,
    /// Border width in points, 1 to 10.
    pub line_width: u32,
    pub line_style: LineStyle,
    pub blink_speed: BlinkSpeed,
    /// How long the highlight stays up, in seconds (1 to 30).
    pub duration_secs: u32,
    pub fill_style: FillStyle,
    pub fill_color: FillColor,
    pub animation: AnimationType,
    /// Border opacity percentage, clamped to 10..=100 when rendered.
    pub opacity_pct: u32,
    /// Corner rounding in points, 0 to 20. Carried in the record only.
    pub corner_radius: u32,
    /// Grows (positive) or shrinks (negative) the highlight rectangle.
    pub rect_margin: i32,
    pub effect: Effect,
    /// Write the output over the original file name.
    pub keep_original_name: bool,
    /// Suppress confirmation popups after export.
    pub disable_popups: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            pattern: "/1.0-A".to_string(),
            custom_pattern: String::new(),
            color: HighlightColor::Red,
            line_width: 3,
            line_style: LineStyle::Solid,
            blink_speed: BlinkSpeed::Normal,
            duration_secs: 5,
            fill_style: FillStyle::None,
            fill_color: FillColor::SameAsBorder,
            animation: AnimationType::Blink,
            opacity_pct: 100,
            corner_radius: 0,
            rect_margin: 0,
            effect: Effect::None,
            keep_original_name: false,
            disable_popups: false,
        }
    }
}

impl StyleConfig {
    /// Compile the configured reference pattern.
    pub fn compile_pattern(&self) -> Result<PatternSpec, PatternError> {
        if self.pattern == CUSTOM_STYLE_NAME {
            compile_style(CUSTOM_STYLE_NAME, &self.custom_pattern)
        } else {
            compile_style(&self.pattern, "")
        }
    }

    /// Highlight duration in milliseconds.
    pub fn duration_millis(&self) -> u32 {
        self.duration_secs.saturating_mul(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_expected_knobs() {
        let config = StyleConfig::default();
        assert_eq!(config.pattern, "/1.0-A");
        assert_eq!(config.line_width, 3);
        assert_eq!(config.duration_secs, 5);
        assert_eq!(config.blink_speed.millis(), 500);
        assert_eq!(config.opacity_pct, 100);
        assert_eq!(config.rect_margin, 0);
    }

    #[test]
    fn blink_speed_millis() {
        assert_eq!(BlinkSpeed::Fast.millis(), 300);
        assert_eq!(BlinkSpeed::Normal.millis(), 500);
        assert_eq!(BlinkSpeed::Slow.millis(), 800);
        assert_eq!(BlinkSpeed::None.millis(), 0);
    }

    #[test]
    fn fill_color_follows_border_by_default() {
        let fill = FillColor::default();
        assert_eq!(fill.js_expr(HighlightColor::Cyan), "color.cyan");
        let named = FillColor::Named(HighlightColor::White);
        assert_eq!(named.js_expr(HighlightColor::Cyan), "color.white");
    }

    #[test]
    fn default_pattern_compiles() {
        let spec = StyleConfig::default().compile_pattern().unwrap();
        assert!(spec.regex.is_match("/12.3-A"));
    }

    #[test]
    fn custom_pattern_routes_through_template() {
        let config = StyleConfig {
            pattern: CUSTOM_STYLE_NAME.to_string(),
            custom_pattern: "REF-{P}.{C}.{F}".to_string(),
            ..StyleConfig::default()
        };
        let spec = config.compile_pattern().unwrap();
        assert!(spec.regex.is_match("REF-12.3.A"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let config = StyleConfig {
            color: HighlightColor::Orange,
            fill_style: FillStyle::Translucent,
            fill_color: FillColor::Named(HighlightColor::Yellow),
            blink_speed: BlinkSpeed::Slow,
            rect_margin: -4,
            ..StyleConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: StyleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_record_fills_defaults() {
        let back: StyleConfig = serde_json::from_str(r#"{"line_width": 5}"#).unwrap();
        assert_eq!(back.line_width, 5);
        assert_eq!(back.blink_speed, BlinkSpeed::Normal);
    }
}
