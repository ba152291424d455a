//! Shared highlight script.
//!
//! Every navigation link's second action calls `highlight(page, coords)` in a
//! routine installed once at document level. [`Script`] captures the style
//! parameters that shape that routine and renders it deterministically, so a
//! given configuration always produces byte-identical script text.
//!
//! The routine draws a temporary button field named `Target` over the
//! destination cell, optionally blinks it on a timer, and removes it after
//! the configured duration. Parameters the viewer cannot express (opacity,
//! corner radius, effects) are carried but not rendered; dotted borders
//! render as dashed, the closest supported style.

use crate::style::{AnimationType, FillStyle, LineStyle, StyleConfig};

/// A fully-resolved highlight script, ready to render or embed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script {
    pub stroke_color: String,
    pub fill_color: Option<String>,
    pub line_width: u32,
    pub dashed_border: bool,
    /// Blink interval in milliseconds; zero means no animation.
    pub interval_millis: u32,
    /// Total highlight lifetime in milliseconds.
    pub duration_millis: u32,
    /// Signed rectangle adjustment applied before drawing.
    pub rect_margin: i32,
    /// Border opacity percentage, already clamped to 10..=100.
    pub opacity_pct: u32,
    pub corner_radius: u32,
}

impl Script {
    /// Resolve a [`StyleConfig`] into concrete script parameters.
    pub fn from_config(config: &StyleConfig) -> Self {
        let fill_color = match config.fill_style {
            FillStyle::None => None,
            FillStyle::Translucent | FillStyle::Solid => {
                Some(config.fill_color.js_expr(config.color).to_string())
            }
        };
        let interval_millis = match config.animation {
            AnimationType::None => 0,
            _ => config.blink_speed.millis(),
        };
        Self {
            stroke_color: config.color.js_expr().to_string(),
            fill_color,
            line_width: config.line_width.clamp(1, 10),
            dashed_border: matches!(config.line_style, LineStyle::Dashed | LineStyle::Dotted),
            interval_millis,
            duration_millis: config.duration_millis(),
            rect_margin: config.rect_margin,
            opacity_pct: config.opacity_pct.clamp(10, 100),
            corner_radius: config.corner_radius,
        }
    }

    /// The invocation a link action uses to call into the rendered routine.
    /// Coordinates are native PDF space, fixed to two decimals so repeated
    /// runs produce identical documents.
    pub fn invocation(page_index: usize, rect: [f64; 4]) -> String {
        format!(
            "highlight({page_index}, [{:.2}, {:.2}, {:.2}, {:.2}]);",
            rect[0], rect[1], rect[2], rect[3]
        )
    }

    /// Render the document-level routine.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut line = |text: &str| {
            out.push_str(text);
            out.push('\n');
        };

        line("function finish() {");
        line("    app.clearInterval(interval);");
        line("    var oldDirty = dirty;");
        line("    removeField('Target');");
        line("    dirty = oldDirty;");
        line("}");
        line("");

        line("function blinker() {");
        if self.interval_millis == 0 {
            line("    // no animation");
        } else {
            line("    var f = getField('Target');");
            line("    if (f != null) {");
            line("        var oldDirty = dirty;");
            line("        if (interval.counter++ % 2) { f.hidden = false; }");
            line("        else { f.hidden = true; }");
            line("        dirty = oldDirty;");
            line("    }");
        }
        line("}");
        line("");

        line("function highlight(page, coordinates) {");
        line("    var f = getField('Target');");
        line("    if (f != null) {");
        line("        app.clearTimeOut(timer);");
        line("        finish();");
        line("    }");
        if self.rect_margin != 0 {
            let m = self.rect_margin;
            line(&format!("    coordinates[0] -= {m};"));
            line(&format!("    coordinates[1] -= {m};"));
            line(&format!("    coordinates[2] += {m};"));
            line(&format!("    coordinates[3] += {m};"));
        }
        line("    var oldDirty = dirty;");
        line("    var f = addField('Target', 'button', page, coordinates);");
        line(&format!("    f.lineWidth = {};", self.line_width));
        line(&format!("    f.strokeColor = {};", self.stroke_color));
        if let Some(fill) = &self.fill_color {
            line(&format!("    f.fillColor = {fill};"));
        }
        if self.dashed_border {
            line("    f.borderStyle = border.d;");
        }
        line("    dirty = oldDirty;");
        if self.interval_millis > 0 {
            line(&format!(
                "    interval = app.setInterval('blinker()', {});",
                self.interval_millis
            ));
            line("    interval.counter = 0;");
        }
        line(&format!(
            "    timer = app.setTimeOut('finish()', {});",
            self.duration_millis
        ));
        line("}");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BlinkSpeed, FillColor, HighlightColor};

    #[test]
    fn render_is_deterministic() {
        let script = Script::from_config(&StyleConfig::default());
        assert_eq!(script.render(), script.render());
    }

    #[test]
    fn default_config_renders_expected_parameters() {
        let text = Script::from_config(&StyleConfig::default()).render();
        assert!(text.contains("f.lineWidth = 3;"));
        assert!(text.contains("f.strokeColor = color.red;"));
        assert!(text.contains("app.setInterval('blinker()', 500);"));
        assert!(text.contains("app.setTimeOut('finish()', 5000);"));
        assert!(!text.contains("fillColor"));
        assert!(!text.contains("borderStyle"));
        assert!(!text.contains("coordinates[0] -="));
    }

    #[test]
    fn no_animation_drops_interval() {
        let config = StyleConfig {
            animation: AnimationType::None,
            ..StyleConfig::default()
        };
        let text = Script::from_config(&config).render();
        assert!(!text.contains("setInterval"));
        assert!(text.contains("// no animation"));
    }

    #[test]
    fn zero_blink_speed_also_disables_animation() {
        let config = StyleConfig {
            blink_speed: BlinkSpeed::None,
            ..StyleConfig::default()
        };
        let script = Script::from_config(&config);
        assert_eq!(script.interval_millis, 0);
    }

    #[test]
    fn dotted_renders_as_dashed() {
        let config = StyleConfig {
            line_style: LineStyle::Dotted,
            ..StyleConfig::default()
        };
        let text = Script::from_config(&config).render();
        assert!(text.contains("f.borderStyle = border.d;"));
    }

    #[test]
    fn fill_follows_border_color() {
        let config = StyleConfig {
            fill_style: FillStyle::Translucent,
            color: HighlightColor::Blue,
            fill_color: FillColor::SameAsBorder,
            ..StyleConfig::default()
        };
        let text = Script::from_config(&config).render();
        assert!(text.contains("f.fillColor = color.blue;"));
    }

    #[test]
    fn margin_adjusts_coordinates() {
        let config = StyleConfig {
            rect_margin: -4,
            ..StyleConfig::default()
        };
        let text = Script::from_config(&config).render();
        assert!(text.contains("coordinates[0] -= -4;"));
        assert!(text.contains("coordinates[2] += -4;"));
    }

    #[test]
    fn invocation_formats_two_decimals() {
        let call = Script::invocation(7, [10.0, 20.5, 110.256, 40.0]);
        assert_eq!(call, "highlight(7, [10.00, 20.50, 110.26, 40.00]);");
    }

    #[test]
    fn opacity_clamped_into_range() {
        let config = StyleConfig {
            opacity_pct: 3,
            ..StyleConfig::default()
        };
        assert_eq!(Script::from_config(&config).opacity_pct, 10);
    }
}
