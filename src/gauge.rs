//! Terminal rendering of one depleting ring.
//!
//! A terminal cell grid cannot draw an SVG stroke, so each ring is drawn as a
//! gauge: the filled cells stand for the visible part of the stroke and the
//! empty cells for the dash offset. A gauge renders one
//! [`PresentationUnit`] as three lines:
//!
//! ```text
//!      05
//! ████████░░░░░░░░░░░░
//!    Minutes
//! ```
//!
//! # Options
//!
//! ```rust
//! use countdown_rings::gauge::{new, with_fill_characters, with_solid_fill, with_width};
//!
//! let gauge = new(&[
//!     with_width(30),
//!     with_solid_fill("#ff5f87".to_string()),
//!     with_fill_characters('=', '-'),
//! ]);
//! assert_eq!(gauge.width, 30);
//! ```

use crate::render::PresentationUnit;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

const DEFAULT_WIDTH: usize = 20;

/// Configuration options for a gauge.
#[derive(Debug, Clone)]
pub enum GaugeOption {
    /// Total width in cells.
    WithWidth(usize),
    /// Color of the filled part.
    WithSolidFill(String),
    /// Color of the empty part.
    WithEmptyColor(String),
    /// Characters used for filled and empty cells.
    WithFillCharacters(char, char),
}

impl GaugeOption {
    fn apply(&self, m: &mut Model) {
        match self {
            GaugeOption::WithWidth(w) => m.width = (*w).max(1),
            GaugeOption::WithSolidFill(color) => m.full_color = color.clone(),
            GaugeOption::WithEmptyColor(color) => m.empty_color = color.clone(),
            GaugeOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
        }
    }
}

/// Sets the gauge width in cells (at least 1).
pub fn with_width(w: usize) -> GaugeOption {
    GaugeOption::WithWidth(w)
}

/// Sets the fill color.
pub fn with_solid_fill(color: String) -> GaugeOption {
    GaugeOption::WithSolidFill(color)
}

/// Sets the color of the empty part.
pub fn with_empty_color(color: String) -> GaugeOption {
    GaugeOption::WithEmptyColor(color)
}

/// Sets the characters for filled and empty cells.
pub fn with_fill_characters(full: char, empty: char) -> GaugeOption {
    GaugeOption::WithFillCharacters(full, empty)
}

/// Gauge appearance.
#[derive(Debug, Clone)]
pub struct Model {
    /// Width in cells.
    pub width: usize,
    /// Filled cell character.
    pub full: char,
    /// Filled cell color.
    pub full_color: String,
    /// Empty cell character.
    pub empty: char,
    /// Empty cell color.
    pub empty_color: String,
    /// Style of the numeric value line.
    pub value_style: Style,
    /// Style of the label line.
    pub label_style: Style,
}

/// Creates a gauge with `opts` applied over the defaults.
pub fn new(opts: &[GaugeOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: "#7571F9".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        value_style: Style::new().bold(true),
        label_style: Style::new().faint(true),
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Model {
    /// Number of filled cells for `fraction`.
    pub fn filled_cells(&self, fraction: f64) -> usize {
        let fw = (self.width as f64 * fraction.clamp(0.0, 1.0)).round() as usize;
        fw.min(self.width)
    }

    /// Renders the bar alone.
    pub fn bar_view(&self, fraction: f64) -> String {
        let fw = self.filled_cells(fraction);

        let full = Style::new()
            .foreground(lipgloss::Color::from(self.full_color.as_str()))
            .render(&self.full.to_string());
        let empty = Style::new()
            .foreground(lipgloss::Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());

        let mut result = full.repeat(fw);
        result.push_str(&empty.repeat(self.width - fw));
        result
    }

    /// Renders value, bar and label for `unit`, each centred to the width.
    pub fn view(&self, unit: &PresentationUnit) -> String {
        let value = self.value_style.render(&self.center(&unit.display_value()));
        let label = self.label_style.render(&self.center(unit.unit.label()));
        format!("{}\n{}\n{}", value, self.bar_view(unit.fraction()), label)
    }

    fn center(&self, text: &str) -> String {
        let w = text.width();
        if w >= self.width {
            return text.to_string();
        }
        let left = (self.width - w) / 2;
        let right = self.width - w - left;
        format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Unit;

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn unit(value: u64, max_for_scale: u64) -> PresentationUnit {
        PresentationUnit {
            unit: Unit::Minutes,
            value,
            max_for_scale,
            visible: true,
        }
    }

    #[test]
    fn test_new_with_no_options() {
        let gauge = new(&[]);
        assert_eq!(gauge.width, DEFAULT_WIDTH);
        assert_eq!(gauge.full, '█');
        assert_eq!(gauge.empty, '░');
        assert_eq!(gauge.full_color, "#7571F9");
    }

    #[test]
    fn test_options_apply() {
        let gauge = new(&[
            with_width(0),
            with_fill_characters('#', '.'),
            with_empty_color("#000000".to_string()),
        ]);
        assert_eq!(gauge.width, 1);
        assert_eq!(gauge.full, '#');
        assert_eq!(gauge.empty, '.');
        assert_eq!(gauge.empty_color, "#000000");
    }

    #[test]
    fn test_bar_depletes_with_fraction() {
        let gauge = new(&[with_width(10), with_fill_characters('#', '.')]);

        assert_eq!(plain(&gauge.bar_view(1.0)), "##########");
        assert_eq!(plain(&gauge.bar_view(0.5)), "#####.....");
        assert_eq!(plain(&gauge.bar_view(0.0)), "..........");
        assert_eq!(plain(&gauge.bar_view(2.0)), "##########");
    }

    #[test]
    fn test_view_has_value_bar_and_label() {
        let gauge = new(&[with_width(10), with_fill_characters('#', '.')]);
        let out = plain(&gauge.view(&unit(30, 60)));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].trim(), "30");
        assert_eq!(lines[1], "#####.....");
        assert_eq!(lines[2].trim(), "Minutes");
    }

    #[test]
    fn test_filled_cells_rounds() {
        let gauge = new(&[with_width(60)]);
        assert_eq!(gauge.filled_cells(unit(59, 60).fraction()), 59);
        assert_eq!(gauge.filled_cells(unit(1, 60).fraction()), 1);
    }
}
