//! Help line generated from key bindings.
//!
//! The countdown shows a compact single line of its currently enabled
//! bindings, and an expanded multi-column view when the user asks for more.
//! Disabled bindings are skipped, so the line follows the countdown's mode.
//!
//! ```rust
//! use countdown_rings::help::Model;
//! use countdown_rings::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
//! let reset = Binding::new(vec![KeyCode::Esc]).with_help("esc", "reset");
//!
//! let help = Model::new().with_width(80);
//! let line = help.short_help_view(vec![&reset, &quit]);
//! assert!(!line.is_empty());
//! ```

use crate::key;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

pub use crate::key::KeyMap;

/// Styles for the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the ellipsis shown when content is truncated.
    pub ellipsis: Style,
    /// Key names in the short view.
    pub short_key: Style,
    /// Descriptions in the short view.
    pub short_desc: Style,
    /// Separator between items in the short view.
    pub short_separator: Style,
    /// Key names in the full view.
    pub full_key: Style,
    /// Descriptions in the full view.
    pub full_desc: Style,
    /// Separator between columns in the full view.
    pub full_separator: Style,
}

impl Default for Styles {
    /// Subtle grays that adapt to light and dark terminals.
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// Help view state.
///
/// With `show_all` unset the view is one line:
/// ```text
/// space pause • esc reset • c cancel • q quit • ? more
/// ```
/// With it set, bindings are laid out in the columns given by
/// [`KeyMap::full_help`].
#[derive(Debug, Clone)]
pub struct Model {
    /// Expanded view when true.
    pub show_all: bool,
    /// Maximum width in cells; 0 means unlimited.
    pub width: usize,
    /// Separator between short help items.
    pub short_separator: String,
    /// Separator between full help columns.
    pub full_separator: String,
    /// Shown when items are cut off by `width`.
    pub ellipsis: String,
    /// Styling.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help view with default styles and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders `keymap` in the current view mode.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders enabled bindings on one line.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let sep = self.styles.short_separator.clone().inline(true).render(&self.short_separator);
        let items: Vec<String> = bindings
            .into_iter()
            .filter(|b| b.enabled())
            .map(|b| self.entry(b, &self.styles.short_key, &self.styles.short_desc))
            .collect();

        let mut line = String::new();
        let mut used = 0;
        for (i, item) in items.iter().enumerate() {
            let piece = if i == 0 { item.clone() } else { format!("{sep}{item}") };
            let w = lipgloss::width_visible(&piece);
            if self.overflows(used, w) {
                line.push_str(&self.ellipsis_tail(used));
                break;
            }
            used += w;
            line.push_str(&piece);
        }
        line
    }

    /// Renders enabled bindings in columns.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let sep = self.styles.full_separator.clone().inline(true).render(&self.full_separator);
        let sep_width = lipgloss::width_visible(&sep);

        let mut columns: Vec<String> = Vec::new();
        let mut used = 0;
        for group in groups.iter().filter(|g| should_render_column(g)) {
            let column = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| self.entry(b, &self.styles.full_key, &self.styles.full_desc))
                .collect::<Vec<_>>()
                .join("\n");
            let w = lipgloss::width_visible(&column);
            let gap = if columns.is_empty() { 0 } else { sep_width };
            if self.overflows(used, w + gap) {
                let tail = self.ellipsis_tail(used);
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            used += w + gap;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::with_capacity(columns.len() * 2);
        for col in &columns {
            if !parts.is_empty() {
                parts.push(&sep);
            }
            parts.push(col);
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn entry(&self, binding: &key::Binding, key_style: &Style, desc_style: &Style) -> String {
        let help = binding.help();
        format!(
            "{} {}",
            key_style.clone().inline(true).render(&help.key),
            desc_style.clone().inline(true).render(&help.desc)
        )
    }

    fn overflows(&self, used: usize, next: usize) -> bool {
        self.width > 0 && used + next > self.width
    }

    // Ellipsis to close a truncated view, or nothing if even that won't fit.
    fn ellipsis_tail(&self, used: usize) -> String {
        let tail = format!(" {}", self.styles.ellipsis.clone().inline(true).render(&self.ellipsis));
        if used + lipgloss::width_visible(&tail) < self.width {
            tail
        } else {
            String::new()
        }
    }
}

/// Whether any binding in a column is enabled.
pub fn should_render_column(bindings: &[&key::Binding]) -> bool {
    bindings.iter().any(|b| b.enabled())
}
