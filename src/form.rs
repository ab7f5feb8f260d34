//! Duration entry form.
//!
//! Four single-line fields (days, hours, minutes, seconds) with one of them
//! focused at a time. Fields hold raw text; coercion to numbers happens once,
//! on submit, through [`DurationSpec::from_fields`], so whatever the user
//! typed is kept intact if the countdown is cancelled and the form comes back.
//!
//! ```rust
//! use countdown_rings::form::Model;
//! use countdown_rings::time::DurationSpec;
//!
//! let mut form = Model::new(DurationSpec::new(0, 0, 5, 0));
//! assert_eq!(form.spec(), DurationSpec::new(0, 0, 5, 0));
//!
//! form.set_value(3, "-4");
//! assert_eq!(form.spec().seconds, 0);
//! ```

use crate::key::{self, Binding, KeyPress};
use crate::time::DurationSpec;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

const FIELD_LABELS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];
const FIELD_CHAR_LIMIT: usize = 6;
const FIELD_WIDTH: usize = 8;

/// One text field of the form.
#[derive(Debug, Clone)]
pub struct Field {
    /// Label shown above the field.
    pub label: &'static str,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    value: Vec<char>,
    pos: usize,
    focus: bool,
}

impl Field {
    /// Creates an empty, unfocused field.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            char_limit: FIELD_CHAR_LIMIT,
            value: Vec::new(),
            pos: 0,
            focus: false,
        }
    }

    /// Current raw text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the text and moves the cursor to its end.
    pub fn set_value(&mut self, s: &str) {
        let mut chars: Vec<char> = s.chars().collect();
        if self.char_limit > 0 {
            chars.truncate(self.char_limit);
        }
        self.value = chars;
        self.pos = self.value.len();
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn insert(&mut self, c: char) {
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.pos, c);
        self.pos += 1;
    }

    fn delete_backward(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            self.value.remove(self.pos);
        }
    }

    fn delete_forward(&mut self) {
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
        }
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) {
        match key_msg.key {
            // Fields hold whole non-negative numbers only
            KeyCode::Char(c)
                if c.is_ascii_digit()
                    && !key_msg
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c)
            }
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.pos = self.pos.saturating_sub(1),
            KeyCode::Right => self.pos = (self.pos + 1).min(self.value.len()),
            KeyCode::Home => self.pos = 0,
            KeyCode::End => self.pos = self.value.len(),
            _ => {}
        }
    }

    /// Renders the field, with a cursor cell when focused.
    pub fn view(&self, styles: &Styles) -> String {
        let text = if self.focus {
            &styles.focused_text
        } else {
            &styles.text
        };

        let before: String = self.value[..self.pos].iter().collect();
        let mut v = text.render(&before);
        let mut width = self.pos;

        if self.focus {
            let under = self.value.get(self.pos).copied().unwrap_or(' ');
            v.push_str(&styles.cursor.render(&under.to_string()));
            width += 1;
            if self.pos + 1 < self.value.len() {
                let after: String = self.value[self.pos + 1..].iter().collect();
                v.push_str(&text.render(&after));
                width += after.chars().count();
            }
        } else if self.pos < self.value.len() {
            let after: String = self.value[self.pos..].iter().collect();
            v.push_str(&text.render(&after));
            width += after.chars().count();
        }

        if width < FIELD_WIDTH {
            v.push_str(&" ".repeat(FIELD_WIDTH - width));
        }
        let prompt = if self.focus { "> " } else { "  " };
        format!("{}{}", styles.prompt.render(prompt), v)
    }
}

impl Component for Field {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.pos = self.value.len();
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Form styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Field labels.
    pub label: Style,
    /// Text of unfocused fields.
    pub text: Style,
    /// Text of the focused field.
    pub focused_text: Style,
    /// The cursor cell.
    pub cursor: Style,
    /// The `> ` marker in front of the focused field.
    pub prompt: Style,
    /// Hint line under the fields.
    pub hint: Style,
    /// Validation message.
    pub error: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            label: Style::new().bold(true),
            text: Style::new(),
            focused_text: Style::new().foreground(Color::from("#7571F9")),
            cursor: Style::new().underline(true),
            prompt: Style::new().foreground(Color::from("#7571F9")),
            hint: Style::new().faint(true),
            error: Style::new().foreground(Color::from("#FF5F87")),
        }
    }
}

/// Form key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Focus the next field.
    pub next_field: Binding,
    /// Focus the previous field.
    pub prev_field: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Down])
                .with_help("tab", "next field"),
            prev_field: Binding::new(vec![
                KeyPress::from(KeyCode::BackTab),
                (KeyCode::BackTab, KeyModifiers::SHIFT).into(),
                (KeyCode::Tab, KeyModifiers::SHIFT).into(),
                KeyCode::Up.into(),
            ])
            .with_help("shift+tab", "prev field"),
        }
    }
}

/// The duration entry form.
#[derive(Debug, Clone)]
pub struct Model {
    /// Fields ordered days, hours, minutes, seconds.
    pub fields: [Field; 4],
    /// Key bindings for moving between fields.
    pub keymap: KeyMap,
    /// Styling.
    pub styles: Styles,
    /// Hint shown under the fields.
    pub hint: String,
    /// Validation message from the last rejected submit.
    pub err: Option<String>,
    focus_index: usize,
}

impl Model {
    /// Creates a form prefilled with `defaults`, first field focused.
    pub fn new(defaults: DurationSpec) -> Self {
        let mut form = Self {
            fields: FIELD_LABELS.map(Field::new),
            keymap: KeyMap::default(),
            styles: Styles::default(),
            hint: "Enter a duration and press Enter. The input turns into circular countdowns."
                .to_string(),
            err: None,
            focus_index: 0,
        };
        form.fill(defaults);
        form.fields[0].focus();
        form
    }

    /// Overwrites every field with `spec`.
    pub fn fill(&mut self, spec: DurationSpec) {
        for (field, n) in self.fields.iter_mut().zip(spec.components()) {
            field.set_value(&n.to_string());
        }
    }

    /// Sets the raw text of field `index`. Out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set_value(value);
        }
    }

    /// The entered duration, coerced to non-negative integers.
    pub fn spec(&self) -> DurationSpec {
        let values = self.fields.each_ref().map(|f| f.value());
        DurationSpec::from_fields(values.each_ref().map(String::as_str))
    }

    /// Index of the focused field.
    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    /// Moves focus to field `index` (wrapping).
    pub fn focus_field(&mut self, index: usize) {
        self.fields[self.focus_index].blur();
        self.focus_index = index % self.fields.len();
        self.fields[self.focus_index].focus();
    }

    /// Handles field navigation and text editing.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.keymap.next_field.matches(key_msg) {
            self.focus_field(self.focus_index + 1);
        } else if self.keymap.prev_field.matches(key_msg) {
            self.focus_field(self.focus_index + self.fields.len() - 1);
        } else {
            self.fields[self.focus_index].handle_key(key_msg);
            self.err = None;
        }
        None
    }

    /// Renders labels, fields, hint and any validation message.
    pub fn view(&self) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|f| {
                let label = format!("  {:<width$}", f.label, width = FIELD_WIDTH);
                format!("{}\n{}", self.styles.label.render(&label), f.view(&self.styles))
            })
            .collect();
        let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let row = lipgloss::join_horizontal(lipgloss::TOP, &refs);

        let mut out = format!("{}\n\n{}", row, self.styles.hint.render(&self.hint));
        if let Some(err) = &self.err {
            out.push('\n');
            out.push_str(&self.styles.error.render(err));
        }
        out
    }
}

impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.keymap.next_field, &self.keymap.prev_field]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.keymap.next_field, &self.keymap.prev_field]]
    }
}
