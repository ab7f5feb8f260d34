//! Type-safe key bindings.
//!
//! A [`Binding`] groups the key presses that trigger one action together with
//! the text shown for it in the help line. Bindings can be disabled, which
//! both stops them from matching and hides them from help.
//!
//! ```rust
//! use countdown_rings::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let quit = Binding::new(vec![KeyCode::Char('q')])
//!     .with_help("q", "quit");
//! let force_quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+c", "quit");
//!
//! assert_eq!(quit.help().desc, "quit");
//! assert!(force_quit.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Whether `msg` is this key press.
    ///
    /// Shift is ignored for character keys, since terminals report it
    /// inconsistently for shifted characters.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        match self.code {
            KeyCode::Char(_) => {
                self.modifiers.difference(KeyModifiers::SHIFT)
                    == msg.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => self.modifiers == msg.modifiers,
        }
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key as shown, e.g. `"esc"`.
    pub key: String,
    /// What it does.
    pub desc: String,
}

/// A set of keys bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an enabled binding for `keys` with no help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces only the description, keeping the key text.
    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.help.desc = desc.into();
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Keys bound.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Whether `msg` triggers any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Bindings a component exposes to the help view.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings for the expanded help, one inner `Vec` per column.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_binding_matches() {
        let pause = Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')]);

        assert!(pause.matches(&key(KeyCode::Char(' '))));
        assert!(pause.matches(&key(KeyCode::Char('p'))));
        assert!(!pause.matches(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_modifiers_must_match() {
        let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);

        assert!(!quit.matches(&key(KeyCode::Char('c'))));
        assert!(quit.matches(&KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_shift_ignored_for_characters() {
        let help = Binding::new(vec![KeyCode::Char('?')]);
        assert!(help.matches(&KeyMsg {
            key: KeyCode::Char('?'),
            modifiers: KeyModifiers::SHIFT,
        }));

        let back = Binding::new(vec![KeyCode::Tab]);
        assert!(!back.matches(&KeyMsg {
            key: KeyCode::Tab,
            modifiers: KeyModifiers::SHIFT,
        }));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut reset = Binding::new(vec![KeyCode::Esc]).with_help("esc", "reset");
        reset.set_enabled(false);

        assert!(!reset.enabled());
        assert!(!reset.matches(&key(KeyCode::Esc)));

        reset.set_enabled(true);
        assert!(reset.matches(&key(KeyCode::Esc)));
    }

    #[test]
    fn test_empty_binding_is_disabled() {
        let empty = Binding::new(Vec::<KeyCode>::new());
        assert!(!empty.enabled());
    }

    #[test]
    fn test_matches_any() {
        let a = Binding::new(vec![KeyCode::Char('a')]);
        let b = Binding::new(vec![KeyCode::Char('b')]);

        assert!(matches(&key(KeyCode::Char('b')), &[&a, &b]));
        assert!(!matches(&key(KeyCode::Char('c')), &[&a, &b]));
    }

    #[test]
    fn test_set_desc() {
        let mut pause = Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "pause");
        pause.set_desc("resume");
        assert_eq!(pause.help().key, "space");
        assert_eq!(pause.help().desc, "resume");
    }
}
