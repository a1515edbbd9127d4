use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named group of key patterns, with a label suitable for a help line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }

    /// `"key desc"`, as shown in a status line.
    pub fn help(&self) -> String {
        format!("{} {}", self.help_key, self.help_desc)
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    // shift is already folded into the case of a character
    let ignore_shift = matches!(pattern.code, KeyCode::Char(_));
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers, ignore_shift)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers, ignore_shift: bool) -> bool {
    (ignore_shift || pattern.shift == event.shift)
        && pattern.ctrl == event.ctrl
        && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

/// Key bindings for [`crate::table::view::DataTableView`].
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub row_up: Binding,
    pub row_down: Binding,
    pub column_left: Binding,
    pub column_right: Binding,
    pub first_row: Binding,
    pub last_row: Binding,
    pub sort: Binding,
    pub toggle_row: Binding,
    pub clear_selection: Binding,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            row_up: Binding::new("↑/k", "up", vec![key(KeyCode::Up), key_char('k')]),
            row_down: Binding::new("↓/j", "down", vec![key(KeyCode::Down), key_char('j')]),
            column_left: Binding::new("←/h", "column", vec![key(KeyCode::Left), key_char('h')]),
            column_right: Binding::new("→/l", "column", vec![key(KeyCode::Right), key_char('l')]),
            first_row: Binding::new("Home", "first", vec![key(KeyCode::Home), key_char('g')]),
            last_row: Binding::new("End", "last", vec![key(KeyCode::End), key_char('G')]),
            sort: Binding::new("s", "sort", vec![key_char('s'), key(KeyCode::Enter)]),
            toggle_row: Binding::new("Space", "select", vec![key_char(' ')]),
            clear_selection: Binding::new("Esc", "clear", vec![key(KeyCode::Esc)]),
        }
    }
}

/// Key bindings for [`crate::field::InputField`].
#[derive(Clone, Debug)]
pub struct InputFieldBindings {
    pub clear: Binding,
    pub toggle_password: Binding,
}

impl Default for InputFieldBindings {
    fn default() -> Self {
        Self {
            clear: Binding::new("Esc", "clear", vec![key(KeyCode::Esc)]),
            toggle_password: Binding::new("^R", "show/hide", vec![key_ctrl('r')]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn shifted_chars_match_by_case() {
        let b = TableBindings::default();
        let shifted = key_char('G').with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        });
        assert!(b.last_row.matches(&shifted));
        assert!(!b.first_row.matches(&shifted));
    }

    #[test]
    fn default_table_sort_accepts_enter() {
        let b = TableBindings::default();
        assert!(b.sort.matches(&key(KeyCode::Enter)));
        assert!(b.sort.matches(&key_char('s')));
        assert_eq!(b.toggle_row.help(), "Space select");
    }
}
