//! UI-agnostic widget state
//!
//! The message log, the input field and the docked flag. None of these types
//! depend on a rendering backend; the terminal host and the HTML renderer both
//! read them.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Who wrote a message. Used for styling entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// A single chat entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Card>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::User,
            extra: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::Bot,
            extra: None,
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.extra = Some(card);
        self
    }
}

/// Position of an entry in the log. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub usize);

/// Append-only, ordered message log
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
    scroll_to_end: bool,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and asks the host to scroll so it is visible.
    pub fn append(&mut self, message: Message) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(message);
        self.scroll_to_end = true;
        id
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Message> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true once after each append.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_end)
    }

    pub fn into_entries(self) -> Vec<Message> {
        self.entries
    }
}

/// Cosmetic layout state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetUiState {
    pub docked: bool,
    /// Only ever set when the host has a hero banner.
    pub hero_collapsed: bool,
}

impl WidgetUiState {
    /// Enters the docked layout. Idempotent; there is no way back.
    pub fn dock(&mut self, has_hero: bool) {
        self.docked = true;
        if has_hero {
            self.hero_collapsed = true;
        }
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// The `q` text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    cursor: usize, // character index into value
    focused: bool,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_appends_are_distinct_entries() {
        let mut log = MessageLog::new();
        let a = log.append(Message::bot("hola"));
        let b = log.append(Message::bot("hola"));
        assert_ne!(a, b);
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(a), log.get(b));
    }

    #[test]
    fn test_append_requests_scroll_once() {
        let mut log = MessageLog::new();
        assert!(!log.take_scroll_request());
        log.append(Message::user("luke"));
        assert!(log.take_scroll_request());
        assert!(!log.take_scroll_request());
    }

    #[test]
    fn test_dock_never_reverts() {
        let mut ui = WidgetUiState::default();
        ui.dock(false);
        ui.dock(false);
        assert!(ui.docked);
        assert!(!ui.hero_collapsed);

        let mut ui = WidgetUiState::default();
        ui.dock(true);
        assert_eq!(ui, WidgetUiState { docked: true, hero_collapsed: true });
    }

    #[test]
    fn test_input_editing_is_utf8_safe() {
        let mut input = InputField::default();
        for c in "Año".chars() {
            input.insert(c);
        }
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "Ao");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "o");
        input.move_end();
        assert_eq!(input.cursor(), 1);
    }
}
