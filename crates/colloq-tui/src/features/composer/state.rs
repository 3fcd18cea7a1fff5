//! Composer state.
//!
//! Manages the prompt line, command history, and history navigation.

use unicode_segmentation::UnicodeSegmentation;

/// Single-line prompt editor backing the composer box.
///
/// The cursor is a byte offset into `text`, always on a grapheme boundary.
#[derive(Debug, Default)]
pub struct ComposerState {
    text: String,
    cursor: usize,
    /// Submitted prompts, oldest first.
    pub history: Vec<String>,
    /// Index into history while navigating; `None` while editing.
    history_index: Option<usize>,
    /// Text stashed when history navigation starts, restored on the way back down.
    draft: Option<String>,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor byte offset into the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the text and places the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Clears the prompt line.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.reset_navigation();
    }

    /// Inserts a character at the cursor. Control characters are ignored.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Inserts a string at the cursor, flattening it to a single line.
    ///
    /// Newlines and tabs become spaces; other control characters are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let sanitized = sanitize_line(text);
        if sanitized.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor, &sanitized);
        self.cursor += sanitized.len();
    }

    /// Deletes the grapheme before the cursor.
    pub fn backspace(&mut self) {
        let start = self.prev_boundary();
        if start < self.cursor {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    /// Deletes the grapheme at the cursor.
    pub fn delete(&mut self) {
        let end = self.next_boundary();
        if end > self.cursor {
            self.text.replace_range(self.cursor..end, "");
        }
    }

    /// Deletes one segment to the left of the cursor.
    ///
    /// A segment is a maximal run of characters of the same class (word,
    /// punctuation, or whitespace), so `docs/report.pdf` deletes as
    /// `pdf`, `.`, `report`, `/`, `docs` rather than all at once.
    pub fn delete_word_back(&mut self) {
        let prefix = &self.text[..self.cursor];
        let Some(last) = prefix.chars().next_back() else {
            return;
        };

        let class = char_class(last);
        let mut start = self.cursor;
        for (idx, ch) in prefix.char_indices().rev() {
            if char_class(ch) == class {
                start = idx;
            } else {
                break;
            }
        }

        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Moves the cursor one segment to the left.
    pub fn move_word_left(&mut self) {
        let prefix = &self.text[..self.cursor];
        let Some(last) = prefix.chars().next_back() else {
            return;
        };

        let class = char_class(last);
        let mut start = self.cursor;
        for (idx, ch) in prefix.char_indices().rev() {
            if char_class(ch) == class {
                start = idx;
            } else {
                break;
            }
        }

        self.cursor = start;
    }

    /// Moves the cursor one segment to the right.
    pub fn move_word_right(&mut self) {
        let suffix = &self.text[self.cursor..];
        let Some(first) = suffix.chars().next() else {
            return;
        };

        let class = char_class(first);
        let mut end = self.cursor;
        for (idx, ch) in suffix.char_indices() {
            if char_class(ch) == class {
                end = self.cursor + idx + ch.len_utf8();
            } else {
                break;
            }
        }

        self.cursor = end;
    }

    /// Deletes from the start of the line to the cursor (unix line-kill).
    pub fn kill_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    /// Deletes from the cursor to the end of the line.
    pub fn kill_to_end(&mut self) {
        self.text.truncate(self.cursor);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn cursor_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Records a submitted prompt and leaves navigation detached.
    pub fn push_history(&mut self, text: String) {
        self.history.push(text);
        self.reset_navigation();
    }

    /// Resets history navigation state.
    pub fn reset_navigation(&mut self) {
        self.history_index = None;
        self.draft = None;
    }

    /// Navigates up in prompt history.
    pub fn navigate_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        if self.history_index.is_none() {
            let current = self.text.clone();
            self.draft = Some(current);
            self.history_index = Some(self.history.len() - 1);
        } else if let Some(idx) = self.history_index
            && idx > 0
        {
            self.history_index = Some(idx - 1);
        }

        if let Some(idx) = self.history_index
            && let Some(entry) = self.history.get(idx).cloned()
        {
            self.set_text(&entry);
        }
    }

    /// Navigates down in prompt history.
    pub fn navigate_down(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 < self.history.len() {
            self.history_index = Some(idx + 1);
            if let Some(entry) = self.history.get(idx + 1).cloned() {
                self.set_text(&entry);
            }
        } else {
            let draft = self.draft.take().unwrap_or_default();
            self.history_index = None;
            self.set_text(&draft);
        }
    }

    /// Byte offset of the grapheme boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(idx, _)| idx)
    }

    /// Byte offset of the grapheme boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }
}

/// Flattens pasted text to a single line.
fn sanitize_line(text: &str) -> String {
    text.chars()
        .filter_map(|ch| match ch {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}
