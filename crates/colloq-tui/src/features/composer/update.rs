//! Keyboard handling for the prompt composer.
//!
//! Keys are claimed in groups: readline editing first, then transcript
//! scrolling, cursor and history movement, app commands, and finally plain
//! typing. Whatever nothing claims falls through to text entry.

use colloq_core::exchange::events::ids;
use colloq_core::exchange::{ElementId, ExchangeRequest};
use colloq_core::message::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::ComposerState;
use crate::effects::UiEffect;
use crate::mutations::{MessagesMutation, StateMutation};
use crate::overlays::OverlayRequest;

/// Effects to run, mutations to apply, and an overlay the key asked to open.
type KeyOutcome = (Vec<UiEffect>, Vec<StateMutation>, Option<OverlayRequest>);

/// App-level state the composer consults when deciding what a key does.
pub struct ComposerContext {
    pub exchange_running: bool,
    pub chat_submit_enabled: bool,
}

/// Pasted text goes straight into the prompt at the cursor.
pub fn handle_paste(composer: &mut ComposerState, text: &str) {
    composer.reset_navigation();
    composer.insert_str(text);
}

/// Resolves one key press into its outcome. Overlay keys never reach here.
pub fn handle_main_key(
    composer: &mut ComposerState,
    ctx: &ComposerContext,
    key: KeyEvent,
) -> KeyOutcome {
    // The first group to claim the key wins.
    handle_editing(composer, key)
        .or_else(|| handle_scrolling(key))
        .or_else(|| handle_cursor(composer, key))
        .or_else(|| handle_commands(composer, ctx, key))
        .unwrap_or_else(|| handle_typing(composer, key))
}

/// A key that was claimed but produced no effects.
fn consumed() -> Option<KeyOutcome> {
    Some((vec![], vec![], None))
}

fn scroll(mutation: MessagesMutation) -> Option<KeyOutcome> {
    Some((vec![], vec![StateMutation::Messages(mutation)], None))
}

/// Readline-style line and word editing.
fn handle_editing(composer: &mut ComposerState, key: KeyEvent) -> Option<KeyOutcome> {
    let mods = key.modifiers;
    match key.code {
        KeyCode::Char('a') if mods == KeyModifiers::CONTROL => {
            composer.cursor_home();
            consumed()
        }
        KeyCode::Char('e') if mods == KeyModifiers::CONTROL => {
            composer.cursor_end();
            consumed()
        }
        KeyCode::Char('u') if mods == KeyModifiers::CONTROL => {
            composer.reset_navigation();
            composer.kill_to_start();
            consumed()
        }
        KeyCode::Char('k') if mods == KeyModifiers::CONTROL => {
            composer.reset_navigation();
            composer.kill_to_end();
            consumed()
        }
        KeyCode::Char('w') if mods == KeyModifiers::CONTROL => {
            composer.reset_navigation();
            composer.delete_word_back();
            consumed()
        }
        // Option+Delete reaches the terminal as Alt+Backspace on macOS.
        KeyCode::Backspace if mods == KeyModifiers::ALT => {
            composer.reset_navigation();
            composer.delete_word_back();
            consumed()
        }
        KeyCode::Char('b') | KeyCode::Left if mods == KeyModifiers::ALT => {
            composer.move_word_left();
            consumed()
        }
        KeyCode::Char('f') | KeyCode::Right if mods == KeyModifiers::ALT => {
            composer.move_word_right();
            consumed()
        }
        _ => None,
    }
}

/// Transcript scrolling from the main screen.
fn handle_scrolling(key: KeyEvent) -> Option<KeyOutcome> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::PageUp => scroll(MessagesMutation::PageUp),
        KeyCode::PageDown => scroll(MessagesMutation::PageDown),
        KeyCode::Home if ctrl => scroll(MessagesMutation::ScrollToTop),
        KeyCode::End if ctrl => scroll(MessagesMutation::ScrollToBottom),
        _ => None,
    }
}

/// Cursor movement within the prompt, plus history recall on Up/Down.
fn handle_cursor(composer: &mut ComposerState, key: KeyEvent) -> Option<KeyOutcome> {
    let mods = key.modifiers;
    match key.code {
        KeyCode::Home => {
            composer.cursor_home();
            consumed()
        }
        KeyCode::End => {
            composer.cursor_end();
            consumed()
        }
        // Command+arrow jumps to the line edges on macOS.
        KeyCode::Left if mods == KeyModifiers::SUPER => {
            composer.cursor_home();
            consumed()
        }
        KeyCode::Right if mods == KeyModifiers::SUPER => {
            composer.cursor_end();
            consumed()
        }
        KeyCode::Up if mods.is_empty() => {
            composer.navigate_up();
            consumed()
        }
        KeyCode::Down if mods.is_empty() => {
            composer.navigate_down();
            consumed()
        }
        KeyCode::Left if mods.is_empty() => {
            composer.cursor_left();
            consumed()
        }
        KeyCode::Right if mods.is_empty() => {
            composer.cursor_right();
            consumed()
        }
        _ => None,
    }
}

/// Keys that act on the app rather than on the prompt text.
fn handle_commands(
    composer: &mut ComposerState,
    ctx: &ComposerContext,
    key: KeyEvent,
) -> Option<KeyOutcome> {
    let mods = key.modifiers;
    match key.code {
        // Ctrl+C wipes a non-empty prompt; on an empty prompt it quits.
        KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => {
            if composer.is_empty() {
                Some((vec![UiEffect::Quit], vec![], None))
            } else {
                composer.clear();
                consumed()
            }
        }
        KeyCode::Esc => {
            composer.clear();
            consumed()
        }
        KeyCode::Char('o') if mods == KeyModifiers::CONTROL => {
            Some((vec![], vec![], Some(OverlayRequest::Upload)))
        }
        KeyCode::Enter if !mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Some(submit_prompt(composer, ctx))
        }
        _ => None,
    }
}

/// Anything left over is text entry.
fn handle_typing(composer: &mut ComposerState, key: KeyEvent) -> KeyOutcome {
    let mods = key.modifiers;
    match key.code {
        // Literal tabs render unevenly in the prompt line; insert spaces.
        KeyCode::Tab => composer.insert_str("    "),
        KeyCode::Backspace => {
            composer.reset_navigation();
            composer.backspace();
        }
        KeyCode::Delete => {
            composer.reset_navigation();
            composer.delete();
        }
        KeyCode::Char(ch)
            if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            composer.reset_navigation();
            composer.insert_char(ch);
        }
        _ => {}
    }
    (vec![], vec![], None)
}

/// Builds the outcome for Enter.
///
/// Nothing is sent while the send button is disabled or another exchange is
/// already in flight; the prompt stays in the composer.
fn submit_prompt(composer: &mut ComposerState, ctx: &ComposerContext) -> KeyOutcome {
    if ctx.exchange_running || !ctx.chat_submit_enabled {
        return (vec![], vec![], None);
    }

    let text = composer.text().to_string();
    if text.trim().is_empty() {
        return (vec![], vec![], None);
    }

    composer.push_history(text.clone());
    composer.clear();

    (
        vec![UiEffect::StartExchange {
            request: ExchangeRequest::Chat {
                elt: ElementId::from(ids::CHAT_FORM),
                prompt: text.clone(),
            },
        }],
        vec![StateMutation::Messages(MessagesMutation::Append(
            Message::human(text),
        ))],
        None,
    )
}
