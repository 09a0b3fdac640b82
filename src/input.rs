use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::App;
use crate::models::InputMode;
use crate::utils::{first_dropped_path, typed_path};

const PAGE: u16 = 5;

/// Handles one key press. Returns `Ok(false)` when the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(false);
    }

    // a notice blocks everything until dismissed
    if app.view.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.view.dismiss_notice();
        }
        return Ok(true);
    }

    match app.mode {
        InputMode::PathPrompt => handle_prompt_key(app, key.code),
        InputMode::Normal => return handle_normal_key(app, key.code),
    }
    Ok(true)
}

fn handle_prompt_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.path_input.push(c),
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Enter => {
            let path = typed_path(&app.path_input);
            app.close_prompt();
            if let Some(path) = path {
                app.select_path(&path);
            }
        }
        KeyCode::Esc => app.close_prompt(),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Char('o') => app.open_prompt(),
        KeyCode::Char('g') => {
            // the trigger is disabled while a request is outstanding
            if !app.view.is_submitting {
                app.submit();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.view.cursor_up();
            app.follow_cursor();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.view.cursor_down();
            app.follow_cursor();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.view.toggle_expanded();
            app.follow_cursor();
        }
        KeyCode::Char('r') => {
            app.view.reveal_expanded();
            app.follow_cursor();
        }
        KeyCode::PageUp => app.view.scroll_up(PAGE),
        KeyCode::PageDown => {
            let max = app.max_scroll();
            app.view.scroll_down(PAGE, max);
        }
        KeyCode::Char('c') => app.copy_report(),
        _ => {}
    }
    Ok(true)
}

/// Terminal drag-and-drop arrives as a bracketed paste of the file path(s).
/// Only the first path is used.
pub fn handle_paste(app: &mut App, text: &str) {
    debug!(len = text.len(), "paste received");
    if app.view.notice.is_some() {
        return;
    }
    let path = first_dropped_path(text);
    if app.mode == InputMode::PathPrompt {
        app.close_prompt();
    }
    if let Some(path) = path {
        app.select_path(&path);
    }
}
