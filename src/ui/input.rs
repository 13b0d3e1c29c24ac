//! # Key Handling
//!
//! Maps key presses to [`App`] operations. Work that has to await (importing
//! a file) or touch the user config (saving the theme) is handed back to the
//! event loop as a [`Command`].

use crate::ui::app::{App, Mode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// Follow-up work for the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read and import this file
    Import(PathBuf),
    /// The theme changed; persist it
    SaveTheme(&'static str),
}

/// Apply one key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<Option<Command>> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(None);
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return Ok(None);
    }

    match app.mode {
        Mode::Browse => handle_browse_key(app, key),
        Mode::AddQuote => handle_form_key(app, key).map(|()| None),
        Mode::Import | Mode::Export => handle_prompt_key(app, key),
    }
}

/// Ctrl and Alt combinations are commands, never text
fn is_chord(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_browse_key(app: &mut App, key: KeyEvent) -> Result<Option<Command>> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => app.show_random_quote()?,
        KeyCode::Down | KeyCode::Char('j') => app.next_category()?,
        KeyCode::Up | KeyCode::Char('k') => app.previous_category()?,
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('o') => app.open_import_prompt(),
        KeyCode::Char('e') => app.open_export_prompt(),
        KeyCode::Char('t') => return Ok(Some(Command::SaveTheme(app.cycle_theme()))),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Esc => app.dismiss_notice(),
        _ => {}
    }
    Ok(None)
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.close_prompt(),
        KeyCode::Tab | KeyCode::BackTab => app.form.toggle_focus(),
        KeyCode::Enter => {
            if app.add_quote()? {
                app.close_prompt();
            }
        }
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) if !is_chord(&key) => app.form.focused_mut().push(c),
        _ => {}
    }
    Ok(())
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) -> Result<Option<Command>> {
    match key.code {
        KeyCode::Esc => app.close_prompt(),
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) if !is_chord(&key) => app.path_input.push(c),
        KeyCode::Enter => {
            let input = app.path_input.trim().to_string();
            if app.mode == Mode::Import {
                // no file chosen: nothing to do
                if input.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(Command::Import(PathBuf::from(input))));
            }

            let target = if input.is_empty() {
                app.export_file.clone()
            } else {
                input
            };
            if app.export_to_json_file(&PathBuf::from(target)) {
                app.close_prompt();
            }
        }
        _ => {}
    }
    Ok(None)
}
