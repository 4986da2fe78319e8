use crate::app::AppState;
use crate::domain::{BreakKind, Clock, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_task_form_mode(app, key),
        UiMode::ContextMenu => handle_context_menu_mode(app, key),
        UiMode::ConfirmStart => handle_confirm_start_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_prompt(app, key, AppState::confirm_delete),
        UiMode::ConfirmClearAll => handle_confirm_prompt(app, key, AppState::confirm_clear_all),
        UiMode::Settings => handle_settings_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task(true);
            } else {
                app.move_selection_up();
            }
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task(false);
            } else {
                app.move_selection_down();
            }
        }

        // Countdown
        KeyCode::Char('s') | KeyCode::Char(' ') => app.toggle_countdown(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('1') => app.select_break(BreakKind::Short),
        KeyCode::Char('2') => app.select_break(BreakKind::Long),

        // Tasks
        KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') => app.start_edit_task(),
        KeyCode::Char('c') => app.toggle_selected_completed(),
        KeyCode::Char('m') => app.open_context_menu(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('o') => app.cycle_sort_order(),
        KeyCode::Char('x') => app.remove_completed(),
        KeyCode::Char('X') => app.request_clear_all(),

        KeyCode::Char(',') => app.open_settings(),

        KeyCode::Char('n') => app.reroll_quote(),
        KeyCode::Char('p') => app.toggle_quote_pin(),
        KeyCode::Char('[') => app.previous_quote(),
        KeyCode::Char(']') => app.next_quote(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add/edit task form
fn handle_task_form_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab | KeyCode::BackTab => app.task_form_toggle_field(),
        KeyCode::Backspace => app.task_form_backspace(),
        KeyCode::Up => app.task_form_adjust(true),
        KeyCode::Down => app.task_form_adjust(false),
        KeyCode::Char(c) => app.task_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a task's context menu is open
fn handle_context_menu_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('t') | KeyCode::Enter => app.menu_track(),
        KeyCode::Char('c') => app.menu_complete(),
        KeyCode::Char('e') => app.start_edit_task(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Esc | KeyCode::Char('m') => app.close_context_menu(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys on the "no tasks selected" prompt
fn handle_confirm_start_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_confirmation(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirmation(false),
        _ => {}
    }
    Ok(false)
}

/// Handle keys on a yes/no prompt for a destructive action
fn handle_confirm_prompt<C: Clock>(
    app: &mut AppState<C>,
    key: KeyEvent,
    confirm: fn(&mut AppState<C>),
) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => confirm(app),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_prompt(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the settings form
fn handle_settings_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.settings_select(true),
        KeyCode::Down | KeyCode::Char('j') => app.settings_select(false),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
            app.settings_adjust(true)
        }
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => app.settings_adjust(false),
        KeyCode::Char('r') => app.settings_restore_defaults(),
        KeyCode::Enter => app.submit_settings(),
        KeyCode::Esc => app.cancel_settings(),
        _ => {}
    }
    Ok(false)
}
