use crate::app::{AppState, SettingsField};
use crate::domain::{Clock, ConfirmReason, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw a bordered modal with the given lines
fn render_dialog(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.to_string(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn yes_no_line(yes: &'static str, no: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  [y]", modal_title_style()),
        Span::raw(format!(" {}  ", yes)),
        Span::styled("[n]", modal_title_style()),
        Span::raw(format!(" {}", no)),
    ])
}

const NO_TASKS_PROMPT: &str = "No tasks selected — start anyway?";

fn confirm_start_context(reason: Option<ConfirmReason>) -> &'static str {
    match reason {
        Some(ConfirmReason::NoTasksAfterBreak) => "The break is over.",
        _ => "Nothing is being tracked.",
    }
}

/// "No tasks selected" prompt before a session runs without tracking
pub fn render_confirm_start_modal<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let context = confirm_start_context(app.desk.timer().pending_confirmation());
    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", context)),
        Line::raw(format!("  {}", NO_TASKS_PROMPT)),
        Line::raw(""),
        yes_no_line("Start", "Cancel"),
    ];
    render_dialog(f, area, " ⏸ No Tasks Selected ", lines);
}

pub fn render_confirm_delete_modal<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let description = app
        .pending_delete
        .and_then(|id| app.desk.tasks().get(id))
        .map(|t| t.description.clone())
        .unwrap_or_default();
    let lines = vec![
        Line::raw(""),
        Line::raw("  Delete this task?"),
        Line::from(Span::styled(format!("  {}", description), modal_title_style())),
        Line::raw(""),
        yes_no_line("Delete", "Cancel"),
    ];
    render_dialog(f, area, " Delete Task ", lines);
}

pub fn render_confirm_clear_all_modal<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Remove all {} tasks?", app.desk.tasks().len())),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        yes_no_line("Clear all", "Cancel"),
    ];
    render_dialog(f, area, " Clear All Tasks ", lines);
}

/// Per-task actions
pub fn render_context_menu<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let Some(task) = app.selected_task_id().and_then(|id| app.desk.tasks().get(id)) else {
        return;
    };
    let track = if task.in_progress { " Untrack" } else { " Track" };
    let complete = if task.completed { " Reopen" } else { " Complete" };

    let entry = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  [{}]", key), modal_title_style()),
            Span::raw(label),
        ])
    };
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", task.description), modal_title_style())),
        Line::raw(""),
        entry("t", track),
        entry("c", complete),
        entry("e", " Edit"),
        entry("d", " Delete"),
        Line::raw(""),
        Line::from(Span::styled("  Esc to close", hint_style())),
    ];
    render_dialog(f, area, " Task ", lines);
}

pub fn render_settings_modal<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let Some(form) = &app.settings_form else {
        return;
    };
    let draft = &form.draft;

    let mut lines = vec![Line::raw("")];
    for (idx, field) in SettingsField::ALL.iter().enumerate() {
        let value = match field {
            SettingsField::Pomodoro => format!("{} min", draft.pomodoro_length / 60),
            SettingsField::ShortBreak => format!("{} min", draft.short_break_length / 60),
            SettingsField::LongBreak => format!("{} min", draft.long_break_length / 60),
            SettingsField::Volume => format!("{:.0}%", draft.volume * 100.0),
            SettingsField::Alarm => draft.alarm.to_string(),
        };
        let text = format!("  {:<12} ◀ {} ▶", field.label(), value);
        if idx == form.selected {
            lines.push(Line::from(Span::styled(text, selected_style())));
        } else {
            lines.push(Line::raw(text));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "  ↑/↓ select  ·  ←/→ change  ·  r defaults  ·  Enter save  ·  Esc cancel",
        hint_style(),
    )));
    render_dialog(f, area, " Settings ", lines);
}

/// Render whichever modal the current mode asks for
pub fn render_active_modal<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    match app.ui_mode {
        UiMode::ConfirmStart => render_confirm_start_modal(f, app, area),
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, area),
        UiMode::ConfirmClearAll => render_confirm_clear_all_modal(f, app, area),
        UiMode::ContextMenu => render_context_menu(f, app, area),
        UiMode::Settings => render_settings_modal(f, app, area),
        UiMode::Normal | UiMode::AddingTask | UiMode::EditingTask => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::Desk;
    use crate::domain::clock::ManualClock;
    use crate::domain::{TaskStore, TimerLengths};
    use crate::persistence::Settings;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_confirm_start_modal_wording() {
        let desk = Desk::new(TimerLengths::default(), TaskStore::default(), ManualClock::new());
        let mut app = AppState::new(
            desk,
            Settings::default(),
            PathBuf::from("tasks.json"),
            PathBuf::from("settings.json"),
        );
        app.desk.start();
        assert_eq!(
            app.desk.timer().pending_confirmation(),
            Some(ConfirmReason::NoTasksOnStart)
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| render_confirm_start_modal(f, &app, f.size()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("No tasks selected — start anyway?"));
        assert!(text.contains("Nothing is being tracked."));
    }

    #[test]
    fn test_confirm_start_context_after_break() {
        assert_eq!(
            confirm_start_context(Some(ConfirmReason::NoTasksAfterBreak)),
            "The break is over."
        );
    }
}
