use crate::app::AppState;
use crate::domain::{Clock, DESCRIPTION_LIMIT};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit task form
pub fn render_input_form<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    if let Some(form) = &app.task_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = Vec::new();

        // Description field
        lines.push(Line::raw(""));
        let description_label = if form.editing_field == 0 {
            format!(
                "Description ({}/{}): (editing)",
                form.description.chars().count(),
                DESCRIPTION_LIMIT
            )
        } else {
            "Description:".to_string()
        };
        lines.push(Line::raw(description_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.description.clone(), modal_title_style()),
            if form.editing_field == 0 {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
        lines.push(Line::raw(""));

        // Pomodoro target field
        let target_label = if form.editing_field == 1 {
            "Pomodoros: (editing, ↑/↓ or +/-)"
        } else {
            "Pomodoros:"
        };
        lines.push(Line::raw(target_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.pomodoro.to_string(), modal_title_style()),
            Span::raw(format!("  {}", "●".repeat(form.pomodoro.min(20) as usize))),
        ]));
        lines.push(Line::raw(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.clone(), error_style())));
            lines.push(Line::raw(""));
        }

        lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
