use crate::app::AppState;
use crate::domain::format::format_time_spent;
use crate::domain::{progress_dots, status_badge, Clock, Task};
use crate::ui::styles::{
    alerted_style, border_style, default_style, done_style, dots_style, in_progress_style,
    muted_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list in the current sort order
pub fn render_task_pane<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let tasks = app.desk.tasks();
    let visible_rows = area.height.saturating_sub(2) as usize; // Subtract border
    let offset = scroll_offset(app.selected_index, tasks.len(), visible_rows);

    let title = if offset > 0 {
        format!(
            " Tasks ({}) · sort: {} [scrolled +{}] ",
            tasks.len(),
            tasks.sort_order().name(),
            offset
        )
    } else {
        format!(" Tasks ({}) · sort: {} ", tasks.len(), tasks.sort_order().name())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .sorted()
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(idx, task)| {
            let spent = app.desk.live_time_spent(task);
            let line = create_task_line(task, spent);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// First visible row so that the selected row stays on screen
fn scroll_offset(selected: usize, len: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || len <= visible_rows {
        return 0;
    }
    let offset = (selected + 1).saturating_sub(visible_rows);
    offset.min(len - visible_rows)
}

fn row_style(task: &Task) -> Style {
    if task.completed {
        done_style()
    } else if task.in_progress {
        in_progress_style()
    } else if task.alerted {
        alerted_style()
    } else {
        default_style()
    }
}

/// Format: ▶ Write proposal  ●●○  12m 5s
fn create_task_line(task: &Task, time_spent: u64) -> Line<'static> {
    let style = row_style(task);
    let mut spans = vec![
        Span::styled(format!("{} ", status_badge(task)), style),
        Span::styled(task.description.clone(), style),
        Span::raw("  "),
        Span::styled(progress_dots(task), dots_style()),
    ];
    if time_spent > 0 {
        spans.push(Span::styled(
            format!("  {}", format_time_spent(time_spent)),
            muted_style(),
        ));
    }
    if task.menu_toggled {
        spans.push(Span::styled("  ⋯", title_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let mut task = Task::new("Write proposal".to_string(), 3, false);
        task.pomodoro_counter = 1;
        task.in_progress = true;

        let line = create_task_line(&task, 725);
        assert_eq!(line_text(&line), "▶ Write proposal  ●○○  12m 5s");
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        // Everything fits
        assert_eq!(scroll_offset(4, 5, 10), 0);
        // Selection still inside the first page
        assert_eq!(scroll_offset(2, 20, 5), 0);
        assert_eq!(scroll_offset(4, 20, 5), 0);
        // Selection below the first page pins it to the last visible row
        assert_eq!(scroll_offset(5, 20, 5), 1);
        assert_eq!(scroll_offset(19, 20, 5), 15);
        // Stale selection past the end never scrolls beyond the list
        assert_eq!(scroll_offset(30, 20, 5), 15);
        assert_eq!(scroll_offset(3, 20, 0), 0);
    }

    #[test]
    fn test_create_task_line_without_time() {
        let task = Task::new("Read".to_string(), 1, false);
        let line = create_task_line(&task, 0);
        assert_eq!(line_text(&line), "· Read  ○");
    }
}
