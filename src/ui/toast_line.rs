use crate::app::AppState;
use crate::domain::Clock;
use crate::ui::styles::toast_style;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

/// Render the newest toast, if any
pub fn render_toast_line<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    if let Some(toast) = app.current_toast() {
        let text = format!(" {} {}", toast.icon, toast.message);
        f.render_widget(Paragraph::new(Span::styled(text, toast_style(toast.level))), area);
    }
}
