pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;
pub mod toast_line;

use crate::app::AppState;
use crate::domain::Clock;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_active_modal;
use ratatui::Frame;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;
use toast_line::render_toast_line;

/// Main render function - draws the entire UI
pub fn render<C: Clock>(f: &mut Frame, app: &AppState<C>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
    render_task_pane(f, app, layout.tasks_area);
    render_toast_line(f, app, layout.toast_area);

    if app.task_form.is_some() {
        render_input_form(f, app, size);
    }
    render_active_modal(f, app, size);
}
