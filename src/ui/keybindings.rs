use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" s start/pause   "),
        Span::raw("r reset   "),
        Span::raw("1/2 break   "),
        Span::raw("↑/↓ select   "),
        Span::raw("Shift+↑/↓ reorder   "),
        Span::raw("Enter track   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("c complete   "),
        Span::raw("m menu   "),
        Span::raw("d delete   "),
        Span::raw("o sort   "),
        Span::raw("x/X clear   "),
        Span::raw("n/p quote   "),
        Span::raw(", settings   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
