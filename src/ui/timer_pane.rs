use crate::app::AppState;
use crate::domain::format::format_countdown;
use crate::domain::{elapsed_percent, interval_label, Clock, CountdownState, QuoteBoard};
use crate::ui::styles::{
    border_style, countdown_style, default_style, gauge_style, hint_style, quote_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Render the countdown, its state and the selected break
pub fn render_timer_pane<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let timer = app.desk.timer();
    let on_break = timer.break_started();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", interval_label(timer)), title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Wall clock
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Details
            Constraint::Length(4), // Quote
        ])
        .split(inner);

    let (time, date) = app.desk.wall_clock();
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(time, title_style())),
        Line::from(Span::styled(date, hint_style())),
    ])
    .alignment(Alignment::Right);
    f.render_widget(clock, chunks[0]);

    let countdown = Paragraph::new(Line::from(Span::styled(
        format_countdown(timer.remaining()),
        countdown_style(on_break),
    )))
    .alignment(Alignment::Center);
    f.render_widget(countdown, chunks[2]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(on_break))
        .percent(elapsed_percent(timer))
        .label("");
    f.render_widget(gauge, chunks[4]);

    let state = match timer.countdown() {
        CountdownState::AwaitingConfirmation(_) => "WAITING FOR CONFIRMATION",
        other => other.label(),
    };
    let lengths = timer.lengths();
    let lines = vec![
        Line::from(vec![
            Span::styled("State:  ", title_style()),
            Span::styled(state, default_style()),
        ]),
        Line::from(vec![
            Span::styled("Break:  ", title_style()),
            Span::raw(format!(
                "{} ({} min)",
                timer.break_kind().name(),
                timer.current_break_length() / 60
            )),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            format!(
                "Focus {}m · Short {}m · Long {}m",
                lengths.pomodoro / 60,
                lengths.short_break / 60,
                lengths.long_break / 60
            ),
            hint_style(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[6]);

    let quote = Paragraph::new(quote_lines(&app.quotes))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(quote, chunks[7]);
}

fn quote_lines(board: &QuoteBoard) -> Vec<Line<'static>> {
    let quote = board.current();
    let pin = if board.is_pinned() { "📌 " } else { "" };
    vec![
        Line::from(Span::styled(format!("“{}”", quote.text), quote_style())),
        Line::from(Span::styled(format!("{}~ {}", pin, quote.author), hint_style())),
    ]
}
