use crate::desk::ToastLevel;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Task being tracked
pub fn in_progress_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Task that reached its target but is still open
pub fn alerted_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Progress dots
pub fn dots_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Time spent column
pub fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Big countdown digits, colored by interval kind
pub fn countdown_style(on_break: bool) -> Style {
    let color = if on_break { Color::Green } else { Color::LightRed };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn quote_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Interval progress gauge
pub fn gauge_style(on_break: bool) -> Style {
    let color = if on_break { Color::Green } else { Color::LightRed };
    Style::default().fg(color).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

pub fn toast_style(level: ToastLevel) -> Style {
    match level {
        ToastLevel::Info => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ToastLevel::Success => Style::default().fg(Color::Green),
        ToastLevel::Failure => error_style(),
    }
}
