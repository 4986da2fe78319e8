use super::enums::SessionType;
use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::Display;

/// Static window title shown while the countdown is stopped
pub const APP_TITLE: &str = "Pomodesk";

/// Split a second count into (minutes, seconds)
pub fn seconds_to_time(total: u32) -> (u32, u32) {
    (total / 60, total % 60)
}

/// Zero-pad a clock component to two digits
pub fn format_display_time(value: u32) -> String {
    format!("{:02}", value)
}

/// Format remaining seconds as "MM:SS" (e.g., "25:00", "04:09")
pub fn format_countdown(total: u32) -> String {
    let (minutes, seconds) = seconds_to_time(total);
    format!("{}:{}", format_display_time(minutes), format_display_time(seconds))
}

/// Format accumulated task time as "Xs", "Ym Zs" or "Xh Ym Zs" (omits 0 parts above seconds)
pub fn format_time_spent(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }

    if seconds < 3600 {
        let minutes = seconds / 60;
        let rest = seconds % 60;
        return if rest > 0 {
            format!("{}m {}s", minutes, rest)
        } else {
            format!("{}m", minutes)
        };
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let rest = seconds % 60;

    let mut result = format!("{}h", hours);
    if minutes > 0 {
        result.push_str(&format!(" {}m", minutes));
    }
    if rest > 0 {
        result.push_str(&format!(" {}s", rest));
    }
    result
}

/// Window title: live countdown while running, static otherwise
pub fn window_title(session_type: SessionType, remaining: u32, running: bool) -> String {
    if running {
        format!("{} {}{}", APP_TITLE, session_type.icon(), format_countdown(remaining))
    } else {
        APP_TITLE.to_string()
    }
}

/// Wall clock as ("3:07 p.m.", "Saturday, 17 October 2026")
pub fn format_wall_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: Display,
{
    let hour = at.hour();
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour >= 12 { "p.m." } else { "a.m." };
    let time = format!("{}:{} {}", display_hour, format_display_time(at.minute()), period);
    let date = at.format("%A, %-d %B %Y").to_string();
    (time, date)
}
