//! Desktop notifications, best-effort.

use notify_rust::{Notification, Urgency};
use tracing::warn;

const APP_NAME: &str = "pomodesk";

fn build(summary: &str, body: &str, urgency: Urgency) -> Notification {
    let mut notification = Notification::new();
    notification
        .summary(summary)
        .body(body)
        .appname(APP_NAME)
        .icon("alarm-clock")
        .urgency(urgency);
    notification
}

/// Show on a helper thread; the D-Bus round trip must not hold up the countdown
fn send(notification: Notification) {
    std::thread::spawn(move || {
        if let Err(e) = notification.show() {
            warn!(error = %e, summary = %notification.summary, "desktop notification failed");
        }
    });
}

/// Announce a mode change ("Break Mode", "Work Mode", ...)
pub fn notify_mode(message: &str, icon: &str) {
    send(build(&format!("{} {}", icon, message), "Pomodesk", Urgency::Normal));
}

/// Send a notification when a task reaches its pomodoro target
pub fn notify_task_completed(description: &str) {
    send(build("Task completed", description, Urgency::Critical));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_sets_summary_and_body() {
        let notification = build("📚 Work Mode", "Pomodesk", Urgency::Normal);
        assert_eq!(notification.summary, "📚 Work Mode");
        assert_eq!(notification.body, "Pomodesk");
        assert_eq!(notification.appname, APP_NAME);
    }
}
