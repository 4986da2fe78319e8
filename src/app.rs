use crate::desk::{Desk, DeskEvent, Toast, ToastLevel};
use crate::domain::{BreakKind, Clock, QuoteBoard, SystemClock, TaskId, UiMode, DESCRIPTION_LIMIT};
use crate::notifications;
use crate::persistence::{
    save_settings, save_tasks,
    settings::{step_length, step_volume},
    Settings,
};
use crate::sound::SoundPlayer;
use crate::ticker::Ticker;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Largest pomodoro target the task form offers
pub const MAX_POMODORO_TARGET: u32 = 99;

/// Add/edit task form
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFormState {
    /// Task being edited, None when adding
    pub editing: Option<TaskId>,
    pub description: String,
    pub pomodoro: u32,
    /// Lowest target the form accepts (the task's counter when editing)
    pub min_pomodoro: u32,
    pub editing_field: usize, // 0 = description, 1 = pomodoro target
    pub error: Option<String>,
}

impl TaskFormState {
    fn adding() -> Self {
        Self {
            editing: None,
            description: String::new(),
            pomodoro: 1,
            min_pomodoro: 1,
            editing_field: 0,
            error: None,
        }
    }

    pub fn increase_pomodoro(&mut self) {
        self.pomodoro = (self.pomodoro + 1).min(MAX_POMODORO_TARGET);
    }

    pub fn decrease_pomodoro(&mut self) {
        self.pomodoro = self.pomodoro.saturating_sub(1).max(self.min_pomodoro);
    }
}

/// Rows of the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Pomodoro,
    ShortBreak,
    LongBreak,
    Volume,
    Alarm,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Pomodoro,
        SettingsField::ShortBreak,
        SettingsField::LongBreak,
        SettingsField::Volume,
        SettingsField::Alarm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Pomodoro => "Pomodoro",
            SettingsField::ShortBreak => "Short break",
            SettingsField::LongBreak => "Long break",
            SettingsField::Volume => "Volume",
            SettingsField::Alarm => "Alarm",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsFormState {
    pub draft: Settings,
    pub selected: usize,
}

impl SettingsFormState {
    pub fn field(&self) -> SettingsField {
        SettingsField::ALL[self.selected % SettingsField::ALL.len()]
    }

    /// Step the selected row up or down
    pub fn adjust(&mut self, up: bool) {
        let field = self.field();
        let draft = &mut self.draft;
        match field {
            SettingsField::Pomodoro => draft.pomodoro_length = step_length(draft.pomodoro_length, up),
            SettingsField::ShortBreak => draft.short_break_length = step_length(draft.short_break_length, up),
            SettingsField::LongBreak => draft.long_break_length = step_length(draft.long_break_length, up),
            SettingsField::Volume => draft.volume = step_volume(draft.volume, up),
            SettingsField::Alarm => draft.alarm = draft.alarm.next(),
        }
    }
}

/// A toast on screen until `expires_at`
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub toast: Toast,
    pub expires_at: Instant,
}

/// Main application state
pub struct AppState<C: Clock = SystemClock> {
    pub desk: Desk<C>,
    pub settings: Settings,
    pub selected_index: usize, // Index into the sorted view
    pub ui_mode: UiMode,
    pub task_form: Option<TaskFormState>,
    pub settings_form: Option<SettingsFormState>,
    pub pending_delete: Option<TaskId>,
    pub toasts: Vec<ActiveToast>,
    pub ticker: Ticker,
    /// Time of the latest poll, used to stamp toasts
    pub last_tick: Instant,
    pub sound: SoundPlayer,
    pub quotes: QuoteBoard,
    pub needs_save: bool,
    pub settings_need_save: bool,
    /// Suppress sounds and desktop notifications
    pub quiet: bool,
    tasks_path: PathBuf,
    settings_path: PathBuf,
}

impl<C: Clock> AppState<C> {
    pub fn new(desk: Desk<C>, settings: Settings, tasks_path: PathBuf, settings_path: PathBuf) -> Self {
        let sound = SoundPlayer::new(&settings);
        Self {
            desk,
            settings,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            task_form: None,
            settings_form: None,
            pending_delete: None,
            toasts: Vec::new(),
            ticker: Ticker::new(),
            last_tick: Instant::now(),
            sound,
            quotes: QuoteBoard::default(),
            needs_save: false,
            settings_need_save: false,
            quiet: false,
            tasks_path,
            settings_path,
        }
    }

    pub fn with_quotes(mut self, quotes: QuoteBoard) -> Self {
        self.quotes = quotes;
        self
    }

    // ---- selection ----

    /// Id of the selected row in the sorted view
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.desk
            .tasks()
            .sorted()
            .get(self.selected_index)
            .map(|task| task.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.desk.tasks().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.desk.tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(index) = self.desk.tasks().sorted().iter().position(|t| t.id == id) {
            self.selected_index = index;
        }
    }

    /// Move the selected task one row up (or down) in the view
    pub fn move_task(&mut self, up: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let target_row = if up {
            match self.selected_index.checked_sub(1) {
                Some(row) => row,
                None => return,
            }
        } else {
            self.selected_index + 1
        };

        let tasks = self.desk.tasks();
        let Some(neighbor) = tasks.sorted().get(target_row).map(|t| t.id) else {
            return;
        };
        let (Some(from), Some(to)) = (tasks.position(id), tasks.position(neighbor)) else {
            return;
        };

        if self.desk.move_task(from, to) {
            self.select_task(id);
            self.needs_save = true;
        }
    }

    // ---- countdown ----

    pub fn toggle_countdown(&mut self) {
        let events = self.desk.toggle_countdown();
        self.apply_events(events);
        self.needs_save = true;
    }

    pub fn reset_timer(&mut self) {
        self.desk.reset();
        self.ticker.cancel();
        self.needs_save = true;
    }

    pub fn select_break(&mut self, kind: BreakKind) {
        let events = self.desk.select_break(kind);
        if events.is_empty() {
            self.push_toast(Toast::failure("Break length can only change while stopped"));
        }
        self.apply_events(events);
    }

    /// Answer the no-task prompt
    pub fn answer_confirmation(&mut self, start: bool) {
        if start {
            self.desk.confirm_start();
        } else {
            self.desk.decline_start();
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Drive the one-second countdown from the poll loop
    pub fn tick(&mut self, now: Instant) {
        self.last_tick = now;
        if self.desk.timer().has_started() {
            self.ticker.start(now);
        } else {
            self.ticker.cancel();
        }

        for _ in 0..self.ticker.due_ticks(now) {
            if !self.desk.timer().has_started() {
                break;
            }
            let events = self.desk.tick();
            if !events.is_empty() {
                self.needs_save = true;
                self.apply_events(events);
            }
        }

        if !self.desk.timer().has_started() {
            self.ticker.cancel();
        }
        self.expire_toasts(now);
    }

    /// Carry out the side effects reported by the desk
    pub fn apply_events(&mut self, events: Vec<DeskEvent>) {
        for event in events {
            match event {
                DeskEvent::Sound(cue) => {
                    if !self.quiet {
                        self.sound.play(cue);
                    }
                }
                DeskEvent::Toast(toast) => {
                    if !self.quiet && toast.level == ToastLevel::Info {
                        notifications::notify_mode(&toast.message, toast.icon);
                    }
                    self.push_toast(toast);
                }
                DeskEvent::DismissToasts => self.toasts.clear(),
                DeskEvent::ConfirmationRequested(reason) => {
                    debug!(?reason, "confirmation requested");
                    if matches!(self.ui_mode, UiMode::Normal | UiMode::ContextMenu) {
                        self.desk.close_menus();
                        self.ui_mode = UiMode::ConfirmStart;
                    }
                }
                DeskEvent::TaskCompleted(id) => {
                    if let Some(task) = self.desk.tasks().get(id) {
                        let description = task.description.clone();
                        if !self.quiet {
                            notifications::notify_task_completed(&description);
                        }
                        self.push_toast(Toast::success(format!("Completed: {}", description)));
                    }
                }
            }
        }
    }

    /// Back to the task list, or to a prompt still waiting for an answer
    fn return_to_normal(&mut self) {
        self.ui_mode = if self.desk.timer().pending_confirmation().is_some() {
            UiMode::ConfirmStart
        } else {
            UiMode::Normal
        };
    }

    // ---- toasts ----

    pub fn push_toast(&mut self, toast: Toast) {
        let expires_at = self.last_tick + toast.duration;
        self.toasts.push(ActiveToast { toast, expires_at });
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Most recent toast still on screen
    pub fn current_toast(&self) -> Option<&Toast> {
        self.toasts.last().map(|t| &t.toast)
    }

    // ---- tasks ----

    /// Enter: track or untrack the selected task
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.desk.toggle_task(id);
            self.needs_save = true;
        }
    }

    pub fn toggle_selected_completed(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.desk.toggle_completed(id);
            self.select_task(id);
            self.needs_save = true;
        }
    }

    pub fn open_context_menu(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.desk.open_menu(id);
            self.ui_mode = UiMode::ContextMenu;
        }
    }

    pub fn close_context_menu(&mut self) {
        self.desk.close_menus();
        self.return_to_normal();
    }

    /// Context menu: track/untrack, reopening a completed task
    pub fn menu_track(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.desk.track_from_menu(id);
            self.select_task(id);
            self.needs_save = true;
        }
        self.close_context_menu();
    }

    pub fn menu_complete(&mut self) {
        self.toggle_selected_completed();
        self.close_context_menu();
    }

    pub fn request_delete(&mut self) {
        self.desk.close_menus();
        if let Some(id) = self.selected_task_id() {
            self.pending_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.desk.remove_task(id);
            self.clamp_selection();
            self.needs_save = true;
        }
        self.return_to_normal();
    }

    pub fn request_clear_all(&mut self) {
        if !self.desk.tasks().is_empty() {
            self.ui_mode = UiMode::ConfirmClearAll;
        }
    }

    pub fn confirm_clear_all(&mut self) {
        self.desk.remove_all_tasks();
        self.selected_index = 0;
        self.needs_save = true;
        self.return_to_normal();
    }

    /// Close delete/clear prompts without acting
    pub fn cancel_prompt(&mut self) {
        self.pending_delete = None;
        self.return_to_normal();
    }

    pub fn remove_completed(&mut self) {
        let removed = self.desk.remove_completed_tasks();
        if removed > 0 {
            self.clamp_selection();
            self.needs_save = true;
            self.push_toast(Toast::success(format!("Removed {} completed task(s)", removed)));
        }
    }

    pub fn cycle_sort_order(&mut self) {
        let selected = self.selected_task_id();
        let order = self.desk.cycle_sort_order();
        if let Some(id) = selected {
            self.select_task(id);
        }
        self.needs_save = true;
        self.push_toast(Toast::success(format!("Sort order: {}", order.name())));
    }

    // ---- task form ----

    pub fn start_add_task(&mut self) {
        self.task_form = Some(TaskFormState::adding());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_edit_task(&mut self) {
        self.desk.close_menus();
        let Some(task) = self.selected_task_id().and_then(|id| self.desk.tasks().get(id)) else {
            return;
        };
        self.task_form = Some(TaskFormState {
            editing: Some(task.id),
            description: task.description.clone(),
            pomodoro: task.pomodoro,
            min_pomodoro: task.pomodoro_counter.max(1),
            editing_field: 0,
            error: None,
        });
        self.ui_mode = UiMode::EditingTask;
    }

    /// Toggle between description and target
    pub fn task_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.task_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn task_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                0 => {
                    if form.description.chars().count() < DESCRIPTION_LIMIT {
                        form.description.push(c);
                    }
                }
                _ => match c {
                    '+' | '=' => form.increase_pomodoro(),
                    '-' | '_' => form.decrease_pomodoro(),
                    _ => {}
                },
            }
        }
    }

    pub fn task_form_backspace(&mut self) {
        if let Some(form) = &mut self.task_form {
            if form.editing_field == 0 {
                form.description.pop();
            }
        }
    }

    pub fn task_form_adjust(&mut self, up: bool) {
        if let Some(form) = &mut self.task_form {
            if up {
                form.increase_pomodoro();
            } else {
                form.decrease_pomodoro();
            }
        }
    }

    /// Submit the form; validation failures keep it open
    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.take() else {
            return;
        };

        let result = match form.editing {
            Some(id) => self
                .desk
                .edit_task(id, &form.description, form.pomodoro)
                .map(|events| {
                    self.apply_events(events);
                    id
                }),
            None => self.desk.add_task(&form.description, form.pomodoro),
        };

        match result {
            Ok(id) => {
                self.select_task(id);
                self.needs_save = true;
                self.return_to_normal();
            }
            Err(e) => {
                self.push_toast(Toast::failure(e.to_string()));
                self.task_form = Some(TaskFormState {
                    error: Some(e.to_string()),
                    ..form
                });
            }
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.return_to_normal();
    }

    // ---- settings ----

    pub fn open_settings(&mut self) {
        if self.desk.timer().has_started() {
            self.push_toast(Toast::failure("Pause the timer to change settings"));
            return;
        }
        self.settings_form = Some(SettingsFormState {
            draft: self.settings.clone(),
            selected: 0,
        });
        self.ui_mode = UiMode::Settings;
    }

    pub fn settings_select(&mut self, up: bool) {
        if let Some(form) = &mut self.settings_form {
            let len = SettingsField::ALL.len();
            form.selected = if up {
                (form.selected + len - 1) % len
            } else {
                (form.selected + 1) % len
            };
        }
    }

    pub fn settings_adjust(&mut self, up: bool) {
        if let Some(form) = &mut self.settings_form {
            form.adjust(up);
        }
    }

    pub fn settings_restore_defaults(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.draft = Settings::default();
        }
    }

    pub fn submit_settings(&mut self) {
        let Some(form) = self.settings_form.take() else {
            return;
        };
        if let Err(e) = form.draft.validate() {
            self.push_toast(Toast::failure(e.to_string()));
            self.settings_form = Some(form);
            return;
        }
        if !self.desk.apply_lengths(form.draft.lengths()) {
            self.push_toast(Toast::failure("Pause the timer to change settings"));
            self.return_to_normal();
            return;
        }

        self.sound.configure(&form.draft);
        self.settings = form.draft;
        self.settings_need_save = true;
        info!(settings = ?self.settings, "settings updated");
        self.push_toast(Toast::success("Settings saved"));
        self.return_to_normal();
    }

    pub fn cancel_settings(&mut self) {
        self.settings_form = None;
        self.return_to_normal();
    }

    // ---- quotes ----

    /// Draw another quote unless one is pinned
    pub fn reroll_quote(&mut self) {
        if !self.quotes.reroll(&mut rand::thread_rng()) {
            self.push_toast(Toast::failure("Quote is pinned"));
        }
    }

    pub fn next_quote(&mut self) {
        self.quotes.next();
        self.needs_save |= self.quotes.is_pinned();
    }

    pub fn previous_quote(&mut self) {
        self.quotes.previous();
        self.needs_save |= self.quotes.is_pinned();
    }

    pub fn toggle_quote_pin(&mut self) {
        let message = if self.quotes.toggle_pin() {
            "Quote pinned"
        } else {
            "Quote unpinned"
        };
        debug!(index = self.quotes.index(), pinned = self.quotes.is_pinned(), "quote pin toggled");
        self.push_toast(Toast::success(message));
        self.needs_save = true;
    }

    // ---- persistence ----

    pub fn save(&mut self) -> Result<()> {
        save_tasks(&self.tasks_path, self.desk.tasks(), self.quotes)?;
        self.needs_save = false;
        if self.settings_need_save {
            save_settings(&self.settings_path, &self.settings)?;
            self.settings_need_save = false;
        }
        Ok(())
    }

    /// Credit open intervals and write everything out
    pub fn save_on_exit(&mut self) -> Result<()> {
        self.desk.flush_task_time();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::{SortOrder, TaskStore, TimerLengths};
    use crate::persistence::{load_settings, load_snapshot, load_tasks};
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_app(temp_dir: &TempDir) -> AppState<ManualClock> {
        let lengths = TimerLengths {
            pomodoro: 3,
            short_break: 2,
            long_break: 4,
        };
        let desk = Desk::new(lengths, TaskStore::default(), ManualClock::new());
        let mut app = AppState::new(
            desk,
            Settings::default(),
            temp_dir.path().join("tasks.json"),
            temp_dir.path().join("settings.json"),
        );
        app.quiet = true;
        app
    }

    fn add(app: &mut AppState<ManualClock>, description: &str) -> TaskId {
        app.start_add_task();
        for c in description.chars() {
            app.task_form_add_char(c);
        }
        app.submit_task_form();
        app.selected_task_id().unwrap()
    }

    #[test]
    fn test_app_state_new() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = create_test_app(&temp_dir);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.selected_task_id().is_none());
        assert!(!app.needs_save);
    }

    #[test]
    fn test_add_task_through_form() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);

        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        for c in "Write".chars() {
            app.task_form_add_char(c);
        }
        app.task_form_toggle_field();
        app.task_form_add_char('+');
        app.task_form_add_char('+');
        app.submit_task_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.task_form.is_none());
        let task = &app.desk.tasks().tasks()[0];
        assert_eq!(task.description, "Write");
        assert_eq!(task.pomodoro, 3);
        assert!(app.needs_save);
    }

    #[test]
    fn test_empty_description_keeps_form_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);

        app.start_add_task();
        app.task_form_add_char(' ');
        app.submit_task_form();

        assert_eq!(app.ui_mode, UiMode::AddingTask);
        let form = app.task_form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Please add a task"));
        assert_eq!(app.current_toast().unwrap().level, ToastLevel::Failure);
        assert!(app.desk.tasks().is_empty());
    }

    #[test]
    fn test_description_input_is_capped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        app.start_add_task();
        for _ in 0..150 {
            app.task_form_add_char('x');
        }
        assert_eq!(
            app.task_form.as_ref().unwrap().description.chars().count(),
            DESCRIPTION_LIMIT
        );
    }

    #[test]
    fn test_edit_form_never_goes_below_counter() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        let id = add(&mut app, "Write");
        app.task_form_adjust(true);

        app.start_edit_task();
        app.task_form_adjust(true);
        app.task_form_adjust(true);
        app.submit_task_form();
        assert_eq!(app.desk.tasks().get(id).unwrap().pomodoro, 3);

        app.toggle_selected();
        app.toggle_countdown();
        let start = Instant::now();
        app.tick(start);
        for second in 1..=3 {
            app.desk.clock().advance_secs(1);
            app.tick(start + Duration::from_secs(second));
        }
        assert_eq!(app.desk.tasks().get(id).unwrap().pomodoro_counter, 1);

        app.start_edit_task();
        let form = app.task_form.as_mut().unwrap();
        assert_eq!(form.min_pomodoro, 1);
        for _ in 0..5 {
            form.decrease_pomodoro();
        }
        assert_eq!(form.pomodoro, 1);
    }

    #[test]
    fn test_start_without_tasks_opens_prompt() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);

        app.toggle_countdown();
        assert_eq!(app.ui_mode, UiMode::ConfirmStart);

        app.answer_confirmation(false);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(!app.desk.timer().has_started());

        app.toggle_countdown();
        app.answer_confirmation(true);
        assert!(app.desk.timer().has_started());
    }

    #[test]
    fn test_tick_runs_one_step_per_second() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "Write");
        app.toggle_selected();
        app.toggle_countdown();

        let start = Instant::now();
        app.tick(start);
        assert_eq!(app.desk.timer().remaining(), 3);
        app.tick(start + Duration::from_millis(250));
        assert_eq!(app.desk.timer().remaining(), 3);
        app.tick(start + Duration::from_millis(1000));
        assert_eq!(app.desk.timer().remaining(), 2);

        app.toggle_countdown();
        app.tick(start + Duration::from_secs(5));
        assert_eq!(app.desk.timer().remaining(), 2);
        assert!(!app.ticker.is_active());
    }

    #[test]
    fn test_break_end_without_tasks_prompts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "Write");
        app.toggle_selected();
        app.toggle_countdown();

        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_secs(3));
        assert!(app.desk.timer().break_started());
        assert_eq!(app.current_toast().unwrap().message, "Break Mode");

        app.tick(start + Duration::from_secs(5));
        assert_eq!(app.ui_mode, UiMode::ConfirmStart);
        assert!(!app.desk.timer().has_started());
        assert_eq!(
            app.current_toast().unwrap().message,
            "Work Mode - waiting for confirmation"
        );
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_prompt_waits_behind_open_form() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        app.start_add_task();
        app.apply_events(vec![DeskEvent::ConfirmationRequested(
            crate::domain::ConfirmReason::NoTasksAfterBreak,
        )]);
        assert_eq!(app.ui_mode, UiMode::AddingTask);
    }

    #[test]
    fn test_toasts_expire() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        app.push_toast(Toast::success("saved"));
        app.expire_toasts(app.last_tick);
        assert_eq!(app.toasts.len(), 1);

        app.expire_toasts(app.last_tick + Duration::from_secs(4));
        assert!(app.current_toast().is_none());
    }

    #[test]
    fn test_delete_flow() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "a");
        add(&mut app, "b");

        app.move_selection_down();
        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        app.cancel_prompt();
        assert_eq!(app.desk.tasks().len(), 2);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.desk.tasks().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_clear_all_and_remove_completed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "a");
        add(&mut app, "b");
        app.toggle_selected_completed();

        app.remove_completed();
        assert_eq!(app.desk.tasks().len(), 1);

        app.request_clear_all();
        assert_eq!(app.ui_mode, UiMode::ConfirmClearAll);
        app.confirm_clear_all();
        assert!(app.desk.tasks().is_empty());
    }

    #[test]
    fn test_context_menu_track_reopens_completed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        let id = add(&mut app, "a");
        app.toggle_selected_completed();

        app.open_context_menu();
        assert_eq!(app.ui_mode, UiMode::ContextMenu);
        assert!(app.desk.tasks().get(id).unwrap().menu_toggled);

        app.menu_track();
        let task = app.desk.tasks().get(id).unwrap();
        assert!(task.in_progress);
        assert!(!task.completed);
        assert!(!task.menu_toggled);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_move_task_follows_view() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        let c = add(&mut app, "c");
        let b = add(&mut app, "b");
        let a = add(&mut app, "a");

        app.move_task(false);
        assert_eq!(app.selected_task_id(), Some(a));
        assert_eq!(app.selected_index, 1);
        let order: Vec<TaskId> = app.desk.tasks().tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![b, a, c]);

        app.move_selection_up();
        app.move_task(true);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_cycle_sort_keeps_selection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        let b = add(&mut app, "b");
        add(&mut app, "a");
        app.move_selection_down();
        app.toggle_selected_completed();

        app.cycle_sort_order();
        assert_eq!(app.desk.tasks().sort_order(), SortOrder::CompletedFirst);
        assert_eq!(app.selected_task_id(), Some(b));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_settings_blocked_while_running() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "a");
        app.toggle_selected();
        app.toggle_countdown();

        app.open_settings();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.settings_form.is_none());
    }

    #[test]
    fn test_settings_form_applies_lengths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);

        app.open_settings();
        assert_eq!(app.ui_mode, UiMode::Settings);
        app.settings_adjust(true);
        app.settings_select(false);
        app.settings_adjust(false);
        app.submit_settings();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.settings.pomodoro_length, 1560);
        assert_eq!(app.settings.short_break_length, 240);
        assert_eq!(app.desk.timer().remaining(), 1560);
        assert!(app.settings_need_save);
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        add(&mut app, "Write");
        app.open_settings();
        app.settings_restore_defaults();
        app.submit_settings();

        app.save_on_exit().unwrap();
        assert!(!app.needs_save);
        assert!(!app.settings_need_save);

        let tasks = load_tasks(temp_dir.path().join("tasks.json")).unwrap();
        assert_eq!(tasks.len(), 1);
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_pinned_quote_survives_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        app.next_quote();
        app.toggle_quote_pin();
        assert!(app.needs_save);
        assert_eq!(app.current_toast().map(|t| t.message.as_str()), Some("Quote pinned"));

        let pinned = app.quotes.index();
        app.reroll_quote();
        assert_eq!(app.quotes.index(), pinned);

        app.save().unwrap();
        let snapshot = load_snapshot(temp_dir.path().join("tasks.json")).unwrap();
        assert!(snapshot.quote.is_pinned());
        assert_eq!(snapshot.quote.index(), pinned);
    }

    #[test]
    fn test_unpinned_reroll_changes_quote() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(&temp_dir);
        let before = app.quotes.index();
        app.reroll_quote();
        assert_ne!(app.quotes.index(), before);
        assert!(!app.needs_save);
    }
}
