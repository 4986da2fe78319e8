use super::enums::SortOrder;
use super::error::DeskError;
use super::task::{normalize_description, AccrualGate, Task, TaskId};
use chrono::{DateTime, Utc};

/// Ordered list of tasks plus the presentation sort order
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    sort_order: SortOrder,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>, sort_order: SortOrder) -> Self {
        Self { tasks, sort_order }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Add a task at the top of the list
    pub fn add_task(&mut self, description: &str, pomodoro: u32, during_break: bool) -> Result<TaskId, DeskError> {
        let description = normalize_description(description).ok_or(DeskError::EmptyDescription)?;
        let task = Task::new(description, pomodoro, during_break);
        let id = task.id;
        self.tasks.insert(0, task);
        Ok(id)
    }

    pub fn rename_task(&mut self, id: TaskId, new_name: &str) -> Result<(), DeskError> {
        let description = normalize_description(new_name).ok_or(DeskError::EmptyDescription)?;
        if let Some(task) = self.get_mut(id) {
            task.description = description;
        }
        Ok(())
    }

    /// Remove a task; unknown ids are ignored
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn remove_all_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Drop every completed task, returning how many went
    pub fn remove_completed_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    pub fn set_completed(&mut self, id: TaskId, flag: bool) {
        if let Some(task) = self.get_mut(id) {
            task.completed = flag;
        }
    }

    /// Start or stop accruing time for a task
    pub fn toggle_in_progress_state(&mut self, id: TaskId, flag: bool, gate: AccrualGate, now: DateTime<Utc>) {
        if let Some(task) = self.get_mut(id) {
            if flag {
                task.start_tracking(now);
            } else {
                task.stop_tracking(gate, now);
            }
        }
    }

    /// Credit open intervals of all in-progress tasks and restart them at `now`
    pub fn update_task_time(&mut self, gate: AccrualGate, now: DateTime<Utc>) {
        for task in &mut self.tasks {
            task.flush_interval(gate, now);
        }
    }

    /// Close open intervals but keep tasks in progress (countdown paused)
    pub fn suspend_tracking(&mut self, gate: AccrualGate, now: DateTime<Utc>) {
        for task in self.tasks.iter_mut().filter(|t| t.in_progress) {
            task.close_interval(gate, now);
        }
    }

    /// Re-stamp every in-progress task at `now`
    pub fn resume_tracking(&mut self, now: DateTime<Utc>) {
        for task in self.tasks.iter_mut().filter(|t| t.in_progress) {
            task.start_tracking(now);
        }
    }

    /// Stop every in-progress task, returning their ids
    pub fn stop_all_in_progress(&mut self, gate: AccrualGate, now: DateTime<Utc>) -> Vec<TaskId> {
        let mut stopped = Vec::new();
        for task in self.tasks.iter_mut().filter(|t| t.in_progress) {
            task.stop_tracking(gate, now);
            stopped.push(task.id);
        }
        stopped
    }

    pub fn in_progress_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().filter(|t| t.in_progress).map(|t| t.id).collect()
    }

    pub fn has_in_progress(&self) -> bool {
        self.tasks.iter().any(|t| t.in_progress)
    }

    /// Advance a task's pomodoro counter (clamped, alerts on reaching the target)
    pub fn set_pomodoro_counter(&mut self, id: TaskId) {
        if let Some(task) = self.get_mut(id) {
            task.advance_pomodoro();
        }
    }

    pub fn set_pomodoro(&mut self, id: TaskId, target: u32) {
        if let Some(task) = self.get_mut(id) {
            task.set_pomodoro(target);
        }
    }

    pub fn alert_task(&mut self, id: TaskId, flag: bool) {
        if let Some(task) = self.get_mut(id) {
            task.alerted = flag;
        }
    }

    /// Open or close a task's context menu; opening closes every other menu
    pub fn toggle_menu(&mut self, id: TaskId, flag: bool) {
        for task in &mut self.tasks {
            if task.id == id {
                task.menu_toggled = flag;
            } else if flag {
                task.menu_toggled = false;
            }
        }
    }

    pub fn close_menus(&mut self) {
        for task in &mut self.tasks {
            task.menu_toggled = false;
        }
    }

    /// Replace the list order wholesale (caller passes the complete reordered list)
    pub fn reorder_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Build the reordered copy for moving one task from `from` to `to`
    pub fn moved(&self, from: usize, to: usize) -> Option<Vec<Task>> {
        if from >= self.tasks.len() || to >= self.tasks.len() {
            return None;
        }
        let mut items = self.tasks.clone();
        let item = items.remove(from);
        items.insert(to, item);
        Some(items)
    }

    pub fn cycle_sort_order(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.next();
        self.sort_order
    }

    /// Tasks in presentation order (stable with respect to the stored order)
    pub fn sorted(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        match self.sort_order {
            SortOrder::Default => {}
            SortOrder::CompletedFirst => view.sort_by_key(|t| !t.completed),
            SortOrder::CompletedLast => view.sort_by_key(|t| t.completed),
        }
        view
    }

    /// Index of a task in the stored order
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn descriptions(store: &TaskStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn test_add_task_prepends() {
        let mut store = TaskStore::default();
        store.add_task("first", 1, false).unwrap();
        store.add_task("second", 2, false).unwrap();

        assert_eq!(descriptions(&store), vec!["second", "first"]);
        assert_eq!(store.tasks()[0].pomodoro, 2);
    }

    #[test]
    fn test_add_task_rejects_empty_description() {
        let mut store = TaskStore::default();
        assert_eq!(store.add_task("   ", 1, false), Err(DeskError::EmptyDescription));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_task_during_break_suppresses_first_advance() {
        let mut store = TaskStore::default();
        let id = store.add_task("late idea", 1, true).unwrap();
        assert!(store.get(id).unwrap().suppress_next_alert);
    }

    #[test]
    fn test_rename_task() {
        let mut store = TaskStore::default();
        let id = store.add_task("draft", 1, false).unwrap();

        store.rename_task(id, "final").unwrap();
        assert_eq!(store.get(id).unwrap().description, "final");

        assert_eq!(store.rename_task(id, ""), Err(DeskError::EmptyDescription));
        assert_eq!(store.get(id).unwrap().description, "final");
    }

    #[test]
    fn test_remove_missing_task_is_noop() {
        let mut store = TaskStore::default();
        let id = store.add_task("keep", 1, false).unwrap();
        store.remove_task(id);
        assert!(store.remove_task(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_completed_tasks() {
        let mut store = TaskStore::default();
        let a = store.add_task("a", 1, false).unwrap();
        store.add_task("b", 1, false).unwrap();
        let c = store.add_task("c", 1, false).unwrap();
        store.set_completed(a, true);
        store.set_completed(c, true);

        assert_eq!(store.remove_completed_tasks(), 2);
        assert_eq!(descriptions(&store), vec!["b"]);

        store.remove_all_tasks();
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_in_progress_state_accrues_only_with_open_gate() {
        let mut store = TaskStore::default();
        let id = store.add_task("focus", 1, false).unwrap();
        let start = Utc::now();

        store.toggle_in_progress_state(id, true, AccrualGate::session(), start);
        assert!(store.get(id).unwrap().in_progress);

        store.toggle_in_progress_state(id, false, AccrualGate::session(), start + Duration::seconds(42));
        let task = store.get(id).unwrap();
        assert_eq!(task.time_spent_seconds, 42);
        assert!(!task.in_progress);

        store.toggle_in_progress_state(id, true, AccrualGate::stopped(), start);
        store.toggle_in_progress_state(id, false, AccrualGate::stopped(), start + Duration::seconds(90));
        assert_eq!(store.get(id).unwrap().time_spent_seconds, 42);
    }

    #[test]
    fn test_parallel_tracking_accrues_for_all() {
        let mut store = TaskStore::default();
        let a = store.add_task("a", 1, false).unwrap();
        let b = store.add_task("b", 1, false).unwrap();
        let start = Utc::now();
        store.toggle_in_progress_state(a, true, AccrualGate::session(), start);
        store.toggle_in_progress_state(b, true, AccrualGate::session(), start);

        let stopped = store.stop_all_in_progress(AccrualGate::session(), start + Duration::seconds(5));
        assert_eq!(stopped.len(), 2);
        assert_eq!(store.get(a).unwrap().time_spent_seconds, 5);
        assert_eq!(store.get(b).unwrap().time_spent_seconds, 5);
        assert!(!store.has_in_progress());
    }

    #[test]
    fn test_suspend_and_resume_tracking() {
        let mut store = TaskStore::default();
        let id = store.add_task("a", 1, false).unwrap();
        let start = Utc::now();
        store.toggle_in_progress_state(id, true, AccrualGate::session(), start);

        store.suspend_tracking(AccrualGate::session(), start + Duration::seconds(7));
        let task = store.get(id).unwrap();
        assert!(task.in_progress);
        assert!(task.start_time.is_none());
        assert_eq!(task.time_spent_seconds, 7);

        let resumed_at = start + Duration::seconds(60);
        store.resume_tracking(resumed_at);
        assert_eq!(store.get(id).unwrap().start_time, Some(resumed_at));

        store.update_task_time(AccrualGate::session(), resumed_at + Duration::seconds(3));
        assert_eq!(store.get(id).unwrap().time_spent_seconds, 10);
    }

    #[test]
    fn test_set_pomodoro_counter_clamps() {
        let mut store = TaskStore::default();
        let id = store.add_task("a", 2, false).unwrap();
        for _ in 0..5 {
            store.set_pomodoro_counter(id);
        }
        let task = store.get(id).unwrap();
        assert_eq!(task.pomodoro_counter, 2);
        assert!(task.alerted);

        store.alert_task(id, false);
        assert!(!store.get(id).unwrap().alerted);
    }

    #[test]
    fn test_toggle_menu_closes_others() {
        let mut store = TaskStore::default();
        let a = store.add_task("a", 1, false).unwrap();
        let b = store.add_task("b", 1, false).unwrap();

        store.toggle_menu(a, true);
        store.toggle_menu(b, true);
        assert!(!store.get(a).unwrap().menu_toggled);
        assert!(store.get(b).unwrap().menu_toggled);

        store.close_menus();
        assert!(!store.get(b).unwrap().menu_toggled);
    }

    #[test]
    fn test_reorder_tasks_replaces_order() {
        let mut store = TaskStore::default();
        store.add_task("c", 1, false).unwrap();
        store.add_task("b", 1, false).unwrap();
        store.add_task("a", 1, false).unwrap();

        let moved = store.moved(0, 2).unwrap();
        store.reorder_tasks(moved);
        assert_eq!(descriptions(&store), vec!["b", "c", "a"]);

        assert!(store.moved(0, 3).is_none());
    }

    #[test]
    fn test_sorted_views_do_not_mutate_order() {
        let mut store = TaskStore::default();
        let c = store.add_task("c", 1, false).unwrap();
        store.add_task("b", 1, false).unwrap();
        let a = store.add_task("a", 1, false).unwrap();
        store.set_completed(c, true);
        store.set_completed(a, true);

        let names = |store: &TaskStore| -> Vec<String> {
            store.sorted().iter().map(|t| t.description.clone()).collect()
        };

        assert_eq!(names(&store), vec!["a", "b", "c"]);

        assert_eq!(store.cycle_sort_order(), SortOrder::CompletedFirst);
        assert_eq!(names(&store), vec!["a", "c", "b"]);

        assert_eq!(store.cycle_sort_order(), SortOrder::CompletedLast);
        assert_eq!(names(&store), vec!["b", "a", "c"]);

        assert_eq!(descriptions(&store), vec!["a", "b", "c"]);
        assert_eq!(store.cycle_sort_order(), SortOrder::Default);
    }
}
