use crate::domain::{QuoteBoard, SortOrder, Task, TaskStore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted task list stored in tasks.json, along with the quote pin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub quote: QuoteBoard,
}

impl TaskSnapshot {
    pub fn new(store: &TaskStore, quote: QuoteBoard) -> Self {
        Self {
            tasks: store.tasks().to_vec(),
            sort_order: store.sort_order(),
            quote,
        }
    }

    /// Rebuild the store; intervals never survive a restart, so open ones are dropped
    pub fn into_store(self) -> TaskStore {
        let tasks = self
            .tasks
            .into_iter()
            .map(|mut task| {
                task.start_time = None;
                task.pomodoro = task.pomodoro.max(1);
                task.pomodoro_counter = task.pomodoro_counter.min(task.pomodoro);
                task
            })
            .collect();
        TaskStore::new(tasks, self.sort_order)
    }
}

/// Load the whole snapshot; a missing or empty file gives an empty one
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<TaskSnapshot> {
    let path = path.as_ref();
    let Some(content) = super::read_file(path)? else {
        return Ok(TaskSnapshot::default());
    };
    if content.trim().is_empty() {
        return Ok(TaskSnapshot::default());
    }

    serde_json::from_str(&content).with_context(|| format!("Failed to parse tasks: {}", path.display()))
}

/// Load the task list alone
pub fn load_tasks<P: AsRef<Path>>(path: P) -> Result<TaskStore> {
    Ok(load_snapshot(path)?.into_store())
}

pub fn save_tasks<P: AsRef<Path>>(path: P, store: &TaskStore, quote: QuoteBoard) -> Result<()> {
    let json = serde_json::to_string_pretty(&TaskSnapshot::new(store, quote))?;
    super::atomic_write(path, &json)?;
    Ok(())
}
