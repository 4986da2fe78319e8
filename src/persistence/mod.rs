pub mod files;
pub mod settings;
pub mod snapshot;

pub use files::{
    atomic_write, ensure_desk_dir, init_local_desk, log_dir, read_file, settings_file,
    tasks_file,
};
pub use settings::{load_settings, save_settings, AlarmSource, Settings};
pub use snapshot::{load_snapshot, load_tasks, save_tasks};
