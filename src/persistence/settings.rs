use crate::domain::{DeskError, TimerLengths};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

pub const MIN_LENGTH_SECS: u32 = 60;
pub const MAX_LENGTH_SECS: u32 = 3600;
pub const LENGTH_STEP_SECS: u32 = 60;
pub const VOLUME_STEP: f32 = 0.1;

/// Sound played at interval ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSource {
    /// Bundled freedesktop sound through the platform player
    #[default]
    System,
    /// Terminal bell
    Bell,
    /// Custom sound file
    File(PathBuf),
}

impl AlarmSource {
    /// Next built-in source, for the settings form
    pub fn next(&self) -> Self {
        match self {
            AlarmSource::System => AlarmSource::Bell,
            AlarmSource::Bell | AlarmSource::File(_) => AlarmSource::System,
        }
    }
}

impl fmt::Display for AlarmSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmSource::System => write!(f, "system"),
            AlarmSource::Bell => write!(f, "bell"),
            AlarmSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for AlarmSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "system" => AlarmSource::System,
            "bell" => AlarmSource::Bell,
            path => AlarmSource::File(PathBuf::from(path)),
        })
    }
}

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pomodoro_length: u32,
    pub short_break_length: u32,
    pub long_break_length: u32,
    pub alarm: AlarmSource,
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let lengths = TimerLengths::default();
        Self {
            pomodoro_length: lengths.pomodoro,
            short_break_length: lengths.short_break,
            long_break_length: lengths.long_break,
            alarm: AlarmSource::default(),
            volume: 0.7,
        }
    }
}

impl Settings {
    pub fn lengths(&self) -> TimerLengths {
        TimerLengths {
            pomodoro: self.pomodoro_length,
            short_break: self.short_break_length,
            long_break: self.long_break_length,
        }
    }

    pub fn validate(&self) -> Result<(), DeskError> {
        validate_length("pomodoro", self.pomodoro_length)?;
        validate_length("short break", self.short_break_length)?;
        validate_length("long break", self.long_break_length)?;
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(DeskError::InvalidVolume);
        }
        Ok(())
    }
}

fn validate_length(name: &'static str, seconds: u32) -> Result<(), DeskError> {
    if seconds < MIN_LENGTH_SECS || seconds > MAX_LENGTH_SECS || seconds % LENGTH_STEP_SECS != 0 {
        return Err(DeskError::InvalidLength {
            name,
            seconds,
            min: MIN_LENGTH_SECS / 60,
            max: MAX_LENGTH_SECS / 60,
        });
    }
    Ok(())
}

/// Step a length by whole minutes, staying inside the allowed range
pub fn step_length(seconds: u32, up: bool) -> u32 {
    let stepped = if up {
        seconds.saturating_add(LENGTH_STEP_SECS)
    } else {
        seconds.saturating_sub(LENGTH_STEP_SECS)
    };
    stepped.clamp(MIN_LENGTH_SECS, MAX_LENGTH_SECS)
}

/// Step the volume by a tenth, staying inside 0.0..=1.0
pub fn step_volume(volume: f32, up: bool) -> f32 {
    let stepped = if up { volume + VOLUME_STEP } else { volume - VOLUME_STEP };
    (stepped.clamp(0.0, 1.0) * 10.0).round() / 10.0
}

/// Load settings; a missing file gives defaults, an invalid one is replaced by defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let Some(content) = super::read_file(path)? else {
        return Ok(Settings::default());
    };

    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;

    if let Err(e) = settings.validate() {
        warn!(error = %e, path = %path.display(), "invalid settings, using defaults");
        return Ok(Settings::default());
    }
    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    super::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lengths(), TimerLengths::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            pomodoro_length: 3000,
            alarm: AlarmSource::File(PathBuf::from("/tmp/ding.ogg")),
            volume: 0.3,
            ..Settings::default()
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"pomodoro_length": 600, "alarm": "bell"}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.pomodoro_length, 600);
        assert_eq!(settings.short_break_length, 300);
        assert_eq!(settings.alarm, AlarmSource::Bell);
    }

    #[test]
    fn test_out_of_range_settings_fall_back() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"pomodoro_length": 10}"#).unwrap();

        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_settings_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Settings::default().validate().is_ok());

        let odd = Settings {
            short_break_length: 90,
            ..Settings::default()
        };
        assert!(matches!(
            odd.validate(),
            Err(DeskError::InvalidLength { name: "short break", .. })
        ));

        let loud = Settings {
            volume: 1.5,
            ..Settings::default()
        };
        assert_eq!(loud.validate(), Err(DeskError::InvalidVolume));
    }

    #[test]
    fn test_step_length_and_volume() {
        assert_eq!(step_length(1500, true), 1560);
        assert_eq!(step_length(60, false), 60);
        assert_eq!(step_length(3600, true), 3600);

        assert_eq!(step_volume(0.7, true), 0.8);
        assert_eq!(step_volume(1.0, true), 1.0);
        assert_eq!(step_volume(0.0, false), 0.0);
    }

    #[test]
    fn test_alarm_source_parsing() {
        assert_eq!("system".parse::<AlarmSource>().unwrap(), AlarmSource::System);
        assert_eq!("bell".parse::<AlarmSource>().unwrap(), AlarmSource::Bell);
        assert_eq!(
            "/usr/share/sounds/x.oga".parse::<AlarmSource>().unwrap(),
            AlarmSource::File(PathBuf::from("/usr/share/sounds/x.oga"))
        );
        assert_eq!(AlarmSource::System.next(), AlarmSource::Bell);
    }
}
