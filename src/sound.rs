use crate::desk::Cue;
use crate::persistence::{AlarmSource, Settings};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

const ALARM_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/sound-icons/guitar-11.wav",
    "/usr/share/sounds/generic.wav",
    "/System/Library/Sounds/Glass.aiff",
];

const NOTICE_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/message.oga",
    "/usr/share/sounds/freedesktop/stereo/bell.oga",
    "/System/Library/Sounds/Ping.aiff",
];

/// External player invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

/// Plays alarm and notice cues best-effort
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    source: AlarmSource,
    volume: f32,
}

impl SoundPlayer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            source: settings.alarm.clone(),
            volume: settings.volume,
        }
    }

    pub fn configure(&mut self, settings: &Settings) {
        self.source = settings.alarm.clone();
        self.volume = settings.volume;
    }

    pub fn play(&self, cue: Cue) {
        if self.volume <= 0.0 {
            return;
        }

        let file = match &self.source {
            AlarmSource::Bell => {
                ring_bell();
                return;
            }
            AlarmSource::File(path) if cue == Cue::Alarm => Some(path.clone()),
            AlarmSource::File(_) | AlarmSource::System => {
                let candidates = match cue {
                    Cue::Alarm => ALARM_SOUNDS,
                    Cue::Notice => NOTICE_SOUNDS,
                };
                first_existing(candidates)
            }
        };

        let Some(file) = file else {
            debug!(?cue, "no sound file available, ringing the bell");
            ring_bell();
            return;
        };

        let commands = player_commands(&file, self.volume);
        std::thread::spawn(move || {
            if run_players(&commands).is_none() {
                warn!(file = %file.display(), "could not play sound");
            }
        });
    }
}

/// Run players in order until one exits successfully; returns the one that did
fn run_players(commands: &[PlayerCommand]) -> Option<&'static str> {
    for command in commands {
        let status = Command::new(command.program)
            .args(&command.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => return Some(command.program),
            Ok(status) => debug!(program = command.program, %status, "sound player failed"),
            Err(e) => debug!(program = command.program, error = %e, "sound player unavailable"),
        }
    }
    None
}

fn first_existing(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        warn!(error = %e, "could not ring the terminal bell");
    }
}

/// Players to try for a file, in order
pub fn player_commands(file: &Path, volume: f32) -> Vec<PlayerCommand> {
    let path = file.display().to_string();
    if cfg!(target_os = "macos") {
        return vec![PlayerCommand {
            program: "afplay",
            args: vec!["-v".to_string(), format!("{:.1}", volume), path],
        }];
    }

    let pulse_volume = (volume.clamp(0.0, 1.0) * 65536.0).round() as u32;
    vec![
        PlayerCommand {
            program: "paplay",
            args: vec![format!("--volume={}", pulse_volume), path.clone()],
        },
        PlayerCommand {
            program: "aplay",
            args: vec!["-q".to_string(), path],
        },
    ]
}
