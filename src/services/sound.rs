//! Begin and finish sounds played through an external audio player

use std::{
    fmt,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::{Child, Command};
use tracing::{debug, error, info};

/// The two cues the referee plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Begin,
    Finish,
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sound::Begin => f.write_str("begin"),
            Sound::Finish => f.write_str("finish"),
        }
    }
}

/// Launches the audio player and owns the process of the cue being played
///
/// Playback is best-effort: launch failures are logged and swallowed, and at
/// most one cue plays at a time. Dropping the player kills the current cue.
#[derive(Debug)]
pub struct SoundPlayer {
    executable: String,
    begin: PathBuf,
    finish: PathBuf,
    playing: Option<Child>,
}

impl SoundPlayer {
    pub fn new(executable: impl Into<String>, begin: impl Into<PathBuf>, finish: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            begin: begin.into(),
            finish: finish.into(),
            playing: None,
        }
    }

    pub fn path_for(&self, sound: Sound) -> &Path {
        match sound {
            Sound::Begin => &self.begin,
            Sound::Finish => &self.finish,
        }
    }

    /// Start playing `sound`, cutting off whatever was playing before
    pub fn play(&mut self, sound: Sound) {
        self.stop();

        match self.launch(self.path_for(sound)) {
            Ok(child) => {
                debug!("Playing {} sound (pid {:?})", sound, child.id());
                self.playing = Some(child);
            }
            Err(e) => {
                error!("Failed to play {} sound: {}", sound, e);
            }
        }
    }

    /// Kill the cue being played, if any, without waiting for it to exit
    pub fn stop(&mut self) {
        if let Some(mut child) = self.playing.take() {
            match child.start_kill() {
                Ok(()) => info!("Sound playback terminated"),
                Err(e) => debug!("Sound playback already over: {}", e),
            }
        }
    }

    /// Whether a cue process is still running
    pub fn is_playing(&mut self) -> bool {
        match self.playing.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn launch(&self, path: &Path) -> Result<Child, String> {
        Command::new(&self.executable)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to execute {} {}: {}", self.executable, path.display(), e))
    }
}
