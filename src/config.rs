//! Configuration and CLI argument handling

use std::{fs, io, path::PathBuf};

use clap::Parser;

/// Window title shown in the terminal frame
pub const APPLICATION_TITLE: &str = "Coding Dojo Referee";

/// Fixed window geometry in terminal cells
pub const WINDOW_WIDTH: u16 = 40;
pub const WINDOW_HEIGHT: u16 = 9;

/// Duration of every session
pub const INITIAL_TIME: &str = "05:00";

/// Asset file names looked up inside the assets directory
pub const SOUND_BEGIN_FILE: &str = "begin.wav";
pub const SOUND_FINISH_FILE: &str = "finish.wav";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "dojo-referee")]
#[command(about = "A countdown referee for timed coding dojo sessions")]
#[command(version)]
pub struct Config {
    /// Audio player executable used for the begin and finish sounds
    #[arg(long, default_value = "aplay")]
    pub sound_player: String,

    /// Directory holding begin.wav and finish.wav
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Serve the HTTP remote control on this address (e.g. 127.0.0.1:20554)
    #[arg(long)]
    pub listen: Option<String>,

    /// Run without the terminal window and log display updates instead
    #[arg(long)]
    pub headless: bool,

    /// Log destination while the terminal window is active
    #[arg(long, default_value = "dojo-referee.log")]
    pub log_file: PathBuf,

    /// Log filter directives read at startup, one per line; `#` starts a comment
    #[arg(long, default_value = "logging.conf")]
    pub log_config: PathBuf,

    /// Enable verbose logging, ignoring the log configuration file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Filter used when no log configuration applies
    pub fn default_log_filter(&self) -> String {
        format!("dojo_referee={},tower_http=info", self.log_level())
    }

    /// Filter directive handed to the tracing subscriber
    ///
    /// Comes from the log configuration file when it exists and holds any
    /// directive; `--verbose` and a missing file fall back to the default.
    pub fn log_filter(&self) -> Result<String, String> {
        if self.verbose {
            return Ok(self.default_log_filter());
        }

        match fs::read_to_string(&self.log_config) {
            Ok(contents) => {
                let directives = parse_log_config(&contents);
                if directives.is_empty() {
                    Ok(self.default_log_filter())
                } else {
                    Ok(directives)
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.default_log_filter()),
            Err(e) => Err(format!(
                "Failed to read log configuration {}: {}",
                self.log_config.display(),
                e
            )),
        }
    }

    pub fn begin_sound(&self) -> PathBuf {
        self.assets_dir.join(SOUND_BEGIN_FILE)
    }

    pub fn finish_sound(&self) -> PathBuf {
        self.assets_dir.join(SOUND_FINISH_FILE)
    }
}

/// Join the non-comment lines of a log configuration into one filter string
fn parse_log_config(contents: &str) -> String {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
