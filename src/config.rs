// Startup configuration. The project dir comes from the command line; the rest
// can be overridden in <project_dir>/.beatgrid/config.json, any field optional.
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::pipeline::persistence::BEATGRID_DIR;
use crate::shared::{DEFAULT_FRAME_RATE, DEFAULT_RATE, DEFAULT_STEPS};

const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub label: String,
    pub sample: String, // file name inside the sample dir
}

impl Instrument {
    fn new(label: &str, sample: &str) -> Self {
        Self { label: label.to_owned(), sample: sample.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub project_dir: PathBuf,
    // relative paths are taken from the project dir
    pub sample_dir: PathBuf,
    pub frame_rate: u32,
    pub steps: usize,
    pub rate: u32,
    pub instruments: Vec<Instrument>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::new(),
            sample_dir: PathBuf::from("sounds"),
            frame_rate: DEFAULT_FRAME_RATE,
            steps: DEFAULT_STEPS,
            rate: DEFAULT_RATE,
            instruments: vec![
                Instrument::new("Hi Hat", "hi_hat.wav"),
                Instrument::new("Snare", "snare.wav"),
                Instrument::new("Bass Drum", "kick.wav"),
                Instrument::new("Crash", "crash.wav"),
                Instrument::new("Clap", "clap.wav"),
                Instrument::new("Floor Tom", "tom.wav"),
            ],
        }
    }
}

impl Config {
    /// `beatgrid [PROJECT_DIR]`, defaulting to the current directory.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let project_dir = match args.nth(1) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("no current directory")?,
        };
        Self::load(&project_dir)
    }

    pub fn load(project_dir: &Path) -> anyhow::Result<Self> {
        let path = config_file_path(project_dir);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str::<Config>(&data)
                .with_context(|| format!("bad config file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("could not read {}", path.display()));
            }
        };
        config.project_dir = project_dir.to_path_buf();
        if config.instruments.is_empty() {
            anyhow::bail!("{} lists no instruments", path.display());
        }
        Ok(config)
    }

    pub fn sample_dir(&self) -> PathBuf {
        self.project_dir.join(&self.sample_dir)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.project_dir.join(BEATGRID_DIR)
    }

    pub fn sample_path(&self, instrument: &Instrument) -> PathBuf {
        self.sample_dir().join(&instrument.sample)
    }

    pub fn voice_budget(&self) -> usize {
        self.instruments.len() * crate::shared::VOICES_PER_INSTRUMENT
    }
}

// <project_dir>/.beatgrid/config.json
fn config_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(BEATGRID_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_fixture::ScratchDir;

    fn scratch_dir(tag: &str) -> ScratchDir {
        let dir = ScratchDir::new(&format!("config-{tag}"));
        std::fs::create_dir_all(dir.path().join(BEATGRID_DIR)).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_six_piece_kit() {
        let dir = scratch_dir("defaults");
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.instruments.len(), 6);
        assert_eq!(config.instruments[2].label, "Bass Drum");
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.voice_budget(), 18);
        assert_eq!(config.sample_dir(), dir.path().join("sounds"));
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = scratch_dir("partial");
        std::fs::write(config_file_path(dir.path()), r#"{ "steps": 16, "rate": 4 }"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.steps, 16);
        assert_eq!(config.rate, 4);
        assert_eq!(config.instruments, Config::default().instruments);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = scratch_dir("broken");
        std::fs::write(config_file_path(dir.path()), "steps = 16").unwrap();
        assert!(Config::load(dir.path()).is_err());

        std::fs::write(config_file_path(dir.path()), r#"{ "instruments": [] }"#).unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn unreadable_file_is_an_error_not_defaults() {
        let dir = scratch_dir("unreadable");
        std::fs::create_dir_all(config_file_path(dir.path())).unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("could not read"));
    }

    #[test]
    fn project_dir_comes_from_first_argument() {
        let dir = scratch_dir("args");
        let args = vec!["beatgrid".to_owned(), dir.path().display().to_string()];
        let config = Config::from_args(args.into_iter()).unwrap();
        assert_eq!(config.project_dir, dir.path());
    }
}
