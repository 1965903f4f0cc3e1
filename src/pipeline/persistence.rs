// Named patterns on disk: <project_dir>/.beatgrid/patterns.json
// The whole file is one JSON object of name -> instrument-major bool matrix.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::error::{Result, SequencerError};

pub const BEATGRID_DIR: &str = ".beatgrid";
const PATTERN_FILE: &str = "patterns.json";

pub type Matrix = Vec<Vec<bool>>;

pub fn pattern_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(BEATGRID_DIR).join(PATTERN_FILE)
}

#[derive(Debug)]
pub struct PatternStore {
    path: PathBuf,
    patterns: BTreeMap<String, Matrix>,
}

impl PatternStore {
    /// Read the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let patterns = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|source| SequencerError::CorruptStore { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SequencerError::Io { path, source }),
        };
        Ok(Self { path, patterns })
    }

    // startup path: a broken file shouldn't cost the session
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("{e}; starting with an empty pattern store");
                Self { path, patterns: BTreeMap::new() }
            }
        }
    }

    pub fn save(&mut self, name: &str, matrix: Matrix) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SequencerError::InvalidName);
        }
        let previous = self.patterns.insert(name.to_owned(), matrix);
        if let Err(e) = self.write() {
            // roll back so memory keeps matching what's on disk
            match previous {
                Some(old) => self.patterns.insert(name.to_owned(), old),
                None => self.patterns.remove(name),
            };
            return Err(e);
        }
        log::info!("saved pattern {name:?} to {}", self.path.display());
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Matrix> {
        self.patterns
            .get(name.trim())
            .cloned()
            .ok_or_else(|| SequencerError::NotFound(name.trim().to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name.trim())
    }

    pub fn list(&self) -> Vec<String> {
        self.patterns.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // write a sibling temp file and rename it over the real one, making the
    // directory first if needed
    fn write(&self) -> Result<()> {
        let io_err = |source: std::io::Error| SequencerError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.patterns)
            .map_err(|e| io_err(std::io::Error::other(e)))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}
