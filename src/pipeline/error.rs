use std::path::PathBuf;

// Everything the sequencer core can refuse to do. None of these are fatal;
// the middle layer turns them into a status line and carries on.
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    #[error("cell ({instrument}, {step}) is outside the {instruments}x{steps} grid")]
    OutOfRange {
        instrument: usize,
        step: usize,
        instruments: usize,
        steps: usize,
    },

    #[error("pattern name must not be empty")]
    InvalidName,

    #[error("no pattern named {0:?}")]
    NotFound(String),

    #[error("pattern store {} is unreadable: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid is locked while a save/load name is being entered")]
    GridLocked,

    #[error("pattern {name:?} does not fit this grid: {reason}")]
    InvalidPattern {
        name: String,
        #[source]
        reason: PatternShapeError,
    },

    #[error("pattern store {} I/O failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Why a stored matrix can't become the live grid
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternShapeError {
    #[error("pattern has no instrument rows")]
    NoRows,

    #[error("{0} steps is outside the playable 1..=20 range")]
    StepCount(usize),

    #[error("row {row} has {len} steps, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("it has {found} instrument rows, this kit has {expected}")]
    InstrumentCount { found: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, SequencerError>;
