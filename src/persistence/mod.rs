//! Round result log
//!
//! One JSON object per resolved round, appended to a plain text file. The log
//! is write-only during play; `load_records` exists for tooling and tests.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{Actor, HitKind};

/// One persisted round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub reaction_time_ms: u64,
    /// Who fired the deciding shot
    pub actor: Actor,
    pub result_kind: HitKind,
    pub opponent_difficulty: u8,
    pub cumulative_score: u64,
    /// Seconds since the first round of the match started (2 decimals)
    pub match_elapsed_seconds: f64,
}

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Encode(serde_json::Error),
    Decode { line: usize, source: serde_json::Error },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "result log i/o error: {e}"),
            Self::Encode(e) => write!(f, "could not encode round record: {e}"),
            Self::Decode { line, source } => {
                write!(f, "bad round record on line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Destination for round records
pub trait ResultSink {
    fn append(&mut self, record: &RoundRecord) -> Result<(), PersistError>;
}

/// Append-only JSON lines file
#[derive(Debug, Clone)]
pub struct JsonlResultLog {
    path: PathBuf,
}

impl JsonlResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonlResultLog {
    fn append(&mut self, record: &RoundRecord) -> Result<(), PersistError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    pub records: Vec<RoundRecord>,
}

impl ResultSink for MemoryLog {
    fn append(&mut self, record: &RoundRecord) -> Result<(), PersistError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Read every record from a JSON lines log. Blank lines are skipped.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RoundRecord>, PersistError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|source| PersistError::Decode { line: i + 1, source })?;
        records.push(record);
    }
    Ok(records)
}

/// Remove a log file if present
pub fn clear_log(path: impl AsRef<Path>) -> Result<(), PersistError> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
