//! Season file layout and JSON persistence. Input lives at
//! `{data_dir}/json/s{N}.json`, one array of match records per season; the
//! computed artifact is written to `{data_dir}/stats/s{N}_stats.json`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{self, MatchRecord, RawMatchRecord, RecordError, SeasonStats};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("season file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

pub fn season_path(data_dir: &Path, season: u32) -> PathBuf {
    data_dir.join("json").join(format!("s{season}.json"))
}

pub fn stats_path(data_dir: &Path, season: u32) -> PathBuf {
    data_dir.join("stats").join(format!("s{season}_stats.json"))
}

/// Load and validate one season's match records.
pub fn load_season(path: &Path) -> Result<Vec<MatchRecord>, StoreError> {
    if !path.exists() {
        return Err(StoreError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawMatchRecord> =
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    models::validate_records(raw).map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a stats artifact, creating the parent directory if needed.
pub fn save_stats(path: &Path, stats: &SeasonStats) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = serde_json::to_string_pretty(stats).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_stats(path: &Path) -> Result<SeasonStats, StoreError> {
    if !path.exists() {
        return Err(StoreError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Enumerate `s{N}_stats.json` artifacts in a stats directory, ascending by
/// season number.
pub fn discover_stats(dir: &Path) -> Result<Vec<(u32, PathBuf)>, StoreError> {
    static STATS_FILE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^s(\d+)_stats\.json$").unwrap());

    let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(caps) = STATS_FILE_RE.captures(name) {
            if let Ok(season) = caps[1].parse::<u32>() {
                found.push((season, entry.path()));
            }
        }
    }
    found.sort_by_key(|(season, _)| *season);
    Ok(found)
}
