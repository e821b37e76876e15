//! Rectangle input files: `{"rects": [{"x": .., "y": .., "w": .., "h": ..}, ...]}`.
//!
//! Records are numbered `1..=n` in file order. Any malformed record rejects
//! the whole file; records past the configured limit are dropped before
//! validation.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use overlaps::{Coord, OverlapError, Rectangle};
use serde::{Deserialize, Serialize};

/// One rectangle as written in an input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectRecord {
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
}

impl From<&Rectangle> for RectRecord {
    fn from(r: &Rectangle) -> Self {
        Self {
            x: r.origin().x,
            y: r.origin().y,
            w: r.width(),
            h: r.height(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InputFile {
    rects: Vec<RectRecord>,
}

/// Rectangles read from a file, plus how many were dropped by the limit.
#[derive(Debug)]
pub struct Loaded {
    pub rects: Vec<Rectangle>,
    pub discarded: usize,
}

/// Failures that make an input file unusable.
#[derive(Debug)]
pub enum InputError {
    Unreadable { path: PathBuf, source: io::Error },
    Malformed { path: PathBuf, source: serde_json::Error },
    /// Record `index` (1-based) has an invalid extent.
    Geometry { index: usize, source: OverlapError },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Malformed { path, source } => write!(f, "malformed input {}: {source}", path.display()),
            Self::Geometry { index, source } => write!(f, "rectangle {index}: {source}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Geometry { source, .. } => Some(source),
        }
    }
}

/// Read and validate an input file.
pub fn read_rects(path: &Path, max_rects: Option<usize>) -> Result<Loaded, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let file: InputFile = serde_json::from_str(&text).map_err(|source| InputError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    to_rectangles(file.rects, max_rects)
}

/// Number and validate records, keeping at most `max_rects`.
pub fn to_rectangles(records: Vec<RectRecord>, max_rects: Option<usize>) -> Result<Loaded, InputError> {
    let limit = max_rects.unwrap_or(usize::MAX);
    let discarded = records.len().saturating_sub(limit);
    let rects = records
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(k, rec)| {
            let index = k + 1;
            Rectangle::from_xywh(rec.x, rec.y, rec.w, rec.h, index)
                .map_err(|source| InputError::Geometry { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Loaded { rects, discarded })
}

/// Serialize rectangles in the input file format (ids are implied by order).
pub fn to_json(rects: &[Rectangle]) -> serde_json::Result<String> {
    let file = InputFile {
        rects: rects.iter().map(RectRecord::from).collect(),
    };
    serde_json::to_string_pretty(&file)
}
