//! Error types for candidate construction and detector configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("Track index out of range: {index} not in [0, {n_tracks})")]
    TrackIndexOutOfRange { index: usize, n_tracks: usize },

    #[error("Invalid calorimeter geometry: {0}")]
    InvalidGeometry(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
