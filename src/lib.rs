//! Groovi
//!
//! A mood-to-playlist service: free-text (or transcribed speech) is analyzed
//! into a mood category, and the mood is resolved into five songs through an
//! ordered chain of catalog-backed and curated strategies.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod llm;
pub mod mood;
pub mod playlist;
pub mod server;
pub mod transcribe;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::AppConfig;
pub use error::{AppError, Result};

pub use catalog::{CatalogSearch, TrackRecord};
pub use mood::{MoodAnalyzer, MoodCategory, MoodRecord, SongHint};
pub use playlist::PlaylistResolver;
