//! Core recitation library shared by the study service and its clients.
//!
//! Provides:
//! - Parser for study material files (poems, text passages, daily accumulation)
//! - Text normalization for comparison and speech
//! - Similarity scoring (longest common subsequence)
//! - Correction feedback for recitation attempts
//! - Shared types (ContentItem, Category, Evaluation, etc.)

pub mod catalog;
pub mod error;
pub mod evaluation;
pub mod feedback;
pub mod normalize;
pub mod parser;
pub mod scoring;
pub mod types;

pub use catalog::{group_by_category, item_at, CategoryGroup};
pub use error::{RecitationError, Result};
pub use evaluation::{evaluate, Evaluation, PracticeMode};
pub use feedback::{generate_feedback, Diagnostic, FeedbackReport, Substitution};
pub use normalize::{normalize, speech_text, strip_punctuation};
pub use parser::parse;
pub use scoring::{lcs_length, score, similarity};
pub use types::{Category, ContentItem};
