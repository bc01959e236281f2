//! Stored documents and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from recitation-core
pub use recitation_core::{
    group_by_category, speech_text, Category, ContentItem, Diagnostic, Evaluation, PracticeMode,
};

// === Stored Types ===

/// Study material parsed once at load time
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub content_hash: String,
    pub loaded_at: DateTime<Utc>,
    pub items: Vec<ContentItem>,
}

impl Document {
    /// Convert to API summary
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            name: self.name.clone(),
            content_hash: self.content_hash.clone(),
            loaded_at: self.loaded_at,
            item_count: self.items.len(),
        }
    }

    /// Items grouped by category for list views
    pub fn groups(&self) -> Vec<ItemGroup> {
        group_by_category(&self.items)
            .into_iter()
            .map(|group| ItemGroup {
                category: group.category,
                label: group.category.label().to_string(),
                items: group
                    .items
                    .into_iter()
                    .map(|(index, item)| ItemEntry {
                        index,
                        title: item.title.clone(),
                        meta: item.list_meta().to_string(),
                    })
                    .collect(),
            })
            .collect()
    }
}

// === API Request/Response Types ===

/// Upload request
#[derive(Debug, Deserialize, Serialize)]
pub struct UploadDocumentRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
}

/// Document summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub name: String,
    pub content_hash: String,
    pub loaded_at: DateTime<Utc>,
    pub item_count: usize,
}

/// Document list response
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

/// Document with its items grouped for display
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    pub groups: Vec<ItemGroup>,
}

/// Items of one category
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemGroup {
    pub category: Category,
    pub label: String,
    pub items: Vec<ItemEntry>,
}

/// One row in an item list
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemEntry {
    pub index: usize,
    pub title: String,
    pub meta: String,
}

/// Text with the form handed to speech synthesis
#[derive(Debug, Serialize, Deserialize)]
pub struct SpokenText {
    pub text: String,
    pub speech: String,
}

impl SpokenText {
    fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            speech: speech_text(text),
        }
    }
}

/// Item detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemDetailResponse {
    pub index: usize,
    pub category: Category,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_author: Option<String>,
    pub lines: Vec<SpokenText>,
    pub notes: Vec<SpokenText>,
    pub translation: String,
}

impl ItemDetailResponse {
    pub fn new(index: usize, item: &ContentItem) -> Self {
        Self {
            index,
            category: item.category,
            title: item.title.clone(),
            author: item.author.clone(),
            display_author: item.display_author().map(str::to_string),
            lines: item.lines.iter().map(|l| SpokenText::from_text(l)).collect(),
            notes: item.notes.iter().map(|n| SpokenText::from_text(n)).collect(),
            translation: item.translation.clone(),
        }
    }
}

/// Free-form evaluation request
#[derive(Debug, Deserialize, Serialize)]
pub struct EvaluateRequest {
    pub reference: String,
    pub attempt: String,
    #[serde(default)]
    pub mode: PracticeMode,
}

/// Follow one line of an item
#[derive(Debug, Deserialize, Serialize)]
pub struct FollowRequest {
    pub line: usize,
    pub attempt: String,
}

/// Recite a whole item
#[derive(Debug, Deserialize, Serialize)]
pub struct ReciteRequest {
    pub attempt: String,
}

/// Evaluation result
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub mode: PracticeMode,
    pub reference: String,
    pub heard: String,
    pub score: u8,
    pub similarity: f64,
    pub diagnostics: Vec<Diagnostic>,
    pub messages: Vec<String>,
    pub comment: String,
    pub summary: String,
}

impl EvaluationResponse {
    pub fn new(reference: &str, evaluation: Evaluation, mode: PracticeMode) -> Self {
        Self {
            mode,
            reference: reference.to_string(),
            messages: evaluation.feedback.messages(),
            comment: evaluation.comment(mode).to_string(),
            summary: evaluation.summary(mode),
            heard: evaluation.heard,
            score: evaluation.score,
            similarity: evaluation.similarity,
            diagnostics: evaluation.feedback.diagnostics,
        }
    }
}
