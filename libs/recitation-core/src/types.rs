//! Core types for recitation study material.

use serde::{Deserialize, Serialize};

use crate::error::{RecitationError, Result};

/// Kind of study material an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Poem,
    TextPassage,
    DailyAccumulation,
}

impl Default for Category {
    fn default() -> Self {
        Self::Poem
    }
}

impl Category {
    /// Label used for the category in study material.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Poem => "古诗",
            Self::TextPassage => "课文段落",
            Self::DailyAccumulation => "日积月累",
        }
    }

    /// Parse a category header line such as `古诗：`.
    pub fn from_header(line: &str) -> Option<Self> {
        match line {
            "古诗：" => Some(Self::Poem),
            "课文段落：" => Some(Self::TextPassage),
            "日积月累：" => Some(Self::DailyAccumulation),
            _ => None,
        }
    }
}

/// One parsed unit of study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub category: Category,
    pub title: String,
    /// Empty when the author is unknown.
    pub author: String,
    /// Clause-sized units, each ending in its original punctuation mark.
    pub lines: Vec<String>,
    pub notes: Vec<String>,
    pub translation: String,
}

impl ContentItem {
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }

    /// Get a line by index.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Reference text for following a single line.
    pub fn follow_target(&self, index: usize) -> Result<&str> {
        self.line(index).ok_or(RecitationError::LineOutOfRange {
            index,
            len: self.lines.len(),
        })
    }

    /// Reference text for reciting the whole item.
    pub fn recitation_text(&self) -> String {
        self.lines.concat()
    }

    /// Short label shown beside the title in item lists.
    pub fn list_meta(&self) -> &str {
        if self.has_author() {
            return &self.author;
        }
        match self.category {
            Category::Poem => "",
            Category::TextPassage => "课文",
            Category::DailyAccumulation => "积累",
        }
    }

    /// Author to show on the detail view. Text passages never show one.
    pub fn display_author(&self) -> Option<&str> {
        match self.category {
            Category::Poem | Category::DailyAccumulation if self.has_author() => {
                Some(self.author.as_str())
            }
            _ => None,
        }
    }
}
