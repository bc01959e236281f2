//! Evaluation of a transcribed attempt against a reference.

use serde::{Deserialize, Serialize};

use crate::feedback::{generate_feedback, FeedbackReport};
use crate::scoring::{similarity, to_score};

/// Scores at or above this need no correction list.
const PASS_SCORE: u8 = 90;

/// How the student is practicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    /// Repeat a single line after hearing it.
    Follow,
    /// Recite a whole item from memory.
    Recite,
}

impl Default for PracticeMode {
    fn default() -> Self {
        Self::Follow
    }
}

impl PracticeMode {
    fn score_label(&self) -> &'static str {
        match self {
            Self::Follow => "相似度",
            Self::Recite => "整体相似度",
        }
    }
}

/// Score and feedback for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The attempt as it was heard.
    pub heard: String,
    /// LCS similarity from 0.0 to 1.0.
    pub similarity: f64,
    /// Similarity as a whole number from 0 to 100.
    pub score: u8,
    pub feedback: FeedbackReport,
}

/// Score an attempt and generate correction feedback for it.
pub fn evaluate(reference: &str, attempt: &str) -> Evaluation {
    let similarity = similarity(reference, attempt);
    Evaluation {
        heard: attempt.to_string(),
        similarity,
        score: to_score(similarity),
        feedback: generate_feedback(reference, attempt),
    }
}

impl Evaluation {
    pub fn needs_correction(&self) -> bool {
        self.score < PASS_SCORE
    }

    /// Encouragement matching the score.
    pub fn comment(&self, mode: PracticeMode) -> &'static str {
        let tier = match self.score {
            91..=100 => 0,
            76..=90 => 1,
            51..=75 => 2,
            _ => 3,
        };
        match mode {
            PracticeMode::Follow => [
                "太棒啦，你几乎一字不差！",
                "很好，再多注意几个小字就更完美啦～",
                "有点像了，再试一次会更好哦。",
                "没关系，我们可以多练几次，加油！",
            ][tier],
            PracticeMode::Recite => [
                "哇，你已经可以很熟练地背出来啦！",
                "不错不错，再熟练一点就完美啦～",
                "有些地方还可以再巩固一下，加油！",
                "别灰心，多背几遍一定可以记住的！",
            ][tier],
        }
    }

    /// Full result text shown after an attempt.
    pub fn summary(&self, mode: PracticeMode) -> String {
        let mut text = format!(
            "我听到的是：{}\n{}：{} 分\n\n{}",
            self.heard,
            mode.score_label(),
            self.score,
            self.comment(mode)
        );
        if self.needs_correction() {
            text.push_str("\n\n📝 改正建议：\n");
            text.push_str(&self.feedback.to_string());
        }
        text
    }
}
