//! Text normalization for comparison and speech.

/// Punctuation and bracket marks ignored when comparing recitations.
const PUNCTUATION: &[char] = &[
    '。', '！', '？', '，', '、', '；', '：', '“', '”', '‘', '’', '（', '）', '【', '】', '《',
    '》', '〈', '〉', '…', '—', '～', '·', '"', '\'', ',', '.', '!', '?', ';', ':', '(', ')',
];

/// Whether `c` is one of the punctuation marks stripped by normalization.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Remove punctuation and all whitespace, keeping the order of what remains.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !is_punctuation(*c))
        .collect()
}

/// Remove punctuation only; whitespace is kept.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Text handed to a speech synthesizer for a line or note.
///
/// Punctuation is dropped so only the words are read aloud.
pub fn speech_text(text: &str) -> String {
    strip_punctuation(text).trim().to_string()
}
