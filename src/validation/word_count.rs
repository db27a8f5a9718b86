use serde::Serialize;

pub const DEFAULT_WORD_LIMIT: usize = 300;

/// Whitespace-delimited token count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Advisory word-count result for one answer. Exceeding the cap is a UI
/// warning, not a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCountCheck {
    pub count: usize,
    pub cap: usize,
    pub over_by: usize,
}

impl WordCountCheck {
    pub fn is_over_limit(&self) -> bool {
        self.over_by > 0
    }

    pub fn message(&self) -> Option<String> {
        self.is_over_limit()
            .then(|| format!("Over limit by {} words", self.over_by))
    }
}

pub fn check_word_count(text: &str, cap: usize) -> WordCountCheck {
    let count = count_words(text);
    WordCountCheck {
        count,
        cap,
        over_by: count.saturating_sub(cap),
    }
}
