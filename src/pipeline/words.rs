/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word count as displayed next to input and summary, e.g. `"2 words"`.
pub fn format_word_count(text: &str) -> String {
    format!("{} words", word_count(text))
}
