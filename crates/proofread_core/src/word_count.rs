/// Number of whitespace-separated, non-empty tokens in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Markdown message reporting the word count of `text`.
pub fn word_count_message(text: &str) -> String {
    let count = count_words(text);
    format!("### 2. Word Count Result\nYour content contains **{count}** words.")
}
