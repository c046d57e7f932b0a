//! Line source trait definition.

/// Anything that can list its block-level paragraphs as plain text.
///
/// This is the read side of the editor document: the rich-text engine, a
/// plain string or a list of already-split lines.
///
/// # Example
///
/// ```rust
/// use testbank_parser::LineSource;
///
/// let source = "Question 1: Q?\nA. x";
/// assert_eq!(source.paragraph_texts(), vec!["Question 1: Q?", "A. x"]);
/// ```
pub trait LineSource {
    /// Returns the text of every paragraph in document order.
    fn paragraph_texts(&self) -> Vec<&str>;
}

/// Paragraphs are separated by `\n`. An empty string has no paragraphs.
impl LineSource for str {
    fn paragraph_texts(&self) -> Vec<&str> {
        if self.is_empty() {
            return Vec::new();
        }
        self.split('\n').collect()
    }
}

impl LineSource for String {
    fn paragraph_texts(&self) -> Vec<&str> {
        self.as_str().paragraph_texts()
    }
}

impl LineSource for [String] {
    fn paragraph_texts(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

impl LineSource for Vec<String> {
    fn paragraph_texts(&self) -> Vec<&str> {
        self.as_slice().paragraph_texts()
    }
}
