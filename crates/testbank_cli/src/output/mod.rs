//! Output formatting module

mod json;
mod text;

pub use json::output_json;
pub use text::{format_preview, format_questions, format_statistics, format_tests};
