//! Report formatters.

pub mod console;
pub mod formatter;
pub mod json;
pub mod markdown;

pub use console::ConsoleFormatter;
pub use formatter::OutputFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
