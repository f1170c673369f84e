mod console_formatter;
mod core;
mod json_formatter;

pub use console_formatter::{ConsoleFormatter, ConsoleFormatterConfig};
pub use core::LogFormatter;
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};
