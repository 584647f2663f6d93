//! Markdown reports: rendering and file naming.

pub mod document;
pub mod naming;

pub use document::{Report, ReportKind, TIMESTAMP_FORMAT};
pub use naming::{FALLBACK_STEM, STOP_WORDS, extract_keywords, report_file_name, sanitize_stem};
