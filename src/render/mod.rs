//! Renderers over `ReportData`. Nothing here computes metrics.

pub mod html;
pub mod text;

pub use html::render_html_report;
pub use text::write_text_report;
