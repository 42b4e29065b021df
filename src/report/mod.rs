pub mod envelope;
pub mod markdown;

pub use envelope::{Envelope, ResponseStatus};
pub use markdown::MarkdownReport;
