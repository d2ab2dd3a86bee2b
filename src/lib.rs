//! Structured extraction of grant applications from their plain-text rendering.
//!
//! One run turns the ordered paragraph lines of an application into a
//! [`ProjectRecord`]: a fixed nested schema whose leaves keep their defaults
//! when the document lacks the corresponding marker.

pub mod config;
pub mod error;
pub mod parser;
pub mod record;
pub mod source;

pub use error::{ExtractError, Result};
pub use parser::{extract_from, extract_record};
pub use record::ProjectRecord;
pub use source::{LineSource, TextFile};
