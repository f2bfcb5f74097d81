//! `---`-delimited header blocks at the top of documents.

pub mod parser;
pub mod types;

pub use parser::parse_header;
pub use types::{Field, Header, HeaderValue};
