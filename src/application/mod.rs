//! Application layer: formatting engine and use cases
//!
//! This layer renders domain values and depends on I/O boundary traits.

pub mod document;
pub mod error;
pub mod error_ext;
pub mod printer;
pub mod services;
pub mod summary;

pub use document::Document;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use printer::{ColumnWidths, PrettyPrinter};
