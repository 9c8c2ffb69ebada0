//! Column-aligned fixed-point printing of 3D vectors, 3x3 matrices and
//! chains of matrix-bearing nodes.
//!
//! ```
//! use matprint::application::PrettyPrinter;
//! use matprint::domain::Vec3;
//!
//! let printer = PrettyPrinter::default();
//! assert_eq!(
//!     printer.render_vector(&Vec3::new(1.72, 5000.0, 84.6)),
//!     "[ 1.720  5000.000  84.600 ]\n\n"
//! );
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
