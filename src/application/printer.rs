//! Column-aligned fixed-point rendering of vectors, matrices and node chains
//!
//! All alignment is derived from [`PrettyPrinter::measure_width`], which formats
//! a value exactly the way the renderers do, so measured and printed widths
//! always agree.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::config::Settings;
use crate::domain::{copy_mat, transpose_mat, DomainError, DomainResult, Mat33, NodeChain, Vec3};

/// Default number of extra spaces before the second and third column.
pub const DEFAULT_WIDTH_BUFFER: usize = 2;

/// Default number of decimal places.
pub const DEFAULT_PRECISION: usize = 3;

/// Upper bound for precision and width buffer.
///
/// Keeps every field width and precision handed to the formatter below
/// `u16::MAX`, the largest runtime width `std::fmt` accepts.
pub const MAX_TUNABLE: usize = 4096;

/// Header line emitted before every node's matrix.
pub const NODE_HEADER: &str = "Node data:";

/// Label of the separator block between chained nodes.
pub const CHILDREN_LABEL: &str = "Children";

/// Minimum field width per display column.
///
/// Widths are a floor, never a cap: a value wider than its column is printed
/// in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnWidths(pub [usize; 3]);

impl ColumnWidths {
    pub fn new(first: usize, second: usize, third: usize) -> Self {
        Self([first, second, third])
    }
}

/// Formats vectors, matrices and node chains as aligned text.
///
/// ```text
/// [    1.000  -4123.000  75.600 ]
/// [ 2543.000      5.000  -8.000 ]
/// [   -3.000     -6.000  -9.000 ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrinter {
    width_buffer: usize,
    precision: usize,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH_BUFFER, DEFAULT_PRECISION)
    }
}

impl PrettyPrinter {
    /// Values above [`MAX_TUNABLE`] are clamped.
    pub fn new(width_buffer: usize, precision: usize) -> Self {
        Self {
            width_buffer: width_buffer.min(MAX_TUNABLE),
            precision: precision.min(MAX_TUNABLE),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.width_buffer, settings.precision)
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn width_buffer(&self) -> usize {
        self.width_buffer
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.min(MAX_TUNABLE);
    }

    pub fn set_width_buffer(&mut self, width_buffer: usize) {
        self.width_buffer = width_buffer.min(MAX_TUNABLE);
    }

    /// Fixed-point text of `value` at the configured precision.
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    /// Length of the fixed-point text of `value`, sign and decimal point included.
    pub fn measure_width(&self, value: f64) -> usize {
        self.format_value(value).len()
    }

    /// Widest of the three components of `vec`.
    pub fn measure_row_width(&self, vec: &Vec3) -> usize {
        vec.to_array()
            .into_iter()
            .map(|v| self.measure_width(v))
            .max()
            .unwrap_or(0)
    }

    /// Widths a standalone vector is printed with.
    ///
    /// The first column needs no buffer, the bracket and its space already
    /// separate it.
    pub fn vector_widths(&self, vec: &Vec3) -> ColumnWidths {
        ColumnWidths::new(
            self.measure_width(vec.x),
            self.measure_width(vec.y).saturating_add(self.width_buffer),
            self.measure_width(vec.z).saturating_add(self.width_buffer),
        )
    }

    /// Shared widths for all three display rows of `mat`.
    ///
    /// Each stored column is a display column, so its widest value sizes it.
    pub fn matrix_widths(&self, mat: &Mat33) -> ColumnWidths {
        ColumnWidths::new(
            self.measure_row_width(mat.col(0)),
            self.measure_row_width(mat.col(1)).saturating_add(self.width_buffer),
            self.measure_row_width(mat.col(2)).saturating_add(self.width_buffer),
        )
    }

    /// One bracketed line, each component right-justified into its width.
    ///
    /// Widths beyond `u16::MAX` are clamped to it.
    pub fn render_vector_with_widths(&self, vec: &Vec3, widths: ColumnWidths) -> String {
        let [wx, wy, wz] = widths.0.map(|w| w.min(usize::from(u16::MAX)));
        format!(
            "[ {:>wx$.p$}{:>wy$.p$}{:>wz$.p$} ]\n",
            vec.x,
            vec.y,
            vec.z,
            p = self.precision,
        )
    }

    /// Standalone vector: one line followed by a blank line.
    #[instrument(level = "trace", skip(self))]
    pub fn render_vector(&self, vec: &Vec3) -> String {
        let widths = self.vector_widths(vec);
        trace!("vector widths: {:?}", widths);
        let mut out = self.render_vector_with_widths(vec, widths);
        out.push('\n');
        out
    }

    /// Three aligned rows followed by a blank line. `mat` is never modified.
    #[instrument(level = "trace", skip(self))]
    pub fn render_matrix(&self, mat: &Mat33) -> String {
        let widths = self.matrix_widths(mat);
        trace!("matrix widths: {:?}", widths);

        // transpose a private copy so stored columns become display rows
        let mut rows = copy_mat(mat);
        transpose_mat(&mut rows);

        let mut out = String::new();
        for row in rows.cols.iter() {
            out.push_str(&self.render_vector_with_widths(row, widths));
        }
        out.push('\n');
        out
    }

    /// Render the node at `start` and every successor after it.
    ///
    /// A separator block is emitted between nodes, never after the last one.
    #[instrument(level = "debug", skip(self, chain))]
    pub fn render_node(&self, chain: &NodeChain, start: Index) -> DomainResult<String> {
        if chain.get(start).is_none() {
            return Err(DomainError::NodeNotFound(start));
        }

        let mut out = String::new();
        let mut count = 0;
        for (_, node) in chain.iter_from(start) {
            out.push_str(NODE_HEADER);
            out.push('\n');
            out.push_str(&self.render_matrix(&node.data));
            if node.next().is_some() {
                out.push_str(&children_separator());
            }
            count += 1;
        }
        debug!("rendered {} nodes", count);
        Ok(out)
    }
}

/// The arrow block between a node and its successor, centred under the label.
pub fn children_separator() -> String {
    let indent = CHILDREN_LABEL.len() / 2;
    format!(
        "{:>indent$}\n{CHILDREN_LABEL}\n{:>indent$}\n{:>indent$}\n\n",
        "|", "|", "V"
    )
}
