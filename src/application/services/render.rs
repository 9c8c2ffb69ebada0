//! Document rendering service
//!
//! Loads a TOML document and renders its vectors, matrices and node chain.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::document::Document;
use crate::application::printer::PrettyPrinter;
use crate::application::summary::chain_outline;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Service turning documents into aligned text.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a document.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Document> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::Document {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        let doc = Document::from_toml_str(&content).map_err(|e| ApplicationError::Document {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            "load: {} vectors, {} matrices, {} chain nodes",
            doc.vectors.len(),
            doc.matrices.len(),
            doc.chain.len()
        );
        Ok(doc)
    }

    /// Every vector, then every matrix, each under a `<name>:` line, then the chain.
    pub fn render_document(&self, doc: &Document, printer: &PrettyPrinter) -> ApplicationResult<String> {
        let mut out = String::new();
        for named in &doc.vectors {
            out.push_str(&format!("{}:\n", named.name));
            out.push_str(&printer.render_vector(&named.vector()));
        }
        for named in &doc.matrices {
            out.push_str(&format!("{}:\n", named.name));
            out.push_str(&printer.render_matrix(&named.matrix()));
        }
        out.push_str(&self.render_chain(doc, printer)?);
        Ok(out)
    }

    /// Only the node chain; empty when the document has none.
    pub fn render_chain(&self, doc: &Document, printer: &PrettyPrinter) -> ApplicationResult<String> {
        let (chain, head) = doc.build_chain()?;
        match head {
            Some(head) => Ok(printer.render_node(&chain, head)?),
            None => Ok(String::new()),
        }
    }

    /// `termtree` outline of the chain; empty when the document has none.
    pub fn outline_chain(&self, doc: &Document) -> ApplicationResult<String> {
        let (chain, head) = doc.build_chain()?;
        match head {
            Some(head) => Ok(chain_outline(&chain, head)?.to_string()),
            None => Ok(String::new()),
        }
    }

    /// Load `path` and render it.
    pub fn render_file(&self, path: &Path, printer: &PrettyPrinter) -> ApplicationResult<String> {
        let doc = self.load(path)?;
        self.render_document(&doc, printer)
    }
}
