//! Tests for RenderService document loading and rendering

use std::fs;
use std::path::Path;
use std::sync::Arc;

use matprint::application::services::RenderService;
use matprint::application::{ApplicationError, PrettyPrinter};
use matprint::infrastructure::traits::RealFileSystem;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const DOCUMENT: &str = r#"
[[vectors]]
name = "vec1"
values = [4.6, -5.0, 10.0]

[[matrices]]
name = "mat"
columns = [[1.0, -2.0, 13.0], [4.0, -5.4, 6.0], [7.23, 800.0, -9.0]]

[[chain]]
columns = [[3.0, 2.0, 5.0], [3.0, 5.0, 1.0], [7.0, 0.0, 9.0]]

[[chain]]
columns = [[4.0, 12.0, 3.0], [4.0, 4.0, 7.0], [-54.8, 8.0, 0.0]]
"#;

#[fixture]
fn service() -> RenderService {
    matprint::util::testing::init_test_setup();
    RenderService::new(Arc::new(RealFileSystem))
}

fn write_doc(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("doc.toml");
    fs::write(&path, content).unwrap();
    path
}

#[rstest]
fn given_document_when_render_file_then_sections_in_order(service: RenderService) {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOCUMENT);

    let out = service.render_file(&path, &PrettyPrinter::default()).unwrap();

    assert_eq!(
        out,
        "vec1:\n\
         [ 4.600  -5.000  10.000 ]\n\
         \n\
         mat:\n\
         [  1.000   4.000    7.230 ]\n\
         [ -2.000  -5.400  800.000 ]\n\
         [ 13.000   6.000   -9.000 ]\n\
         \n\
         Node data:\n\
         [ 3.000  3.000  7.000 ]\n\
         [ 2.000  5.000  0.000 ]\n\
         [ 5.000  1.000  9.000 ]\n\
         \n   |\n\
         Children\n   |\n   V\n\
         \n\
         Node data:\n\
         [  4.000  4.000  -54.800 ]\n\
         [ 12.000  4.000    8.000 ]\n\
         [  3.000  7.000    0.000 ]\n\
         \n"
    );
}

#[rstest]
fn given_document_without_chain_when_render_chain_then_empty(service: RenderService) {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "[[vectors]]\nname = \"v\"\nvalues = [1.0, 2.0, 3.0]\n");

    let doc = service.load(&path).unwrap();

    assert_eq!(service.render_chain(&doc, &PrettyPrinter::default()).unwrap(), "");
    assert_eq!(service.outline_chain(&doc).unwrap(), "");
}

#[rstest]
fn given_precision_1_when_render_document_then_printer_settings_apply(service: RenderService) {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "[[vectors]]\nname = \"v\"\nvalues = [1.0, -2.26, 3.0]\n");

    let out = service.render_file(&path, &PrettyPrinter::new(1, 1)).unwrap();

    assert_eq!(out, "v:\n[ 1.0 -2.3 3.0 ]\n\n");
}

#[rstest]
fn given_missing_file_when_load_then_document_error(service: RenderService) {
    let err = service.load(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(matches!(err, ApplicationError::Document { .. }));
    assert!(err.to_string().contains("exist.toml"));
}

#[rstest]
#[case::not_toml("this is not toml = = =")]
#[case::short_vector("[[vectors]]\nname = \"v\"\nvalues = [1.0]\n")]
#[case::missing_columns("[[chain]]\nnum_children = 1\n")]
fn given_invalid_document_when_load_then_document_error(service: RenderService, #[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, content);

    let err = service.load(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Document { .. }), "got {:?}", err);
}

#[rstest]
fn given_sample_document_when_outline_then_four_levels(service: RenderService) {
    let doc = service.load(Path::new("demos/sample.toml")).unwrap();

    let outline = service.outline_chain(&doc).unwrap();

    assert_eq!(outline.lines().count(), 4);
    assert!(outline.starts_with("node 0 (children: 3)"));
}
