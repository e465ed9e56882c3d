use std::io::Write;

use super::tag_index::{TaginfoSource, load_index};

fn taginfo_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn no_source_is_empty() {
    let index = load_index(None).unwrap();
    assert!(!index.is_loaded());
}

#[test]
fn loads_feed() {
    let file = taginfo_file(r#"[{"key": "highway"}, {"key": "name"}]"#);
    let source = TaginfoSource {
        path: file.path().to_path_buf(),
        required: true,
    };
    let index = load_index(Some(&source)).unwrap();
    assert_eq!(index.len(), 2);
    assert!(index.contains("highway"));
}

#[test]
fn required_source_must_load() {
    let file = taginfo_file("{not json");
    let source = TaginfoSource {
        path: file.path().to_path_buf(),
        required: true,
    };
    let err = load_index(Some(&source)).unwrap_err();
    assert!(err.to_string().contains("failed to parse tag metadata"));
}

#[test]
fn optional_source_degrades() {
    let file = taginfo_file("{not json");
    let source = TaginfoSource {
        path: file.path().to_path_buf(),
        required: false,
    };
    let index = load_index(Some(&source)).unwrap();
    assert!(!index.is_loaded());
}
