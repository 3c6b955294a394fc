use std::fs;
use std::io::Cursor;

use super::*;

fn data_lines(content: &str) -> Vec<String> {
    DataLines::new(Cursor::new(content.to_string()))
        .map(|line| line.unwrap().1)
        .collect()
}

#[test]
fn parse_row_with_weight() {
    let row = DictionaryRow::parse("Apple\tAPPL\t100").unwrap();
    assert_eq!(row.text, "Apple");
    assert_eq!(row.code, "APPL");
    assert_eq!(row.weight, Some(100));
}

#[test]
fn parse_row_without_weight() {
    let row = DictionaryRow::parse("New York\tnew york").unwrap();
    assert_eq!(row.weight, None);
    assert_eq!(row.variant(), Variant::new("New York", "new york"));
}

#[test]
fn parse_row_free_form_extra_field() {
    let row = DictionaryRow::parse("a\tb\tnote").unwrap();
    assert_eq!(row.weight, None);
}

#[test]
fn parse_row_errors() {
    assert_eq!(DictionaryRow::parse("apple"), Err(RowError::MissingField));
    assert_eq!(DictionaryRow::parse(" \tappl"), Err(RowError::EmptyField("text")));
    assert_eq!(DictionaryRow::parse("apple\t "), Err(RowError::EmptyField("code")));
}

#[test]
fn entry_display() {
    assert_eq!(Entry::PlainKey("中文".into()).to_string(), "中文");
    assert_eq!(
        Entry::TextCode(Variant::new("Apple", "APPL")).to_string(),
        "Apple\tAPPL"
    );
}

#[test]
fn data_lines_start_after_marker() {
    let content = "---\nname: en\n...\n# +_+\napple\tappl\n\n# note\nbanana\tbanana\n";
    assert_eq!(data_lines(content), vec!["apple\tappl", "banana\tbanana"]);
}

#[test]
fn data_lines_marker_must_match_exactly() {
    let content = "# +_+ extra\napple\tappl\n";
    assert!(data_lines(content).is_empty());

    let content = "# +_+  \r\napple\tappl\r\n";
    assert_eq!(data_lines(content), vec!["apple\tappl"]);
}

#[test]
fn data_lines_carry_file_line_numbers() {
    let content = "---\nname: en\n...\n# +_+\n\n# comment\napple\tappl\n\norphan\n";
    let numbered: Vec<(usize, String)> = DataLines::new(Cursor::new(content))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        numbered,
        vec![(7, "apple\tappl".to_string()), (9, "orphan".to_string())]
    );
}

#[test]
fn data_lines_without_marker_are_empty() {
    assert!(data_lines("apple\tappl\nbanana\tbanana\n").is_empty());
}

#[test]
fn line_source_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.dict.yaml");
    fs::write(&path, "# header\n# +_+\nApple\tAPPL\napple\tappl\n").unwrap();

    let source = LineSource::open(&path).unwrap();
    assert_eq!(source.path(), path.as_path());
    let lines: Vec<(usize, String)> = source.data_lines().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        lines,
        vec![(3, "Apple\tAPPL".to_string()), (4, "apple\tappl".to_string())]
    );
}

#[test]
fn line_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = match LineSource::open(&dir.path().join("missing.yaml")) {
        Err(e) => e,
        Ok(_) => panic!("expected open to fail"),
    };
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn rewrite_weights_replaces_or_appends() {
    let content = "name: ext\n# +_+\n你好\tni hao\t5\n世界\tshi jie\n\n# comment\n";
    assert_eq!(
        rewrite_weights(content, 100),
        "name: ext\n# +_+\n你好\tni hao\t100\n世界\tshi jie\t100\n\n# comment\n"
    );
}

#[test]
fn rewrite_weights_leaves_header_alone() {
    let content = "a\tb\t1\n# +_+\na\tb\t1";
    assert_eq!(rewrite_weights(content, 7), "a\tb\t1\n# +_+\na\tb\t7");
}

#[test]
fn rewrite_weights_keeps_crlf() {
    let content = "# +_+\r\nfoo\tfoo\t3\r\nbar\tbar\r\n";
    assert_eq!(
        rewrite_weights(content, 0),
        "# +_+\r\nfoo\tfoo\t0\r\nbar\tbar\t0\r\n"
    );
}

#[test]
fn rewrite_weights_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tencent.dict.yaml");
    fs::write(&path, "# +_+\n腾讯\tteng xun\n").unwrap();

    rewrite_weights_file(&path, 42).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "# +_+\n腾讯\tteng xun\t42\n");
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn write_lines_creates_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/acronym.txt");
    write_lines(&path, ["NASA\tNASA", "nasa\tNASA"]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "NASA\tNASA\nnasa\tNASA\n");
}
