//! Integration tests for osm2json
//!
//! These tests run whole documents through the converter and check the
//! emitted lines.

use std::io::Cursor;

use osm2json::prelude::*;

fn convert_str(xml: &str) -> Vec<String> {
    let mut emitter = LineEmitter::new(Vec::new());
    OsmConverter::new()
        .convert_reader(Cursor::new(xml), &mut emitter)
        .unwrap();
    String::from_utf8(emitter.into_inner())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Generate a document with `n` nodes, each carrying two tags
fn generate_osm(n: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm version=\"0.6\">\n");
    for i in 0..n {
        xml.push_str(&format!(
            "  <node id=\"{}\" lat=\"{}\" lon=\"{}\" visible=\"true\">\n    <tag k=\"ref\" v=\"{}\"/>\n    <tag k=\"ele\" v=\"{}.5\"/>\n  </node>\n",
            i + 1,
            51.0 + i as f64 * 0.001,
            -0.5 - i as f64 * 0.002,
            i,
            i
        ));
    }
    xml.push_str("</osm>\n");
    xml
}

#[test]
fn test_node_example() {
    let lines = convert_str(r#"<osm><node id="5" lat="12.5" name="A &quot;B&quot;"/></osm>"#);
    assert_eq!(lines, [r#"{"id" : 5, "lat" : 12.5, "name" : "A \"B\""}"#]);
}

#[test]
fn test_way_example() {
    let lines = convert_str(r#"<osm><way id="7"><tag k="x" v="1.0"/></way></osm>"#);
    assert_eq!(lines, [r#"{"id" : 7, "tag" : {"k" : "x", "v" : 1}}"#]);
}

#[test]
fn test_line_count_matches_top_level_children() {
    for n in [0, 1, 17, 250] {
        assert_eq!(convert_str(&generate_osm(n)).len(), n);
    }
}

#[test]
fn test_line_breaks_in_attributes_keep_one_line_per_record() {
    let xml = "<osm>\n<node id=\"1\" note=\"a\nb\"/>\r\n<node id=\"2\" note=\"c\r\nd\te\"/>\n</osm>";
    let lines = convert_str(xml);
    assert_eq!(
        lines,
        [
            r#"{"id" : 1, "note" : "a b"}"#,
            r#"{"id" : 2, "note" : "c d e"}"#,
        ]
    );
}

#[test]
fn test_plain_records_are_valid_json() {
    for line in convert_str(&generate_osm(5)) {
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value["id"].is_u64());
        assert!(value["lat"].is_f64() || value["lat"].is_u64());
        assert_eq!(value["visible"], "true");
    }
}

#[test]
fn test_conversion_is_deterministic() {
    let xml = generate_osm(100);
    assert_eq!(convert_str(&xml), convert_str(&xml));
}

#[test]
fn test_relation_members() {
    let xml = r#"<osm>
  <relation id="99" version="3">
    <member type="way" ref="7" role="outer"/>
    <member type="node" ref="5" role=""/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>"#;
    let lines = convert_str(xml);
    assert_eq!(
        lines,
        [r#"{"id" : 99, "version" : 3, "member" : {"type" : "way", "ref" : 7, "role" : "outer"}, "member" : {"type" : "node", "ref" : 5, "role" : ""}, "tag" : {"k" : "type", "v" : "multipolygon"}}"#]
    );
}

#[test]
fn test_deeper_nesting_is_flat_text() {
    let lines = convert_str(r#"<osm><a x="1"><b y="2"><c z="3"/></b></a></osm>"#);
    assert_eq!(lines, [r#"{"x" : 1, "b" : {"y" : 2, "c" : {"z" : 3}}}"#]);
}

#[test]
fn test_convert_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(generate_osm(3).as_bytes()).unwrap();

    let mut out = Vec::new();
    let stats = OsmConverter::new().convert(Some(file.path()), &mut out).unwrap();

    assert_eq!(stats.records, 3);
    assert_eq!(stats.records_by_name.get("node"), Some(&3));
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
}

#[test]
fn test_convert_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    let err = OsmConverter::new()
        .convert(Some(dir.path().join("nope.osm").as_path()), &mut out)
        .unwrap_err();

    assert!(matches!(err, ConvertError::InputNotFound { .. }));
    assert!(out.is_empty());
}
