//! Parse a small catalog dump with CRLF line endings, a blank separator,
//! a group with a blank element line and an incomplete trailing group

use trash_protocol::*;

const CATALOG_TEXT: &str = include_str!("../test_fixtures/sample_3le.txt");

#[test]
fn sample_catalog() {
    let (rest, parsed) = parse_element_sets(CATALOG_TEXT).unwrap();
    assert_eq!(rest, "");

    assert_eq!(parsed.sets.len(), 3);
    assert_eq!(parsed.skipped, 1);
    assert_eq!(parsed.dangling_lines, 1);

    let names: Vec<&str> = parsed.sets.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["0 ISS (ZARYA)", "0 GEO1", "0 GEO2"]);

    for set in parsed.sets.iter() {
        assert!(set.line1.starts_with("1 "));
        assert!(set.line2.starts_with("2 "));
        assert_eq!(set.line1.len(), 69);
        assert_eq!(set.line2.len(), 69);
    }
}
