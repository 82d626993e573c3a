//! A small parser for three-line element (3LE) catalog text

use crate::LINES_PER_ELEMENT_SET;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    combinator::{eof, not},
    error::ErrorKind,
    multi::fold_many0,
};
use tracing::debug;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Unconsumed input after the last line")]
    TrailingInput,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// The raw lines of one element set. Nothing beyond emptiness is checked.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ElementSetLines<'a> {
    pub name: &'a str,
    pub line1: &'a str,
    pub line2: &'a str,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ParsedElementSets<'a> {
    /// Complete element sets, in input order
    pub sets: Vec<ElementSetLines<'a>>,
    /// Groups dropped because line 1 or line 2 was blank
    pub skipped: usize,
    /// Lines left over after the last complete group
    pub dangling_lines: usize,
}

/// Groups the non-empty lines of `text` into (name, line 1, line 2) triples.
///
/// Empty lines are removed before grouping. Trailing whitespace is trimmed
/// from every line, and a triple whose element lines end up blank is
/// skipped as a whole.
pub fn parse_element_sets(text: &str) -> Result<&str, ParsedElementSets<'_>> {
    let (s, lines) = parse_lines(text)?;
    if !s.is_empty() {
        return Err(nom::Err::Failure(ParseError::TrailingInput));
    }

    let mut parsed = ParsedElementSets::default();
    let mut groups = lines.chunks_exact(LINES_PER_ELEMENT_SET);
    for group in groups.by_ref() {
        let name = group[0].trim_end();
        let line1 = group[1].trim_end();
        let line2 = group[2].trim_end();

        if line1.trim().is_empty() || line2.trim().is_empty() {
            debug!(name, "Skipping element set with a blank element line");
            parsed.skipped += 1;
            continue;
        }

        parsed.sets.push(ElementSetLines { name, line1, line2 });
    }

    parsed.dangling_lines = groups.remainder().len();
    if parsed.dangling_lines != 0 {
        debug!(
            lines = parsed.dangling_lines,
            "Ignoring incomplete trailing element set"
        );
    }

    Ok((s, parsed))
}

/// Splits on `\n`, `\r\n` or `\r` and drops empty lines
pub fn parse_lines(text: &str) -> Result<&str, Vec<&str>> {
    fold_many0(line, Vec::new, |mut lines: Vec<&str>, l| {
        if !l.is_empty() {
            lines.push(l);
        }
        lines
    })(text)
}

fn line(s: &str) -> Result<&str, &str> {
    let (s, _) = not(eof)(s)?;
    let (s, content) = take_till(|c: char| c == '\r' || c == '\n')(s)?;
    let (s, _) = alt((line_break, eof))(s)?;
    Ok((s, content))
}

fn line_break(s: &str) -> Result<&str, &str> {
    alt((tag("\r\n"), tag("\n"), tag("\r")))(s)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TLE_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578

        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    #[test]
    fn split_lines() {
        assert_eq!(parse_lines("a\nb\r\nc\rd"), Ok(("", vec!["a", "b", "c", "d"])));
        assert_eq!(parse_lines("a\n\n\r\n\nb\n"), Ok(("", vec!["a", "b"])));
        assert_eq!(parse_lines(""), Ok(("", vec![])));
        assert_eq!(parse_lines("\n\n"), Ok(("", vec![])));
    }

    #[test]
    fn parse_tle() {
        let (s, parsed) = parse_element_sets(TLE_SET).unwrap();
        assert!(s.is_empty());
        assert_eq!(parsed.sets.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.dangling_lines, 0);
        assert_eq!(parsed.sets[0].name, "GEO1");
        assert_eq!(parsed.sets[1].name, "GEO2");
        assert!(parsed.sets[1].line1.starts_with("1 39120U"));
        assert!(parsed.sets[1].line2.ends_with("37822"));
    }

    #[test]
    fn blank_element_line_skips_the_group() {
        let text = "A\n1 a\n2 a\nB\n   \n2 b\nC\n1 c\n2 c\n";
        let (_, parsed) = parse_element_sets(text).unwrap();
        assert_eq!(parsed.skipped, 1);
        let names: Vec<_> = parsed.sets.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let (_, parsed) = parse_element_sets("NAME  \r\n1 x  \r\n2 y\t\r\n").unwrap();
        assert_eq!(
            parsed.sets,
            vec![ElementSetLines {
                name: "NAME",
                line1: "1 x",
                line2: "2 y",
            }]
        );
    }

    #[test]
    fn incomplete_trailing_group() {
        let (_, parsed) = parse_element_sets("A\n1 a\n2 a\nB\n1 b\n").unwrap();
        assert_eq!(parsed.sets.len(), 1);
        assert_eq!(parsed.dangling_lines, 2);
    }
}
