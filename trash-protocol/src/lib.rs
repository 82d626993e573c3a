pub use crate::parser::{
    parse_element_sets, parse_lines, ElementSetLines, ParseError, ParsedElementSets,
};

pub mod parser;

/// Number of text lines making up one element set (name, line 1, line 2)
pub const LINES_PER_ELEMENT_SET: usize = 3;
