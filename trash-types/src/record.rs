use derive_more::Display;
use serde::Serialize;

/// Position of a record in its catalog. Assigned once, in insertion order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct RecordId(usize);

impl RecordId {
    pub fn new(index: usize) -> Self {
        RecordId(index)
    }

    pub fn as_index(&self) -> usize {
        self.0
    }
}

impl From<RecordId> for usize {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Three-line element set, unvalidated
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct OrbitalRecord {
    pub id: RecordId,
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl OrbitalRecord {
    /// The text label the record is rendered with
    pub fn label(&self) -> String {
        self.id.to_string()
    }
}
