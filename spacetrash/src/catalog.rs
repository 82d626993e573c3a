//! The ordered, append-only list of orbital records

use tracing::info;
use trash_protocol::parse_element_sets;
use trash_types::prelude::{OrbitalRecord, RecordId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to split the catalog text into element sets: {0}")]
    Parse(String),
}

/// What happened to the input lines of a load
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct LoadSummary {
    pub accepted: usize,
    /// Triples with a blank element line
    pub skipped: usize,
    /// Lines after the last complete triple
    pub dangling_lines: usize,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Catalog {
    records: Vec<OrbitalRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from 3LE text, one record per complete triple
    pub fn from_text(text: &str) -> Result<(Self, LoadSummary), CatalogError> {
        let (_, parsed) =
            parse_element_sets(text).map_err(|e| CatalogError::Parse(format!("{e:?}")))?;

        let mut catalog = Catalog::new();
        for set in parsed.sets.iter() {
            catalog.push(set.name, set.line1, set.line2);
        }

        let summary = LoadSummary {
            accepted: catalog.len(),
            skipped: parsed.skipped,
            dangling_lines: parsed.dangling_lines,
        };
        info!(
            records = summary.accepted,
            skipped = summary.skipped,
            dangling_lines = summary.dangling_lines,
            "Loaded catalog"
        );

        Ok((catalog, summary))
    }

    /// Appends a record, its id being the current length
    pub fn push(&mut self, name: &str, line1: &str, line2: &str) -> RecordId {
        let id = RecordId::new(self.records.len());
        self.records.push(OrbitalRecord {
            id,
            name: name.to_owned(),
            line1: line1.to_owned(),
            line2: line2.to_owned(),
        });
        id
    }

    pub fn get(&self, id: RecordId) -> Option<&OrbitalRecord> {
        self.records.get(id.as_index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for Catalog {
    type Item = OrbitalRecord;
    type IntoIter = std::vec::IntoIter<OrbitalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const CATALOG: &str = indoc! {"
        0 FENGYUN 1C DEB
        1 29740U 99025BM  23189.86102190  .00000977  00000-0  34093-3 0  9992
        2 29740  98.6297 166.4530 0065624 355.6364   4.4240 14.49386733850628
        0 COSMOS 2251 DEB
        1 34427U 93036RU  23190.12183412  .00002335  00000-0  67545-3 0  9991
        2 34427  74.0320 218.3412 0097461 114.5290 246.6060 14.43108372765418
        0 COSMOS 1408 DEB
        1 49863U 82092AE  22301.52567706  .00181346  13389-4  21614-2 0  9994
        2 49863  82.5582 171.7521 0035118  96.5108 263.9907 15.67434036 44859
    "};

    #[test]
    fn ids_follow_insertion_order() {
        let (catalog, summary) = Catalog::from_text(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.dangling_lines, 0);
        for (i, rec) in catalog.iter().enumerate() {
            assert_eq!(rec.id.as_index(), i);
            assert_eq!(catalog.get(rec.id), Some(rec));
        }
        let names: Vec<_> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["0 FENGYUN 1C DEB", "0 COSMOS 2251 DEB", "0 COSMOS 1408 DEB"]
        );
    }

    #[test]
    fn blank_element_lines_are_excluded() {
        let text = [
            "0 IRIDIUM 33 DEB",
            "    ",
            "2 33776  86.3777 120.2160 0046378 312.3300  47.4002 14.45390624760332",
            CATALOG,
        ]
        .join("\n");
        let (catalog, summary) = Catalog::from_text(&text).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.iter().all(|r| !r.name.contains("IRIDIUM")));
        assert_eq!(catalog.iter().next().map(|r| r.id), Some(RecordId::new(0)));
    }

    #[test]
    fn push_assigns_the_length() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.push("A", "1 a", "2 a"), RecordId::new(0));
        assert_eq!(catalog.push("B", "1 b", "2 b"), RecordId::new(1));
        assert_eq!(catalog.get(RecordId::new(1)).map(|r| r.label()), Some("1".to_string()));
        assert_eq!(catalog.get(RecordId::new(2)), None);
    }

    #[test]
    fn empty_text() {
        let (catalog, summary) = Catalog::from_text("").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(summary, LoadSummary::default());
    }
}
