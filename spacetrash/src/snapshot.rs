//! JSON-lines dump of every placed object, one line per frame

use serde::Serialize;
use std::io::{self, Write};
use trash_types::prelude::{GeodeticPosition, RecordId};

use crate::{layer::RenderLayer, tracker::SpaceTrash, units::Timestamp};

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SnapshotEntry<'a> {
    pub id: RecordId,
    pub name: &'a str,
    #[serde(flatten)]
    pub position: GeodeticPosition,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub timestamp: Timestamp,
    pub objects: Vec<SnapshotEntry<'a>>,
}

impl<'a> Snapshot<'a> {
    /// Objects without a known position are left out
    pub fn capture<L: RenderLayer>(
        frame: u64,
        timestamp: Timestamp,
        tracker: &'a SpaceTrash<L>,
    ) -> Self {
        let objects = tracker
            .objects()
            .iter()
            .filter_map(|obj| {
                obj.last_position.map(|position| SnapshotEntry {
                    id: obj.record.id,
                    name: obj.record.name.as_str(),
                    position,
                })
            })
            .collect();
        Snapshot {
            frame,
            timestamp,
            objects,
        }
    }
}

pub struct SnapshotWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, layer::HeadlessLayer};

    #[test]
    fn one_json_object_per_line() {
        let mut catalog = Catalog::new();
        catalog.push(
            "0 ISS (ZARYA)",
            "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
        );
        catalog.push("0 MANGLED", "1 garbage", "2 garbage");
        let at: Timestamp = "2008-09-20T12:00:00Z".parse().unwrap();
        let mut tracker = SpaceTrash::new(HeadlessLayer::new());
        tracker.populate(catalog, at);

        let mut writer = SnapshotWriter::new(Vec::new());
        writer.write(&Snapshot::capture(0, at, &tracker)).unwrap();
        writer.write(&Snapshot::capture(1, at, &tracker)).unwrap();
        assert_eq!(writer.written(), 2);

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["frame"], 1);
        assert_eq!(v["timestamp"], "2008-09-20T12:00:00Z");
        let objects = v["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["id"], 0);
        assert_eq!(objects[0]["name"], "0 ISS (ZARYA)");
        assert!(objects[0]["height"].as_f64().unwrap() > 100_000.0);
        assert!(objects[0]["latitude"].is_number());
    }
}
