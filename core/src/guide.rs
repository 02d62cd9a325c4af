//! Stroke templates: per-character guides, unit data files and guide packs.
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Stroke, StrokeKind};

/// Default snap tolerance for live tracking, in pixels at render scale.
pub const SNAP_TOLERANCE: f64 = 16.0;

/// Default fraction of a template stroke that must be traced to complete it.
pub const DONE_THRESHOLD: f64 = 0.86;

/// The drawing template for one character.
///
/// Strokes are already placed in block-absolute normalized space and must be
/// drawn in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharGuide {
    pub strokes: Vec<Stroke>,
    pub snap_tolerance: f64,
    pub done_threshold: f64,
}

impl CharGuide {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes,
            snap_tolerance: SNAP_TOLERANCE,
            done_threshold: DONE_THRESHOLD,
        }
    }

    /// A guide with no strokes, used for characters that cannot be traced.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_tolerances(mut self, snap_tolerance: f64, done_threshold: f64) -> Self {
        self.snap_tolerance = snap_tolerance;
        self.done_threshold = done_threshold;
        self
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Iterate every point of every stroke.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.strokes.iter().flat_map(|s| s.points.iter())
    }
}

impl Default for CharGuide {
    fn default() -> Self {
        Self::empty()
    }
}

/// One stroke of a hand-authored unit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStroke {
    pub path: Vec<Point>,
}

/// Hand-authored practice unit, as stored in JSON lesson data:
///
/// ```json
/// { "label": "가", "strokes": [ { "path": [[0.3, 0.2], [0.5, 0.2]] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub label: String,
    pub strokes: Vec<UnitStroke>,
}

impl Unit {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let unit: Unit = serde_json::from_str(s).context("invalid unit JSON")?;
        Ok(unit)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut content = String::new();
        File::open(path)
            .with_context(|| format!("opening unit file {}", path.display()))?
            .read_to_string(&mut content)?;
        Self::from_json_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Convert to a guide with the default tolerances. Empty paths are skipped.
    pub fn to_guide(&self) -> CharGuide {
        CharGuide::new(
            self.strokes
                .iter()
                .filter(|s| !s.path.is_empty())
                .map(|s| Stroke::new(StrokeKind::Line, s.path.clone()))
                .collect(),
        )
    }
}

/// A labelled, ordered set of character guides that can be shipped as a
/// precomputed artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuidePack {
    pub label: String,
    pub entries: Vec<(String, CharGuide)>,
}

impl GuidePack {
    pub fn new<T: Into<String>>(label: T) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn push<T: Into<String>>(&mut self, text: T, guide: CharGuide) {
        self.entries.push((text.into(), guide));
    }

    pub fn get(&self, text: &str) -> Option<&CharGuide> {
        self.entries.iter().find(|(t, _)| t == text).map(|(_, g)| g)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let pack = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing guide pack {}", path.display()))?;
        Ok(pack)
    }

    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = bincode::serialize(self)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        File::open(path)
            .with_context(|| format!("opening {}", path.display()))?
            .read_to_end(&mut buf)?;
        let pack = bincode::deserialize(&buf)
            .with_context(|| format!("decoding guide pack {}", path.display()))?;
        Ok(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GA_UNIT: &str = r#"{
        "label": "가",
        "strokes": [
            { "path": [[0.2, 0.3], [0.45, 0.3], [0.42, 0.7]] },
            { "path": [] },
            { "path": [[0.62, 0.15], [0.62, 0.85]] }
        ]
    }"#;

    #[test]
    fn unit_json_converts_to_guide() {
        let unit = Unit::from_json_str(GA_UNIT).unwrap();
        assert_eq!(unit.label, "가");
        let guide = unit.to_guide();
        assert_eq!(guide.len(), 2);
        assert_eq!(guide.snap_tolerance, SNAP_TOLERANCE);
        assert_eq!(guide.done_threshold, DONE_THRESHOLD);
        assert_eq!(guide.strokes[1].points[0], Point::new(0.62, 0.15));
    }

    #[test]
    fn malformed_unit_is_an_error() {
        assert!(Unit::from_json_str("{\"label\": 3}").is_err());
    }

    #[test]
    fn guide_pack_lookup() {
        let mut pack = GuidePack::new("demo");
        pack.push("가", Unit::from_json_str(GA_UNIT).unwrap().to_guide());
        pack.push("a", CharGuide::empty());
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.get("가").map(CharGuide::len), Some(2));
        assert!(pack.get("a").unwrap().is_empty());
        assert!(pack.get("나").is_none());
    }

    fn awkward_pack() -> GuidePack {
        // Coordinates whose shortest decimal form needs exact float parsing.
        let mut pack = GuidePack::new("round trip");
        pack.push(
            "강",
            CharGuide::new(vec![
                Stroke::line([(0.08 + 0.84 * 0.45, 0.4832), (0.1 + 0.2, 0.7 * 0.3)]),
                Stroke::curve([(1.0 / 3.0, 2.0 / 3.0), (0.123456789012345, 0.987654321)]),
            ])
            .with_tolerances(12.5, 0.9),
        );
        pack.push("a", CharGuide::empty());
        pack
    }

    #[test]
    fn guide_pack_json_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.json");
        let pack = awkward_pack();
        pack.save_json(&path).unwrap();
        assert_eq!(GuidePack::load_json(&path).unwrap(), pack);
    }

    #[test]
    fn guide_pack_bincode_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.bin");
        let pack = awkward_pack();
        pack.save_bincode(&path).unwrap();
        assert_eq!(GuidePack::load_bincode(&path).unwrap(), pack);
    }

    #[test]
    fn unit_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ga.json");
        std::fs::write(&path, GA_UNIT).unwrap();
        let unit = Unit::load_json(&path).unwrap();
        assert_eq!(unit, Unit::from_json_str(GA_UNIT).unwrap());
        assert!(Unit::load_json(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn corrupt_pack_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad");
        std::fs::write(&path, b"not a pack").unwrap();
        assert!(GuidePack::load_json(&path).is_err());
        assert!(GuidePack::load_bincode(&path).is_err());
    }
}
