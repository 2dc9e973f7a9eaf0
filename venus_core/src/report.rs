// venus_core/src/report.rs

//! The rock report: the rows shown in the console and dump table, and the
//! JSON file they are persisted to.

use crate::error::ReportError;
use crate::mapping::RockFeature;
use crate::messages::Colour;
use crate::types::RobotId;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Column headings of the rock table, in display order.
pub const ROCK_COLUMNS: [&str; 5] = ["Robot", "ID", "Colour", "Size", "Coordinates"];

/// One row of the rock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockEntry {
    pub robot: RobotId,
    pub id: u64,
    pub colour: Colour,
    pub size: i64,
    pub coordinates: [i64; 2],
}

impl From<&RockFeature> for RockEntry {
    fn from(rock: &RockFeature) -> Self {
        Self {
            robot: rock.owner,
            id: rock.id,
            colour: rock.colour.clone(),
            size: rock.size,
            coordinates: [rock.position.x, rock.position.y],
        }
    }
}

impl RockEntry {
    /// The row as display strings, matching [`ROCK_COLUMNS`].
    pub fn cells(&self) -> [String; 5] {
        [
            self.robot.to_string(),
            self.id.to_string(),
            self.colour.to_string(),
            self.size.to_string(),
            format!("({}, {})", self.coordinates[0], self.coordinates[1]),
        ]
    }
}

/// Renders the rocks as a plain-text table for the console.
pub fn format_rock_table(rocks: &[RockEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "==== ROCK DATA ====");
    let _ = writeln!(
        out,
        "{:<8}{:<8}{:<12}{:<8}{}",
        ROCK_COLUMNS[0], ROCK_COLUMNS[1], ROCK_COLUMNS[2], ROCK_COLUMNS[3], ROCK_COLUMNS[4]
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for rock in rocks {
        let [robot, id, colour, size, coordinates] = rock.cells();
        let _ = writeln!(out, "{robot:<8}{id:<8}{colour:<12}{size:<8}{coordinates}");
    }
    let _ = write!(out, "{}", "=".repeat(60));
    out
}

/// Writes the snapshot as JSON, replacing whatever was at `path`.
pub fn save_snapshot(path: &Path, rocks: &[RockEntry]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, rocks)?;
    writer.flush().map_err(io_err)
}

/// Reads a snapshot previously written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Vec<RockEntry>, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(robot: RobotId, id: u64, colour: Colour, coordinates: [i64; 2]) -> RockEntry {
        RockEntry {
            robot,
            id,
            colour,
            size: 5,
            coordinates,
        }
    }

    #[test]
    fn serializes_with_the_expected_field_names() {
        let rock = entry(RobotId::A, 1, Colour::Name("red".into()), [2, 0]);
        let json = serde_json::to_value(&rock).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "robot": "A",
                "id": 1,
                "colour": "red",
                "size": 5,
                "coordinates": [2, 0]
            })
        );
    }

    #[test]
    fn table_lists_every_rock_in_order() {
        let rocks = vec![
            entry(RobotId::B, 1, Colour::Code(4), [-1, -1]),
            entry(RobotId::A, 2, Colour::Unset, [3, 0]),
        ];
        let table = format_rock_table(&rocks);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "==== ROCK DATA ====");
        assert!(lines[1].starts_with("Robot"));
        assert!(lines[3].starts_with("B       1       4"));
        assert!(lines[3].ends_with("(-1, -1)"));
        assert!(lines[4].contains("none"));
        assert!(lines[4].ends_with("(3, 0)"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn empty_table_still_has_headers() {
        let table = format_rock_table(&[]);
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn snapshot_survives_a_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let rocks = vec![
            entry(RobotId::A, 1, Colour::Name("red".into()), [2, 0]),
            entry(RobotId::B, 2, Colour::Flag(false), [-3, 1]),
        ];

        save_snapshot(&path, &rocks).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), rocks);

        // A later save overwrites rather than appends.
        save_snapshot(&path, &rocks[..1]).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), rocks[..1].to_vec());
    }

    #[test]
    fn missing_snapshot_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        match load_snapshot(&path) {
            Err(ReportError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
