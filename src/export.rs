use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::course::Unit;

/// Unit title to export filename: whitespace runs collapse to underscores.
pub fn notes_filename(title: &str) -> String {
    let stem: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == ':')
        .collect();
    format!("{stem}_Notes.txt")
}

/// Writes a unit's notes as plain text into `dir`, returning the path.
/// The one file-writing behavior in the portal; failures surface as a status
/// line, never a crash.
pub fn export_unit_notes(unit: &Unit, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    let path = dir.join(notes_filename(&unit.title));
    fs::write(&path, &unit.notes)
        .with_context(|| format!("writing notes to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Unit {
        Unit {
            id: "u1".to_string(),
            title: "Unit 1: Network Optimization".to_string(),
            description: String::new(),
            video_url: String::new(),
            notes: "Center of Gravity Method, Linear Programming.".to_string(),
            completed: false,
        }
    }

    #[test]
    fn filename_replaces_whitespace() {
        assert_eq!(
            notes_filename("Unit 1: Network Optimization"),
            "Unit_1:_Network_Optimization_Notes.txt"
        );
    }

    #[test]
    fn filename_strips_path_hostile_characters() {
        assert_eq!(notes_filename("a/b\\c d"), "abc_d_Notes.txt");
    }

    #[test]
    fn export_writes_notes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let unit = unit();
        let path = export_unit_notes(&unit, dir.path()).unwrap();
        assert!(path.ends_with("Unit_1:_Network_Optimization_Notes.txt"));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, unit.notes);
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("fasn");
        let path = export_unit_notes(&unit(), &nested).unwrap();
        assert!(path.exists());
    }
}
