use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::{error::BuildError, services::Artifacts};

/// Bumped whenever the persisted artifact layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    created_at: DateTime<Utc>,
    artifacts: &'a Artifacts,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    created_at: DateTime<Utc>,
    artifacts: Artifacts,
}

/// Writes the built artifacts to `path` as a single JSON document
pub fn save(path: impl AsRef<Path>, artifacts: &Artifacts) -> Result<(), BuildError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(
        &mut writer,
        &SnapshotRef {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            artifacts,
        },
    )?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "Saved model snapshot");
    Ok(())
}

/// Reads artifacts written by [`save`] and checks they are mutually consistent
pub fn load(path: impl AsRef<Path>) -> Result<Artifacts, BuildError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = serde_json::from_reader(reader)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(BuildError::Inconsistent(format!(
            "snapshot version {} is not supported (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }
    snapshot.artifacts.validate()?;

    tracing::info!(
        path = %path.display(),
        created_at = %snapshot.created_at,
        items = snapshot.artifacts.catalog.len(),
        "Loaded model snapshot"
    );

    Ok(snapshot.artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, Rating};
    use crate::services::{DuplicatePolicy, FeatureBuilder};

    fn artifacts() -> Artifacts {
        Artifacts::build(
            vec![
                Item::new(1, "A", &["Action", "Sci-Fi"]),
                Item::new(2, "B", &["Action"]),
            ],
            &[Rating::new(1, 1, 4.0), Rating::new(2, 2, 3.0)],
            DuplicatePolicy::LastWins,
            &FeatureBuilder::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_save_then_load_preserves_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");

        let original = artifacts();
        save(&path, &original).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        save(&path, &artifacts()).unwrap();

        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc["version"] = serde_json::json!(99);
        std::fs::write(&path, doc.to_string()).unwrap();

        assert!(matches!(load(&path), Err(BuildError::Inconsistent(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("absent.json")),
            Err(BuildError::Io(_))
        ));
    }
}
