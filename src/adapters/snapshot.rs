//! Loading and saving an [`InMemoryRoster`] through any [`Storage`].

use crate::adapters::memory::{InMemoryRoster, RosterSnapshot};
use crate::core::Storage;
use crate::utils::error::{Result, RosterError};

/// Reads the snapshot at `path`. A missing file is an empty roster; a
/// snapshot with records lacking an id, or sharing one, is an error.
pub async fn load_roster<S: Storage>(storage: &S, path: &str) -> Result<InMemoryRoster> {
    match storage.read_file(path).await {
        Ok(data) => {
            let snapshot: RosterSnapshot = serde_json::from_slice(&data)?;
            tracing::debug!(
                "Loaded {} course(s) and {} student(s) from {}",
                snapshot.courses.len(),
                snapshot.students.len(),
                path
            );
            InMemoryRoster::from_snapshot(snapshot)
        }
        Err(RosterError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No roster at {}, starting empty", path);
            Ok(InMemoryRoster::new())
        }
        Err(e) => Err(e),
    }
}

pub async fn save_roster<S: Storage>(storage: &S, path: &str, roster: &InMemoryRoster) -> Result<()> {
    let snapshot = roster.snapshot()?;
    let json = serde_json::to_vec_pretty(&snapshot)?;
    tracing::debug!("Writing roster snapshot ({} bytes) to {}", json.len(), path);
    storage.write_file(path, &json).await
}
