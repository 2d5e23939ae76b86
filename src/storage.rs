use crate::errors::StoreError;
use crate::models::Round;
use crate::store::seed_rounds;
use crate::validation::validate_collection;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the persisted rounds, falling back to the seed set when the file is
/// missing, unreadable, or holds a collection a backup restore would refuse.
pub async fn load_rounds(path: &Path) -> Vec<Round> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Round>>(&bytes) {
            Ok(rounds) => match validate_collection(&rounds) {
                Ok(()) => rounds,
                Err((index, err)) => {
                    error!("rounds file {} has a bad round #{index}: {err}", path.display());
                    seed_rounds()
                }
            },
            Err(err) => {
                error!("failed to parse rounds file {}: {err}", path.display());
                seed_rounds()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no rounds file at {}, starting from seed data", path.display());
            seed_rounds()
        }
        Err(err) => {
            error!("failed to read rounds file {}: {err}", path.display());
            seed_rounds()
        }
    }
}

pub async fn persist_rounds(path: &Path, rounds: &[Round]) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(rounds)?;
    fs::write(path, payload).await?;
    Ok(())
}
