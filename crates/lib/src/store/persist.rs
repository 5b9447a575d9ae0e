//! Offline snapshot of the store state as a JSON file.

use super::State;
use std::path::Path;

/// Load a snapshot. A missing file or invalid JSON starts from an empty state; any other read
/// error is returned so the caller does not overwrite a snapshot it could not read.
pub async fn load_snapshot(path: impl AsRef<Path>) -> std::io::Result<State> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(serde_json::from_str(&s).unwrap_or_else(|e| {
            log::warn!("ignoring invalid store snapshot {}: {}", path.display(), e);
            State::default()
        })),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(State::default()),
        Err(e) => Err(e),
    }
}

/// Write the state to `path`, creating parent directories.
pub async fn save_snapshot(path: impl AsRef<Path>, state: &State) -> std::io::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Action;

    fn temp_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("parley-store-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn snapshot_survives_save_and_load() {
        let path = temp_dir().join("store.json");
        let mut state = State::default();
        state.reduce(&Action::SelectTeam("t1".into()));
        state.reduce(&Action::SelectChannel("c1".into()));

        save_snapshot(&path, &state).await.unwrap();
        let loaded = load_snapshot(&path).await.unwrap();
        assert_eq!(loaded.session().current_team_id, "t1");
        assert_eq!(loaded.session().current_channel_id, "c1");

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn missing_snapshot_is_empty_state() {
        let path = temp_dir().join("none.json");
        assert_eq!(load_snapshot(&path).await.unwrap(), State::default());
    }

    #[tokio::test]
    async fn invalid_snapshot_is_empty_state() {
        let dir = temp_dir();
        let path = dir.join("store.json");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(&path, "{not json").await.unwrap();
        assert_eq!(load_snapshot(&path).await.unwrap(), State::default());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn unreadable_snapshot_is_an_error() {
        // A directory where the file should be cannot be read as a snapshot.
        let dir = temp_dir();
        tokio::fs::create_dir_all(dir.join("store.json")).await.unwrap();
        assert!(load_snapshot(dir.join("store.json")).await.is_err());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
