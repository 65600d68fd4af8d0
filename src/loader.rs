use crate::gallery::StreetSummary;
use crate::store::HostEvent;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEMO_STREETS: &str = include_str!("../demos/streets.json");

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad street data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("simulated network failure")]
    Simulated,
}

#[derive(Deserialize)]
struct StreetsResponse {
    streets: Vec<StreetSummary>,
}

/// Parse a gallery response and keep the streets created by `user_id`
/// (all streets when `None`), newest first.
pub fn parse_streets(text: &str, user_id: Option<&str>) -> Result<Vec<StreetSummary>, LoadError> {
    let response: StreetsResponse = serde_json::from_str(text)?;
    let mut streets: Vec<StreetSummary> = response
        .streets
        .into_iter()
        .filter(|s| user_id.is_none() || s.creator_id.as_deref() == user_id)
        .collect();
    streets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(streets)
}

pub async fn fetch_streets(
    source: Option<&Path>,
    user_id: Option<&str>,
) -> Result<Vec<StreetSummary>, LoadError> {
    match source {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            parse_streets(&text, user_id)
        }
        None => parse_streets(DEMO_STREETS, user_id),
    }
}

/// Fetches gallery data in the background and reports back as host events.
#[derive(Debug, Clone)]
pub struct GalleryLoader {
    source: Option<PathBuf>,
    delay: Duration,
    fail_next: Arc<AtomicBool>,
    events: Sender<HostEvent>,
}

impl GalleryLoader {
    pub fn new(
        source: Option<PathBuf>,
        delay: Duration,
        fail_first: bool,
        events: Sender<HostEvent>,
    ) -> Self {
        Self {
            source,
            delay,
            fail_next: Arc::new(AtomicBool::new(fail_first)),
            events,
        }
    }

    pub fn spawn_fetch(&self, user_id: Option<String>) -> tokio::task::JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            tracing::debug!(?user_id, "fetching gallery");
            tokio::time::sleep(loader.delay).await;

            let result = if loader.fail_next.swap(false, Ordering::SeqCst) {
                Err(LoadError::Simulated)
            } else {
                fetch_streets(loader.source.as_deref(), user_id.as_deref()).await
            };

            let event = match result {
                Ok(streets) => HostEvent::GalleryLoaded { user_id, streets },
                Err(e) => HostEvent::GalleryLoadFailed {
                    user_id,
                    message: e.to_string(),
                },
            };
            if loader.events.send(event).is_err() {
                tracing::debug!("gallery result dropped, app has exited");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_data_parses() {
        let all = parse_streets(DEMO_STREETS, None).unwrap();
        assert_eq!(all.len(), 8);
        assert!(all.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_filter_by_creator() {
        let alice = parse_streets(DEMO_STREETS, Some("alice")).unwrap();
        assert_eq!(alice.len(), 3);
        assert!(alice.iter().all(|s| s.creator_id.as_deref() == Some("alice")));

        let nobody = parse_streets(DEMO_STREETS, Some("zed")).unwrap();
        assert!(nobody.is_empty());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = parse_streets("[1, 2]", None).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"streets": [{{"id": "x1", "creatorId": "eve"}}]}}"#).unwrap();

        let streets = fetch_streets(Some(file.path()), Some("eve")).await.unwrap();
        assert_eq!(streets, vec![StreetSummary { creator_id: Some("eve".to_string()), ..StreetSummary::new("x1") }]);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let err = fetch_streets(Some(Path::new("/definitely/not/here.json")), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_loader_fails_first_then_succeeds() {
        let (tx, rx) = std::sync::mpsc::channel();
        let loader = GalleryLoader::new(None, Duration::ZERO, true, tx);

        loader.spawn_fetch(None).await.unwrap();
        assert!(matches!(
            rx.try_recv(),
            Ok(HostEvent::GalleryLoadFailed { user_id: None, .. })
        ));

        loader.spawn_fetch(Some("bob".to_string())).await.unwrap();
        match rx.try_recv() {
            Ok(HostEvent::GalleryLoaded { user_id, streets }) => {
                assert_eq!(user_id.as_deref(), Some("bob"));
                assert_eq!(streets.len(), 2);
            }
            other => panic!("expected loaded event, got {:?}", other),
        }
    }
}
