use crate::gallery::mode::{GalleryMode, StreetSummary};
use std::sync::mpsc::{self, Receiver, Sender};

/// Opaque props forwarded to a dialog renderer.
pub type DialogProps = serde_json::Map<String, serde_json::Value>;

/// Requests the view layer sends to the shared state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Make this street the current one everywhere
    SwitchStreet(String),
    /// Ask for the gallery data again after a failed load
    RetryDataLoad,
    OpenDialog { name: String, props: DialogProps },
    CloseDialog,
}

impl Intent {
    pub fn open_dialog(name: impl Into<String>) -> Self {
        Self::OpenDialog {
            name: name.into(),
            props: DialogProps::new(),
        }
    }
}

/// Events raised by the host and the data loader rather than by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    ShowGallery {
        user_id: Option<String>,
        sign_in_promo: bool,
    },
    HideGallery,
    GalleryLoaded {
        user_id: Option<String>,
        streets: Vec<StreetSummary>,
    },
    GalleryLoadFailed {
        user_id: Option<String>,
        message: String,
    },
}

/// Work the host has to start after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchGallery { user_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GallerySlice {
    pub mode: GalleryMode,
    pub user_id: Option<String>,
    pub streets: Vec<StreetSummary>,
    pub visible: bool,
}

impl Default for GallerySlice {
    fn default() -> Self {
        Self {
            mode: GalleryMode::Loading,
            user_id: None,
            streets: Vec::new(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogSlice {
    pub name: Option<String>,
    pub props: DialogProps,
    /// Bumped on every open so a re-opened dialog starts fresh
    pub activation: u64,
}

/// The whole shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub gallery: GallerySlice,
    pub dialogs: DialogSlice,
    pub current_street: Option<String>,
}

/// Sending half of the intent channel handed to view components.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: Sender<Intent>,
}

impl Dispatcher {
    pub fn dispatch(&self, intent: Intent) {
        tracing::debug!(?intent, "dispatch");
        if self.tx.send(intent).is_err() {
            tracing::warn!("intent dropped, store is gone");
        }
    }
}

pub fn intent_channel() -> (Dispatcher, Receiver<Intent>) {
    let (tx, rx) = mpsc::channel();
    (Dispatcher { tx }, rx)
}

/// Owns the shared state. Only intents and host events change it.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, intent: Intent) -> Option<Command> {
        match intent {
            Intent::SwitchStreet(id) => {
                tracing::info!(street = %id, "switching street");
                self.state.current_street = Some(id);
                None
            }
            Intent::RetryDataLoad => {
                let gallery = &mut self.state.gallery;
                if gallery.mode != GalleryMode::Error {
                    tracing::debug!(mode = %gallery.mode, "retry ignored outside error mode");
                    return None;
                }
                gallery.mode = GalleryMode::Loading;
                Some(Command::FetchGallery {
                    user_id: gallery.user_id.clone(),
                })
            }
            Intent::OpenDialog { name, props } => {
                let dialogs = &mut self.state.dialogs;
                dialogs.name = Some(name);
                dialogs.props = props;
                dialogs.activation += 1;
                None
            }
            Intent::CloseDialog => {
                let dialogs = &mut self.state.dialogs;
                dialogs.name = None;
                dialogs.props.clear();
                None
            }
        }
    }

    pub fn apply(&mut self, event: HostEvent) -> Option<Command> {
        let gallery = &mut self.state.gallery;
        match event {
            HostEvent::ShowGallery {
                user_id,
                sign_in_promo,
            } => {
                gallery.visible = true;
                gallery.user_id = user_id;
                gallery.streets.clear();
                if sign_in_promo {
                    gallery.mode = GalleryMode::SignInPromo;
                    None
                } else {
                    gallery.mode = GalleryMode::Loading;
                    Some(Command::FetchGallery {
                        user_id: gallery.user_id.clone(),
                    })
                }
            }
            HostEvent::HideGallery => {
                gallery.visible = false;
                None
            }
            HostEvent::GalleryLoaded { user_id, streets } => {
                if gallery.mode != GalleryMode::Loading || gallery.user_id != user_id {
                    tracing::debug!(?user_id, "discarding stale gallery data");
                    return None;
                }
                tracing::info!(count = streets.len(), ?user_id, "gallery loaded");
                gallery.mode = GalleryMode::Gallery;
                gallery.streets = streets;
                None
            }
            HostEvent::GalleryLoadFailed { user_id, message } => {
                if gallery.mode != GalleryMode::Loading || gallery.user_id != user_id {
                    return None;
                }
                tracing::warn!(?user_id, %message, "gallery load failed");
                gallery.mode = GalleryMode::Error;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_store(user_id: Option<&str>, ids: &[&str]) -> Store {
        let mut store = Store::new();
        let user_id = user_id.map(str::to_string);
        store.apply(HostEvent::ShowGallery {
            user_id: user_id.clone(),
            sign_in_promo: false,
        });
        store.apply(HostEvent::GalleryLoaded {
            user_id,
            streets: ids.iter().map(|id| StreetSummary::new(*id)).collect(),
        });
        store
    }

    #[test]
    fn test_show_gallery_starts_fetch() {
        let mut store = Store::new();
        let cmd = store.apply(HostEvent::ShowGallery {
            user_id: Some("alice".to_string()),
            sign_in_promo: false,
        });
        assert_eq!(
            cmd,
            Some(Command::FetchGallery {
                user_id: Some("alice".to_string())
            })
        );
        assert!(store.state().gallery.visible);
        assert_eq!(store.state().gallery.mode, GalleryMode::Loading);
    }

    #[test]
    fn test_sign_in_promo_does_not_fetch() {
        let mut store = Store::new();
        let cmd = store.apply(HostEvent::ShowGallery {
            user_id: None,
            sign_in_promo: true,
        });
        assert!(cmd.is_none());
        assert_eq!(store.state().gallery.mode, GalleryMode::SignInPromo);
    }

    #[test]
    fn test_loaded_moves_to_gallery() {
        let store = loaded_store(Some("alice"), &["s1", "s2"]);
        assert_eq!(store.state().gallery.mode, GalleryMode::Gallery);
        assert_eq!(store.state().gallery.streets.len(), 2);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut store = Store::new();
        store.apply(HostEvent::ShowGallery {
            user_id: Some("bob".to_string()),
            sign_in_promo: false,
        });
        store.apply(HostEvent::GalleryLoaded {
            user_id: Some("alice".to_string()),
            streets: vec![StreetSummary::new("s1")],
        });
        assert_eq!(store.state().gallery.mode, GalleryMode::Loading);
        assert!(store.state().gallery.streets.is_empty());
    }

    #[test]
    fn test_failure_then_retry() {
        let mut store = Store::new();
        store.apply(HostEvent::ShowGallery {
            user_id: None,
            sign_in_promo: false,
        });
        store.apply(HostEvent::GalleryLoadFailed {
            user_id: None,
            message: "timeout".to_string(),
        });
        assert_eq!(store.state().gallery.mode, GalleryMode::Error);

        let cmd = store.dispatch(Intent::RetryDataLoad);
        assert_eq!(cmd, Some(Command::FetchGallery { user_id: None }));
        assert_eq!(store.state().gallery.mode, GalleryMode::Loading);
    }

    #[test]
    fn test_retry_ignored_when_not_in_error() {
        let mut store = loaded_store(None, &["s1"]);
        assert!(store.dispatch(Intent::RetryDataLoad).is_none());
        assert_eq!(store.state().gallery.mode, GalleryMode::Gallery);
    }

    #[test]
    fn test_switch_street() {
        let mut store = Store::new();
        store.dispatch(Intent::SwitchStreet("s9".to_string()));
        assert_eq!(store.state().current_street.as_deref(), Some("s9"));
    }

    #[test]
    fn test_open_and_close_dialog() {
        let mut store = Store::new();
        store.dispatch(Intent::open_dialog("ABOUT"));
        assert_eq!(store.state().dialogs.name.as_deref(), Some("ABOUT"));
        assert_eq!(store.state().dialogs.activation, 1);

        store.dispatch(Intent::open_dialog("DONATE"));
        assert_eq!(store.state().dialogs.name.as_deref(), Some("DONATE"));
        assert_eq!(store.state().dialogs.activation, 2);

        store.dispatch(Intent::CloseDialog);
        assert!(store.state().dialogs.name.is_none());
    }

    #[test]
    fn test_dispatcher_delivers_intents() {
        let (dispatcher, rx) = intent_channel();
        dispatcher.dispatch(Intent::CloseDialog);
        assert!(matches!(rx.recv(), Ok(Intent::CloseDialog)));
    }

    #[test]
    fn test_dispatcher_survives_dropped_receiver() {
        let (dispatcher, rx) = intent_channel();
        drop(rx);
        dispatcher.dispatch(Intent::RetryDataLoad);
    }
}
