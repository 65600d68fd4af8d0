mod about;
mod donate;
mod save_as_image;

pub use about::AboutDialog;
pub use donate::DonateDialog;
pub use save_as_image::SaveAsImageDialog;

use crate::store::{Dispatcher, DialogProps, Intent};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every dialog the app knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogName {
    About,
    SaveAsImage,
    Donate,
}

impl DialogName {
    pub const ALL: [DialogName; 3] = [Self::About, Self::SaveAsImage, Self::Donate];

    pub fn key(self) -> &'static str {
        match self {
            Self::About => "ABOUT",
            Self::SaveAsImage => "SAVE_AS_IMAGE",
            Self::Donate => "DONATE",
        }
    }
}

impl fmt::Display for DialogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DialogName {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| DialogError::Unregistered(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The shared state names a dialog this build does not have.
    #[error("no dialog registered under {0:?}")]
    Unregistered(String),
}

/// The dialog part of the shared state, as the overlay sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    pub active_name: Option<String>,
    pub props: DialogProps,
    pub activation: u64,
}

/// Map the stored key to a registered dialog. `Ok(None)` means closed.
pub fn resolve(active_name: Option<&str>) -> Result<Option<DialogName>, DialogError> {
    active_name.map(str::parse).transpose()
}

/// What a dialog did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKey {
    Consumed,
    Ignored,
    Close { status: Option<String> },
}

/// A live dialog together with its local state.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveDialog {
    About(AboutDialog),
    SaveAsImage(SaveAsImageDialog),
    Donate(DonateDialog),
}

impl ActiveDialog {
    pub fn instantiate(name: DialogName, props: &DialogProps) -> Self {
        match name {
            DialogName::About => Self::About(AboutDialog::new()),
            DialogName::SaveAsImage => Self::SaveAsImage(SaveAsImageDialog::new(props)),
            DialogName::Donate => Self::Donate(DonateDialog::new(props)),
        }
    }

    pub fn name(&self) -> DialogName {
        match self {
            Self::About(_) => DialogName::About,
            Self::SaveAsImage(_) => DialogName::SaveAsImage,
            Self::Donate(_) => DialogName::Donate,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogKey {
        if key.code == KeyCode::Esc {
            return DialogKey::Close { status: None };
        }
        match self {
            Self::About(dialog) => dialog.handle_key(key),
            Self::SaveAsImage(dialog) => dialog.handle_key(key),
            Self::Donate(dialog) => dialog.handle_key(key),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match self {
            Self::About(dialog) => dialog.render(frame),
            Self::SaveAsImage(dialog) => dialog.render(frame),
            Self::Donate(dialog) => dialog.render(frame),
        }
    }
}

/// Keeps at most one dialog alive, in step with the shared state.
#[derive(Debug)]
pub struct DialogMultiplexer {
    active: Option<(u64, ActiveDialog)>,
    dispatcher: Dispatcher,
}

impl DialogMultiplexer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            active: None,
            dispatcher,
        }
    }

    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref().map(|(_, dialog)| dialog)
    }

    /// Bring the live dialog in line with `state`.
    ///
    /// A new activation always gets a fresh instance, even when the same
    /// dialog is opened again.
    pub fn sync(&mut self, state: &DialogState) -> Result<(), DialogError> {
        let name = match resolve(state.active_name.as_deref()) {
            Ok(name) => name,
            Err(err) => {
                self.active = None;
                tracing::error!(error = %err, "dialog registry and state disagree");
                return Err(err);
            }
        };

        let Some(name) = name else {
            if let Some((_, closed)) = self.active.take() {
                tracing::debug!(dialog = %closed.name(), "dialog closed");
            }
            return Ok(());
        };

        let current = matches!(
            &self.active,
            Some((activation, dialog)) if *activation == state.activation && dialog.name() == name
        );
        if !current {
            tracing::info!(dialog = %name, activation = state.activation, "dialog opened");
            self.active = Some((state.activation, ActiveDialog::instantiate(name, &state.props)));
        }
        Ok(())
    }

    /// Route a key to the open dialog. Returns `None` when no dialog is open
    /// or the dialog did not use the key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogKey> {
        let (_, dialog) = self.active.as_mut()?;
        match dialog.handle_key(key) {
            DialogKey::Ignored => None,
            DialogKey::Close { status } => {
                self.dispatcher.dispatch(Intent::CloseDialog);
                Some(DialogKey::Close { status })
            }
            DialogKey::Consumed => Some(DialogKey::Consumed),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if let Some(dialog) = self.active() {
            dialog.render(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::intent_channel;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open(name: &str, activation: u64) -> DialogState {
        DialogState {
            active_name: Some(name.to_string()),
            props: DialogProps::new(),
            activation,
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve(Some("ABOUT")), Ok(Some(DialogName::About)));
        assert_eq!(resolve(Some("SAVE_AS_IMAGE")), Ok(Some(DialogName::SaveAsImage)));
        assert_eq!(resolve(None), Ok(None));
        assert_eq!(
            resolve(Some("UNKNOWN")),
            Err(DialogError::Unregistered("UNKNOWN".to_string()))
        );
    }

    #[test]
    fn test_registry_keys_round_trip() {
        for name in DialogName::ALL {
            assert_eq!(name.key().parse::<DialogName>(), Ok(name));
        }
    }

    #[test]
    fn test_sync_open_switch_close() {
        let (dispatcher, _rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);

        mux.sync(&DialogState::default()).unwrap();
        assert!(mux.active().is_none());

        mux.sync(&open("ABOUT", 1)).unwrap();
        assert_eq!(mux.active().map(ActiveDialog::name), Some(DialogName::About));

        mux.sync(&open("DONATE", 2)).unwrap();
        assert_eq!(mux.active().map(ActiveDialog::name), Some(DialogName::Donate));

        mux.sync(&DialogState::default()).unwrap();
        assert!(mux.active().is_none());
    }

    #[test]
    fn test_sync_unregistered_is_an_error() {
        let (dispatcher, _rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);
        mux.sync(&open("ABOUT", 1)).unwrap();

        let err = mux.sync(&open("SETTINGS", 2)).unwrap_err();
        assert_eq!(err, DialogError::Unregistered("SETTINGS".to_string()));
        assert!(mux.active().is_none());
    }

    #[test]
    fn test_same_activation_keeps_local_state() {
        let (dispatcher, _rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);
        let state = open("DONATE", 1);

        mux.sync(&state).unwrap();
        mux.handle_key(key(KeyCode::Right));
        let before = mux.active().cloned();

        mux.sync(&state).unwrap();
        assert_eq!(mux.active().cloned(), before);
    }

    #[test]
    fn test_reactivation_gets_fresh_instance() {
        let (dispatcher, _rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);

        mux.sync(&open("DONATE", 1)).unwrap();
        mux.handle_key(key(KeyCode::Right));
        assert_ne!(
            mux.active().cloned(),
            Some(ActiveDialog::instantiate(DialogName::Donate, &DialogProps::new()))
        );

        // switching away and back, or reopening, starts over
        mux.sync(&open("ABOUT", 2)).unwrap();
        mux.sync(&open("DONATE", 3)).unwrap();
        assert_eq!(
            mux.active().cloned(),
            Some(ActiveDialog::instantiate(DialogName::Donate, &DialogProps::new()))
        );
    }

    #[test]
    fn test_escape_dispatches_close() {
        let (dispatcher, rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);
        mux.sync(&open("ABOUT", 1)).unwrap();

        let result = mux.handle_key(key(KeyCode::Esc));
        assert_eq!(result, Some(DialogKey::Close { status: None }));
        assert_eq!(rx.try_recv(), Ok(Intent::CloseDialog));
    }

    #[test]
    fn test_keys_fall_through_when_closed() {
        let (dispatcher, rx) = intent_channel();
        let mut mux = DialogMultiplexer::new(dispatcher);

        assert!(mux.handle_key(key(KeyCode::Char('q'))).is_none());
        assert!(rx.try_recv().is_err());
    }
}
