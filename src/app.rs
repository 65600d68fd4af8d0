use crate::config::Config;
use crate::dialogs::{DialogKey, DialogMultiplexer, DialogName};
use crate::error::AppError;
use crate::gallery::{GalleryContent, GalleryMode, GalleryModeController, Permissions, ScrollEffect};
use crate::loader::GalleryLoader;
use crate::projector;
use crate::session::SessionProvider;
use crate::store::{intent_channel, Command, DialogProps, Dispatcher, HostEvent, Intent, Store};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Hosts the view layer: owns the store, mounts the gallery, runs effects.
pub struct App {
    pub should_quit: bool,
    pub status_msg: String,

    store: Store,
    session: Box<dyn SessionProvider>,
    dispatcher: Dispatcher,
    intents: Receiver<Intent>,
    events: Receiver<HostEvent>,
    loader: GalleryLoader,

    // Mounted only while the gallery is visible
    gallery: Option<GalleryModeController>,
    content: Option<GalleryContent>,
    pending_scroll: Option<ScrollEffect>,
    pub list_state: ListState,

    dialogs: DialogMultiplexer,
}

impl App {
    pub fn new(config: &Config, session: Box<dyn SessionProvider>) -> Self {
        let (dispatcher, intents) = intent_channel();
        let (event_tx, events) = mpsc::channel();
        let loader = GalleryLoader::new(
            config.streets_file.clone(),
            Duration::from_millis(config.load_delay_ms),
            config.fail_first_load,
            event_tx,
        );

        Self {
            should_quit: false,
            status_msg: String::new(),
            store: Store::new(),
            session,
            dialogs: DialogMultiplexer::new(dispatcher.clone()),
            dispatcher,
            intents,
            events,
            loader,
            gallery: None,
            content: None,
            pending_scroll: None,
            list_state: ListState::default(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn content(&self) -> Option<&GalleryContent> {
        self.content.as_ref()
    }

    pub fn dialogs(&self) -> &DialogMultiplexer {
        &self.dialogs
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn show_gallery(&mut self, user_id: Option<String>) {
        self.apply(HostEvent::ShowGallery {
            user_id,
            sign_in_promo: false,
        });
    }

    /// Open the visitor's own gallery, or the sign-in promo when signed out.
    pub fn show_my_gallery(&mut self) {
        let event = match self.session.current_session() {
            Some(data) if self.session.is_signed_in() => HostEvent::ShowGallery {
                user_id: Some(data.user_id),
                sign_in_promo: false,
            },
            _ => HostEvent::ShowGallery {
                user_id: None,
                sign_in_promo: true,
            },
        };
        self.apply(event);
    }

    fn apply(&mut self, event: HostEvent) {
        if let Some(command) = self.store.apply(event) {
            self.run_command(command);
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::FetchGallery { user_id } => {
                self.loader.spawn_fetch(user_id);
            }
        }
    }

    /// Drain pending intents and events, then commit a new frame.
    pub fn update(&mut self) -> Result<(), AppError> {
        while let Ok(intent) = self.intents.try_recv() {
            if let Some(command) = self.store.dispatch(intent) {
                self.run_command(command);
            }
        }
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }

        let state = self.store.state();
        let view = projector::project_view(state);
        let session = projector::project_session(self.session.as_ref());

        if view.visible && self.gallery.is_none() {
            tracing::debug!("mounting gallery");
            self.gallery = Some(GalleryModeController::mount(self.dispatcher.clone()));
            self.list_state = ListState::default();
        } else if !view.visible && self.gallery.is_some() {
            tracing::debug!("unmounting gallery");
            self.gallery = None;
        }

        self.dialogs.sync(&projector::project_dialog(state))?;

        self.content = None;
        self.pending_scroll = None;
        if let Some(gallery) = self.gallery.as_mut() {
            let permissions = Permissions::compute(&session, view.user_id.as_deref());
            let rendered = gallery.commit(&view, permissions);
            self.content = Some(rendered.content);
            self.pending_scroll = rendered.effect;
        }
        Ok(())
    }

    /// Run the scroll effect of the frame that was just drawn.
    pub fn after_draw(&mut self) {
        if let Some(effect) = self.pending_scroll.take() {
            effect.run(&mut self.list_state);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.dialogs.handle_key(key) {
            Some(DialogKey::Close { status }) => {
                if let Some(status) = status {
                    self.status_msg = status;
                }
                return;
            }
            Some(_) => return,
            None if self.dialogs.active().is_some() => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                return;
            }
            None => {}
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.dispatcher.dispatch(Intent::open_dialog(DialogName::About.key())),
            KeyCode::Char('d') => self.dispatcher.dispatch(Intent::open_dialog(DialogName::Donate.key())),
            KeyCode::Char('i') => {
                let mut props = DialogProps::new();
                if let Some(id) = &self.store.state().current_street {
                    props.insert("filename".to_string(), format!("{}.png", id).into());
                }
                self.dispatcher.dispatch(Intent::OpenDialog {
                    name: DialogName::SaveAsImage.key().to_string(),
                    props,
                });
            }
            KeyCode::Char('g') => {
                let gallery = &self.store.state().gallery;
                if gallery.visible && gallery.user_id.is_none() && gallery.mode != GalleryMode::SignInPromo {
                    self.apply(HostEvent::HideGallery);
                } else {
                    self.show_gallery(None);
                }
            }
            KeyCode::Char('m') => self.show_my_gallery(),
            KeyCode::Esc => {
                if self.store.state().gallery.visible {
                    self.apply(HostEvent::HideGallery);
                }
            }
            _ => self.handle_gallery_key(key),
        }
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) {
        let Some(gallery) = self.gallery.as_mut() else {
            return;
        };
        let streets = &self.store.state().gallery.streets;

        match (key.code, &self.content) {
            (KeyCode::Char('r'), Some(GalleryContent::Error { retry })) => {
                self.status_msg = "Retrying...".to_string();
                self.dispatcher.dispatch(retry.clone());
            }
            (KeyCode::Down | KeyCode::Char('j'), Some(GalleryContent::Gallery(_))) => {
                gallery.select_offset(streets, 1);
            }
            (KeyCode::Up | KeyCode::Char('k'), Some(GalleryContent::Gallery(_))) => {
                gallery.select_offset(streets, -1);
            }
            (KeyCode::Home, Some(GalleryContent::Gallery(_))) => {
                gallery.select_offset(streets, isize::MIN);
            }
            (KeyCode::End, Some(GalleryContent::Gallery(_))) => {
                gallery.select_offset(streets, isize::MAX);
            }
            (KeyCode::Char(c @ ('n' | 'c')), Some(GalleryContent::Gallery(panel))) => {
                if let Some(links) = &panel.owner_links {
                    let link = if c == 'n' { links.new_street } else { links.copy_last_street };
                    tracing::info!(%link, "following owner link");
                    self.status_msg = format!("Opening {}", link);
                }
            }
            _ => {}
        }
    }
}
