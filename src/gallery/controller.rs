use crate::gallery::mode::{street_count_text, GalleryMode, StreetSummary, ViewState};
use crate::gallery::permissions::Permissions;
use crate::gallery::selection::SelectionTracker;
use crate::store::{Dispatcher, Intent};
use ratatui::widgets::ListState;
use std::rc::{Rc, Weak};

pub const SIGN_IN_URL: &str = "/twitter-sign-in?redirectUri=/just-signed-in";
pub const URL_NEW_STREET: &str = "/new";
pub const URL_NEW_STREET_COPY_LAST: &str = "/copy-last";

pub fn profile_url(user_id: &str) -> String {
    format!("https://twitter.com/{}", user_id)
}

/// What the gallery shows, one variant per mode.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryContent {
    SignInPromo { sign_in_url: &'static str },
    Loading,
    Error { retry: Intent },
    Gallery(GalleryPanel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryLabel {
    User { user_id: String, profile_url: String },
    AllStreets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLinks {
    pub new_street: &'static str,
    pub copy_last_street: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub street: StreetSummary,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPanel {
    pub label: GalleryLabel,
    pub street_count: Option<String>,
    pub full_width: bool,
    pub owner_links: Option<OwnerLinks>,
    pub items: Vec<GalleryItem>,
}

impl GalleryPanel {
    pub fn selected_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.selected)
    }
}

/// Build the content for one frame.
///
/// Only the `Gallery` mode looks at the streets or the user id; the other
/// three are fixed per mode.
pub fn render_content(
    view: &ViewState,
    selected: Option<&str>,
    permissions: Permissions,
) -> GalleryContent {
    match view.mode {
        GalleryMode::SignInPromo => GalleryContent::SignInPromo {
            sign_in_url: SIGN_IN_URL,
        },
        GalleryMode::Loading => GalleryContent::Loading,
        GalleryMode::Error => GalleryContent::Error {
            retry: Intent::RetryDataLoad,
        },
        GalleryMode::Gallery => GalleryContent::Gallery(render_panel(view, selected, permissions)),
    }
}

fn render_panel(view: &ViewState, selected: Option<&str>, permissions: Permissions) -> GalleryPanel {
    let label = match &view.user_id {
        Some(user_id) => GalleryLabel::User {
            user_id: user_id.clone(),
            profile_url: profile_url(user_id),
        },
        None => GalleryLabel::AllStreets,
    };

    let owner_links = permissions.is_owner.then_some(OwnerLinks {
        new_street: URL_NEW_STREET,
        copy_last_street: URL_NEW_STREET_COPY_LAST,
    });

    let items = view
        .streets
        .iter()
        .map(|street| GalleryItem {
            street: street.clone(),
            selected: selected == Some(street.id.as_str()),
        })
        .collect();

    GalleryPanel {
        label,
        street_count: view
            .user_id
            .as_ref()
            .map(|_| street_count_text(view.streets.len())),
        full_width: permissions.full_width,
        owner_links,
        items,
    }
}

/// Something that can bring a row into view.
pub trait ScrollHost {
    fn scroll_into_view(&mut self, index: usize);
}

impl ScrollHost for ListState {
    fn scroll_into_view(&mut self, index: usize) {
        self.select(Some(index));
    }
}

/// Post-commit request to scroll the selected row into view.
///
/// Tied to the controller that issued it; once that controller is dropped
/// running the effect does nothing.
#[derive(Debug)]
#[must_use = "a scroll effect does nothing until it is run"]
pub struct ScrollEffect {
    street_id: String,
    index: usize,
    mount: Weak<()>,
}

impl ScrollEffect {
    pub fn street_id(&self) -> &str {
        &self.street_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_live(&self) -> bool {
        self.mount.strong_count() > 0
    }

    /// Returns whether the host was scrolled.
    pub fn run(self, host: &mut impl ScrollHost) -> bool {
        if !self.is_live() {
            tracing::debug!(street = %self.street_id, "skipping scroll for unmounted gallery");
            return false;
        }
        host.scroll_into_view(self.index);
        true
    }
}

/// Result of one commit.
#[derive(Debug)]
pub struct Rendered {
    pub content: GalleryContent,
    pub effect: Option<ScrollEffect>,
}

/// A mounted gallery: owns the selection and issues scroll effects.
#[derive(Debug)]
pub struct GalleryModeController {
    selection: SelectionTracker,
    mount: Rc<()>,
    committed: bool,
    last_committed: Option<String>,
}

impl GalleryModeController {
    pub fn mount(dispatcher: Dispatcher) -> Self {
        Self {
            selection: SelectionTracker::new(dispatcher),
            mount: Rc::new(()),
            committed: false,
            last_committed: None,
        }
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn select(&mut self, id: &str) {
        self.selection.select(id);
    }

    /// Move the selection by `delta` rows, starting from the first row when
    /// nothing is selected.
    pub fn select_offset(&mut self, streets: &[StreetSummary], delta: isize) {
        if streets.is_empty() {
            return;
        }
        let current = self
            .selection
            .selected()
            .and_then(|id| streets.iter().position(|s| s.id == id));
        let next = match current {
            Some(i) => i.saturating_add_signed(delta).min(streets.len() - 1),
            None => 0,
        };
        if current != Some(next) {
            self.selection.select(&streets[next].id);
        }
    }

    /// Reconcile the selection, render, and decide whether a scroll is due.
    pub fn commit(&mut self, view: &ViewState, permissions: Permissions) -> Rendered {
        self.selection.reconcile(&view.streets);
        let selected = self.selection.selected().map(str::to_string);
        let content = render_content(view, selected.as_deref(), permissions);

        let changed = !self.committed || selected != self.last_committed;
        self.committed = true;
        self.last_committed = selected.clone();

        let effect = match (&content, selected) {
            (GalleryContent::Gallery(panel), Some(street_id)) if changed => {
                panel.selected_index().map(|index| ScrollEffect {
                    street_id,
                    index,
                    mount: Rc::downgrade(&self.mount),
                })
            }
            _ => None,
        };

        Rendered { content, effect }
    }
}
