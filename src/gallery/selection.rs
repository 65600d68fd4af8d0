use crate::gallery::mode::StreetSummary;
use crate::store::{Dispatcher, Intent};

/// Tracks the highlighted street for one mounted gallery.
///
/// Any id is accepted by [`select`](Self::select); an id that is not in the
/// list is dropped by the next [`reconcile`](Self::reconcile).
#[derive(Debug)]
pub struct SelectionTracker {
    selected: Option<String>,
    dispatcher: Dispatcher,
}

impl SelectionTracker {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            selected: None,
            dispatcher,
        }
    }

    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        self.dispatcher.dispatch(Intent::SwitchStreet(id.to_string()));
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Drop the selection if it no longer names a street in `streets`.
    pub fn reconcile(&mut self, streets: &[StreetSummary]) {
        let Some(id) = &self.selected else {
            return;
        };
        if !streets.iter().any(|street| &street.id == id) {
            tracing::debug!(street = %id, "clearing stale selection");
            self.selected = None;
        }
    }
}
