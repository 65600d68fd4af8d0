//! Read-only views of the shared state in the shapes the gallery and the
//! dialog overlay consume.

use crate::dialogs::DialogState;
use crate::gallery::{SessionIdentity, ViewState};
use crate::session::SessionProvider;
use crate::store::AppState;

pub fn project_view(state: &AppState) -> ViewState {
    let gallery = &state.gallery;
    ViewState {
        mode: gallery.mode,
        user_id: gallery.user_id.clone(),
        streets: gallery.streets.clone(),
        visible: gallery.visible,
    }
}

pub fn project_session(session: &dyn SessionProvider) -> SessionIdentity {
    SessionIdentity::from(session)
}

pub fn project_dialog(state: &AppState) -> DialogState {
    let dialogs = &state.dialogs;
    DialogState {
        active_name: dialogs.name.clone(),
        props: dialogs.props.clone(),
        activation: dialogs.activation,
    }
}
