pub mod controller;
pub mod mode;
pub mod permissions;
pub mod selection;

pub use controller::{GalleryContent, GalleryModeController, ScrollEffect};
pub use mode::{GalleryMode, StreetSummary, ViewState};
pub use permissions::{Permissions, SessionIdentity};
