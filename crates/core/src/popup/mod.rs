//! Popup: title search, trending lists and the "show widget again" action.

mod controller;
mod debounce;
mod state;
mod tab;

pub use controller::PopupController;
pub use debounce::{Debouncer, SequenceCounter, SequenceGuard};
pub use state::{LoadState, PopupState, PopupTab};
pub use tab::{ActiveTab, PageTab, TabError};
