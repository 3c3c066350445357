pub mod config;
pub mod controller;
pub mod error;
pub mod pairing;
pub mod panel;
pub mod timeline;
pub mod tween;

pub use config::Config;
pub use controller::{Controller, Cue, Effect, PanelId, Target, WrapHideTicket};
pub use error::Error;
pub use pairing::{pair_up, Pair, Role};
pub use panel::{Epoch, Panel, PanelEvent, PanelState};

pub type Result<T, E = Error> = std::result::Result<T, E>;
