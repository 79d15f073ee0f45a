mod action;
mod channel;
mod editor;
mod entry;
mod event;
mod launcher;
mod message;
mod session;
mod textarea;

pub use action::*;
pub use channel::*;
pub use editor::*;
pub use entry::*;
pub use event::*;
pub use launcher::*;
pub use message::*;
pub use session::*;
pub use textarea::*;
