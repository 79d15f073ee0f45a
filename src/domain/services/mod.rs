mod assistant_widget;
mod bubble;
mod bubble_list;
mod button_row;
pub mod channel;
mod cookies;
pub mod events;
mod message_log;
mod scroll;

pub use assistant_widget::*;
pub use bubble::*;
pub use bubble_list::*;
pub use button_row::*;
pub use cookies::*;
pub use message_log::*;
pub use scroll::*;
