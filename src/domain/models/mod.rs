mod action;
mod author;
mod backend;
mod event;
mod loading;
mod message;
mod slash_commands;
mod table;
mod textarea;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use slash_commands::*;
pub use table::*;
pub use textarea::*;
