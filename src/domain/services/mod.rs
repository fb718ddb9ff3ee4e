pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod scroll;

pub use actions::*;
pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use scroll::*;
