pub mod controller;
pub mod events;
pub mod view;

pub use controller::PreviewSessionController;
pub use events::{CloseReason, PreviewEvent};
pub use view::PreviewView;
