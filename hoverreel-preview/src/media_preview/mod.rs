pub mod handle;
pub mod machine;

// Re-export primary types for convenience
pub use handle::{MediaHandle, PlayTicket};
pub use machine::{
    MediaPreviewStateMachine, MediaTransition, PreviewStage, TrailerState,
};
