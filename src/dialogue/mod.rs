//! The conversation core: session data model, stage state machine, and
//! the pure dialogue engine that drives the keyword collection flow.

pub mod engine;
pub mod model;
pub mod prompts;
pub mod state;

pub use engine::{step, SideEffect, StepOutcome};
pub use model::{ChatMessage, Classification, ClassifiedWord, Role, Session};
pub use state::Stage;
