//! The turn state machine and its emitted events.

pub mod events;
pub mod turn;

pub use events::GameEvent;
pub use turn::{AppliedMove, TurnEngine, TurnPhase};
