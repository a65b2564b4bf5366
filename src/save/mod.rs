//! Saved-game codec and persistence stores.

pub mod codec;
pub mod store;

pub use codec::{SavedGame, SavedPlayer, SavedToken, SAVE_KEY};
pub use store::{FileStore, MemoryStore, SaveStore};
