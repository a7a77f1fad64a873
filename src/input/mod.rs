//! Keyboard input for the track list.
//!
//! [`KeyInput`] is the engine's view of a key press. It can be parsed from chord strings
//! (`"shift+down"`, `"ctrl+a"`) or translated from terminal events with [`key_input`].

pub mod events;
pub mod keys;

pub use events::key_input;
pub use keys::{Key, KeyInput, Modifiers};
