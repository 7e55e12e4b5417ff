// Simon Says - cooperative real-time memory game engine
// Library exports for the demo binary and the integration tests

pub mod config;
pub mod game;
pub mod hal;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use game::{
    GameEngine, GameState, InputSlot, Melody, MelodyPlayer, SlotId, BUTTON_COUNT,
    MAX_SEQUENCE_LENGTH,
};
pub use hal::{elapsed, Millis, Peripherals};
pub use sim::{EntropyRandom, ScriptedRandom, SimBoard};
