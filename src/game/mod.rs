// Game module - melody data, playback, input slots, and the state machine

pub mod engine;
pub mod melody;
pub mod player;
pub mod slot;

pub use engine::{GameEngine, GameState, BUTTON_COUNT, MAX_SEQUENCE_LENGTH};
pub use melody::Melody;
pub use player::MelodyPlayer;
pub use slot::{InputSlot, SlotId};
