// Input slot - one button / indicator LED / melody triple
// Debouncing is edge-logic only: a press is consumed once per cycle

use crate::game::melody::Melody;
use crate::game::player::MelodyPlayer;
use crate::hal::{BinaryInput, BinaryOutput, Millis};

/// Stable small-integer identity of a slot (0..BUTTON_COUNT)
pub type SlotId = u8;

/// A physical button, its indicator LED, and its associated melody.
///
/// Holds only edge-tracking state; the IO collaborators are passed in per
/// call so the engine keeps explicit ownership of the shared button/LED
/// channels.
pub struct InputSlot {
    id: SlotId,
    button_channel: u8,
    led_channel: u8,
    melody: &'static Melody,
    previous_pressed: bool,
    sound_played: bool,
}

impl InputSlot {
    pub fn new(id: SlotId, button_channel: u8, led_channel: u8, melody: &'static Melody) -> Self {
        Self {
            id,
            button_channel,
            led_channel,
            melody,
            previous_pressed: false,
            sound_played: false,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Instantaneous line level
    pub fn is_pressed(&self, buttons: &dyn BinaryInput) -> bool {
        buttons.read(self.button_channel)
    }

    /// Release edge detection: true exactly once per press-release cycle.
    ///
    /// Updates the stored previous level as a side effect, so this must be
    /// polled exactly once per tick; the engine's `tick` is the only caller
    /// during normal operation.
    pub fn was_released(&mut self, buttons: &dyn BinaryInput) -> bool {
        let pressed = self.is_pressed(buttons);
        let released = self.previous_pressed && !pressed;
        self.previous_pressed = pressed;
        released
    }

    /// Per-tick press handling.
    ///
    /// With `allow_led_control` the LED mirrors the pressed level, and the
    /// first pressed tick with no melody already playing triggers this
    /// slot's melody once per hold. Without it, only the `sound_played`
    /// release tracking runs, so the engine's own sequence flashes are not
    /// disturbed by an idle finger resting on a button.
    pub fn handle(
        &mut self,
        buttons: &dyn BinaryInput,
        leds: &mut dyn BinaryOutput,
        player: &mut MelodyPlayer,
        now: Millis,
        allow_led_control: bool,
    ) {
        let pressed = self.is_pressed(buttons);

        if !allow_led_control {
            if !pressed {
                self.sound_played = false;
            }
            return;
        }

        if pressed {
            leds.write(self.led_channel, true);
            if !self.sound_played && !player.is_playing() {
                log::debug!("slot {} pressed, playing melody", self.id);
                player.start_melody(self.melody, now);
                self.sound_played = true;
            }
        } else {
            leds.write(self.led_channel, false);
            self.sound_played = false;
        }
    }

    /// Engine-driven one-shot flash: LED on plus melody trigger.
    ///
    /// The caller turns the LED back off after the flash duration; the slot
    /// does not self-time.
    pub fn flash_led(&self, leds: &mut dyn BinaryOutput, player: &mut MelodyPlayer, now: Millis) {
        leds.write(self.led_channel, true);
        player.start_melody(self.melody, now);
    }

    /// Turn the indicator on without touching the melody player
    pub fn led_on(&self, leds: &mut dyn BinaryOutput) {
        leds.write(self.led_channel, true);
    }

    /// Turn the indicator off (used by the engine to end a flash)
    pub fn led_off(&self, leds: &mut dyn BinaryOutput) {
        leds.write(self.led_channel, false);
    }
}
