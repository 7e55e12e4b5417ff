// Game engine - the Simon state machine
// Owns the slots, the melody player, and the board collaborators; driven by
// a single non-blocking tick() against the board clock

use crate::config::GameConfig;
use crate::game::melody::{GAME_OVER_JINGLE, LEVEL_UP_JINGLE, NOTE_C5, SLOT_MELODIES};
use crate::game::player::MelodyPlayer;
use crate::game::slot::{InputSlot, SlotId};
use crate::hal::{elapsed, BinaryInput, BinaryOutput, Clock, Millis, Peripherals, RandomSource, TextDisplay};

/// Number of button/LED/melody slots on the board
pub const BUTTON_COUNT: usize = 4;

/// Hard cap on challenge sequence growth
pub const MAX_SEQUENCE_LENGTH: usize = 20;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Idle; any button press starts a round
    WaitingToStart,
    /// The engine is flashing the challenge sequence
    ShowingSequence,
    /// The player is reproducing the sequence
    WaitingForInput,
    /// Round won; held briefly before the sequence grows
    LevelComplete,
    /// Round lost; held briefly before a fresh game
    GameOver,
}

impl GameState {
    pub fn is_showing_sequence(&self) -> bool {
        matches!(self, GameState::ShowingSequence)
    }

    pub fn is_waiting_for_input(&self) -> bool {
        matches!(self, GameState::WaitingForInput)
    }
}

/// The cooperative real-time game engine.
///
/// All waiting is expressed as wrapping clock comparisons; `tick()` never
/// blocks and is expected to be called in a tight outer loop. Within one
/// tick the order is fixed: melody update, slot handling, edge polling,
/// then state evaluation.
pub struct GameEngine {
    clock: Box<dyn Clock>,
    buttons: Box<dyn BinaryInput>,
    leds: Box<dyn BinaryOutput>,
    display: Box<dyn TextDisplay>,
    rng: Box<dyn RandomSource>,
    player: MelodyPlayer,
    slots: [InputSlot; BUTTON_COUNT],
    config: GameConfig,

    sequence: Vec<SlotId>,
    current_step: usize,
    score: u32,
    level: u32,
    state: GameState,
    state_entered_at: Millis,
    /// Input-timeout reference: entry into WaitingForInput or the last
    /// correct step, whichever is later
    last_progress: Millis,

    // Show-sequence sub-state, reset on every entry into ShowingSequence
    show_step: usize,
    flash_on: bool,
    phase_started: Millis,

    /// All LEDs are lit right after a failed round; cleared on a timer
    fail_leds_on: bool,
}

impl GameEngine {
    pub fn new(peripherals: Peripherals, config: GameConfig) -> Self {
        let Peripherals {
            clock,
            audio,
            buttons,
            leds,
            display,
            rng,
        } = peripherals;

        let player = MelodyPlayer::new(audio);
        let slots: [InputSlot; BUTTON_COUNT] =
            std::array::from_fn(|i| InputSlot::new(i as SlotId, i as u8, i as u8, &SLOT_MELODIES[i]));

        Self {
            clock,
            buttons,
            leds,
            display,
            rng,
            player,
            slots,
            config,
            sequence: Vec::with_capacity(MAX_SEQUENCE_LENGTH),
            current_step: 0,
            score: 0,
            level: 1,
            state: GameState::WaitingToStart,
            state_entered_at: 0,
            last_progress: 0,
            show_step: 0,
            flash_on: false,
            phase_started: 0,
            fail_leds_on: false,
        }
    }

    /// One-time startup: welcome screen, power-on cue, fresh game
    pub fn setup(&mut self) {
        self.display.clear();
        self.player.play_tone(NOTE_C5, 150);
        self.start_new_game();
        log::info!("game ready");
    }

    /// Reset score and level and regrow a one-entry sequence
    pub fn start_new_game(&mut self) {
        let now = self.clock.now();

        self.score = 0;
        self.level = 1;
        self.current_step = 0;
        self.sequence.clear();
        let first = self.next_sequence_entry();
        self.sequence.push(first);

        self.all_leds(false);
        self.fail_leds_on = false;
        self.state = GameState::WaitingToStart;
        self.state_entered_at = now;
        self.display.show("Simon Says", "Press any button");
        log::debug!("new game, first slot {}", first);
    }

    /// External trigger out of `WaitingToStart`. Also invoked internally
    /// when a button release is seen while waiting. No effect elsewhere.
    pub fn start_sequence(&mut self) {
        if self.state == GameState::WaitingToStart {
            let now = self.clock.now();
            self.enter_showing_sequence(now);
        }
    }

    /// The non-blocking update; call once per outer loop iteration
    pub fn tick(&mut self) {
        let now = self.clock.now();

        self.player.update(now);

        // Inputs before game-state evaluation. LED/sound side effects are
        // suppressed while the engine is driving the LEDs itself: sequence
        // display, and the all-on flash right after a failure.
        let allow_led_control = !self.state.is_showing_sequence() && !self.fail_leds_on;
        for slot in &mut self.slots {
            slot.handle(
                self.buttons.as_ref(),
                self.leds.as_mut(),
                &mut self.player,
                now,
                allow_led_control,
            );
        }

        let mut released: Option<SlotId> = None;
        for slot in &mut self.slots {
            if slot.was_released(self.buttons.as_ref()) && released.is_none() {
                released = Some(slot.id());
            }
        }

        match self.state {
            GameState::WaitingToStart => {
                if released.is_some() {
                    self.enter_showing_sequence(now);
                }
            }
            GameState::ShowingSequence => self.tick_showing_sequence(now),
            GameState::WaitingForInput => {
                if let Some(id) = released {
                    self.process_player_input(id, now);
                }
                if self.state.is_waiting_for_input()
                    && elapsed(now, self.last_progress) >= self.config.input_timeout_ms
                {
                    log::info!("input timeout at step {}", self.current_step);
                    self.game_over(now);
                }
            }
            GameState::LevelComplete => {
                if elapsed(now, self.state_entered_at) >= self.config.level_complete_hold_ms {
                    self.advance_level(now);
                }
            }
            GameState::GameOver => {
                if self.fail_leds_on
                    && elapsed(now, self.state_entered_at) >= self.config.fail_flash_ms
                {
                    self.all_leds(false);
                    self.fail_leds_on = false;
                }
                if elapsed(now, self.state_entered_at) >= self.config.game_over_hold_ms {
                    self.start_new_game();
                }
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// The current challenge sequence (slot ids, oldest first)
    pub fn sequence(&self) -> &[SlotId] {
        &self.sequence
    }

    /// Index of the next expected input while waiting for the player
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    // --- state transitions ---

    fn enter_showing_sequence(&mut self, now: Millis) {
        self.state = GameState::ShowingSequence;
        self.state_entered_at = now;
        self.show_step = 0;
        self.flash_on = false;

        let line1 = format!("Level {}", self.level);
        self.display.show(&line1, "Watch closely...");
        log::debug!("showing sequence of {} steps", self.sequence.len());

        // Phase A for the first step begins immediately
        self.begin_flash(now);
    }

    /// Phase A: light the slot and sound its melody
    fn begin_flash(&mut self, now: Millis) {
        let id = self.sequence[self.show_step] as usize;
        self.slots[id].flash_led(self.leds.as_mut(), &mut self.player, now);
        self.flash_on = true;
        self.phase_started = now;
    }

    fn tick_showing_sequence(&mut self, now: Millis) {
        if self.flash_on {
            // Phase B: flash expired, go dark and advance
            if elapsed(now, self.phase_started) >= self.config.flash_on_ms {
                let id = self.sequence[self.show_step] as usize;
                self.slots[id].led_off(self.leds.as_mut());
                self.flash_on = false;
                self.phase_started = now;
                self.show_step += 1;

                if self.show_step == self.sequence.len() {
                    self.enter_waiting_for_input(now);
                }
            }
        } else if elapsed(now, self.phase_started) >= self.config.flash_gap_ms {
            self.begin_flash(now);
        }
    }

    fn enter_waiting_for_input(&mut self, now: Millis) {
        self.state = GameState::WaitingForInput;
        self.state_entered_at = now;
        self.current_step = 0;
        self.last_progress = now;

        let line2 = format!("Score: {}", self.score);
        self.display.show("Your turn!", &line2);
    }

    fn process_player_input(&mut self, id: SlotId, now: Millis) {
        let expected = self.sequence[self.current_step];

        if id == expected {
            self.current_step += 1;
            self.score += self.config.step_score;
            self.last_progress = now;
            log::debug!("correct input {} ({}/{})", id, self.current_step, self.sequence.len());

            if self.current_step == self.sequence.len() {
                self.level_complete(now);
            }
        } else {
            log::info!("wrong input {} at step {}, expected {}", id, self.current_step, expected);
            self.game_over(now);
        }
    }

    fn level_complete(&mut self, now: Millis) {
        self.score += self.config.level_bonus;
        self.state = GameState::LevelComplete;
        self.state_entered_at = now;

        let line2 = format!("Score: {}", self.score);
        self.display.show("Level complete!", &line2);
        self.player.start_melody(&LEVEL_UP_JINGLE, now);
        log::info!("level {} complete, score {}", self.level, self.score);
    }

    fn advance_level(&mut self, now: Millis) {
        self.level += 1;
        if self.sequence.len() < MAX_SEQUENCE_LENGTH {
            let next = self.next_sequence_entry();
            self.sequence.push(next);
        }
        self.enter_showing_sequence(now);
    }

    fn game_over(&mut self, now: Millis) {
        self.state = GameState::GameOver;
        self.state_entered_at = now;

        let line2 = format!("Final score: {}", self.score);
        self.display.show("Game over", &line2);
        self.player.start_melody(&GAME_OVER_JINGLE, now);
        self.all_leds(true);
        self.fail_leds_on = true;
        log::info!("game over at level {}, score {}", self.level, self.score);
    }

    /// Draw the next sequence entry: uniform over the slots, redrawn while
    /// it matches the immediately preceding entry
    fn next_sequence_entry(&mut self) -> SlotId {
        loop {
            let candidate = self.rng.uniform(BUTTON_COUNT as u8);
            if self.sequence.last() != Some(&candidate) {
                return candidate;
            }
        }
    }

    fn all_leds(&mut self, level: bool) {
        for slot in &self.slots {
            if level {
                slot.led_on(self.leds.as_mut());
            } else {
                slot.led_off(self.leds.as_mut());
            }
        }
    }
}
