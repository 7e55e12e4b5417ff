// Simulated board - host-side stand-in for the real hardware
// One shared state cell with cheap cloneable handles implementing the hal
// traits, plus the RandomSource implementations for tests and the demo

use crate::game::BUTTON_COUNT;
use crate::hal::{
    AudioOutput, BinaryInput, BinaryOutput, Clock, Millis, Peripherals, RandomSource, TextDisplay,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SimState {
    now: Millis,
    buttons: [bool; BUTTON_COUNT],
    leds: [bool; BUTTON_COUNT],
    tone: Option<u16>,
    tone_log: Vec<u16>,
    display: (String, String),
}

/// A simulated Simon board.
///
/// The board itself is the test/demo controller: it advances the clock,
/// scripts button presses, and exposes the observable outputs (LED levels,
/// sounding tone, display lines). The trait handles it hands out all share
/// the same state cell.
#[derive(Clone, Default)]
pub struct SimBoard {
    state: Rc<RefCell<SimState>>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle a full set of collaborators for `GameEngine::new`
    pub fn peripherals(&self, rng: Box<dyn RandomSource>) -> Peripherals {
        Peripherals {
            clock: Box::new(self.clock()),
            audio: Box::new(self.audio()),
            buttons: Box::new(self.buttons()),
            leds: Box::new(self.leds()),
            display: Box::new(self.display()),
            rng,
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.state.clone())
    }

    pub fn audio(&self) -> SimAudio {
        SimAudio(self.state.clone())
    }

    pub fn buttons(&self) -> SimButtons {
        SimButtons(self.state.clone())
    }

    pub fn leds(&self) -> SimLeds {
        SimLeds(self.state.clone())
    }

    pub fn display(&self) -> SimDisplay {
        SimDisplay(self.state.clone())
    }

    // --- clock scripting ---

    pub fn now(&self) -> Millis {
        self.state.borrow().now
    }

    /// Move the clock forward, wrapping like the hardware counter
    pub fn advance(&self, ms: Millis) {
        let mut state = self.state.borrow_mut();
        state.now = state.now.wrapping_add(ms);
    }

    /// Jump the clock to an absolute value (wraparound tests)
    pub fn set_now(&self, now: Millis) {
        self.state.borrow_mut().now = now;
    }

    // --- button scripting ---

    pub fn press(&self, channel: u8) {
        self.state.borrow_mut().buttons[channel as usize] = true;
    }

    pub fn release(&self, channel: u8) {
        self.state.borrow_mut().buttons[channel as usize] = false;
    }

    // --- observable outputs ---

    pub fn led(&self, channel: u8) -> bool {
        self.state.borrow().leds[channel as usize]
    }

    /// The currently sounding tone, if any
    pub fn current_tone(&self) -> Option<u16> {
        self.state.borrow().tone
    }

    /// Count of non-silent `sound` calls since construction
    pub fn tones_sounded(&self) -> usize {
        self.state.borrow().tone_log.len()
    }

    /// Every non-silent frequency sounded, in order
    pub fn tone_log(&self) -> Vec<u16> {
        self.state.borrow().tone_log.clone()
    }

    pub fn display_lines(&self) -> (String, String) {
        self.state.borrow().display.clone()
    }
}

#[derive(Clone)]
pub struct SimClock(Rc<RefCell<SimState>>);

impl Clock for SimClock {
    fn now(&self) -> Millis {
        self.0.borrow().now
    }
}

#[derive(Clone)]
pub struct SimAudio(Rc<RefCell<SimState>>);

impl AudioOutput for SimAudio {
    fn sound(&mut self, frequency: u16, _duration_hint: Millis) {
        let mut state = self.0.borrow_mut();
        if frequency > 0 {
            state.tone = Some(frequency);
            state.tone_log.push(frequency);
        } else {
            state.tone = None;
        }
    }

    fn silence(&mut self) {
        self.0.borrow_mut().tone = None;
    }
}

#[derive(Clone)]
pub struct SimButtons(Rc<RefCell<SimState>>);

impl BinaryInput for SimButtons {
    fn read(&self, channel: u8) -> bool {
        self.0.borrow().buttons[channel as usize]
    }
}

#[derive(Clone)]
pub struct SimLeds(Rc<RefCell<SimState>>);

impl BinaryOutput for SimLeds {
    fn write(&mut self, channel: u8, level: bool) {
        self.0.borrow_mut().leds[channel as usize] = level;
    }
}

#[derive(Clone)]
pub struct SimDisplay(Rc<RefCell<SimState>>);

impl TextDisplay for SimDisplay {
    fn show(&mut self, line1: &str, line2: &str) {
        log::debug!("display: {} | {}", line1, line2);
        self.0.borrow_mut().display = (line1.to_string(), line2.to_string());
    }

    fn clear(&mut self) {
        self.0.borrow_mut().display = (String::new(), String::new());
    }
}

/// Deterministic random source fed from a fixed script, cycling when
/// exhausted. Each scripted value is taken modulo the requested bound.
pub struct ScriptedRandom {
    values: Vec<u8>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[u8]) -> Self {
        assert!(!values.is_empty(), "script must not be empty");
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, n: u8) -> u8 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value % n
    }
}

/// OS-entropy-backed random source for real play
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed variant for reproducible demo runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn uniform(&mut self, n: u8) -> u8 {
        self.rng.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_state() {
        let board = SimBoard::new();
        let clock = board.clock();
        let mut leds = board.leds();

        board.advance(250);
        assert_eq!(clock.now(), 250);

        leds.write(1, true);
        assert!(board.led(1));
    }

    #[test]
    fn test_clock_wraps() {
        let board = SimBoard::new();
        board.set_now(u32::MAX);
        board.advance(10);
        assert_eq!(board.now(), 9);
    }

    #[test]
    fn test_audio_logs_tones_and_silence() {
        let board = SimBoard::new();
        let mut audio = board.audio();

        audio.sound(440, 100);
        assert_eq!(board.current_tone(), Some(440));

        audio.sound(0, 100); // frequency 0 means silence
        assert_eq!(board.current_tone(), None);

        audio.sound(880, 100);
        audio.silence();
        assert_eq!(board.current_tone(), None);
        assert_eq!(board.tone_log(), vec![440, 880]);
    }

    #[test]
    fn test_scripted_random_cycles_and_bounds() {
        let mut rng = ScriptedRandom::new(&[0, 5, 2]);

        assert_eq!(rng.uniform(4), 0);
        assert_eq!(rng.uniform(4), 1); // 5 % 4
        assert_eq!(rng.uniform(4), 2);
        assert_eq!(rng.uniform(4), 0); // wrapped around the script
    }

    #[test]
    fn test_entropy_random_respects_bound() {
        let mut rng = EntropyRandom::with_seed(42);
        for _ in 0..100 {
            assert!(rng.uniform(4) < 4);
        }
    }
}
