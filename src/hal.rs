// Hardware abstraction traits - the collaborator contracts the engine runs against
// Everything timing-related is expressed in wrapping milliseconds

/// Millisecond timestamp as reported by the board clock.
/// Wraps silently at `u32::MAX`; compare with [`elapsed`], never with `>`.
pub type Millis = u32;

/// Wrapping-safe elapsed time between two clock readings.
///
/// Correct across a counter wraparound as long as the real interval is
/// shorter than the full counter range (~49 days).
pub fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Monotonic millisecond counter. Never resets during a session except on
/// wraparound.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Single-channel tone output (buzzer).
pub trait AudioOutput {
    /// Start sounding `frequency` Hz. `duration_hint` is advisory; the
    /// caller remains responsible for the next `sound`/`silence` call.
    /// Frequency 0 means silence.
    fn sound(&mut self, frequency: u16, duration_hint: Millis);

    /// Stop any sounding tone.
    fn silence(&mut self);
}

/// Multi-channel binary input (button lines). `true` = actuated.
pub trait BinaryInput {
    fn read(&self, channel: u8) -> bool;
}

/// Multi-channel binary output (indicator LEDs).
pub trait BinaryOutput {
    fn write(&mut self, channel: u8, level: bool);
}

/// Two-line fixed-width text display.
pub trait TextDisplay {
    fn show(&mut self, line1: &str, line2: &str);
    fn clear(&mut self);
}

/// Uniform random integers, seeded once at startup from an entropy source
/// external to the core.
pub trait RandomSource {
    /// A uniformly distributed value in `[0, n)`. `n` must be non-zero.
    fn uniform(&mut self, n: u8) -> u8;
}

/// The full set of collaborators handed to the engine at construction.
/// Explicit ownership: the engine never reaches into ambient globals.
pub struct Peripherals {
    pub clock: Box<dyn Clock>,
    pub audio: Box<dyn AudioOutput>,
    pub buttons: Box<dyn BinaryInput>,
    pub leds: Box<dyn BinaryOutput>,
    pub display: Box<dyn TextDisplay>,
    pub rng: Box<dyn RandomSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed(1500, 1000), 500);
        assert_eq!(elapsed(1000, 1000), 0);
    }

    #[test]
    fn test_elapsed_across_wraparound() {
        // 100ms before wrap -> 400ms after wrap = 500ms elapsed
        let since = u32::MAX - 99;
        let now = 400;
        assert_eq!(elapsed(now, since), 500);
    }

    #[test]
    fn test_elapsed_at_wrap_boundary() {
        assert_eq!(elapsed(0, u32::MAX), 1);
    }
}
