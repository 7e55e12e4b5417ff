// Demo binary - wires the engine to the simulated board and autoplays
// Run with RUST_LOG=debug for the full state-transition trace

use simon_says::{
    ConfigError, EntropyRandom, GameConfig, GameEngine, SimBoard, BUTTON_COUNT,
};

/// Levels to autoplay before deliberately fumbling
const PLAY_LEVELS: u32 = 4;

/// Safety bound on the outer loop (1 tick = 1 simulated millisecond)
const MAX_TICKS: u32 = 2_000_000;

fn tick_ms(board: &SimBoard, engine: &mut GameEngine, ms: u32) {
    for _ in 0..ms {
        board.advance(1);
        engine.tick();
    }
}

/// Press and release a button, ticking through the hold
fn tap(board: &SimBoard, engine: &mut GameEngine, id: u8) {
    board.press(id);
    tick_ms(board, engine, 30);
    board.release(id);
    tick_ms(board, engine, 5);
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };

    let board = SimBoard::new();
    let peripherals = board.peripherals(Box::new(EntropyRandom::new()));
    let mut engine = GameEngine::new(peripherals, config.clone());

    engine.setup();
    println!("[SIM] {}", board.display_lines().0);

    // Any button press starts the round
    tap(&board, &mut engine, 0);

    println!("[SIM] Autoplaying {} levels...", PLAY_LEVELS);
    let mut budget = MAX_TICKS;
    while engine.level() <= PLAY_LEVELS && budget > 0 {
        tick_ms(&board, &mut engine, 1);
        budget -= 1;

        if engine.state().is_waiting_for_input() {
            let id = engine.sequence()[engine.current_step()];
            tap(&board, &mut engine, id);
        }
    }
    println!(
        "[SIM] Reached level {} with score {}",
        engine.level(),
        engine.score()
    );

    // Deliberately press the wrong slot to walk the failure path
    while !engine.state().is_waiting_for_input() && budget > 0 {
        tick_ms(&board, &mut engine, 1);
        budget -= 1;
    }
    let expected = engine.sequence()[engine.current_step()];
    let wrong = (expected + 1) % BUTTON_COUNT as u8;
    tap(&board, &mut engine, wrong);
    println!(
        "[SIM] Pressed slot {} instead of {}: {:?}, final score {}",
        wrong,
        expected,
        engine.state(),
        engine.score()
    );

    // Let the game-over hold expire and the board reset itself
    tick_ms(&board, &mut engine, config.game_over_hold_ms + 10);
    println!(
        "[SIM] {} / {} (state {:?}, score {})",
        board.display_lines().0,
        board.display_lines().1,
        engine.state(),
        engine.score()
    );

    Ok(())
}
