mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::thread_rng;

use airplane_wars::assets::{load_assets, Assets};
use airplane_wars::clock::FixedTimestep;
use airplane_wars::compute::init_state;
use airplane_wars::consts::{MAX_CATCHUP_TICKS, SCREEN_HEIGHT, SCREEN_WIDTH, TICK};
use airplane_wars::controller::{
    game_over_frame, menu_frame, play_frame, FrameOutcome, MenuChoice,
};
use airplane_wars::entities::GameStatus;
use airplane_wars::error::GameError;

use display::{BuiltinAssets, TerminalAudio, TerminalSurface, Viewport};
use input::TerminalInput;

const LOG_FILE: &str = "airplane_wars.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is taken over by the game, so log lines go to a file in the
/// temp directory instead of stderr.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match File::create(std::env::temp_dir().join(LOG_FILE)) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Cannot open log file, logging to stderr: {e}"),
    }
    builder.init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    // Asset failures are fatal and reported before the terminal is touched.
    let assets = match load_assets(&mut BuiltinAssets) {
        Ok(assets) => assets,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = play(&assets) {
        error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn play(assets: &Assets) -> Result<(), GameError> {
    let mut out = stdout();

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = terminal::size()
        .map_err(GameError::from)
        .and_then(|(cols, rows)| {
            info!("terminal {cols}x{rows}");
            let viewport = Viewport::new(cols, rows, SCREEN_WIDTH, SCREEN_HEIGHT);
            let mut surface = TerminalSurface::new(BufWriter::new(stdout()), viewport);
            let mut input = TerminalInput::new(rx, viewport);
            run(assets, &mut surface, &mut input)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Sleep off whatever is left of the current tick.
fn pace(clock: &FixedTimestep) {
    let wait = clock.until_next(Instant::now());
    if !wait.is_zero() {
        thread::sleep(wait);
    }
}

fn run<W: Write>(
    assets: &Assets,
    surface: &mut TerminalSurface<W>,
    input: &mut TerminalInput,
) -> Result<(), GameError> {
    let mut clock = FixedTimestep::new(TICK, MAX_CATCHUP_TICKS, Instant::now());
    let mut rng = thread_rng();
    let mut audio = TerminalAudio::new(assets.sounds.clone(), stdout());

    let mut screen = GameStatus::Menu;
    let mut background_y = 0.0;
    let mut state = init_state(SCREEN_WIDTH, SCREEN_HEIGHT);

    loop {
        let steps = clock.advance(Instant::now());
        match screen {
            GameStatus::Menu => {
                let (offset, choice) = menu_frame(
                    surface,
                    input,
                    assets,
                    background_y,
                    steps,
                    SCREEN_WIDTH,
                    SCREEN_HEIGHT,
                )?;
                background_y = offset;
                match choice {
                    Some(MenuChoice::Start) => {
                        info!("game started");
                        screen = GameStatus::Playing;
                    }
                    Some(MenuChoice::Quit) => return Ok(()),
                    None => {}
                }
            }
            GameStatus::Playing => {
                let (next, outcome) =
                    play_frame(&state, steps, assets, surface, input, &mut audio, &mut rng)?;
                state = next;
                match outcome {
                    FrameOutcome::Continue => {}
                    FrameOutcome::GameOver => {
                        info!("game over, final score {}", state.score);
                        screen = GameStatus::GameOver;
                    }
                    FrameOutcome::Quit => return Ok(()),
                }
            }
            // Terminal screen: only quit is processed
            GameStatus::GameOver => {
                if game_over_frame(surface, input, assets, &state)? {
                    return Ok(());
                }
            }
        }
        pace(&clock);
    }
}
