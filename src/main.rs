//! Eagle Eyes headless runner
//!
//! Plays one full match against the scripted opponent with a scripted human
//! on a simulated 60 Hz clock, printing the HUD as phases change and appending
//! every round to the result log.
//!
//! Usage:
//!   eagle-eyes --difficulty hard --reaction-ms 250 --aim head
//!   RUST_LOG=debug eagle-eyes --seed 42

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use glam::Vec2;
use rand::Rng;

use eagle_eyes::audio::AudioManager;
use eagle_eyes::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use eagle_eyes::hud;
use eagle_eyes::persistence::JsonlResultLog;
use eagle_eyes::platform::{Clock, ManualClock};
use eagle_eyes::sim::{DuelPhase, TickInput};
use eagle_eyes::{DifficultyPreset, DuelSession, DuelSettings};

/// Give up after this much simulated time
const MAX_SIM_MS: u64 = 10 * 60 * 1000;
/// How long the scripted human lingers on the result screen
const RESULT_PAUSE_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Aim {
    Head,
    Body,
    /// Anywhere in the arena
    Wild,
}

#[derive(Parser)]
#[command(name = "eagle-eyes")]
#[command(about = "Play a headless quick-draw duel against the scripted opponent")]
struct Args {
    /// JSON settings file (missing file means defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Rounds in the match
    #[arg(long)]
    rounds: Option<u32>,

    /// Opponent difficulty: easy, normal, hard, deadly or 1-10
    #[arg(long)]
    difficulty: Option<String>,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Round result log (JSON lines)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Scripted human reaction after the draw signal
    #[arg(long, default_value_t = 300)]
    reaction_ms: u64,

    /// Where the scripted human aims
    #[arg(long, value_enum, default_value_t = Aim::Body)]
    aim: Aim,
}

fn parse_difficulty(s: &str) -> Option<i64> {
    DifficultyPreset::from_str(s)
        .map(|p| p.difficulty() as i64)
        .or_else(|| s.parse().ok())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => DuelSettings::load(path),
        None => DuelSettings::default(),
    };
    if let Some(rounds) = args.rounds {
        settings.max_rounds = rounds;
    }
    if let Some(d) = &args.difficulty {
        let Some(difficulty) = parse_difficulty(d) else {
            eprintln!("Unknown difficulty '{d}'");
            return ExitCode::FAILURE;
        };
        settings.opponent_difficulty = difficulty;
    }
    if let Some(path) = &args.log {
        settings.results_path = path.display().to_string();
    }
    let settings = settings.sanitized();
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    let tick_ms = settings.tick_ms();

    println!("Eagle Eyes: {} rounds, seed {}", settings.max_rounds, seed);
    println!("Results: {}", settings.results_path);

    let results = Box::new(JsonlResultLog::new(&settings.results_path));
    let mut session = DuelSession::with_sinks(
        settings,
        seed,
        ManualClock::new(0),
        results,
        Box::new(AudioManager::new()),
    );

    let mut aim_rng = rand::rng();
    let mut last_phase = None;
    let mut phase_since = 0;

    while session.clock().now_ms() < MAX_SIM_MS {
        let now = session.clock().now_ms();
        let phase = session.state().phase;
        if last_phase != Some(phase) {
            last_phase = Some(phase);
            phase_since = now;
            let snap = session.snapshot();
            println!();
            for line in hud::header_lines(&snap).iter().chain(&hud::prompt_lines(&snap)) {
                println!("  {line}");
            }
        }

        let mut input = TickInput::default();
        match phase {
            DuelPhase::Menu | DuelPhase::Waiting => input.start_round = true,
            DuelPhase::Countdown => {}
            DuelPhase::Shooting => {
                if now >= phase_since + args.reaction_ms {
                    let opponent = &session.state().opponent;
                    input.fire = true;
                    input.aim = Some(match args.aim {
                        Aim::Head => opponent.head.center(),
                        Aim::Body => opponent.body.center(),
                        Aim::Wild => Vec2::new(
                            aim_rng.random_range(0.0..ARENA_WIDTH),
                            aim_rng.random_range(0.0..ARENA_HEIGHT),
                        ),
                    });
                }
            }
            DuelPhase::Result => input.continue_round = now >= phase_since + RESULT_PAUSE_MS,
            DuelPhase::GameOver => break,
        }

        if let Some(result) = session.step(&input) {
            log::info!("Match finished: {}", result.as_str());
        }
        session.clock_mut().advance(tick_ms);
    }

    if session.state().phase != DuelPhase::GameOver {
        eprintln!("Match did not finish within {} s of simulated time", MAX_SIM_MS / 1000);
        return ExitCode::FAILURE;
    }
    if session.persist_failures() > 0 {
        eprintln!("{} round(s) could not be written to the result log", session.persist_failures());
    }
    ExitCode::SUCCESS
}
