//! Space Shooter headless runner
//!
//! Plays the game at a fixed 60 Hz with the autopilot at the controls,
//! restarting after every game over.
//!
//! Usage: `space-shooter [frames] [seed] [--tuning FILE] [--settings FILE]`
//!
//! The config paths can also come from `SPACE_SHOOTER_TUNING` and
//! `SPACE_SHOOTER_SETTINGS`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use space_shooter::autopilot;
use space_shooter::sim::{GameEvent, GamePhase, SoundCue};
use space_shooter::tuning::TuningError;
use space_shooter::{Session, Settings, Tuning};

use clap::Parser;

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "space-shooter")]
#[command(about = "Run the space shooter headless with the autopilot flying")]
struct Args {
    /// Frames to simulate at 60 Hz (default: one minute)
    frames: Option<u64>,

    /// RNG seed (default: current time)
    seed: Option<u64>,

    /// Balance overrides as JSON
    #[arg(long, env = "SPACE_SHOOTER_TUNING")]
    tuning: Option<PathBuf>,

    /// Audio preferences as JSON
    #[arg(long, env = "SPACE_SHOOTER_SETTINGS")]
    settings: Option<PathBuf>,
}

/// Stand-in for the audio backend: applies the mix and counts what would play
struct SoundSink {
    settings: Settings,
    lasers: u64,
    explosions: u64,
}

impl SoundSink {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            lasers: 0,
            explosions: 0,
        }
    }

    fn play(&mut self, cue: SoundCue) {
        let volume = self.settings.effective_volume(cue);
        if volume <= 0.0 {
            return;
        }
        match cue {
            SoundCue::Laser => self.lasers += 1,
            SoundCue::Explosion => self.explosions += 1,
        }
        log::trace!("Play {cue:?} at volume {volume:.2}");
    }
}

#[derive(Debug, Default)]
struct RunReport {
    sessions: u32,
    best_score: u64,
    enemies_destroyed: u32,
    power_ups: u32,
}

impl RunReport {
    fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::SessionStarted => self.sessions += 1,
            GameEvent::GameOver { final_score } => {
                self.best_score = self.best_score.max(final_score);
            }
            GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
            GameEvent::PowerUpCollected { .. } => self.power_ups += 1,
            _ => {}
        }
    }
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning, TuningError> {
    match path {
        Some(path) => Tuning::load(path),
        None => Ok(Tuning::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });

    let tuning = match load_tuning(args.tuning.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Failed to load tuning: {e}");
            return ExitCode::FAILURE;
        }
    };
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let mut session = match Session::with_tuning(seed, tuning) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Space Shooter (headless) starting: {frames} frames, seed {seed}");

    log::info!("Music volume {:.2}", settings.effective_music_volume());
    let mut sink = SoundSink::new(settings);
    let mut report = RunReport::default();

    for _ in 0..frames {
        let input = autopilot::plan(session.state());
        if input.confirm {
            session.on_confirm_input();
        }
        session.on_move_input(input.move_dir);
        if input.fire {
            session.on_shoot_input();
        }
        session.tick(FRAME_DT);

        for event in session.drain_events() {
            if let Some(cue) = event.sound() {
                sink.play(cue);
            }
            report.record(&event);
        }
    }
    if session.phase() == GamePhase::Playing {
        report.best_score = report.best_score.max(session.score());
    }

    println!(
        "{} frames, {} sessions, best score {}",
        frames, report.sessions, report.best_score
    );
    println!(
        "{} enemies destroyed, {} power-ups collected, {} laser / {} explosion sounds",
        report.enemies_destroyed, report.power_ups, sink.lasers, sink.explosions
    );
    ExitCode::SUCCESS
}
