mod audio;
mod audio_api;
mod config;
mod loader;
mod logging;
mod middle;
mod pipeline;
mod shared;
mod tui;

use std::time::{Duration, Instant};

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use audio::AudioHandle;
use audio_api::AudioCommand;
use config::Config;
use middle::Middle;
use pipeline::persistence::{self, PatternStore};
use shared::InputEvent;

// after a stall, don't replay more than this many frames of sequence at once
const MAX_CATCHUP_FRAMES: u32 = 10;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args())?;
    logging::setup(&config.state_dir())?;
    log::info!("starting in {}", config.project_dir.display());

    let store = PatternStore::open_or_empty(persistence::pattern_file_path(&config.project_dir));
    log::info!("{} saved patterns in {}", store.len(), store.path().display());
    let mut middle = Middle::new(&config, store);

    // no output device still leaves a usable (silent) sequencer
    let audio = match audio::start_audio(config.voice_budget()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("audio disabled: {e:#}");
            None
        }
    };
    let sample_rate = audio.as_ref().map_or(audio::FALLBACK_SAMPLE_RATE, AudioHandle::sample_rate);
    send_all(&audio, middle.load_samples(sample_rate));

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let frame_period = Duration::from_secs_f64(1.0 / f64::from(middle.frame_rate()));
    let mut next_frame = Instant::now() + frame_period;
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let ds = middle.display_state();
        tui_state.sync(&ds);
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, &tui_state);
        })?;

        let timeout = next_frame.saturating_duration_since(Instant::now());
        for event in tui::input::poll_input(timeout, &mut tui_state)? {
            if event == InputEvent::Quit {
                log::info!("quit");
                return Ok(());
            }
            middle.handle_input(event);
        }

        let now = Instant::now();
        if now < next_frame {
            continue;
        }
        let behind = (now - next_frame).as_secs_f64() / frame_period.as_secs_f64();
        let due = (1 + behind as u32).min(MAX_CATCHUP_FRAMES);
        next_frame += frame_period * due;
        if next_frame < now {
            log::debug!("frame loop fell behind, skipping ahead");
            next_frame = now + frame_period;
        }
        send_all(&audio, middle.tick(due));
    }
}

fn send_all(audio: &Option<AudioHandle>, cmds: Vec<AudioCommand>) {
    if let Some(audio) = audio {
        for cmd in cmds {
            audio.send(cmd);
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
