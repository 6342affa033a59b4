/// Verse - lyrics-synchronised player in the terminal
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::{
    io::{stdout, Stdout, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verse_captions::{parse_with_report, CaptionTrack};
use verse_cli::{config::CliConfig, keys, playlist_file, render, SimulationSettings, VirtualSink};
use verse_playback::{InputFocus, PlaybackMode, PlayerEvent, TransportController};

#[derive(Parser)]
#[command(name = "verse")]
#[command(about = "Lyrics-synchronised music player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the caption timeline of an SRT file
    Captions {
        /// SRT file
        file: PathBuf,
        /// Show the view at this time (seconds)
        #[arg(long)]
        at: Option<f64>,
        /// Number of upcoming captions to list
        #[arg(short, long, default_value_t = 2)]
        window: usize,
    },
    /// Play a playlist on the simulated sink
    Play {
        /// Playlist JSON file
        playlist: PathBuf,
        /// Navigation mode (overrides the file)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Index of the first track (overrides the file)
        #[arg(short, long)]
        start: Option<usize>,
        /// Configuration file path
        #[arg(short, long, env = "VERSE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Random,
}

impl From<ModeArg> for PlaybackMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => PlaybackMode::Sequential,
            ModeArg::Random => PlaybackMode::Random,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Captions { file, at, window } => {
            show_captions(&file, at, window)?;
        }
        Commands::Play {
            playlist,
            mode,
            start,
            config,
        } => {
            play(&playlist, mode.map(Into::into), start, config)?;
        }
    }

    Ok(())
}

fn show_captions(file: &Path, at: Option<f64>, window: usize) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let lines = match at {
        Some(time) => {
            let track = CaptionTrack::from_text(Some(&raw));
            render::at_time(&track, time, window)
        }
        None => render::timeline(&parse_with_report(&raw)),
    };

    let mut out = stdout();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn play(
    playlist: &Path,
    mode: Option<PlaybackMode>,
    start: Option<usize>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = CliConfig::load(config.as_deref()).context("failed to load configuration")?;
    let request = playlist_file::load_request(playlist, mode, start)
        .with_context(|| format!("failed to load playlist {}", playlist.display()))?;

    let sink = VirtualSink::for_request(&request, config.simulation.default_track_secs);
    let mut player = TransportController::new(sink, config.player.clone())?;
    player.load(request)?;

    tracing::info!("Starting Verse with {} tracks", player.playlist().len());

    enable_raw_mode()?;
    let _guard = RawModeGuard;
    let mut out = stdout();
    execute!(out, Hide)?;

    let result = run(&mut player, &config.simulation, &mut out);

    player.end_session();
    execute!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown), Show)?;
    result
}

/// Restores the terminal even when the loop bails out early
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn run(
    player: &mut TransportController<VirtualSink>,
    settings: &SimulationSettings,
    out: &mut Stdout,
) -> anyhow::Result<()> {
    let tick = Duration::from_millis(settings.tick_ms);
    let mut last_tick = Instant::now();
    let mut notice: Option<String> = None;

    loop {
        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        player.sink_mut().advance(elapsed * settings.speed);

        for media_event in player.sink_mut().poll_events() {
            if let Err(e) = player.handle_media_event(media_event) {
                tracing::debug!("Media event failed: {}", e);
            }
        }

        let mut exit = false;
        for player_event in player.drain_events() {
            match player_event {
                PlayerEvent::ExitRequested => exit = true,
                PlayerEvent::Notice { message } => notice = Some(message),
                PlayerEvent::TrackChanged { .. } => notice = None,
                _ => {}
            }
        }
        if exit {
            return Ok(());
        }

        draw(out, player, notice.as_deref())?;

        if !event::poll(tick)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.kind != KeyEventKind::Press {
            continue;
        }

        if keys::is_interrupt(&key) {
            return Ok(());
        }

        if let Some(chord) = keys::to_chord(key) {
            player.handle_key(chord, InputFocus::Other);
        }
    }
}

fn draw(
    out: &mut Stdout,
    player: &TransportController<VirtualSink>,
    notice: Option<&str>,
) -> anyhow::Result<()> {
    let caption = match notice {
        Some(message) => format!("! {message}"),
        None => render::caption_line(player),
    };

    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        Print(render::now_playing_line(player)),
        Print("\r\n"),
        Print(caption),
        MoveUp(1),
        MoveToColumn(0)
    )?;
    out.flush()?;
    Ok(())
}
