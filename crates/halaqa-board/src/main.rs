//! halaqa-board - session status board
//!
//! Loads a schedule and shows what each session card would display:
//! - once, at the current (or given) instant
//! - or continuously, re-evaluated on a fixed interval until Ctrl-C
//!
//! With `--simulate-links`, due link generation jobs are fulfilled by the
//! simulated provider so sessions become joinable on their own.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use halaqa_api::{BoardSnapshot, SessionView};
use halaqa_config::load_config;
use halaqa_core::{CoreEvent, StatusBoard, provision_meeting};
use halaqa_provider_api::{MeetingProvider, SimulatedProvider};
use halaqa_util::{default_config_path, format_clock_time, parse_instant};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// halaqa-board - meeting status board for class sessions
#[derive(Parser, Debug)]
#[command(name = "halaqa-board")]
#[command(about = "Meeting status board for class sessions", long_about = None)]
struct Args {
    /// Schedule file path (default: ~/.config/halaqa/config.toml)
    #[arg(short, long, env = "HALAQA_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Evaluate at this instant instead of now (RFC 3339 or "YYYY-MM-DD HH:MM:SS")
    #[arg(long, value_parser = parse_at)]
    at: Option<DateTime<Utc>>,

    /// Keep re-evaluating until interrupted
    #[arg(short, long)]
    watch: bool,

    /// Re-evaluation interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Generate meeting links with the simulated provider when due
    #[arg(long)]
    simulate_links: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn parse_at(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s).ok_or_else(|| format!("invalid instant '{}'", s))
}

/// Source of `now` for the board
#[derive(Debug, Clone, Copy)]
enum Clock {
    System,
    /// Starts at a fixed instant and advances with real time
    Anchored {
        at: DateTime<Utc>,
        started: Instant,
    },
}

impl Clock {
    fn new(at: Option<DateTime<Utc>>) -> Self {
        match at {
            Some(at) => Clock::Anchored {
                at,
                started: Instant::now(),
            },
            None => Clock::System,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => halaqa_util::now(),
            Clock::Anchored { at, started } => {
                let elapsed = chrono::Duration::from_std(started.elapsed())
                    .unwrap_or_else(|_| chrono::Duration::zero());
                *at + elapsed
            }
        }
    }
}

struct App {
    board: StatusBoard,
    clock: Clock,
    provider: Option<Box<dyn MeetingProvider>>,
    json: bool,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let schedule = load_config(&args.config)
            .with_context(|| format!("Failed to load schedule from {:?}", args.config))?;

        info!(
            config_path = %args.config.display(),
            session_count = schedule.sessions.len(),
            "Schedule loaded"
        );

        let board = StatusBoard::from_schedule(&schedule)
            .context("Schedule contains an invalid meeting")?;

        let provider: Option<Box<dyn MeetingProvider>> = if args.simulate_links {
            info!("Simulated meeting provider enabled");
            Some(Box::new(SimulatedProvider::new()))
        } else {
            None
        };

        Ok(Self {
            board,
            clock: Clock::new(args.at),
            provider,
            json: args.json,
        })
    }

    fn print_snapshot(&self) -> Result<()> {
        let snapshot = self.board.snapshot(self.clock.now());
        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            print!("{}", render_snapshot(&snapshot));
        }
        Ok(())
    }

    async fn run(mut self, interval: Duration) -> Result<()> {
        let mut tick_timer = tokio::time::interval(interval);

        info!(interval_ms = interval.as_millis() as u64, "Board running");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received interrupt, stopping");
                    break;
                }

                _ = tick_timer.tick() => {
                    let now = self.clock.now();
                    let events = self.board.tick(now);
                    for event in events {
                        self.handle_event(event, now).await?;
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: CoreEvent, now: DateTime<Utc>) -> Result<()> {
        match &event {
            CoreEvent::StatusChanged { .. } | CoreEvent::MeetingAttached { .. } => {
                self.print_event(&event, now)?;
            }

            CoreEvent::LinkGenerationDue { session_id, .. } => {
                let Some(provider) = &self.provider else {
                    return Ok(());
                };
                let Some(session) = self.board.get(session_id) else {
                    return Ok(());
                };

                match provision_meeting(&**provider, session).await {
                    Ok(provisioned) => {
                        let attached = self.board.attach_meeting(session_id, provisioned)?;
                        self.print_event(&attached, now)?;
                    }
                    Err(e) => {
                        warn!(session_id = %session_id, error = %e, "Link job failed, will retry");
                        self.board.release_link_job(session_id)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn print_event(&self, event: &CoreEvent, now: DateTime<Utc>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(&event_json(event, now))?);
        } else if let Some(line) = render_event(event, now) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// One line per session card
fn render_card(view: &SessionView) -> String {
    let mut line = format!(
        "[{}] {} {}",
        view.status.status.label(),
        format_clock_time(&view.start_time),
        view.title
    );
    if !view.instructor.is_empty() {
        line.push_str(&format!(" ({})", view.instructor));
    }
    line.push_str(&format!(": {}", view.status.message));
    if let Some(url) = &view.join_url {
        line.push_str(&format!(" -> {}", url));
    }
    line
}

fn render_snapshot(snapshot: &BoardSnapshot) -> String {
    if snapshot.sessions.is_empty() {
        return "No sessions scheduled\n".to_string();
    }

    snapshot
        .sessions
        .iter()
        .map(|view| format!("{}\n", render_card(view)))
        .collect()
}

fn render_event(event: &CoreEvent, now: DateTime<Utc>) -> Option<String> {
    let stamp = format_clock_time(&now);
    match event {
        CoreEvent::StatusChanged {
            session_id,
            to,
            message,
            ..
        } => Some(format!("{} {} [{}] {}", stamp, session_id, to.label(), message)),
        CoreEvent::MeetingAttached {
            session_id,
            meeting_id,
        } => Some(format!("{} {} meeting {} ready", stamp, session_id, meeting_id)),
        CoreEvent::LinkGenerationDue { .. } => None,
    }
}

fn event_json(event: &CoreEvent, now: DateTime<Utc>) -> serde_json::Value {
    match event {
        CoreEvent::StatusChanged {
            session_id,
            from,
            to,
            can_join,
            message,
        } => serde_json::json!({
            "event": "status_changed",
            "at": now,
            "session_id": session_id,
            "from": from,
            "to": to,
            "can_join": can_join,
            "message": message,
        }),
        CoreEvent::LinkGenerationDue {
            session_id,
            start_time,
        } => serde_json::json!({
            "event": "link_generation_due",
            "at": now,
            "session_id": session_id,
            "start_time": start_time,
        }),
        CoreEvent::MeetingAttached {
            session_id,
            meeting_id,
        } => serde_json::json!({
            "event": "meeting_attached",
            "at": now,
            "session_id": session_id,
            "meeting_id": meeting_id,
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "halaqa-board starting");

    if halaqa_util::is_mock_time_active() {
        info!(now = %halaqa_util::now(), "Using mock time");
    }

    let app = App::new(&args)?;
    if !args.watch {
        return app.print_snapshot();
    }

    if let Err(e) = app.run(Duration::from_millis(args.interval_ms)).await {
        error!(error = %e, "Board stopped with error");
        return Err(e);
    }
    Ok(())
}
