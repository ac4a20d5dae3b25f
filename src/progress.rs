//! Fetch progress reporting for `hnf list`.
//!
//! Progress is emitted on **stderr** so stdout remains parseable for scripts
//! (e.g. `hnf list --format json | jq`).

use std::io::Write;

/// A single progress event around the front-page fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchProgressEvent {
    /// The request is about to be sent to `source`.
    Started { source: String },
    /// The response decoded into `stories` records.
    Finished { stories: usize },
    /// The fetch failed; `message` is what the page will show.
    Failed { message: String },
}

/// Reports fetch progress. Implementations write to stderr (human or JSON).
pub trait FetchProgressReporter: Send + Sync {
    fn report(&self, event: FetchProgressEvent);
}

/// Human-friendly progress on stderr: "fetching https://...  done, 100 stories".
pub struct StderrProgress;

impl FetchProgressReporter for StderrProgress {
    fn report(&self, event: FetchProgressEvent) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", human_line(&event));
        let _ = err.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl FetchProgressReporter for JsonProgress {
    fn report(&self, event: FetchProgressEvent) {
        if let Ok(line) = serde_json::to_string(&json_line(&event)) {
            let mut err = std::io::stderr().lock();
            let _ = writeln!(err, "{}", line);
            let _ = err.flush();
        }
    }
}

fn human_line(event: &FetchProgressEvent) -> String {
    match event {
        FetchProgressEvent::Started { source } => format!("fetching {}...", source),
        FetchProgressEvent::Finished { stories } => format!("fetched {} stories", stories),
        FetchProgressEvent::Failed { message } => format!("fetch failed: {}", message),
    }
}

fn json_line(event: &FetchProgressEvent) -> serde_json::Value {
    match event {
        FetchProgressEvent::Started { source } => serde_json::json!({
            "event": "progress",
            "phase": "fetching",
            "source": source
        }),
        FetchProgressEvent::Finished { stories } => serde_json::json!({
            "event": "progress",
            "phase": "done",
            "stories": stories
        }),
        FetchProgressEvent::Failed { message } => serde_json::json!({
            "event": "progress",
            "phase": "failed",
            "message": message
        }),
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl FetchProgressReporter for NoProgress {
    fn report(&self, _event: FetchProgressEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn FetchProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
