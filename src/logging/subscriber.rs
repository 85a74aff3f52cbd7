//! Tracing subscriber: a coloured console view and a plain-text run log.
//!
//! The run log is the stock `tracing_subscriber` formatter writing to a file,
//! so every line carries its level, target and the `host{sync=.. host=..}`
//! span it was emitted in. The console only shows the message, with host
//! outcomes rendered from their structured fields.
use std::fs::File;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Filtered, LevelFilter};
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full, Writer};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

use super::file::{log_file_path, start_log};

/// Target for stage headers (`==> push backup`).
pub(super) const STAGE_TARGET: &str = "syncme::stage";

/// Target for commands echoed by `--dry-run`.
pub(super) const DRY_RUN_TARGET: &str = "syncme::dry_run";

/// Target for host outcomes, with fields `sync`, `host`, `status` and an
/// optional `detail`.
pub(super) const OUTCOME_TARGET: &str = "syncme::outcome";

/// Target for everything else the [`Logger`](super::Logger) emits.
pub(super) const MESSAGE_TARGET: &str = "syncme";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[1;34m";

/// Run log layer: full format, UTC wall-clock time, no colours.
pub(super) type RunLogLayer<S> = Filtered<
    tracing_subscriber::fmt::Layer<S, DefaultFields, Format<Full, ChronoUtc>, Mutex<File>>,
    LevelFilter,
    S,
>;

/// Build the run log layer over an already opened `file`.
///
/// Always records `DEBUG` and above, whatever the console verbosity.
pub(super) fn run_log_layer<S>(file: File) -> RunLogLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    use tracing_subscriber::Layer as _;

    tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoUtc::new("%H:%M:%S".to_string()))
        .with_filter(LevelFilter::DEBUG)
}

/// The fields syncme events carry.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    sync: Option<String>,
    host: Option<String>,
    status: Option<String>,
    detail: Option<String>,
}

impl EventFields {
    fn of(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "sync" => self.sync = Some(value),
            "host" => self.host = Some(value),
            "status" => self.status = Some(value),
            "detail" => self.detail = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }
}

/// Console rendering of syncme events.
#[derive(Debug)]
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let fields = EventFields::of(event);
        let msg = &fields.message;

        match (*metadata.level(), metadata.target()) {
            (Level::INFO, OUTCOME_TARGET) => write_outcome(&mut writer, &fields),
            (Level::INFO, STAGE_TARGET) => writeln!(writer, "{BLUE}==>{RESET} {BOLD}{msg}{RESET}"),
            (Level::INFO, DRY_RUN_TARGET) => writeln!(writer, "  {YELLOW}[DRY RUN]{RESET} {msg}"),
            (Level::INFO, _) => writeln!(writer, "  {msg}"),
            (Level::ERROR, _) => {
                write!(writer, "{RED}ERROR{RESET} {msg}")?;
                write_scope(ctx, &mut writer)
            }
            (Level::WARN, _) => {
                write!(writer, "{YELLOW}WARN{RESET}  {msg}")?;
                write_scope(ctx, &mut writer)
            }
            _ => writeln!(writer, "  {DIM}{msg}{RESET}"),
        }
    }
}

/// `✓ backup → nas (detail)`, coloured by status.
fn write_outcome(writer: &mut Writer<'_>, fields: &EventFields) -> std::fmt::Result {
    let (icon, color) = match fields.status.as_deref() {
        Some("ok") => ("✓", GREEN),
        Some("skipped") => ("○", YELLOW),
        _ => ("✗", RED),
    };
    let sync = fields.sync.as_deref().unwrap_or("?");
    let host = fields.host.as_deref().unwrap_or("?");
    write!(writer, "  {color}{icon} {sync} → {host}")?;
    if let Some(detail) = &fields.detail {
        write!(writer, " ({detail})")?;
    }
    writeln!(writer, "{RESET}")
}

/// Append the fields of the enclosing spans, then end the line.
fn write_scope<S, N>(ctx: &FmtContext<'_, S, N>, writer: &mut Writer<'_>) -> std::fmt::Result
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    if let Some(scope) = ctx.event_scope() {
        for span in scope.from_root() {
            let extensions = span.extensions();
            if let Some(fields) = extensions.get::<FormattedFields<N>>()
                && !fields.is_empty()
            {
                write!(writer, " {DIM}[{fields}]{RESET}")?;
            }
        }
    }
    writeln!(writer)
}

/// Initialise the global [`tracing`] subscriber.
///
/// The console shows INFO and above (DEBUG with `verbose`); warnings and
/// errors go to stderr, everything else to stdout. The run log at
/// `$XDG_CACHE_HOME/syncme/<command>.log` always records DEBUG and above.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    // Span fields are shared with the run log: no colour codes.
    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_ansi(false)
        .with_writer(make_writer)
        .with_filter(console_level);

    let run_log = log_file_path(command)
        .and_then(|path| start_log(&path, command))
        .map(run_log_layer);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(run_log)
        .init();
}
