use std::path::{Path, PathBuf};

use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use super::config::{LogFormat, LoggingSettings, RotationPolicy};
use super::handle::Logger;
use super::pattern::PatternFormat;
use crate::domain::error::LoggingError;
use crate::domain::models::ConfigTree;

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Configure process-wide logging from a configuration tree
///
/// Reads the optional `logging` section; see [`LoggingSettings`] for the
/// keys and their defaults.
pub fn configure(config: &ConfigTree) -> Result<LoggingContext, LoggingError> {
    let settings = LoggingSettings::from_config(config)?;
    LoggingContext::init(&settings)
}

/// Handle on the process-wide logging setup
///
/// Owns the file writer's worker guard. Dropping the context flushes pending
/// records; keep it alive for the lifetime of the program.
#[derive(Debug)]
pub struct LoggingContext {
    log_file: PathBuf,
    level: Level,
    global: bool,
    _guard: WorkerGuard,
}

impl LoggingContext {
    /// Initialize logging with explicit settings
    ///
    /// The log directory and file are always prepared. When another global
    /// subscriber is already installed the existing one is kept, a warning is
    /// emitted through it, and [`LoggingContext::is_global`] returns `false`.
    pub fn init(settings: &LoggingSettings) -> Result<Self, LoggingError> {
        let level = parse_log_level(&settings.level)?;

        let (appender, log_file) = prepare_log_file(settings)?;
        let (file_writer, guard) = tracing_appender::non_blocking(appender);

        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let env_filter = build_env_filter(level, rust_log.as_deref());

        let mut layers: Vec<BoxedLayer> =
            vec![build_layer(&settings.format, &settings.datefmt, file_writer, false)];
        if settings.console {
            layers.push(build_layer(
                &settings.format,
                &settings.datefmt,
                std::io::stdout,
                true,
            ));
        }

        let global = match tracing_subscriber::registry()
            .with(env_filter)
            .with(layers)
            .try_init()
        {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "global logger already installed, keeping existing configuration");
                false
            }
        };

        info!(
            level = %level,
            format = ?settings.format,
            file = %log_file.display(),
            "logger initialized"
        );

        Ok(Self {
            log_file,
            level,
            global,
            _guard: guard,
        })
    }

    /// Path of the log file (for rotated policies, the file name prefix)
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    /// Whether this context installed the process-wide subscriber
    pub const fn is_global(&self) -> bool {
        self.global
    }

    /// Named logger routed through the process-wide configuration
    pub fn logger(&self, name: &str) -> Logger {
        Logger::new(name)
    }
}

/// Filter at `level`, refined by `RUST_LOG`-style directives
///
/// The configured level is the base directive; `env_directives` are appended
/// after it, so `crate=debug` raises one target without dropping the base, and
/// a bare level such as `warn` replaces it. Invalid directives are skipped.
pub fn build_env_filter(level: Level, env_directives: Option<&str>) -> EnvFilter {
    let mut directives = LevelFilter::from_level(level).to_string();
    if let Some(extra) = env_directives.map(str::trim).filter(|d| !d.is_empty()) {
        directives.push(',');
        directives.push_str(extra);
    }
    EnvFilter::builder().parse_lossy(directives)
}

/// Create the log directory and open the log file for appending
///
/// Returns the appender and the path of the file it writes.
pub fn prepare_log_file(
    settings: &LoggingSettings,
) -> Result<(RollingFileAppender, PathBuf), LoggingError> {
    let path = &settings.file;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidFile(path.clone()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(settings.rotation.into())
        .filename_prefix(file_name)
        .build(&dir)?;

    Ok((appender, dir.join(file_name)))
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}

fn build_layer<W>(format: &LogFormat, datefmt: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(ChronoLocal::new(datefmt.to_string()));

    match format {
        LogFormat::Full => layer.with_target(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Pattern(pattern) => layer
            .event_format(PatternFormat::new(pattern, datefmt))
            .boxed(),
    }
}

/// Parse a level name, accepting the common aliases
pub fn parse_log_level(level: &str) -> Result<Level, LoggingError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "critical" | "fatal" => Ok(Level::ERROR),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}
