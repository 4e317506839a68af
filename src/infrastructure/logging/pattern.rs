//! `%(name)s`-style record layouts
//!
//! Renders records from a pattern such as
//! `%(asctime)s - %(name)s - %(levelname)s - %(message)s`. Supported
//! attributes: `asctime`, `name`, `levelname`, `message`, `module`,
//! `filename`, `lineno`, `process`, `thread`. A width such as `%(levelname)-8s`
//! pads the value. Unknown attributes are written verbatim.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Field that carries a [`Logger`](super::Logger) name
const LOGGER_FIELD: &str = "logger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    AscTime,
    Name,
    LevelName,
    Message,
    Module,
    FileName,
    LineNo,
    Process,
    Thread,
}

impl Attribute {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "asctime" => Self::AscTime,
            "name" => Self::Name,
            "levelname" => Self::LevelName,
            "message" => Self::Message,
            "module" => Self::Module,
            "filename" => Self::FileName,
            "lineno" => Self::LineNo,
            "process" => Self::Process,
            "thread" => Self::Thread,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field {
        attribute: Attribute,
        width: usize,
        left: bool,
    },
}

/// Event formatter driven by a `%(attribute)s` pattern
pub struct PatternFormat {
    tokens: Vec<Token>,
    timer: ChronoLocal,
}

impl PatternFormat {
    /// Compile `pattern`; `datefmt` is the strftime pattern used for `asctime`
    pub fn new(pattern: &str, datefmt: &str) -> Self {
        Self {
            tokens: tokenize(pattern),
            timer: ChronoLocal::new(datefmt.to_string()),
        }
    }

    /// Whether `s` contains at least one recognized `%(attribute)` token
    pub fn is_pattern(s: &str) -> bool {
        tokenize(s)
            .iter()
            .any(|token| matches!(token, Token::Field { .. }))
    }
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(pos) = rest.find('%') {
        literal.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(stripped) = after.strip_prefix('%') {
            literal.push('%');
            rest = stripped;
        } else if let Some((token, consumed)) = parse_field(after) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token);
            rest = &after[consumed..];
        } else {
            literal.push('%');
            rest = after;
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Parse `(name)<flags><width><.precision><conversion>` after a `%`
///
/// Returns the token and the number of bytes consumed.
fn parse_field(s: &str) -> Option<(Token, usize)> {
    let inner = s.strip_prefix('(')?;
    let close = inner.find(')')?;
    let attribute = Attribute::from_name(&inner[..close])?;

    let format_spec = &inner[close + 1..];
    let left = format_spec.starts_with('-');
    let mut idx = usize::from(left);

    let digits = count_digits(&format_spec[idx..]);
    let width = format_spec[idx..idx + digits].parse().unwrap_or(0);
    idx += digits;

    if format_spec[idx..].starts_with('.') {
        idx += 1 + count_digits(&format_spec[idx + 1..]);
    }

    let conversion = format_spec[idx..].chars().next()?;
    if !"sdfrxi".contains(conversion) {
        return None;
    }
    idx += 1;

    // '(' + name + ')' + format_spec
    Some((
        Token::Field {
            attribute,
            width,
            left,
        },
        1 + close + 1 + idx,
    ))
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn level_name(level: Level) -> &'static str {
    if level == Level::WARN {
        "WARNING"
    } else {
        level.as_str()
    }
}

/// Collects the message, the logger name and any remaining fields
#[derive(Default)]
struct RecordVisitor {
    message: String,
    logger: Option<String>,
    extra: Vec<String>,
}

impl RecordVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            LOGGER_FIELD => self.logger = Some(value),
            name => self.extra.push(format!("{name}={value}")),
        }
    }

    fn message(&self) -> String {
        if self.extra.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.extra.join(" "))
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }
}

impl<S, N> FormatEvent<S, N> for PatternFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        for token in &self.tokens {
            let (attribute, width, left) = match token {
                Token::Literal(text) => {
                    writer.write_str(text)?;
                    continue;
                }
                Token::Field {
                    attribute,
                    width,
                    left,
                } => (attribute, *width, *left),
            };

            let value = match attribute {
                Attribute::AscTime => {
                    let mut buf = String::new();
                    self.timer.format_time(&mut Writer::new(&mut buf))?;
                    buf
                }
                Attribute::Name => visitor
                    .logger
                    .clone()
                    .unwrap_or_else(|| meta.target().to_string()),
                Attribute::LevelName => level_name(*meta.level()).to_string(),
                Attribute::Message => visitor.message(),
                Attribute::Module => meta.module_path().unwrap_or_default().to_string(),
                Attribute::FileName => meta
                    .file()
                    .and_then(|file| std::path::Path::new(file).file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                Attribute::LineNo => meta.line().map(|line| line.to_string()).unwrap_or_default(),
                Attribute::Process => std::process::id().to_string(),
                Attribute::Thread => format!("{:?}", std::thread::current().id()),
            };

            if left {
                write!(writer, "{value:<width$}")?;
            } else {
                write!(writer, "{value:>width$}")?;
            }
        }

        writeln!(writer)
    }
}
