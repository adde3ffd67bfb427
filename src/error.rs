//! Error types for loading planogram input

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum InputError {
    /// Malformed JSON text
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        span: Span,
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not describe display units or records
    #[error("invalid data at line {line}, column {column}: {message}")]
    Data {
        span: Span,
        line: usize,
        column: usize,
        message: String,
    },

    /// Input ended before a complete document was read
    #[error("unexpected end of input: {message}")]
    Eof { span: Span, message: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// Convert a `serde_json` error into an input error anchored in `source`
    pub fn from_json(err: serde_json::Error, source: &str) -> Self {
        use serde_json::error::Category;

        let line = err.line();
        let column = err.column();
        let span = char_span(source, byte_offset(source, line, column));
        let message = strip_position(&err.to_string());

        match err.classify() {
            Category::Io => Self::Io(std::io::Error::from(err)),
            Category::Eof => Self::Eof { span, message },
            Category::Syntax => Self::Syntax {
                span,
                line,
                column,
                message,
            },
            Category::Data => Self::Data {
                span,
                line,
                column,
                message,
            },
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } | Self::Data { span, .. } | Self::Eof { span, .. } => {
                Some(span)
            }
            Self::Io(_) => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };
        let message = match self {
            Self::Syntax { message, .. } | Self::Data { message, .. } | Self::Eof { message, .. } => {
                message.clone()
            }
            Self::Io(e) => e.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(&message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(message.clone())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Deserialize `source`, keeping the error position for reports
pub(crate) fn parse_json<T: DeserializeOwned>(source: &str) -> Result<T, InputError> {
    serde_json::from_str(source).map_err(|e| InputError::from_json(e, source))
}

/// Byte span of the character at `offset`, widened to char boundaries
fn char_span(source: &str, mut offset: usize) -> Span {
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let len = source[offset..].chars().next().map_or(0, char::len_utf8);
    offset..offset + len
}

/// Translate a 1-based line/column pair into a byte offset, clamped to the source
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(source.len());
        }
        offset += text.len();
    }
    source.len()
}

/// serde_json appends " at line X column Y"; the report shows that already
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
