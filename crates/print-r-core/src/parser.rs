//! Recursive-descent parser for `print_r()` array dumps.
//!
//! The input is split into lines once, then scanned by a small set of
//! mutually recursive functions. Each of them takes a cursor (an index into
//! the line list) and returns the value it built together with the cursor of
//! the first line it did not consume. The parser itself holds no mutable
//! state, so a single [`Parser`] can be reused and any sub-parse can be
//! driven in isolation.
//!
//! Indentation carries no meaning: every line is trimmed at comparison time.
//!
//! # Tracing Support
//!
//! Enable the `tracing` feature for parsing instrumentation:
//!
//! ```toml
//! print-r-core = { version = "0.1", features = ["tracing"] }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use bstr::ByteSlice;
use memchr::{memchr, memchr_iter};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace, warn};

use crate::error::{ErrorKind, PrintRError, Result};
use crate::types::Value;

/// A value together with the cursor just past the lines it was built from.
pub type Parsed<'a> = (Value<'a>, usize);

/// Maximum nesting depth to prevent stack overflow.
pub const MAX_DEPTH: usize = 512;

/// Parser configuration options.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum container nesting depth. The root container is depth 1.
    pub max_depth: usize,
    /// Whether an unrecognized line inside a container is an error.
    ///
    /// When `false` (the default), such lines are dump noise and are skipped.
    /// When `true`, they fail the parse with [`ErrorKind::UnexpectedLine`].
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            strict: false,
        }
    }
}

/// A `print_r()` dump parser over a pre-split line list.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    /// Input lines, line endings removed, indentation kept.
    lines: Vec<&'a str>,
    /// Parser configuration.
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Create a parser for `text` with default configuration.
    pub fn new(text: &'a str) -> Result<Self> {
        Self::with_config(text, ParserConfig::default())
    }

    /// Create a parser for `text` with custom configuration.
    pub fn with_config(text: &'a str, config: ParserConfig) -> Result<Self> {
        Ok(Self::from_lines(split_lines(text)?, config))
    }

    /// Create a parser over lines that were already split.
    pub fn from_lines(lines: Vec<&'a str>, config: ParserConfig) -> Self {
        Self { lines, config }
    }

    /// The line list this parser scans.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Parse the whole document and return its root value.
    ///
    /// Anything after the root container's closing line is ignored.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(lines = self.lines.len())))]
    pub fn parse(&self) -> Result<Value<'a>> {
        #[cfg(feature = "tracing")]
        debug!(lines = self.lines.len(), "Starting print_r parse");

        let result = self.parse_value(0);

        #[cfg(feature = "tracing")]
        match &result {
            Ok((value, next)) => {
                if *next < self.lines.len() {
                    trace!(ignored_from = next + 1, "Ignoring content after root container");
                }
                debug!(value_type = value.type_name(), "Parse completed successfully");
            }
            Err(e) => warn!(error = %e, "Parse failed"),
        }

        result.map(|(value, _)| value)
    }

    /// Parse a document-level value starting at `cursor`.
    ///
    /// Blank lines are skipped; the first non-blank line must be an `Array`
    /// header.
    pub fn parse_value(&self, cursor: usize) -> Result<Parsed<'a>> {
        let cursor = self.skip_blank(cursor);

        let Some(&raw) = self.lines.get(cursor) else {
            return Err(PrintRError::new(ErrorKind::UnexpectedEndOfInput, self.lines.len()));
        };

        if raw.trim().starts_with("Array") {
            return self.parse_array(cursor, 1);
        }

        Err(PrintRError::new(ErrorKind::TopLevelNotArray, cursor + 1).with_input_preview(raw))
    }

    /// Parse a container whose `Array` header is the line at `cursor`.
    fn parse_array(&self, cursor: usize, depth: usize) -> Result<Parsed<'a>> {
        let open = self
            .find_open_paren(cursor + 1)
            .ok_or_else(|| PrintRError::new(ErrorKind::MissingOpenParen, cursor + 1))?;
        self.parse_array_contents(open + 1, depth)
    }

    /// Parse a container announced by the `[key] => Array` line at `cursor`.
    fn parse_nested_array(&self, cursor: usize, depth: usize) -> Result<Parsed<'a>> {
        let open = self.find_open_paren(cursor + 1).ok_or_else(|| {
            PrintRError::new(ErrorKind::MissingOpenParen, cursor + 1)
                .with_context("for nested Array")
                .with_input_preview(self.lines[cursor])
        })?;
        self.parse_array_contents(open + 1, depth)
    }

    /// Parse container entries from the line after `(` through the matching `)`.
    #[cfg_attr(feature = "tracing", instrument(skip(self), level = "trace"))]
    fn parse_array_contents(&self, cursor: usize, depth: usize) -> Result<Parsed<'a>> {
        if depth > self.config.max_depth {
            #[cfg(feature = "tracing")]
            warn!(depth, max_depth = self.config.max_depth, "Max depth exceeded");
            return Err(PrintRError::new(
                ErrorKind::MaxDepthExceeded(self.config.max_depth),
                cursor,
            ));
        }

        let mut entries = Entries::default();
        let mut cursor = cursor;

        while let Some(&raw) = self.lines.get(cursor) {
            let line = raw.trim();

            if line.is_empty() {
                cursor += 1;
                continue;
            }

            if line == ")" {
                #[cfg(feature = "tracing")]
                trace!(
                    entries = entries.len(),
                    sequential = entries.is_sequential(),
                    depth,
                    "Closed container"
                );
                return Ok((entries.into_value(), cursor + 1));
            }

            if let Some((key, rest)) = split_entry(line) {
                let (value, next) = if rest.trim() == "Array" {
                    self.parse_nested_array(cursor, depth + 1)?
                } else {
                    (coerce_scalar(rest), cursor + 1)
                };
                entries.insert(key, value);
                cursor = next;
                continue;
            }

            if line == "Array" {
                return Err(PrintRError::new(ErrorKind::AmbiguousNestedArray, cursor + 1)
                    .with_input_preview(raw));
            }

            if self.config.strict {
                return Err(PrintRError::new(
                    ErrorKind::UnexpectedLine(line.to_string()),
                    cursor + 1,
                )
                .with_input_preview(raw));
            }

            #[cfg(feature = "tracing")]
            warn!(line = cursor + 1, content = line, "Skipping unrecognized line");

            cursor += 1;
        }

        Err(PrintRError::new(ErrorKind::UnexpectedEndOfInput, self.lines.len())
            .with_context("container is missing its closing ')'"))
    }

    /// First non-blank line at or after `cursor`.
    #[inline]
    fn skip_blank(&self, cursor: usize) -> usize {
        self.lines[cursor.min(self.lines.len())..]
            .iter()
            .position(|line| !line.trim().is_empty())
            .map_or(self.lines.len(), |offset| cursor + offset)
    }

    /// First line at or after `cursor` that contains `(`.
    #[inline]
    fn find_open_paren(&self, cursor: usize) -> Option<usize> {
        self.lines
            .get(cursor..)?
            .iter()
            .position(|line| memchr(b'(', line.as_bytes()).is_some())
            .map(|offset| cursor + offset)
    }
}

/// Entries of a container under construction.
///
/// Keys stay unique: a repeated key replaces the earlier value in place.
/// The container is sequential while every key seen so far was the next
/// canonical index; one miss disqualifies it for good.
#[derive(Default)]
struct Entries<'a> {
    pairs: Vec<(Cow<'a, str>, Value<'a>)>,
    positions: HashMap<&'a str, usize>,
    next_index: u64,
    broken: bool,
}

impl<'a> Entries<'a> {
    fn insert(&mut self, key: &'a str, value: Value<'a>) {
        if !self.broken && canonical_index(key) == Some(self.next_index) {
            self.next_index += 1;
        } else {
            self.broken = true;
        }

        match self.positions.get(key) {
            Some(&position) => self.pairs[position].1 = value,
            None => {
                self.positions.insert(key, self.pairs.len());
                self.pairs.push((Cow::Borrowed(key), value));
            }
        }
    }

    #[cfg(feature = "tracing")]
    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn is_sequential(&self) -> bool {
        !self.broken && !self.pairs.is_empty()
    }

    fn into_value(self) -> Value<'a> {
        if self.is_sequential() {
            Value::Sequence(self.pairs.into_iter().map(|(_, value)| value).collect())
        } else {
            Value::Mapping(self.pairs)
        }
    }
}

/// The index a key names, if it is written in canonical decimal form.
///
/// `"0"` and `"12"` qualify; `"01"`, `"+1"`, `"-1"` and `" 1"` do not.
fn canonical_index(key: &str) -> Option<u64> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    key.parse().ok()
}

/// Split a trimmed `[key] => rest` line into its key and raw rest.
///
/// The key is everything up to the first `]` and must be non-empty. A single
/// space after `=>` belongs to the separator; `rest` may be empty.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('[')?;
    let close = memchr(b']', inner.as_bytes())?;
    if close == 0 {
        return None;
    }
    let key = &inner[..close];
    let rest = inner[close + 1..].strip_prefix(" =>")?;
    Some((key, rest.strip_prefix(' ').unwrap_or(rest)))
}

/// Coerce the raw text after `=>` into a scalar value.
///
/// Rules apply in this order, first match wins:
///
/// 1. empty after trimming: [`Value::EmptyString`]
/// 2. one or more ASCII digits: [`Value::Integer`]
/// 3. optional digits, `.`, one or more digits: [`Value::Float`]
/// 4. anything else: [`Value::String`], trimmed
///
/// Signs, exponents and digit separators are never numeric. `1` and `0`
/// are integers, never booleans.
///
/// # Example
///
/// ```rust
/// use print_r_core::{coerce_scalar, Value};
///
/// assert_eq!(coerce_scalar(" 30 "), Value::Integer(30));
/// assert_eq!(coerce_scalar(".5"), Value::Float(0.5));
/// assert_eq!(coerce_scalar("-1").as_str(), Some("-1"));
/// ```
pub fn coerce_scalar(raw: &str) -> Value<'_> {
    let text = raw.trim();

    if text.is_empty() {
        return Value::EmptyString;
    }

    if is_integer_literal(text) {
        return match text.parse::<u64>() {
            Ok(int) => Value::Integer(int),
            // Too wide for u64: keep the magnitude as a float.
            Err(_) => parse_float(text),
        };
    }

    if is_float_literal(text) {
        return parse_float(text);
    }

    Value::String(Cow::Borrowed(text))
}

/// `^\d+$`
#[inline]
fn is_integer_literal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `^\d*\.\d+$`
#[inline]
fn is_float_literal(text: &str) -> bool {
    match memchr(b'.', text.as_bytes()) {
        Some(dot) => {
            let (whole, fraction) = (&text[..dot], &text[dot + 1..]);
            whole.bytes().all(|b| b.is_ascii_digit()) && is_integer_literal(fraction)
        }
        None => false,
    }
}

#[inline]
fn parse_float(text: &str) -> Value<'_> {
    match text.parse::<f64>() {
        Ok(float) => Value::Float(float),
        Err(_) => Value::String(Cow::Borrowed(text)),
    }
}

/// Split dump text into lines.
///
/// The text is trimmed as a whole (a byte order mark counts as whitespace
/// here), split on `\n`, and a trailing `\r` is removed from every line.
/// Nothing else is normalized.
pub fn split_lines(text: &str) -> Result<Vec<&str>> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Err(PrintRError::new(ErrorKind::EmptyInput, 0));
    }

    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', text.as_bytes()) {
        lines.push(strip_cr(&text[start..end]));
        start = end + 1;
    }
    lines.push(strip_cr(&text[start..]));

    Ok(lines)
}

#[inline]
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse a `print_r()` dump.
///
/// This is the primary API.
///
/// # Example
///
/// ```rust
/// use print_r_core::from_str;
///
/// let value = from_str("Array\n(\n    [name] => John\n    [age] => 30\n)").unwrap();
/// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("John"));
/// assert_eq!(value.get("age").and_then(|v| v.as_int()), Some(30));
/// ```
#[inline]
pub fn from_str(text: &str) -> Result<Value<'_>> {
    from_str_with_config(text, ParserConfig::default())
}

/// Parse a `print_r()` dump with custom configuration.
///
/// # Example
///
/// ```rust
/// use print_r_core::{from_str_with_config, ErrorKind, ParserConfig};
///
/// let config = ParserConfig {
///     max_depth: 1,
///     strict: false,
/// };
/// let err = from_str_with_config("Array\n(\n [a] => Array\n (\n )\n)", config).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::MaxDepthExceeded(1));
/// ```
#[inline]
pub fn from_str_with_config(text: &str, config: ParserConfig) -> Result<Value<'_>> {
    #[cfg(feature = "tracing")]
    trace!(text_len = text.len(), ?config, "from_str_with_config called");

    Parser::with_config(text, config)?.parse()
}

/// Parse a `print_r()` dump from raw bytes.
///
/// Bytes that are not valid UTF-8 are not text and fail with
/// [`ErrorKind::InvalidInput`].
#[inline]
pub fn from_bytes(data: &[u8]) -> Result<Value<'_>> {
    from_bytes_with_config(data, ParserConfig::default())
}

/// Parse a `print_r()` dump from raw bytes with custom configuration.
pub fn from_bytes_with_config(data: &[u8], config: ParserConfig) -> Result<Value<'_>> {
    let text = data.to_str().map_err(|e| {
        let valid = e.valid_up_to();
        let line = memchr_iter(b'\n', &data[..valid]).count() + 1;
        PrintRError::new(ErrorKind::InvalidInput, line)
            .with_context(format!("invalid UTF-8 after {} bytes", valid))
    })?;
    from_str_with_config(text, config)
}
