// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Instance and optimum loaders for the line-oriented benchmark format.
//!
//! An instance file starts with a header line `item_count capacity`,
//! followed by one `profit weight` line per item:
//!
//! ```raw
//! 3 50        # three items, capacity 50
//! 60 10
//! 100 20
//! 120 30
//! ```
//!
//! The loader is deliberately forgiving about the item lines. A line that
//! does not hold exactly two finite numbers, or that carries a negative
//! weight, is skipped with a warning and processing continues. A mismatch
//! between the declared and the parsed item count is likewise reported but
//! not fatal. Both situations are returned as `LoadDiagnostic`s next to the
//! instance. Only the header is mandatory: without a capacity nothing can
//! be solved. Exactly `item_count` item lines are consumed, so trailing
//! content (some benchmark sets append a reference solution) is ignored.
//!
//! Comments introduced by `#` and blank lines are ignored everywhere.
//!
//! Known optima live in companion files holding a single number and are
//! read with `read_optimum`.

use crate::{
    model::{Instance, InstanceBuilder},
    num::KnapsackNumeric,
};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input contained no header line.
    EmptyInput,
    /// The header line is not `item_count capacity`.
    MalformedHeader(MalformedLine),
}

/// A line that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// The 1-based line number in the source.
    pub line_number: usize,
    /// The offending line, without its trailing comment.
    pub content: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl std::fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: {} ('{}')",
            self.line_number, self.reason, self.content
        )
    }
}

impl std::error::Error for MalformedLine {}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::EmptyInput => write!(f, "Input contains no header line"),
            Self::MalformedHeader(line) => write!(f, "Malformed header: {}", line),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MalformedHeader(line) => Some(line),
            Self::EmptyInput => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A recoverable problem found while loading an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// An item line was skipped.
    SkippedLine(MalformedLine),
    /// The number of parsed items differs from the declared count.
    ItemCountMismatch { declared: usize, parsed: usize },
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkippedLine(line) => write!(f, "Skipped {}", line),
            Self::ItemCountMismatch { declared, parsed } => write!(
                f,
                "Declared {} items but parsed {}",
                declared, parsed
            ),
        }
    }
}

/// An instance together with everything the loader had to say about it.
#[derive(Debug, Clone)]
pub struct LoadedInstance<T> {
    /// The instance built from all successfully parsed items.
    pub instance: Instance<T>,
    /// The item count announced by the header.
    pub declared_items: usize,
    /// Recoverable problems, in the order they were found.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl<T> LoadedInstance<T> {
    /// Returns `true` if the input was read without any diagnostics.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A loader for knapsack instances in the `item_count capacity` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader<T> {
    _marker: std::marker::PhantomData<T>,
}

impl<T> InstanceLoader<T>
where
    T: KnapsackNumeric,
{
    /// Creates a new `InstanceLoader`.
    #[inline]
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<LoadedInstance<T>, InstanceLoaderError> {
        let mut lines = ContentLines::new(rdr);

        let (line_number, header) = lines.next_content()?.ok_or(InstanceLoaderError::EmptyInput)?;
        let (declared_items, capacity) = parse_header::<T>(&header).map_err(|reason| {
            InstanceLoaderError::MalformedHeader(MalformedLine {
                line_number,
                content: header.clone(),
                reason,
            })
        })?;

        log::debug!(
            "Read header: expected {} items, capacity {}",
            declared_items,
            capacity
        );

        // The declared count is untrusted; only a bounded reservation is made up front.
        let mut builder = InstanceBuilder::with_capacity(capacity, declared_items.min(MAX_RESERVED_ITEMS));
        let mut diagnostics = Vec::new();

        for _ in 0..declared_items {
            let Some((line_number, content)) = lines.next_content()? else {
                log::warn!(
                    "Input ended prematurely: expected {} items, found {}",
                    declared_items,
                    builder.num_items()
                );
                break;
            };

            match parse_item::<T>(&content) {
                Ok((profit, weight)) => {
                    builder.add_item(profit, weight);
                }
                Err(reason) => {
                    let malformed = MalformedLine {
                        line_number,
                        content,
                        reason,
                    };
                    log::warn!("Skipping item {}", malformed);
                    diagnostics.push(LoadDiagnostic::SkippedLine(malformed));
                }
            }
        }

        let parsed = builder.num_items();
        if parsed != declared_items {
            log::warn!(
                "Loaded {} items but the header declares {}; some item lines were malformed or missing",
                parsed,
                declared_items
            );
            diagnostics.push(LoadDiagnostic::ItemCountMismatch {
                declared: declared_items,
                parsed,
            });
        }

        Ok(LoadedInstance {
            instance: builder.build(),
            declared_items,
            diagnostics,
        })
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<LoadedInstance<T>, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<LoadedInstance<T>, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<LoadedInstance<T>, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// The error type for reading a known optimum.
#[derive(Debug)]
pub enum OptimumError {
    /// An I/O error occurred while reading the optimum file.
    Io(std::io::Error),
    /// The file content is not a single number.
    Parse(String),
}

impl Display for OptimumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(content) => write!(f, "Could not parse optimum from '{}'", content),
        }
    }
}

impl std::error::Error for OptimumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for OptimumError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a known optimum from its textual form.
pub fn parse_optimum<T>(content: &str) -> Result<T, OptimumError>
where
    T: KnapsackNumeric,
{
    let trimmed = strip_comment(content).trim();
    match trimmed.parse::<T>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(OptimumError::Parse(trimmed.to_owned())),
    }
}

/// Reads a known optimum from a file holding a single number.
pub fn read_optimum<T, P>(path: P) -> Result<T, OptimumError>
where
    T: KnapsackNumeric,
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(path)?;
    parse_optimum(&content)
}

/// Iterates the non-empty, comment-stripped lines of a reader together
/// with their 1-based line numbers.
struct ContentLines<R> {
    rdr: R,
    buf: String,
    line_number: usize,
}

impl<R: BufRead> ContentLines<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line_number: 0,
        }
    }

    fn next_content(&mut self) -> Result<Option<(usize, String)>, InstanceLoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let content = strip_comment(&self.buf).trim();
            if !content.is_empty() {
                return Ok(Some((self.line_number, content.to_owned())));
            }
        }
    }
}

#[inline]
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Splits a line into exactly two whitespace-separated tokens.
#[inline]
fn two_tokens(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    let second = tokens.next()?;
    match tokens.next() {
        Some(_) => None,
        None => Some((first, second)),
    }
}

/// Upper bound on the item slots reserved from the header count.
const MAX_RESERVED_ITEMS: usize = 4096;

fn parse_header<T>(line: &str) -> Result<(usize, T), &'static str>
where
    T: KnapsackNumeric,
{
    let (count, capacity) = two_tokens(line).ok_or("expected 'item_count capacity'")?;

    // Some generators write the count as a float ("100.0").
    let count = match count.parse::<usize>() {
        Ok(n) => n,
        Err(_) => count
            .parse::<T>()
            .ok()
            .filter(|v| v.is_finite() && *v >= T::zero() && v.fract() == T::zero())
            .and_then(|v| v.to_usize())
            .ok_or("item count is not a non-negative integer")?,
    };

    let capacity = capacity
        .parse::<T>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or("capacity is not a number")?;
    if capacity < T::zero() {
        return Err("capacity is negative");
    }

    Ok((count, capacity))
}

fn parse_item<T>(line: &str) -> Result<(T, T), &'static str>
where
    T: KnapsackNumeric,
{
    let (profit, weight) = two_tokens(line).ok_or("expected 'profit weight'")?;

    let profit = profit
        .parse::<T>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or("profit is not a number")?;
    let weight = weight
        .parse::<T>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or("weight is not a number")?;
    if weight < T::zero() {
        return Err("weight is negative");
    }

    Ok((profit, weight))
}
