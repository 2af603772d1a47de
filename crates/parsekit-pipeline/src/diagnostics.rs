//! Code frames for parse failures.
//!
//! A code frame is a short excerpt of the source around the failure: a
//! fixed-width line-number gutter, a `>` marker on offending lines, and `^`
//! markers under the offending columns.
//!
//! ```text
//!   1 | let config = {
//! > 2 |   foo: bar baz
//!     |            ^
//!   3 | };
//! ```

use std::collections::BTreeMap;
use std::iter;

use parsekit_core::config::code_frame::CodeFrameConfig;
use parsekit_core::{AppError, Position, SourceLocation};

/// Renders the code frame for `location` in `text`.
///
/// Lines and columns are 1-based. Positions past the end of the text are
/// clamped to the last line.
pub fn render_code_frame(text: &str, location: &SourceLocation, config: &CodeFrameConfig) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let start = clamp(location.start, lines.len());
    let end = location
        .end
        .map(|end| clamp(end, lines.len()))
        .filter(|end| end.line >= start.line)
        .map(|end| exclusive_end(&lines, start, end));

    let markers = marker_lines(&lines, start, end);
    let last_marked = end.map_or(start.line, |end| end.line);

    let first = start.line.saturating_sub(config.lines_above).max(1);
    let last = (last_marked + config.lines_below).min(lines.len());
    let width = last.to_string().len();

    let mut frame = Vec::with_capacity(last - first + 2);
    for number in first..=last {
        let line = lines[number - 1];
        let content = if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        };

        match markers.get(&number) {
            Some(&(column, count)) => {
                frame.push(format!("> {number:>width$} |{content}"));

                // Tabs are kept so the carets line up under tab-indented code.
                let spacing: String = line
                    .chars()
                    .chain(iter::repeat(' '))
                    .take(column.saturating_sub(1))
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                frame.push(format!("  {:width$} | {spacing}{}", "", "^".repeat(count)));
            }
            None => frame.push(format!("  {number:>width$} |{content}")),
        }
    }

    frame.join("\n")
}

/// Renders a code frame for errors that carry a location and attaches it.
///
/// The frame is appended to the message and kept in `code_frame`. Errors
/// without a location are returned untouched, as are errors that already
/// carry a frame from an embedded parse.
pub fn attach_code_frame(mut error: AppError, text: &str, config: &CodeFrameConfig) -> AppError {
    if error.code_frame.is_some() {
        return error;
    }
    if let Some(location) = error.location {
        let frame = render_code_frame(text, &location, config);
        error.attach_code_frame(frame);
    }
    error
}

fn clamp(position: Position, line_count: usize) -> Position {
    Position::new(position.line.clamp(1, line_count), position.column.max(1))
}

/// An end at column 1 covers nothing on its own line, so the range ends
/// after the last character of the line before.
fn exclusive_end(lines: &[&str], start: Position, end: Position) -> Position {
    if end.line > start.line && end.column == 1 {
        let line = end.line - 1;
        Position::new(line, lines[line - 1].chars().count() + 1)
    } else {
        end
    }
}

/// Maps each offending line to `(column, caret count)`.
fn marker_lines(
    lines: &[&str],
    start: Position,
    end: Option<Position>,
) -> BTreeMap<usize, (usize, usize)> {
    let mut markers = BTreeMap::new();

    match end {
        None => {
            markers.insert(start.line, (start.column, 1));
        }
        Some(end) if end.line == start.line => {
            let count = end.column.saturating_sub(start.column).max(1);
            markers.insert(start.line, (start.column, count));
        }
        Some(end) => {
            for number in start.line..=end.line {
                let length = lines[number - 1].chars().count();
                let marker = if number == start.line {
                    (start.column, (length + 1).saturating_sub(start.column).max(1))
                } else if number == end.line {
                    (1, end.column.saturating_sub(1).max(1))
                } else {
                    (1, length.max(1))
                };
                markers.insert(number, marker);
            }
        }
    }

    markers
}
