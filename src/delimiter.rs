//! Delimiter detection.
//!
//! The guess is driven by the header line: only candidates that occur in it
//! are considered. Each candidate is then scored by how many of the sampled
//! lines contain exactly as many occurrences as the header does, i.e. how
//! stable the column count it produces is. Ties go to the earlier entry of
//! [`SUPPORTED_DELIMITERS`]. Occurrences inside double quotes are not counted.

use tracing::debug;

/// Candidate delimiters, in order of preference.
pub const SUPPORTED_DELIMITERS: [char; 4] = [',', '\t', '|', ';'];

/// Fallback when no candidate occurs in the header line.
pub const DEFAULT_DELIMITER: char = ',';

const SAMPLE_LINES: usize = 10;

/// Guess the field delimiter of a block of delimited text.
///
/// ```
/// use delimport::guess_delimiter;
///
/// assert_eq!(guess_delimiter("a;b\n1;2"), ';');
/// assert_eq!(guess_delimiter("just one column"), ',');
/// assert_eq!(guess_delimiter("\na;b\n1;2"), ',');
/// ```
pub fn guess_delimiter(text: &str) -> char {
    // The first physical line is the header row even when it is empty.
    if text.starts_with(['\n', '\r']) {
        return DEFAULT_DELIMITER;
    }
    let lines = sample_counts(text);
    let Some(header) = lines.first() else {
        return DEFAULT_DELIMITER;
    };

    let mut best: Option<(usize, usize)> = None; // (candidate index, consistent lines)
    for (i, &in_header) in header.iter().enumerate() {
        if in_header == 0 {
            continue;
        }
        let consistent = lines.iter().filter(|counts| counts[i] == in_header).count();
        if best.is_none_or(|(_, score)| consistent > score) {
            best = Some((i, consistent));
        }
    }

    let delim = best.map_or(DEFAULT_DELIMITER, |(i, _)| SUPPORTED_DELIMITERS[i]);
    debug!(delimiter = ?delim, sampled = lines.len(), "guessed delimiter");
    delim
}

/// Per-line occurrence counts of each candidate for the first non-blank lines.
///
/// Callers must have ruled out an empty first line, so the first entry is
/// always the header's.
fn sample_counts(text: &str) -> Vec<[usize; SUPPORTED_DELIMITERS.len()]> {
    let mut lines = Vec::new();
    let mut counts = [0usize; SUPPORTED_DELIMITERS.len()];
    let mut line_len = 0usize;
    let mut in_quotes = false;

    for c in text.chars() {
        if lines.len() == SAMPLE_LINES {
            return lines;
        }
        if c == '"' {
            in_quotes = !in_quotes;
        } else if !in_quotes && (c == '\n' || c == '\r') {
            if line_len > 0 {
                lines.push(counts);
            }
            counts = [0; SUPPORTED_DELIMITERS.len()];
            line_len = 0;
            continue;
        } else if !in_quotes && let Some(i) = SUPPORTED_DELIMITERS.iter().position(|&d| d == c) {
            counts[i] += 1;
        }
        line_len += 1;
    }
    if line_len > 0 && lines.len() < SAMPLE_LINES {
        lines.push(counts);
    }
    lines
}
