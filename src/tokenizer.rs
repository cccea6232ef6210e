//! Quote-aware splitting of delimited text into rows of raw cells.
//!
//! The tokenizer is a small state machine over the character stream:
//!
//! - `FieldStart` — nothing consumed for the current field yet; a `"` opens a
//!   quoted field.
//! - `Unquoted` — literal characters until a delimiter or line break.
//! - `Quoted` — everything is literal, including delimiters and line breaks,
//!   until a `"`.
//! - `QuotePending` — just saw `"` inside a quoted field; another `"` is an
//!   escaped quote, anything else closes the quotes.
//!
//! Rows end at `\n`, `\r\n` or `\r`, in any mix. Cell text is kept exactly as
//! written (minus the enclosing quotes); whitespace trimming is left to numeric
//! parsing so string cells keep their spacing.

/// Rows of raw string cells. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// The header row, if the input had any rows at all.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuotePending,
}

struct Tokenizer {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    state: State,
    row_open: bool,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            state: State::FieldStart,
            row_open: false,
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_row(&mut self) {
        self.end_field();
        self.rows.push(std::mem::take(&mut self.row));
        self.row_open = false;
    }
}

/// Split `text` into rows of raw cells using `delimiter`.
///
/// `delimiter` must not be `"` or a line-break character.
/// An unterminated quoted field runs to the end of the input.
///
/// ```
/// use delimport::tokenize;
///
/// let table = tokenize("a,b\n1,\"foo, bar\"\n", ',');
/// assert_eq!(table.rows(), &[vec!["a", "b"], vec!["1", "foo, bar"]]);
/// ```
pub fn tokenize(text: &str, delimiter: char) -> RawTable {
    let mut t = Tokenizer::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        t.row_open = true;
        match (t.state, c) {
            (State::Quoted, '"') => t.state = State::QuotePending,
            (State::Quoted, _) => t.field.push(c),
            (State::QuotePending, '"') => {
                t.field.push('"');
                t.state = State::Quoted;
            }
            (State::FieldStart, '"') => t.state = State::Quoted,
            (_, c) if c == delimiter => t.end_field(),
            (_, '\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                t.end_row();
            }
            (_, '\n') => t.end_row(),
            (_, _) => {
                t.field.push(c);
                t.state = State::Unquoted;
            }
        }
    }
    if t.row_open {
        t.end_row();
    }
    RawTable::new(t.rows)
}
