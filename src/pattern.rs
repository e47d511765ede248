//! Value-shape classification: the five pattern kinds, their classifier
//! predicates, and the single-sample column detector.

use std::fmt;
use std::sync::LazyLock;

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::value::is_null;

static LATIN_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z _\-.]+$").expect("latin words regex"));
static RTL_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\u{0600}-\u{06FF} _\-.]+$").expect("rtl words regex"));
static LETTER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{3,}").expect("letter run regex"));

const DATE_SEPARATORS: [char; 4] = ['-', '/', ':', '.'];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Expected value shape of a column, inferred once from its first populated
/// cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Number,
    Date,
    RtlWords,
    LatinWords,
    Other,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Number => "number",
            Pattern::Date => "date",
            Pattern::RtlWords => "rtl_words",
            Pattern::LatinWords => "latin_words",
            Pattern::Other => "other",
        }
    }

    /// Whether a non-null value conforms to this pattern. `Other` accepts
    /// anything.
    pub fn matches(&self, value: &Data) -> bool {
        match self {
            Pattern::Number => is_number(value),
            Pattern::Date => is_date(value),
            Pattern::RtlWords => is_rtl_words(value),
            Pattern::LatinWords => is_latin_words(value),
            Pattern::Other => !is_null(value),
        }
    }

    /// Infers the column pattern from the first non-empty value, testing the
    /// classifiers in strict priority order: number, then date, then
    /// rtl_words, then latin_words. A first value matching none of them
    /// settles the column as `Other` immediately; later values are never
    /// consulted.
    ///
    /// Single-sample inference means an outlier first cell (a stray number in
    /// a mostly-text column) locks in the pattern for the whole column. That
    /// is an accepted trade-off, not a bug to correct with a majority vote.
    pub fn detect<'a, I>(values: I) -> Pattern
    where
        I: IntoIterator<Item = &'a Data>,
    {
        for value in values {
            if is_null(value) {
                continue;
            }
            if is_number(value) {
                return Pattern::Number;
            }
            if is_date(value) {
                return Pattern::Date;
            }
            if is_rtl_words(value) {
                return Pattern::RtlWords;
            }
            if is_latin_words(value) {
                return Pattern::LatinWords;
            }
            return Pattern::Other;
        }
        Pattern::Other
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True for typed numeric cells with a finite value, or text that parses as a
/// float. Booleans are never numbers.
pub fn is_number(value: &Data) -> bool {
    match value {
        Data::Int(_) => true,
        Data::Float(f) => f.is_finite(),
        Data::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
        }
        _ => false,
    }
}

/// True for typed date/time cells. Text is rejected outright unless it
/// contains a digit and either a date separator or a run of three or more
/// letters; surviving candidates must then parse strictly against the fixed
/// format lists. The pre-filter keeps arbitrary short tokens away from the
/// parser.
pub fn is_date(value: &Data) -> bool {
    match value {
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => true,
        Data::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && text_parses_as_date(trimmed)
        }
        _ => false,
    }
}

fn text_parses_as_date(text: &str) -> bool {
    let has_digit = text.chars().any(|c| c.is_numeric());
    let looks_like_date =
        text.contains(DATE_SEPARATORS) || LETTER_RUN.is_match(text);
    if !has_digit || !looks_like_date {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(text, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || TIME_FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(text, fmt).is_ok())
}

/// True for string cells whose trimmed form consists solely of ASCII letters,
/// spaces, underscores, hyphens, and periods.
pub fn is_latin_words(value: &Data) -> bool {
    matches!(value, Data::String(s) if !s.trim().is_empty() && LATIN_WORDS.is_match(s.trim()))
}

/// Same as [`is_latin_words`] but the permitted letter range is the Arabic
/// Unicode block (U+0600..=U+06FF).
pub fn is_rtl_words(value: &Data) -> bool {
    matches!(value, Data::String(s) if !s.trim().is_empty() && RTL_WORDS.is_match(s.trim()))
}
