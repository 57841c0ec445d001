//! Line grammar shared by every report reader.
//!
//! The analysis engine writes plain text reports with Russian labels and
//! the numbers embedded in prose. Each reader owns a table of [LabelRule]
//! entries: the first rule whose matcher accepts a line decides which
//! field the line feeds and how the value is pulled out of it. A line
//! that matches no rule is skipped. A line whose capture fails is dropped
//! as well, so decorations and explanatory prose around the numbers never
//! abort a parse.
//!
//! Rule order matters when one label is a substring of another. Tables
//! list the negative hypothesis marker before the positive one and the
//! longer label before the shorter one.

/// How a rule decides that a line is about its field.
///
/// Matching is case sensitive and operates on lines already trimmed of
/// surrounding whitespace.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// The line contains the needle anywhere.
    Contains(&'static str),
    /// The line starts with the prefix.
    StartsWith(&'static str),
    /// The line contains every needle of the list.
    ContainsAll(&'static [&'static str]),
}

impl Matcher {
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        return match self {
            Matcher::Contains(needle) => line.contains(needle),
            Matcher::StartsWith(prefix) => line.starts_with(prefix),
            Matcher::ContainsAll(needles) => needles.iter().all(|needle| line.contains(needle)),
        };
    }
}

/// How the value is extracted once a line has matched.
#[derive(Debug, Clone, Copy)]
pub enum Capture {
    /// First token after the last `=` sign, parsed as a float. Handles
    /// labels that contain `=` themselves, such as
    /// `Критическое значение t_{0.975, 22.00} = 2.0739`.
    FloatAfterLastEquals,
    /// First token after the first `:`, parsed as a float.
    FloatAfterColon,
    /// First token after the last `=`, parsed as an integer.
    IntAfterLastEquals,
    /// First token after the first `:`, parsed as an integer.
    IntAfterColon,
    /// Whitespace separated token at a fixed position, parsed as an
    /// integer. Used for the df column of the ANOVA variation table.
    IntToken(usize),
    /// `a = x, b = y`: one number out of each comma separated half.
    PairCommaEquals,
    /// The match itself is the value, no extraction.
    Flag(bool),
    /// Everything after the first `:`, trimmed.
    Text,
}

impl Capture {
    /// Pulls the value out of a matched line. `None` drops the line.
    #[must_use]
    pub fn apply(&self, line: &str) -> Option<RawValue> {
        return match self {
            Capture::FloatAfterLastEquals => {
                float_token(tail_after_last_equals(line)?).map(RawValue::Number)
            }
            Capture::FloatAfterColon => {
                float_token(tail_after_first_colon(line)?).map(RawValue::Number)
            }
            Capture::IntAfterLastEquals => {
                int_token(tail_after_last_equals(line)?).map(RawValue::Integer)
            }
            Capture::IntAfterColon => {
                int_token(tail_after_first_colon(line)?).map(RawValue::Integer)
            }
            Capture::IntToken(index) => int_token_at(line, *index).map(RawValue::Integer),
            Capture::PairCommaEquals => pair_comma_equals(line),
            Capture::Flag(value) => Some(RawValue::Flag(*value)),
            Capture::Text => text_after_first_colon(line),
        };
    }
}

/// A value pulled out of a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Integer(i64),
    Pair(f64, f64),
    Flag(bool),
    Text(String),
}

/// One row of a reader's rule table.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    /// Name of the record field this rule feeds.
    pub field: &'static str,
    pub matcher: Matcher,
    pub capture: Capture,
}

impl LabelRule {
    #[must_use]
    pub const fn new(field: &'static str, matcher: Matcher, capture: Capture) -> LabelRule {
        return LabelRule {
            field,
            matcher,
            capture,
        };
    }
}

/// Runs a line against a rule table.
///
/// The first matching rule wins and its capture is final: a failed
/// capture drops the line instead of trying the rules further down.
#[must_use]
pub fn scan_line(rules: &[LabelRule], line: &str) -> Option<(&'static str, RawValue)> {
    for rule in rules {
        if rule.matcher.matches(line) {
            return rule.capture.apply(line).map(|value| (rule.field, value));
        }
    }
    return None;
}

/// Parses the first whitespace separated token of `text` as a float.
#[must_use]
pub fn float_token(text: &str) -> Option<f64> {
    let token: &str = text.split_whitespace().next()?;
    return token.parse::<f64>().ok();
}

fn int_token(text: &str) -> Option<i64> {
    let token: &str = text.split_whitespace().next()?;
    return token.parse::<i64>().ok();
}

fn int_token_at(line: &str, index: usize) -> Option<i64> {
    let token: &str = line.split_whitespace().nth(index)?;
    return token.parse::<i64>().ok();
}

fn tail_after_last_equals(line: &str) -> Option<&str> {
    let (_, tail) = line.rsplit_once('=')?;
    return Some(tail);
}

fn tail_after_first_colon(line: &str) -> Option<&str> {
    let (_, tail) = line.split_once(':')?;
    return Some(tail);
}

fn pair_comma_equals(line: &str) -> Option<RawValue> {
    let (first_half, second_half) = line.split_once(',')?;
    let first: f64 = float_token(tail_after_last_equals(first_half)?)?;
    let second: f64 = float_token(tail_after_last_equals(second_half)?)?;
    return Some(RawValue::Pair(first, second));
}

fn text_after_first_colon(line: &str) -> Option<RawValue> {
    let tail: &str = tail_after_first_colon(line)?.trim();
    if tail.is_empty() {
        return None;
    }
    return Some(RawValue::Text(tail.to_string()));
}
