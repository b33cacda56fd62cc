//! Invisible markers embedded in rendered error text.
//!
//! Two kinds of spans live inside otherwise ordinary strings:
//!
//! - **Sensitive values** created with [`hide`]. They render as their
//!   cleartext surrounded by invisible delimiters, so `to_string()` keeps the
//!   full value while [`clean`] masks it and [`reveal`] drops the delimiters.
//! - **Identity markers** created with [`encode_id`]. A root error appends one
//!   to its `Display` output so the id survives being interpolated into a
//!   foreign error's message. [`extract_ids`] reads them back.
//!
//! # Examples
//!
//! ```
//! use errtrail::hidden;
//!
//! let text = format!("login failed for {}", hidden::hide("hunter2"));
//! assert_eq!(hidden::clean(&text), "login failed for ***");
//! assert_eq!(hidden::reveal(&text), "login failed for hunter2");
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

const ID_OPEN: char = '\u{2060}';
const ID_CLOSE: char = '\u{2061}';
const SECRET_OPEN: char = '\u{2062}';
const SECRET_CLOSE: char = '\u{2063}';

/// Base-4 digits, most significant first.
const ID_DIGITS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];
const ID_WIDTH: usize = 32;

/// Replacement text [`clean`] puts in place of a sensitive value.
pub const MASK: &str = "***";

/// A sensitive value that only reveals itself to viewers that ask for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hidden {
    cleartext: String,
}

impl Hidden {
    /// Marker characters in `value` are removed so a hidden span cannot be
    /// closed early from the inside.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cleartext = if value.chars().any(is_marker) {
            value.chars().filter(|c| !is_marker(*c)).collect()
        } else {
            value
        };
        Self { cleartext }
    }

    #[inline]
    pub fn cleartext(&self) -> &str {
        &self.cleartext
    }
}

impl fmt::Display for Hidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SECRET_OPEN}{}{SECRET_CLOSE}", self.cleartext)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Hidden {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Tags `value` as sensitive.
#[inline]
pub fn hide(value: impl fmt::Display) -> Hidden {
    Hidden::new(value.to_string())
}

/// Renders `id` as an invisible identity marker.
pub fn encode_id(id: u64) -> String {
    let mut out = String::with_capacity((ID_WIDTH + 2) * 3);
    out.push(ID_OPEN);
    for shift in (0..ID_WIDTH).rev() {
        out.push(ID_DIGITS[((id >> (shift * 2)) & 0b11) as usize]);
    }
    out.push(ID_CLOSE);
    out
}

/// Returns every well-formed identity marker in `text`, in order of appearance.
pub fn extract_ids(text: &str) -> Vec<u64> {
    let mut ids = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != ID_OPEN {
            continue;
        }
        let mut id = 0u64;
        let mut width = 0;
        let mut closed = false;
        for c in chars.by_ref() {
            match digit_value(c) {
                Some(d) if width < ID_WIDTH => {
                    id = (id << 2) | d;
                    width += 1;
                },
                _ => {
                    closed = c == ID_CLOSE;
                    break;
                },
            }
        }
        if closed && width == ID_WIDTH {
            ids.push(id);
        }
    }
    ids
}

/// Masks sensitive values and strips identity markers.
pub fn clean(text: &str) -> String {
    strip(text, true)
}

/// Shows sensitive values in cleartext and strips every marker.
pub fn reveal(text: &str) -> String {
    strip(text, false)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Id,
    Secret,
}

fn strip(text: &str, mask: bool) -> String {
    if !text.chars().any(is_marker) {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Text;
    for c in text.chars() {
        state = match (state, c) {
            (State::Id, ID_CLOSE) | (State::Secret, SECRET_CLOSE) => State::Text,
            (State::Id, c) if digit_value(c).is_some() => State::Id,
            // Unterminated marker: resume plain text at the offending char.
            (State::Id, c) => plain_char(&mut out, c, mask),
            (State::Secret, c) => {
                if !mask && !is_marker(c) {
                    out.push(c);
                }
                State::Secret
            },
            (State::Text, c) => plain_char(&mut out, c, mask),
        };
    }
    out
}

fn plain_char(out: &mut String, c: char, mask: bool) -> State {
    match c {
        ID_OPEN => State::Id,
        SECRET_OPEN => {
            if mask {
                out.push_str(MASK);
            }
            State::Secret
        },
        c if is_marker(c) => State::Text,
        c => {
            out.push(c);
            State::Text
        },
    }
}

#[inline]
fn digit_value(c: char) -> Option<u64> {
    ID_DIGITS.iter().position(|d| *d == c).map(|p| p as u64)
}

#[inline]
fn is_marker(c: char) -> bool {
    matches!(c, ID_OPEN | ID_CLOSE | SECRET_OPEN | SECRET_CLOSE)
}
