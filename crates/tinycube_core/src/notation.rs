//! Face-turn notation for the fixed set of twists.
//!
//! A twist sequence is written as whitespace-separated tokens. Each token is
//! one of `R L U D F B M E S` followed by an optional suffix: `'` for the
//! inverse, `2` for a half turn, or `2'` for an inverted half turn. Half turns
//! expand to two quarter turns so that each one animates separately.

use itertools::Itertools;

use crate::{Twist, TwistFamily};

/// Error produced when parsing twist notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTwistError {
    /// The input contains no twists.
    #[error("no twists given")]
    Empty,
    /// A token does not start with a known face or slice letter.
    #[error("unknown face {face:?} in {token:?}")]
    UnknownFace {
        /// Token containing the error.
        token: String,
        /// Offending character.
        face: char,
    },
    /// A token has a suffix other than `'`, `2`, or `2'`.
    #[error("unknown suffix {suffix:?} in {token:?}")]
    UnknownSuffix {
        /// Token containing the error.
        token: String,
        /// Offending suffix.
        suffix: String,
    },
}

/// Parses a single token, such as `R'` or `M2`, into quarter twists.
pub fn parse_token(token: &str) -> Result<Vec<Twist>, ParseTwistError> {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return Err(ParseTwistError::Empty);
    };
    let family = TwistFamily::from_symbol(first).ok_or_else(|| ParseTwistError::UnknownFace {
        token: token.to_owned(),
        face: first,
    })?;
    let twist = family.twist();

    let suffix = chars.as_str();
    let (count, inverted) = match suffix {
        "" => (1, false),
        "'" => (1, true),
        "2" => (2, false),
        "2'" | "'2" => (2, true),
        _ => {
            return Err(ParseTwistError::UnknownSuffix {
                token: token.to_owned(),
                suffix: suffix.to_owned(),
            });
        }
    };
    let twist = if inverted { twist.rev() } else { twist };
    Ok(vec![twist; count])
}

/// Parses a whitespace-separated sequence of twists.
pub fn parse_twists(s: &str) -> Result<Vec<Twist>, ParseTwistError> {
    let mut ret = vec![];
    for token in s.split_whitespace() {
        ret.extend(parse_token(token)?);
    }
    if ret.is_empty() {
        return Err(ParseTwistError::Empty);
    }
    Ok(ret)
}

/// Formats a sequence of quarter twists, one token per twist.
pub fn format_twists(twists: &[Twist]) -> String {
    twists.iter().join(" ")
}
