use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::{FareError, FareResult};

/// Three-letter IATA airport identifier (e.g. `JFK`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

fn bracketed_code() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^()]*)\)").expect("static pattern compiles"))
}

impl AirportCode {
    pub fn parse(code: &str) -> FareResult<Self> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code.to_string()))
        } else {
            Err(FareError::MalformedInput(format!("'{}' is not an IATA airport code", code)))
        }
    }

    /// Pulls the code out of a `"Full Name (CODE)"` display string.
    ///
    /// When several bracketed groups are present the last one wins, since
    /// airport names themselves sometimes carry parentheses.
    pub fn from_display(display: &str) -> FareResult<Self> {
        let captured = bracketed_code()
            .captures_iter(display)
            .last()
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| {
                FareError::MalformedInput(format!("no bracketed airport code in '{}'", display))
            })?;

        Self::parse(captured.as_str())
    }

    /// Reads the three characters sitting just before the closing bracket of a
    /// constant-width `"... (XXX)"` suffix.
    pub fn from_fixed_suffix(display: &str) -> FareResult<Self> {
        let chars: Vec<char> = display.chars().collect();
        if chars.len() < 4 {
            return Err(FareError::MalformedInput(format!(
                "'{}' is too short to carry an airport code suffix",
                display
            )));
        }

        let code: String = chars[chars.len() - 4..chars.len() - 1].iter().collect();
        Self::parse(&code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AirportCode {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = FareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}
