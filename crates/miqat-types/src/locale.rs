use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MiqatError;

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Display language. Arabic uses Arabic-Indic digits, Latin uses ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    Latin,
}

impl Locale {
    /// Language code as stored in settings.
    pub const fn code(&self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::Latin => "en",
        }
    }

    pub const fn is_arabic(&self) -> bool {
        matches!(self, Locale::Arabic)
    }

    /// Maps every ASCII digit in `text` to this locale's digit set.
    pub fn localize_digits(&self, text: &str) -> String {
        match self {
            Locale::Latin => text.to_string(),
            Locale::Arabic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) if c.is_ascii_digit() => ARABIC_INDIC_DIGITS[d as usize],
                    _ => c,
                })
                .collect(),
        }
    }
}

/// Maps Arabic-Indic digits back to ASCII, leaving everything else alone.
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match ARABIC_INDIC_DIGITS.iter().position(|&d| d == c) {
            Some(i) => char::from(b'0' + i as u8),
            None => c,
        })
        .collect()
}

impl FromStr for Locale {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Arabic),
            "en" | "latin" | "english" => Ok(Locale::Latin),
            other => Err(MiqatError::invalid_config(format!("Unknown locale '{other}'"))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
