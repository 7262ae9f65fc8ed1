//! Light/dark theme selection, carried by a cookie and applied at the page root.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const THEME_COOKIE: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads the theme from a raw `Cookie` header value. Missing or unknown
    /// values give the default theme.
    pub fn from_cookie_header(header: &str) -> Theme {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == THEME_COOKIE)
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or_default()
    }

    /// `Set-Cookie` value that persists this theme.
    pub fn to_set_cookie(self) -> String {
        format!("{THEME_COOKIE}={self}; Path=/; Max-Age=31536000; SameSite=Lax")
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Invalid theme: {}", s)),
        }
    }
}
