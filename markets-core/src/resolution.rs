//! Market resolution outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final determined outcome of a closed binary market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resolution {
    Yes,
    No,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Yes => write!(f, "YES"),
            Resolution::No => write!(f, "NO"),
        }
    }
}
