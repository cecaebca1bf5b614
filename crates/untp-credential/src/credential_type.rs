//! Credential type tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Credential family inferred from a schema reference
///
/// A classification result only: it is never stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CredentialType {
    /// Digital Facility Record
    Dfr,
    /// Digital Traceability Event
    Dte,
    /// Digital Product Passport
    Dpp,
    /// Digital Conformity Credential
    Dcc,
    /// Digital Identity Anchor
    Dia,
}

impl CredentialType {
    /// Every known tag
    pub const ALL: [Self; 5] = [Self::Dfr, Self::Dte, Self::Dpp, Self::Dcc, Self::Dia];

    /// Short upper-case tag (`"DFR"`, ...)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dfr => "DFR",
            Self::Dte => "DTE",
            Self::Dpp => "DPP",
            Self::Dcc => "DCC",
            Self::Dia => "DIA",
        }
    }

    /// Human-readable family name
    #[must_use]
    pub fn family(self) -> &'static str {
        match self {
            Self::Dfr => "Digital Facility Record",
            Self::Dte => "Digital Traceability Event",
            Self::Dpp => "Digital Product Passport",
            Self::Dcc => "Digital Conformity Credential",
            Self::Dia => "Digital Identity Anchor",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised credential tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown credential type: {0}")]
pub struct ParseCredentialTypeError(pub String);

impl FromStr for CredentialType {
    type Err = ParseCredentialTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCredentialTypeError(s.to_owned()))
    }
}
