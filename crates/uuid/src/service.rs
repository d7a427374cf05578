//! Internal implementation of report identifiers.

use crate::{ReportIdError, ReportIdResult};
use rand::Rng;
use std::{fmt, str::FromStr};

use ::uuid::Uuid;

/// A report identifier in canonical form (hyphenated, lowercase, version 4).
///
/// # Construction
/// - [`ReportId::generate`] draws a new identifier from a random source.
/// - [`ReportId::parse`] validates an externally supplied identifier.
///
/// # Display format
/// Always the 36-character hyphenated lowercase form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReportId(Uuid);

impl ReportId {
    /// Generates a new version 4 identifier from `rng`.
    ///
    /// The version and variant bits are set from the random bytes, so identifiers drawn from a
    /// seeded generator are reproducible and still valid RFC 4122 UUIDs.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.gen();
        Self(::uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Validates and parses an identifier that must already be in canonical form.
    ///
    /// Simple (unhyphenated), braced, URN and uppercase forms are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ReportIdError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> ReportIdResult<Self> {
        if !Self::is_canonical(input) {
            return Err(ReportIdError::InvalidInput(format!(
                "report id must be a lowercase hyphenated UUID, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| ReportIdError::InvalidInput(e.to_string()))
    }

    /// Returns a copy of the inner UUID.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is a lowercase hyphenated UUID.
    ///
    /// This is a purely syntactic check.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| match i {
                8 | 13 | 18 | 23 => b == b'-',
                _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
            })
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ReportId {
    type Err = ReportIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ReportId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ReportId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ReportId::parse(&s).map_err(serde::de::Error::custom)
    }
}
