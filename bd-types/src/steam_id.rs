//! Steam identity type.
//!
//! A Steam ID packs four fields into 64 bits:
//! - bits 0..32: account id
//! - bits 32..52: instance
//! - bits 52..56: account type
//! - bits 56..64: universe
//!
//! Only individual accounts in the public universe are considered valid,
//! which is the only kind a game server can report for a connected player.

use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Steam64 value of account id 0 in the public universe, individual type,
/// desktop instance.
pub const STEAM64_BASE: u64 = 76_561_197_960_265_728;

const UNIVERSE_PUBLIC: u64 = 1;
const ACCOUNT_TYPE_INDIVIDUAL: u64 = 1;
const INSTANCE_DESKTOP: u64 = 1;

/// A 64-bit Steam identity.
///
/// Values built with [`SteamId::from_u64`], [`SteamId::parse_unchecked`] or
/// [`SteamId::deserialize_unchecked`] are not checked; use
/// [`SteamId::is_valid`] before trusting them. Values produced by
/// [`SteamId::parse`] or by the `Deserialize` impl are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SteamId(u64);

impl SteamId {
    /// Wraps a raw 64-bit value without validation.
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Builds the individual, public-universe identity for an account id.
    #[must_use]
    pub const fn from_account_id(account_id: u32) -> Self {
        Self(STEAM64_BASE + account_id as u64)
    }

    /// Interprets a bare number: values that fit in 32 bits are account ids
    /// (Steam32), anything larger is a full Steam64 value.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        match u32::try_from(n) {
            Ok(account_id) => Self::from_account_id(account_id),
            Err(_) => Self(n),
        }
    }

    /// Parses a Steam ID from any of its text forms and validates it.
    ///
    /// Accepted forms: Steam64 (`76561197960287930`), Steam32 (`22202`),
    /// Steam3 (`[U:1:22202]`, brackets optional) and Steam2
    /// (`STEAM_0:0:11101`).
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_unchecked(s)
            .ok()
            .filter(Self::is_valid)
            .ok_or_else(|| Error::InvalidSteamId(s.to_string()))
    }

    /// Parses any of the text forms accepted by [`SteamId::parse`] without
    /// validating the result. Fails only when `s` is not a Steam ID form.
    pub fn parse_unchecked(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = if let Some(rest) = trimmed.strip_prefix("STEAM_") {
            parse_steam2(rest)
        } else if trimmed.starts_with('[') || trimmed.starts_with("U:") {
            parse_steam3(trimmed)
        } else {
            trimmed.parse::<u64>().ok().map(Self::from_number)
        };

        parsed.ok_or_else(|| Error::InvalidSteamId(s.to_string()))
    }

    /// Serde `deserialize_with` helper that accepts the same shapes as the
    /// `Deserialize` impl but leaves validation to the caller.
    pub fn deserialize_unchecked<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        match RawSteamId::deserialize(deserializer)? {
            RawSteamId::Number(n) => Ok(Self::from_number(n)),
            RawSteamId::Text(s) => Self::parse_unchecked(&s).map_err(D::Error::custom),
        }
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn steam64(&self) -> u64 {
        self.0
    }

    /// Returns the 32-bit account id.
    #[must_use]
    pub const fn account_id(&self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    #[must_use]
    pub const fn instance(&self) -> u32 {
        ((self.0 >> 32) & 0xF_FFFF) as u32
    }

    #[must_use]
    pub const fn account_type(&self) -> u8 {
        ((self.0 >> 52) & 0xF) as u8
    }

    #[must_use]
    pub const fn universe(&self) -> u8 {
        (self.0 >> 56) as u8
    }

    /// Returns true for a non-zero individual account in the public universe.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.universe() as u64 == UNIVERSE_PUBLIC
            && self.account_type() as u64 == ACCOUNT_TYPE_INDIVIDUAL
            && self.instance() as u64 == INSTANCE_DESKTOP
            && self.account_id() != 0
    }

    /// Formats as Steam3, e.g. `[U:1:22202]`.
    #[must_use]
    pub fn steam3(&self) -> String {
        format!("[U:{}:{}]", self.universe(), self.account_id())
    }

    /// Formats as Steam2, e.g. `STEAM_0:0:11101`.
    #[must_use]
    pub fn steam2(&self) -> String {
        let account_id = self.account_id();
        format!("STEAM_0:{}:{}", account_id & 1, account_id >> 1)
    }
}

fn parse_steam3(s: &str) -> Option<SteamId> {
    let inner = match (s.strip_prefix('['), s.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => s,
        _ => return None,
    };

    let mut parts = inner.split(':');
    let (Some("U"), Some(universe), Some(account_id), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let universe: u8 = universe.parse().ok()?;
    let account_id: u32 = account_id.parse().ok()?;
    Some(SteamId(
        (u64::from(universe) << 56)
            | (ACCOUNT_TYPE_INDIVIDUAL << 52)
            | (INSTANCE_DESKTOP << 32)
            | u64::from(account_id),
    ))
}

fn parse_steam2(s: &str) -> Option<SteamId> {
    let mut parts = s.split(':');
    let (Some(universe), Some(low_bit), Some(high), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    // STEAM_0 is how older engines print the public universe.
    let universe: u8 = match universe.parse().ok()? {
        0 => 1,
        n => n,
    };
    let low_bit: u32 = match low_bit {
        "0" => 0,
        "1" => 1,
        _ => return None,
    };
    let high: u32 = high.parse().ok()?;
    let account_id = high.checked_mul(2)?.checked_add(low_bit)?;

    Some(SteamId(
        (u64::from(universe) << 56)
            | (ACCOUNT_TYPE_INDIVIDUAL << 52)
            | (INSTANCE_DESKTOP << 32)
            | u64::from(account_id),
    ))
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for SteamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What list files actually contain: some writers emit the id as a JSON
/// number, others as a string in any of the text forms.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSteamId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for SteamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawSteamId::deserialize(deserializer)? {
            RawSteamId::Number(n) => Some(Self::from_number(n))
                .filter(Self::is_valid)
                .ok_or_else(|| D::Error::custom(Error::InvalidSteamId(n.to_string()))),
            RawSteamId::Text(s) => Self::parse(&s).map_err(D::Error::custom),
        }
    }
}
