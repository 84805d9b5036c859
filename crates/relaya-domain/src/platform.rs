//! Platform and channel identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A social platform a client can connect via OAuth and publish to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Linkedin,
    Twitter,
    Pinterest,
}

/// Error returned when parsing an unknown platform or channel name.
#[derive(Debug, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl Platform {
    /// All connectable platforms, in display order.
    pub const ALL: [Platform; 5] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Pinterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Pinterest => "pinterest",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            "linkedin" => Ok(Self::Linkedin),
            "twitter" => Ok(Self::Twitter),
            "pinterest" => Ok(Self::Pinterest),
            other => Err(UnknownPlatform(other.to_owned())),
        }
    }
}

/// A bulk-messaging channel. Channels use app-level credentials from
/// configuration, not per-client OAuth connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Whatsapp,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(Self::Whatsapp),
            "email" => Ok(Self::Email),
            other => Err(UnknownPlatform(other.to_owned())),
        }
    }
}
