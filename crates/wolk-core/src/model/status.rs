//! Platform connectivity status.

use serde::{Deserialize, Serialize};

/// Connection state of the gateway towards the platform, as relayed to
/// local devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityStatus {
    /// Not yet determined. Has no wire token.
    #[default]
    None,
    Connected,
    Offline,
}

impl ConnectivityStatus {
    /// Wire token. Empty for [`ConnectivityStatus::None`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Connected => "CONNECTED",
            Self::Offline => "OFFLINE",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "CONNECTED" => Some(Self::Connected),
            "OFFLINE" => Some(Self::Offline),
            _ => None,
        }
    }
}
