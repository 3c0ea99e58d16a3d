//! Role types for conversation participants.

use parley_error::{ScriptError, ScriptErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two sides of a scripted conversation.
///
/// # Examples
///
/// ```
/// use parley_core::Role;
///
/// let agent: Role = "AI Agent".parse().unwrap();
/// assert_eq!(agent, Role::AiAgent);
/// assert_eq!(agent.counterpart(), Role::Merchant);
///
/// // Display uses the wire name
/// assert_eq!(format!("{}", Role::AiAgent), "AI Agent");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// The automated side whose turns drive playback
    #[serde(rename = "AI Agent")]
    #[display("AI Agent")]
    AiAgent,
    /// The human side whose turns are offered as suggested replies
    #[serde(rename = "Merchant")]
    #[display("Merchant")]
    Merchant,
}

impl Role {
    /// Wire name used in persisted rows and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::AiAgent => "AI Agent",
            Role::Merchant => "Merchant",
        }
    }

    /// The other role.
    pub fn counterpart(&self) -> Role {
        match self {
            Role::AiAgent => Role::Merchant,
            Role::Merchant => Role::AiAgent,
        }
    }
}

impl FromStr for Role {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AI Agent" => Ok(Role::AiAgent),
            "Merchant" => Ok(Role::Merchant),
            other => Err(ScriptError::new(ScriptErrorKind::InvalidRole(
                other.to_string(),
            ))),
        }
    }
}
