//! Turns and the raw rows they are stored as.

use crate::{Role, format_actions, parse_actions};
use parley_error::ScriptError;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of a conversation script.
///
/// `position` is 1-based and dense within a script. It is reassigned whenever the
/// script is saved or edited, so it is not a stable identifier.
///
/// # Examples
///
/// ```
/// use parley_core::{Role, Turn};
///
/// let turn = Turn::new(Role::AiAgent, "Let me check your stock levels.")
///     .with_actions(vec!["[Fetches inventory]".to_string()]);
///
/// assert_eq!(*turn.role(), Role::AiAgent);
/// assert_eq!(turn.actions().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(setter(into))]
pub struct Turn {
    /// 1-based position in the script (0 until numbered)
    #[setters(skip)]
    #[builder(default)]
    position: usize,
    /// Who speaks this turn
    role: Role,
    /// Message body, may span several lines
    text: String,
    /// Decoded system actions, in order
    #[builder(default)]
    actions: Vec<String>,
}

impl Turn {
    /// Creates an unnumbered turn with no actions.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            position: 0,
            role,
            text: text.into(),
            actions: Vec::new(),
        }
    }

    /// Creates a turn builder.
    pub fn builder() -> TurnBuilder {
        TurnBuilder::default()
    }

    /// Replaces the message body.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Changes the speaker.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Replaces the action list.
    pub fn set_actions(&mut self, actions: Vec<String>) {
        self.actions = actions;
    }

    /// Decodes a raw row, validating the speaker and splitting the action field.
    ///
    /// The row's own `turn` number is carried over; scripts renumber after loading.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRole` if the speaker is not one of the two known roles.
    pub fn from_record(record: &TurnRecord) -> Result<Self, ScriptError> {
        let role: Role = record.speaker.parse()?;
        Ok(Self {
            position: record.turn as usize,
            role,
            text: record.message.clone(),
            actions: parse_actions(&record.system_actions),
        })
    }

    /// Encodes this turn back into a raw row.
    pub fn to_record(&self) -> TurnRecord {
        TurnRecord {
            turn: u32::try_from(self.position).unwrap_or(u32::MAX),
            speaker: self.role.as_str().to_string(),
            message: self.text.clone(),
            system_actions: format_actions(&self.actions),
        }
    }
}

/// Assigns positions 1..N in slice order.
pub fn renumber(turns: &mut [Turn]) {
    for (index, turn) in turns.iter_mut().enumerate() {
        turn.position = index + 1;
    }
}

/// A turn as it is persisted and exchanged with clients.
///
/// `system_actions` holds the encoded action field (see [`format_actions`]).
/// `message` holds real line breaks; flat-file backends escape them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Position as submitted or stored; blank, negative, fractional or non-numeric values read as 0
    #[serde(default, deserialize_with = "lenient_position")]
    pub turn: u32,
    /// Speaker wire name
    #[serde(default)]
    pub speaker: String,
    /// Message body
    #[serde(default)]
    pub message: String,
    /// Encoded action field
    #[serde(default)]
    pub system_actions: String,
}

impl TurnRecord {
    /// Creates a raw row.
    pub fn new(
        turn: u32,
        speaker: impl Into<String>,
        message: impl Into<String>,
        system_actions: impl Into<String>,
    ) -> Self {
        Self {
            turn,
            speaker: speaker.into(),
            message: message.into(),
            system_actions: system_actions.into(),
        }
    }

    /// Rows without a speaker or a message carry no playable content.
    pub fn is_blank(&self) -> bool {
        self.speaker.trim().is_empty() || self.message.is_empty()
    }
}

// Positions are renumbered on every save, so any submitted value is accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawPosition {
    fn position(self) -> u32 {
        match self {
            Self::Unsigned(n) => u32::try_from(n).unwrap_or(u32::MAX),
            Self::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => f as u32,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
            Self::Signed(_) | Self::Float(_) | Self::Other(_) => 0,
        }
    }
}

fn lenient_position<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawPosition>::deserialize(deserializer)?
        .map(RawPosition::position)
        .unwrap_or(0))
}
