//! Closed set of packet tags.

use super::{ParseDataTypeError, ParseProjectionKindError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag governing how a packet is projected and counted.
///
/// Deserialising any other value fails, so unknown tags never reach the
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Conversation messages captured from Manus.
    ManusConversation,
    /// Code interactions captured from the TRAE editor.
    TraeCodeInteraction,
    /// Data relayed from cloud/edge nodes.
    CloudEdgeData,
    /// Raw interaction logs.
    InteractionLog,
    /// Reinforcement-learning training samples.
    RlSrtData,
}

impl DataType {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ManusConversation,
        Self::TraeCodeInteraction,
        Self::CloudEdgeData,
        Self::InteractionLog,
        Self::RlSrtData,
    ];

    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManusConversation => "manus_conversation",
            Self::TraeCodeInteraction => "trae_code_interaction",
            Self::CloudEdgeData => "cloud_edge_data",
            Self::InteractionLog => "interaction_log",
            Self::RlSrtData => "rl_srt_data",
        }
    }

    /// Returns the projection store fed by this tag, if any.
    #[must_use]
    pub const fn projection_kind(self) -> Option<ProjectionKind> {
        match self {
            Self::ManusConversation => Some(ProjectionKind::Conversation),
            Self::TraeCodeInteraction => Some(ProjectionKind::CodeInteraction),
            Self::CloudEdgeData | Self::InteractionLog | Self::RlSrtData => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DataType {
    type Error = ParseDataTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| ParseDataTypeError(value.to_owned()))
    }
}

/// Tag-specific projection stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Conversation rows derived from `manus_conversation` packets.
    Conversation,
    /// Code interaction rows derived from `trae_code_interaction` packets.
    CodeInteraction,
}

impl ProjectionKind {
    /// Every projection store.
    pub const ALL: [Self; 2] = [Self::Conversation, Self::CodeInteraction];

    /// Returns the tag whose packets feed this projection.
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Conversation => DataType::ManusConversation,
            Self::CodeInteraction => DataType::TraeCodeInteraction,
        }
    }
}

impl TryFrom<DataType> for ProjectionKind {
    type Error = ParseProjectionKindError;

    fn try_from(value: DataType) -> Result<Self, Self::Error> {
        value
            .projection_kind()
            .ok_or_else(|| ParseProjectionKindError(value.as_str().to_owned()))
    }
}
