//! UI-agnostic conversation message types
//!
//! These are shared by every host (the terminal console, the one-shot CLI,
//! JSON output) and don't depend on any UI framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::EditorCardData;
use crate::response::ActionChip;

/// Who (or what) produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    User,
    Ai,
    EditorCard,
}

/// One entry in the conversation log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Increases with creation order within a conversation
    pub id: u64,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chips: Option<Vec<ActionChip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_data: Option<EditorCardData>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.kind == MessageKind::User
    }

    pub fn is_card(&self) -> bool {
        self.kind == MessageKind::EditorCard
    }

    /// Card payload, only for editor card messages
    pub fn card(&self) -> Option<&EditorCardData> {
        self.editor_data.as_ref().filter(|_| self.is_card())
    }
}
