//! Canned assistant responses and the closed vocabularies they use.

use serde::{Deserialize, Serialize};

/// A clickable action offered alongside a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionChip {
    pub id: String,
    pub label: String,
    /// Opaque command token interpreted by the host
    pub action: String,
}

impl ActionChip {
    pub fn new(id: &str, label: &str, action: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action: action.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    CallQueue,
    AutoAttendant,
    HolidaySchedule,
    VoicemailPolicy,
    Location,
    Pstn,
    PhoneNumbers,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::CallQueue => "call-queue",
            CardKind::AutoAttendant => "auto-attendant",
            CardKind::HolidaySchedule => "holiday-schedule",
            CardKind::VoicemailPolicy => "voicemail-policy",
            CardKind::Location => "location",
            CardKind::Pstn => "pstn",
            CardKind::PhoneNumbers => "phone-numbers",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.as_str() == s)
    }

    pub fn all() -> Vec<CardKind> {
        vec![
            CardKind::CallQueue,
            CardKind::AutoAttendant,
            CardKind::HolidaySchedule,
            CardKind::VoicemailPolicy,
            CardKind::Location,
            CardKind::Pstn,
            CardKind::PhoneNumbers,
        ]
    }
}

/// Side panel a response may ask the host to show.
///
/// The catalog vocabulary is wider than what the console renders; see
/// [`PanelMode::shows_suggestions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelMode {
    #[default]
    Steps,
    Entity,
    Routing,
    Suggestions,
    Resources,
}

impl PanelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelMode::Steps => "steps",
            PanelMode::Entity => "entity",
            PanelMode::Routing => "routing",
            PanelMode::Suggestions => "suggestions",
            PanelMode::Resources => "resources",
        }
    }

    /// Collapse to the two panels the console actually has
    pub fn normalized(self) -> PanelMode {
        if self.shows_suggestions() {
            PanelMode::Suggestions
        } else {
            PanelMode::Steps
        }
    }

    pub fn shows_suggestions(&self) -> bool {
        matches!(self, PanelMode::Suggestions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Response {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chips: Option<Vec<ActionChip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generates_card: Option<CardKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switches_panel: Option<PanelMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl Response {
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::default()
        }
    }

    pub fn with_chips(mut self, chips: Vec<ActionChip>) -> Self {
        self.chips = Some(chips);
        self
    }

    pub fn with_card(mut self, kind: CardKind) -> Self {
        self.generates_card = Some(kind);
        self
    }

    pub fn with_panel(mut self, mode: PanelMode) -> Self {
        self.switches_panel = Some(mode);
        self
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = Some(suggestions.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn has_chip_action(&self, action: &str) -> bool {
        self.chips
            .as_deref()
            .map(|chips| chips.iter().any(|c| c.action == action))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_kind_round_trips_through_str() {
        for kind in CardKind::all() {
            assert_eq!(CardKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(CardKind::from_str("fax"), None);
    }

    #[test]
    fn test_card_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&CardKind::PhoneNumbers).unwrap();
        assert_eq!(json, "\"phone-numbers\"");
    }

    #[test]
    fn test_panel_modes_collapse_to_steps_or_suggestions() {
        assert_eq!(PanelMode::Suggestions.normalized(), PanelMode::Suggestions);
        assert_eq!(PanelMode::Routing.normalized(), PanelMode::Steps);
        assert_eq!(PanelMode::Entity.normalized(), PanelMode::Steps);
        assert_eq!(PanelMode::Resources.normalized(), PanelMode::Steps);
    }

    #[test]
    fn test_response_skips_absent_fields() {
        let json = serde_json::to_value(Response::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hi" }));
    }
}
