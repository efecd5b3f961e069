//! Editor cards generated inline in the conversation.

use serde::{Deserialize, Serialize};

use crate::response::CardKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorCardData {
    pub kind: CardKind,
    pub title: String,
    /// Field order follows the template
    pub fields: Vec<(String, String)>,
}

impl EditorCardData {
    /// Build the fixed template for `kind`
    pub fn from_template(kind: CardKind) -> Self {
        Self {
            kind,
            title: card_title(kind).to_string(),
            fields: card_fields(kind)
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub fn card_title(kind: CardKind) -> &'static str {
    match kind {
        CardKind::CallQueue => "Call Queue Configuration",
        CardKind::AutoAttendant => "Auto Attendant Setup",
        CardKind::HolidaySchedule => "Business Hours & Holidays",
        CardKind::VoicemailPolicy => "Voice Portal Configuration",
        CardKind::Location => "Location Setup",
        CardKind::Pstn => "PSTN Connection",
        CardKind::PhoneNumbers => "Phone Number Management",
    }
}

fn card_fields(kind: CardKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        CardKind::Location => &[
            ("name", "New York Office"),
            ("address", "123 Main Street, New York, NY 10001"),
            ("timezone", "America/New_York"),
            ("mainNumber", "+1 (212) 555-0100"),
        ],
        CardKind::Pstn => &[
            ("connectionType", "Cloud Connected PSTN"),
            ("provider", "Cisco"),
            ("status", "Configuring"),
            ("trunkCount", "2"),
        ],
        CardKind::PhoneNumbers => &[
            ("totalNumbers", "50"),
            ("assigned", "0"),
            ("unassigned", "50"),
            ("dialPlan", "Not configured"),
        ],
        CardKind::CallQueue => &[
            ("name", "Support Queue"),
            ("routingType", "Round-robin"),
            ("agents", "0 agents"),
            ("businessHours", "Not configured"),
            ("overflow", "Voicemail"),
            ("maxWaitTime", "5 minutes"),
        ],
        CardKind::AutoAttendant => &[
            ("name", "Main Reception"),
            ("greeting", "Not recorded"),
            ("menuOptions", "0 options"),
            ("businessHours", "24/7"),
            ("afterHours", "Voicemail"),
        ],
        CardKind::HolidaySchedule => &[
            ("name", "Business Schedule"),
            ("businessHours", "Monday-Friday, 9:00 AM - 5:00 PM"),
            ("holidays", "0 holidays configured"),
            ("afterHoursAction", "Play message"),
        ],
        CardKind::VoicemailPolicy => &[
            ("transcription", "Disabled"),
            ("emailNotification", "Disabled"),
            ("maxDuration", "3 minutes"),
            ("storage", "30 days"),
        ],
    }
}

/// Turn a camelCase field key into a display label ("maxWaitTime" -> "Max Wait Time")
pub fn field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}
