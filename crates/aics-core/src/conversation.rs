//! Conversation state owned by a host UI.
//!
//! Holds the append-only message log plus the derived UI state around it:
//! offered chips, side panel, pending change counter, setup checklist and
//! which form (if any) the host should show. Every operation is a
//! synchronous mutation; nothing here can fail except form validation.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::cards::EditorCardData;
use crate::catalog::ResponseCatalog;
use crate::error::Result;
use crate::forms::{find_provider, LocationData, PhoneNumbersData, PstnData};
use crate::matcher::ResponseMatcher;
use crate::response::{ActionChip, CardKind, PanelMode};
use crate::setup::SetupChecklist;
use crate::state::{Message, MessageKind};

/// Phrases that open the location form instead of asking the matcher
const LOCATION_FORM_PHRASES: &[&str] = &["add location", "create location", "setup location"];

/// A form the host should present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modal {
    Location,
    Pstn,
    PhoneNumbers,
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Location => "location",
            Modal::Pstn => "PSTN",
            Modal::PhoneNumbers => "phone numbers",
        }
    }
}

/// A reply that has been accepted but not yet shown.
///
/// Hosts hold on to it for the "thinking" delay, then hand it back to
/// [`Conversation::deliver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    input: String,
}

impl PendingReply {
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing recorded
    Ignored,
    OpenModal(Modal),
    Reply(PendingReply),
}

/// What a delivered reply changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delivery {
    /// Winning catalog entry, `None` when the default response was used
    pub matched_entry: Option<usize>,
    pub card: Option<CardKind>,
    /// Tasks the keyword scan completed
    pub completed_tasks: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    matcher: ResponseMatcher,
    messages: Vec<Message>,
    next_id: u64,
    smart_chips: Vec<ActionChip>,
    panel: PanelMode,
    pending_changes: usize,
    checklist: SetupChecklist,
    modal: Option<Modal>,
}

impl Conversation {
    /// Start a session: the log holds the welcome message and its chips are offered
    pub fn new(catalog: Arc<ResponseCatalog>) -> Self {
        let welcome = catalog.welcome().clone();
        let mut conversation = Self {
            matcher: ResponseMatcher::new(catalog),
            messages: Vec::new(),
            next_id: 0,
            smart_chips: welcome.chips.clone().unwrap_or_default(),
            panel: PanelMode::Steps,
            pending_changes: 0,
            checklist: SetupChecklist::builtin(),
            modal: None,
        };
        conversation.push_message(MessageKind::Ai, welcome.content, welcome.chips, None);
        conversation
    }

    pub fn matcher(&self) -> &ResponseMatcher {
        &self.matcher
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn smart_chips(&self) -> &[ActionChip] {
        &self.smart_chips
    }

    pub fn panel(&self) -> PanelMode {
        self.panel
    }

    pub fn pending_changes(&self) -> usize {
        self.pending_changes
    }

    pub fn checklist(&self) -> &SetupChecklist {
        &self.checklist
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// Record user input and decide what happens next.
    ///
    /// Location phrases open the location form and skip the matcher.
    /// Everything else comes back as a [`PendingReply`].
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.push_message(MessageKind::User, input.to_string(), None, None);

        let lower = input.to_lowercase();
        if LOCATION_FORM_PHRASES.iter().any(|p| lower.contains(p)) {
            tracing::info!("location phrase detected, opening location form");
            return self.open_modal(Modal::Location);
        }

        SubmitOutcome::Reply(PendingReply {
            input: input.to_string(),
        })
    }

    /// Append the matched response (and card, if any) for a pending reply
    pub fn deliver(&mut self, pending: PendingReply) -> Delivery {
        let input = pending.input;
        let matched_entry = self.matcher.match_index(&input);
        let response = self.matcher.match_response(&input).clone();

        self.push_message(
            MessageKind::Ai,
            response.content.clone(),
            response.chips.clone(),
            None,
        );

        if let Some(kind) = response.generates_card {
            let card = EditorCardData::from_template(kind);
            self.push_message(MessageKind::EditorCard, String::new(), None, Some(card));
            self.pending_changes += 1;
        }

        if let Some(chips) = response.chips {
            self.smart_chips = chips;
        }

        if let Some(mode) = response.switches_panel {
            self.panel = mode.normalized();
        }

        let completed_tasks = self.checklist.apply_keywords(&input);
        if !completed_tasks.is_empty() {
            tracing::info!(tasks = ?completed_tasks, "keyword scan completed tasks");
        }

        tracing::debug!(
            entry = ?matched_entry,
            card = ?response.generates_card,
            "reply delivered"
        );

        Delivery {
            matched_entry,
            card: response.generates_card,
            completed_tasks,
        }
    }

    /// Submit and deliver in one go, for hosts without a reply delay
    pub fn send(&mut self, input: &str) -> SubmitOutcome {
        let outcome = self.submit(input);
        if let SubmitOutcome::Reply(pending) = &outcome {
            self.deliver(pending.clone());
        }
        outcome
    }

    /// React to one of the offered chips.
    ///
    /// Setup actions open their form; any other chip is sent as if its
    /// label had been typed. Unknown ids are ignored.
    pub fn click_chip(&mut self, chip_id: &str) -> SubmitOutcome {
        let Some(chip) = self.smart_chips.iter().find(|c| c.id == chip_id).cloned() else {
            tracing::debug!(chip_id, "ignoring click on unknown chip");
            return SubmitOutcome::Ignored;
        };

        match chip_modal(&chip) {
            Some(modal) => self.open_modal(modal),
            None => self.submit(&chip.label),
        }
    }

    pub fn open_modal(&mut self, modal: Modal) -> SubmitOutcome {
        self.modal = Some(modal);
        SubmitOutcome::OpenModal(modal)
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn set_panel(&mut self, mode: PanelMode) {
        self.panel = mode.normalized();
    }

    pub fn toggle_task(&mut self, step_id: &str, task_id: &str) -> bool {
        self.checklist.toggle_task(step_id, task_id)
    }

    /// Confirm the generated cards. Returns false when nothing was pending.
    pub fn apply_changes(&mut self) -> bool {
        if self.pending_changes == 0 {
            return false;
        }

        let count = self.pending_changes;
        let content = format!(
            "✅ Successfully applied {} change{}! Your calling configuration has been updated.",
            count,
            plural(count)
        );
        self.push_message(MessageKind::Ai, content, None, None);
        self.pending_changes = 0;
        tracing::info!(count, "applied pending changes");
        true
    }

    pub fn save_location(&mut self, location: &LocationData) -> Result<()> {
        location.validate()?;
        self.checklist.complete_task("add-locations");

        let timezone = if location.timezone.is_empty() {
            "Not set"
        } else {
            location.timezone.as_str()
        };
        let content = format!(
            "✅ Location \"{}\" has been created successfully!\n\n\
             **Details:**\n\
             • Address: {}\n\
             • Timezone: {}\n\
             • Country: {}\n\n\
             What would you like to do next?",
            location.name,
            location.full_address(),
            timezone,
            location.country
        );

        self.finish_form(
            content,
            vec![
                ActionChip::new("setup-pstn", "Set up PSTN", "setup-pstn"),
                ActionChip::new("add-numbers", "Add Phone Numbers", "add-phone-numbers"),
                ActionChip::new("another-location", "Add Another Location", "add-location"),
            ],
        );
        tracing::info!(name = %location.name, "location created");
        Ok(())
    }

    pub fn save_pstn(&mut self, pstn: &PstnData) -> Result<()> {
        pstn.validate()?;
        self.checklist.complete_task("setup-pstn");

        let mut content = format!(
            "✅ PSTN connection has been configured successfully!\n\n**Connection Type:** {}",
            pstn.connection_type.display_name()
        );
        if let Some(provider) = &pstn.provider {
            let name = find_provider(provider).map(|p| p.name).unwrap_or(provider);
            content.push_str(&format!("\n**Provider:** {}", name));
        }
        content.push_str("\n\nWhat would you like to do next?");

        self.finish_form(
            content,
            vec![
                ActionChip::new("add-numbers", "Add Phone Numbers", "add-phone-numbers"),
                ActionChip::new("configure-emergency", "Configure Emergency Services", "configure-emergency"),
            ],
        );
        tracing::info!(connection = ?pstn.connection_type, "pstn configured");
        Ok(())
    }

    pub fn save_phone_numbers(&mut self, numbers: &PhoneNumbersData) -> Result<()> {
        numbers.validate()?;
        self.checklist.complete_task("add-phone-numbers");

        let count = numbers.numbers.len();
        let note = if numbers.activate_later {
            "📝 Note: Numbers will be activated later."
        } else {
            "✨ Numbers are now active."
        };
        let content = format!(
            "✅ Successfully added {} phone number{}!\n\n{}\n\nWhat would you like to do next?",
            count,
            plural(count),
            note
        );

        self.finish_form(
            content,
            vec![
                ActionChip::new("configure-emergency", "Configure Emergency Services", "configure-emergency"),
                ActionChip::new("add-users", "Add Users", "add-users"),
            ],
        );
        tracing::info!(count, "phone numbers added");
        Ok(())
    }

    fn finish_form(&mut self, content: String, chips: Vec<ActionChip>) {
        self.push_message(MessageKind::Ai, content, Some(chips.clone()), None);
        self.smart_chips = chips;
        self.modal = None;
        self.panel = PanelMode::Steps;
    }

    fn push_message(
        &mut self,
        kind: MessageKind,
        content: String,
        chips: Option<Vec<ActionChip>>,
        editor_data: Option<EditorCardData>,
    ) {
        let message = Message {
            id: self.next_id,
            kind,
            content,
            timestamp: Utc::now(),
            chips,
            editor_data,
        };
        self.next_id += 1;
        self.messages.push(message);
    }
}

fn chip_modal(chip: &ActionChip) -> Option<Modal> {
    let label = chip.label.to_lowercase();

    if chip.action == "add-location" || label.contains("add location") {
        Some(Modal::Location)
    } else if chip.action == "setup-pstn" || label.contains("setup pstn") {
        Some(Modal::Pstn)
    } else if chip.action == "add-phone-numbers"
        || label.contains("add phone")
        || label.contains("add number")
    {
        Some(Modal::PhoneNumbers)
    } else {
        None
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ConnectionType;

    fn conversation() -> Conversation {
        Conversation::new(Arc::new(ResponseCatalog::builtin().unwrap()))
    }

    fn kinds(conversation: &Conversation) -> Vec<MessageKind> {
        conversation.messages().iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_starts_with_welcome() {
        let conv = conversation();
        assert_eq!(kinds(&conv), vec![MessageKind::Ai]);
        assert_eq!(conv.messages()[0].id, 0);
        assert_eq!(conv.smart_chips().len(), 3);
        assert_eq!(conv.panel(), PanelMode::Steps);
        assert_eq!(conv.pending_changes(), 0);
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut conv = conversation();
        assert_eq!(conv.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn test_add_location_bypasses_matcher() {
        let mut conv = conversation();
        let outcome = conv.send("add location");
        assert_eq!(outcome, SubmitOutcome::OpenModal(Modal::Location));
        assert_eq!(conv.modal(), Some(Modal::Location));
        assert_eq!(kinds(&conv), vec![MessageKind::Ai, MessageKind::User]);
    }

    #[test]
    fn test_bypass_matches_inside_sentence() {
        let mut conv = conversation();
        let outcome = conv.submit("Could you Create Location for Boston?");
        assert_eq!(outcome, SubmitOutcome::OpenModal(Modal::Location));
    }

    #[test]
    fn test_reply_waits_for_delivery() {
        let mut conv = conversation();
        let SubmitOutcome::Reply(pending) = conv.submit("What is PSTN?") else {
            panic!("expected a pending reply");
        };
        assert_eq!(pending.input(), "What is PSTN?");
        assert_eq!(conv.messages().len(), 2);

        conv.deliver(pending);
        assert_eq!(kinds(&conv).last(), Some(&MessageKind::Ai));
        assert!(conv.messages().last().unwrap().content.starts_with("PSTN stands for"));
    }

    #[test]
    fn test_card_response_appends_editor_card() {
        let mut conv = conversation();
        conv.send("create call queue");

        assert_eq!(
            kinds(&conv),
            vec![MessageKind::Ai, MessageKind::User, MessageKind::Ai, MessageKind::EditorCard]
        );
        let card = conv.messages().last().unwrap().card().unwrap();
        assert_eq!(card.kind, CardKind::CallQueue);
        assert_eq!(card.field("maxWaitTime"), Some("5 minutes"));
        assert_eq!(conv.pending_changes(), 1);
        assert_eq!(conv.smart_chips()[0].id, "rr");
        // keyword scan runs too
        assert!(conv.checklist().task("configure-call-queue").unwrap().completed);
        assert!(conv.messages()[..3].iter().all(|m| m.card().is_none()));
    }

    #[test]
    fn test_default_response_switches_panel() {
        let mut conv = conversation();
        conv.send("asdkjaslkdj");
        assert_eq!(conv.panel(), PanelMode::Suggestions);
        assert_eq!(conv.smart_chips()[0].action, "show-help");
    }

    #[test]
    fn test_response_without_chips_keeps_offered_chips() {
        let mut conv = conversation();
        let before = conv.smart_chips().to_vec();
        conv.send("How many phone numbers do I need?");
        assert_eq!(conv.smart_chips(), before.as_slice());
        // "phone number" keyword
        assert!(conv.checklist().task("add-phone-numbers").unwrap().completed);
    }

    #[test]
    fn test_question_silently_completes_task() {
        let mut conv = conversation();
        let SubmitOutcome::Reply(pending) = conv.submit("what is pstn") else {
            panic!("expected a pending reply");
        };
        let delivery = conv.deliver(pending);
        assert_eq!(delivery.completed_tasks, vec!["setup-pstn"]);
        assert!(delivery.matched_entry.is_some());
        assert!(conv.checklist().task("setup-pstn").unwrap().completed);
    }

    #[test]
    fn test_message_ids_increase() {
        let mut conv = conversation();
        conv.send("help");
        conv.send("create auto attendant");
        let ids: Vec<u64> = conv.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_chip_routing() {
        let mut conv = conversation();
        assert_eq!(conv.click_chip("add-location"), SubmitOutcome::OpenModal(Modal::Location));
        conv.close_modal();
        assert_eq!(conv.modal(), None);

        // plain chip is sent as its label
        let outcome = conv.click_chip("start");
        assert_eq!(
            outcome,
            SubmitOutcome::Reply(PendingReply { input: "Where do I start?".into() })
        );
        assert_eq!(conv.click_chip("missing"), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_chip_opens_pstn_and_number_forms() {
        let mut conv = conversation();
        conv.send("what is pstn");
        assert_eq!(conv.click_chip("choose-pstn"), SubmitOutcome::OpenModal(Modal::Pstn));

        let location = LocationData {
            name: "HQ".into(),
            country: "US".into(),
            address: "1 Main St".into(),
            ..LocationData::default()
        };
        conv.save_location(&location).unwrap();
        assert_eq!(conv.click_chip("add-numbers"), SubmitOutcome::OpenModal(Modal::PhoneNumbers));
    }

    #[test]
    fn test_apply_changes() {
        let mut conv = conversation();
        assert!(!conv.apply_changes());

        conv.send("create call queue");
        conv.send("create auto attendant");
        assert_eq!(conv.pending_changes(), 2);
        assert!(conv.apply_changes());
        assert_eq!(conv.pending_changes(), 0);
        assert!(conv
            .messages()
            .last()
            .unwrap()
            .content
            .contains("Successfully applied 2 changes!"));

        conv.send("setup queue");
        conv.apply_changes();
        assert!(conv.messages().last().unwrap().content.contains("applied 1 change!"));
    }

    #[test]
    fn test_save_location_completes_task() {
        let mut conv = conversation();
        conv.send("add location");
        conv.set_panel(PanelMode::Suggestions);

        let location = LocationData {
            name: "Denver".into(),
            country: "US".into(),
            address: "1700 Lincoln St".into(),
            city: "Denver".into(),
            state: "CO".into(),
            zip_code: "80203".into(),
            ..LocationData::default()
        };
        conv.save_location(&location).unwrap();

        assert!(conv.checklist().task("add-locations").unwrap().completed);
        assert_eq!(conv.modal(), None);
        assert_eq!(conv.panel(), PanelMode::Steps);
        let last = conv.messages().last().unwrap();
        assert!(last.content.contains("Location \"Denver\" has been created"));
        assert!(last.content.contains("Timezone: Not set"));
        assert_eq!(conv.smart_chips().len(), 3);
    }

    #[test]
    fn test_invalid_location_changes_nothing() {
        let mut conv = conversation();
        conv.send("add location");
        assert!(conv.save_location(&LocationData::default()).is_err());
        assert_eq!(conv.modal(), Some(Modal::Location));
        assert!(!conv.checklist().task("add-locations").unwrap().completed);
    }

    #[test]
    fn test_save_pstn_names_provider() {
        let mut conv = conversation();
        conv.save_pstn(&PstnData {
            connection_type: ConnectionType::CloudConnected,
            provider: Some("bandwidth".into()),
        })
        .unwrap();
        let last = conv.messages().last().unwrap();
        assert!(last.content.contains("Cloud Connected PSTN"));
        assert!(last.content.contains("**Provider:** Bandwidth"));
        assert!(conv.checklist().task("setup-pstn").unwrap().completed);
    }

    #[test]
    fn test_save_phone_numbers() {
        let mut conv = conversation();
        assert!(conv.save_phone_numbers(&PhoneNumbersData::default()).is_err());

        conv.save_phone_numbers(&PhoneNumbersData {
            numbers: vec!["4507832223".into()],
            activate_later: true,
        })
        .unwrap();
        let last = conv.messages().last().unwrap();
        assert!(last.content.contains("Successfully added 1 phone number!"));
        assert!(last.content.contains("activated later"));
    }

    #[test]
    fn test_foundation_step_completes_through_forms() {
        let mut conv = conversation();
        conv.save_location(&LocationData {
            name: "HQ".into(),
            country: "US".into(),
            address: "1 Main St".into(),
            ..LocationData::default()
        })
        .unwrap();
        conv.save_pstn(&PstnData {
            connection_type: ConnectionType::Cisco,
            provider: None,
        })
        .unwrap();
        conv.save_phone_numbers(&PhoneNumbersData {
            numbers: vec!["+1-450-783-2223".into()],
            activate_later: false,
        })
        .unwrap();

        let steps = conv.checklist().steps();
        assert!(steps[0].is_completed());
        assert!(steps[1..].iter().all(|s| s.completed_count() == 0));
    }
}
