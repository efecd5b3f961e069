use std::sync::Arc;

use crate::catalog::ResponseCatalog;
use crate::response::Response;

/// First-match-wins lookup over a [`ResponseCatalog`].
///
/// Matching never fails: input no trigger accepts falls back to the
/// catalog's default response.
#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    catalog: Arc<ResponseCatalog>,
}

impl ResponseMatcher {
    pub fn new(catalog: Arc<ResponseCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    /// Position of the winning catalog entry, `None` when the default applies
    pub fn match_index(&self, input: &str) -> Option<usize> {
        self.catalog
            .patterns()
            .iter()
            .position(|pattern| pattern.is_match(input))
    }

    pub fn match_response(&self, input: &str) -> &Response {
        match self.match_index(input) {
            Some(idx) => {
                tracing::debug!(entry = idx, "matched catalog entry");
                &self.catalog.patterns()[idx].response
            }
            None => {
                tracing::debug!("no trigger matched, using default response");
                self.catalog.default_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{CardKind, PanelMode};

    fn builtin() -> ResponseMatcher {
        ResponseMatcher::new(Arc::new(ResponseCatalog::builtin().unwrap()))
    }

    fn overlapping() -> ResponseMatcher {
        let catalog = ResponseCatalog::new(
            vec![
                ("queue", Response::text("first")),
                ("call queue", Response::text("second")),
            ],
            Response::text("fallback"),
            Response::text("hello"),
        )
        .unwrap();
        ResponseMatcher::new(Arc::new(catalog))
    }

    #[test]
    fn test_location_question() {
        let matcher = builtin();
        let response = matcher.match_response("What is a location?");
        assert!(response
            .content
            .starts_with("A location represents a physical site"));
        assert!(response.has_chip_action("add-location"));
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = builtin();
        assert_eq!(
            matcher.match_response("WHAT IS A LOCATION"),
            matcher.match_response("what is a location")
        );
    }

    #[test]
    fn test_create_call_queue_generates_card() {
        let matcher = builtin();
        let response = matcher.match_response("create call queue");
        assert_eq!(response.generates_card, Some(CardKind::CallQueue));
    }

    #[test]
    fn test_queue_command_precedes_queue_topic() {
        let matcher = builtin();
        let command = matcher.match_index("setup queue").unwrap();
        let topic = matcher.match_index("explain queue").unwrap();
        assert_eq!(command + 1, topic);
    }

    #[test]
    fn test_topics_outrank_late_action_commands() {
        let matcher = builtin();
        let help = matcher.match_response("setup pstn help");
        assert_eq!(help.switches_panel, Some(PanelMode::Suggestions));
        assert_ne!(help, matcher.catalog().default_response());

        let toll_free = matcher.match_response("add phone number for toll free");
        assert_eq!(toll_free.generates_card, None);
        assert_eq!(
            toll_free,
            matcher.match_response("do you offer toll free numbers?")
        );

        // nothing earlier matches a bare command
        let card = matcher.match_response("add phone numbers");
        assert_eq!(card.generates_card, Some(CardKind::PhoneNumbers));
    }

    #[test]
    fn test_call_queue_question_explains() {
        let matcher = builtin();
        let response = matcher.match_response("What is a call queue?");
        assert_eq!(response.generates_card, None);
        assert!(response.has_chip_action("create-call-queue"));
    }

    #[test]
    fn test_gibberish_falls_back_to_default() {
        let matcher = builtin();
        assert_eq!(matcher.match_index("asdkjaslkdj"), None);
        let response = matcher.match_response("asdkjaslkdj");
        assert_eq!(response, matcher.catalog().default_response());
        assert_eq!(response.switches_panel, Some(PanelMode::Suggestions));
    }

    #[test]
    fn test_empty_input_falls_back_to_default() {
        let matcher = builtin();
        assert_eq!(matcher.match_response(""), matcher.catalog().default_response());
    }

    #[test]
    fn test_earlier_entry_wins() {
        let matcher = overlapping();
        assert_eq!(matcher.match_index("create a call queue"), Some(0));
        assert_eq!(matcher.match_response("create a call queue").content, "first");
    }

    #[test]
    fn test_repeated_matches_are_stable() {
        let matcher = builtin();
        let first = matcher.match_response("How many phone numbers do I need?").clone();
        for _ in 0..5 {
            assert_eq!(matcher.match_response("How many phone numbers do I need?"), &first);
        }
        assert_eq!(matcher.catalog().len(), 22);
    }

    #[test]
    fn test_anchored_command_ignored_mid_sentence() {
        let matcher = builtin();
        // "please create pstn" misses the anchored command but the PSTN
        // explainer does not match either, so the default applies
        assert_eq!(matcher.match_index("please create pstn"), None);
        assert!(matcher.match_index("setup pstn").is_some());
    }

    #[test]
    fn test_help_switches_panel() {
        let matcher = builtin();
        let response = matcher.match_response("what can you do?");
        assert_eq!(response.switches_panel, Some(PanelMode::Suggestions));
        assert_ne!(response, matcher.catalog().default_response());
    }
}
