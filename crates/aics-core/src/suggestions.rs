use serde::Serialize;

/// A canned question listed in the suggestions panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: &'static str,
    pub category: &'static str,
    pub text: &'static str,
}

pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion { id: "s1", category: "Learn", text: "What is a location?" },
    Suggestion { id: "s2", category: "Learn", text: "What is PSTN?" },
    Suggestion { id: "s3", category: "Planning", text: "How many phone numbers do I need?" },
    Suggestion { id: "s4", category: "Numbers", text: "Can I port my existing numbers?" },
    Suggestion { id: "s5", category: "Locations", text: "Can I add multiple locations?" },
    Suggestion { id: "s6", category: "E911", text: "How does emergency calling work?" },
    Suggestion { id: "s7", category: "Licensing", text: "What license types are available?" },
    Suggestion { id: "s8", category: "Features", text: "What is an auto attendant?" },
    Suggestion { id: "s9", category: "Features", text: "What is a call queue?" },
    Suggestion { id: "s10", category: "Planning", text: "Which PSTN type should I choose?" },
    Suggestion { id: "s11", category: "E911", text: "How to handle remote workers?" },
    Suggestion { id: "s12", category: "Workspaces", text: "How to set up conference rooms?" },
];
