pub mod cards;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod forms;
pub mod matcher;
pub mod response;
pub mod setup;
pub mod state;
pub mod suggestions;

// Re-export main types for convenience
pub use cards::EditorCardData;
pub use catalog::{ResponseCatalog, ResponsePattern};
pub use config::Config;
pub use conversation::{Conversation, Delivery, Modal, PendingReply, SubmitOutcome};
pub use error::{Error, Result};
pub use forms::{ConnectionType, LocationData, PhoneNumbersData, PstnData};
pub use matcher::ResponseMatcher;
pub use response::{ActionChip, CardKind, PanelMode, Response};
pub use setup::{SetupChecklist, SetupStep, SetupTask};
pub use state::{Message, MessageKind};
pub use suggestions::Suggestion;
