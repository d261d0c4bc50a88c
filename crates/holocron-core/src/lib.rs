pub mod card;
pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod markup;
pub mod search;
pub mod state;
pub mod widget;

// Re-export main types for convenience
pub use card::{render_card, Card};
pub use client::{SearchClient, DEFAULT_ENDPOINT};
pub use config::Config;
pub use error::{Error, Result};
pub use host::HostPage;
pub use search::{EntityCard, EntityKind, SearchResult};
pub use state::{EntryId, InputField, Message, MessageLog, Role, WidgetUiState};
pub use widget::{ChatWidget, Completion, RequestId, FAILURE_TEXT, GUIDANCE_TEXT, NOT_FOUND_TEXT};
