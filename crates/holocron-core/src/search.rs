//! The search endpoint's response contract.
//!
//! The backend answers with loosely shaped JSON: an entity card (anything with
//! a `name`), a plain `reply`, or an `error` flag. Fields are tested the way a
//! browser client would test them, so `null`, `false`, `0` and `""` all count
//! as absent.

use serde_json::Value;

/// Entity kinds the card renderer knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Character,
    Media,
    Other(String),
}

impl EntityKind {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("character") => EntityKind::Character,
            Some("media") => EntityKind::Media,
            Some(other) => EntityKind::Other(other.to_string()),
            None => EntityKind::Other(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCard {
    pub name: String,
    pub kind: EntityKind,
    pub image: Option<String>,
    pub poster: Option<String>,
    pub species: Option<String>,
    pub homeworld: Option<String>,
    pub film: Option<String>,
    pub cybernetics: Option<String>,
    pub release_year: Option<String>,
    pub detail_url: Option<String>,
    /// Replaces the default greeting when present.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Entity(EntityCard),
    Reply(String),
    /// Non-success status or a truthy `error` field.
    Rejected,
    Empty,
}

impl SearchResult {
    /// Classifies a response. A failed status wins over whatever the body says.
    pub fn classify(success: bool, body: &Value) -> Self {
        if !success || is_truthy(body.get("error")) {
            return SearchResult::Rejected;
        }

        if let Some(name) = text_field(body, "name") {
            return SearchResult::Entity(EntityCard {
                name,
                kind: EntityKind::parse(text_field(body, "kind")),
                image: text_field(body, "image"),
                poster: text_field(body, "poster"),
                species: text_field(body, "species"),
                homeworld: text_field(body, "homeworld"),
                film: text_field(body, "film"),
                cybernetics: text_field(body, "cybernetics"),
                release_year: text_field(body, "release_year"),
                detail_url: text_field(body, "detail_url"),
                body: text_field(body, "body"),
            });
        }

        match text_field(body, "reply") {
            Some(reply) => SearchResult::Reply(reply),
            None => SearchResult::Empty,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchResult::Entity(_) => "entity",
            SearchResult::Reply(_) => "reply",
            SearchResult::Rejected => "rejected",
            SearchResult::Empty => "empty",
        }
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Reads a truthy field as display text. Arrays and objects keep their JSON text.
fn text_field(body: &Value, key: &str) -> Option<String> {
    let value = body.get(key);
    if !is_truthy(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
