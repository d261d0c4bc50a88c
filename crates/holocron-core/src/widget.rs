//! The chat widget.
//!
//! One widget owns the message log, the input field and the docked flag.
//! Every submission spawns its own request task; tasks report back over a
//! channel and the owner applies each completion with [`ChatWidget::settle`],
//! which appends exactly one bot message per request.

use tokio::sync::mpsc;
use url::Url;

use crate::card::{render_card, Card};
use crate::client::{SearchClient, DEFAULT_ENDPOINT};
use crate::error::Result;
use crate::host::HostPage;
use crate::search::SearchResult;
use crate::state::{EntryId, InputField, Message, MessageLog, Role, WidgetUiState};

pub const FAILURE_TEXT: &str = "No pude procesar tu consulta ahora mismo.";
pub const GUIDANCE_TEXT: &str =
    "Solo puedo ayudarte con personajes de Star Wars. Prueba con un nombre o especie.";
pub const NOT_FOUND_TEXT: &str =
    "No encontré nada. Pregunta por un personaje o especie concreta.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Result of one request task
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub query: String,
    pub outcome: Result<SearchResult>,
}

pub struct ChatWidget {
    client: SearchClient,
    endpoint: Url,
    has_hero: bool,
    log: MessageLog,
    ui: WidgetUiState,
    input: InputField,
    next_request: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl ChatWidget {
    /// Mounts the widget on a host page.
    ///
    /// Returns `Ok(None)` when the page lacks the chat section, its form, the
    /// `q` input or the log. Fails only when the endpoint cannot be turned
    /// into a URL.
    pub fn mount(page: &HostPage, client: SearchClient) -> Result<Option<Self>> {
        let Some(chat) = page.mountable() else {
            tracing::debug!("host page has no usable chat section, widget not mounted");
            return Ok(None);
        };

        let endpoint = client.resolve(chat.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;
        tracing::info!(%endpoint, "chat widget mounted");

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Some(Self {
            client,
            endpoint,
            has_hero: page.hero,
            log: MessageLog::new(),
            ui: WidgetUiState::default(),
            input: InputField::default(),
            next_request: 0,
            in_flight: 0,
            tx,
            rx,
        }))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn has_hero(&self) -> bool {
        self.has_hero
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    pub fn ui_state(&self) -> WidgetUiState {
        self.ui
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    /// Requests issued but not settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn append_message(&mut self, text: impl Into<String>, role: Role, extra: Option<Card>) -> EntryId {
        self.log.append(Message {
            text: text.into(),
            role,
            extra,
        })
    }

    /// Form submission: submits whatever is in the input field.
    pub fn submit(&mut self) -> Option<RequestId> {
        let raw = self.input.value().to_string();
        self.submit_query(&raw)
    }

    /// Submits a query. Whitespace-only input is ignored.
    ///
    /// The user message is appended before this returns; the bot answer
    /// arrives later through [`next_completion`](Self::next_completion).
    /// Must be called from within a tokio runtime.
    pub fn submit_query(&mut self, raw_text: &str) -> Option<RequestId> {
        let query = raw_text.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();

        self.append_message(query.clone(), Role::User, None);
        self.ui.dock(self.has_hero);
        self.input.clear();
        self.input.focus();

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight += 1;
        tracing::debug!(request = id.0, %query, "search request issued");

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.search(&endpoint, &query).await;
            // The receiver is gone once the widget is disposed.
            let _ = tx.send(Completion { id, query, outcome });
        });

        Some(id)
    }

    /// Waits for the next request to finish, in completion order.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    pub fn try_completion(&mut self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    /// Appends the bot message for a finished request.
    pub fn settle(&mut self, completion: Completion) -> EntryId {
        self.in_flight = self.in_flight.saturating_sub(1);

        let message = match completion.outcome {
            Ok(result) => {
                tracing::info!(request = completion.id.0, outcome = result.kind(), "search settled");
                response_message(result)
            }
            Err(err) => {
                tracing::warn!(request = completion.id.0, error = %err, "search failed");
                Message::bot(FAILURE_TEXT)
            }
        };
        self.log.append(message)
    }

    /// Waits for one completion and settles it.
    pub async fn settle_next(&mut self) -> Option<EntryId> {
        let completion = self.next_completion().await?;
        Some(self.settle(completion))
    }

    /// Detaches the widget and hands back the transcript.
    pub fn dispose(self) -> Vec<Message> {
        tracing::debug!(pending = self.in_flight, "chat widget disposed");
        self.log.into_entries()
    }
}

fn response_message(result: SearchResult) -> Message {
    match result {
        SearchResult::Rejected => Message::bot(GUIDANCE_TEXT),
        SearchResult::Entity(entity) => {
            let card = render_card(&entity);
            let text = entity
                .body
                .unwrap_or_else(|| format!("Te muestro info sobre {}:", entity.name));
            Message::bot(text).with_card(card)
        }
        SearchResult::Reply(reply) => Message::bot(reply),
        SearchResult::Empty => Message::bot(NOT_FOUND_TEXT),
    }
}
