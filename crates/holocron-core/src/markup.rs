//! HTML rendering of the message log.
//!
//! Text and attribute values come from user input or from the network; maud
//! escapes every interpolated value.

use maud::{html, Markup, Render, DOCTYPE};

use crate::state::{Message, MessageLog, WidgetUiState};

/// One chat bubble, tagged with its role for styling.
impl Render for Message {
    fn render(&self) -> Markup {
        html! {
            div class=(format!("chat-bubble {}", self.role.as_str())) {
                p { (self.text) }
                @if let Some(card) = &self.extra {
                    (card)
                }
            }
        }
    }
}

pub fn render_message(message: &Message) -> String {
    message.render().into_string()
}

fn log_markup(log: &MessageLog) -> Markup {
    html! {
        @for message in log.entries() {
            (message)
        }
    }
}

pub fn render_log(log: &MessageLog) -> String {
    log_markup(log).into_string()
}

/// Standalone page used for transcript export.
pub fn render_page(log: &MessageLog, ui: &WidgetUiState, has_hero: bool) -> String {
    let hero_class = if ui.hero_collapsed { "chat-hero collapsed" } else { "chat-hero" };
    let section_class = if ui.docked { "chatbot docked" } else { "chatbot" };

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                title { "Holocron" }
            }
            body {
                @if has_hero {
                    header class=(hero_class) { h1 { "Holocron" } }
                }
                section class=(section_class) {
                    div class="chat-log" { (log_markup(log)) }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            render_message(&Message::bot(r#"<a href="x">Tom & Jerry</a>"#)),
            r#"<div class="chat-bubble bot"><p>&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;</p></div>"#
        );
        assert_eq!(
            render_message(&Message::bot("Año · Tatooine")),
            r#"<div class="chat-bubble bot"><p>Año · Tatooine</p></div>"#
        );
    }

    #[test]
    fn test_render_message_tags_role() {
        assert_eq!(
            render_message(&Message::user("<b>luke</b>")),
            r#"<div class="chat-bubble user"><p>&lt;b&gt;luke&lt;/b&gt;</p></div>"#
        );
    }

    #[test]
    fn test_render_message_with_card() {
        let card = Card {
            thumbnail: None,
            name: "Yoda".into(),
            lines: vec![],
            link: None,
        };
        let html = render_message(&Message::bot("Te muestro info sobre Yoda:").with_card(card));
        assert_eq!(
            html,
            r#"<div class="chat-bubble bot"><p>Te muestro info sobre Yoda:</p><div class="chat-card-text"><strong>Yoda</strong></div></div>"#
        );
    }

    #[test]
    fn test_render_log_keeps_order() {
        let mut log = MessageLog::new();
        log.append(Message::user("uno"));
        log.append(Message::bot("dos"));
        assert_eq!(
            render_log(&log),
            r#"<div class="chat-bubble user"><p>uno</p></div><div class="chat-bubble bot"><p>dos</p></div>"#
        );
    }

    #[test]
    fn test_render_page_reflects_dock() {
        let mut log = MessageLog::new();
        log.append(Message::user("yoda"));
        let mut ui = WidgetUiState::default();
        let page = render_page(&log, &ui, true);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<header class="chat-hero">"#));
        assert!(page.contains(r#"<section class="chatbot">"#));

        ui.dock(true);
        let page = render_page(&log, &ui, true);
        assert!(page.contains(r#"<header class="chat-hero collapsed">"#));
        assert!(page.contains(r#"<section class="chatbot docked">"#));
        assert!(page.contains(r#"<div class="chat-bubble user"><p>yoda</p></div>"#));

        assert!(!render_page(&log, &ui, false).contains("chat-hero"));
    }
}
