//! Result cards for character and media entities.

use maud::{html, Markup, Render};
use serde::{Deserialize, Serialize};

use crate::search::{EntityCard, EntityKind};

pub const FILM_LABEL: &str = "Primera aparición";
pub const CYBERNETICS_LABEL: &str = "Cibernética";
pub const YEAR_LABEL: &str = "Año";
pub const VIEW_MORE: &str = "Ver más";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
}

/// A rendered entity. Values are kept raw; `to_html` escapes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub thumbnail: Option<Thumbnail>,
    pub name: String,
    pub lines: Vec<String>,
    pub link: Option<String>,
}

/// Builds the card for an entity result. Missing fields drop their line.
pub fn render_card(entity: &EntityCard) -> Card {
    let thumbnail = entity
        .image
        .as_ref()
        .or(entity.poster.as_ref())
        .map(|src| Thumbnail {
            src: src.clone(),
            alt: entity.name.clone(),
        });

    let mut lines = Vec::new();
    match entity.kind {
        EntityKind::Character => {
            let origin: Vec<&str> = [&entity.species, &entity.homeworld]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect();
            if !origin.is_empty() {
                lines.push(origin.join(" · "));
            }
            if let Some(film) = &entity.film {
                lines.push(format!("{}: {}", FILM_LABEL, film));
            }
            if let Some(cybernetics) = &entity.cybernetics {
                lines.push(format!("{}: {}", CYBERNETICS_LABEL, cybernetics));
            }
        }
        EntityKind::Media => {
            if let Some(year) = &entity.release_year {
                lines.push(format!("{}: {}", YEAR_LABEL, year));
            }
        }
        EntityKind::Other(_) => {}
    }

    Card {
        thumbnail,
        name: entity.name.clone(),
        lines,
        link: entity.detail_url.clone(),
    }
}

impl Render for Card {
    fn render(&self) -> Markup {
        html! {
            @if let Some(thumb) = &self.thumbnail {
                img src=(thumb.src) alt=(thumb.alt) class="chat-thumb";
            }
            div class="chat-card-text" {
                strong { (self.name) }
                @for line in &self.lines {
                    small { (line) }
                }
                @if let Some(link) = &self.link {
                    small { a href=(link) { (VIEW_MORE) } }
                }
            }
        }
    }
}

impl Card {
    /// Markup fragment embedded after the message text.
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }

    /// Plain-text rendering for hosts without markup.
    pub fn text_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 3);
        if let Some(thumb) = &self.thumbnail {
            out.push(format!("[img] {}", thumb.src));
        }
        out.push(self.name.clone());
        out.extend(self.lines.iter().cloned());
        if let Some(link) = &self.link {
            out.push(format!("{}: {}", VIEW_MORE, link));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, kind: EntityKind) -> EntityCard {
        EntityCard {
            name: name.to_string(),
            kind,
            image: None,
            poster: None,
            species: None,
            homeworld: None,
            film: None,
            cybernetics: None,
            release_year: None,
            detail_url: None,
            body: None,
        }
    }

    #[test]
    fn test_luke_card() {
        let mut luke = entity("Luke Skywalker", EntityKind::Character);
        luke.species = Some("Human".into());
        luke.homeworld = Some("Tatooine".into());
        luke.detail_url = Some("/characters/luke".into());

        let card = render_card(&luke);
        assert_eq!(card.lines, vec!["Human · Tatooine".to_string()]);

        let html = card.to_html();
        assert!(html.contains("<strong>Luke Skywalker</strong>"));
        assert!(html.contains("<small>Human · Tatooine</small>"));
        assert!(html.contains(r#"<a href="/characters/luke">Ver más</a>"#));
        assert!(!html.contains(FILM_LABEL));
        assert!(!html.contains(CYBERNETICS_LABEL));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_character_optional_lines() {
        let mut vader = entity("Darth Vader", EntityKind::Character);
        vader.homeworld = Some("Tatooine".into());
        vader.film = Some("A New Hope".into());
        vader.cybernetics = Some("Traje de soporte vital".into());

        let card = render_card(&vader);
        assert_eq!(
            card.lines,
            vec![
                "Tatooine".to_string(),
                "Primera aparición: A New Hope".to_string(),
                "Cibernética: Traje de soporte vital".to_string(),
            ]
        );
        assert_eq!(card.link, None);
    }

    #[test]
    fn test_media_card_and_image_precedence() {
        let mut film = entity("The Empire Strikes Back", EntityKind::Media);
        film.release_year = Some("1980".into());
        film.poster = Some("/static/img/2.jpg".into());
        film.image = Some("/media/esb.png".into());
        film.species = Some("ignored for media".into());

        let card = render_card(&film);
        assert_eq!(card.lines, vec!["Año: 1980".to_string()]);
        assert_eq!(
            card.thumbnail,
            Some(Thumbnail {
                src: "/media/esb.png".into(),
                alt: "The Empire Strikes Back".into()
            })
        );

        film.image = None;
        assert_eq!(render_card(&film).thumbnail.map(|t| t.src), Some("/static/img/2.jpg".into()));
    }

    #[test]
    fn test_link_rendered_for_any_kind() {
        let mut planet = entity("Hoth", EntityKind::Other("planet".into()));
        planet.detail_url = Some("/planets/4".into());
        let card = render_card(&planet);
        assert!(card.lines.is_empty());
        assert_eq!(card.link.as_deref(), Some("/planets/4"));
    }

    #[test]
    fn test_network_values_are_escaped() {
        let mut evil = entity("<script>alert(1)</script>", EntityKind::Character);
        evil.image = Some(r#"x" onerror="alert(1)"#.into());
        evil.detail_url = Some("javascript:alert('x')".into());

        let html = render_card(&evil).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains(r#"src="x&quot; onerror=&quot;alert(1)""#));
        assert!(html.contains(r#"href="javascript:alert('x')""#));
        assert_eq!(html.matches('"').count() % 2, 0);
    }

    #[test]
    fn test_text_lines() {
        let mut luke = entity("Luke Skywalker", EntityKind::Character);
        luke.species = Some("Human".into());
        luke.detail_url = Some("/characters/luke".into());
        assert_eq!(
            render_card(&luke).text_lines(),
            vec!["Luke Skywalker", "Human", "Ver más: /characters/luke"]
        );
    }
}
