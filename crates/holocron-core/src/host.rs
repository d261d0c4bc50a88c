//! Description of the surface a widget is mounted on.
//!
//! A host page may or may not carry the chat feature. `ChatWidget::mount`
//! inspects this description and quietly does nothing when a required piece
//! is missing.

/// Name of the text input the widget reads queries from.
pub const QUERY_INPUT: &str = "q";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPage {
    pub chat: Option<ChatSection>,
    /// Introductory banner collapsed on first interaction.
    pub hero: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSection {
    /// The `data-endpoint` attribute.
    pub endpoint: Option<String>,
    pub form: Option<Form>,
    pub log: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// Names of the form's inputs.
    pub inputs: Vec<String>,
}

impl HostPage {
    /// A page with every element the widget needs.
    pub fn complete(endpoint: Option<String>, hero: bool) -> Self {
        Self {
            chat: Some(ChatSection {
                endpoint,
                form: Some(Form {
                    inputs: vec![QUERY_INPUT.to_string()],
                }),
                log: true,
            }),
            hero,
        }
    }

    /// The chat section, if it has a form with a `q` input and a log.
    pub fn mountable(&self) -> Option<&ChatSection> {
        let chat = self.chat.as_ref()?;
        let form = chat.form.as_ref()?;
        if !form.inputs.iter().any(|name| name == QUERY_INPUT) || !chat.log {
            return None;
        }
        Some(chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_page_is_mountable() {
        let page = HostPage::complete(Some("/api/search".into()), false);
        assert_eq!(page.mountable().and_then(|c| c.endpoint.as_deref()), Some("/api/search"));
    }

    #[test]
    fn test_missing_pieces() {
        assert!(HostPage::default().mountable().is_none());

        let mut page = HostPage::complete(None, true);
        page.chat.as_mut().unwrap().log = false;
        assert!(page.mountable().is_none());

        let mut page = HostPage::complete(None, true);
        page.chat.as_mut().unwrap().form = Some(Form { inputs: vec!["search".into()] });
        assert!(page.mountable().is_none());

        let mut page = HostPage::complete(None, true);
        page.chat.as_mut().unwrap().form = None;
        assert!(page.mountable().is_none());
    }
}
