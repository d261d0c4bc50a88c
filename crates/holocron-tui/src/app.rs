use std::path::PathBuf;

use holocron_core::{markup, ChatWidget, Message, Role};

pub struct App {
    // Core state
    pub should_quit: bool,
    pub widget: ChatWidget,

    // Chat log scrolling
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Status line (export results and the like)
    pub status: Option<String>,
    pub export_path: PathBuf,
}

impl App {
    pub fn new(mut widget: ChatWidget, export_path: PathBuf) -> Self {
        widget.input_mut().focus();
        Self {
            should_quit: false,
            widget,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
            status: None,
            export_path,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.widget.in_flight() > 0
    }

    pub fn submit(&mut self) {
        if self.widget.submit().is_some() {
            self.status = None;
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max_scroll = self.total_chat_lines().saturating_sub(self.visible_height());
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max_scroll);
    }

    pub fn page_size(&self) -> u16 {
        (self.visible_height() / 2).max(1)
    }

    /// Honors the log's scroll-to-end request after an append.
    pub fn follow_log(&mut self) {
        if self.widget.log_mut().take_scroll_request() {
            self.scroll_to_bottom();
        }
    }

    /// Scroll chat to bottom so the newest entry is visible
    pub fn scroll_to_bottom(&mut self) {
        let total_lines = self.total_chat_lines();
        let visible_height = self.visible_height();
        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    fn visible_height(&self) -> u16 {
        if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        }
    }

    fn total_chat_lines(&self) -> u16 {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: usize = 0;
        for msg in self.widget.log().entries() {
            total_lines += 1; // Role line
            for line in message_lines(msg) {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                total_lines += (char_count / wrap_width) + 1;
            }
            total_lines += 1; // Blank line after message
        }

        if self.is_loading() {
            total_lines += 2; // Role line + "Buscando..."
        }
        // ratatui scroll offsets are u16; longer logs pin to the last reachable row
        u16::try_from(total_lines).unwrap_or(u16::MAX)
    }

    /// Writes the conversation as an HTML page.
    pub fn export_transcript(&mut self) {
        let page = markup::render_page(
            self.widget.log(),
            &self.widget.ui_state(),
            self.widget.has_hero(),
        );
        let result = self
            .export_path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| std::fs::write(&self.export_path, page));

        self.status = Some(match result {
            Ok(()) => {
                tracing::info!(path = %self.export_path.display(), "transcript exported");
                format!("Guardado en {}", self.export_path.display())
            }
            Err(err) => {
                tracing::warn!(error = %err, "transcript export failed");
                format!("No se pudo guardar: {}", err)
            }
        });
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "Tú:",
        Role::Bot => "Holocron:",
    }
}

/// Text lines of a message, card included, before wrapping.
pub fn message_lines(msg: &Message) -> Vec<String> {
    let mut lines: Vec<String> = msg.text.lines().map(str::to_string).collect();
    if let Some(card) = &msg.extra {
        lines.extend(card.text_lines().into_iter().map(|l| format!("  {}", l)));
    }
    lines
}
