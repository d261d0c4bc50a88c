use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use holocron_core::Role;
use crate::app::{message_lines, role_label, App};

const HERO_HEIGHT: u16 = 7;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let ui_state = app.widget.ui_state();
    let hero_height = if app.widget.has_hero() && !ui_state.hero_collapsed {
        HERO_HEIGHT
    } else {
        0
    };

    // Main layout: header, hero (until docked), chat, input, footer
    let [header_area, hero_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(hero_height),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    if hero_height > 0 {
        render_hero(frame, hero_area);
    }
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Holocron ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.widget.endpoint().to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            "ARCHIVO HOLOCRON",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("Pregunta por un personaje, una especie o una película."),
        Line::from(Span::styled(
            "Prueba con \"Luke Skywalker\" o \"wookiee\".",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ]);
    let hero = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)));
    frame.render_widget(hero, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Chat ");

    let chat_text = if app.widget.log().is_empty() && !app.is_loading() {
        Text::from(Span::styled(
            "Escribe tu consulta y pulsa Enter...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in app.widget.log().entries() {
            let role_style = match msg.role {
                Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Role::Bot => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            };
            lines.push(Line::from(Span::styled(role_label(msg.role), role_style)));

            let text_line_count = msg.text.lines().count();
            for (i, line) in message_lines(msg).into_iter().enumerate() {
                if i < text_line_count {
                    lines.push(Line::from(line));
                } else {
                    // Card lines
                    lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Magenta))));
                }
            }
            lines.push(Line::default());
        }

        if app.is_loading() {
            lines.push(Line::from(Span::styled(
                role_label(Role::Bot),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Buscando{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let input = app.widget.input();
    let border_color = if input.is_focused() { Color::Yellow } else { Color::DarkGray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Consulta ");

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = input.cursor();

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = input
        .value()
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let paragraph = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(paragraph, area);

    if input.is_focused() {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" buscar ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" desplazar ", label_style),
        Span::styled(" ^S ", key_style),
        Span::styled(" guardar ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" salir ", label_style),
    ];

    if let Some(status) = &app.status {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
