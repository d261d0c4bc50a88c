use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => app.follow_log(),
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('s') => app.export_transcript(),
            _ => {}
        }
        return;
    }

    let page = app.page_size();
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit(),

        // Input editing
        KeyCode::Backspace => app.widget.input_mut().backspace(),
        KeyCode::Delete => app.widget.input_mut().delete(),
        KeyCode::Left => app.widget.input_mut().move_left(),
        KeyCode::Right => app.widget.input_mut().move_right(),
        KeyCode::Home => app.widget.input_mut().move_home(),
        KeyCode::End => app.widget.input_mut().move_end(),
        KeyCode::Char(c) => app.widget.input_mut().insert(c),

        // Log scrolling
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(page),
        KeyCode::PageDown => app.scroll_down(page),

        _ => {}
    }
    app.follow_log();
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocron_core::{ChatWidget, HostPage, Message, SearchClient};

    fn app() -> App {
        let client = SearchClient::new("http://127.0.0.1:9").unwrap();
        let widget = ChatWidget::mount(&HostPage::complete(None, true), client)
            .unwrap()
            .unwrap();
        App::new(widget, std::env::temp_dir().join("holocron-test.html"))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.widget.log().is_empty());
        assert!(!app.widget.ui_state().docked);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_enter_submits_and_clears_input() {
        let mut app = app();
        type_text(&mut app, "yoda");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.widget.input().value(), "yoa");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.widget.log().entries(), &[Message::user("yoa")]);
        assert_eq!(app.widget.input().value(), "");
        assert!(app.widget.ui_state().hero_collapsed);
        assert!(app.is_loading());
    }

    #[test]
    fn test_quit_keys() {
        let mut first = app();
        handle_event(&mut first, AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(first.should_quit);

        let mut second = app();
        press(&mut second, KeyCode::Esc);
        assert!(second.should_quit);
    }
}
