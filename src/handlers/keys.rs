//! Keyboard Input Handling Module
//!
//! Translates terminal key events into reducer actions and view-state
//! changes. Returns `true` when the application should quit.

use crate::app::{App, InputMode};
use crate::state::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main keyboard event handler and dispatcher
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    // Windows reports both press and release.
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    app.needs_redraw = true;

    match app.input_mode {
        InputMode::Search => handle_search_keys(key, app),
        InputMode::Tags => handle_tag_keys(key, app),
        InputMode::SelectLanguage => handle_language_keys(key, app),
        InputMode::HelpMenu => {
            app.input_mode = InputMode::Normal;
            false
        }
        InputMode::Normal => handle_normal_keys(key, app),
    }
}

fn handle_normal_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,

        KeyCode::Char('?') => {
            app.clear_messages();
            app.input_mode = InputMode::HelpMenu;
        }

        KeyCode::Char('/') => {
            app.clear_messages();
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('l') => {
            app.clear_messages();
            app.open_language_picker();
        }
        KeyCode::Char('t') => {
            app.clear_messages();
            if app.catalog.tags().is_empty() {
                app.set_message("No tags in this catalog".to_string());
            } else {
                app.input_mode = InputMode::Tags;
            }
        }

        KeyCode::Char('F') => {
            app.dispatch(Action::ToggleOnlyFavorites);
            let status = if app.state.criteria.only_favorites {
                "on"
            } else {
                "off"
            };
            app.set_message(format!("Favorites only: {}", status));
        }
        KeyCode::Char('f') => {
            app.clear_messages();
            app.toggle_selected_favorite();
        }
        KeyCode::Char('y') | KeyCode::Char('c') | KeyCode::Enter => {
            app.clear_messages();
            app.copy_selected();
        }
        KeyCode::Char('x') => app.clear_filters(),

        KeyCode::Down | KeyCode::Char('j') => app.next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
        KeyCode::Home | KeyCode::Char('g') => app.first_item(),
        KeyCode::End | KeyCode::Char('G') => app.last_item(),

        KeyCode::Char('J') => app.scroll_code_down(1),
        KeyCode::Char('K') => app.scroll_code_up(1),
        KeyCode::PageDown => app.scroll_code_down(app.code_page()),
        KeyCode::PageUp => app.scroll_code_up(app.code_page()),

        _ => {}
    }
    false
}

/// Live search: every edit re-filters immediately.
fn handle_search_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.dispatch(Action::PopQueryChar),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(Action::SetQuery(String::new()));
        }
        KeyCode::Char(c) => app.dispatch(Action::PushQueryChar(c)),
        KeyCode::Down => app.next_item(),
        KeyCode::Up => app.previous_item(),
        _ => {}
    }
    false
}

fn handle_tag_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.move_tag_cursor(true),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.move_tag_cursor(false),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_tag_at_cursor(),
        KeyCode::Char('x') => app.clear_filters(),
        KeyCode::Down | KeyCode::Char('j') => app.next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
        _ => {}
    }
    false
}

fn handle_language_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.input_mode = InputMode::Normal,
        KeyCode::Down | KeyCode::Char('j') => app.move_language_cursor(true),
        KeyCode::Up | KeyCode::Char('k') => app.move_language_cursor(false),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_language(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::clipboard::tests::RecordingClipboard;
    use crate::highlight::PlainHighlighter;
    use crate::models::{FavoritesStore, MemoryStore, Snippet};

    fn app() -> App {
        App::new(
            Catalog::new(vec![
                Snippet::new("a", "Quicksort", "Python", &["sort"], "def qs(): ..."),
                Snippet::new("b", "Sort slice", "Go", &["sort", "cli"], "sort.Slice()"),
            ]),
            FavoritesStore::new(Box::new(MemoryStore::new())),
            Box::new(RecordingClipboard::default()),
            Box::new(PlainHighlighter),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn search_mode_filters_while_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);

        type_str(&mut app, "slicex");
        assert!(app.visible_indices().is_empty());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.visible_indices(), &[1]);

        // 'q' is text while searching, not quit
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state.criteria.query, "sliceq");

        handle_key_events(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert_eq!(app.state.criteria.query, "");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn favorites_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('F'));
        assert!(app.visible_indices().is_empty());
        press(&mut app, KeyCode::Char('F'));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('f'));
        assert!(app.is_favorite("b"));
    }

    #[test]
    fn tag_mode_toggles_and_leaves() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.input_mode, InputMode::Tags);

        // tags: cli, sort
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.visible_indices(), &[1]);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.visible_indices(), &[0, 1]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn shift_j_and_k_scroll_the_code() {
        let mut app = App::new(
            Catalog::new(vec![Snippet::new("a", "Lines", "Go", &[], "1\n2\n3\n4\n5")]),
            FavoritesStore::new(Box::new(MemoryStore::new())),
            Box::new(RecordingClipboard::default()),
            Box::new(PlainHighlighter),
        );
        app.set_code_viewport(2);

        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.code_scroll, 2);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.code_scroll, 3);
        press(&mut app, KeyCode::Char('K'));
        assert_eq!(app.code_scroll, 2);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.code_scroll, 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(handle_key_events(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app
        ));
    }
}
