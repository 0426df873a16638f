use crate::catalog::{Catalog, FilterMemo};
use crate::clipboard::{self, ClipboardSink, CopyFeedback};
use crate::highlight::Highlight;
use crate::models::{FavoritesStore, Snippet};
use crate::state::{self, Action, BrowserState};
use crate::ui;
use ratatui::{Frame, text::Line};
use std::cell::Cell;
use std::time::Instant;

/// Which control currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Tags,
    SelectLanguage,
    HelpMenu,
}

/// Highlighted code for the snippet shown in the card.
#[derive(Debug, Clone)]
pub struct Preview {
    pub snippet_id: String,
    pub lines: Vec<Line<'static>>,
}

/// Main Application State Container
///
/// Owns the catalog, the reducer state and the injected services. The
/// filter state only changes through [`App::dispatch`]; everything else here
/// is view state (selection, cursors, transient messages).
pub struct App {
    pub catalog: Catalog,
    pub state: BrowserState,
    pub input_mode: InputMode,
    pub selected: usize,
    pub tag_cursor: usize,
    pub language_cursor: usize,
    pub message: Option<String>,
    pub needs_redraw: bool,
    /// First code line shown in the card.
    pub code_scroll: usize,
    /// Code rows the card had on the last draw.
    code_viewport: Cell<usize>,
    visible: Vec<usize>,
    memo: FilterMemo,
    favorites_store: FavoritesStore,
    clipboard: Box<dyn ClipboardSink>,
    highlighter: Box<dyn Highlight>,
    copy_feedback: CopyFeedback,
    preview: Option<Preview>,
    highlight_runs: usize,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("input_mode", &self.input_mode)
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        catalog: Catalog,
        favorites_store: FavoritesStore,
        clipboard: Box<dyn ClipboardSink>,
        highlighter: Box<dyn Highlight>,
    ) -> Self {
        let favorites = favorites_store.load();

        let mut app = Self {
            catalog,
            state: BrowserState::new(favorites),
            input_mode: InputMode::Normal,
            selected: 0,
            tag_cursor: 0,
            language_cursor: 0,
            message: None,
            needs_redraw: true,
            code_scroll: 0,
            code_viewport: Cell::new(0),
            visible: Vec::new(),
            memo: FilterMemo::new(),
            favorites_store,
            clipboard,
            highlighter,
            copy_feedback: CopyFeedback::new(),
            preview: None,
            highlight_runs: 0,
        };

        app.refresh_visible();
        app
    }

    /// Applies one action and runs its side effects.
    pub fn dispatch(&mut self, action: Action) {
        let next = state::update(&self.state, action);
        if self.state.favorites_changed(&next) {
            self.favorites_store.persist(&next.favorites);
        }
        self.state = next;
        self.refresh_visible();
        self.needs_redraw = true;
    }

    fn refresh_visible(&mut self) {
        let previous = self.visible.get(self.selected).copied();
        self.visible = self
            .memo
            .get(&self.catalog, &self.state.criteria, &self.state.favorites)
            .to_vec();

        // Follow the selected snippet if it survived the filter.
        self.selected = match previous.and_then(|i| self.visible.iter().position(|&v| v == i)) {
            Some(position) => position,
            None if self.visible.is_empty() => 0,
            None => self.selected.min(self.visible.len() - 1),
        };

        // A card that left the list takes its "Copied" indicator with it.
        let copied_gone = self
            .copy_feedback
            .active_id()
            .is_some_and(|id| !self.visible_snippets().any(|s| s.id == id));
        if copied_gone {
            self.copy_feedback.cancel();
        }

        self.refresh_preview();
    }

    /// Re-highlights only when the previewed snippet changes.
    fn refresh_preview(&mut self) {
        let Some(snippet) = self.selected_snippet() else {
            self.preview = None;
            self.code_scroll = 0;
            return;
        };

        if self
            .preview
            .as_ref()
            .is_some_and(|p| p.snippet_id == snippet.id)
        {
            return;
        }

        let lines = self.highlighter.highlight(&snippet.code, &snippet.language);
        let snippet_id = snippet.id.clone();
        self.highlight_runs += 1;
        self.preview = Some(Preview { snippet_id, lines });
        self.code_scroll = 0;
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_snippets(&self) -> impl Iterator<Item = &Snippet> {
        self.visible.iter().filter_map(|&i| self.catalog.get(i))
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        self.visible
            .get(self.selected)
            .and_then(|&i| self.catalog.get(i))
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn highlight_runs(&self) -> usize {
        self.highlight_runs
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.favorites.contains(id)
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.copy_feedback.is_copied(id, Instant::now())
    }

    pub fn next_item(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
            self.refresh_preview();
        }
    }

    pub fn previous_item(&mut self) {
        if !self.visible.is_empty() {
            self.selected = if self.selected > 0 {
                self.selected - 1
            } else {
                self.visible.len() - 1
            };
            self.refresh_preview();
        }
    }

    pub fn first_item(&mut self) {
        self.selected = 0;
        self.refresh_preview();
    }

    pub fn last_item(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
        self.refresh_preview();
    }

    /// Largest useful scroll offset for the previewed code.
    fn max_code_scroll(&self) -> usize {
        let total = self.preview.as_ref().map_or(0, |p| p.lines.len());
        total.saturating_sub(self.code_viewport.get())
    }

    /// Records how many code rows the card shows; called while drawing.
    pub fn set_code_viewport(&self, rows: usize) {
        self.code_viewport.set(rows);
    }

    pub fn code_page(&self) -> usize {
        self.code_viewport.get().max(1)
    }

    pub fn scroll_code_down(&mut self, lines: usize) {
        self.code_scroll = (self.code_scroll + lines).min(self.max_code_scroll());
    }

    pub fn scroll_code_up(&mut self, lines: usize) {
        self.code_scroll = self.code_scroll.min(self.max_code_scroll()).saturating_sub(lines);
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(id) = self.selected_snippet().map(|s| s.id.clone()) {
            self.dispatch(Action::ToggleFavorite(id));
        }
    }

    /// Copies the selected snippet's code. Failures are only logged.
    pub fn copy_selected(&mut self) {
        self.copy_selected_at(Instant::now());
    }

    pub fn copy_selected_at(&mut self, now: Instant) {
        let Some(snippet) = self.selected_snippet() else {
            return;
        };
        let (id, code) = (snippet.id.clone(), snippet.code.clone());

        clipboard::copy_snippet(
            &mut *self.clipboard,
            &mut self.copy_feedback,
            &id,
            &code,
            now,
        );
        self.needs_redraw = true;
    }

    pub fn copied_at(&self, id: &str, now: Instant) -> bool {
        self.copy_feedback.is_copied(id, now)
    }

    pub fn open_language_picker(&mut self) {
        self.language_cursor = self
            .catalog
            .languages()
            .iter()
            .position(|l| *l == self.state.criteria.language)
            .unwrap_or(0);
        self.input_mode = InputMode::SelectLanguage;
    }

    pub fn move_language_cursor(&mut self, forward: bool) {
        let count = self.catalog.languages().len();
        if count == 0 {
            return;
        }
        self.language_cursor = if forward {
            (self.language_cursor + 1) % count
        } else {
            (self.language_cursor + count - 1) % count
        };
    }

    pub fn confirm_language(&mut self) {
        if let Some(language) = self.catalog.languages().get(self.language_cursor).cloned() {
            self.dispatch(Action::SetLanguage(language));
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn move_tag_cursor(&mut self, forward: bool) {
        let count = self.catalog.tags().len();
        if count == 0 {
            return;
        }
        self.tag_cursor = if forward {
            (self.tag_cursor + 1) % count
        } else {
            (self.tag_cursor + count - 1) % count
        };
    }

    pub fn toggle_tag_at_cursor(&mut self) {
        if let Some(tag) = self.catalog.tags().get(self.tag_cursor).cloned() {
            self.dispatch(Action::ToggleTag(tag));
        }
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(Action::ClearFilters);
        self.set_message("Filters cleared".to_string());
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_messages(&mut self) {
        self.message = None;
    }

    /// Called once per event-loop iteration.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.copy_feedback.tick(now) {
            self.needs_redraw = true;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        ui::browser::render(frame, self);
    }
}
