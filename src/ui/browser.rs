use crate::app::{App, InputMode};
use crate::highlight::plain_lines;
use crate::models::{Snippet, language};
use crate::ui::colors::{self, RosePine};
use crate::ui::components::{render_bottom_bar, render_help_menu, render_language_picker};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Widget, Wrap,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NO_RESULTS: &str = "No snippets match your filters.";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(RosePine::BASE)), area);

    let chips = chip_lines(app, area.width.saturating_sub(2) as usize);
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(chips.len() as u16 + 2),
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(area);

    render_header(frame, chunks[0]);
    render_controls(frame, chunks[1], app);
    render_tag_chips(frame, chunks[2], app, chips);

    let main = Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[3]);
    render_snippet_list(frame, main[0], app);
    render_snippet_card(frame, main[1], app);

    Paragraph::new("Tips: Use the search to match titles, tags, language, and code.")
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::MUTED))
        .render(chunks[4], frame.buffer_mut());

    render_bottom_bar(frame, chunks[5], app);

    match app.input_mode {
        InputMode::SelectLanguage => render_language_picker(frame, app),
        InputMode::HelpMenu => render_help_menu(frame),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Code Snippet Library",
            Style::default().fg(RosePine::IRIS).bold(),
        )),
        Line::from(Span::styled(
            " Search snippets by keyword, language, or tag. Press y to copy.",
            Style::default().fg(RosePine::SUBTLE),
        )),
    ];
    Paragraph::new(lines).render(area, frame.buffer_mut());
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(24),
        Constraint::Length(22),
    ])
    .split(area);

    let searching = app.input_mode == InputMode::Search;
    let query = &app.state.criteria.query;
    let search_text = if query.is_empty() && !searching {
        Span::styled(
            "Search by keyword, tag, or code... (/)",
            Style::default().fg(RosePine::MUTED),
        )
    } else {
        Span::styled(query.clone(), Style::default().fg(RosePine::GOLD).bold())
    };

    let search_block = Block::bordered()
        .title(" Search ")
        .border_type(BorderType::Rounded)
        .border_style(colors::panel_border(searching));
    let search_inner = search_block.inner(chunks[0]);
    Paragraph::new(Line::from(search_text))
        .block(search_block)
        .render(chunks[0], frame.buffer_mut());

    if searching {
        let offset = query.width().min(search_inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position(Position {
            x: search_inner.x + offset,
            y: search_inner.y,
        });
    }

    Paragraph::new(Line::from(vec![
        Span::styled(
            app.state.criteria.language.clone(),
            Style::default().fg(RosePine::FOAM),
        ),
        Span::styled(" ▾", Style::default().fg(RosePine::MUTED)),
    ]))
    .block(
        Block::bordered()
            .title(" Language (l) ")
            .border_type(BorderType::Rounded)
            .border_style(colors::panel_border(
                app.input_mode == InputMode::SelectLanguage,
            )),
    )
    .render(chunks[1], frame.buffer_mut());

    let checkbox = if app.state.criteria.only_favorites {
        "[x]"
    } else {
        "[ ]"
    };
    Paragraph::new(Line::from(vec![
        Span::styled(checkbox, Style::default().fg(RosePine::LOVE)),
        Span::styled(" Favorites only", Style::default().fg(RosePine::TEXT)),
    ]))
    .block(
        Block::bordered()
            .title(" (F) ")
            .border_type(BorderType::Rounded)
            .border_style(colors::panel_border(false)),
    )
    .render(chunks[2], frame.buffer_mut());
}

/// Packs the tag chips and the Clear chip into rows of at most `width`
/// columns. A chip is never split across rows.
fn chip_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let in_tag_mode = app.input_mode == InputMode::Tags;
    let mut chips: Vec<Span<'static>> = app
        .catalog
        .tags()
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let active = app.state.criteria.is_tag_active(tag);
            let under_cursor = in_tag_mode && i == app.tag_cursor;
            Span::styled(format!(" {} ", tag), colors::chip(active, under_cursor))
        })
        .collect();
    chips.push(Span::styled(
        " Clear (x) ",
        Style::default().fg(RosePine::LOVE).bg(RosePine::SURFACE),
    ));

    let mut lines = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for chip in chips {
        let chip_width = chip.width();
        if !row.is_empty() && used + 1 + chip_width > width {
            lines.push(Line::from(std::mem::take(&mut row)));
            used = 0;
        }
        if !row.is_empty() {
            row.push(Span::raw(" "));
            used += 1;
        }
        used += chip_width;
        row.push(chip);
    }
    lines.push(Line::from(row));
    lines
}

fn render_tag_chips(frame: &mut Frame, area: Rect, app: &App, chips: Vec<Line<'static>>) {
    let in_tag_mode = app.input_mode == InputMode::Tags;

    Paragraph::new(chips)
        .block(
            Block::bordered()
                .title(" Tags (t) ")
                .border_type(BorderType::Rounded)
                .border_style(colors::panel_border(in_tag_mode)),
        )
        .render(area, frame.buffer_mut());
}

fn render_snippet_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(format!(" Snippets ({}) ", app.visible_indices().len()))
        .border_type(BorderType::Rounded)
        .border_style(colors::panel_border(app.input_mode == InputMode::Normal));

    if app.visible_indices().is_empty() {
        Paragraph::new(NO_RESULTS)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::MUTED))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    // Borders, highlight symbol, star and badge.
    let title_width = (area.width as usize).saturating_sub(2 + 2 + 2 + 9);

    let items: Vec<ListItem> = app
        .visible_snippets()
        .map(|snippet| {
            let star = if app.is_favorite(&snippet.id) { "★ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(star, Style::default().fg(RosePine::LOVE)),
                Span::styled(
                    truncate(&snippet.title, title_width),
                    Style::default().fg(RosePine::TEXT),
                ),
                Span::styled(
                    format!(" {}", language::short_name(&snippet.language)),
                    Style::default().fg(RosePine::FOAM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(RosePine::HIGHLIGHT_HIGH)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_snippet_card(frame: &mut Frame, area: Rect, app: &App) {
    let Some(snippet) = app.selected_snippet() else {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(colors::panel_border(false))
            .render(area, frame.buffer_mut());
        return;
    };

    let block = Block::bordered()
        .title(Line::from(Span::styled(
            format!(" {} ", snippet.title),
            Style::default().fg(RosePine::TEXT).bold(),
        )))
        .title(
            Line::from(Span::styled(
                format!(" {} ", snippet.language),
                Style::default().fg(RosePine::BASE).bg(RosePine::FOAM),
            ))
            .right_aligned(),
        )
        .border_type(BorderType::Rounded)
        .border_style(colors::panel_border(false));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(inner);

    Paragraph::new(Span::styled(
        snippet.get_tags_display_string(),
        Style::default().fg(RosePine::GOLD),
    ))
    .render(chunks[0], frame.buffer_mut());

    render_code_block(frame, chunks[1], app, snippet);
    render_card_buttons(frame, chunks[2], app, snippet);
}

fn render_code_block(frame: &mut Frame, area: Rect, app: &App, snippet: &Snippet) {
    let lines: Vec<Line> = match app.preview() {
        Some(preview) if preview.snippet_id == snippet.id => preview.lines.clone(),
        _ => plain_lines(&snippet.code),
    };

    let total_lines = lines.len();
    let visible_lines = area.height as usize;
    app.set_code_viewport(visible_lines);

    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll_position = app.code_scroll.min(max_scroll);

    let content_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let scrollbar_area = Rect {
        x: area.x + area.width.saturating_sub(1),
        y: area.y,
        width: 1,
        height: area.height,
    };

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(scroll_position)
        .take(visible_lines)
        .collect();

    Block::default()
        .style(Style::default().bg(RosePine::SURFACE))
        .render(area, frame.buffer_mut());
    Paragraph::new(visible)
        .style(Style::default().bg(RosePine::SURFACE).fg(RosePine::TEXT))
        .render(content_area, frame.buffer_mut());

    if total_lines > visible_lines {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll + 1)
            .position(scroll_position);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .style(Style::default().fg(RosePine::SUBTLE))
            .thumb_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn render_card_buttons(frame: &mut Frame, area: Rect, app: &App, snippet: &Snippet) {
    let (copy_label, copy_style) = if app.is_copied(&snippet.id) {
        (" Copied ", Style::default().fg(RosePine::BASE).bg(RosePine::FOAM))
    } else {
        (" Copy ", Style::default().fg(RosePine::TEXT).bg(RosePine::HIGHLIGHT_HIGH))
    };
    let star = if app.is_favorite(&snippet.id) { " ★ " } else { " ☆ " };

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} lines  ", snippet.get_line_count()),
            Style::default().fg(RosePine::MUTED),
        ),
        Span::styled(copy_label, copy_style),
        Span::raw(" "),
        Span::styled(star, Style::default().fg(RosePine::LOVE).bg(RosePine::HIGHLIGHT_HIGH)),
    ]))
    .alignment(Alignment::Right)
    .render(area, frame.buffer_mut());
}

/// Cuts `text` to at most `max_width` columns, ending in "…" when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::clipboard::tests::RecordingClipboard;
    use crate::highlight::{PlainHighlighter, SyntectHighlighter};
    use crate::models::{FavoritesStore, MemoryStore, snippet};
    use crate::state::Action;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        App::new(
            Catalog::new(vec![
                Snippet::new("a", "Quicksort", "Python", &["sort"], "def qs(xs):\n    return xs"),
                Snippet::new("b", "Sort slice", "Go", &["sort", "cli"], "sort.Slice()"),
            ]),
            FavoritesStore::new(Box::new(MemoryStore::new())),
            Box::new(RecordingClipboard::default()),
            Box::new(PlainHighlighter),
        )
    }

    fn bundled_app() -> App {
        App::new(
            Catalog::new(snippet::load_bundled().unwrap()),
            FavoritesStore::new(Box::new(MemoryStore::new())),
            Box::new(RecordingClipboard::default()),
            Box::new(SyntectHighlighter::default()),
        )
    }

    fn select(app: &mut App, id: &str) {
        app.first_item();
        while app.selected_snippet().is_some_and(|s| s.id != id) {
            app.next_item();
        }
    }

    fn screen(app: &App) -> String {
        screen_sized(app, 100, 30)
    }

    fn screen_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn renders_cards_and_chips() {
        let text = screen(&app());
        assert!(text.contains("Code Snippet Library"));
        assert!(text.contains("Quicksort"));
        assert!(text.contains(" cli "));
        assert!(text.contains("def qs(xs):"));
        assert!(text.contains(" Copy "));
    }

    #[test]
    fn renders_no_results_state() {
        let mut app = app();
        app.dispatch(Action::SetOnlyFavorites(true));
        let text = screen(&app);
        assert!(text.contains(NO_RESULTS));
        assert!(text.contains("[x] Favorites only"));
    }

    #[test]
    fn shows_copied_after_copy() {
        let mut app = app();
        app.copy_selected();
        assert!(screen(&app).contains(" Copied "));
    }

    #[test]
    fn every_chip_fits_on_a_narrow_terminal() {
        let mut app = bundled_app();
        app.input_mode = InputMode::Tags;
        while app.catalog.tags().get(app.tag_cursor).map(String::as_str) != Some("window-functions")
        {
            app.move_tag_cursor(true);
        }
        app.toggle_tag_at_cursor();
        assert!(app.state.criteria.is_tag_active("window-functions"));

        let text = screen(&app);
        assert!(text.contains(" window-functions "));
        assert!(text.contains(" Clear (x) "));
        for tag in app.catalog.tags() {
            assert!(text.contains(&format!(" {} ", tag)), "missing chip {}", tag);
        }
    }

    #[test]
    fn tabs_never_reach_the_buffer() {
        let mut app = bundled_app();
        select(&mut app, "go-sort-slice");

        let text = screen(&app);
        assert!(!text.contains('\t'));
        assert!(text.contains("    return people[i].Age < people[j].Age"));
    }

    #[test]
    fn long_code_scrolls_to_the_last_line() {
        let mut app = bundled_app();
        select(&mut app, "go-http-server");

        let before = screen_sized(&app, 100, 24);
        assert!(before.contains("package main"));
        assert!(!before.contains("ListenAndServe"));

        app.scroll_code_down(app.code_page() * 4);
        let after = screen_sized(&app, 100, 24);
        assert!(after.contains("ListenAndServe"));
        assert!(!after.contains("package main"));
    }
}
