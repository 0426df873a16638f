//! UI Components and Layout Module
//!
//! Reusable pieces shared by the browser view: the bottom bar with
//! context-aware shortcuts, the help overlay and the language picker.

use crate::app::{App, InputMode};
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph, Widget},
};

/// Renders the bottom bar: status message on the left, shortcuts on the right.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let status = match &app.message {
        Some(message) => Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(RosePine::FOAM),
        )),
        None => Line::from(Span::styled(
            format!(
                " {} of {} snippets ",
                app.visible_indices().len(),
                app.catalog.len()
            ),
            Style::default().fg(RosePine::SUBTLE),
        )),
    };

    let left = Paragraph::new(status).alignment(Alignment::Left).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
    );

    let right = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    left.render(chunks[0], frame.buffer_mut());
    right.render(chunks[1], frame.buffer_mut());
}

fn get_context_shortcuts(app: &App) -> String {
    match app.input_mode {
        InputMode::Search => " [type] Filter │ [⌫] Delete │ [^U] Clear │ [⏎/Esc] Done ".to_string(),
        InputMode::Tags => {
            " [←→] Move │ [Space] Toggle │ [x] Clear all │ [Esc] Done ".to_string()
        }
        InputMode::SelectLanguage => " [↑↓] Navigate │ [⏎] Select │ [Esc] Cancel ".to_string(),
        InputMode::HelpMenu => " [any key] Close ".to_string(),
        InputMode::Normal => {
            " [/] Search │ [l] Language │ [t] Tags │ [F] Favs only │ [y] Copy │ [f] ★ │ [J/K] Scroll │ [x] Clear │ [?] Help │ [q] Quit "
                .to_string()
        }
    }
}

/// A rectangle of the given size centered in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Floating list of languages, "All" first.
pub fn render_language_picker(frame: &mut Frame, app: &App) {
    let languages = app.catalog.languages();
    let height = (languages.len() as u16).saturating_add(2).min(20);
    let popup_area = centered_rect(36, height, frame.area());

    Clear.render(popup_area, frame.buffer_mut());

    let items: Vec<ListItem> = languages
        .iter()
        .map(|language| {
            let marker = if *language == app.state.criteria.language {
                "● "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(RosePine::GOLD)),
                Span::styled(language.clone(), Style::default().fg(RosePine::TEXT)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" Language ")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::IRIS))
                .style(Style::default().bg(RosePine::BASE)),
        )
        .highlight_style(Style::default().bg(RosePine::HIGHLIGHT_HIGH).bold())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.language_cursor));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

pub fn render_help_menu(frame: &mut Frame) {
    let popup_area = centered_rect(60, 20, frame.area());
    Clear.render(popup_area, frame.buffer_mut());

    let rows = [
        ("/", "Search titles, languages, tags and code"),
        ("l", "Pick a language"),
        ("t", "Tag mode: ←/→ move, Space toggles a chip"),
        ("F", "Show favorites only"),
        ("f", "Star or unstar the selected snippet"),
        ("y, c, ⏎", "Copy the selected snippet's code"),
        ("x", "Clear all filters"),
        ("j/k, ↑/↓", "Move the selection"),
        ("g/G", "First / last snippet"),
        ("J/K, PgDn/PgUp", "Scroll the code"),
        ("?", "Show this help"),
        ("q, Esc", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    lines.extend(rows.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", key), Style::default().fg(RosePine::GOLD).bold()),
            Span::styled(*description, Style::default().fg(RosePine::TEXT)),
        ])
    }));

    let help = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(RosePine::IRIS))
            .style(Style::default().bg(RosePine::BASE)),
    );
    help.render(popup_area, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }
}
