//! Rose Pine Color Palette Module
//! Based on the official Rose Pine theme: https://rosepinetheme.com/

use ratatui::style::{Color, Modifier, Style};

pub struct RosePine;

impl RosePine {
    pub const BASE: Color = Color::Rgb(25, 23, 36);
    pub const SURFACE: Color = Color::Rgb(31, 29, 46);
    pub const TEXT: Color = Color::Rgb(224, 222, 244);
    pub const SUBTLE: Color = Color::Rgb(144, 140, 170);
    pub const MUTED: Color = Color::Rgb(110, 106, 134);
    pub const LOVE: Color = Color::Rgb(235, 111, 146);
    pub const GOLD: Color = Color::Rgb(246, 193, 119);
    pub const FOAM: Color = Color::Rgb(156, 207, 216);
    pub const IRIS: Color = Color::Rgb(196, 167, 231);
    pub const HIGHLIGHT_HIGH: Color = Color::Rgb(82, 79, 103);
}

/// Border style for a panel, brighter when it has focus.
pub fn panel_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(RosePine::IRIS)
    } else {
        Style::default().fg(RosePine::HIGHLIGHT_HIGH)
    }
}

/// Style of a tag chip.
pub fn chip(active: bool, under_cursor: bool) -> Style {
    let style = if active {
        Style::default().fg(RosePine::BASE).bg(RosePine::GOLD)
    } else {
        Style::default().fg(RosePine::GOLD).bg(RosePine::SURFACE)
    };

    if under_cursor {
        style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        style
    }
}
