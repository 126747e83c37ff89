//! Navigation bar: the three signed-in tabs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Feed,
    Users,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Feed, Tab::Users, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Feed => "Feed",
            Tab::Users => "Users",
            Tab::Profile => "Profile",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Feed => 0,
            Tab::Users => 1,
            Tab::Profile => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tab bound to a digit key (`1`..`3`).
    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Tab::Feed),
            '2' => Some(Tab::Users),
            '3' => Some(Tab::Profile),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct NavState {
    pub active: Tab,
}

/// Renders the tab bar with the signed-in identity on the right.
pub fn render_nav(frame: &mut Frame, area: Rect, nav: &NavState, username: &str) {
    let titles = Tab::ALL.iter().enumerate().map(|(i, tab)| {
        Line::from(vec![
            Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::raw(tab.title()),
        ])
    });

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(
            Line::from(vec![
                Span::styled(
                    "plaza",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  @{username} "), Style::default().fg(Color::Cyan)),
            ])
            .right_aligned(),
        );

    let tabs = Tabs::new(titles)
        .block(block)
        .select(nav.active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));

    frame.render_widget(tabs, area);
}
