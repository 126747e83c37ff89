use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::UsersState;
use crate::common::truncate_with_ellipsis;

pub fn render_users(
    frame: &mut Frame,
    area: Rect,
    users: &UsersState,
    loading: bool,
    spinner: &str,
) {
    let [status_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let status = if let Some(error) = &users.error {
        Span::styled(format!("Could not load users: {error}"), Style::default().fg(Color::Red))
    } else if loading {
        Span::styled(format!("{spinner} Loading users…"), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("{} people", users.users.len()),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);

    if users.users.is_empty() {
        if users.loaded && users.error.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Nobody else is here yet.",
                    Style::default().fg(Color::DarkGray),
                )),
                list_area,
            );
        }
        return;
    }

    let bio_width = usize::from(list_area.width.saturating_sub(4));
    let items: Vec<ListItem> = users
        .users
        .iter()
        .map(|user| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    user.display_name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" @{}", user.username), Style::default().fg(Color::DarkGray)),
            ])];
            if let Some(bio) = user.bio.as_deref().filter(|bio| !bio.trim().is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate_with_ellipsis(bio, bio_width)),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().fg(Color::Yellow));
    let mut state = ListState::default().with_selected(Some(users.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}
