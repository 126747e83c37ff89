use plaza_core::models::Id;
use plaza_core::validate::{BIO_MAX_LEN, ProfileField};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{EditDraft, ProfileMode, ProfileState};
use crate::common::plural;
use crate::features::post::render_post_list;
use crate::overlays::render_utils::{InputLine, render_input_line};

pub fn render_profile(
    frame: &mut Frame,
    area: Rect,
    profile: &ProfileState,
    viewer: Option<&Id>,
    loading: bool,
    spinner: &str,
) {
    let Some(user) = &profile.user else {
        let message = match (&profile.error, loading) {
            (Some(error), _) => Span::styled(
                format!("Could not load profile: {error}"),
                Style::default().fg(Color::Red),
            ),
            (None, true) => Span::styled(
                format!("{spinner} Loading profile…"),
                Style::default().fg(Color::Yellow),
            ),
            (None, false) => {
                Span::styled("No profile selected.", Style::default().fg(Color::DarkGray))
            }
        };
        frame.render_widget(Paragraph::new(Line::from(message)), area);
        return;
    };

    let header_height = match profile.mode {
        ProfileMode::Edit(_) => 7,
        ProfileMode::View | ProfileMode::Avatar(_) => 6,
    };
    let [header_area, list_area] =
        Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).areas(area);

    let owner = profile.is_owner(viewer);
    let title = if owner { " Your profile " } else { " Profile " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(header_area);
    frame.render_widget(block, header_area);

    match &profile.mode {
        ProfileMode::Edit(draft) => render_editor(frame, inner, draft),
        ProfileMode::View | ProfileMode::Avatar(_) => {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    user.display_name().to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" @{}", user.username), Style::default().fg(Color::DarkGray)),
            ])];
            lines.push(Line::from(Span::raw(
                user.bio
                    .clone()
                    .filter(|bio| !bio.trim().is_empty())
                    .unwrap_or_else(|| "No bio yet.".to_string()),
            )));
            let avatar = user
                .avatar
                .as_deref()
                .map_or_else(|| "no avatar".to_string(), |path| format!("avatar: {path}"));
            lines.push(Line::from(Span::styled(avatar, Style::default().fg(Color::DarkGray))));
            let status = match (&profile.error, loading) {
                (Some(error), _) => Span::styled(
                    format!("Refresh failed: {error}"),
                    Style::default().fg(Color::Red),
                ),
                (None, true) => Span::styled(
                    format!("{spinner} Refreshing…"),
                    Style::default().fg(Color::Yellow),
                ),
                (None, false) => Span::styled(
                    plural(profile.list.posts.len(), "post", "posts"),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            lines.push(Line::from(status));
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

            if let ProfileMode::Avatar(path) = &profile.mode {
                let row = Rect::new(
                    inner.x,
                    inner.y + inner.height.saturating_sub(1),
                    inner.width,
                    1,
                );
                render_input_line(
                    frame,
                    row,
                    &InputLine {
                        field: path,
                        placeholder: Some("Path to an image file"),
                        prompt: "avatar> ",
                        focused: true,
                        masked: false,
                        prompt_color: Color::Yellow,
                        text_color: Color::White,
                    },
                );
            }
        }
    }

    if profile.list.posts.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No posts yet.", Style::default().fg(Color::DarkGray))),
            list_area,
        );
    } else {
        render_post_list(frame, list_area, &profile.list, viewer);
    }
}

fn render_editor(frame: &mut Frame, area: Rect, draft: &EditDraft) {
    let rows = Layout::vertical([Constraint::Length(1); 5]).split(area);
    let fields = [
        (ProfileField::Name, "   Name ", &draft.name, rows[0], rows[1]),
        (ProfileField::Bio, "    Bio ", &draft.bio, rows[2], rows[3]),
    ];
    for (field, prompt, value, input_row, error_row) in fields {
        let focused = draft.focus == field;
        render_input_line(
            frame,
            input_row,
            &InputLine {
                field: value,
                placeholder: None,
                prompt,
                focused,
                masked: false,
                prompt_color: if focused { Color::Yellow } else { Color::DarkGray },
                text_color: Color::White,
            },
        );
        if let Some(error) = draft.errors.get(field) {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{:>8}{error}", ""),
                    Style::default().fg(Color::Red),
                )),
                error_row,
            );
        }
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{:>8}{} / {} characters", "", draft.bio.value().chars().count(), BIO_MAX_LEN),
            Style::default().fg(Color::DarkGray),
        )),
        rows[4],
    );
}
