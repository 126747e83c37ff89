use plaza_core::models::Id;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::FeedState;
use crate::features::post::render_post_list;
use crate::overlays::render_utils::{InputLine, render_input_line};

pub fn render_feed(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedState,
    viewer: Option<&Id>,
    loading: bool,
    spinner: &str,
) {
    let [composer_area, status_area, list_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let border = if feed.composing { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" What's happening? ");
    let inner = block.inner(composer_area);
    frame.render_widget(block, composer_area);
    render_input_line(
        frame,
        inner,
        &InputLine {
            field: &feed.composer,
            placeholder: Some(if feed.composing {
                "Write a post, Enter to publish"
            } else {
                "Press n to write a post"
            }),
            prompt: "",
            focused: feed.composing,
            masked: false,
            prompt_color: Color::DarkGray,
            text_color: Color::White,
        },
    );

    let status = if let Some(error) = &feed.error {
        Span::styled(format!("Could not load feed: {error}"), Style::default().fg(Color::Red))
    } else if loading {
        Span::styled(format!("{spinner} Loading feed…"), Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);

    if feed.list.posts.is_empty() {
        if feed.loaded && feed.error.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No posts yet. Be the first to share something.",
                    Style::default().fg(Color::DarkGray),
                )),
                list_area,
            );
        }
        return;
    }

    render_post_list(frame, list_area, &feed.list, viewer);
}
