//! Post view shared by the feed and the profile.
//!
//! A post list owns the selection and an optional comment draft for the
//! selected post. Likes and comments go through the API and then the
//! parent list is re-fetched, so counts always come from the server.

use crossterm::event::{KeyCode, KeyEvent};
use plaza_core::models::{Id, Post};
use plaza_core::validate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks, TextField, plural};
use crate::effects::{PostAction, PostOrigin, UiEffect};
use crate::overlays::render_utils::{InputLine, render_input_line};

#[derive(Debug, Default)]
pub struct PostListState {
    pub posts: Vec<Post>,
    pub selected: usize,
    /// Comment being written for the selected post.
    pub comment: Option<TextField>,
}

impl PostListState {
    /// Replaces the list, keeping the selection in range.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.selected = self.selected.min(self.posts.len().saturating_sub(1));
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn is_commenting(&self) -> bool {
        self.comment.is_some()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.posts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Effect toggling the viewer's like on `post`.
///
/// Liked posts get an unlike, everything else a like; the decision uses the
/// normalized likes collection so every server shape behaves the same.
pub fn like_toggle(post: &Post, viewer: &Id, task: TaskId, origin: PostOrigin) -> UiEffect {
    let action = if post.liked_by(viewer) {
        PostAction::Unlike
    } else {
        PostAction::Like
    };
    UiEffect::PostAction {
        task,
        origin,
        action,
        post_id: post.id.clone(),
        content: None,
    }
}

/// One like, unlike or comment at a time, and none until the list re-fetch
/// that follows it has landed; before that the like state on screen is stale.
fn is_busy(tasks: &Tasks, origin: PostOrigin) -> bool {
    tasks.is_running(TaskKind::PostAction) || tasks.is_running(origin.refresh_task())
}

/// Handles post-list keys. Returns `None` when the key is not for the list.
pub fn handle_key(
    list: &mut PostListState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    origin: PostOrigin,
    key: KeyEvent,
) -> Option<Vec<UiEffect>> {
    if let Some(draft) = list.comment.as_mut() {
        return Some(match key.code {
            KeyCode::Esc => {
                list.comment = None;
                vec![]
            }
            KeyCode::Enter => submit_comment(list, tasks, seq, origin),
            _ => {
                draft.handle_key(key);
                vec![]
            }
        });
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => list.select_next(),
        KeyCode::Up | KeyCode::Char('k') => list.select_prev(),
        KeyCode::Char('l') => {
            let (Some(post), Some(viewer)) = (list.selected_post(), viewer) else {
                return Some(vec![]);
            };
            if is_busy(tasks, origin) {
                return Some(vec![]);
            }
            let task = tasks.start(seq, TaskKind::PostAction);
            return Some(vec![like_toggle(post, viewer, task, origin)]);
        }
        KeyCode::Char('c') => {
            if list.selected_post().is_some() {
                list.comment = Some(TextField::default());
            }
        }
        _ => return None,
    }
    Some(vec![])
}

fn submit_comment(
    list: &mut PostListState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    origin: PostOrigin,
) -> Vec<UiEffect> {
    let Some(draft) = list.comment.as_ref() else {
        return vec![];
    };
    if validate::content(draft.value()).is_some() || is_busy(tasks, origin) {
        return vec![];
    }
    let Some(post) = list.selected_post() else {
        return vec![];
    };
    let content = draft.value().trim().to_string();
    let post_id = post.id.clone();

    let task = tasks.start(seq, TaskKind::PostAction);
    vec![UiEffect::PostAction {
        task,
        origin,
        action: PostAction::Comment,
        post_id,
        content: Some(content),
    }]
}

// ============================================================================
// Rendering
// ============================================================================

/// Lines for one post card.
pub fn post_lines(post: &Post, viewer: Option<&Id>, selected: bool) -> Vec<Line<'static>> {
    let liked = viewer.is_some_and(|viewer| post.liked_by(viewer));
    let marker = if selected { "▌ " } else { "  " };
    let marker_style = Style::default().fg(Color::Yellow);

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(
            post.author_name().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            post.author
                .as_ref()
                .map(|author| format!(" @{}", author.username))
                .unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    for text in post.content.lines() {
        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::raw(text.to_string()),
        ]));
    }

    if let Some(image) = &post.image {
        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(format!("[image] {image}"), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let heart = if liked {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        Span::styled(marker, marker_style),
        heart,
        Span::raw(plural(post.likes.len(), "like", "likes")),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::raw(plural(post.comments.len(), "comment", "comments")),
    ]));

    if selected {
        for comment in &post.comments {
            let author = comment
                .author
                .as_ref()
                .map_or("unknown", |author| author.display_name());
            lines.push(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(format!("  {author}: "), Style::default().fg(Color::Cyan)),
                Span::raw(comment.content.clone()),
            ]));
        }
    }

    lines.push(Line::default());
    lines
}

/// Renders the list, scrolled so the selected post is visible, with the
/// comment input underneath while a comment is being written.
pub fn render_post_list(frame: &mut Frame, area: Rect, list: &PostListState, viewer: Option<&Id>) {
    let [area, comment_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(u16::from(list.is_commenting())),
    ])
    .areas(area);

    let mut lines = Vec::new();
    let mut selected_top = 0;
    for (i, post) in list.posts.iter().enumerate() {
        if i == list.selected {
            selected_top = lines.len();
        }
        lines.extend(post_lines(post, viewer, i == list.selected));
    }

    let scroll = selected_top.saturating_sub(usize::from(area.height) / 3);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );

    if let Some(draft) = &list.comment {
        render_input_line(
            frame,
            comment_area,
            &InputLine {
                field: draft,
                placeholder: Some("Write a comment, Enter to send"),
                prompt: "comment> ",
                focused: true,
                masked: false,
                prompt_color: Color::Yellow,
                text_color: Color::White,
            },
        );
    }
}
