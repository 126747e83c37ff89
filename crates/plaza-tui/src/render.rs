//! Top-level rendering. Pure: reads state, draws a frame.

use plaza_core::models::User;
use plaza_core::session::SessionState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::TaskKind;
use crate::features::auth::render_auth;
use crate::features::feed::render_feed;
use crate::features::nav::{Tab, render_nav};
use crate::features::profile::{ProfileMode, render_profile};
use crate::features::users::render_users;
use crate::overlays::render_utils::{InputHint, centered_rect, hint_spans};
use crate::state::{AppState, TuiState};

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tui = &app.tui;

    match &tui.session {
        SessionState::Loading => render_splash(frame, area, tui),
        SessionState::Anonymous => render_auth(
            frame,
            area,
            &tui.auth,
            tui.tasks.is_running(TaskKind::Auth),
            tui.spinner(),
        ),
        SessionState::Authenticated(user) => render_main(frame, area, tui, user),
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn render_splash(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let rect = centered_rect(48, 1, area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", tui.spinner()), Style::default().fg(Color::Yellow)),
            Span::raw(format!("Connecting to {}", tui.base_url)),
        ])),
        rect,
    );
}

fn render_main(frame: &mut Frame, area: Rect, tui: &TuiState, user: &User) {
    let [nav_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_nav(frame, nav_area, &tui.nav, &user.username);

    let viewer = Some(&user.id);
    let spinner = tui.spinner();
    match tui.nav.active {
        Tab::Feed => render_feed(
            frame,
            body_area,
            &tui.feed,
            viewer,
            tui.tasks.is_running(TaskKind::Feed),
            spinner,
        ),
        Tab::Users => render_users(
            frame,
            body_area,
            &tui.users,
            tui.tasks.is_running(TaskKind::Users),
            spinner,
        ),
        Tab::Profile => render_profile(
            frame,
            body_area,
            &tui.profile,
            viewer,
            tui.tasks.is_running(TaskKind::Profile),
            spinner,
        ),
    }

    render_status_line(frame, status_area, tui);
}

fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let hints = status_hints(tui);
    let mut spans = hint_spans(&hints, Color::Yellow);
    let busy = [
        (TaskKind::CreatePost, "publishing"),
        (TaskKind::PostAction, "saving"),
        (TaskKind::Follow, "following"),
        (TaskKind::ProfileUpdate, "saving profile"),
        (TaskKind::AvatarUpload, "uploading"),
        (TaskKind::Logout, "signing out"),
    ]
    .into_iter()
    .find(|(kind, _)| tui.tasks.is_running(*kind));
    if let Some((_, label)) = busy {
        spans.insert(
            0,
            Span::styled(
                format!("{} {label}  ", tui.spinner()),
                Style::default().fg(Color::Yellow),
            ),
        );
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_hints(tui: &TuiState) -> Vec<InputHint<'static>> {
    let post_hints = [
        InputHint::new("↑↓", "select"),
        InputHint::new("l", "like"),
        InputHint::new("c", "comment"),
    ];
    let global = [
        InputHint::new("1-3", "tabs"),
        InputHint::new("L", "sign out"),
        InputHint::new("q", "quit"),
    ];

    match tui.nav.active {
        Tab::Feed if tui.feed.composing => {
            vec![InputHint::new("Enter", "publish"), InputHint::new("Esc", "cancel")]
        }
        Tab::Profile if matches!(tui.profile.mode, ProfileMode::Edit(_)) => vec![
            InputHint::new("Tab", "next field"),
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ],
        Tab::Profile if matches!(tui.profile.mode, ProfileMode::Avatar(_)) => {
            vec![InputHint::new("Enter", "upload"), InputHint::new("Esc", "cancel")]
        }
        Tab::Feed | Tab::Profile if tui.is_editing() => {
            vec![InputHint::new("Enter", "send"), InputHint::new("Esc", "cancel")]
        }
        Tab::Feed => {
            let mut hints = vec![InputHint::new("n", "new post")];
            hints.extend(post_hints);
            hints.push(InputHint::new("r", "refresh"));
            hints.extend(global);
            hints
        }
        Tab::Users => {
            let mut hints = vec![
                InputHint::new("↑↓", "select"),
                InputHint::new("f", "follow"),
                InputHint::new("p", "profile"),
                InputHint::new("r", "refresh"),
            ];
            hints.extend(global);
            hints
        }
        Tab::Profile => {
            let mut hints = Vec::new();
            if tui.profile.is_owner(tui.session.viewer_id()) {
                hints.push(InputHint::new("e", "edit"));
                hints.push(InputHint::new("a", "avatar"));
            }
            hints.push(InputHint::new("o", "open avatar"));
            hints.extend(post_hints);
            hints.extend(global);
            hints
        }
    }
}
