use plaza_core::validate::{AuthField, AuthMode};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::AuthState;
use crate::overlays::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay,
};

/// Renders the sign-in / sign-up form centered on screen.
pub fn render_auth(
    frame: &mut Frame,
    area: Rect,
    auth: &AuthState,
    submitting: bool,
    spinner: &str,
) {
    let fields = auth.mode.fields();
    let toggle_label = match auth.mode.toggled() {
        AuthMode::SignIn => "switch to sign in",
        AuthMode::SignUp => "switch to sign up",
    };
    let hints = [
        InputHint::new("Enter", "submit"),
        InputHint::new("Tab", "next field"),
        InputHint::new("Ctrl+T", toggle_label),
        InputHint::new("Ctrl+C", "quit"),
    ];

    // Banner, two rows per field (input + error), status, hints, borders.
    let height = 2 + 2 * fields.len() as u16 + 2 + 2;
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: auth.mode.title(),
            border_color: Color::Magenta,
            width: 64,
            height,
            hints: &hints,
        },
    );
    let body = layout.body;
    let mut y = body.y;

    let banner = match &auth.banner {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "Welcome to plaza",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(banner), Rect::new(body.x, y, body.width, 1));
    y += 2;

    for (index, &field) in fields.iter().enumerate() {
        if y + 1 >= body.y + body.height {
            break;
        }
        let focused = index == auth.focus;
        let label = format!("{:>9} ", field.label());
        render_input_line(
            frame,
            Rect::new(body.x, y, body.width, 1),
            &InputLine {
                field: auth.field(field),
                placeholder: focused.then_some(placeholder(field)),
                prompt: &label,
                focused,
                masked: field == AuthField::Password,
                prompt_color: if focused { Color::Yellow } else { Color::DarkGray },
                text_color: Color::White,
            },
        );
        if let Some(error) = auth.errors.get(field) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{:>10}{error}", ""),
                    Style::default().fg(Color::Red),
                ))),
                Rect::new(body.x, y + 1, body.width, 1),
            );
        }
        y += 2;
    }

    if submitting && y < body.y + body.height {
        let status = match auth.mode {
            AuthMode::SignIn => "Signing in…",
            AuthMode::SignUp => "Creating account…",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{spinner} {status}"),
                Style::default().fg(Color::Yellow),
            ))),
            Rect::new(body.x, y, body.width, 1),
        );
    }
}

fn placeholder(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "Your display name",
        AuthField::Username => "3-20 letters, numbers or _",
        AuthField::Email => "you@example.com",
        AuthField::Password => "at least 6 characters",
    }
}
