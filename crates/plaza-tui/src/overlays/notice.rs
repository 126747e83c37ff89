//! Blocking notice: a message the user must acknowledge.
//!
//! Used for mutation outcomes (follow confirmed, failed like, failed
//! upload). While open it swallows every key except the dismiss keys.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeState {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl NoticeState {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'q') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let color = match self.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        let width: u16 = 56;
        let text_width = usize::from(width - 4).max(1);
        let rows = self.message.width().div_ceil(text_width).max(1) as u16;

        let hints = [InputHint::new("Enter", "ok")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.title,
                border_color: color,
                width,
                height: rows + 4,
                hints: &hints,
            },
        );
        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y,
            layout.body.width.saturating_sub(2),
            layout.body.height,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.message.as_str(),
                Style::default().fg(Color::White),
            )))
            .wrap(Wrap { trim: true }),
            body,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    #[test]
    fn test_only_dismiss_keys_close() {
        let notice = NoticeState::error("Like failed", "Request failed with status 500");
        let typed = notice.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE));
        assert_eq!(typed.transition, OverlayTransition::Stay);

        let enter = notice.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(enter.transition, OverlayTransition::Close);
    }
}
