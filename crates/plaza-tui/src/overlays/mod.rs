//! Modal overlays drawn above the current screen.
//!
//! An open overlay takes every key until it closes.

pub mod notice;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use notice::{NoticeKind, NoticeState};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Transition returned by overlay key handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
        }
    }
}

#[derive(Debug)]
pub enum Overlay {
    Notice(NoticeState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Notice(notice) => notice.render(frame, area),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Notice(notice) => notice.handle_key(key),
        }
    }
}
