use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{TextField, mask, truncate_start_with_ellipsis, truncate_with_ellipsis};

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Input configuration for an overlay.
pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Layout rectangles for an overlay.
pub struct OverlayLayout {
    pub body: Rect,
}

/// Render a standard overlay container and return its layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    render_overlay_container(frame, popup, config.title, config.border_color);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { body }
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Spans for a hint row: "key action • key action".
pub fn hint_spans<'a>(hints: &[InputHint<'a>], highlight_color: Color) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

/// Renders a line of keyboard hints at the bottom of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let para = Paragraph::new(Line::from(hint_spans(hints, highlight_color)))
        .alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Configuration for rendering a prompt input line bound to a [`TextField`].
pub struct InputLine<'a> {
    pub field: &'a TextField,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub focused: bool,
    pub masked: bool,
    pub prompt_color: Color,
    pub text_color: Color,
}

/// Renders a prompt-style input line: "> text█more", cursor only when focused.
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let value = if input.masked {
        mask(input.field.value())
    } else {
        input.field.value().to_string()
    };
    let max_text_width = usize::from(area.width.saturating_sub(input.prompt.width() as u16 + 1));

    let mut spans = vec![Span::styled(
        input.prompt,
        Style::default().fg(input.prompt_color),
    )];
    let cursor = Span::styled("█", Style::default().fg(input.text_color));

    if value.is_empty() {
        if input.focused {
            spans.push(cursor);
        }
        if let Some(placeholder) = input.placeholder {
            spans.push(Span::styled(
                truncate_with_ellipsis(placeholder, max_text_width),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else if input.focused {
        let split = value
            .char_indices()
            .nth(input.field.cursor())
            .map_or(value.len(), |(i, _)| i);
        let (before, after) = value.split_at(split);
        let before = truncate_start_with_ellipsis(before, max_text_width);
        let remaining = max_text_width.saturating_sub(before.width());
        spans.push(Span::styled(before, Style::default().fg(input.text_color)));
        spans.push(cursor);
        spans.push(Span::styled(
            truncate_with_ellipsis(after, remaining),
            Style::default().fg(input.text_color),
        ));
    } else {
        spans.push(Span::styled(
            truncate_with_ellipsis(&value, max_text_width + 1),
            Style::default().fg(input.text_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Returns a rectangle of at most `width` x `height` centered in `r`.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    calculate_overlay_area(r, width, height)
}
