//! Reusable form widget for the auth screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Per-field view data assembled by a screen for rendering.
///
/// The value arrives already prepared for display — masked for a hidden
/// password — so the widget stays a dumb renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Display label shown as the row title.
    pub label: String,
    /// Text to render inside the row.
    pub value: String,
    /// Whether this field currently has the focus.
    pub focused: bool,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Right-aligned hint inside the row border (the show/hide affordance).
    pub affordance: Option<String>,
}

/// Replaces every character of `value` with a mask glyph.
pub fn mask(value: &str) -> String {
    "\u{2022}".repeat(value.chars().count())
}

/// Renders the field rows within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(fields: &[FieldView], frame: &mut Frame, area: Rect) {
    let row_height = 3_u16;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in fields.iter().enumerate() {
        let border_color = if field.error.is_some() {
            Color::Red
        } else if field.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let mut block = Block::default()
            .title(field.label.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if let Some(ref affordance) = field.affordance {
            block = block.title_bottom(
                Line::from(Span::styled(
                    affordance.clone(),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );
        }

        let mut spans = vec![Span::raw(&field.value)];
        if field.focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Draw error overlapping the bottom of the row area
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + row_height.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
