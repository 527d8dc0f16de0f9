//! Status bar widget — persistent one-line display of the last attempt.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget; decoupled from the journal types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Email of the last committed attempt; empty when nothing was committed.
    pub identity: String,
    /// `true` if the last attempt was a registration, `false` for a sign-in.
    pub registered: bool,
    /// Total attempts recorded in the journal, including past sessions.
    pub recorded: usize,
}

/// Renders a one-line status bar showing the last committed attempt.
///
/// Display format (left-aligned):
/// - Sign-in:      `nat@example.com  SIGNED IN · 3 recorded`
/// - Registration: `nat@example.com  REGISTERED · 1 recorded`
///
/// Renders nothing if `ctx.identity` is empty (no attempt yet).
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    if ctx.identity.is_empty() {
        return;
    }

    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let verb = if ctx.registered {
        "REGISTERED"
    } else {
        "SIGNED IN"
    };

    let spans = vec![
        Span::styled(ctx.identity.clone(), cyan),
        Span::styled("  ", cyan),
        Span::styled(verb, green),
        Span::styled(format!(" \u{b7} {} recorded", ctx.recorded), cyan),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_status_bar(ctx: &StatusBarContext, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_status_bar(ctx, frame, frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn renders_sign_in() {
        let ctx = StatusBarContext {
            identity: "nat@example.com".to_string(),
            registered: false,
            recorded: 3,
        };
        let output = render_status_bar(&ctx, 50, 1);
        assert!(output.contains("nat@example.com"), "should show identity");
        assert!(output.contains("SIGNED IN"), "should show sign-in verb");
        assert!(output.contains("3 recorded"), "should show count");
    }

    #[test]
    fn renders_registration() {
        let ctx = StatusBarContext {
            identity: "nat@example.com".to_string(),
            registered: true,
            recorded: 1,
        };
        let output = render_status_bar(&ctx, 50, 1);
        assert!(output.contains("REGISTERED"), "should show register verb");
    }

    #[test]
    fn renders_nothing_before_first_attempt() {
        let ctx = StatusBarContext::default();
        let output = render_status_bar(&ctx, 50, 1);
        assert!(!output.contains("recorded"), "blank context renders nothing");
    }
}
