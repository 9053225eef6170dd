//! Top header with platform, uptime, last refresh time and theme indicator.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::screen::Screen;
use crate::ui::theme::palette;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen, interval: Duration) {
    let pal = palette(s.theme);
    let (platform, uptime) = match &s.system {
        Some(sys) => (sys.platform.as_str(), sys.uptime.as_str()),
        None => ("connecting...", "--"),
    };
    let updated = s.last_updated.as_deref().unwrap_or("never");
    let every = format!("{:.1}s", interval.as_secs_f64());

    let line = Line::from(vec![
        Span::styled(
            "sysdash",
            Style::default().fg(pal.header).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(pal.muted)),
        Span::raw(platform.to_string()),
        Span::styled(" | up ", Style::default().fg(pal.muted)),
        Span::raw(uptime.to_string()),
        Span::styled(" | updated ", Style::default().fg(pal.muted)),
        Span::raw(updated.to_string()),
        Span::styled(" | every ", Style::default().fg(pal.muted)),
        Span::raw(every),
        Span::raw("  "),
        Span::raw(s.theme.icon()),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().fg(pal.fg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn header_uses_plain_separators() {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        let s = Screen::default();
        terminal
            .draw(|f| draw_header(f, f.area(), &s, Duration::from_secs(2)))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.starts_with("sysdash | connecting..."), "{text}");
        assert!(text.contains("| every 2.0s"), "{text}");
        assert!(!text.contains('—'), "{text}");
    }
}
