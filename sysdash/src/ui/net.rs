//! Network totals card.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::cpu::{detail_lines, waiting};
use crate::ui::screen::Screen;
use crate::ui::theme::palette;
use crate::ui::util::inner;

pub fn draw_net(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let pal = palette(s.theme);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title("Network"),
        area,
    );
    let Some(net) = &s.network else {
        f.render_widget(waiting(&pal), inner(area));
        return;
    };
    let lines = detail_lines(
        &[
            ("Sent", net.sent.clone()),
            ("Received", net.recv.clone()),
            ("Pkts out", net.packets_sent.clone()),
            ("Pkts in", net.packets_recv.clone()),
        ],
        &pal,
    );
    f.render_widget(Paragraph::new(lines), inner(area));
}
