//! Memory card: usage gauge, totals, and a swap line when the host has swap.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::cpu::{bar_gauge, card_rows, detail_lines, waiting};
use crate::ui::screen::Screen;
use crate::ui::theme::palette;

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let pal = palette(s.theme);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title("Memory"),
        area,
    );
    let (gauge_row, details) = card_rows(area);
    let Some(mem) = &s.memory else {
        f.render_widget(waiting(&pal), gauge_row);
        return;
    };
    f.render_widget(bar_gauge(&mem.bar, mem.percent.clone(), &pal), gauge_row);

    let mut pairs = vec![
        ("Used", format!("{} / {}", mem.used, mem.total)),
        ("Available", mem.available.clone()),
    ];
    if let Some(swap) = &mem.swap {
        pairs.push(("Swap", format!("{} / {} ({})", swap.used, swap.total, swap.percent)));
    }
    f.render_widget(Paragraph::new(detail_lines(&pairs, &pal)), details);
}
