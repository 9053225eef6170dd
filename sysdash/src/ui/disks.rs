//! Disk card for the main partition.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::cpu::{bar_gauge, card_rows, detail_lines, waiting};
use crate::ui::screen::Screen;
use crate::ui::theme::palette;
use crate::ui::util::{disk_icon, truncate_middle};

pub fn draw_disk(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let pal = palette(s.theme);
    let title = match s.disk.as_ref().and_then(|d| d.device.as_deref()) {
        Some(dev) => format!(
            "Disk {} {}",
            disk_icon(dev),
            truncate_middle(dev, area.width.saturating_sub(12) as usize)
        ),
        None => "Disk".into(),
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title(title),
        area,
    );
    let (gauge_row, details) = card_rows(area);
    let Some(disk) = &s.disk else {
        f.render_widget(waiting(&pal), gauge_row);
        return;
    };
    f.render_widget(bar_gauge(&disk.bar, disk.percent.clone(), &pal), gauge_row);
    let lines = detail_lines(
        &[
            ("Used", format!("{} / {}", disk.used, disk.total)),
            ("Free", disk.free.clone()),
        ],
        &pal,
    );
    f.render_widget(Paragraph::new(lines), details);
}
