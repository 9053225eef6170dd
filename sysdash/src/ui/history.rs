//! CPU and memory history line charts.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::ui::screen::Screen;
use crate::ui::theme::{palette, Palette, CPU_SERIES, MEMORY_SERIES};
use crate::ui::util::inner;

pub fn draw_cpu_history(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let points = s.history.as_ref().map(|h| h.cpu.as_slice());
    draw_series(f, area, s, "CPU usage %", points, CPU_SERIES);
}

pub fn draw_mem_history(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let points = s.history.as_ref().map(|h| h.memory.as_slice());
    draw_series(f, area, s, "Memory usage %", points, MEMORY_SERIES);
}

fn draw_series(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    s: &Screen,
    title: &str,
    points: Option<&[(f64, f64)]>,
    color: ratatui::style::Color,
) {
    let pal = palette(s.theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.grid))
        .title(title.to_string());
    let Some(points) = points.filter(|p| !p.is_empty()) else {
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(Span::styled("no history yet", Style::default().fg(pal.muted))),
            inner(area),
        );
        return;
    };

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(points);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(pal.grid))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(pal.grid))
                .bounds([0.0, 100.0])
                .labels(y_labels(&pal)),
        );
    f.render_widget(chart, area);
}

fn y_labels(pal: &Palette) -> Vec<Span<'static>> {
    ["0%", "50%", "100%"]
        .into_iter()
        .map(|l| Span::styled(l, Style::default().fg(pal.text)))
        .collect()
}
