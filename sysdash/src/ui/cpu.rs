//! CPU summary card + per-core usage cells.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::render::Bar;
use crate::ui::screen::Screen;
use crate::ui::theme::{level_color, palette, Palette};
use crate::ui::util::inner;

/// Usage gauge colored by severity tier.
pub fn bar_gauge<'a>(bar: &Bar, label: String, pal: &Palette) -> Gauge<'a> {
    Gauge::default()
        .ratio(bar.ratio())
        .label(Span::styled(
            label,
            Style::default().fg(pal.fg).add_modifier(Modifier::BOLD),
        ))
        .gauge_style(Style::default().fg(level_color(bar.level)).bg(pal.grid))
}

/// Lines below a card's gauge: `label value` pairs.
pub fn detail_lines<'a>(pairs: &[(&'a str, String)], pal: &Palette) -> Vec<Line<'a>> {
    pairs
        .iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("{k:<10}"), Style::default().fg(pal.text)),
                Span::styled(v.clone(), Style::default().fg(pal.fg)),
            ])
        })
        .collect()
}

/// Card body split into a one-line gauge and the details below it.
pub fn card_rows(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner(area));
    (rows[0], rows[1])
}

pub fn waiting<'a>(pal: &Palette) -> Paragraph<'a> {
    Paragraph::new(Span::styled("waiting for data…", Style::default().fg(pal.muted)))
}

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let pal = palette(s.theme);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title("CPU"),
        area,
    );
    let (gauge_row, details) = card_rows(area);
    let Some(cpu) = &s.cpu else {
        f.render_widget(waiting(&pal), gauge_row);
        return;
    };
    f.render_widget(bar_gauge(&cpu.bar, cpu.percent.clone(), &pal), gauge_row);
    let lines = detail_lines(
        &[
            ("Cores", cpu.cores.clone()),
            ("Logical", cpu.logical.clone()),
            ("Frequency", cpu.frequency.clone().unwrap_or_else(|| "--".into())),
        ],
        &pal,
    );
    f.render_widget(Paragraph::new(lines), details);
}

pub fn draw_per_core(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let pal = palette(s.theme);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title("Per-core"),
        area,
    );
    let Some(cpu) = &s.cpu else { return };
    let mut spans: Vec<Span> = Vec::with_capacity(cpu.per_core.len() * 2);
    for cell in &cpu.per_core {
        spans.push(Span::styled(
            format!("{} ", cell.label),
            Style::default().fg(pal.text),
        ));
        spans.push(Span::styled(
            format!("{:<8}", cell.value),
            Style::default()
                .fg(level_color(cell.bar.level))
                .add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
        inner(area),
    );
}
