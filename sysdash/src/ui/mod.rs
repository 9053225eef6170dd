//! UI module root: frame layout, per-frame interaction state, and panel modules.

pub mod cpu;
pub mod disks;
pub mod header;
pub mod history;
pub mod mem;
pub mod net;
pub mod overlays;
pub mod processes;
pub mod screen;
pub mod theme;
pub mod util;

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, TableState},
};

use overlays::ThresholdForm;
use screen::Screen;
use theme::{palette, severity_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Search,
    Thresholds,
}

/// Interaction state that only affects drawing (not the dashboard data).
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub search_input: String,
    pub table: TableState,
    pub thresholds: ThresholdForm,
    pub interval: Duration,
    /// Last drawn process table area, for mouse hit-testing.
    pub procs_area: Option<Rect>,
}

/// Root rows: header, banner, summary cards, per-core, charts, processes, status line.
pub fn layout(area: Rect) -> [Rect; 7] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);
    [rows[0], rows[1], rows[2], rows[3], rows[4], rows[5], rows[6]]
}

pub fn draw(f: &mut ratatui::Frame<'_>, s: &Screen, ui: &mut UiState) {
    let pal = palette(s.theme);
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(pal.bg).fg(pal.fg)), area);

    let [header, banner, cards, cores, charts, procs, status] = layout(area);
    header::draw_header(f, header, s, ui.interval);
    draw_banner(f, banner, s);

    let card_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(cards);
    cpu::draw_cpu(f, card_cols[0], s);
    mem::draw_mem(f, card_cols[1], s);
    disks::draw_disk(f, card_cols[2], s);
    net::draw_net(f, card_cols[3], s);

    cpu::draw_per_core(f, cores, s);

    let chart_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(charts);
    history::draw_cpu_history(f, chart_cols[0], s);
    history::draw_mem_history(f, chart_cols[1], s);

    ui.procs_area = Some(procs);
    processes::draw_processes(f, procs, s, &mut ui.table);
    draw_status(f, status, s, ui);

    if ui.mode == Mode::Thresholds {
        overlays::draw_thresholds(f, s.theme, &ui.thresholds);
    }
}

fn draw_banner(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen) {
    let Some(b) = &s.banner else { return };
    let line = Line::from(Span::styled(
        format!(" {} ", b.text),
        Style::default()
            .fg(Color::White)
            .bg(severity_color(b.severity))
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line), area);
}

fn draw_status(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen, ui: &UiState) {
    let pal = palette(s.theme);
    let line = match ui.mode {
        Mode::Search => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(pal.header).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}_", ui.search_input)),
            Span::styled("  (Enter/Esc to finish)", Style::default().fg(pal.muted)),
        ]),
        _ => Line::from(Span::styled(
            "q quit · r refresh · s/c/m/n/p sort · / search · t theme · T thresholds · k kill · +/- interval",
            Style::default().fg(pal.muted),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
