//! Process table with per-cell coloring, sort indicator, row selection and a scrollbar.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::style::Modifier;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::render::{StatusClass, TablePanel};
use crate::ui::screen::Screen;
use crate::ui::theme::{palette, SB_ARROW, SB_THUMB, SB_TRACK};
use crate::ui::util::inner;
use crate::view::SortKey;

// Keep the header widths here so drawing and hit-testing match.
const COLS: [Constraint; 7] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(30), // Name
    Constraint::Length(8),      // CPU %
    Constraint::Length(8),      // Mem %
    Constraint::Length(10),     // Status
    Constraint::Length(8),      // Threads
    Constraint::Length(19),     // Started
];

const HOT: Color = Color::Rgb(0xef, 0x44, 0x44);

fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Running => Color::Rgb(0x10, 0xb9, 0x81),
        StatusClass::Sleeping => Color::Rgb(0x3b, 0x82, 0xf6),
        StatusClass::Other => Color::Rgb(0x94, 0xa3, 0xb8),
    }
}

// Column that sorts by `key`, for the header indicator and header clicks
fn sort_column(key: SortKey) -> usize {
    match key {
        SortKey::Pid => 0,
        SortKey::Name => 1,
        SortKey::Cpu => 2,
        SortKey::Memory => 3,
    }
}

fn content_area(area: Rect) -> Rect {
    // reserve 2 columns for the scrollbar
    let inner = inner(area);
    Rect {
        width: inner.width.saturating_sub(2),
        ..inner
    }
}

pub fn table_title(t: &TablePanel) -> String {
    let mut title = format!(
        "Processes ({} total, showing {}) · sort: {}",
        t.total,
        t.rows.len(),
        t.sort_key.label()
    );
    if !t.search_term.is_empty() {
        title.push_str(&format!(" · filter: \"{}\"", t.search_term));
    }
    title
}

pub fn draw_processes(f: &mut ratatui::Frame<'_>, area: Rect, s: &Screen, state: &mut TableState) {
    let pal = palette(s.theme);
    let t = &s.table;
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.grid))
            .title(table_title(t)),
        area,
    );

    let inner = inner(area);
    if inner.height < 2 || inner.width < 3 {
        return;
    }
    let content = content_area(area);

    // Keep selection inside the current rows
    match (state.selected(), t.rows.len()) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), n) if i >= n => state.select(Some(n - 1)),
        _ => {}
    }

    let rows = t.rows.iter().map(|p| {
        let cpu_style = if p.cpu_hot {
            Style::default().fg(HOT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.fg)
        };
        let mem_style = if p.mem_hot {
            Style::default().fg(HOT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.fg)
        };
        Row::new(vec![
            Cell::from(p.pid.to_string()).style(Style::default().fg(pal.muted)),
            Cell::from(p.name.clone()),
            Cell::from(p.cpu.clone()).style(cpu_style),
            Cell::from(p.mem.clone()).style(mem_style),
            Cell::from(p.status.clone()).style(Style::default().fg(status_color(p.status_class))),
            Cell::from(p.threads.clone()),
            Cell::from(p.created.clone()).style(Style::default().fg(pal.text)),
        ])
        .style(Style::default().fg(pal.fg))
    });

    // Header with sort indicator
    let mut names = ["PID", "Name", "CPU %", "Mem %", "Status", "Threads", "Started"]
        .map(|h| h.to_string());
    names[sort_column(t.sort_key)].push_str(" •");
    let header = Row::new(names).style(
        Style::default()
            .fg(pal.header)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(table, content, state);

    // Draw scrollbar from the offset the table settled on
    let scroll_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: inner.y,
        width: 1,
        height: inner.height,
    };
    let viewport_rows = content.height.saturating_sub(1) as usize;
    draw_scrollbar(f, scroll_area, t.rows.len(), viewport_rows, state.offset());
}

fn draw_scrollbar(f: &mut ratatui::Frame<'_>, area: Rect, total_rows: usize, viewport_rows: usize, offset: usize) {
    if area.height < 3 {
        return;
    }
    let track = (area.height - 2) as usize;
    let total = total_rows.max(1);
    let view = viewport_rows.clamp(1, total);
    let max_off = total.saturating_sub(view);
    let offset = offset.min(max_off);

    let thumb_len = (track * view).div_ceil(total).max(1).min(track);
    let thumb_top = if max_off == 0 {
        0
    } else {
        ((track - thumb_len) * offset + max_off / 2) / max_off
    };

    // Build lines: top arrow, track (with thumb), bottom arrow
    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    lines.push(Line::from(Span::styled("▲", Style::default().fg(SB_ARROW))));
    for i in 0..track {
        if i >= thumb_top && i < thumb_top + thumb_len {
            lines.push(Line::from(Span::styled("█", Style::default().fg(SB_THUMB))));
        } else {
            lines.push(Line::from(Span::styled("│", Style::default().fg(SB_TRACK))));
        }
    }
    lines.push(Line::from(Span::styled("▼", Style::default().fg(SB_ARROW))));
    f.render_widget(Paragraph::new(lines), area);
}

/// Move the selected row with Up/Down/PageUp/PageDown/Home/End.
/// Returns true if the key was a navigation key.
pub fn processes_handle_key(state: &mut TableState, key: KeyEvent, page: usize, rows: usize) -> bool {
    if rows == 0 {
        return false;
    }
    let cur = state.selected().unwrap_or(0);
    let last = rows - 1;
    let next = match key.code {
        KeyCode::Up => cur.saturating_sub(1),
        KeyCode::Down => (cur + 1).min(last),
        KeyCode::PageUp => cur.saturating_sub(page.max(1)),
        KeyCode::PageDown => (cur + page.max(1)).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => return false,
    };
    state.select(Some(next));
    true
}

/// Mouse wheel moves the selection; a left click on a sortable header returns its key.
pub fn processes_handle_mouse(
    state: &mut TableState,
    mouse: MouseEvent,
    area: Rect,
    rows: usize,
) -> Option<SortKey> {
    let content = content_area(area);
    if content.height == 0 || content.width == 0 {
        return None;
    }
    let inside = mouse.column >= content.x
        && mouse.column < content.x + content.width
        && mouse.row >= content.y
        && mouse.row < content.y + content.height;
    if !inside {
        return None;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp if rows > 0 => {
            let cur = state.selected().unwrap_or(0);
            state.select(Some(cur.saturating_sub(1)));
            None
        }
        MouseEventKind::ScrollDown if rows > 0 => {
            let cur = state.selected().unwrap_or(0);
            state.select(Some((cur + 1).min(rows - 1)));
            None
        }
        MouseEventKind::Down(MouseButton::Left) if mouse.row == content.y => {
            // Split header into the same columns
            let header = Rect { height: 1, ..content };
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(COLS.to_vec())
                .spacing(1)
                .split(header);
            SortKey::ALL
                .into_iter()
                .find(|&k| {
                    let c = cols[sort_column(k)];
                    mouse.column >= c.x && mouse.column < c.x + c.width
                })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut st = TableState::default();
        assert!(processes_handle_key(&mut st, key(KeyCode::Down), 10, 3));
        assert_eq!(st.selected(), Some(1));
        processes_handle_key(&mut st, key(KeyCode::PageDown), 10, 3);
        assert_eq!(st.selected(), Some(2));
        processes_handle_key(&mut st, key(KeyCode::Home), 10, 3);
        assert_eq!(st.selected(), Some(0));
        assert!(!processes_handle_key(&mut st, key(KeyCode::Char('x')), 10, 3));
    }

    #[test]
    fn title_shows_counts_sort_and_filter() {
        let mut t = TablePanel {
            total: 12,
            sort_key: SortKey::Memory,
            ..Default::default()
        };
        let title = table_title(&t);
        assert!(title.starts_with("Processes (12 total, showing 0) · sort: "), "{title}");
        assert!(!title.contains('—') && !title.contains("filter"), "{title}");
        t.search_term = "fire".into();
        assert!(table_title(&t).ends_with(" · filter: \"fire\""));
    }

    #[test]
    fn header_click_picks_sort_key() {
        let area = Rect::new(0, 0, 100, 20);
        let mut st = TableState::default();
        let click = |column| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        // PID column starts right inside the border
        assert_eq!(processes_handle_mouse(&mut st, click(2), area, 5), Some(SortKey::Pid));
        // Name column follows the 8-wide PID column
        assert_eq!(processes_handle_mouse(&mut st, click(10), area, 5), Some(SortKey::Name));
    }
}
