//! Modal popups: kill confirmation and the alert threshold form.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::prefs::Theme;
use crate::types::Thresholds;
use crate::ui::theme::{palette, severity_color};
use crate::ui::util::{centered, inner};
use crate::banner::Severity;

pub fn draw_confirm(f: &mut ratatui::Frame<'_>, theme: Theme, prompt: &str) {
    let pal = palette(theme);
    let area = centered(f.area(), 64, 9);
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(severity_color(Severity::Error)))
            .title("Confirm")
            .style(Style::default().bg(pal.bg).fg(pal.fg)),
        area,
    );
    let mut lines: Vec<Line> = prompt.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[y] ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("Yes   "),
        Span::styled("[n] ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("No"),
    ]));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

const FIELDS: [&str; 3] = ["CPU %", "Memory %", "Disk %"];

/// Editable threshold inputs, one string per field.
#[derive(Debug, Clone)]
pub struct ThresholdForm {
    pub values: [String; 3],
    pub focus: usize,
}

impl Default for ThresholdForm {
    fn default() -> Self {
        Self::from_thresholds(Thresholds::default())
    }
}

impl ThresholdForm {
    pub fn from_thresholds(t: Thresholds) -> Self {
        Self {
            values: [t.cpu.to_string(), t.memory.to_string(), t.disk.to_string()],
            focus: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELDS.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
    }

    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.values[self.focus].push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    /// Parse all three fields; the error names the first bad one.
    pub fn parse(&self) -> Result<Thresholds, String> {
        let mut out = [0.0_f64; 3];
        for (i, raw) in self.values.iter().enumerate() {
            out[i] = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("✗ Invalid {} threshold: \"{}\"", FIELDS[i], raw))?;
        }
        Ok(Thresholds {
            cpu: out[0],
            memory: out[1],
            disk: out[2],
        })
    }
}

pub fn draw_thresholds(f: &mut ratatui::Frame<'_>, theme: Theme, form: &ThresholdForm) {
    let pal = palette(theme);
    let area = centered(f.area(), 44, 8);
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.header))
            .title("Alert thresholds")
            .style(Style::default().bg(pal.bg).fg(pal.fg)),
        area,
    );
    let mut lines: Vec<Line> = FIELDS
        .iter()
        .zip(form.values.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let focused = i == form.focus;
            let value_style = if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{label:<10}"), Style::default().fg(pal.text)),
                Span::styled(format!(" {value:<8}"), value_style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next · Enter save · Esc cancel",
        Style::default().fg(pal.muted),
    )));
    f.render_widget(Paragraph::new(lines), inner(area));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_starts_from_backend_defaults() {
        let form = ThresholdForm::default();
        assert_eq!(form.parse().unwrap(), Thresholds::default());
    }

    #[test]
    fn form_edits_focused_field_only() {
        let mut form = ThresholdForm::default();
        form.next_field();
        form.backspace();
        form.backspace();
        form.push('7');
        form.push('x');
        form.push('0');
        let t = form.parse().unwrap();
        assert_eq!(t.memory, 70.0);
        assert_eq!(t.cpu, 80.0);
        form.prev_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn empty_field_is_rejected() {
        let mut form = ThresholdForm::default();
        form.focus = 2;
        form.backspace();
        form.backspace();
        let err = form.parse().unwrap_err();
        assert!(err.contains("Disk"), "{err}");
    }
}
