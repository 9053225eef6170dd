//! Small UI helpers: inner rects, truncation, icons, centered popups.

use ratatui::layout::Rect;

/// Area inside a one-cell border.
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Popup of `width` x `height` centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}

pub fn disk_icon(name: &str) -> &'static str {
    let n = name.to_ascii_lowercase();
    if n.contains(':') {
        "🗄️"
    } else if n.contains("nvme") {
        "⚡"
    } else if n.contains("/sd") || n.starts_with("sd") {
        "💽"
    } else if n.contains("overlay") {
        "📦"
    } else {
        "🖴"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_truncation_keeps_both_ends() {
        assert_eq!(truncate_middle("/dev/nvme0n1p2", 20), "/dev/nvme0n1p2");
        assert_eq!(truncate_middle("abcdefghij", 7), "ab...ij");
        assert_eq!(truncate_middle("abcdefghij", 3), "...");
    }

    #[test]
    fn centered_popup_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered(area, 40, 10);
        assert_eq!(r, Rect::new(20, 7, 40, 10));
        let r = centered(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(r, Rect::new(0, 0, 20, 5));
    }
}
