//! # TitleBar Component
//!
//! Top status line: which blog is on screen, what it is running on, and the
//! latest status message.
//!
//! Purely presentational. All data arrives as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     container.source().name.clone(),
//!     tui.device_name.clone(),
//!     tui.status_message.clone(),
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! Text wider than the area is cut at a character boundary using display
//! width, so wide glyphs in blog names never split.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct TitleBar {
    pub blog_name: String,
    pub device_name: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(blog_name: String, device_name: String, status_message: String) -> Self {
        Self {
            blog_name,
            device_name,
            status_message,
        }
    }

    pub fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Blogdeck · {} ({})", self.blog_name, self.device_name)
        } else {
            format!(
                "Blogdeck · {} ({}) | {}",
                self.blog_name, self.device_name, self.status_message
            )
        }
    }
}

/// Cut `s` to at most `max_width` display columns, ending in "…" if cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = truncate_to_width(&self.text(), area.width as usize);
        frame.render_widget(Span::raw(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(title_bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "Main Blog".to_string(),
            "iPad".to_string(),
            "Switched to Stats".to_string(),
        );
        let text = render_to_string(&mut title_bar, 80);
        assert!(text.contains("Blogdeck"));
        assert!(text.contains("Main Blog (iPad)"));
        assert!(text.contains("| Switched to Stats"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar =
            TitleBar::new("Main Blog".to_string(), "x86_64".to_string(), String::new());
        let text = render_to_string(&mut title_bar, 80);
        assert!(text.contains("Main Blog (x86_64)"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_truncates_narrow_area() {
        let mut title_bar = TitleBar::new(
            "A Very Long Blog Name Indeed".to_string(),
            "iPad".to_string(),
            String::new(),
        );
        let text = render_to_string(&mut title_bar, 20);
        assert!(text.contains('…'));
        assert!(!text.contains("iPad"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 0), "");
        // Wide glyphs count double
        assert_eq!(truncate_to_width("日本語ブログ", 5), "日本…");
    }
}
