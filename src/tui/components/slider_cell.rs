//! # SliderCell Component
//!
//! A settings row with a single numeric control. Left/Right step the value
//! within `[min, max]`; every actual change is reported as
//! `SliderEvent::ValueChanged` for the owning settings screen to apply.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Gauge};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    ValueChanged(f64),
}

pub struct SliderCell {
    pub label: String,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl SliderCell {
    /// Bounds given in either order are swapped; a NaN bound collapses onto
    /// the other one (or 0.0 if both are NaN). A NaN value starts at `min`.
    pub fn new(label: impl Into<String>, value: f64, min: f64, max: f64, step: f64) -> Self {
        // f64::min/max return the non-NaN operand
        let lo = min.min(max);
        let hi = min.max(max);
        let (lo, hi) = if lo.is_nan() { (0.0, 0.0) } else { (lo, hi) };
        let value = if value.is_nan() { lo } else { value.clamp(lo, hi) };
        Self {
            label: label.into(),
            value,
            min: lo,
            max: hi,
            step,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Position of the value within the range, 0.0..=1.0.
    pub fn ratio(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        (self.value - self.min) / (self.max - self.min)
    }

    fn adjust(&mut self, delta: f64) -> Option<SliderEvent> {
        let next = (self.value + delta).clamp(self.min, self.max);
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(SliderEvent::ValueChanged(next))
    }
}

impl EventHandler for SliderCell {
    type Event = SliderEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SliderEvent> {
        match event {
            TuiEvent::Left => self.adjust(-self.step),
            TuiEvent::Right => self.adjust(self.step),
            _ => None,
        }
    }
}

impl Component for SliderCell {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let gauge = Gauge::default()
            .block(Block::bordered().title(format!(" {} ", self.label)))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(self.ratio())
            .label(format!("{}", self.value));
        frame.render_widget(gauge, area);
    }
}
