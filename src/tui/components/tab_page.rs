//! # TabPage Component
//!
//! The content of one tab: a root list of items and a stack of detail views
//! pushed on top of it. Implements [`SlotController`] so the container can
//! reset, measure, restore and reload it.
//!
//! ```text
//! depth 0   Posts list
//! depth 1   └─ Post #3
//! depth 2      └─ Comments on Post #3      (Posts only)
//! ```
//!
//! Items are placeholder rows derived from the blog name. Fetching real
//! content is someone else's job.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::slot::{SlotController, TabSlot};
use crate::core::source::ContentSource;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted when the user moves through the tab's navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabPageEvent {
    Opened { depth: usize, title: String },
    Closed { depth: usize },
}

pub struct TabPage {
    slot: TabSlot,
    source: ContentSource,
    page_size: usize,
    items: Vec<String>,
    /// Item index opened at each pushed level.
    stack: Vec<usize>,
    list_state: ListState,
}

impl TabPage {
    pub fn new(slot: TabSlot, source: &ContentSource, page_size: usize) -> Self {
        let mut page = Self {
            slot,
            source: source.clone(),
            page_size,
            items: Vec::new(),
            stack: Vec::new(),
            list_state: ListState::default(),
        };
        page.load();
        page
    }

    pub fn slot(&self) -> TabSlot {
        self.slot
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// How deep this tab's navigation can go.
    pub fn max_depth(&self) -> usize {
        match self.slot {
            TabSlot::Posts => 2,
            TabSlot::Pages | TabSlot::Comments | TabSlot::Stats => 1,
        }
    }

    /// Returns true if the size changed and the items were reloaded.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.stack.clear();
        self.load();
        true
    }

    /// Push the selected item. Returns false at max depth or with no items.
    pub fn open(&mut self) -> bool {
        if self.stack.len() >= self.max_depth() {
            return false;
        }
        let Some(selected) = self.list_state.selected() else {
            return false;
        };
        let opened = self.stack.last().copied().unwrap_or(selected);
        self.stack.push(opened);
        true
    }

    /// Pop one level. Returns false at the root.
    pub fn back(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    pub fn move_up(&mut self) {
        if self.stack.is_empty() && !self.items.is_empty() {
            self.list_state.select_previous();
        }
    }

    pub fn move_down(&mut self) {
        if self.stack.is_empty() && !self.items.is_empty() {
            let next = self
                .list_state
                .selected()
                .map_or(0, |i| (i + 1).min(self.items.len() - 1));
            self.list_state.select(Some(next));
        }
    }

    /// Titles from the root down to the current level.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut trail = vec![self.slot.label().to_string()];
        for (level, item) in self.stack.iter().enumerate() {
            let title = self.items.get(*item).cloned().unwrap_or_default();
            if level == 0 {
                trail.push(title);
            } else {
                trail.push(format!("{} on {}", self.child_noun(), title));
            }
        }
        trail
    }

    fn load(&mut self) {
        let noun = self.item_noun();
        self.items = (1..=self.page_size)
            .map(|n| format!("{} #{}", noun, n))
            .collect();
        self.list_state = ListState::default();
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn item_noun(&self) -> &'static str {
        match self.slot {
            TabSlot::Posts => "Post",
            TabSlot::Pages => "Page",
            TabSlot::Comments => "Comment",
            TabSlot::Stats => "Report",
        }
    }

    fn child_noun(&self) -> &'static str {
        match self.slot {
            TabSlot::Posts => "Comments",
            _ => "Details",
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" {} · {} ", self.slot.label(), self.source.name))
            .border_style(Style::default().fg(Color::DarkGray));
        let items: Vec<ListItem> = self.items.iter().map(|i| ListItem::new(i.as_str())).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_detail(&mut self, frame: &mut Frame, area: Rect) {
        let trail = self.breadcrumb();
        let title = trail.join(" › ");
        let current = trail.last().cloned().unwrap_or_default();
        let hint = if self.stack.len() < self.max_depth() {
            format!("Enter: {}   Backspace: back", self.child_noun())
        } else {
            "Backspace: back".to_string()
        };
        let lines = vec![
            Line::from(current).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from(format!("From {}", self.source.name)),
            Line::from(""),
            Line::from(hint).style(Style::default().fg(Color::DarkGray)),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::bordered().title(format!(" {} ", title)))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl SlotController for TabPage {
    fn reset_to_root(&mut self) {
        self.stack.clear();
    }

    fn current_navigation_depth(&self) -> usize {
        self.stack.len()
    }

    fn restore_to_depth(&mut self, depth: usize) {
        self.stack.clear();
        let target = depth.min(self.max_depth());
        while self.stack.len() < target && self.open() {}
    }

    fn reload_for_source(&mut self, source: &ContentSource) {
        self.source = source.clone();
        self.stack.clear();
        self.load();
    }
}

impl EventHandler for TabPage {
    type Event = TabPageEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TabPageEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.move_up();
                None
            }
            TuiEvent::CursorDown => {
                self.move_down();
                None
            }
            TuiEvent::Submit | TuiEvent::Right => {
                if self.open() {
                    let title = self.breadcrumb().pop().unwrap_or_default();
                    Some(TabPageEvent::Opened {
                        depth: self.stack.len(),
                        title,
                    })
                } else {
                    None
                }
            }
            TuiEvent::Backspace | TuiEvent::Left => {
                if self.back() {
                    Some(TabPageEvent::Closed {
                        depth: self.stack.len(),
                    })
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Component for TabPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.stack.is_empty() {
            self.render_list(frame, area);
        } else {
            self.render_detail(frame, area);
        }
    }
}
