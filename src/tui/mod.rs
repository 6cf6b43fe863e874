//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the tabbed
//! screen, and routes keyboard and focus events into the `BlogContainer`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Lifecycle Mapping
//!
//! - Start: the container is activated (and restores its saved tabs) before
//!   the first frame is drawn or any key is read.
//! - Focus lost: `suspend()`, which saves the tab state.
//! - Focus gained: `resume()`. No second restore.
//! - Any other input while backgrounded: `resume()` first.
//! - Quit: `suspend()` once more if still active, then restore the terminal.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event or a source-change notification.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;

use crate::core::config::{MAX_ITEMS_PER_PAGE, MIN_ITEMS_PER_PAGE, ResolvedConfig};
use crate::core::container::{BlogContainer, Lifecycle, Selection};
use crate::core::slot::{SLOT_COUNT, TabSlot};
use crate::core::source::{ContentSource, ContentSourceRegistry};
use crate::core::store::{FileStore, MemoryStore, StateStore};
use crate::hardware;
use crate::tui::component::EventHandler;
use crate::tui::components::{SliderCell, SliderEvent, TabPage, TabPageEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub device_name: String,
    pub status_message: String,
    pub items_per_page: usize,
    // Settings overlay (None = hidden)
    pub settings: Option<SliderCell>,
}

impl TuiState {
    pub fn new(device_name: String, items_per_page: usize) -> Self {
        Self {
            device_name,
            status_message: String::new(),
            items_per_page,
            settings: None,
        }
    }

    fn open_settings(&mut self) {
        self.settings = Some(SliderCell::new(
            "Items per page",
            self.items_per_page as f64,
            MIN_ITEMS_PER_PAGE as f64,
            MAX_ITEMS_PER_PAGE as f64,
            5.0,
        ));
    }
}

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Focus reporting drives suspend/resume; terminals without it just
        // never send the events.
        execute!(stdout(), EnableFocusChange)?;
        info!("Terminal modes enabled (focus change)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableFocusChange);
    }
}

/// Build the state store named by the config.
pub fn build_store(config: &ResolvedConfig) -> Box<dyn StateStore> {
    if config.persist_state {
        info!("Persisting tab state under {}", config.state_dir.display());
        Box::new(FileStore::new(config.state_dir.clone()))
    } else {
        info!("Tab state persistence disabled, keeping it in memory");
        Box::new(MemoryStore::new())
    }
}

/// One page per tab, all on `source`.
pub fn build_pages(source: &ContentSource, items_per_page: usize) -> [TabPage; SLOT_COUNT] {
    TabSlot::ALL.map(|slot| TabPage::new(slot, source, items_per_page))
}

pub fn run(config: ResolvedConfig, reset_state: bool) -> std::io::Result<()> {
    let mut registry =
        ContentSourceRegistry::new(config.blogs.clone()).map_err(std::io::Error::other)?;
    if let Some(id) = &config.default_blog
        && let Err(e) = registry.select(id)
    {
        warn!("Default blog not found, using '{}': {}", registry.current().id, e);
    }

    let mut container = BlogContainer::new(
        build_pages(registry.current(), config.items_per_page),
        registry.current().clone(),
        build_store(&config),
    );
    container.attach(&mut registry);

    if reset_state && let Err(e) = container.clear_state() {
        warn!("Failed to clear saved tab state: {}", e);
    }
    container.activate();

    let mut tui = TuiState::new(hardware::platform_display_name(), config.items_per_page);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut container, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&event, &mut container, &mut registry, &mut tui) == Flow::Quit {
                should_quit = true;
                break;
            }
        }

        if sync_source(&mut container, &mut tui) {
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    if let Err(e) = container.suspend() {
        warn!("Tab state not saved on exit: {}", e);
    }
    container.detach(&mut registry);

    ratatui::restore();
    Ok(())
}

/// Apply pending source-change notifications. Returns true if any arrived.
fn sync_source(container: &mut BlogContainer<TabPage>, tui: &mut TuiState) -> bool {
    if container.process_notifications() == 0 {
        return false;
    }
    tui.status_message = format!("Switched to {}", container.source().name);
    true
}

fn handle_event(
    event: &TuiEvent,
    container: &mut BlogContainer<TabPage>,
    registry: &mut ContentSourceRegistry,
    tui: &mut TuiState,
) -> Flow {
    match event {
        TuiEvent::ForceQuit => return Flow::Quit,
        TuiEvent::Resize => return Flow::Continue,
        TuiEvent::FocusLost => {
            debug!("Terminal focus lost");
            if let Err(e) = container.suspend() {
                tui.status_message = format!("Could not save tabs: {}", e);
            }
            return Flow::Continue;
        }
        TuiEvent::FocusGained => {
            debug!("Terminal focus gained");
            container.resume();
            return Flow::Continue;
        }
        _ => {}
    }

    // Some multiplexers send keys after FocusLost with no FocusGained.
    // Input implies foreground, so resume before it can change anything.
    if container.lifecycle() == Lifecycle::Backgrounded {
        debug!("Input while backgrounded, resuming");
        container.resume();
    }

    // Settings overlay captures input while open
    if let Some(settings) = tui.settings.as_mut() {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('s') | TuiEvent::Submit => {
                tui.settings = None;
            }
            _ => {
                if let Some(SliderEvent::ValueChanged(value)) = settings.handle_event(event) {
                    let items = value.round() as usize;
                    tui.items_per_page = items;
                    for (_, page) in container.slots_mut() {
                        page.set_page_size(items);
                    }
                    tui.status_message = format!("Showing {} items per page", items);
                }
            }
        }
        return Flow::Continue;
    }

    match event {
        TuiEvent::Escape | TuiEvent::InputChar('q') => return Flow::Quit,
        TuiEvent::InputChar(c @ '1'..='4') => {
            let index = (*c as usize) - ('1' as usize);
            select(container, tui, index);
        }
        TuiEvent::NextTab => {
            let index = (container.active_index() + 1) % SLOT_COUNT;
            select(container, tui, index);
        }
        TuiEvent::PrevTab => {
            let index = (container.active_index() + SLOT_COUNT - 1) % SLOT_COUNT;
            select(container, tui, index);
        }
        TuiEvent::InputChar('b') => {
            let next = registry.select_next();
            debug!("Requested blog switch to '{}'", next.id);
        }
        TuiEvent::InputChar('s') => tui.open_settings(),
        _ => {
            if let Some(page_event) = container.active_controller_mut().handle_event(event) {
                tui.status_message = match page_event {
                    TabPageEvent::Opened { title, .. } => format!("Opened {}", title),
                    TabPageEvent::Closed { depth: 0 } => {
                        format!("Back to {}", container.active_slot().label())
                    }
                    TabPageEvent::Closed { .. } => "Back".to_string(),
                };
            }
        }
    }
    Flow::Continue
}

fn select(container: &mut BlogContainer<TabPage>, tui: &mut TuiState, index: usize) {
    match container.select_tab(index) {
        Selection::Switched { to, .. } => {
            tui.status_message = to.label().to_string();
        }
        Selection::Reselected(slot) => {
            tui.status_message = format!("{} (top)", slot.label());
        }
        Selection::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::SlotController;

    struct Harness {
        container: BlogContainer<TabPage>,
        registry: ContentSourceRegistry,
        tui: TuiState,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_store(Box::new(MemoryStore::new()))
        }

        fn with_store(store: Box<dyn StateStore>) -> Self {
            let mut registry = ContentSourceRegistry::new(vec![
                ContentSource::new("main", "Main Blog"),
                ContentSource::new("travel", "Travel Notes"),
            ])
            .unwrap();
            let mut container = BlogContainer::new(
                build_pages(registry.current(), 5),
                registry.current().clone(),
                store,
            );
            container.attach(&mut registry);
            container.activate();
            Self {
                container,
                registry,
                tui: TuiState::new("test".to_string(), 5),
            }
        }

        fn send(&mut self, event: TuiEvent) -> Flow {
            let flow = handle_event(
                &event,
                &mut self.container,
                &mut self.registry,
                &mut self.tui,
            );
            sync_source(&mut self.container, &mut self.tui);
            flow
        }
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let mut h = Harness::new();
        h.send(TuiEvent::InputChar('3'));
        assert_eq!(h.container.active_slot(), TabSlot::Comments);
        assert_eq!(h.tui.status_message, "Comments");
    }

    #[test]
    fn test_pressing_active_tab_pops_to_root() {
        let mut h = Harness::new();
        h.send(TuiEvent::Submit);
        h.send(TuiEvent::Submit);
        assert_eq!(h.container.active_controller().current_navigation_depth(), 2);
        h.send(TuiEvent::InputChar('1'));
        assert_eq!(h.container.active_controller().current_navigation_depth(), 0);
        assert_eq!(h.tui.status_message, "Posts (top)");
    }

    #[test]
    fn test_tab_keys_wrap() {
        let mut h = Harness::new();
        h.send(TuiEvent::PrevTab);
        assert_eq!(h.container.active_slot(), TabSlot::Stats);
        h.send(TuiEvent::NextTab);
        assert_eq!(h.container.active_slot(), TabSlot::Posts);
    }

    #[test]
    fn test_blog_switch_reloads_tabs() {
        let mut h = Harness::new();
        h.send(TuiEvent::Submit);
        h.send(TuiEvent::InputChar('b'));
        assert_eq!(h.container.source().id, "travel");
        assert_eq!(h.container.active_controller().current_navigation_depth(), 0);
        assert_eq!(h.tui.status_message, "Switched to Travel Notes");
    }

    #[test]
    fn test_focus_lost_and_gained_cycle_lifecycle() {
        let mut h = Harness::new();
        h.send(TuiEvent::FocusLost);
        assert_eq!(h.container.lifecycle(), Lifecycle::Backgrounded);
        h.send(TuiEvent::FocusGained);
        assert_eq!(h.container.lifecycle(), Lifecycle::Active);
    }

    #[test]
    fn test_keys_after_focus_lost_are_saved_on_quit() {
        use crate::core::container::TAB_STATE_KEY;
        use crate::core::tab_state::TabState;
        use crate::test_support::CountingStore;

        let (store, _reads) = CountingStore::new();
        let shared = store.shared();
        let mut h = Harness::with_store(Box::new(store));
        h.send(TuiEvent::FocusLost);
        assert_eq!(h.container.lifecycle(), Lifecycle::Backgrounded);

        // No FocusGained before the next key
        h.send(TuiEvent::InputChar('3'));
        h.send(TuiEvent::Submit);
        assert_eq!(h.container.lifecycle(), Lifecycle::Active);
        assert_eq!(h.send(TuiEvent::InputChar('q')), Flow::Quit);
        h.container.suspend().unwrap();

        let raw = shared.read(TAB_STATE_KEY).unwrap().unwrap();
        let saved = TabState::from_json(&raw).unwrap();
        assert_eq!(saved.active_slot_index, h.container.active_index());
        assert_eq!(saved.active_slot_index, 2);
        assert_eq!(saved.navigation_depths, h.container.navigation_depths());
    }

    #[test]
    fn test_settings_overlay_changes_page_size() {
        let mut h = Harness::new();
        h.send(TuiEvent::InputChar('s'));
        assert!(h.tui.settings.is_some());
        // Number keys go to the overlay, not the tab bar
        h.send(TuiEvent::InputChar('2'));
        assert_eq!(h.container.active_slot(), TabSlot::Posts);

        h.send(TuiEvent::Right);
        assert_eq!(h.tui.items_per_page, 10);
        for (_, page) in h.container.slots() {
            assert_eq!(page.items().len(), 10);
        }
        h.send(TuiEvent::Escape);
        assert!(h.tui.settings.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut h = Harness::new();
        assert_eq!(h.send(TuiEvent::InputChar('q')), Flow::Quit);
        assert_eq!(h.send(TuiEvent::ForceQuit), Flow::Quit);
        assert_eq!(h.send(TuiEvent::CursorDown), Flow::Continue);
    }
}
