//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status line showing blog, device and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `TabPage`: One tab's list and detail stack. Also the tab's
//!   `SlotController`, so the container drives it directly.
//! - `SliderCell`: Single numeric settings control
//!
//! Each component file contains its state, events, rendering, event handling
//! and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── tab_page.rs      (Per-tab list/detail stack)
//! └── slider_cell.rs   (Settings slider row)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod slider_cell;
pub mod tab_page;
pub use slider_cell::{SliderCell, SliderEvent};
pub use tab_page::{TabPage, TabPageEvent};
