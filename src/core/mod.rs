//! # Core Application Logic
//!
//! Blogdeck's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • BlogContainer        │
//!                    │  • TabState (saved)     │
//!                    │  • Source registry      │
//!                    │                         │
//!                    │  No rendering.          │
//!                    └───────────┬─────────────┘
//!                                │ SlotController
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`container`]: `BlogContainer`, the tab container and its lifecycle
//! - [`slot`]: the four tab slots and the `SlotController` trait
//! - [`source`]: content sources (blogs) and change notifications
//! - [`tab_state`]: the saved selection/depth record
//! - [`store`]: key-value persistence for that record
//! - [`config`]: `~/.blogdeck/config.toml`

pub mod config;
pub mod container;
pub mod slot;
pub mod source;
pub mod store;
pub mod tab_state;
