//! # Core Application Logic
//!
//! This module contains Concierge's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • search (filtering)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │    API     │
//!             │  Adapter   │──spawns───▶│  client    │
//!             │ (ratatui)  │            │ (reqwest)  │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`search`]: City suggestion filtering
//! - [`config`]: Layered settings (file, env, CLI)

pub mod action;
pub mod config;
pub mod search;
pub mod state;
