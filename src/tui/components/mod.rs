//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: Top line showing the backend URL and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it plus
//! the props it needs for one frame:
//!
//! - `CityPickerState` / `CityPicker`: search box with suggestions
//! - `HotelListState` / `HotelList`: hotels of the selected city
//!
//! ## Props-Based Data Flow
//!
//! Components receive core data as "props" (constructor parameters), never by
//! reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! CityPicker::new(&mut tui.city_picker, &app.cities, app.city_error.as_deref())
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── status_bar.rs    (Top status line)
//! ├── city_picker.rs   (Search + suggestions)
//! └── hotel_list.rs    (Hotels of one city)
//! ```

pub mod city_picker;
pub mod hotel_list;
mod status_bar;

pub use city_picker::{CityPicker, CityPickerState, PickerEvent};
pub use hotel_list::{HotelList, HotelListEvent, HotelListState};
pub use status_bar::StatusBar;
