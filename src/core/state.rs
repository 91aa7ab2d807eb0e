//! # Application State
//!
//! Core business state for Concierge. Domain data only; presentation state
//! (search text, highlight, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── cities: Vec<City>                  // loaded once per session
//! ├── city_error: Option<String>         // user-facing load failure
//! ├── cities_requested: bool             // the one-and-only fetch was issued
//! ├── cities_pending: bool               // that fetch has not answered yet
//! ├── navigation: Navigation             // which page, which city
//! ├── hotels: HotelFetch                 // Idle → Loading → Success | Failed
//! ├── hotel_request: Option<HotelRequest>// tag of the in-flight hotel fetch
//! ├── next_request_id: u64               // monotonic fetch counter
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{City, Hotel};

pub const CITY_LOAD_ERROR: &str = "Failed to load cities. Please try again later.";
pub const HOTEL_LOAD_ERROR: &str = "Failed to load hotels. Please try again later.";
pub const NO_HOTELS_MESSAGE: &str = "No hotels found in this city.";
pub const LOADING_HOTELS_MESSAGE: &str = "Loading hotels...";

/// Which page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    SelectingCity,
    ViewingHotels,
}

/// Navigation state. The hotels page owns its city, so "viewing hotels
/// without a selected city" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Navigation {
    #[default]
    SelectingCity,
    ViewingHotels(City),
}

impl Navigation {
    pub fn page(&self) -> Page {
        match self {
            Navigation::SelectingCity => Page::SelectingCity,
            Navigation::ViewingHotels(_) => Page::ViewingHotels,
        }
    }

    pub fn selected_city(&self) -> Option<&City> {
        match self {
            Navigation::SelectingCity => None,
            Navigation::ViewingHotels(city) => Some(city),
        }
    }
}

/// One hotel fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HotelFetch {
    #[default]
    Idle,
    Loading,
    Success(Vec<Hotel>),
    Failed(String),
}

impl HotelFetch {
    pub fn is_loading(&self) -> bool {
        matches!(self, HotelFetch::Loading)
    }

    /// Hotels to display. Empty unless the fetch succeeded.
    pub fn hotels(&self) -> &[Hotel] {
        match self {
            HotelFetch::Success(hotels) => hotels,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            HotelFetch::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Tag of the hotel fetch whose response is allowed to land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelRequest {
    pub id: u64,
    pub city_code: String,
}

pub struct App {
    pub cities: Vec<City>,
    pub city_error: Option<String>,
    pub cities_requested: bool,
    pub cities_pending: bool,
    pub navigation: Navigation,
    pub hotels: HotelFetch,
    pub hotel_request: Option<HotelRequest>,
    pub next_request_id: u64,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            cities: Vec::new(),
            city_error: None,
            cities_requested: false,
            cities_pending: false,
            navigation: Navigation::SelectingCity,
            hotels: HotelFetch::Idle,
            hotel_request: None,
            next_request_id: 0,
            status_message: String::from("Loading cities..."),
        }
    }

    pub fn page(&self) -> Page {
        self.navigation.page()
    }

    pub fn selected_city(&self) -> Option<&City> {
        self.navigation.selected_city()
    }

    /// True while any fetch is outstanding (drives the spinner).
    pub fn is_busy(&self) -> bool {
        self.cities_pending || self.hotels.is_loading()
    }

    pub fn find_city(&self, code: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.code == code)
    }
}
