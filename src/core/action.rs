//! # Actions
//!
//! Everything that can happen in Concierge becomes an `Action`.
//! User picks a city? That's `Action::SelectCity(code)`.
//! Backend answers? That's `Action::HotelsLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the caller should perform. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, City, Hotel};
use crate::core::state::{
    App, CITY_LOAD_ERROR, HOTEL_LOAD_ERROR, HotelFetch, HotelRequest, Navigation,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// App mounted; load the city directory if that has not happened yet.
    Start,
    CitiesLoaded(Result<Vec<City>, ApiError>),
    /// User committed to a city from the picker.
    SelectCity(String),
    /// User asked to fetch the current city's hotels again.
    ReloadHotels,
    HotelsLoaded {
        request_id: u64,
        city_code: String,
        result: Result<Vec<Hotel>, ApiError>,
    },
    Back,
    Quit,
}

/// Side effect requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchCities,
    FetchHotels { request_id: u64, city_code: String },
    /// Any in-flight hotel fetch is now irrelevant.
    CancelHotels,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Start => {
            if app.cities_requested {
                return Effect::None;
            }
            app.cities_requested = true;
            app.cities_pending = true;
            info!("Requesting city directory");
            Effect::FetchCities
        }

        Action::CitiesLoaded(Ok(cities)) => {
            info!("City directory loaded: {} cities", cities.len());
            app.cities_pending = false;
            app.status_message = format!("{} cities", cities.len());
            app.cities = cities;
            app.city_error = None;
            Effect::None
        }

        Action::CitiesLoaded(Err(e)) => {
            warn!("Failed to load cities: {}", e);
            app.cities_pending = false;
            app.cities.clear();
            app.city_error = Some(CITY_LOAD_ERROR.to_string());
            app.status_message = String::from("City directory unavailable");
            Effect::None
        }

        Action::SelectCity(code) => {
            let Some(city) = app.find_city(&code).cloned() else {
                warn!("Ignoring selection of unknown city code {:?}", code);
                app.status_message = format!("Unknown city code: {code}");
                return Effect::None;
            };

            if app.selected_city() == Some(&city) {
                debug!("City {} already selected", city.code);
                return Effect::None;
            }

            info!("Selected city {} ({})", city.name, city.code);
            app.status_message = format!("Hotels in {}", city.name);
            app.navigation = Navigation::ViewingHotels(city);
            begin_hotel_fetch(app)
        }

        Action::ReloadHotels => {
            if app.selected_city().is_none() || app.hotels.is_loading() {
                return Effect::None;
            }
            begin_hotel_fetch(app)
        }

        Action::HotelsLoaded {
            request_id,
            city_code,
            result,
        } => {
            let current = HotelRequest {
                id: request_id,
                city_code,
            };
            let is_current = app.hotel_request.as_ref() == Some(&current)
                && app.selected_city().map(|c| c.code.as_str()) == Some(current.city_code.as_str());
            if !is_current {
                debug!(
                    "Discarding stale hotel response (request {} for {})",
                    current.id, current.city_code
                );
                return Effect::None;
            }

            app.hotel_request = None;
            app.hotels = match result {
                Ok(hotels) => {
                    info!("Showing {} hotels for {}", hotels.len(), current.city_code);
                    HotelFetch::Success(hotels)
                }
                Err(e) => {
                    warn!("Failed to load hotels for {}: {}", current.city_code, e);
                    HotelFetch::Failed(HOTEL_LOAD_ERROR.to_string())
                }
            };
            Effect::None
        }

        Action::Back => {
            info!("Back to city selection");
            app.navigation = Navigation::SelectingCity;
            app.hotels = HotelFetch::Idle;
            app.status_message = format!("{} cities", app.cities.len());
            if app.hotel_request.take().is_some() {
                Effect::CancelHotels
            } else {
                Effect::None
            }
        }

        Action::Quit => Effect::Quit,
    }
}

/// Starts a new hotel fetch cycle for the selected city. The new tag replaces
/// any earlier one, so a late answer to an older request is dropped.
fn begin_hotel_fetch(app: &mut App) -> Effect {
    let Some(city_code) = app.selected_city().map(|c| c.code.clone()) else {
        return Effect::None;
    };

    app.next_request_id += 1;
    let request_id = app.next_request_id;
    app.hotel_request = Some(HotelRequest {
        id: request_id,
        city_code: city_code.clone(),
    });
    app.hotels = HotelFetch::Loading;

    Effect::FetchHotels {
        request_id,
        city_code,
    }
}
