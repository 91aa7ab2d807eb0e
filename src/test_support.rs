//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::api::{ApiError, City, Hotel, HotelDirectory};
use crate::core::action::{Action, update};
use crate::core::state::App;

pub fn sample_cities() -> Vec<City> {
    vec![
        City::new("NYC", "New York City"),
        City::new("LA", "Los Angeles"),
        City::new("SF", "San Francisco"),
    ]
}

pub fn sample_hotels() -> Vec<Hotel> {
    vec![
        Hotel::new("AMS01", "Hotel 1", "AMS"),
        Hotel::new("AMS02", "Hotel 2", "AMS"),
    ]
}

/// Creates an App whose city directory has already loaded `sample_cities()`.
pub fn app_with_cities() -> App {
    let mut app = App::new();
    update(&mut app, Action::Start);
    update(&mut app, Action::CitiesLoaded(Ok(sample_cities())));
    app
}

/// In-memory directory. Cities missing from `hotels` answer with HTTP 404.
pub struct StaticDirectory {
    pub cities: Result<Vec<City>, ApiError>,
    pub hotels: HashMap<String, Vec<Hotel>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self {
            cities: Ok(sample_cities()),
            hotels: HashMap::from([("NYC".to_string(), sample_hotels())]),
        }
    }
}

#[async_trait]
impl HotelDirectory for StaticDirectory {
    async fn fetch_cities(&self) -> Result<Vec<City>, ApiError> {
        self.cities.clone()
    }

    async fn fetch_hotels(&self, city_code: &str) -> Result<Vec<Hotel>, ApiError> {
        self.hotels.get(city_code).cloned().ok_or(ApiError::Api {
            status: 404,
            message: format!("no city {city_code}"),
        })
    }
}

/// Collects every cell symbol of a rendered buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
