pub mod client;
pub mod types;

pub use client::{ApiError, DEFAULT_BASE_URL, HotelDirectory, HttpDirectory};
pub use types::{City, Hotel};
