//! Executes the `Effect`s returned by `core::action::update`.
//!
//! Fetches run as tokio tasks and report back by sending an `Action` on the
//! loop's channel. Only one hotel fetch is kept alive: starting a new one or
//! cancelling aborts the previous task. The reducer still checks request tags,
//! so an answer that slips through before the abort lands is dropped anyway.

use log::{info, warn};
use std::sync::{Arc, mpsc};
use tokio::task::AbortHandle;

use crate::api::HotelDirectory;
use crate::core::action::{Action, Effect};

pub struct EffectRunner {
    directory: Arc<dyn HotelDirectory>,
    tx: mpsc::Sender<Action>,
    hotel_task: Option<AbortHandle>,
}

impl EffectRunner {
    pub fn new(directory: Arc<dyn HotelDirectory>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            directory,
            tx,
            hotel_task: None,
        }
    }

    /// Runs one effect. Returns `true` when the app should quit.
    pub fn run(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => {
                self.cancel_hotels();
                true
            }
            Effect::FetchCities => {
                self.spawn_city_fetch();
                false
            }
            Effect::FetchHotels {
                request_id,
                city_code,
            } => {
                self.cancel_hotels();
                self.spawn_hotel_fetch(request_id, city_code);
                false
            }
            Effect::CancelHotels => {
                self.cancel_hotels();
                false
            }
        }
    }

    fn spawn_city_fetch(&self) {
        info!("Spawning city directory fetch");
        let directory = self.directory.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = directory.fetch_cities().await;
            if tx.send(Action::CitiesLoaded(result)).is_err() {
                warn!("Failed to deliver city directory: receiver dropped");
            }
        });
    }

    fn spawn_hotel_fetch(&mut self, request_id: u64, city_code: String) {
        info!("Spawning hotel fetch {} for {}", request_id, city_code);
        let directory = self.directory.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = directory.fetch_hotels(&city_code).await;
            let action = Action::HotelsLoaded {
                request_id,
                city_code,
                result,
            };
            if tx.send(action).is_err() {
                warn!("Failed to deliver hotels for request {}: receiver dropped", request_id);
            }
        });
        self.hotel_task = Some(handle.abort_handle());
    }

    fn cancel_hotels(&mut self) {
        if let Some(handle) = self.hotel_task.take() {
            handle.abort();
        }
    }
}
