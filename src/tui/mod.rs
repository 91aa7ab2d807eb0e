//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into `core::Action` values, and
//! executes the effects the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Page Routing
//!
//! ```text
//! Navigation::SelectingCity      → CityPickerState  → PickerEvent    → Action
//! Navigation::ViewingHotels(..)  → HotelListState   → HotelListEvent → Action
//! ```
//!
//! Page components are "remounted" on every page change: their persistent
//! state is rebuilt, so the picker always comes back with an empty search.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a fetch is outstanding): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or
//!   background actions.

mod component;
mod components;
mod effects;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{HotelDirectory, HttpDirectory};
use crate::core::action::{Action, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Page};
use crate::tui::component::EventHandler;
use crate::tui::components::{CityPickerState, HotelListEvent, HotelListState, PickerEvent};
use crate::tui::effects::EffectRunner;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub city_picker: CityPickerState,
    pub hotel_list: HotelListState,
    pub api_url: String,
}

impl TuiState {
    pub fn new(api_url: String) -> Self {
        Self {
            city_picker: CityPickerState::new(),
            hotel_list: HotelListState::new(),
            api_url,
        }
    }

    /// Rebuild the state of the page that just came on screen.
    fn remount(&mut self, page: Page) {
        match page {
            Page::SelectingCity => self.city_picker = CityPickerState::new(),
            Page::ViewingHotels => self.hotel_list = HotelListState::new(),
        }
    }

    /// Route one event to the visible page and turn its output into an action.
    fn route(&mut self, app: &App, event: &TuiEvent) -> Option<Action> {
        match app.page() {
            Page::SelectingCity => match self.city_picker.handle_event(event, &app.cities)? {
                PickerEvent::Select(code) => Some(Action::SelectCity(code)),
                PickerEvent::Quit => Some(Action::Quit),
            },
            Page::ViewingHotels => match self.hotel_list.handle_event(event)? {
                HotelListEvent::Back => Some(Action::Back),
                HotelListEvent::Reload => Some(Action::ReloadHotels),
            },
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let directory: Arc<dyn HotelDirectory> =
        Arc::new(HttpDirectory::new(Some(config.base_url.clone())));

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, directory, config.base_url),
        Err(e) => Err(e),
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    directory: Arc<dyn HotelDirectory>,
    api_url: String,
) -> std::io::Result<()> {
    let mut app = App::new();
    let mut tui = TuiState::new(api_url);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = EffectRunner::new(directory, tx);

    effects.run(update(&mut app, Action::Start));

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => Some(Action::Quit),
                _ => tui.route(&app, &event),
            };
            let Some(action) = action else {
                continue;
            };

            let page_before = app.page();
            let effect = update(&mut app, action);
            if app.page() != page_before {
                tui.remount(app.page());
            }
            if effects.run(effect) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effects.run(effect) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Concierge shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_with_cities;

    fn type_text(tui: &mut TuiState, app: &App, text: &str) {
        for c in text.chars() {
            assert_eq!(tui.route(app, &TuiEvent::InputChar(c)), None);
        }
    }

    #[test]
    fn test_picker_events_become_actions() {
        let app = app_with_cities();
        let mut tui = TuiState::new(String::new());
        type_text(&mut tui, &app, "new");

        assert_eq!(
            tui.route(&app, &TuiEvent::Submit),
            Some(Action::SelectCity("NYC".to_string()))
        );
        assert_eq!(tui.route(&app, &TuiEvent::Escape), Some(Action::Quit));
    }

    #[test]
    fn test_hotel_events_become_actions() {
        let mut app = app_with_cities();
        update(&mut app, Action::SelectCity("SF".to_string()));
        let mut tui = TuiState::new(String::new());

        assert_eq!(tui.route(&app, &TuiEvent::Escape), Some(Action::Back));
        assert_eq!(
            tui.route(&app, &TuiEvent::InputChar('r')),
            Some(Action::ReloadHotels)
        );
        // Typing on the hotels page does not reach the picker
        assert_eq!(tui.route(&app, &TuiEvent::InputChar('x')), None);
        assert!(tui.city_picker.search.is_empty());
    }

    #[test]
    fn test_remount_clears_search() {
        let app = app_with_cities();
        let mut tui = TuiState::new(String::new());
        type_text(&mut tui, &app, "los");
        tui.route(&app, &TuiEvent::Submit);
        assert_eq!(tui.city_picker.search, "Los Angeles");

        tui.remount(Page::SelectingCity);
        assert!(tui.city_picker.search.is_empty());
    }
}
