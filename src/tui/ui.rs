use crate::core::state::{App, Navigation};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CityPicker, HotelList, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const SPINNER_GLYPHS: [&str; 4] = ["◐", "◓", "◑", "◒"];

const PICKER_HELP: &str = " Type to search  ↑↓ Move  Enter Select  Esc Quit ";
const HOTELS_HELP: &str = " Esc/b Back  r Reload  ↑↓ Scroll  Ctrl+C Quit ";

/// Draws the whole screen: status line, the current page, help line.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [status_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let busy_indicator = app
        .is_busy()
        .then(|| SPINNER_GLYPHS[spinner_frame % SPINNER_GLYPHS.len()]);
    StatusBar::new(
        tui.api_url.clone(),
        app.status_message.clone(),
        busy_indicator,
    )
    .render(frame, status_area);

    let body = padded(body_area);
    let help = match &app.navigation {
        Navigation::SelectingCity => {
            CityPicker::new(&mut tui.city_picker, &app.cities, app.city_error.as_deref())
                .render(frame, body);
            PICKER_HELP
        }
        Navigation::ViewingHotels(city) => {
            HotelList::new(&mut tui.hotel_list, city, &app.hotels, spinner_frame)
                .render(frame, body);
            HOTELS_HELP
        }
    };

    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

/// One blank row above and two blank columns either side.
fn padded(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::state::HOTEL_LOAD_ERROR;
    use crate::test_support::{app_with_cities, buffer_text};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_picker_page() {
        let app = app_with_cities();
        let mut tui = TuiState::new("http://api.test".to_string());
        let text = draw(&app, &mut tui);

        assert!(text.contains("Concierge (api: http://api.test)"));
        assert!(text.contains("Select a City"));
        assert!(text.contains("Esc Quit"));
    }

    #[test]
    fn test_picker_shows_city_load_error() {
        let mut app = App::new();
        update(&mut app, Action::Start);
        update(
            &mut app,
            Action::CitiesLoaded(Err(crate::api::ApiError::Network("refused".to_string()))),
        );
        let mut tui = TuiState::new("http://api.test".to_string());
        let text = draw(&app, &mut tui);

        assert!(text.contains("Failed to load cities. Please try again later."));
    }

    #[test]
    fn test_hotels_page() {
        let mut app = app_with_cities();
        let effect = update(&mut app, Action::SelectCity("NYC".to_string()));
        let crate::core::action::Effect::FetchHotels { request_id, city_code } = effect else {
            panic!("Expected FetchHotels");
        };
        update(
            &mut app,
            Action::HotelsLoaded {
                request_id,
                city_code,
                result: Err(crate::api::ApiError::Api {
                    status: 500,
                    message: String::new(),
                }),
            },
        );

        let mut tui = TuiState::new("http://api.test".to_string());
        let text = draw(&app, &mut tui);

        assert!(text.contains("Hotels in New York City"));
        assert!(text.contains(HOTEL_LOAD_ERROR));
        assert!(text.contains("r Reload"));
        assert!(!text.contains("Select a City"));
    }
}
