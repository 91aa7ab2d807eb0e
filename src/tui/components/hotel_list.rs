//! # Hotel List Component
//!
//! Shows the hotels of the selected city, one fetch cycle at a time:
//!
//! ```text
//! Loading  → spinner + "Loading hotels..."  (list suppressed)
//! Success  → one row per hotel, or "No hotels found in this city."
//! Failed   → error line, list treated as empty
//! ```
//!
//! The back control only emits `HotelListEvent::Back`; resetting navigation
//! is the coordinator's job.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::City;
use crate::core::state::{HotelFetch, LOADING_HOTELS_MESSAGE, NO_HOTELS_MESSAGE};
use crate::tui::component::{Component, EventHandler, contains};
use crate::tui::event::TuiEvent;

pub const BACK_LABEL: &str = "← Back";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Events emitted by the hotel list.
#[derive(Debug, Clone, PartialEq)]
pub enum HotelListEvent {
    Back,
    Reload,
}

/// Persistent state for the hotel list.
#[derive(Default)]
pub struct HotelListState {
    pub list_state: ListState,
    /// Where the back control was drawn last frame (for clicks).
    back_area: Rect,
}

impl HotelListState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for HotelListState {
    type Event = HotelListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HotelListEvent> {
        match event {
            TuiEvent::Escape
            | TuiEvent::Backspace
            | TuiEvent::CursorLeft
            | TuiEvent::InputChar('b') => Some(HotelListEvent::Back),
            TuiEvent::InputChar('r') => Some(HotelListEvent::Reload),
            TuiEvent::MouseClick(col, row) if contains(self.back_area, *col, *row) => {
                Some(HotelListEvent::Back)
            }
            TuiEvent::CursorUp => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                self.list_state.select_next();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the hotel list.
pub struct HotelList<'a> {
    state: &'a mut HotelListState,
    city: &'a City,
    fetch: &'a HotelFetch,
    spinner_frame: usize,
}

impl<'a> HotelList<'a> {
    pub fn new(
        state: &'a mut HotelListState,
        city: &'a City,
        fetch: &'a HotelFetch,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            city,
            fetch,
            spinner_frame,
        }
    }

    fn render_hotels(&mut self, frame: &mut Frame, area: Rect) {
        if self.fetch.is_loading() {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let line = Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::raw(LOADING_HOTELS_MESSAGE),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let hotels = self.fetch.hotels();
        if hotels.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    NO_HOTELS_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )),
                area,
            );
            return;
        }

        let name_width = hotels
            .iter()
            .map(|h| h.name.width())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = hotels
            .iter()
            .map(|hotel| {
                let padding = " ".repeat(name_width - hotel.name.width());
                ListItem::new(Line::from(vec![
                    Span::styled(
                        hotel.name.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(padding),
                    Span::styled(
                        format!("  Hotel Code: {}", hotel.code),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", hotels.len())),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

impl Component for HotelList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let error_height = if self.fetch.error().is_some() { 1 } else { 0 };
        let [back, header, error, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(error_height),
            Constraint::Min(0),
        ])
        .areas(area);

        self.state.back_area = Rect {
            width: (BACK_LABEL.width() as u16).min(back.width),
            ..back
        };
        frame.render_widget(
            Paragraph::new(Span::styled(BACK_LABEL, Style::default().fg(Color::Cyan))),
            back,
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Hotels in {}", self.city.name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            header,
        );

        if let Some(message) = self.fetch.error() {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                error,
            );
        }

        self.render_hotels(frame, body);
    }
}
