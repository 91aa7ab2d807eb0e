//! # City Picker Component
//!
//! Search box with a live suggestion list. Typing narrows the loaded city
//! directory by name; Enter (or a mouse click) on a suggestion commits it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CityPickerState` lives in `TuiState` and owns the search text
//! - `CityPicker` is created each frame with borrowed state and props
//!
//! Committing a suggestion writes the city's name back into the search box,
//! so the input reflects the confirmed choice.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::City;
use crate::core::search::suggestions;
use crate::tui::component::{Component, contains};
use crate::tui::event::TuiEvent;

pub const HEADER: &str = "Select a City";
pub const LABEL: &str = "Type a city name:";
pub const PLACEHOLDER: &str = "Search for a city...";

/// Events emitted by the city picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// City code of the committed suggestion.
    Select(String),
    Quit,
}

/// Persistent state for the city picker.
pub struct CityPickerState {
    pub search: String,
    /// Highlighted suggestion, as an index into the current matches.
    pub selected: usize,
    pub list_state: ListState,
    /// Inner area of the suggestion list from the last render (for clicks).
    suggestions_area: Rect,
}

impl Default for CityPickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl CityPickerState {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            selected: 0,
            list_state: ListState::default(),
            suggestions_area: Rect::default(),
        }
    }

    /// Handle a key event against the current city directory.
    pub fn handle_event(&mut self, event: &TuiEvent, cities: &[City]) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Quit),
            TuiEvent::InputChar(c) => {
                self.search.push(*c);
                self.reset_highlight();
                None
            }
            TuiEvent::Paste(text) => {
                self.search.extend(text.chars().filter(|c| !c.is_control()));
                self.reset_highlight();
                None
            }
            TuiEvent::Backspace => {
                if self.search.pop().is_some() {
                    self.reset_highlight();
                }
                None
            }
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                let count = suggestions(cities, &self.search).len();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self.choose(self.selected, cities),
            TuiEvent::MouseClick(col, row) => {
                let index = self.hit_test(*col, *row)?;
                self.choose(index, cities)
            }
            _ => None,
        }
    }

    /// Commit the `index`-th suggestion: the input takes the city's name and
    /// the city's code is emitted.
    pub fn choose(&mut self, index: usize, cities: &[City]) -> Option<PickerEvent> {
        let city = suggestions(cities, &self.search).get(index).copied()?;
        let code = city.code.clone();
        self.search = city.name.clone();
        self.reset_highlight();
        Some(PickerEvent::Select(code))
    }

    /// Suggestion index under the terminal cell `(col, row)`, if any.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        if !contains(self.suggestions_area, col, row) {
            return None;
        }
        Some(self.list_state.offset() + (row - self.suggestions_area.y) as usize)
    }

    /// The search changed: the highlight and the last drawn rows no longer
    /// match the suggestions until the next render.
    fn reset_highlight(&mut self) {
        self.selected = 0;
        self.list_state = ListState::default();
        self.suggestions_area = Rect::default();
    }
}

/// Transient render wrapper for the city picker.
pub struct CityPicker<'a> {
    state: &'a mut CityPickerState,
    cities: &'a [City],
    error: Option<&'a str>,
}

impl<'a> CityPicker<'a> {
    pub fn new(state: &'a mut CityPickerState, cities: &'a [City], error: Option<&'a str>) -> Self {
        Self {
            state,
            cities,
            error,
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);

        let text = if self.state.search.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.state.search.as_str(), Style::default().fg(Color::Green))
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        let typed = self.state.search.width() as u16;
        let x = inner.x + typed.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }

    fn render_suggestions(&mut self, frame: &mut Frame, area: Rect) {
        let matches = suggestions(self.cities, &self.state.search);
        if matches.is_empty() {
            self.state.suggestions_area = Rect::default();
            return;
        }

        let height = (matches.len() as u16 + 2).min(area.height);
        let area = Rect { height, ..area };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        self.state.suggestions_area = block.inner(area);

        let items: Vec<ListItem> = matches
            .iter()
            .map(|city| ListItem::new(Line::from(city.name.as_str())))
            .collect();

        let selected = self.state.selected.min(matches.len() - 1);
        self.state.selected = selected;
        self.state.list_state.select(Some(selected));

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

impl Component for CityPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let error_height = if self.error.is_some() { 1 } else { 0 };
        let [header, error, label, input, list] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(error_height),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                HEADER,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            header,
        );

        if let Some(message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                error,
            );
        }

        frame.render_widget(Paragraph::new(LABEL), label);
        self.render_input(frame, input);
        self.render_suggestions(frame, list);
    }
}
