//! # StatusBar Component
//!
//! Top line showing which backend is in use and the current status.
//!
//! Stateless: all data arrives as props.
//!
//! 1. **Busy**: `"Concierge (api: http://…) | Loading... | ⠙"`
//! 2. **Status message**: `"Concierge (api: http://…) | 3 cities"`
//! 3. **Default**: `"Concierge (api: http://…)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct StatusBar {
    /// Backend base URL
    pub api_url: String,
    /// Transient status (e.g. "3 cities", "Unknown city code: XX")
    pub status_message: String,
    /// Spinner glyph while a fetch is outstanding
    pub busy_indicator: Option<&'static str>,
}

impl StatusBar {
    pub fn new(api_url: String, status_message: String, busy_indicator: Option<&'static str>) -> Self {
        Self {
            api_url,
            status_message,
            busy_indicator,
        }
    }

    fn title_text(&self) -> String {
        let mut text = format!("Concierge (api: {})", self.api_url);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if let Some(glyph) = self.busy_indicator {
            text.push_str(" | ");
            text.push_str(glyph);
        }
        text
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.title_text()), area);
    }
}
