use crate::bootstrap::{Event, Surface};
use macroquad::prelude::*;
use shared::{ServerEntry, ServerOption};

const BACKGROUND: Color = Color::new(0.1, 0.1, 0.1, 1.0);
const DIMMED: Color = Color::new(0.27, 0.27, 0.27, 1.0);
const ERROR_RED: Color = Color::new(1.0, 0.27, 0.27, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    NoServers,
    DirectoryError,
    Launching,
}

impl Status {
    fn message(&self) -> &'static str {
        match self {
            Status::Loading => "Loading servers...",
            Status::Ready => "Press Enter to play",
            Status::NoServers => "No servers available",
            Status::DirectoryError => "Server directory unavailable",
            Status::Launching => "Launching...",
        }
    }
}

/// The pre-game window: name field, server list and status line
pub struct LandingPage {
    width: f32,
    height: f32,
    name: String,
    options: Vec<ServerOption>,
    selected: Option<ServerEntry>,
    status: Status,
    torn_down: bool,
}

impl LandingPage {
    pub fn new(width: usize, height: usize, name: String) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            name,
            options: Vec::new(),
            selected: None,
            status: Status::Loading,
            torn_down: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn accepts_input(&self) -> bool {
        !self.torn_down && self.status != Status::Launching
    }

    pub fn type_char(&mut self, c: char) -> Option<Event> {
        if !self.accepts_input() || c.is_control() {
            return None;
        }
        self.name.push(c);
        Some(Event::NameChanged(self.name.clone()))
    }

    pub fn backspace(&mut self) -> Option<Event> {
        if !self.accepts_input() {
            return None;
        }
        self.name.pop()?;
        Some(Event::NameChanged(self.name.clone()))
    }

    /// Collects form edits made this frame
    pub fn read_form(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        while let Some(c) = get_char_pressed() {
            events.extend(self.type_char(c));
        }
        if is_key_pressed(KeyCode::Backspace) {
            events.extend(self.backspace());
        }
        if self.accepts_input() {
            if is_key_pressed(KeyCode::Down) {
                events.push(Event::SelectNext);
            }
            if is_key_pressed(KeyCode::Up) {
                events.push(Event::SelectPrevious);
            }
        }

        events
    }

    pub fn render(&self, launch_enabled: bool) {
        if self.torn_down {
            return;
        }

        clear_background(BACKGROUND);

        let margin = 20.0;
        draw_text("Name", margin, 36.0, 20.0, GRAY);
        draw_rectangle_lines(margin, 46.0, self.width - margin * 2.0, 32.0, 2.0, WHITE);
        draw_text(&self.name, margin + 8.0, 69.0, 24.0, WHITE);

        draw_text("Server", margin, 110.0, 20.0, GRAY);
        for (i, option) in self.options.iter().enumerate() {
            let y = 140.0 + i as f32 * 28.0;
            let selected = self.selected.as_ref() == Some(&option.address);
            let (marker, color) = if selected { ("> ", GREEN) } else { ("  ", WHITE) };
            draw_text(&format!("{}{}", marker, option.label), margin, y, 24.0, color);
        }

        let status_color = match self.status {
            Status::DirectoryError => ERROR_RED,
            Status::Ready if launch_enabled => GREEN,
            Status::Launching => YELLOW,
            _ => DIMMED,
        };
        draw_text(
            self.status.message(),
            margin,
            self.height - margin,
            24.0,
            status_color,
        );
    }
}

impl Surface for LandingPage {
    fn show_servers(&mut self, options: &[ServerOption], selected: Option<&ServerEntry>) {
        self.options = options.to_vec();
        self.selected = selected.cloned();
        self.status = if options.is_empty() {
            Status::NoServers
        } else {
            Status::Ready
        };
    }

    fn show_directory_error(&mut self) {
        self.options.clear();
        self.selected = None;
        self.status = Status::DirectoryError;
    }

    fn show_launching(&mut self) {
        self.status = Status::Launching;
    }

    fn teardown(&mut self) {
        self.torn_down = true;
        self.options.clear();
    }
}
