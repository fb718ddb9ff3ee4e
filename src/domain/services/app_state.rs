#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::FinancialTable;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;

/// Seed entry shown before any user interaction.
pub const GREETING: &str = "Hello! I'm a financial analysis assistant. You can ask about growth, asset structure, or solvency, or request extra detail based on the table loaded in this session.";

/// Seed entry shown after the transcript has been cleared.
pub const RESET_MESSAGE: &str = "The conversation has been reset. How can I help you?";

pub struct AppState {
    pub attach_context: bool,
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub table: Option<FinancialTable>,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub async fn new(backend: &BackendBox) -> Result<AppState> {
        let mut app_state = AppState {
            attach_context: Config::get(ConfigKey::AttachContext) == "true",
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            scroll: Scroll::default(),
            table: Some(FinancialTable::sample()),
            waiting_for_backend: false,
        };

        app_state.messages.push(Message::new(Author::Assistant, GREETING));

        if let Err(err) = backend.health_check().await {
            app_state.messages.push(Message::new_with_type(
                Author::Assistant,
                MessageType::Error,
                &format!("It looks like the {} backend isn't reachable. You can keep typing, but requests will fail until it is.\n\nError: {err}", backend.name()),
            ));
        }

        return Ok(app_state);
    }

    /// Returns `(should_break, should_continue)` for the UI loop.
    pub fn handle_slash_commands(&mut self, input_str: &str) -> (bool, bool) {
        if let Some(command) = SlashCommand::parse(input_str) {
            if command.is_quit() {
                return (true, false);
            }
            if command.is_clear() {
                self.clear_history();
                return (false, true);
            }
            if command.is_context_toggle() {
                self.toggle_context();
                return (false, true);
            }
            if command.is_help() {
                self.add_message(Message::new(Author::Assistant, &help_text()));
                return (false, true);
            }
        }

        return (false, false);
    }

    pub fn handle_backend_message(&mut self, message: Message) {
        self.waiting_for_backend = false;
        self.add_message(message);
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    /// Resets the transcript to a single seed entry, discarding everything
    /// that came before.
    pub fn clear_history(&mut self) {
        self.messages = vec![Message::new(Author::Assistant, RESET_MESSAGE)];
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn toggle_context(&mut self) {
        self.attach_context = !self.attach_context;

        let mut state = "off";
        if self.attach_context {
            state = "on";
        }
        self.add_message(Message::new(
            Author::Assistant,
            &format!("Table context is now {state} for upcoming questions."),
        ));
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
