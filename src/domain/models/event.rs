use super::Message;

pub enum Event {
    BackendMessage(Message),
}
