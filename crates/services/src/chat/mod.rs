mod controller;

pub use controller::{ChatController, ChatEntry, ChatReply};
