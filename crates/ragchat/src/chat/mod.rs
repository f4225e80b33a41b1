//! Session chat memory

mod log;

pub use log::ConversationLog;
