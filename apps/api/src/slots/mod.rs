// Slot filling: whitelisted merge of conversationally extracted data into the
// student form, and the chat exchange that produces it.

pub mod chat;
pub mod handlers;
pub mod merge;
