pub mod handlers;
pub mod options;
