// Session view state as an explicit value with reducer-style transitions.

pub mod handlers;
pub mod reducer;
