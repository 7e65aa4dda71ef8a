// Results: filter → sort → chart projection over scored recommendations,
// plus CSV export of the same ordering.

pub mod export;
pub mod handlers;
pub mod pipeline;
