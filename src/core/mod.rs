pub mod services;
pub mod time;

pub use services::{ProjectionReport, ProjectionService, UpcomingView};
pub use time::{Clock, FixedClock, SystemClock};
