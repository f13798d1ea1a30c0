pub mod projection_service;

pub use projection_service::{ProjectionReport, ProjectionService, UpcomingView};
