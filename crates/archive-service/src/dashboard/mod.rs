//! Archive-wide and per-user dashboard figures.

pub mod service;

pub use service::{DashboardService, DashboardStats};
