//! ScatterSelect Application
//!
//! Windowing, input routing and rendering around the rectangle selector,
//! demonstrated on a scatter plot.

mod app;
mod scatter;

pub use app::{App, AppConfig, AppError};
pub use scatter::ScatterPlot;
