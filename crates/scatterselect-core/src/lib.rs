//! ScatterSelect Core Library
//!
//! Platform-agnostic rectangle selection for 2D canvases: the drag state
//! machine, box normalization, indicator abstraction, style and configuration.

pub mod config;
pub mod geometry;
pub mod indicator;
pub mod input;
pub mod selector;
pub mod style;

pub use config::{ConfigError, ConfigResult, ReleasePolicy, SelectorConfig};
pub use geometry::{BoundingBox, PointerPosition, compute_box};
pub use indicator::{Indicator, IndicatorState};
pub use input::{MouseButton, PointerEvent, SelectionInput};
pub use selector::{DragSession, RectangleSelector, SelectionCallback};
pub use style::{SelectionStyle, SerializableColor};
