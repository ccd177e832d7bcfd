//! ScatterSelect Render Library
//!
//! Renderer abstraction for the scatter plot and its selection indicator.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{GridStyle, IndicatorPaint, PlotPoint, RenderContext, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
