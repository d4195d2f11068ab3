//! labelink Render Library
//!
//! Renderer abstraction and implementations for labelink.
//! The default implementation draws annotation shapes into a Vello scene.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, paint_shapes};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{VelloRenderer, VelloSurface};
