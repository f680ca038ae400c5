//! Renderers module
//!
//! Turns an annotation graph into scene primitives. Token, arc and span
//! layouts each measure before they place, and the two renderers compose
//! them: one row with arcs above and spans below, or two aligned rows.

pub mod alignment;
pub mod config;
pub mod curves;
pub mod dependency_layout;
pub mod display_list;
pub mod levels;
pub mod scene;
pub mod single_sentence;
pub mod span_layout;
pub mod svg;
pub mod token_layout;

// Re-export commonly used types
pub use alignment::AlignmentRenderer;
pub use config::{
    AlignmentStyle, DependencyStyle, DiffColors, EdgeStyle, RenderConfig, SpanStyle, TokenStyle,
    TypeStyle,
};
pub use dependency_layout::DependencyLayout;
pub use display_list::{Dimensions, DisplayList};
pub use levels::{assign_levels, LevelAssignment};
pub use scene::{Color, FontMetrics, FontSpec, Point, Primitive, Rectangle, Scene, Stroke, TextMeasure};
pub use single_sentence::SingleSentenceRenderer;
pub use span_layout::SpanLayout;
pub use svg::SvgWriter;
pub use token_layout::{RequiredWidths, TokenBounds, TokenBox, TokenLayout};

use crate::models::{NlpInstance, RenderMode};

/// Lay out an instance into a scene and return the space it takes
///
/// The render mode of the instance picks the renderer. The scene origin is
/// the same before and after the call.
pub fn render<S: Scene + ?Sized>(
    instance: &NlpInstance,
    scene: &mut S,
    config: &RenderConfig,
) -> Dimensions {
    match instance.render_mode() {
        RenderMode::Single => SingleSentenceRenderer::render(instance, scene, config),
        RenderMode::Alignment => AlignmentRenderer::render(instance, scene, config),
    }
}
