mod frame;
mod null_surface;
mod primitives;

pub use frame::{PlacedPoint, TimelineFrame};
pub use null_surface::{NULL_ELEMENT_HEIGHT_PX, NULL_GLYPH_WIDTH_PX, NullSurface};
pub use primitives::{Gridline, GridlineKind, PointLayout, TierLabel};

use crate::core::ElementSize;
use crate::error::TimelineResult;

/// Contract implemented by the host that owns visual elements.
///
/// The engine asks the surface to measure point content during layout and
/// hands it a fully resolved `TimelineFrame` to draw.
pub trait Surface {
    type Content;

    fn measure(&self, content: &Self::Content) -> ElementSize;

    fn render(&mut self, frame: &TimelineFrame<'_, Self::Content>) -> TimelineResult<()>;
}
