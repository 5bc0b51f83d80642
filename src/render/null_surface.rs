use crate::core::ElementSize;
use crate::error::TimelineResult;
use crate::render::{Surface, TimelineFrame};

pub const NULL_GLYPH_WIDTH_PX: f64 = 8.0;
pub const NULL_ELEMENT_HEIGHT_PX: f64 = 40.0;

/// Headless surface for tests and layout-only hosts.
///
/// Text content is measured at a fixed glyph width. Frames are validated but
/// not drawn.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub render_count: usize,
    pub last_point_count: usize,
    pub last_gridline_count: usize,
    pub last_label_count: usize,
    pub last_active_index: Option<usize>,
}

impl Surface for NullSurface {
    type Content = String;

    fn measure(&self, content: &String) -> ElementSize {
        ElementSize::new(
            content.chars().count() as f64 * NULL_GLYPH_WIDTH_PX,
            NULL_ELEMENT_HEIGHT_PX,
        )
    }

    fn render(&mut self, frame: &TimelineFrame<'_, String>) -> TimelineResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_point_count = frame.points.len();
        self.last_gridline_count = frame.gridlines.len();
        self.last_label_count = frame.labels.len();
        self.last_active_index = frame.active_index();
        Ok(())
    }
}
