use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::interaction::{Activation, TrackerState};
use crate::render::Surface;

use super::TimelineEngine;
use super::engine::ActivePoint;

/// Scroll offset the host should apply after `scroll_to_activate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub offset: f64,
    /// When set, the host animates toward `offset` and reports completion
    /// through `complete_programmatic_scroll`.
    pub animate: bool,
}

impl<S: Surface> TimelineEngine<S> {
    /// Centers the point at `index` and makes it active.
    ///
    /// Pending layout work runs first so the target offset is current.
    /// Returns `None` when no laid-out point has that index.
    pub fn scroll_to_activate(
        &mut self,
        index: usize,
        animate: bool,
        notify: bool,
    ) -> Option<ScrollRequest> {
        self.run_pending_tasks();
        let layout = self.layouts.get(index)?;
        let offset = layout.left - f64::from(self.config.viewport.width) / 2.0;
        self.scroll_offset = offset;
        debug!(index, offset, animate, notify, "scroll to point");

        let activation = Activation { index, notify };
        if animate {
            self.tracker.begin_transition(activation);
        } else {
            self.tracker.record_offset(offset);
            self.apply_activation(activation);
        }
        Some(ScrollRequest { offset, animate })
    }

    /// Host notification that an animated programmatic scroll finished.
    ///
    /// Returns the index activated, if a transition was in flight.
    pub fn complete_programmatic_scroll(&mut self) -> Option<usize> {
        if self.tracker.state() != TrackerState::Transitioning {
            return None;
        }
        let activation = self.tracker.finish_transition()?;
        self.tracker.record_offset(self.scroll_offset);
        self.apply_activation(activation);
        Some(activation.index)
    }

    /// Host scroll event. Returns the newly active index, if it changed.
    ///
    /// Pending layout work runs first so zones match the current points.
    pub fn on_scroll(&mut self, offset: f64) -> Option<usize> {
        if !offset.is_finite() {
            warn!(offset, "ignoring non-finite scroll offset");
            return None;
        }
        if self.tracker.state() == TrackerState::Transitioning {
            trace!(offset, "scroll during programmatic transition");
            return None;
        }
        self.run_pending_tasks();
        self.scroll_offset = offset;
        let width = f64::from(self.config.viewport.width);
        let activation = self.tracker.resolve(offset, width)?;
        self.apply_activation(activation);
        Some(activation.index)
    }

    fn apply_activation(&mut self, activation: Activation) {
        let index = activation.index;
        let Some(point) = self.points.get(index) else {
            return;
        };
        self.active = Some(ActivePoint { id: point.id, index });
        self.tracker.set_active(index);
        trace!(index, notify = activation.notify, "activate point");
        if activation.notify {
            if let Some(callback) = self.on_index_change.as_mut() {
                callback(index, point);
            }
        }
    }
}
