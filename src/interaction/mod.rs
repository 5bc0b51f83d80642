use serde::{Deserialize, Serialize};
use tracing::trace;

/// Pixel interval that activates one point when the viewport center is in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationZone {
    pub before: f64,
    pub after: f64,
    pub index: usize,
}

impl ActivationZone {
    #[must_use]
    pub fn contains(self, center: f64) -> bool {
        self.before <= center && center < self.after
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerState {
    Idle,
    /// A programmatic scroll is in flight; scroll offsets are ignored.
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Forward,
    Backward,
    Stationary,
}

/// A newly active point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub index: usize,
    /// Whether the host callback should observe this change.
    pub notify: bool,
}

/// Maps scroll offsets to the active point.
///
/// Between two zones the previously held point stays active; entering that gap
/// with neither neighbour active picks the point behind the scroll direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollActivationTracker {
    zones: Vec<ActivationZone>,
    state: TrackerState,
    active: Option<usize>,
    last_offset: Option<f64>,
    pending: Option<Activation>,
}

impl Default for ScrollActivationTracker {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            state: TrackerState::Idle,
            active: None,
            last_offset: None,
            pending: None,
        }
    }
}

impl ScrollActivationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the zone table with `[p - distance, p + distance)` per
    /// position, splitting overlapping neighbours at their midpoint.
    pub fn rebuild(&mut self, positions: &[f64], activation_distance: f64) {
        let distance = if activation_distance.is_finite() {
            activation_distance.max(0.0)
        } else {
            0.0
        };
        self.zones = positions
            .iter()
            .enumerate()
            .map(|(index, position)| ActivationZone {
                before: position - distance,
                after: position + distance,
                index,
            })
            .collect();

        for index in 1..positions.len() {
            let (left, right) = (positions[index - 1], positions[index]);
            if right - distance < left + distance {
                let midpoint = (left + right) / 2.0;
                self.zones[index - 1].after = midpoint;
                self.zones[index].before = midpoint;
            }
        }

        if self.active.is_some_and(|active| active >= self.zones.len()) {
            self.active = None;
        }
        trace!(zones = self.zones.len(), distance, "rebuilt activation zones");
    }

    #[must_use]
    pub fn zones(&self) -> &[ActivationZone] {
        &self.zones
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, index: usize) {
        self.active = Some(index);
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Resolves a host scroll offset to a newly active point, if any.
    pub fn resolve(&mut self, scroll_offset: f64, viewport_width: f64) -> Option<Activation> {
        if self.state == TrackerState::Transitioning || !scroll_offset.is_finite() {
            return None;
        }
        let direction = match self.last_offset {
            None => ScrollDirection::Backward,
            Some(previous) if scroll_offset > previous => ScrollDirection::Forward,
            Some(previous) if scroll_offset < previous => ScrollDirection::Backward,
            Some(_) => ScrollDirection::Stationary,
        };
        self.last_offset = Some(scroll_offset);
        let center = scroll_offset + viewport_width / 2.0;

        let mut previous: Option<ActivationZone> = None;
        for zone in &self.zones {
            if zone.contains(center) {
                return self.activate(zone.index);
            }
            let gap_behind = previous.filter(|prev| prev.after <= center && center < zone.before);
            if let Some(prev) = gap_behind {
                let held = self.active == Some(prev.index) || self.active == Some(zone.index);
                if held {
                    return None;
                }
                return match direction {
                    ScrollDirection::Forward => self.activate(prev.index),
                    ScrollDirection::Backward => self.activate(zone.index),
                    ScrollDirection::Stationary => None,
                };
            }
            previous = Some(*zone);
        }
        None
    }

    fn activate(&mut self, index: usize) -> Option<Activation> {
        if self.active == Some(index) {
            return None;
        }
        self.active = Some(index);
        Some(Activation {
            index,
            notify: true,
        })
    }

    /// Enters the transitioning state for a programmatic scroll toward
    /// `target`.
    pub fn begin_transition(&mut self, target: Activation) {
        self.state = TrackerState::Transitioning;
        self.pending = Some(target);
    }

    /// Leaves the transitioning state, activating the pending target.
    pub fn finish_transition(&mut self) -> Option<Activation> {
        if self.state != TrackerState::Transitioning {
            return None;
        }
        self.state = TrackerState::Idle;
        let target = self.pending.take()?;
        if target.index >= self.zones.len() && !self.zones.is_empty() {
            return None;
        }
        self.active = Some(target.index);
        Some(target)
    }

    /// Forgets the last observed offset so the next scroll reads as backward.
    pub fn reset_direction(&mut self) {
        self.last_offset = None;
    }

    pub fn record_offset(&mut self, scroll_offset: f64) {
        self.last_offset = Some(scroll_offset);
    }
}
