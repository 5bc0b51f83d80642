use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};

use super::{MinHour, TimelineConfig};

pub(super) fn validate_viewport(viewport: Viewport) -> TimelineResult<Viewport> {
    if !viewport.is_valid() {
        return Err(TimelineError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

pub(super) fn validate_timeline_config(config: &TimelineConfig) -> TimelineResult<()> {
    validate_viewport(config.viewport)?;

    if let MinHour::Fixed { pixels_per_hour } = config.min_hour {
        if !pixels_per_hour.is_finite() || pixels_per_hour <= 0.0 {
            return Err(TimelineError::InvalidData(
                "min_hour pixels_per_hour must be finite and > 0".to_owned(),
            ));
        }
    }
    if !config.min_plot_spacing.is_finite() || config.min_plot_spacing <= 0.0 {
        return Err(TimelineError::InvalidData(
            "min_plot_spacing must be finite and > 0".to_owned(),
        ));
    }
    for (name, value) in [
        ("padding", config.padding),
        ("activation_dist", config.activation_dist),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }

    Ok(())
}
