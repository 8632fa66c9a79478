use crate::target::RenderTarget;

/// Logical (CSS pixel) viewport plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub logical_width: f64,
    pub logical_height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(logical_width: f64, logical_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            logical_width,
            logical_height,
            device_pixel_ratio,
        }
    }

    /// Framebuffer size in physical pixels, never below 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        let to_px = |v: f64| {
            if v.is_finite() && v > 0.0 {
                ((v * dpr).floor() as u32).max(1)
            } else {
                1
            }
        };
        (to_px(self.logical_width), to_px(self.logical_height))
    }

    pub fn aspect(&self) -> f32 {
        let (w, h) = self.physical_size();
        w as f32 / h as f32
    }
}

/// Apply the viewport's physical size to every target in place.
///
/// Returns the number of targets whose size actually changed, so repeated
/// calls with an unchanged viewport report zero.
pub fn resize_targets<'a>(
    viewport: &Viewport,
    targets: impl IntoIterator<Item = &'a mut RenderTarget>,
) -> usize {
    let (width, height) = viewport.physical_size();
    targets
        .into_iter()
        .map(|t| t.set_size(width, height))
        .filter(|changed| *changed)
        .count()
}
