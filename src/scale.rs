//! Mapping between display-space and source-image coordinates.
//!
//! The loaded image is shown scaled down to fit the canvas, never
//! enlarged. Grid geometry lives in display space and is mapped back to
//! source pixels when slicing.

/// Linear scale between the displayed image and the source pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMapper {
    scale: f32,
}

impl Default for ScaleMapper {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl ScaleMapper {
    /// Scale that fits `image_width` x `image_height` into the given
    /// canvas. Never scales up.
    pub fn fit(canvas_width: f32, canvas_height: f32, image_width: f32, image_height: f32) -> Self {
        if image_width <= 0.0 || image_height <= 0.0 {
            return Self { scale: 1.0 };
        }
        let scale = (canvas_width / image_width)
            .min(canvas_height / image_height)
            .min(1.0);
        Self { scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Display coordinate to source pixels. A non-positive scale (canvas
    /// not laid out yet) maps 1:1 instead of dividing by zero.
    pub fn to_source(&self, display: f32) -> f32 {
        if self.scale > 0.0 {
            display / self.scale
        } else {
            display
        }
    }

    /// Source pixels to display coordinates.
    pub fn to_display(&self, source: f32) -> f32 {
        if self.scale > 0.0 {
            source * self.scale
        } else {
            source
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_shrinks_to_smaller_axis() {
        let mapper = ScaleMapper::fit(200.0, 300.0, 400.0, 300.0);
        assert_eq!(mapper.scale(), 0.5);
        assert_eq!(mapper.to_source(100.0), 200.0);
        assert_eq!(mapper.to_display(200.0), 100.0);
    }

    #[test]
    fn fit_never_upscales() {
        let mapper = ScaleMapper::fit(4000.0, 3000.0, 400.0, 300.0);
        assert_eq!(mapper.scale(), 1.0);
        assert_eq!(mapper.to_source(123.0), 123.0);
    }

    #[test]
    fn zero_scale_maps_one_to_one() {
        // Canvas reports zero size before the first layout pass.
        let mapper = ScaleMapper::fit(0.0, 0.0, 400.0, 300.0);
        assert_eq!(mapper.scale(), 0.0);
        assert_eq!(mapper.to_source(50.0), 50.0);
        assert_eq!(mapper.to_display(50.0), 50.0);
    }

    #[test]
    fn degenerate_image_maps_one_to_one() {
        let mapper = ScaleMapper::fit(800.0, 600.0, 0.0, 0.0);
        assert_eq!(mapper.scale(), 1.0);
    }
}
