// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size};

/// Uniform scale between image space and view (canvas pixel) space.
///
/// The combined scale is `base_scale * zoom`. Image space is anchored at the
/// canvas origin, so conversion is a pure scale with no pan.
#[derive(Clone, Debug)]
pub struct ViewScale {
    image_size: Size,
    base: f64,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    image_to_view: Affine,
}

impl ViewScale {
    /// Creates a view over an image of `image_size` at scale `1.0`.
    ///
    /// - Initial base scale and zoom are both `1.0`.
    /// - Zoom is clamped to the range `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(image_size: Size) -> Self {
        let mut view = Self {
            image_size: sanitize(image_size),
            base: 1.0,
            zoom: 1.0,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            image_to_view: Affine::IDENTITY,
        };
        view.rebuild_transform();
        view
    }

    /// Returns the image size in image pixels.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// Sets the image size. Returns `true` if it changed.
    ///
    /// Negative dimensions are treated as zero.
    pub fn set_image_size(&mut self, size: Size) -> bool {
        let size = sanitize(size);
        if self.image_size == size {
            return false;
        }
        self.image_size = size;
        true
    }

    /// Returns the base (fit-to-window) scale.
    #[must_use]
    pub fn base_scale(&self) -> f64 {
        self.base
    }

    /// Sets the base scale. Returns `true` if it changed.
    ///
    /// Non-finite or non-positive values are ignored.
    pub fn set_base_scale(&mut self, base: f64) -> bool {
        if !base.is_finite() || base <= 0.0 {
            log::warn!("ignoring invalid base scale {base}");
            return false;
        }
        if (self.base - base).abs() < f64::EPSILON {
            return false;
        }
        self.base = base;
        self.rebuild_transform();
        true
    }

    /// Picks the base scale so the image fits `container_width` view pixels.
    ///
    /// Images narrower than the container are shown at their natural size;
    /// the base scale never exceeds `1.0`. Returns `true` if the scale changed.
    pub fn fit_to_width(&mut self, container_width: f64) -> bool {
        if self.image_size.width <= 0.0 {
            return false;
        }
        let ratio = container_width / self.image_size.width;
        self.set_base_scale(ratio.min(1.0))
    }

    /// Returns the current user zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    /// Returns `true` if the effective zoom changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {zoom}");
            return false;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = clamped;
        self.rebuild_transform();
        true
    }

    /// Returns the zoom range as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range. Returns `true` if that
    /// changed the effective zoom.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> bool {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom.max(f64::MIN_POSITIVE);
        self.max_zoom = max_zoom.max(self.min_zoom);
        self.set_zoom(self.zoom)
    }

    /// Returns `base_scale * zoom`, the factor from image to view pixels.
    #[must_use]
    pub fn combined(&self) -> f64 {
        self.base * self.zoom
    }

    /// Converts a view-space pointer position into image space by dividing by
    /// the combined scale.
    #[must_use]
    pub fn view_to_image_point(&self, pt: Point) -> Point {
        let scale = self.combined();
        Point::new(pt.x / scale, pt.y / scale)
    }

    /// Converts an image-space position into view space.
    #[must_use]
    pub fn image_to_view_point(&self, pt: Point) -> Point {
        self.image_to_view * pt
    }

    /// Converts a length in view pixels into image pixels.
    #[must_use]
    pub fn view_to_image_len(&self, len: f64) -> f64 {
        len / self.combined()
    }

    /// Returns the transform from image space to view space.
    #[must_use]
    pub fn image_to_view(&self) -> Affine {
        self.image_to_view
    }

    /// Returns the size of the rendered canvas in view pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.image_size * self.combined()
    }

    /// Returns the rendered canvas height, which hosts use to size the area
    /// the canvas is embedded in.
    #[must_use]
    pub fn frame_height(&self) -> f64 {
        self.canvas_size().height
    }

    fn rebuild_transform(&mut self) {
        self.image_to_view = Affine::scale(self.combined());
    }
}

fn sanitize(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}
