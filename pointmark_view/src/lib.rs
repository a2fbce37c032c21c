// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointmark View: the scale between image space and the rendered canvas.
//!
//! An annotation canvas draws its image at a **base** scale (chosen so the
//! image fits the available width, never enlarging it) multiplied by a user
//! **zoom** factor. Every pointer position arrives in view (canvas pixel)
//! space and must be divided by that combined scale before it is stored;
//! every stored point is multiplied by it before it is drawn or hit-tested.
//!
//! [`ViewScale`] keeps both factors, the image size, and the derived
//! transforms together so the two directions can never disagree.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use pointmark_view::ViewScale;
//!
//! let mut view = ViewScale::new(Size::new(1600.0, 900.0));
//!
//! // The host reports an 800px wide container: the image is shown at half size.
//! view.fit_to_width(800.0);
//! assert_eq!(view.base_scale(), 0.5);
//!
//! // The user zooms in 4x.
//! view.set_zoom(4.0);
//! assert_eq!(view.combined(), 2.0);
//!
//! let image_pt = view.view_to_image_point(Point::new(100.0, 50.0));
//! assert_eq!(image_pt, Point::new(50.0, 25.0));
//!
//! // The host sizes its embedding frame from this.
//! assert_eq!(view.frame_height(), 1800.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod scale;

pub use scale::ViewScale;
