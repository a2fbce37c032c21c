// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Initialization values supplied once by the host.

use std::collections::BTreeMap;
use std::fmt;

use kurbo::Size;
use pointmark_export::ExportedPoint;
use pointmark_store::{LabelColor, LabelSet, StoreError};
use serde::{Deserialize, Serialize};

use crate::{CommitPolicy, HitParams, Mode};

/// Everything a host passes to set up an annotation canvas.
///
/// Field names follow the host's argument names; older spellings are
/// accepted as aliases. Missing fields take their [`Default`] values.
///
/// ```rust
/// use pointmark_interaction::{AnnotatorConfig, CommitPolicy, Mode};
///
/// let config = AnnotatorConfig::from_json(r#"{
///     "image_size": [640, 480],
///     "label_list": ["Positive", "Negative"],
///     "points_info": [{"point": [10, 20], "label": "Negative", "label_id": 1}],
///     "mode": "Del",
///     "use_space": true
/// }"#).unwrap();
///
/// assert_eq!(config.mode, Mode::Delete);
/// assert_eq!(config.commit_policy(), CommitPolicy::on_space());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Image `[width, height]` in pixels.
    pub image_size: [f64; 2],
    /// Ordered label list; a label's position is its exported index.
    pub label_list: Vec<String>,
    /// Label → `#rrggbb` color overrides.
    pub color_map: BTreeMap<String, String>,
    /// Initial points, in z-order.
    #[serde(alias = "points_info")]
    pub points: Vec<ExportedPoint>,
    /// Glyph radius in view pixels.
    pub point_width: f64,
    /// Glyph outline width in view pixels.
    pub stroke_width: f64,
    /// Base (fit-to-window) scale.
    #[serde(alias = "scale")]
    pub base_scale: f64,
    /// User zoom factor.
    pub zoom: f64,
    /// Optional `[min, max]` zoom range.
    pub zoom_limits: Option<[f64; 2]>,
    /// Initial tool.
    pub mode: Mode,
    /// Label given to newly created points.
    pub label: String,
    /// Opacity of the optional mask overlay.
    #[serde(alias = "mask_trans")]
    pub mask_opacity: f64,
    /// Opacity of the optional contour overlay.
    #[serde(alias = "contour_trans")]
    pub contour_opacity: f64,
    /// Defer commits to the space bar.
    pub use_space: bool,
    /// Defer commits to this key instead; takes precedence over `use_space`.
    pub commit_key: Option<String>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        let hit = HitParams::default();
        Self {
            image_size: [0.0, 0.0],
            label_list: Vec::new(),
            color_map: BTreeMap::new(),
            points: Vec::new(),
            point_width: hit.point_size,
            stroke_width: hit.stroke_width,
            base_scale: 1.0,
            zoom: 1.0,
            zoom_limits: None,
            mode: Mode::default(),
            label: String::new(),
            mask_opacity: 1.0,
            contour_opacity: 1.0,
            use_space: false,
            commit_key: None,
        }
    }
}

impl AnnotatorConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `text` is not a valid configuration
    /// object. Values are validated later, when a controller is built.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the commit policy the flags describe.
    #[must_use]
    pub fn commit_policy(&self) -> CommitPolicy {
        match (&self.commit_key, self.use_space) {
            (Some(key), _) => CommitPolicy::on_key(key.clone()),
            (None, true) => CommitPolicy::on_space(),
            (None, false) => CommitPolicy::Immediate,
        }
    }

    /// Returns the image size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidImageSize`] unless both dimensions are
    /// finite and positive.
    pub fn image_size(&self) -> Result<Size, ConfigError> {
        let [width, height] = self.image_size;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Size::new(width, height))
        } else {
            Err(ConfigError::InvalidImageSize(self.image_size))
        }
    }

    /// Builds the label set, applying color overrides.
    ///
    /// Overrides for labels outside the list are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] for a color that is not `#rrggbb`
    /// or `#rgb`.
    pub fn label_set(&self) -> Result<LabelSet, ConfigError> {
        let mut labels = LabelSet::new(self.label_list.iter().cloned());
        for (label, value) in &self.color_map {
            let color = LabelColor::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                label: label.clone(),
                value: value.clone(),
            })?;
            if !labels.set_color(label, color) {
                log::warn!("ignoring color for unknown label {label:?}");
            }
        }
        Ok(labels)
    }

    /// Returns the glyph size used for hit testing.
    #[must_use]
    pub fn hit_params(&self) -> HitParams {
        HitParams {
            point_size: self.point_width.max(0.0),
            stroke_width: self.stroke_width.max(0.0),
            ..HitParams::default()
        }
    }

    pub(crate) fn check_scales(&self) -> Result<(), ConfigError> {
        for scale in [self.base_scale, self.zoom] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::InvalidScale(scale));
            }
        }
        Ok(())
    }
}

/// Error returned when a configuration cannot set up a controller.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration is not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// The image size is not finite and positive.
    InvalidImageSize([f64; 2]),
    /// A base scale or zoom is not finite and positive.
    InvalidScale(f64),
    /// A color override could not be parsed.
    InvalidColor {
        /// The label the color was given for.
        label: String,
        /// The unparseable value.
        value: String,
    },
    /// The initial points were rejected by the store.
    Store(StoreError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid annotator configuration: {err}"),
            Self::InvalidImageSize([w, h]) => write!(f, "invalid image size {w}x{h}"),
            Self::InvalidScale(scale) => write!(f, "invalid view scale {scale}"),
            Self::InvalidColor { label, value } => {
                write!(f, "invalid color {value:?} for label {label:?}")
            }
            Self::Store(err) => write!(f, "invalid initial points: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
