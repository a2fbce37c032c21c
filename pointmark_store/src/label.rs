// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

/// An opaque RGB color used to draw points of a given label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl LabelColor {
    /// Pure red, the color of the first label by default.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green, the color of the second label by default.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue, the color of the third label by default.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// White, used for labels past the default palette and for unknown labels.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` or `#rgb` hex string. The leading `#` is optional.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // `#abc` is shorthand for `#aabbcc`.
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const DEFAULT_PALETTE: [LabelColor; 3] = [LabelColor::RED, LabelColor::GREEN, LabelColor::BLUE];

/// The ordered list of labels a host allows, with a color per label.
///
/// Order is significant: a label's position is its exported `label_index`.
/// Duplicate labels are dropped on construction (first occurrence wins), so
/// every label maps to exactly one index.
///
/// An empty set means labels are not required; see [`LabelSet::accepts`].
#[derive(Clone, Debug, Default)]
pub struct LabelSet {
    labels: Vec<String>,
    colors: Vec<LabelColor>,
    index: HashMap<String, usize>,
}

impl LabelSet {
    /// Builds a label set, dropping duplicates and assigning default colors.
    ///
    /// The first three labels are red, green and blue; the rest are white
    /// until [`LabelSet::set_color`] says otherwise.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for label in labels {
            let label = label.into();
            if set.index.contains_key(&label) {
                log::debug!("dropping duplicate label {label:?}");
                continue;
            }
            let idx = set.labels.len();
            set.colors
                .push(DEFAULT_PALETTE.get(idx).copied().unwrap_or(LabelColor::WHITE));
            set.index.insert(label.clone(), idx);
            set.labels.push(label);
        }
        set
    }

    /// Overrides the color of `label`. Returns `false` if the label is unknown.
    pub fn set_color(&mut self, label: &str, color: LabelColor) -> bool {
        match self.index.get(label) {
            Some(&idx) => {
                self.colors[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no labels were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Returns the label at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Returns the position of `label` in the set.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns `true` if `label` is a member of the set.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Returns `true` if a point may carry `label`.
    ///
    /// A non-empty set only accepts its members. An empty set accepts any
    /// label, including the empty "unassigned" label.
    #[must_use]
    pub fn accepts(&self, label: &str) -> bool {
        self.is_empty() || self.contains(label)
    }

    /// Returns the display color for `label`; white if the label is unknown.
    #[must_use]
    pub fn color_of(&self, label: &str) -> LabelColor {
        self.index_of(label)
            .map_or(LabelColor::WHITE, |idx| self.colors[idx])
    }
}
