use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

use crate::error::ParameterError;

/// Deepest tree the renderers accept. Work grows exponentially with depth.
pub const MAX_DEPTH: u32 = 20;

/// Longest trunk `length · (1 + length_variation)` may produce.
pub const MAX_BRANCH_LENGTH: f64 = 10_000.0;

/// Parameters for one tree drawing.
///
/// See [`Parameter::range`] for the slider envelope of each field; the
/// renderers themselves only require [`TreeParameters::validate`] to pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeParameters {
    /// Number of branch generations below (and including) the trunk.
    pub depth: u32,
    /// Trunk length; deeper branches scale down linearly.
    pub length: f64,
    /// Trunk stroke width; deeper branches scale down linearly.
    pub width: f64,
    /// Angle (radians) each child deviates from its parent.
    pub spread: f64,
    /// Maximum fractional deviation of a branch's length.
    pub length_variation: f64,
    /// Angular drift added per segment.
    pub curviness: f64,
    /// How likely a segment is to sprout an extra side branch.
    pub density: f64,
    /// PRNG seed. Any integer is accepted when deserializing and reduced
    /// mod 2^32, so `-1` becomes `u32::MAX`.
    #[serde(deserialize_with = "seed_from_integer")]
    pub seed: u32,
    /// Blend between the deterministic skeleton (0.0) and the fully
    /// randomized tree (1.0).
    pub randomness: f64,
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self::daves()
    }
}

impl TreeParameters {
    /// A bushy, curvy, fully randomized tree.
    pub fn daves() -> Self {
        Self {
            depth: 10,
            length: 74.0,
            width: 9.0,
            spread: 0.325,
            length_variation: 0.35,
            curviness: 0.43,
            density: 0.1034,
            seed: 7,
            randomness: 1.0,
        }
    }

    /// A tall, thin, fully deterministic tree.
    pub fn ellies() -> Self {
        Self {
            depth: 15,
            length: 46.0,
            width: 2.0,
            spread: 0.225,
            length_variation: 1.3,
            curviness: 0.0,
            density: 0.03,
            seed: 1,
            randomness: 0.0,
        }
    }

    /// Checks every field against the domain the renderers accept.
    ///
    /// ### Errors
    /// The first offending field, as a [`ParameterError`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.depth > MAX_DEPTH {
            return Err(ParameterError::OutOfRange {
                name: "depth",
                value: f64::from(self.depth),
                min: 0.0,
                max: f64::from(MAX_DEPTH),
            });
        }
        positive("length", self.length)?;
        positive("width", self.width)?;
        finite("spread", self.spread)?;
        finite("curviness", self.curviness)?;
        in_range("lengthVariation", self.length_variation, 0.0, f64::MAX)?;
        in_range(
            "length * (1 + lengthVariation)",
            self.length * (1.0 + self.length_variation),
            0.0,
            MAX_BRANCH_LENGTH,
        )?;
        in_range("density", self.density, 0.0, 1.0)?;
        in_range("randomness", self.randomness, 0.0, 1.0)?;
        Ok(())
    }

    pub fn get(&self, p: Parameter) -> f64 {
        match p {
            Parameter::Depth => f64::from(self.depth),
            Parameter::Length => self.length,
            Parameter::Width => self.width,
            Parameter::Spread => self.spread,
            Parameter::LengthVariation => self.length_variation,
            Parameter::Curviness => self.curviness,
            Parameter::Density => self.density,
            Parameter::Seed => f64::from(self.seed),
            Parameter::Randomness => self.randomness,
        }
    }

    /// Sets a field from a slider value; integer fields are rounded and
    /// saturate at their type's bounds.
    pub fn set(&mut self, p: Parameter, value: f64) {
        match p {
            Parameter::Depth => self.depth = value.round() as u32,
            Parameter::Length => self.length = value,
            Parameter::Width => self.width = value,
            Parameter::Spread => self.spread = value,
            Parameter::LengthVariation => self.length_variation = value,
            Parameter::Curviness => self.curviness = value,
            Parameter::Density => self.density = value,
            Parameter::Seed => self.seed = value.round() as u32,
            Parameter::Randomness => self.randomness = value,
        }
    }
}

fn seed_from_integer<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    i64::deserialize(d).map(|seed| seed as u32)
}

fn finite(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Names one field of [`TreeParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    Depth,
    Length,
    Width,
    Spread,
    LengthVariation,
    Curviness,
    Density,
    Seed,
    Randomness,
}

/// Slider metadata for a [`Parameter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSetting {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Depth,
        Parameter::Length,
        Parameter::Width,
        Parameter::Spread,
        Parameter::LengthVariation,
        Parameter::Curviness,
        Parameter::Density,
        Parameter::Seed,
        Parameter::Randomness,
    ];

    /// Suggested slider range for this parameter.
    pub const fn range(self) -> RangeSetting {
        let (label, min, max, step) = match self {
            Parameter::Depth => ("Depth", 1.0, 15.0, 1.0),
            Parameter::Length => ("Length", 10.0, 100.0, 1.0),
            Parameter::Width => ("Width", 1.0, 15.0, 1.0),
            Parameter::Spread => ("Spread", 0.0, FRAC_PI_4, 0.025),
            Parameter::LengthVariation => ("Length Variation", 0.0, 1.0, 0.05),
            Parameter::Curviness => ("Curviness", 0.0, PI, 0.01),
            Parameter::Density => ("Density", 0.0, 0.15, 0.0001),
            Parameter::Seed => ("Seed", 1.0, 30.0, 1.0),
            Parameter::Randomness => ("Randomness", 0.0, 1.0, 0.1),
        };
        RangeSetting {
            label,
            min,
            max,
            step,
        }
    }
}

/// Which renderer draws the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreeStyle {
    /// Straight binary fractal, no randomness.
    Simple,
    /// Curved, randomized branches with side shoots and leaves.
    #[default]
    Fancy,
}

impl TreeStyle {
    pub const ALL: [TreeStyle; 2] = [TreeStyle::Simple, TreeStyle::Fancy];

    pub fn label(self) -> &'static str {
        match self {
            TreeStyle::Simple => "Simple",
            TreeStyle::Fancy => "Fancy",
        }
    }

    /// The parameters this style actually reads.
    pub fn parameters(self) -> &'static [Parameter] {
        match self {
            TreeStyle::Simple => &Parameter::ALL[..4],
            TreeStyle::Fancy => &Parameter::ALL,
        }
    }
}
