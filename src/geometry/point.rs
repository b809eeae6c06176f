// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integer-millimeter points

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per foot (25.4 mm/in × 12 in/ft)
pub const FEET_TO_MM: f64 = 25.4 * 12.0;

/// Snap a coordinate onto the integer grid: `floor(coordinate * scale + 0.5)`.
///
/// Returns `None` when the result is not finite or does not fit in an `i64`.
pub fn quantize(coordinate: f64, scale: f64) -> Option<i64> {
    let snapped = (coordinate * scale + 0.5).floor();
    // `i64::MAX as f64` is 2^63, one past the largest representable value
    (snapped >= i64::MIN as f64 && snapped < i64::MAX as f64).then_some(snapped as i64)
}

/// Point on the integer millimeter grid.
///
/// Equality is exact, ordering is lexicographic on (x, y, z). Two source
/// points are the same vertex iff they quantize to the same `Point3I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point3I {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Point3I {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Quantize a point given in feet to millimeters.
    pub fn from_feet(p: &Point3<f64>) -> Option<Self> {
        Self::quantized(p, FEET_TO_MM)
    }

    /// Quantize each axis of `p` independently with `scale`.
    pub fn quantized(p: &Point3<f64>, scale: f64) -> Option<Self> {
        Some(Self {
            x: quantize(p.x, scale)?,
            y: quantize(p.y, scale)?,
            z: quantize(p.z, scale)?,
        })
    }
}

impl fmt::Display for Point3I {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
