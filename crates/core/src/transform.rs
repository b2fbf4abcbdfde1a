//! Position and rotation sub-documents of a placed object.
//!
//! Rotation keeps the field names 3D clients serialize Euler angles with
//! (`isEuler`, `_x`, `_y`, `_z`, `_order`); plain `x`/`y`/`z`/`order` are
//! accepted on input as well.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Axis order used when a rotation omits `_order`.
pub const DEFAULT_EULER_ORDER: &str = "XYZ";

/// Every permutation of the three axes.
pub const EULER_ORDERS: &[&str] = &["XYZ", "XZY", "YXZ", "YZX", "ZXY", "ZYX"];

/// World-space position. Missing components default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Euler-style rotation in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Rotation {
    #[serde(rename = "isEuler", default = "default_is_euler")]
    pub is_euler: bool,
    #[serde(rename = "_x", alias = "x", default)]
    pub x: f64,
    #[serde(rename = "_y", alias = "y", default)]
    pub y: f64,
    #[serde(rename = "_z", alias = "z", default)]
    pub z: f64,
    #[serde(rename = "_order", alias = "order", default = "default_order")]
    #[validate(custom(function = "validate_euler_order"))]
    pub order: String,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            is_euler: true,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            order: DEFAULT_EULER_ORDER.to_string(),
        }
    }
}

fn default_is_euler() -> bool {
    true
}

fn default_order() -> String {
    DEFAULT_EULER_ORDER.to_string()
}

/// Reject anything that is not a permutation of `XYZ`.
fn validate_euler_order(order: &str) -> Result<(), ValidationError> {
    if EULER_ORDERS.contains(&order) {
        Ok(())
    } else {
        Err(ValidationError::new("euler_order").with_message(
            format!("Invalid rotation order '{order}'. Must be one of: {EULER_ORDERS:?}").into(),
        ))
    }
}
