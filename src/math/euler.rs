//! Euler angle rotation type

use log::warn;

use super::{Matrix4, Quaternion, Vector3};

/// Tait-Bryan rotation orders; rotations are applied intrinsically,
/// first around the first-named axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationOrder {
    /// X, then Y, then Z (the default)
    #[default]
    Xyz,
    /// Y, then X, then Z
    Yxz,
    /// Z, then X, then Y
    Zxy,
    /// Z, then Y, then X
    Zyx,
    /// Y, then Z, then X
    Yzx,
    /// X, then Z, then Y
    Xzy,
}

impl RotationOrder {
    /// Parse an order name such as `"XYZ"`; returns `None` for anything else
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "XYZ" => Some(Self::Xyz),
            "YXZ" => Some(Self::Yxz),
            "ZXY" => Some(Self::Zxy),
            "ZYX" => Some(Self::Zyx),
            "YZX" => Some(Self::Yzx),
            "XZY" => Some(Self::Xzy),
            _ => None,
        }
    }

    /// The conventional name of this order
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xyz => "XYZ",
            Self::Yxz => "YXZ",
            Self::Zxy => "ZXY",
            Self::Zyx => "ZYX",
            Self::Yzx => "YZX",
            Self::Xzy => "XZY",
        }
    }
}

/// A rotation described by three angles in radians and an application order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    /// Angle around the X axis
    pub x: f64,
    /// Angle around the Y axis
    pub y: f64,
    /// Angle around the Z axis
    pub z: f64,
    /// Order in which the three rotations are applied
    pub order: RotationOrder,
}

impl Euler {
    /// Create an Euler rotation with the default XYZ order
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_order(x, y, z, RotationOrder::default())
    }

    /// Create an Euler rotation with an explicit order
    pub fn with_order(x: f64, y: f64, z: f64, order: RotationOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Set the rotation order by name. An unrecognized name logs a warning
    /// and leaves the order unchanged rather than failing the call.
    pub fn set_order_by_name(&mut self, name: &str) {
        match RotationOrder::parse(name) {
            Some(order) => self.order = order,
            None => warn!("Euler: unknown rotation order '{name}', order left unchanged"),
        }
    }

    /// Extract Euler angles from the unscaled rotation part of a matrix
    pub fn from_rotation_matrix(m: &Matrix4, order: RotationOrder) -> Self {
        let te = &m.elements;

        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        // near the gimbal-lock singularity the third angle collapses to 0
        const SINGULARITY: f64 = 0.9999999;

        let (x, y, z) = match order {
            RotationOrder::Xyz => {
                let y = m13.clamp(-1.0, 1.0).asin();
                if m13.abs() < SINGULARITY {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            RotationOrder::Yxz => {
                let x = (-m23.clamp(-1.0, 1.0)).asin();
                if m23.abs() < SINGULARITY {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            RotationOrder::Zxy => {
                let x = m32.clamp(-1.0, 1.0).asin();
                if m32.abs() < SINGULARITY {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            RotationOrder::Zyx => {
                let y = (-m31.clamp(-1.0, 1.0)).asin();
                if m31.abs() < SINGULARITY {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            RotationOrder::Yzx => {
                let z = m21.clamp(-1.0, 1.0).asin();
                if m21.abs() < SINGULARITY {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            RotationOrder::Xzy => {
                let z = (-m12.clamp(-1.0, 1.0)).asin();
                if m12.abs() < SINGULARITY {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self { x, y, z, order }
    }

    /// Extract Euler angles from a quaternion
    pub fn from_quaternion(q: &Quaternion, order: RotationOrder) -> Self {
        Self::from_rotation_matrix(&Matrix4::from_quaternion(q), order)
    }

    /// Interpret a vector's components as angles
    pub fn from_vector3(v: Vector3, order: RotationOrder) -> Self {
        Self::with_order(v.x, v.y, v.z, order)
    }

    /// Re-express the same rotation in a different order.
    ///
    /// Goes through a quaternion, so the angles are only preserved up to
    /// the usual discontinuities.
    pub fn reorder(&self, order: RotationOrder) -> Self {
        Self::from_quaternion(&Quaternion::from_euler(self), order)
    }

    /// The three angles as a vector
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_parse_known_orders() {
        assert_eq!(RotationOrder::parse("XYZ"), Some(RotationOrder::Xyz));
        assert_eq!(RotationOrder::parse("ZYX"), Some(RotationOrder::Zyx));
        assert_eq!(RotationOrder::parse("XXX"), None);
        assert_eq!(RotationOrder::Yzx.as_str(), "YZX");
    }

    #[test]
    fn test_unknown_order_name_is_a_no_op() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut euler = Euler::new(0.1, 0.2, 0.3);
        euler.set_order_by_name("ABC");
        assert_eq!(euler.order, RotationOrder::Xyz);

        euler.set_order_by_name("ZXY");
        assert_eq!(euler.order, RotationOrder::Zxy);
    }

    #[test]
    fn test_quaternion_round_trip() {
        for order in [
            RotationOrder::Xyz,
            RotationOrder::Yxz,
            RotationOrder::Zxy,
            RotationOrder::Zyx,
            RotationOrder::Yzx,
            RotationOrder::Xzy,
        ] {
            let euler = Euler::with_order(0.3, -0.7, 0.5, order);
            let q = Quaternion::from_euler(&euler);
            let back = Euler::from_quaternion(&q, order);
            assert_relative_eq!(back.x, euler.x, epsilon = 1e-12);
            assert_relative_eq!(back.y, euler.y, epsilon = 1e-12);
            assert_relative_eq!(back.z, euler.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reorder_preserves_rotation() {
        let euler = Euler::new(FRAC_PI_4, 0.2, -0.6);
        let reordered = euler.reorder(RotationOrder::Zyx);

        let v = Vector3::new(1.0, 2.0, 3.0);
        let a = v.apply_euler(&euler);
        let b = v.apply_euler(&reordered);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }
}
