//! Scalar helpers, interpolation curves, random utilities and small solvers

use log::warn;
use rand::Rng;

use super::{Matrix3, Matrix4, Quaternion, Vector3};

/// Multiply degrees by this to get radians
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Multiply radians by this to get degrees
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Clamp `value` to the `[min, max]` interval
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Euclidean modulo of `n % m`, always in `[0, m)` for positive `m`
pub fn euclidean_modulo(n: f64, m: f64) -> f64 {
    ((n % m) + m) % m
}

/// Linear mapping of `x` from range `[a1, a2]` to range `[b1, b2]`
pub fn map_linear(x: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Linear interpolation from `x` to `y`; `t = 0` returns `x`, `t = 1` returns `y`
pub fn lerp(x: f64, y: f64, t: f64) -> f64 {
    (1.0 - t) * x + t * y
}

/// Hermite interpolation of `x` between `min` and `max`, clamped to `[0, 1]`
pub fn smoothstep(x: f64, min: f64, max: f64) -> f64 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    let x = (x - min) / (max - min);
    x * x * (3.0 - 2.0 * x)
}

/// Like [`smoothstep`] but with zero first and second derivatives at the edges
pub fn smootherstep(x: f64, min: f64, max: f64) -> f64 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    let x = (x - min) / (max - min);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// Random integer from the `[low, high]` interval
pub fn rand_int(low: i64, high: i64) -> i64 {
    let mut rng = rand::rng();
    rng.random_range(low..=high)
}

/// Random float from the `[low, high)` interval
pub fn rand_float(low: f64, high: f64) -> f64 {
    let mut rng = rand::rng();
    low + rng.random::<f64>() * (high - low)
}

/// Random float from the `[-range / 2, range / 2)` interval
pub fn rand_float_spread(range: f64) -> f64 {
    let mut rng = rand::rng();
    range * (0.5 - rng.random::<f64>())
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Convert radians to degrees
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD2DEG
}

/// Whether `value` is a power of two (zero is not)
pub fn is_power_of_two(value: u64) -> bool {
    value & (value.wrapping_sub(1)) == 0 && value != 0
}

/// Largest power of two less than or equal to `value`
pub fn floor_power_of_two(value: f64) -> f64 {
    2.0_f64.powf((value.ln() / std::f64::consts::LN_2).floor())
}

/// Smallest power of two greater than or equal to `value`
pub fn ceil_power_of_two(value: f64) -> f64 {
    2.0_f64.powf((value.ln() / std::f64::consts::LN_2).ceil())
}

/// Generate a random RFC 4122 version 4 UUID, uppercased
pub fn generate_uuid() -> String {
    let mut rng = rand::rng();
    let d0: u32 = rng.random();
    let d1: u32 = rng.random();
    let d2: u32 = rng.random();
    let d3: u32 = rng.random();
    format!(
        "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
        d0 & 0xff,
        d0 >> 8 & 0xff,
        d0 >> 16 & 0xff,
        d0 >> 24 & 0xff,
        d1 & 0xff,
        d1 >> 8 & 0xff,
        d1 >> 16 & 0x0f | 0x40,
        d1 >> 24 & 0xff,
        d2 & 0x3f | 0x80,
        d2 >> 8 & 0xff,
        d2 >> 16 & 0xff,
        d2 >> 24 & 0xff,
        d3 & 0xff,
        d3 >> 8 & 0xff,
        d3 >> 16 & 0xff,
        d3 >> 24 & 0xff,
    )
}

/// Deterministic Park-Miller pseudo-random sequence in `[0, 1]`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: i64,
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1234567)
    }
}

impl SeededRandom {
    /// Create a generator for the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed: (seed % 2147483647) as i64,
        }
    }

    /// Next value of the sequence
    pub fn next(&mut self) -> f64 {
        self.seed = self.seed * 16807 % 2147483647;
        (self.seed - 1) as f64 / 2147483646.0
    }
}

/// Set `q` from intrinsic proper Euler angles.
///
/// Rotation by angle `a` is applied first, then `b`, then `c`, all in
/// radians, about the axes named by `order`. An unknown order logs a
/// warning and leaves `q` unchanged.
pub fn set_quaternion_from_proper_euler(q: &mut Quaternion, a: f64, b: f64, c: f64, order: &str) {
    let c2 = (b / 2.0).cos();
    let s2 = (b / 2.0).sin();

    let c13 = ((a + c) / 2.0).cos();
    let s13 = ((a + c) / 2.0).sin();

    let c1_3 = ((a - c) / 2.0).cos();
    let s1_3 = ((a - c) / 2.0).sin();

    let c3_1 = ((c - a) / 2.0).cos();
    let s3_1 = ((c - a) / 2.0).sin();

    *q = match order {
        "XYX" => Quaternion::new(c2 * s13, s2 * c1_3, s2 * s1_3, c2 * c13),
        "YZY" => Quaternion::new(s2 * s1_3, c2 * s13, s2 * c1_3, c2 * c13),
        "ZXZ" => Quaternion::new(s2 * c1_3, s2 * s1_3, c2 * s13, c2 * c13),
        "XZX" => Quaternion::new(c2 * s13, s2 * s3_1, s2 * c3_1, c2 * c13),
        "YXY" => Quaternion::new(s2 * c3_1, c2 * s13, s2 * s3_1, c2 * c13),
        "ZYZ" => Quaternion::new(s2 * s3_1, s2 * c3_1, c2 * s13, c2 * c13),
        _ => {
            warn!("set_quaternion_from_proper_euler: unknown order '{order}', quaternion left unchanged");
            return;
        }
    };
}

/// Solve `mat * x = q` by Cramer's rule. Returns `None` for a singular matrix.
pub fn solve_matrix3_cramers_rule(mat: &Matrix3, q: Vector3) -> Option<Vector3> {
    let det_base = mat.determinant();
    if det_base == 0.0 {
        return None;
    }

    let rhs = [q.x, q.y, q.z];
    let mut res = [0.0; 3];
    for (column, value) in res.iter_mut().enumerate() {
        let mut m = *mat;
        m.elements[column * 3..column * 3 + 3].copy_from_slice(&rhs);
        *value = m.determinant() / det_base;
    }

    Some(Vector3::new(res[0], res[1], res[2]))
}

/// Solve `mat * x = q` by Cramer's rule, with the quaternion read as a
/// plain 4-vector. Returns `None` for a singular matrix.
pub fn solve_matrix4_cramers_rule(mat: &Matrix4, q: &Quaternion) -> Option<Quaternion> {
    let det_base = mat.determinant();
    if det_base == 0.0 {
        return None;
    }

    let rhs = [q.x, q.y, q.z, q.w];
    let mut res = [0.0; 4];
    for (column, value) in res.iter_mut().enumerate() {
        let mut m = *mat;
        m.elements[column * 4..column * 4 + 4].copy_from_slice(&rhs);
        *value = m.determinant() / det_base;
    }

    Some(Quaternion::new(res[0], res[1], res[2], res[3]))
}

/// Solve `sin(alpha) + b * cos(alpha) = c` for `alpha`
pub fn solve_angle_sum_spc(b: f64, c: f64) -> f64 {
    let arcroot = (1.0 + b * b).sqrt();
    let mut beta = (1.0 / arcroot).acos();
    beta = if b > 0.0 { beta } else { -beta };
    (c / arcroot).asin() - beta
}
