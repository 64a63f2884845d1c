//! CIE XYZ and L\*a\*b\* conversion (D65) and perceptual color distance.
//!
//! The simulation compares candidate cosmetic colors against target skin
//! colors perceptually, not in raw RGB: Euclidean distance in L\*a\*b\*
//! (ΔE) tracks human judgement far better than channel differences.
//!
//! Input colors are linear reflectance triples (already decoded through the
//! sRGB transfer curve); the fixed linear-RGB -> XYZ matrix below assumes
//! sRGB primaries with a D65 white point.

/// CIE XYZ color representation (D65 illuminant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    /// X tristimulus value.
    pub x: f32,
    /// Y tristimulus value (luminance).
    pub y: f32,
    /// Z tristimulus value.
    pub z: f32,
}

impl Xyz {
    /// Creates a new XYZ color.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// CIE L\*a\*b\* color representation.
///
/// - `l`: lightness, [0, 100]
/// - `a`: green-red axis, roughly [-128, 127]
/// - `b`: blue-yellow axis, roughly [-128, 127]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness.
    pub l: f32,
    /// Green-red component.
    pub a: f32,
    /// Blue-yellow component.
    pub b: f32,
}

impl Lab {
    /// Creates a new Lab color.
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }
}

/// D65 reference white, X component.
const WHITE_X: f32 = 0.95047;
/// D65 reference white, Y component.
const WHITE_Y: f32 = 1.0;
/// D65 reference white, Z component.
const WHITE_Z: f32 = 1.08883;

/// `(6/29)^3`, the breakpoint of the CIE nonlinearity.
const CIE_EPSILON: f32 = 0.008_856_452;

/// Converts a linear sRGB reflectance triple to CIE XYZ.
///
/// Uses the standard sRGB (Rec.709 primaries, D65) matrix.
#[inline]
pub fn linear_rgb_to_xyz(rgb: [f32; 3]) -> Xyz {
    let [r, g, b] = rgb;
    Xyz {
        x: 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b,
        y: 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b,
        z: 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b,
    }
}

/// CIE nonlinearity: cube root above `(6/29)^3`, linear segment below.
#[inline]
fn cie_f(t: f32) -> f32 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        // 1/(3*(6/29)^2) * t + 4/29
        7.787_037 * t + 4.0 / 29.0
    }
}

/// Converts CIE XYZ to L\*a\*b\* against the D65 white point.
#[inline]
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = cie_f(xyz.x / WHITE_X);
    let fy = cie_f(xyz.y / WHITE_Y);
    let fz = cie_f(xyz.z / WHITE_Z);
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Converts a linear reflectance triple straight to L\*a\*b\*.
#[inline]
pub fn lab_from_reflectance(rgb: [f32; 3]) -> Lab {
    xyz_to_lab(linear_rgb_to_xyz(rgb))
}

/// Euclidean distance between two Lab colors (ΔE*ab).
///
/// # Example
///
/// ```
/// use kmsim_color::{delta_e, Lab};
///
/// let a = Lab::new(50.0, 10.0, -5.0);
/// assert_eq!(delta_e(a, a), 0.0);
/// ```
#[inline]
pub fn delta_e(c1: Lab, c2: Lab) -> f32 {
    let dl = c1.l - c2.l;
    let da = c1.a - c2.a;
    let db = c1.b - c2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Perceptual distance between two linear reflectance triples.
#[inline]
pub fn delta_e_reflectance(c1: [f32; 3], c2: [f32; 3]) -> f32 {
    delta_e(lab_from_reflectance(c1), lab_from_reflectance(c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_maps_to_l100() {
        use approx::assert_relative_eq;
        let lab = lab_from_reflectance([1.0, 1.0, 1.0]);
        assert_relative_eq!(lab.l, 100.0, epsilon = 0.01);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.01);
    }

    #[test]
    fn test_black_maps_to_l0() {
        let lab = lab_from_reflectance([0.0, 0.0, 0.0]);
        assert!(lab.l.abs() < 1e-4);
    }

    #[test]
    fn test_delta_e_identity() {
        for c in [[0.0, 0.0, 0.0], [0.5, 0.3, 0.2], [1.0, 1.0, 1.0]] {
            assert_eq!(delta_e_reflectance(c, c), 0.0);
        }
    }

    #[test]
    fn test_delta_e_symmetry() {
        let c1 = [0.6, 0.45, 0.4];
        let c2 = [0.2, 0.5, 0.7];
        assert_eq!(delta_e_reflectance(c1, c2), delta_e_reflectance(c2, c1));
    }

    #[test]
    fn test_delta_e_orders_likeness() {
        let skin = [0.55, 0.4, 0.35];
        let near = [0.56, 0.41, 0.34];
        let far = [0.1, 0.8, 0.2];
        assert!(delta_e_reflectance(skin, near) < delta_e_reflectance(skin, far));
    }

    #[test]
    fn test_cie_f_continuous_at_breakpoint() {
        let below = cie_f(CIE_EPSILON - 1e-7);
        let above = cie_f(CIE_EPSILON + 1e-7);
        assert!((above - below).abs() < 1e-4);
    }

    #[test]
    fn test_mid_gray_lightness() {
        // 18% reflectance sits near L* = 50 by construction of CIELAB.
        let lab = lab_from_reflectance([0.18, 0.18, 0.18]);
        assert!((lab.l - 49.5).abs() < 1.0);
    }
}
