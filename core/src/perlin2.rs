use crate::permutation::PermutationTable;

// Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// It helps to avoid visual artifacts by smoothing the interpolation
// As its first and second derivatives are zero at t=0 and t=1
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Linear interpolation
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Gradient function for 2D: the low 4 bits of the hash pick the direction.
// The secondary axis falls back to 0 for h >= 4 outside {12, 14},
// which is part of the noise signature and must stay as is.
#[inline]
pub fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 0xF;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let sign_u = if (h & 1) == 0 { u } else { -u };
    let sign_v = if (h & 2) == 0 { v } else { -v };
    sign_u + sign_v
}

// Raw single‐octave gradient noise at (x, y)
// Exactly 0 on integer lattice points
pub fn noise(perm: &PermutationTable, x: f64, y: f64) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    // Find unit square that contains point (Which square to sample?)
    let xi = (x0 as i64 & 255) as usize;
    let yi = (y0 as i64 & 255) as usize;
    let xi1 = (xi + 1) & 255;
    let yi1 = (yi + 1) & 255;
    // Relative x/y within the square (Where within the square?)
    let xf = x - x0;
    let yf = y - y0;
    let u = fade(xf);
    let v = fade(yf);

    // Hash the four corners; the duplicated table keeps perm[a] + b below 512
    let a = perm.get(xi) as usize;
    let b = perm.get(xi1) as usize;
    let aa = perm.get(a + yi);
    let ab = perm.get(a + yi1);
    let ba = perm.get(b + yi);
    let bb = perm.get(b + yi1);

    let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
    let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
    // Interpolate the two results along y
    lerp(x1, x2, v)
}

#[cfg(test)]
mod tests {
    use super::{fade, grad, lerp, noise};
    use crate::permutation::PermutationTable;

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn grad_branch_table() {
        // h < 4: (±x) + (±y)
        assert_eq!(grad(0, 0.25, 0.5), 0.75);
        assert_eq!(grad(1, 0.25, 0.5), 0.25);
        assert_eq!(grad(2, 0.25, 0.5), -0.25);
        assert_eq!(grad(3, 0.25, 0.5), -0.75);
        // 4 <= h < 8: secondary axis drops out
        assert_eq!(grad(4, 0.25, 0.5), 0.25);
        assert_eq!(grad(5, 0.25, 0.5), -0.25);
        // h >= 8: primary axis is y
        assert_eq!(grad(8, 0.25, 0.5), 0.5);
        assert_eq!(grad(9, 0.25, 0.5), -0.5);
        // 12 and 14 pick x as the secondary axis
        assert_eq!(grad(12, 0.25, 0.5), 0.75);
        assert_eq!(grad(14, 0.25, 0.5), 0.25);
        // only the low 4 bits matter
        assert_eq!(grad(0x1C, 0.25, 0.5), grad(12, 0.25, 0.5));
    }

    #[test]
    fn zero_on_lattice_points() {
        for seed in [0, 3, 42, 9999] {
            let perm = PermutationTable::from_seed(seed);
            for y in -5..5 {
                for x in -5..5 {
                    assert_eq!(noise(&perm, x as f64, y as f64), 0.0);
                }
            }
            assert_eq!(noise(&perm, 300.0, -700.0), 0.0);
        }
    }

    #[test]
    fn not_flat_between_lattice_points() {
        let perm = PermutationTable::from_seed(42);
        let any_nonzero = (0..64).any(|i| {
            let t = i as f64 * 0.37 + 0.13;
            noise(&perm, t, t * 0.71).abs() > 1e-6
        });
        assert!(any_nonzero);
    }

    #[test]
    fn base_noise_is_bounded() {
        let perm = PermutationTable::from_seed(11);
        for i in 0..2000 {
            let x = i as f64 * 0.173 - 50.0;
            let y = i as f64 * 0.291 - 80.0;
            let v = noise(&perm, x, y);
            assert!(v.abs() <= 1.0 + 1e-9, "{v} at ({x}, {y})");
        }
    }
}
