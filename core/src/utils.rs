use palette::{Gradient, LinSrgb};

// Stops of the preview palette over unit height
const WATER: f32 = 0.30;
const SAND: f32 = 0.40;
const GRASS: f32 = 0.60;
const ROCK: f32 = 0.80;

// Fractal Brownian motion: sum `octaves` layers of `base`,
// divided by the summed amplitudes so the octave count does not change the range
pub fn fractal_sum<F>(
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    x: f64,
    y: f64,
    base: F,
) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let mut amplitude = 1.0; // Weight of the current octave
    let mut frequency = 1.0; // How zoomed in we are on the noise pattern
    let mut total = 0.0;
    let mut max_value = 0.0; // Sum of amplitudes, for normalization

    for _ in 0..octaves {
        let (sx, sy) = (x * frequency, y * frequency);
        // Past f64 range the lattice lookup is NaN; later octaves add nothing
        if !(sx.is_finite() && sy.is_finite()) {
            break;
        }
        total += base(sx, sy) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
        if amplitude == 0.0 {
            break;
        }
    }

    total / max_value
}

// Signed height in [-1, 1] -> unit height in [0, 1].
// The only place the signed convention is converted.
#[inline]
pub fn to_unit(h: f64) -> f64 {
    ((h + 1.0) * 0.5).clamp(0.0, 1.0)
}

// Unit height -> 8-bit luminance
#[inline]
pub fn to_luma(h: f64) -> u8 {
    (to_unit(h) * 255.0).round() as u8
}

// Deep water, beach, grass, rock and snow
pub fn terrain_gradient() -> Gradient<LinSrgb> {
    Gradient::with_domain(vec![
        (0.0, LinSrgb::new(0.0, 0.0, 0.5)),
        (WATER, LinSrgb::new(0.0, 0.5, 1.0)),
        (SAND, LinSrgb::new(0.8, 0.8, 0.5)),
        (GRASS, LinSrgb::new(0.1, 0.6, 0.2)),
        (ROCK, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.0, LinSrgb::new(1.0, 1.0, 1.0)),
    ])
}

// Map a signed height to a terrain colour
pub fn height_to_rgb(gradient: &Gradient<LinSrgb>, h: f64) -> [u8; 3] {
    let col: LinSrgb = gradient.get(to_unit(h) as f32);
    let rgb = col.into_format::<u8>();
    [rgb.red, rgb.green, rgb.blue]
}
