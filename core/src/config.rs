use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

// Upper bound (exclusive) for randomly derived seeds
pub const RANDOM_SEED_RANGE: u64 = 10_000;

// Octave parameters for a noise field.
//
// Immutable for the duration of a generation run: a NoiseField
// takes it by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    // Number of layers summed, at least 1.
    pub octaves: u32,
    // Amplitude multiplier per octave, in [0, 1].
    pub persistence: f64,
    // Frequency multiplier per octave, > 0.
    pub lacunarity: f64,
    // Divides every incoming coordinate before octave summation, > 0.
    pub scale: f64,
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 1.0,
            seed: 0,
        }
    }
}

impl NoiseConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.octaves < 1 {
            return Err(TerrainError::invalid("octaves must be at least 1"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TerrainError::invalid(format!(
                "noise scale must be positive, got {}",
                self.scale
            )));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(TerrainError::invalid(format!(
                "lacunarity must be positive, got {}",
                self.lacunarity
            )));
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(TerrainError::invalid(format!(
                "persistence must be within [0, 1], got {}",
                self.persistence
            )));
        }
        Ok(())
    }
}

// Where the seed of a run comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    Fixed(u64),
    // Drawn from the thread RNG in `[0, RANDOM_SEED_RANGE)`.
    Random,
}

impl SeedSource {
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Random => rand::thread_rng().gen_range(0..RANDOM_SEED_RANGE),
        }
    }
}

impl From<Option<u64>> for SeedSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(SeedSource::Random, SeedSource::Fixed)
    }
}

// Grid dimensions and the mapping from grid cells to noise coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub width: u32,
    pub depth: u32,
    // Vertical exaggeration applied to every sampled height.
    pub vertical_scale: f64,
    // Grid units per noise unit.
    pub sample_scale: f64,
    // Sample relative to the grid centre instead of the grid origin.
    #[serde(default)]
    pub centered: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            width: 256,
            depth: 256,
            vertical_scale: 10.0,
            sample_scale: 20.0,
            centered: false,
        }
    }
}

impl MeshConfig {
    pub fn new(width: u32, depth: u32, vertical_scale: f64, sample_scale: f64) -> Self {
        Self {
            width,
            depth,
            vertical_scale,
            sample_scale,
            centered: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(TerrainError::invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.depth
            )));
        }
        if self.sample_scale == 0.0 || !self.sample_scale.is_finite() {
            return Err(TerrainError::invalid(format!(
                "sample scale must be finite and non-zero, got {}",
                self.sample_scale
            )));
        }
        if !self.vertical_scale.is_finite() {
            return Err(TerrainError::invalid("vertical scale must be finite"));
        }
        Ok(())
    }

    // Noise coordinates for grid point (x, z); shared by mesh and heightmap
    #[inline]
    pub fn sample_coords(&self, x: u32, z: u32) -> (f64, f64) {
        let (cx, cz) = if self.centered {
            ((self.width / 2) as f64, (self.depth / 2) as f64)
        } else {
            (0.0, 0.0)
        };
        (
            (x as f64 - cx) / self.sample_scale,
            (z as f64 - cz) / self.sample_scale,
        )
    }
}
