// core holds the noise field, mesh builder and heightmap derivation
pub mod config;
pub mod error;
pub mod field;
pub mod heightmap;
pub mod mesh;
pub mod perlin2;
pub mod permutation;
pub mod utils;

pub use config::{MeshConfig, NoiseConfig, SeedSource};
pub use error::{Result, TerrainError};
pub use field::NoiseField;
pub use heightmap::HeightMap;
pub use mesh::{Mesh, MeshRows, RowProgress, TerrainMeshBuilder, Vertex};
pub use permutation::PermutationTable;

// A 2D height source the mesh builder and heightmap can sample.
// Implementations must be pure: the same (x, y) always gives the same value.
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}
