use serde::{Deserialize, Serialize};
use terrain_core::{HeightMap, MeshConfig, NoiseConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub noise: NoiseConfig,
    pub mesh: MeshConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDoc {
    pub name: String,
    pub seed: u64,
    pub params: TerrainParams,
    pub width: u32,
    pub depth: u32,
    // Flattened row-major signed heights: length = width×depth
    pub height_map: Vec<f32>,
}

impl TerrainDoc {
    pub fn new(name: impl Into<String>, params: TerrainParams, map: &HeightMap) -> Self {
        Self {
            name: name.into(),
            seed: params.noise.seed,
            params,
            width: map.width(),
            depth: map.depth(),
            height_map: map.values().to_vec(),
        }
    }

    pub fn to_height_map(&self) -> Option<HeightMap> {
        HeightMap::from_values(self.width, self.depth, self.height_map.clone())
    }
}
