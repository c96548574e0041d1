use std::path::Path;
use std::time::Instant;

use image::{GrayImage, Luma, Rgb, RgbImage};
use rayon::prelude::*;
use tracing::info;

use crate::NoiseGenerator;
use crate::config::MeshConfig;
use crate::error::Result;
use crate::utils::{height_to_rgb, terrain_gradient, to_luma};

// `width × depth` signed samples, row-major (`values[z * width + x]`).
//
// Sampled at the same coordinates as the mesh vertices, so pixel (x, z)
// and vertex (x, z) carry the same height.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    width: u32,
    depth: u32,
    values: Vec<f32>,
}

impl HeightMap {
    pub fn sample<N: NoiseGenerator + Sync>(field: &N, config: &MeshConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let width = config.width as usize;
        let mut values = vec![0.0f32; width * config.depth as usize];
        values
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(z, row)| {
                for (x, v) in row.iter_mut().enumerate() {
                    let (sx, sz) = config.sample_coords(x as u32, z as u32);
                    *v = field.get2(sx, sz) as f32;
                }
            });
        info!(
            width = config.width,
            depth = config.depth,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "heightmap sampled"
        );
        Ok(Self {
            width: config.width,
            depth: config.depth,
            values,
        })
    }

    // Wraps stored samples, e.g. a height map read back from disk.
    pub fn from_values(width: u32, depth: u32, values: Vec<f32>) -> Option<Self> {
        (values.len() == width as usize * depth as usize).then_some(Self {
            width,
            depth,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x >= self.width || z >= self.depth {
            return None;
        }
        self.values
            .get(z as usize * self.width as usize + x as usize)
            .copied()
    }

    // One luminance byte per pixel, bright = high
    pub fn luminance(&self) -> Vec<u8> {
        self.values.iter().map(|&h| to_luma(h as f64)).collect()
    }

    pub fn to_gray_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width, self.depth);
        for (pixel, &h) in img.pixels_mut().zip(&self.values) {
            *pixel = Luma([to_luma(h as f64)]);
        }
        img
    }

    // Coloured preview: water, sand, grass, rock, snow
    pub fn to_terrain_image(&self) -> RgbImage {
        let gradient = terrain_gradient();
        let mut img = RgbImage::new(self.width, self.depth);
        for (pixel, &h) in img.pixels_mut().zip(&self.values) {
            *pixel = Rgb(height_to_rgb(&gradient, h as f64));
        }
        img
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_gray_image().save(path)?;
        Ok(())
    }

    pub fn save_terrain_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_terrain_image().save(path)?;
        Ok(())
    }
}
