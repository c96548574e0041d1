use std::iter::FusedIterator;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::NoiseGenerator;
use crate::config::MeshConfig;
use crate::error::{Result, TerrainError};
use crate::field::NoiseField;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32, // height * vertical scale
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// Heightfield mesh: `(width+1) * (depth+1)` vertices, two triangles per cell.
//
// Only the builder creates meshes, so the vertex and index arrays always
// come from the same configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    width: u32,
    depth: u32,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // Vertex at grid point (x, z)
    pub fn vertex_at(&self, x: u32, z: u32) -> Option<&Vertex> {
        if x > self.width || z > self.depth {
            return None;
        }
        self.vertices
            .get(z as usize * (self.width as usize + 1) + x as usize)
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

// Completion event of one row of cells in an incremental build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowProgress {
    pub row: u32,
    pub rows_total: u32,
}

impl RowProgress {
    pub fn is_last(&self) -> bool {
        self.row + 1 == self.rows_total
    }
}

// Samples a height source over a grid and triangulates it
pub struct TerrainMeshBuilder<'a, N: NoiseGenerator + Sync = NoiseField> {
    config: MeshConfig,
    field: &'a N,
}

impl<'a, N: NoiseGenerator + Sync> TerrainMeshBuilder<'a, N> {
    pub fn new(config: MeshConfig, field: &'a N) -> Result<Self> {
        config.validate()?;
        let vertex_count = (config.width as u64 + 1) * (config.depth as u64 + 1);
        if vertex_count > u32::MAX as u64 {
            return Err(TerrainError::invalid(format!(
                "{}x{} grid does not fit 32-bit indices",
                config.width, config.depth
            )));
        }
        Ok(Self { config, field })
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    // Eager batch build, rows are spread over the rayon pool
    pub fn build(&self) -> Mesh {
        let start = Instant::now();
        let vertices = vertex_pass(&self.config, self.field);

        let w = self.config.width;
        let mut indices = vec![0u32; w as usize * self.config.depth as usize * 6];
        indices
            .par_chunks_mut(w as usize * 6)
            .enumerate()
            .for_each(|(y, row)| fill_index_row(w, y as u32, row));

        info!(
            width = w,
            depth = self.config.depth,
            vertices = vertices.len(),
            indices = indices.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "mesh built"
        );
        Mesh {
            width: w,
            depth: self.config.depth,
            vertices,
            indices,
        }
    }

    // Incremental build: the vertex pass runs here, then every `next()`
    // triangulates one more row. Dropping the iterator cancels the build.
    pub fn rows(&self) -> MeshRows {
        let cells = self.config.width as usize * self.config.depth as usize;
        MeshRows {
            config: self.config,
            vertices: vertex_pass(&self.config, self.field),
            indices: Vec::with_capacity(cells * 6),
            row: 0,
        }
    }
}

// Build a mesh in one call
pub fn build(
    width: u32,
    depth: u32,
    field: &NoiseField,
    vertical_scale: f64,
    sample_scale: f64,
) -> Result<Mesh> {
    let config = MeshConfig::new(width, depth, vertical_scale, sample_scale);
    Ok(TerrainMeshBuilder::new(config, field)?.build())
}

// Lazy row-by-row construction, see TerrainMeshBuilder::rows
pub struct MeshRows {
    config: MeshConfig,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    row: u32,
}

impl MeshRows {
    pub fn is_complete(&self) -> bool {
        self.row >= self.config.depth
    }

    pub fn rows_done(&self) -> u32 {
        self.row
    }

    // The mesh once every row has been yielded, None while rows remain
    pub fn finish(self) -> Option<Mesh> {
        if !self.is_complete() {
            return None;
        }
        Some(self.assemble())
    }

    // Finish any remaining rows and hand over the mesh
    pub fn into_mesh(mut self) -> Mesh {
        self.by_ref().for_each(drop);
        self.assemble()
    }

    fn assemble(self) -> Mesh {
        Mesh {
            width: self.config.width,
            depth: self.config.depth,
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}

impl Iterator for MeshRows {
    type Item = RowProgress;

    fn next(&mut self) -> Option<RowProgress> {
        if self.is_complete() {
            return None;
        }
        let w = self.config.width;
        let start = self.indices.len();
        self.indices.resize(start + w as usize * 6, 0);
        fill_index_row(w, self.row, &mut self.indices[start..]);

        let progress = RowProgress {
            row: self.row,
            rows_total: self.config.depth,
        };
        self.row += 1;
        trace!(row = progress.row, rows_total = progress.rows_total, "mesh row done");
        Some(progress)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.config.depth - self.row) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for MeshRows {}

impl FusedIterator for MeshRows {}

// Row-major vertex grid, z outer and x inner
fn vertex_pass<N: NoiseGenerator + Sync>(config: &MeshConfig, field: &N) -> Vec<Vertex> {
    let row_len = config.width as usize + 1;
    let mut vertices = vec![Vertex::default(); row_len * (config.depth as usize + 1)];
    vertices
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(z, row)| {
            let z = z as u32;
            for (x, vertex) in row.iter_mut().enumerate() {
                let (sx, sz) = config.sample_coords(x as u32, z);
                let h = field.get2(sx, sz);
                *vertex = Vertex::new(x as f32, (h * config.vertical_scale) as f32, z as f32);
            }
        });
    vertices
}

// Two triangles per cell of row `y`; `v` walks the lower-left corners
fn fill_index_row(width: u32, y: u32, row: &mut [u32]) {
    let mut v = y * (width + 1);
    for quad in row.chunks_exact_mut(6) {
        quad.copy_from_slice(&[v, v + width + 1, v + 1, v + 1, v + width + 1, v + width + 2]);
        v += 1;
    }
}
