// Builds a small mesh row by row and prints the height of every vertex.

use terrain_core::{MeshConfig, NoiseConfig, NoiseField, TerrainMeshBuilder};

fn main() -> terrain_core::Result<()> {
    let field = NoiseField::build(NoiseConfig::with_seed(2025))?;
    let builder = TerrainMeshBuilder::new(MeshConfig::new(8, 8, 10.0, 4.0), &field)?;

    let mut rows = builder.rows();
    for progress in rows.by_ref() {
        println!("row {}/{} done", progress.row + 1, progress.rows_total);
    }
    let mesh = rows.finish().expect("every row was yielded");

    for z in 0..=mesh.depth() {
        for x in 0..=mesh.width() {
            if let Some(v) = mesh.vertex_at(x, z) {
                print!("{:>7.3} ", v.y);
            }
        }
        println!();
    }
    println!(
        "{} vertices, {} triangles",
        mesh.vertices().len(),
        mesh.triangle_count()
    );
    Ok(())
}
