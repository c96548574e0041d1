use terrain_core::{HeightMap, MeshConfig, NoiseConfig, NoiseField, TerrainMeshBuilder};
use terrain_storage::models::{TerrainDoc, TerrainParams};
use terrain_storage::{TerrainStore, save_obj};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate a 128×128 terrain from seed 2025
    let noise = NoiseConfig::with_seed(2025);
    let mesh_cfg = MeshConfig::new(128, 128, 10.0, 20.0);
    let field = NoiseField::build(noise)?;
    let map = HeightMap::sample(&field, &mesh_cfg)?;
    let mesh = TerrainMeshBuilder::new(mesh_cfg, &field)?.build();

    let store = TerrainStore::init("terrain_store").await?;
    let doc = TerrainDoc::new(
        "demo",
        TerrainParams {
            noise,
            mesh: mesh_cfg,
        },
        &map,
    );
    store.create(&doc).await?;
    save_obj(&mesh, "terrain_store/demo.obj")?;

    if let Some(found) = store.read_by_seed(2025).await? {
        println!(
            "Round-trip success: {} sample [64,64] = {}",
            found.name,
            found.height_map[64 * 128 + 64]
        );
    } else {
        println!("Document not found!");
    }

    store.delete_by_name("demo").await?;
    Ok(())
}
