// Saves greyscale heightmaps of the same seed at 1, 4 and 8 octaves,
// plus a coloured preview of the 4-octave field.

use terrain_core::{HeightMap, MeshConfig, NoiseConfig, NoiseField};

fn main() -> terrain_core::Result<()> {
    let grid = MeshConfig::new(256, 256, 10.0, 40.0);

    for octaves in [1, 4, 8] {
        let field = NoiseField::build(NoiseConfig {
            octaves,
            ..NoiseConfig::with_seed(42)
        })?;
        let map = HeightMap::sample(&field, &grid)?;
        let filename = format!("noise_{octaves}_octaves.png");
        map.save_png(&filename)?;
        println!("Saved {filename}");

        if octaves == 4 {
            map.save_terrain_png("noise_terrain_preview.png")?;
            println!("Saved noise_terrain_preview.png");
        }
    }
    Ok(())
}
