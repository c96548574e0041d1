// Terrain CLI: generate heightmaps and meshes from fractal gradient noise,
// and manage saved terrain.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use terrain_core::{
    HeightMap, Mesh, MeshConfig, NoiseConfig, NoiseField, SeedSource, TerrainMeshBuilder,
};
use terrain_storage::TerrainStore;
use terrain_storage::models::{TerrainDoc, TerrainParams};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Procedural heightfield terrain generator.
#[derive(Parser)]
#[command(name = "terrain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of saved terrain documents.
    #[arg(long, global = true, default_value = "./terrain_store")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a heightmap and mesh.
    Generate(GenerateArgs),
    /// List saved terrain.
    List,
    /// Print a saved terrain's parameters, optionally re-exporting its heightmap.
    Show {
        name: String,
        /// Write the stored heightmap as a greyscale PNG.
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Delete a saved terrain.
    Delete { name: String },
}

#[derive(Args)]
struct GenerateArgs {
    /// Grid cells along x.
    #[arg(long, default_value = "256")]
    width: u32,

    /// Grid cells along z.
    #[arg(long, default_value = "256")]
    depth: u32,

    /// Seed for reproducible terrain; a random seed in [0, 10000) if omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of noise octaves.
    #[arg(long, default_value = "4")]
    octaves: u32,

    /// Amplitude decay per octave (0-1).
    #[arg(long, default_value = "0.5")]
    persistence: f64,

    /// Frequency multiplier per octave.
    #[arg(long, default_value = "2.0")]
    lacunarity: f64,

    /// Noise zoom applied inside the field.
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Grid units per noise unit.
    #[arg(long, default_value = "20.0")]
    sample_scale: f64,

    /// Vertical exaggeration of mesh heights.
    #[arg(long, default_value = "10.0")]
    vertical_scale: f64,

    /// Sample around the grid centre instead of the origin.
    #[arg(long)]
    centered: bool,

    /// Build the mesh row by row, pausing this long between rows.
    #[arg(long)]
    row_delay_ms: Option<u64>,

    /// Greyscale heightmap output.
    #[arg(long, default_value = "heightmap.png")]
    png: PathBuf,

    /// Coloured terrain preview output.
    #[arg(long)]
    color_png: Option<PathBuf>,

    /// Wavefront OBJ mesh output.
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Save the generated terrain under this name.
    #[arg(long)]
    save: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The store is async; a current-thread runtime is enough for a CLI
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    match cli.command {
        Commands::Generate(args) => generate(&rt, &cli.store, args),
        Commands::List => {
            let store = rt.block_on(TerrainStore::init(&cli.store))?;
            for name in rt.block_on(store.list_names())? {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Show { name, png } => {
            let store = rt.block_on(TerrainStore::init(&cli.store))?;
            let Some(doc) = rt.block_on(store.read_by_name(&name))? else {
                bail!("no terrain named {name:?}");
            };
            println!("{}: seed {}, {}x{}", doc.name, doc.seed, doc.width, doc.depth);
            println!("  noise: {:?}", doc.params.noise);
            println!("  mesh:  {:?}", doc.params.mesh);
            if let Some(path) = png {
                let map = doc
                    .to_height_map()
                    .context("stored height map does not match its dimensions")?;
                map.save_png(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "heightmap written");
            }
            Ok(())
        }
        Commands::Delete { name } => {
            let store = rt.block_on(TerrainStore::init(&cli.store))?;
            if rt.block_on(store.delete_by_name(&name))? {
                info!(name = %name, "terrain deleted");
                Ok(())
            } else {
                bail!("no terrain named {name:?}")
            }
        }
    }
}

fn generate(rt: &tokio::runtime::Runtime, store: &Path, args: GenerateArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let seed = SeedSource::from(args.seed).resolve();
    let noise = NoiseConfig {
        octaves: args.octaves,
        persistence: args.persistence,
        lacunarity: args.lacunarity,
        scale: args.scale,
        seed,
    };
    let mesh_cfg = MeshConfig {
        width: args.width,
        depth: args.depth,
        vertical_scale: args.vertical_scale,
        sample_scale: args.sample_scale,
        centered: args.centered,
    };
    info!(seed, width = args.width, depth = args.depth, "generating terrain");

    // Validate everything before any sampling starts
    let field = NoiseField::build(noise)?;
    let builder = TerrainMeshBuilder::new(mesh_cfg, &field)?;

    let map = HeightMap::sample(&field, &mesh_cfg)?;
    map.save_png(&args.png)
        .with_context(|| format!("writing {}", args.png.display()))?;
    info!(path = %args.png.display(), "heightmap written");
    if let Some(path) = &args.color_png {
        map.save_terrain_png(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "terrain preview written");
    }

    let mesh = match args.row_delay_ms {
        Some(ms) => build_staged(&builder, Duration::from_millis(ms)),
        None => builder.build(),
    };
    if let Some(path) = &args.obj {
        terrain_storage::save_obj(&mesh, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "mesh written");
    }

    if let Some(name) = args.save {
        let doc = TerrainDoc::new(
            name,
            TerrainParams {
                noise,
                mesh: mesh_cfg,
            },
            &map,
        );
        let store = rt.block_on(TerrainStore::init(store))?;
        rt.block_on(store.create(&doc))?;
        info!(name = %doc.name, "terrain saved");
    }

    info!(
        seed,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "done"
    );
    Ok(())
}

// Row-by-row construction with a pause between rows, for watching progress
fn build_staged(builder: &TerrainMeshBuilder<'_>, delay: Duration) -> Mesh {
    let mut rows = builder.rows();
    for progress in rows.by_ref() {
        if progress.is_last() || progress.row % 16 == 0 {
            info!(
                row = progress.row + 1,
                rows_total = progress.rows_total,
                "mesh rows built"
            );
        }
        if !progress.is_last() {
            thread::sleep(delay);
        }
    }
    rows.into_mesh()
}
