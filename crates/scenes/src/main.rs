//! Terrain scenes: builds the demo meshes and reports what a renderer would upload.
//!
//! Usage: `terrain-scenes [ground|landscape|starfield|all|write-config]`

mod config;

use anyhow::{bail, Result};
use procgen::{ColorPalette, GroundChunk, Starfield, TerrainData, TerrainVertex};
use std::str::FromStr;

use config::SceneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    Ground,
    Landscape,
    Starfield,
    All,
    /// Write the active config back to scenes.ron.
    WriteConfig,
}

impl FromStr for Scene {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ground" | "lookat" => Ok(Scene::Ground),
            "landscape" | "plane" => Ok(Scene::Landscape),
            "starfield" | "stars" => Ok(Scene::Starfield),
            "all" => Ok(Scene::All),
            "write-config" => Ok(Scene::WriteConfig),
            other => bail!(
                "unknown scene {other:?} (expected ground, landscape, starfield, all or write-config)"
            ),
        }
    }
}

fn report(name: &str, terrain: &TerrainData) {
    let vertices: Vec<TerrainVertex> = terrain.vertices();
    let vertex_bytes = bytemuck::cast_slice::<TerrainVertex, u8>(&vertices).len();
    log::info!(
        "{}: {} vertices ({} bytes), {} triangles ({} index bytes), {} normals",
        name,
        terrain.mesh.vertex_count(),
        vertex_bytes,
        terrain.mesh.triangle_count(),
        terrain.index_bytes().len(),
        terrain.normals.len()
    );
    log::info!(
        "{}: source bounds {:?}..{:?}, colored against height {:.4}",
        name,
        terrain.source_bounds.min,
        terrain.source_bounds.max,
        terrain.mesh_height
    );
}

fn run_ground(config: &SceneConfig) -> Result<()> {
    let terrain = TerrainData::ground(&config.ground, config.shading)?;
    report("ground", &terrain);

    let mut vertices = 0;
    let mut triangles = 0;
    for cz in 0..config.map_chunks_z as i32 {
        for cx in 0..config.map_chunks_x as i32 {
            let chunk = GroundChunk::generate(cx, cz, &config.ground)?;
            vertices += chunk.mesh.vertex_count();
            triangles += chunk.mesh.triangle_count();
        }
    }
    log::info!(
        "ground map: {}x{} chunks, {} vertices, {} triangles",
        config.map_chunks_x,
        config.map_chunks_z,
        vertices,
        triangles
    );
    Ok(())
}

fn run_landscape(config: &SceneConfig) -> Result<()> {
    let palette = ColorPalette::standard(config.landscape_water_level)?;
    let terrain = TerrainData::landscape(&config.landscape, &palette, config.shading)?;
    report("landscape", &terrain);
    Ok(())
}

fn run_starfield(config: &SceneConfig) -> Result<()> {
    let mut field = Starfield::new(&config.starfield)?;
    let mut recycled = 0;
    for _ in 0..config.starfield_frames {
        recycled += field.update(config.frame_dt);
    }
    let matrices = field.model_matrices();
    let nearest = field
        .stars()
        .iter()
        .map(|s| s.position.z)
        .fold(f32::NEG_INFINITY, f32::max);
    log::info!(
        "starfield: {} stars after {} frames, {} recycled, nearest z {:.2}, {} model matrices",
        field.stars().len(),
        config.starfield_frames,
        recycled,
        nearest,
        matrices.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Scene::All,
    };
    log::info!("Starting terrain scenes ({:?})", scene);

    let config = SceneConfig::load();
    config.validate()?;

    match scene {
        Scene::Ground => run_ground(&config)?,
        Scene::Landscape => run_landscape(&config)?,
        Scene::Starfield => run_starfield(&config)?,
        Scene::All => {
            run_ground(&config)?;
            run_landscape(&config)?;
            run_starfield(&config)?;
        }
        Scene::WriteConfig => config.save(),
    }
    Ok(())
}
