// scmodel-export - Write a scene manifest out as a .scmodel file
//
// Pipeline:
//   1. Load the RON scene manifest and the OBJ meshes it references
//   2. Classify objects by name prefix (@ marker, ^ geometry, % collision)
//   3. Write markers, geometries and collision in world space
//   4. Optionally read the file back and print what it contains
//
// Usage: scmodel-export <scene.ron> [-o <out.scmodel>] [--inspect]

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use scmodel::format::FILE_EXTENSION;
use scmodel::prelude::*;

struct Args {
    manifest: PathBuf,
    output: PathBuf,
    inspect: bool,
}

fn usage(program: &str) -> String {
    format!("Usage: {} <scene.ron> [-o <out.{}>] [--inspect]", program, FILE_EXTENSION)
}

fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map(String::as_str).unwrap_or("scmodel-export");

    let mut manifest = None;
    let mut output = None;
    let mut inspect = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("{} requires a path\n{}", args[i], usage(program));
                };
                output = Some(PathBuf::from(path));
                i += 2;
            }
            "--inspect" => {
                inspect = true;
                i += 1;
            }
            "-h" | "--help" => bail!("{}", usage(program)),
            flag if flag.starts_with('-') => bail!("Unknown option '{}'\n{}", flag, usage(program)),
            path => {
                if manifest.replace(PathBuf::from(path)).is_some() {
                    bail!("Only one scene manifest may be given\n{}", usage(program));
                }
                i += 1;
            }
        }
    }

    let Some(manifest) = manifest else {
        bail!("{}", usage(program));
    };
    let output = output.unwrap_or_else(|| manifest.with_extension(FILE_EXTENSION));

    Ok(Args {
        manifest,
        output,
        inspect,
    })
}

fn inspect(path: &Path) -> Result<()> {
    let model = ModelData::load(path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    let mut markers: Vec<_> = model.markers().collect();
    markers.sort_by_key(|(name, _)| *name);
    println!("Markers ({}):", markers.len());
    for (name, marker) in markers {
        let p = marker.position;
        println!("  {:<24} ({:.3}, {:.3}, {:.3})", name, p.x, p.y, p.z);
    }

    let mut geometries: Vec<_> = model.geometries().collect();
    geometries.sort_by_key(|(name, _)| *name);
    println!("Geometries ({}):", geometries.len());
    for (name, geometry) in geometries {
        println!(
            "  {:<24} {} vertices, {} triangles",
            name,
            geometry.vertices.len(),
            geometry.triangle_count()
        );
    }

    println!("Collision: {} triangles", model.collision().triangles.len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let scene = load_scene(&args.manifest)
        .with_context(|| format!("Failed to load scene {}", args.manifest.display()))?;

    let stats = scene.statistics();
    log::info!(
        "Loaded {} objects ({} meshes, {} vertices, {} polygons)",
        stats.object_count,
        stats.mesh_count,
        stats.total_vertices,
        stats.total_polygons
    );

    let summary = Exporter::default()
        .export(&scene, &args.output)
        .with_context(|| format!("Failed to export {}", args.output.display()))?;

    println!(
        "Wrote {}: {} markers, {} geometries, {} collision triangles",
        args.output.display(),
        summary.markers,
        summary.geometries,
        summary.collision_triangles
    );
    if summary.unclassified > 0 {
        println!("  {} unprefixed objects left out", summary.unclassified);
    }
    for name in &summary.skipped {
        println!("  exported without mesh data: {}", name);
    }

    if args.inspect {
        inspect(&args.output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_output_path() {
        let parsed = parse_args(&args(&["scmodel-export", "levels/board.ron"])).unwrap();
        assert_eq!(parsed.manifest, PathBuf::from("levels/board.ron"));
        assert_eq!(parsed.output, PathBuf::from("levels/board.scmodel"));
        assert!(!parsed.inspect);
    }

    #[test]
    fn test_output_and_inspect() {
        let parsed = parse_args(&args(&[
            "scmodel-export",
            "--inspect",
            "board.ron",
            "-o",
            "out/board.scmodel",
        ]))
        .unwrap();
        assert_eq!(parsed.output, PathBuf::from("out/board.scmodel"));
        assert!(parsed.inspect);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["scmodel-export"])).is_err());
        assert!(parse_args(&args(&["scmodel-export", "a.ron", "-o"])).is_err());
        assert!(parse_args(&args(&["scmodel-export", "a.ron", "--fast"])).is_err());
        assert!(parse_args(&args(&["scmodel-export", "a.ron", "b.ron"])).is_err());
    }
}
