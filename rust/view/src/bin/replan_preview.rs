// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: reconstruct a blueprint image into a 3D scene snapshot
//!
//! Runs the raster extraction path through the viewer engine and writes
//! the composed wall primitives as an OBJ file, with the active camera
//! pose printed for inspection.
//!
//! Usage:
//!   replan-preview <image_path> [options]

use std::env;
use std::fs;
use std::io::Write;

use image::ImageReader;
use replan_raster::PixelBuffer;
use replan_scene::{RenderPrimitive, WallGroup};
use replan_view::{EngineConfig, ReconstructionRequest, ViewMode, ViewerEngine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];

    let mut output_path = String::from("scene.obj");
    let mut mode = ViewMode::Orbit;
    let mut world_span: f64 = 20.0;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--mode" => {
                i += 1;
                mode = args[i].parse().unwrap_or_else(|error| {
                    eprintln!("Error: {error}");
                    std::process::exit(1);
                });
            }
            "--world-span" => {
                i += 1;
                world_span = args[i].parse().expect("Invalid world span value");
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== Blueprint to 3D Scene Preview ===");
    println!();

    // Step 1: Load and decode the blueprint
    println!("[1/4] Loading image: {}", image_path);
    let decoded = ImageReader::open(image_path)
        .unwrap_or_else(|error| {
            eprintln!("Error: Cannot open image '{}': {}", image_path, error);
            std::process::exit(1);
        })
        .decode()
        .unwrap_or_else(|error| {
            eprintln!("Error: Cannot decode image '{}': {}", image_path, error);
            std::process::exit(1);
        });
    let pixels = PixelBuffer::from_image(&decoded).unwrap_or_else(|error| {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    });
    println!("  Image size: {}x{} pixels", pixels.width(), pixels.height());

    // Step 2: Reconstruct through the engine
    println!("[2/4] Reconstructing ({} m across the longer axis)...", world_span);
    let mut config = EngineConfig::default();
    config.raster.world_span = world_span;

    let mut engine = ViewerEngine::new(config, 1280.0, 720.0);
    engine.set_view_mode(mode);

    let request = ReconstructionRequest {
        image_url: Some(image_path.clone()),
        ..ReconstructionRequest::default()
    };
    let (generation, path) = engine.begin_reconstruction(&request);
    println!("  Path: {:?}", path);
    engine.complete_raster(generation, &pixels);

    // Step 3: Summarize the scene
    println!("[3/4] Scene summary:");
    let scene = engine.scene();
    println!("  External wall cells: {}", scene.group_count(WallGroup::External));
    println!("  Internal wall cells: {}", scene.group_count(WallGroup::Internal));
    let bounds = scene.bounds();
    if bounds.is_valid() {
        println!(
            "  Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
    }
    println!("  View mode: {}", engine.mode());
    let view = engine.camera().view_matrix();
    let projection = engine.camera().projection_matrix();
    println!("  View matrix determinant: {:.4}", view.determinant());
    println!("  Projection[0,0]: {:.4}", projection[(0, 0)]);

    // Step 4: Write the OBJ snapshot
    println!("[4/4] Writing OBJ file: {}", output_path);
    write_obj(&output_path, scene.primitives());

    println!();
    println!("Done! Open {} in a 3D viewer.", output_path);
}

/// Write box primitives as OBJ geometry, one object per primitive
fn write_obj<'a>(path: &str, primitives: impl Iterator<Item = &'a RenderPrimitive>) {
    let mut file = fs::File::create(path).unwrap_or_else(|error| {
        eprintln!("Error: Cannot create output file '{}': {}", path, error);
        std::process::exit(1);
    });

    writeln!(file, "# Generated by replan-preview").unwrap();
    writeln!(file, "# Coordinate system: Y-up, meters").unwrap();
    writeln!(file).unwrap();

    // Quad faces of a box over its 8 corners, outward winding
    const FACES: [[usize; 4]; 6] = [
        [0, 1, 3, 2], // -x
        [4, 6, 7, 5], // +x
        [0, 4, 5, 1], // -y
        [2, 3, 7, 6], // +y
        [0, 2, 6, 4], // -z
        [1, 5, 7, 3], // +z
    ];

    let mut vertex_offset: usize = 0;
    for (index, primitive) in primitives.enumerate() {
        let label = match primitive.group() {
            Some(WallGroup::Bearing) => "wall_bearing",
            Some(WallGroup::NonBearing) => "wall_nonbearing",
            Some(WallGroup::External) => "wall_external",
            Some(WallGroup::Internal) => "wall_internal",
            None => "ground",
        };
        writeln!(file, "o {}_{}", label, index).unwrap();

        for corner in primitive.corners() {
            writeln!(file, "v {:.6} {:.6} {:.6}", corner.x, corner.y, corner.z).unwrap();
        }
        for face in &FACES {
            writeln!(
                file,
                "f {} {} {} {}",
                face[0] + vertex_offset + 1,
                face[1] + vertex_offset + 1,
                face[2] + vertex_offset + 1,
                face[3] + vertex_offset + 1,
            )
            .unwrap();
        }
        vertex_offset += 8;
        writeln!(file).unwrap();
    }
}

fn print_usage() {
    println!(
        r#"Blueprint to 3D Scene Preview
=============================

Reconstructs a floor-plan image into the viewer engine's 3D scene and
writes the wall primitives as an OBJ snapshot.

USAGE:
  replan-preview <image_path> [OPTIONS]

ARGUMENTS:
  <image_path>           Path to blueprint image (PNG, JPEG)

OPTIONS:
  --output <path>        Output OBJ file path (default: scene.obj)
  --mode <mode>          View mode: 3d, top, first-person (default: 3d)
  --world-span <meters>  World meters across the longer axis (default: 20)
  -h, --help             Show this help message

EXAMPLES:
  replan-preview blueprint.png
  replan-preview blueprint.png --mode first-person --output walk.obj
"#
    );
}
