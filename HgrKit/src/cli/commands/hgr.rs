//! HGR CLI commands
//!
//! Commands for inspecting and batch-checking HGR scenes.

use std::path::Path;
use std::time::Instant;

use crate::batch::{batch_decode_hgr, find_files};
use crate::cli::progress::{CUBE, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::formats::hgr::DecodeOptions;
use crate::inspect::inspect_hgr_with_options;

/// Inspect an HGR file and display its structure.
pub fn inspect(path: &Path, output: Option<&Path>, lenient: bool) -> anyhow::Result<()> {
    let options = if lenient {
        DecodeOptions::lenient()
    } else {
        DecodeOptions::default()
    };
    let info = inspect_hgr_with_options(path, &options)?;

    if let Some(output) = output {
        std::fs::write(output, info.to_json()?)?;
        println!("Written to: {}", output.display());
        return Ok(());
    }

    println!("Inspecting HGR file: {}", path.display());
    println!();
    println!("HGR File Information");
    println!("====================");
    println!("Version:     {} (exporter {})", info.version, info.exported_version);
    println!("File size:   {} bytes", info.file_size);
    match (info.platform, info.platform_description) {
        (Some(name), Some(description)) => println!("Platform:    {name} ({description})"),
        _ => println!("Platform:    -"),
    }
    println!("Data flags:  {}", info.data_flags.join(", "));
    println!("Fog:         {:?}", info.fog);
    println!();

    println!("Textures ({}):", info.textures.len());
    for texture in &info.textures {
        println!("  - {} ({:?})", texture.name, texture.kind);
    }
    println!();

    println!("Materials ({}):", info.materials.len());
    for material in &info.materials {
        println!("  - {} [{}] {}", material.name, material.shader, material.textures.join(", "));
    }
    println!();

    println!("Primitives ({}):", info.primitives.len());
    for (i, prim) in info.primitives.iter().enumerate() {
        println!(
            "  [{:2}] {:?} | {} vertices, {} triangles | {} | {}",
            i,
            prim.primitive_type,
            prim.vertex_count,
            prim.triangle_count,
            prim.material.as_deref().unwrap_or("-"),
            prim.components.join(" ")
        );
    }
    println!();

    println!("Nodes ({}):", info.nodes.len());
    for node in &info.nodes {
        println!("  {}{} ({})", "  ".repeat(node.depth), node.name, node.kind);
    }

    if info.reserved_length > 0 {
        println!();
        println!(
            "Undecoded sections: {} bytes at offset {}",
            info.reserved_length, info.reserved_offset
        );
    }

    Ok(())
}

/// Decode every HGR file under `dir` and report which ones fail.
pub fn batch(dir: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    if !quiet {
        print_step(1, 2, LOOKING_GLASS, "Scanning for HGR files...");
    }
    let files = find_files(dir, "hgr");

    if files.is_empty() {
        println!("No HGR files found in: {}", dir.display());
        return Ok(());
    }

    if !quiet {
        print_step(2, 2, CUBE, &format!("Decoding {} HGR files...", files.len()));
    }
    let pb = simple_bar(files.len() as u64, "Decoding", quiet);
    let result = batch_decode_hgr(&files, dir, |progress| {
        pb.set_position(progress.current as u64);
        pb.set_message(progress.file.clone());
    });
    pb.finish_and_clear();

    println!();
    println!("Decode complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for failure in &result.failures {
            match failure.offset {
                Some(offset) => println!("  {} [{} @ {}]", failure.path.display(), failure.kind, offset),
                None => println!("  {} [{}]", failure.path.display(), failure.kind),
            }
        }
    }

    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
