//! CLI commands for NTX texture operations

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::batch::{batch_convert_ntx, find_files};
use crate::cli::progress::{DISK, LOOKING_GLASS, PICTURE, print_done, print_step, simple_bar};
use crate::converter::{ImageFileType, convert_ntx_with_progress};
use crate::inspect::inspect_ntx;

/// Show info about an NTX texture file
pub fn info(path: &Path, json: bool) -> anyhow::Result<()> {
    let info = inspect_ntx(path)?;

    if json {
        println!("{}", info.to_json()?);
        return Ok(());
    }

    println!("NTX Information: {}", path.display());
    println!();
    println!("Version: {}", info.version);
    println!("Dimensions: {}x{}", info.width, info.height);
    println!("Format: {} ({}, {} bpp)", info.format, info.format_class, info.bits_per_pixel);
    if info.palette_size > 0 {
        println!("Palette: {} entries", info.palette_size);
    }
    println!("Flags: {:#06x} (user {:#06x})", info.flags, info.user_flags);
    println!("File size: {} bytes", info.file_size);
    if info.trailing_bytes > 0 {
        println!("Trailing bytes: {}", info.trailing_bytes);
    }

    Ok(())
}

/// Expand directory sources into the NTX files they contain.
fn collect_sources(sources: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for source in sources {
        if source.is_dir() {
            files.extend(find_files(source, "ntx"));
        } else {
            files.push(source.clone());
        }
    }
    files
}

/// Deepest directory containing every file, or empty when there is none.
fn common_parent(files: &[PathBuf]) -> PathBuf {
    let Some(first) = files.first().and_then(|f| f.parent()) else {
        return PathBuf::new();
    };
    first
        .ancestors()
        .find(|dir| files.iter().all(|f| f.starts_with(dir)))
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Convert NTX textures to images.
///
/// A single file source converts to `dest` as a file; anything else converts
/// into `dest` as a directory.
pub fn convert(
    sources: &[PathBuf],
    dest: &Path,
    file_type: ImageFileType,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    if let [single] = sources {
        if single.is_file() && !dest.is_dir() {
            let total = 3;
            let step = std::cell::Cell::new(0);
            convert_ntx_with_progress(single, dest, file_type, &|msg| {
                step.set(step.get() + 1);
                if !quiet {
                    let emoji = match step.get() {
                        1 => LOOKING_GLASS,
                        2 => PICTURE,
                        _ => DISK,
                    };
                    print_step(step.get(), total, emoji, msg);
                }
            })?;
            if !quiet {
                print_done(start.elapsed());
            }
            return Ok(());
        }
    }

    let files = collect_sources(sources);
    if files.is_empty() {
        println!("No NTX files found");
        return Ok(());
    }

    std::fs::create_dir_all(dest)?;
    let base = match sources {
        [dir] if dir.is_dir() => dir.clone(),
        _ => common_parent(&files),
    };

    if !quiet {
        print_step(1, 1, PICTURE, &format!("Converting {} NTX files...", files.len()));
    }
    let pb = simple_bar(files.len() as u64, "Converting", quiet);
    let result = batch_convert_ntx(&files, &base, dest, file_type, |progress| {
        pb.set_position(progress.current as u64);
        pb.set_message(progress.file.clone());
    });
    pb.finish_and_clear();

    println!("Conversion complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);
    for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
        println!("  {msg}");
    }

    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
