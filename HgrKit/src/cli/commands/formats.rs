//! CLI command listing the surface format table

use crate::formats::surface::SurfaceFormat;

/// Print every surface format with its bit depth and channel masks.
pub fn list() -> anyhow::Result<()> {
    println!(
        "{:>3}  {:<14} {:<11} {:>4}  {:>10} {:>10} {:>10} {:>10}",
        "tag", "name", "class", "bits", "red", "green", "blue", "alpha"
    );
    for format in SurfaceFormat::ALL {
        let desc = format.descriptor();
        println!(
            "{:>3}  {:<14} {:<11} {:>4}  {:#010x} {:#010x} {:#010x} {:#010x}",
            format.tag(),
            format.name(),
            format!("{:?}", format.class()),
            desc.bits_per_pixel,
            desc.red_mask,
            desc.green_mask,
            desc.blue_mask,
            desc.alpha_mask
        );
    }
    Ok(())
}
