//! `.hgr` file reading and parsing
//!
//! Sections are decoded in a fixed order. Between sections the exporter
//! writes a running counter; a marker that does not continue the count means
//! the previous section was misread, and decoding stops there.
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::{HgrDocument, ReservedSections};
use super::header::{HgrHeader, SceneParams};
use super::hierarchy::NodeHierarchy;
use super::options::DecodeOptions;
use super::sections;
use crate::error::{Error, Result};
use crate::formats::common::ByteReader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Running section counter.
struct ChecksumTracker {
    last: u32,
}

impl ChecksumTracker {
    fn seed<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let last = reader.read_u32_be()?;
        tracing::trace!("checksum seed {:#010x}", last);
        Ok(Self { last })
    }

    /// Read the marker closing `section` and check it continues the count.
    fn expect_next<R: Read>(&mut self, reader: &mut ByteReader<R>, section: &'static str) -> Result<()> {
        let offset = reader.position();
        let found = reader.read_u32_be()?;
        let expected = self.last.wrapping_add(1);
        if found != expected {
            return Err(Error::ChecksumDesync {
                offset,
                section,
                expected,
                found,
            });
        }
        self.last = found;
        Ok(())
    }
}

/// Read a .hgr file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, or any decode error
/// from [`decode_hgr`].
pub fn read_hgr<P: AsRef<Path>>(path: P) -> Result<HgrDocument> {
    let file = File::open(path.as_ref())?;
    tracing::debug!("Reading HGR: {}", path.as_ref().display());
    decode_hgr(BufReader::new(file))
}

/// Parse .hgr data from bytes
///
/// # Errors
///
/// Any decode error from [`decode_hgr`].
pub fn parse_hgr_bytes(data: &[u8]) -> Result<HgrDocument> {
    decode_hgr(data)
}

/// Decode an HGR scene with default options.
///
/// # Errors
///
/// Returns [`Error::BadMagic`] or [`Error::UnsupportedVersion`] for a foreign
/// or unsupported header, [`Error::ChecksumDesync`] when a section boundary is
/// out of step, [`Error::UnexpectedEof`] on truncation, and the validation
/// errors described on [`DecodeOptions`].
pub fn decode_hgr<R: Read>(source: R) -> Result<HgrDocument> {
    decode_hgr_with_options(source, &DecodeOptions::default())
}

/// Decode an HGR scene.
///
/// # Errors
///
/// See [`decode_hgr`].
pub fn decode_hgr_with_options<R: Read>(source: R, options: &DecodeOptions) -> Result<HgrDocument> {
    let mut reader = ByteReader::new(source);

    let header = HgrHeader::decode(&mut reader)?;
    tracing::debug!(
        "HGR v{} (exporter {}), flags {:#06x}, platform {:?}",
        header.version,
        header.exported_version_string(),
        header.data_flags.0,
        header.platform_id
    );

    let scene = SceneParams::decode(&mut reader)?;
    let mut checksum = ChecksumTracker::seed(&mut reader)?;
    let checksum_seed = checksum.last;

    let textures = sections::decode_textures(&mut reader)?;
    let materials = sections::decode_materials(&mut reader)?;
    checksum.expect_next(&mut reader, "materials")?;

    let primitives = sections::decode_primitives(&mut reader)?;
    checksum.expect_next(&mut reader, "primitives")?;

    let meshes = sections::decode_meshes(&mut reader)?;
    checksum.expect_next(&mut reader, "meshes")?;

    let cameras = sections::decode_cameras(&mut reader)?;
    checksum.expect_next(&mut reader, "cameras")?;

    let offset = reader.position();
    let length = reader.remaining_len()?;
    if length > 0 {
        tracing::warn!("{} bytes of undecoded sections at offset {}", length, offset);
    }
    let reserved = ReservedSections { offset, length };

    let parent_indices: Vec<i32> = meshes
        .iter()
        .map(|m| m.node.parent_index)
        .chain(cameras.iter().map(|c| c.node.parent_index))
        .collect();
    let hierarchy = NodeHierarchy::resolve(&parent_indices, options.validate_hierarchy)?;

    let document = HgrDocument {
        header,
        scene,
        checksum_seed,
        textures,
        materials,
        primitives,
        meshes,
        cameras,
        reserved,
        hierarchy,
    };

    if options.validate_references {
        validate_references(&document)?;
    }

    Ok(document)
}

fn check_index(kind: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::InvalidReference { kind, index, len })
    }
}

fn validate_references(document: &HgrDocument) -> Result<()> {
    for mesh in &document.meshes {
        for &primitive in &mesh.primitives {
            check_index("primitive", primitive as usize, document.primitives.len())?;
        }
    }
    for primitive in &document.primitives {
        check_index("material", primitive.material_index as usize, document.materials.len())?;
    }
    for material in &document.materials {
        for param in &material.tex_params {
            check_index("texture", param.texture_index as usize, document.textures.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_scene(seed: u32, markers: [u32; 4]) -> Vec<u8> {
        let mut data = b"hgrf".to_vec();
        data.push(185);
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.push(0);
        data.extend_from_slice(&[0u8; 20]);
        data.extend_from_slice(&seed.to_be_bytes());
        // textures, materials
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&markers[0].to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&markers[1].to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&markers[2].to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&markers[3].to_be_bytes());
        data
    }

    #[test]
    fn test_empty_scene() {
        let data = minimal_scene(41, [42, 43, 44, 45]);
        let doc = parse_hgr_bytes(&data).unwrap();
        assert_eq!(doc.checksum_seed, 41);
        assert_eq!(doc.node_count(), 0);
        assert_eq!(doc.reserved, ReservedSections { offset: data.len() as u64, length: 0 });
    }

    #[test]
    fn test_checksum_wraps() {
        let data = minimal_scene(u32::MAX, [0, 1, 2, 3]);
        assert!(parse_hgr_bytes(&data).is_ok());
    }

    #[test]
    fn test_checksum_desync_names_section() {
        let data = minimal_scene(1, [2, 3, 5, 6]);
        match parse_hgr_bytes(&data) {
            Err(Error::ChecksumDesync { section, expected, found, offset }) => {
                assert_eq!(section, "meshes");
                assert_eq!(expected, 4);
                assert_eq!(found, 5);
                assert_eq!(offset, data.len() as u64 - 12);
            }
            other => panic!("expected ChecksumDesync, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_tail_is_counted() {
        let mut data = minimal_scene(0, [1, 2, 3, 4]);
        let end = data.len() as u64;
        data.extend_from_slice(&[0xAA; 17]);
        let doc = parse_hgr_bytes(&data).unwrap();
        assert_eq!(doc.reserved.offset, end);
        assert_eq!(doc.reserved.length, 17);
    }
}
