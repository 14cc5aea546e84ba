//! HGR header and scene parameters
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{DEFAULT_EXPORTED_VERSION, HGR_MAGIC, MAX_VERSION, MIN_VERSION};
use crate::error::{Error, Result};
use crate::formats::common::ByteReader;
use serde::Serialize;
use std::io::Read;

/// Which optional header fields a given version carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub has_exported_version: bool,
    pub has_platform_id: bool,
}

impl HeaderLayout {
    /// Field presence for `version`. Does not check the supported range.
    #[must_use]
    pub const fn for_version(version: u8) -> Self {
        Self {
            has_exported_version: version > 190,
            has_platform_id: version > 180,
        }
    }

    /// Header size in bytes, magic included.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        let mut len = 4 + 1 + 2;
        if self.has_exported_version {
            len += 4;
        }
        if self.has_platform_id {
            len += 2;
        }
        len
    }
}

/// Bit set describing what kinds of data the exporter wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DataFlags(pub u16);

impl DataFlags {
    pub const MATERIALS: u16 = 1;
    pub const PRIMITIVES: u16 = 2;
    pub const NODES: u16 = 4;
    pub const ANIMATIONS: u16 = 8;
    pub const USER_PROPERTIES: u16 = 16;

    #[must_use]
    pub const fn contains(self, bit: u16) -> bool {
        self.0 & bit == bit
    }

    #[must_use]
    pub const fn materials(self) -> bool {
        self.contains(Self::MATERIALS)
    }

    #[must_use]
    pub const fn primitives(self) -> bool {
        self.contains(Self::PRIMITIVES)
    }

    #[must_use]
    pub const fn nodes(self) -> bool {
        self.contains(Self::NODES)
    }

    #[must_use]
    pub const fn animations(self) -> bool {
        self.contains(Self::ANIMATIONS)
    }

    #[must_use]
    pub const fn user_properties(self) -> bool {
        self.contains(Self::USER_PROPERTIES)
    }

    /// Names of the set bits, for display.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::MATERIALS, "materials"),
            (Self::PRIMITIVES, "primitives"),
            (Self::NODES, "nodes"),
            (Self::ANIMATIONS, "animations"),
            (Self::USER_PROPERTIES, "user_properties"),
        ]
        .into_iter()
        .filter(|(bit, _)| self.contains(*bit))
        .map(|(_, name)| name)
        .collect()
    }
}

/// Render target the scene was exported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dx,
    Egl,
    Psp,
    Sw,
    N3d,
}

impl Platform {
    #[must_use]
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0 => Some(Self::Dx),
            1 => Some(Self::Egl),
            2 => Some(Self::Psp),
            3 => Some(Self::Sw),
            4 => Some(Self::N3d),
            _ => None,
        }
    }

    /// Short name ("dx", "egl", ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dx => "dx",
            Self::Egl => "egl",
            Self::Psp => "psp",
            Self::Sw => "sw",
            Self::N3d => "n3d",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Dx => "DirectX 9.x",
            Self::Egl => "OpenGL ES",
            Self::Psp => "PlayStation Portable",
            Self::Sw => "Software Renderer",
            Self::N3d => "Nokia N3D",
        }
    }
}

/// Decoded HGR header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HgrHeader {
    pub version: u8,
    /// Exporter version; [`DEFAULT_EXPORTED_VERSION`] when the file predates the field.
    pub exported_version: u32,
    pub data_flags: DataFlags,
    /// Present only for versions above 180.
    pub platform_id: Option<u16>,
}

impl HgrHeader {
    #[must_use]
    pub fn layout(&self) -> HeaderLayout {
        HeaderLayout::for_version(self.version)
    }

    /// Resolved platform, if the header names a known one.
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        self.platform_id.and_then(Platform::from_id)
    }

    /// Exporter version as `major.minor.patch`.
    #[must_use]
    pub fn exported_version_string(&self) -> String {
        let v = self.exported_version;
        format!("{}.{}.{}", (v >> 16) & 0xFF, (v >> 8) & 0xFF, v & 0xFF)
    }

    pub(crate) fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let magic = reader.read_array::<4>()?;
        if &magic != HGR_MAGIC {
            return Err(Error::BadMagic { found: magic });
        }

        let version = reader.read_u8()?;
        if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
            return Err(Error::UnsupportedVersion { version });
        }

        let layout = HeaderLayout::for_version(version);
        let exported_version = if layout.has_exported_version {
            reader.read_u32_be()?
        } else {
            DEFAULT_EXPORTED_VERSION
        };
        let data_flags = DataFlags(reader.read_u16_be()?);
        let platform_id = if layout.has_platform_id {
            Some(reader.read_u16_be()?)
        } else {
            None
        };

        Ok(Self {
            version,
            exported_version,
            data_flags,
            platform_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FogType {
    #[default]
    None,
    Linear,
}

/// Global fog settings stored after the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneParams {
    pub fog_type: FogType,
    pub fog_start: f32,
    pub fog_end: f32,
    pub fog_colour: [f32; 3],
}

impl SceneParams {
    pub(crate) fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let offset = reader.position();
        let fog_type = match reader.read_u8()? {
            0 => FogType::None,
            1 => FogType::Linear,
            other => {
                return Err(Error::InvalidEnumValue {
                    field: "fog type",
                    value: u32::from(other),
                    offset,
                });
            }
        };
        let fog_start = reader.read_f32_be()?;
        let fog_end = reader.read_f32_be()?;
        let fog_colour = reader.read_f32_array_be::<3>()?;

        Ok(Self {
            fog_type,
            fog_start,
            fog_end,
            fog_colour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header_bytes(version: u8) -> Vec<u8> {
        let mut data = b"hgrf".to_vec();
        data.push(version);
        if version > 190 {
            data.extend_from_slice(&0x0003_0100u32.to_be_bytes());
        }
        data.extend_from_slice(&0x0007u16.to_be_bytes());
        if version > 180 {
            data.extend_from_slice(&1u16.to_be_bytes());
        }
        data
    }

    #[test]
    fn test_layout_for_version() {
        assert_eq!(
            HeaderLayout::for_version(171),
            HeaderLayout { has_exported_version: false, has_platform_id: false }
        );
        assert_eq!(
            HeaderLayout::for_version(180),
            HeaderLayout { has_exported_version: false, has_platform_id: false }
        );
        assert_eq!(
            HeaderLayout::for_version(181),
            HeaderLayout { has_exported_version: false, has_platform_id: true }
        );
        assert_eq!(
            HeaderLayout::for_version(190),
            HeaderLayout { has_exported_version: false, has_platform_id: true }
        );
        assert_eq!(
            HeaderLayout::for_version(191),
            HeaderLayout { has_exported_version: true, has_platform_id: true }
        );
    }

    #[test]
    fn test_layout_byte_len() {
        assert_eq!(HeaderLayout::for_version(171).byte_len(), 7);
        assert_eq!(HeaderLayout::for_version(185).byte_len(), 9);
        assert_eq!(HeaderLayout::for_version(193).byte_len(), 13);
    }

    #[test]
    fn test_decode_v185_header() {
        let data = header_bytes(185);
        let mut reader = ByteReader::new(&data[..]);
        let header = HgrHeader::decode(&mut reader).unwrap();
        assert_eq!(reader.position(), 9);
        assert_eq!(header.version, 185);
        assert_eq!(header.exported_version, DEFAULT_EXPORTED_VERSION);
        assert_eq!(header.platform_id, Some(1));
        assert_eq!(header.platform(), Some(Platform::Egl));
        assert!(header.data_flags.materials());
        assert!(header.data_flags.nodes());
        assert!(!header.data_flags.animations());
    }

    #[test]
    fn test_decode_v191_header() {
        let data = header_bytes(191);
        let mut reader = ByteReader::new(&data[..]);
        let header = HgrHeader::decode(&mut reader).unwrap();
        assert_eq!(header.exported_version, 0x0003_0100);
        assert_eq!(header.exported_version_string(), "3.1.0");
        assert_eq!(header.platform_id, Some(1));
    }

    #[test]
    fn test_reject_version_bounds() {
        for version in [170u8, 194] {
            let data = header_bytes(version);
            let mut reader = ByteReader::new(&data[..]);
            assert!(matches!(
                HgrHeader::decode(&mut reader),
                Err(Error::UnsupportedVersion { version: v }) if v == version
            ));
        }
    }

    #[test]
    fn test_bad_magic() {
        let data = b"HGRF\xb9\x00\x00";
        let mut reader = ByteReader::new(&data[..]);
        match HgrHeader::decode(&mut reader) {
            Err(Error::BadMagic { found }) => assert_eq!(&found, b"HGRF"),
            other => panic!("expected BadMagic, got {other:?}"),
        }
    }

    #[test]
    fn test_data_flag_names() {
        assert_eq!(DataFlags(0b10011).names(), vec!["materials", "primitives", "user_properties"]);
        assert!(DataFlags(0).names().is_empty());
    }

    #[test]
    fn test_scene_params_invalid_fog() {
        let data = [2u8, 0, 0, 0, 0];
        let mut reader = ByteReader::new(&data[..]);
        assert!(matches!(
            SceneParams::decode(&mut reader),
            Err(Error::InvalidEnumValue { field: "fog type", value: 2, offset: 0 })
        ));
    }

    #[test]
    fn test_scene_params_linear() {
        let mut data = vec![1u8];
        for v in [10.0f32, 100.0, 0.5, 0.25, 1.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let mut reader = ByteReader::new(&data[..]);
        let params = SceneParams::decode(&mut reader).unwrap();
        assert_eq!(params.fog_type, FogType::Linear);
        assert_eq!(params.fog_start, 10.0);
        assert_eq!(params.fog_end, 100.0);
        assert_eq!(params.fog_colour, [0.5, 0.25, 1.0]);
    }
}
