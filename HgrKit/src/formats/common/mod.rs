//! Primitives shared by the HGR and NTX decoders

pub mod half;
pub mod reader;

pub use half::half_to_f32;
pub use reader::{ByteReader, bounded_capacity};
