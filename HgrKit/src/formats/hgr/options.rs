//! Decode options for HGR scenes
//!
//! Controls the validation passes run after the sections have been read.
//! Neither pass changes how bytes are consumed.

/// Options for [`decode_hgr_with_options`](super::decode_hgr_with_options).
///
/// # Example
///
/// ```
/// use hgrkit::formats::hgr::DecodeOptions;
///
/// // Accept scenes with dangling indices but still reject cyclic node trees
/// let options = DecodeOptions::new().with_validate_references(false);
/// assert!(options.validate_hierarchy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject node parent chains that loop back on themselves
    /// Default: true
    pub validate_hierarchy: bool,

    /// Range-check mesh->primitive, primitive->material and
    /// material texture-param->texture indices
    /// Default: true
    pub validate_references: bool,
}

impl DecodeOptions {
    /// Create options with every validation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validate_hierarchy: true,
            validate_references: true,
        }
    }

    /// Create options that only read the bytes, with no validation.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            validate_hierarchy: false,
            validate_references: false,
        }
    }

    #[must_use]
    pub fn with_validate_hierarchy(mut self, value: bool) -> Self {
        self.validate_hierarchy = value;
        self
    }

    #[must_use]
    pub fn with_validate_references(mut self, value: bool) -> Self {
        self.validate_references = value;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_everything() {
        let options = DecodeOptions::default();
        assert!(options.validate_hierarchy);
        assert!(options.validate_references);
    }

    #[test]
    fn test_builders() {
        let options = DecodeOptions::lenient().with_validate_hierarchy(true);
        assert!(options.validate_hierarchy);
        assert!(!options.validate_references);
    }
}
