//! Bit fields within a register.

use serde::Serialize;

use crate::access::AccessPolicy;
use crate::error::IrError;

/// Marker substring identifying reserved fields in the source tables.
pub const RESERVED_MARKER: &str = "reserve";

/// One bit range within a 32-bit register.
///
/// Immutable once constructed; owned exclusively by its
/// [`crate::Register`]. Width is always derived from the bit positions,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub access: AccessPolicy,
    pub reset: u64,
    /// Most-significant bit position.
    pub hi: u32,
    /// Least-significant bit position.
    pub lo: u32,
    pub function: Option<String>,
}

impl Field {
    /// Construct a field, enforcing `hi >= lo`.
    pub fn new(
        name: impl Into<String>,
        access: AccessPolicy,
        reset: u64,
        hi: u32,
        lo: u32,
        function: Option<String>,
    ) -> Result<Self, IrError> {
        let name = name.into();
        if hi < lo {
            return Err(IrError::InvalidFieldRange { name, hi, lo });
        }
        Ok(Self {
            name,
            access,
            reset,
            hi,
            lo,
            function,
        })
    }

    /// Bit width of the field.
    pub fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Whether the field's name carries the reserved marker.
    pub fn is_reserved(&self) -> bool {
        self.name.contains(RESERVED_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_derived_from_bit_positions() {
        let f = Field::new("en", AccessPolicy::Rw, 0, 0, 0, None).unwrap();
        assert_eq!(f.width(), 1);
        let f = Field::new("data", AccessPolicy::Rw, 0, 31, 8, None).unwrap();
        assert_eq!(f.width(), 24);
    }

    #[test]
    fn inverted_range_rejected() {
        let err = Field::new("bad", AccessPolicy::Ro, 0, 3, 7, None).unwrap_err();
        assert_eq!(
            err,
            IrError::InvalidFieldRange {
                name: "bad".to_string(),
                hi: 3,
                lo: 7,
            }
        );
    }

    #[test]
    fn reserved_marker_detection() {
        let f = Field::new("reserve0", AccessPolicy::Ro, 0, 31, 1, None).unwrap();
        assert!(f.is_reserved());
        let f = Field::new("en", AccessPolicy::Rw, 0, 0, 0, None).unwrap();
        assert!(!f.is_reserved());
    }
}
