//! UVM access policies for registers and fields.

use std::fmt;

use serde::Serialize;

use crate::error::IrError;

/// A UVM register/field access policy.
///
/// Cells are parsed case-insensitively; output always renders the canonical
/// upper-case spelling expected by `uvm_reg_field::configure` and
/// `uvm_reg_map::add_reg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessPolicy {
    Ro,
    Rw,
    Rc,
    Rs,
    Wrc,
    Wrs,
    Wc,
    Ws,
    Wsrc,
    Wcrs,
    W1c,
    W1s,
    W1t,
    W0c,
    W0s,
    W0t,
    W1src,
    W1crs,
    W0src,
    W0crs,
    Wo,
    Woc,
    Wos,
    W1,
    Wo1,
}

impl AccessPolicy {
    /// Parse an access-policy cell.
    pub fn parse(text: &str) -> Result<Self, IrError> {
        match text.trim().to_ascii_uppercase().as_str() {
            "RO" => Ok(AccessPolicy::Ro),
            "RW" => Ok(AccessPolicy::Rw),
            "RC" => Ok(AccessPolicy::Rc),
            "RS" => Ok(AccessPolicy::Rs),
            "WRC" => Ok(AccessPolicy::Wrc),
            "WRS" => Ok(AccessPolicy::Wrs),
            "WC" => Ok(AccessPolicy::Wc),
            "WS" => Ok(AccessPolicy::Ws),
            "WSRC" => Ok(AccessPolicy::Wsrc),
            "WCRS" => Ok(AccessPolicy::Wcrs),
            "W1C" => Ok(AccessPolicy::W1c),
            "W1S" => Ok(AccessPolicy::W1s),
            "W1T" => Ok(AccessPolicy::W1t),
            "W0C" => Ok(AccessPolicy::W0c),
            "W0S" => Ok(AccessPolicy::W0s),
            "W0T" => Ok(AccessPolicy::W0t),
            "W1SRC" => Ok(AccessPolicy::W1src),
            "W1CRS" => Ok(AccessPolicy::W1crs),
            "W0SRC" => Ok(AccessPolicy::W0src),
            "W0CRS" => Ok(AccessPolicy::W0crs),
            "WO" => Ok(AccessPolicy::Wo),
            "WOC" => Ok(AccessPolicy::Woc),
            "WOS" => Ok(AccessPolicy::Wos),
            "W1" => Ok(AccessPolicy::W1),
            "WO1" => Ok(AccessPolicy::Wo1),
            _ => Err(IrError::UnknownAccessPolicy {
                text: text.to_string(),
            }),
        }
    }

    /// The canonical upper-case UVM spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPolicy::Ro => "RO",
            AccessPolicy::Rw => "RW",
            AccessPolicy::Rc => "RC",
            AccessPolicy::Rs => "RS",
            AccessPolicy::Wrc => "WRC",
            AccessPolicy::Wrs => "WRS",
            AccessPolicy::Wc => "WC",
            AccessPolicy::Ws => "WS",
            AccessPolicy::Wsrc => "WSRC",
            AccessPolicy::Wcrs => "WCRS",
            AccessPolicy::W1c => "W1C",
            AccessPolicy::W1s => "W1S",
            AccessPolicy::W1t => "W1T",
            AccessPolicy::W0c => "W0C",
            AccessPolicy::W0s => "W0S",
            AccessPolicy::W0t => "W0T",
            AccessPolicy::W1src => "W1SRC",
            AccessPolicy::W1crs => "W1CRS",
            AccessPolicy::W0src => "W0SRC",
            AccessPolicy::W0crs => "W0CRS",
            AccessPolicy::Wo => "WO",
            AccessPolicy::Woc => "WOC",
            AccessPolicy::Wos => "WOS",
            AccessPolicy::W1 => "W1",
            AccessPolicy::Wo1 => "WO1",
        }
    }

    /// Whether the policy forbids writes entirely.
    pub fn is_read_only(&self) -> bool {
        matches!(self, AccessPolicy::Ro)
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
