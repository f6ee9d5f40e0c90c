//! Addressable 32-bit registers.

use serde::Serialize;

use crate::access::AccessPolicy;
use crate::field::Field;

/// An addressable, fixed-width control/status register.
///
/// Names are normalized to lower case. Field order is the order in which
/// field rows were first seen while scanning the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Register {
    pub name: String,
    pub address: u64,
    pub access: AccessPolicy,
    pub fields: Vec<Field>,
}

impl Register {
    pub fn new(name: &str, address: u64, access: AccessPolicy) -> Self {
        Self {
            name: name.to_lowercase(),
            address,
            access,
            fields: Vec::new(),
        }
    }

    /// Append a field. Field validity is enforced at [`Field::new`].
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn is_read_only(&self) -> bool {
        self.access.is_read_only()
    }
}
