use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::TinyObjError,
    types::{FieldDescriptor, FileDescriptor, StructDescriptor},
};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

pub fn verify_identifier(name: &str) -> Result<(), TinyObjError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(TinyObjError::InvalidIdentifier(name.to_string()))
    }
}

/// A `vchar` field needs a positive size.
pub fn verify_size_bound(
    structure: &str,
    field: &str,
    size: Option<u32>,
) -> Result<u32, TinyObjError> {
    match size {
        Some(size) if size > 0 => Ok(size),
        _ => Err(TinyObjError::MissingSizeBound {
            structure: structure.to_string(),
            field:     field.to_string(),
        }),
    }
}

pub fn verify_primary_keys(structure: &str, keys: &[String]) -> Result<(), TinyObjError> {
    if keys.is_empty() {
        return Err(TinyObjError::MissingPrimaryKey(structure.to_string()));
    }
    Ok(())
}

/// Tracks field numbers already taken inside one struct. The first field
/// keeps the number, any later one is rejected.
pub struct NumberGuard<'a> {
    structure: &'a str,
    taken:     HashMap<i32, String>,
}

impl<'a> NumberGuard<'a> {
    pub fn new(structure: &'a str) -> Self {
        NumberGuard { structure, taken: HashMap::new() }
    }

    pub fn claim(&mut self, field: &FieldDescriptor) -> Result<(), TinyObjError> {
        if self.taken.contains_key(&field.number) {
            return Err(TinyObjError::DuplicateFieldNumber {
                structure: self.structure.to_string(),
                field:     field.name.clone(),
                number:    field.number,
            });
        }
        self.taken.insert(field.number, field.name.clone());
        Ok(())
    }
}

/// Re-checks an assembled struct. The parser applies the same rules while
/// decoding; `emit_file` runs this on every tree before writing it.
pub fn verify_struct(def: &StructDescriptor) -> Result<(), TinyObjError> {
    verify_identifier(&def.name)?;

    let mut guard = NumberGuard::new(&def.name);
    for field in &def.fields {
        verify_identifier(&field.name)?;
        if field.declared_type.is_empty() {
            return Err(TinyObjError::MissingAttribute {
                structure: def.name.clone(),
                field:     field.name.clone(),
                attribute: "type",
            });
        }
        if field.is_vchar() {
            verify_size_bound(&def.name, &field.name, field.size_bound)?;
        }
        guard.claim(field)?;
    }

    verify_primary_keys(&def.name, &def.primary_keys)
}

pub fn verify_file(file: &FileDescriptor) -> Result<(), TinyObjError> {
    for def in &file.structs {
        verify_struct(def)?;
    }
    Ok(())
}
