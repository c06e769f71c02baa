use serde::Serialize;

use crate::registry::{OBJECT_STORAGE, VCHAR};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub number:         i32,
    pub name:           String,
    /// Column name, always the uppercased field name.
    pub storage_name:   String,
    pub declared_type:  String,
    pub value_type:     String,
    pub wire_type:      String,
    pub storage_type:   String,
    pub has_default:    bool,
    pub default_value:  String,
    pub comment:        String,
    /// Only set for `vchar` fields, always positive.
    pub size_bound:     Option<u32>,
    pub is_scalar:      bool,
}

impl FieldDescriptor {
    /// Fields that must go through the external serialize/deserialize hooks.
    pub fn is_object(&self) -> bool {
        self.storage_type == OBJECT_STORAGE
    }

    pub fn is_vchar(&self) -> bool {
        self.declared_type == VCHAR
    }

    /// Scalars held in a string on the value side; their defaults are quoted.
    pub fn is_string_like(&self) -> bool {
        self.is_scalar && self.value_type == "std::string"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDescriptor {
    pub name:         String,
    pub storage_name: String,
    pub fields:       Vec<FieldDescriptor>,
    pub primary_keys: Vec<String>,
    pub indexes:      Vec<String>,
    pub comment:      String,
    pub generate_orm: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDescriptor {
    /// Base name of the schema source, without directory or extension.
    pub name:    String,
    pub imports: Vec<String>,
    pub structs: Vec<StructDescriptor>,
}
