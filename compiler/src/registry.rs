use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Storage kind given to every field whose type is not a registered scalar.
pub const OBJECT_STORAGE: &str = "OBJECT";

/// Wire type given to every field whose type is not a registered scalar.
pub const OPAQUE_WIRE_TYPE: &str = "bytes";

/// The variable-length character scalar; fields of this type need a `size`.
pub const VCHAR: &str = "vchar";

/// How one scalar schema type is represented in every target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarType {
    pub value_type:    String,
    pub wire_type:     String,
    pub storage_type:  String,
    pub default_value: String,
}

impl ScalarType {
    pub fn new(value_type: &str, wire_type: &str, storage_type: &str, default_value: &str) -> Self {
        ScalarType {
            value_type:    value_type.to_string(),
            wire_type:     wire_type.to_string(),
            storage_type:  storage_type.to_string(),
            default_value: default_value.to_string(),
        }
    }
}

/// Result of resolving a declared type against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub value_type:   String,
    pub wire_type:    String,
    pub storage_type: String,
    /// Registry default, `None` for composite types.
    pub default:      Option<String>,
    pub is_scalar:    bool,
}

/// Lookup table from scalar schema type name to its representations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRegistry {
    scalars: BTreeMap<String, ScalarType>,
}

lazy_static! {
    static ref STANDARD: TypeRegistry = TypeRegistry::from_entries([
        // signed
        ("int8",   ScalarType::new("int8_t",  "sint32", "INT8",  "0")),
        ("int16",  ScalarType::new("int16_t", "sint32", "INT16", "0")),
        ("int32",  ScalarType::new("int32_t", "sint32", "INT32", "0")),
        ("int64",  ScalarType::new("int64_t", "sint64", "INT64", "0")),

        // unsigned
        ("uint8",  ScalarType::new("uint8_t",  "uint32", "UINT8",  "0")),
        ("uint16", ScalarType::new("uint16_t", "uint32", "UINT16", "0")),
        ("uint32", ScalarType::new("uint32_t", "uint32", "UINT32", "0")),
        ("uint64", ScalarType::new("uint64_t", "uint64", "UINT64", "0")),

        ("float",  ScalarType::new("float",  "float",  "FLOAT",  "0")),
        ("double", ScalarType::new("double", "double", "DOUBLE", "0")),
        ("bool",   ScalarType::new("bool",   "bool",   "BOOL",   "0")),

        ("string", ScalarType::new("std::string", "bytes", "STRING", "")),
        (VCHAR,    ScalarType::new("std::string", "bytes", "VCHAR",  "")),

        ("bytes",        ScalarType::new("std::string", "bytes", "BYTES",        "")),
        ("bytes_tiny",   ScalarType::new("std::string", "bytes", "BYTES_TINY",   "")),
        ("bytes_medium", ScalarType::new("std::string", "bytes", "BYTES_MEDIUM", "")),
        ("bytes_long",   ScalarType::new("std::string", "bytes", "BYTES_LONG",   "")),
    ]);
}

impl TypeRegistry {
    /// The built-in scalar table shared by the whole process.
    pub fn standard() -> &'static TypeRegistry {
        &STANDARD
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ScalarType)>,
        K: Into<String>,
    {
        TypeRegistry {
            scalars: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns a copy of `self` with `extra` added, replacing entries of the
    /// same name.
    pub fn extended<I, K>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, ScalarType)>,
        K: Into<String>,
    {
        let mut scalars = self.scalars.clone();
        scalars.extend(extra.into_iter().map(|(k, v)| (k.into(), v)));
        TypeRegistry { scalars }
    }

    /// `None` means "not a scalar type", never an error.
    pub fn lookup(&self, name: &str) -> Option<&ScalarType> {
        self.scalars.get(name)
    }

    /// Resolves a declared type. Unknown names are treated as user-defined
    /// composite types, with `{`/`}` standing in for template brackets.
    pub fn resolve(&self, declared: &str) -> ResolvedType {
        match self.lookup(declared) {
            Some(scalar) => ResolvedType {
                value_type:   scalar.value_type.clone(),
                wire_type:    scalar.wire_type.clone(),
                storage_type: scalar.storage_type.clone(),
                default:      Some(scalar.default_value.clone()),
                is_scalar:    true,
            },
            None => ResolvedType {
                value_type:   declared.replace('{', "<").replace('}', ">"),
                wire_type:    OPAQUE_WIRE_TYPE.to_string(),
                storage_type: OBJECT_STORAGE.to_string(),
                default:      None,
                is_scalar:    false,
            },
        }
    }
}
