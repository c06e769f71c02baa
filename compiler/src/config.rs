use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};

use serde::Deserialize;

use crate::{
    error::TinyObjError,
    registry::{ScalarType, TypeRegistry},
};

/// Settings shared by every generator and the orchestrator. Passed
/// explicitly; nothing reads process-wide state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub output_dir:      PathBuf,
    pub namespace:       String,
    /// First include of every generated header.
    pub runtime_include: String,
    pub guard_prefix:    String,
    /// Wire package name, the namespace when unset.
    pub package:         Option<String>,
    pub message_suffix:  String,
    /// Text placed at the top of every generated header.
    pub banner:          Option<String>,
    pub protoc:          PathBuf,
    /// Extra scalar types layered over the standard table.
    pub scalar_types:    BTreeMap<String, ScalarType>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir:      PathBuf::from("."),
            namespace:       "tiny".to_string(),
            runtime_include: "tinyobj.h".to_string(),
            guard_prefix:    "__TINYOBJ_".to_string(),
            package:         None,
            message_suffix:  "Proto".to_string(),
            banner:          None,
            protoc:          PathBuf::from("protoc"),
            scalar_types:    BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self, TinyObjError> {
        serde_json::from_str(text).map_err(|e| TinyObjError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, TinyObjError> {
        let text = fs::read_to_string(path)
            .map_err(|e| TinyObjError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or(&self.namespace)
    }

    pub fn message_name(&self, structure: &str) -> String {
        format!("{}{}", structure, self.message_suffix)
    }

    /// The standard registry, extended with `scalar_types` when any are set.
    pub fn registry(&self) -> TypeRegistry {
        TypeRegistry::standard().extended(self.scalar_types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.package(), "tiny");
        assert_eq!(config.message_name("Player"), "PlayerProto");
        assert_eq!(config.registry(), *TypeRegistry::standard());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GeneratorConfig::from_json(
            r#"{
                "output_dir": "gen",
                "package": "game.proto",
                "scalar_types": {
                    "timestamp": {
                        "value_type": "uint32_t",
                        "wire_type": "uint32",
                        "storage_type": "UINT32",
                        "default_value": "0"
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("gen"));
        assert_eq!(config.namespace, "tiny");
        assert_eq!(config.package(), "game.proto");
        assert_eq!(config.registry().resolve("timestamp").value_type, "uint32_t");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GeneratorConfig::from_json(r#"{ "outdir": "gen" }"#).unwrap_err();
        assert!(matches!(err, TinyObjError::Config(_)));
    }

    #[test]
    fn load_missing_file() {
        let err = GeneratorConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, TinyObjError::Config(_)));
    }
}
