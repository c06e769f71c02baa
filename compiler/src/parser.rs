use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::{
    error::TinyObjError,
    registry::{TypeRegistry, VCHAR},
    types::{FieldDescriptor, FileDescriptor, StructDescriptor},
    utils::{base_name, split_upper_list},
    verifier::{verify_identifier, verify_primary_keys, verify_size_bound, NumberGuard},
};

const IMPORT_TAG: &str = "import";

/// Attributes of a field element exactly as written in the schema.
#[derive(Debug, Default, PartialEq)]
struct RawField<'a> {
    name:    &'a str,
    type_:   Option<&'a str>,
    num:     Option<&'a str>,
    default: Option<&'a str>,
    size:    Option<&'a str>,
    comment: Option<&'a str>,
}

impl<'a> RawField<'a> {
    fn decode(node: Node<'a, '_>) -> Self {
        RawField {
            name:    node.tag_name().name(),
            type_:   node.attribute("type"),
            num:     node.attribute("num"),
            default: node.attribute("default"),
            size:    node.attribute("size"),
            comment: node.attribute("comment"),
        }
    }
}

/// Attributes of a struct element exactly as written in the schema.
#[derive(Debug, Default, PartialEq)]
struct RawStruct<'a> {
    name:    &'a str,
    comment: Option<&'a str>,
    orm:     Option<&'a str>,
    keys:    Option<&'a str>,
    index:   Option<&'a str>,
}

impl<'a> RawStruct<'a> {
    fn decode(node: Node<'a, '_>) -> Self {
        RawStruct {
            name:    node.tag_name().name(),
            comment: node.attribute("comment"),
            orm:     node.attribute("orm"),
            keys:    node.attribute("keys"),
            index:   node.attribute("index"),
        }
    }
}

/// Parses the schema text read from `path` into a file descriptor. The
/// first invalid struct aborts the whole file.
pub fn parse_schema(
    text: &str,
    path: &Path,
    registry: &TypeRegistry,
) -> Result<FileDescriptor, TinyObjError> {
    let doc = Document::parse(text).map_err(|e| TinyObjError::SourceReadFailure {
        path:   path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut file = FileDescriptor {
        name:    base_name(&path.to_string_lossy()),
        imports: Vec::new(),
        structs: Vec::new(),
    };

    for node in doc.root_element().children().filter(|n| n.is_element()) {
        if node.tag_name().name() == IMPORT_TAG {
            let target = base_name(node.text().unwrap_or(""));
            if target.is_empty() {
                warn!("{}: ignoring empty import", path.display());
                continue;
            }
            file.imports.push(target);
        } else {
            file.structs.push(parse_struct(node, registry)?);
        }
    }

    Ok(file)
}

pub fn parse_struct(node: Node, registry: &TypeRegistry) -> Result<StructDescriptor, TinyObjError> {
    let raw = RawStruct::decode(node);
    verify_identifier(raw.name)?;

    let mut fields = Vec::new();
    let mut guard = NumberGuard::new(raw.name);
    for child in node.children().filter(|n| n.is_element()) {
        let field = parse_field(child, raw.name, registry)?;
        guard.claim(&field)?;
        fields.push(field);
    }

    let primary_keys = split_upper_list(raw.keys);
    verify_primary_keys(raw.name, &primary_keys)?;

    debug!("parsed struct {} with {} fields", raw.name, fields.len());

    Ok(StructDescriptor {
        name:         raw.name.to_string(),
        storage_name: raw.name.to_uppercase(),
        fields,
        primary_keys,
        indexes:      split_upper_list(raw.index),
        comment:      raw.comment.unwrap_or("").to_string(),
        generate_orm: raw.orm.map(str::trim) != Some("0"),
    })
}

pub fn parse_field(
    node: Node,
    structure: &str,
    registry: &TypeRegistry,
) -> Result<FieldDescriptor, TinyObjError> {
    let raw = RawField::decode(node);
    verify_identifier(raw.name)?;

    let missing = |attribute| TinyObjError::MissingAttribute {
        structure: structure.to_string(),
        field:     raw.name.to_string(),
        attribute,
    };
    let invalid = |attribute, value: &str| TinyObjError::InvalidAttribute {
        structure: structure.to_string(),
        field:     raw.name.to_string(),
        attribute,
        value:     value.to_string(),
    };

    let declared_type = raw.type_.map(str::trim).ok_or_else(|| missing("type"))?;
    if declared_type.is_empty() {
        return Err(missing("type"));
    }
    let num = raw.num.ok_or_else(|| missing("num"))?;
    let number = num.trim().parse::<i32>().map_err(|_| invalid("num", num))?;

    let resolved = registry.resolve(declared_type);
    let default_value = match raw.default {
        Some(explicit) => explicit.to_string(),
        None => resolved.default.unwrap_or_default(),
    };

    let size_bound = if declared_type == VCHAR {
        let size = match raw.size {
            Some(size) => Some(size.trim().parse::<u32>().map_err(|_| invalid("size", size))?),
            None => None,
        };
        Some(verify_size_bound(structure, raw.name, size)?)
    } else {
        None
    };

    Ok(FieldDescriptor {
        number,
        name:          raw.name.to_string(),
        storage_name:  raw.name.to_uppercase(),
        declared_type: declared_type.to_string(),
        value_type:    resolved.value_type,
        wire_type:     resolved.wire_type,
        storage_type:  resolved.storage_type,
        has_default:   raw.default.is_some(),
        default_value,
        comment:       raw.comment.unwrap_or("").to_string(),
        size_bound,
        is_scalar:     resolved.is_scalar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{OBJECT_STORAGE, OPAQUE_WIRE_TYPE};

    fn parse(text: &str) -> Result<FileDescriptor, TinyObjError> {
        parse_schema(text, Path::new("schemas/player.xml"), TypeRegistry::standard())
    }

    #[test]
    fn parse_player() {
        let file = parse(
            r#"<tinyobj>
                <import>schemas/country.xml</import>
                <Player comment="a player" keys="id" index="name, level">
                    <id type="int64" num="1" comment="unique id"/>
                    <name type="string" num="2"/>
                    <level type="uint16" num="3" default="1"/>
                </Player>
            </tinyobj>"#,
        )
        .unwrap();

        assert_eq!(file.name, "player");
        assert_eq!(file.imports, vec!["country"]);
        assert_eq!(file.structs.len(), 1);

        let player = &file.structs[0];
        assert_eq!(player.name, "Player");
        assert_eq!(player.storage_name, "PLAYER");
        assert_eq!(player.comment, "a player");
        assert_eq!(player.primary_keys, vec!["ID"]);
        assert_eq!(player.indexes, vec!["NAME", "LEVEL"]);
        assert!(player.generate_orm);

        let names: Vec<_> = player.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "level"]);

        let id = &player.fields[0];
        assert_eq!(id.number, 1);
        assert_eq!(id.storage_name, "ID");
        assert_eq!(id.value_type, "int64_t");
        assert_eq!(id.default_value, "0");
        assert!(!id.has_default);
        assert_eq!(id.comment, "unique id");

        let level = &player.fields[2];
        assert_eq!(level.number, 3);
        assert_eq!(level.default_value, "1");
        assert!(level.has_default);
    }

    #[test]
    fn missing_type_or_num() {
        let err = parse(r#"<r><Player keys="id"><id num="1"/></Player></r>"#).unwrap_err();
        assert!(matches!(
            err,
            TinyObjError::MissingAttribute { ref structure, ref field, attribute: "type" }
                if structure == "Player" && field == "id"
        ));

        let err = parse(r#"<r><Player keys="id"><id type="int64"/></Player></r>"#).unwrap_err();
        assert!(matches!(err, TinyObjError::MissingAttribute { attribute: "num", .. }));
    }

    #[test]
    fn invalid_num() {
        let err = parse(r#"<r><Player keys="id"><id type="int64" num="one"/></Player></r>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TinyObjError::InvalidAttribute { attribute: "num", ref value, .. } if value == "one"
        ));
    }

    #[test]
    fn vchar_size_bound() {
        let err = parse(r#"<r><Player keys="id"><name type="vchar" num="1"/></Player></r>"#)
            .unwrap_err();
        assert!(matches!(err, TinyObjError::MissingSizeBound { .. }));

        let err = parse(
            r#"<r><Player keys="id"><name type="vchar" num="1" size="0"/></Player></r>"#,
        )
        .unwrap_err();
        assert!(matches!(err, TinyObjError::MissingSizeBound { .. }));

        let err = parse(
            r#"<r><Player keys="id"><name type="vchar" num="1" size="-2"/></Player></r>"#,
        )
        .unwrap_err();
        assert!(matches!(err, TinyObjError::InvalidAttribute { attribute: "size", .. }));

        let file = parse(
            r#"<r><Player keys="id"><name type="vchar" num="1" size="64"/></Player></r>"#,
        )
        .unwrap();
        assert_eq!(file.structs[0].fields[0].size_bound, Some(64));
    }

    #[test]
    fn size_is_ignored_for_other_types() {
        let file = parse(
            r#"<r><Player keys="id"><name type="string" num="1" size="64"/></Player></r>"#,
        )
        .unwrap();
        assert_eq!(file.structs[0].fields[0].size_bound, None);
    }

    #[test]
    fn duplicate_field_number() {
        let err = parse(
            r#"<r><Player keys="id">
                <id type="int64" num="1"/>
                <uid type="int64" num="1"/>
            </Player></r>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TinyObjError::DuplicateFieldNumber { ref structure, ref field, number: 1 }
                if structure == "Player" && field == "uid"
        ));
    }

    #[test]
    fn missing_primary_key() {
        let err = parse(r#"<r><Player><id type="int64" num="1"/></Player></r>"#).unwrap_err();
        assert!(matches!(err, TinyObjError::MissingPrimaryKey(ref s) if s == "Player"));

        let err = parse(r#"<r><Player keys=" , "><id type="int64" num="1"/></Player></r>"#)
            .unwrap_err();
        assert!(matches!(err, TinyObjError::MissingPrimaryKey(_)));
    }

    #[test]
    fn orm_flag() {
        let file = parse(
            r#"<r>
                <A keys="id" orm="0"><id type="int32" num="1"/></A>
                <B keys="id" orm=" 0 "><id type="int32" num="1"/></B>
                <C keys="id" orm="1"><id type="int32" num="1"/></C>
                <D keys="id" orm="no"><id type="int32" num="1"/></D>
            </r>"#,
        )
        .unwrap();
        let flags: Vec<_> = file.structs.iter().map(|s| s.generate_orm).collect();
        assert_eq!(flags, vec![false, false, true, true]);
    }

    #[test]
    fn composite_type() {
        let file = parse(
            r#"<r><Player keys="id"><friends type="std::vector{Friend}" num="1"/></Player></r>"#,
        )
        .unwrap();
        let friends = &file.structs[0].fields[0];
        assert_eq!(friends.value_type, "std::vector<Friend>");
        assert_eq!(friends.wire_type, OPAQUE_WIRE_TYPE);
        assert_eq!(friends.storage_type, OBJECT_STORAGE);
        assert_eq!(friends.default_value, "");
        assert!(friends.is_object());
    }

    #[test]
    fn invalid_identifier() {
        let err = parse(r#"<r><Player keys="id"><first-name type="string" num="1"/></Player></r>"#)
            .unwrap_err();
        assert!(matches!(err, TinyObjError::InvalidIdentifier(ref n) if n == "first-name"));
    }

    #[test]
    fn malformed_xml() {
        let err = parse("<r><Player keys=\"id\"></r>").unwrap_err();
        assert!(matches!(err, TinyObjError::SourceReadFailure { .. }));
    }

    #[test]
    fn comments_and_empty_imports_are_skipped() {
        let file = parse(
            r#"<r>
                <!-- shared types -->
                <import>  </import>
                <import>friend.xml</import>
            </r>"#,
        )
        .unwrap();
        assert_eq!(file.imports, vec!["friend"]);
        assert!(file.structs.is_empty());
    }
}
