use crate::{
    artifact::Artifact,
    config::GeneratorConfig,
    types::{FileDescriptor, StructDescriptor},
    utils::quote,
};

/// A proto2 definition file, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoFile {
    pub imports:  Vec<String>,
    pub package:  String,
    pub messages: Vec<ProtoMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtoMessage {
    pub name:   String,
    pub fields: Vec<ProtoField>,
}

/// Every field is `optional`; `number` is the schema `num`, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoField {
    pub wire_type: String,
    pub name:      String,
    pub number:    i32,
}

pub fn proto_file_name(file: &FileDescriptor) -> String {
    format!("{}.proto", file.name)
}

fn build_message(def: &StructDescriptor, config: &GeneratorConfig) -> ProtoMessage {
    ProtoMessage {
        name:   config.message_name(&def.name),
        fields: def
            .fields
            .iter()
            .map(|f| ProtoField {
                wire_type: f.wire_type.clone(),
                name:      f.name.clone(),
                number:    f.number,
            })
            .collect(),
    }
}

pub fn build_proto(file: &FileDescriptor, config: &GeneratorConfig) -> ProtoFile {
    ProtoFile {
        imports:  file.imports.iter().map(|i| format!("{}.proto", i)).collect(),
        package:  config.package().to_string(),
        messages: file.structs.iter().map(|d| build_message(d, config)).collect(),
    }
}

impl ProtoFile {
    pub fn to_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        out.push("syntax = \"proto2\";");
        for import in &self.imports {
            out.push(format!("import {};", quote(import)));
        }
        out.blank();
        out.push(format!("package {};", self.package));

        for message in &self.messages {
            out.blank();
            out.open(format!("message {} {{", message.name));
            for field in &message.fields {
                out.push(format!(
                    "optional {} {} = {};",
                    field.wire_type, field.name, field.number
                ));
            }
            out.close("}");
        }
        out
    }
}

pub fn generate_proto(file: &FileDescriptor, config: &GeneratorConfig) -> String {
    build_proto(file, config).to_artifact().render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::parse_schema, registry::TypeRegistry};
    use std::path::Path;

    fn file(text: &str) -> FileDescriptor {
        parse_schema(text, Path::new("player.xml"), TypeRegistry::standard()).unwrap()
    }

    #[test]
    fn wire_numbers_match_schema_numbers() {
        let schema = file(
            r#"<r><Player keys="id">
                <id type="int64" num="3"/>
                <name type="string" num="1"/>
                <level type="uint8" num="7"/>
                <score type="double" num="2"/>
            </Player></r>"#,
        );
        let proto = build_proto(&schema, &GeneratorConfig::default());

        let emitted: Vec<_> = proto.messages[0]
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.number))
            .collect();
        let declared: Vec<_> = schema.structs[0]
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.number))
            .collect();
        assert_eq!(emitted, declared);
        assert_eq!(emitted, vec![("id", 3), ("name", 1), ("level", 7), ("score", 2)]);
    }

    #[test]
    fn render() {
        let text = generate_proto(
            &file(
                r#"<r>
                    <import>country.xml</import>
                    <Player keys="id">
                        <id type="int64" num="1"/>
                        <name type="string" num="2"/>
                        <country type="Country" num="3"/>
                    </Player>
                </r>"#,
            ),
            &GeneratorConfig::default(),
        );

        let expected = "\
syntax = \"proto2\";
import \"country.proto\";

package tiny;

message PlayerProto {
    optional sint64 id = 1;
    optional bytes name = 2;
    optional bytes country = 3;
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn custom_package_and_suffix() {
        let config = GeneratorConfig {
            package:        Some("game".to_string()),
            message_suffix: "Msg".to_string(),
            ..GeneratorConfig::default()
        };
        let schema = file(r#"<r><Item keys="id"><id type="int32" num="1"/></Item></r>"#);
        let proto = build_proto(&schema, &config);
        assert_eq!(proto.package, "game");
        assert_eq!(proto.messages[0].name, "ItemMsg");
    }
}
