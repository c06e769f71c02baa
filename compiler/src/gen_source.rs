use crate::{
    artifact::Artifact,
    config::GeneratorConfig,
    gen_header::header_file_name,
    gen_orm::{build_registrations, OrmRegistration},
    types::{FileDescriptor, StructDescriptor},
    utils::quote,
};

/// How one field crosses between the value object and its wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Plain accessor copy.
    Direct,
    /// Goes through the external `::serialize` / `::deserialize` hooks.
    Hook,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldTransfer {
    pub name: String,
    pub kind: Transfer,
}

/// The `serialize`/`deserialize` pair of one struct.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeImpl {
    pub structure: String,
    pub message:   String,
    pub fields:    Vec<FieldTransfer>,
}

/// The implementation file: method bodies inside the namespace, then the
/// ORM registrations.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub includes:      Vec<String>,
    pub namespace:     String,
    pub impls:         Vec<SerializeImpl>,
    pub registrations: Vec<OrmRegistration>,
}

pub fn source_file_name(file: &FileDescriptor) -> String {
    format!("{}.cpp", file.name)
}

fn build_impl(def: &StructDescriptor, config: &GeneratorConfig) -> SerializeImpl {
    SerializeImpl {
        structure: def.name.clone(),
        message:   config.message_name(&def.name),
        fields:    def
            .fields
            .iter()
            .map(|f| FieldTransfer {
                name: f.name.clone(),
                kind: if f.is_object() { Transfer::Hook } else { Transfer::Direct },
            })
            .collect(),
    }
}

pub fn build_source(file: &FileDescriptor, config: &GeneratorConfig) -> SourceFile {
    SourceFile {
        includes:      vec![header_file_name(file), format!("{}.pb.h", file.name)],
        namespace:     config.namespace.clone(),
        impls:         file.structs.iter().map(|d| build_impl(d, config)).collect(),
        registrations: build_registrations(file, config),
    }
}

impl SerializeImpl {
    pub fn serialize_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        out.open(format!("std::string {}::serialize() const {{", self.structure));
        out.push(format!("{} proto;", self.message));
        for field in &self.fields {
            match field.kind {
                Transfer::Hook => out.push(format!("proto.set_{0}(::serialize({0}));", field.name)),
                Transfer::Direct => out.push(format!("proto.set_{0}({0});", field.name)),
            };
        }
        out.push("return proto.SerializeAsString();");
        out.close("}");
        out
    }

    pub fn deserialize_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        out.open(format!("bool {}::deserialize(const std::string &data) {{", self.structure));
        out.push(format!("{} proto;", self.message));
        out.push("if (!proto.ParseFromString(data)) return false;");
        for field in &self.fields {
            match field.kind {
                Transfer::Hook => out.push(format!("::deserialize({0}, proto.{0}());", field.name)),
                Transfer::Direct => out.push(format!("{0} = proto.{0}();", field.name)),
            };
        }
        out.push("return true;");
        out.close("}");
        out
    }
}

impl SourceFile {
    pub fn to_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        for include in &self.includes {
            out.push(format!("#include {}", quote(include)));
        }
        out.blank();
        out.push(format!("namespace {} {{", self.namespace));
        for imp in &self.impls {
            out.blank();
            out.append(&imp.serialize_artifact());
            out.blank();
            out.append(&imp.deserialize_artifact());
        }
        out.blank();
        out.push(format!("}} // namespace {}", self.namespace));

        for registration in &self.registrations {
            out.blank();
            out.append(&registration.to_artifact());
        }
        out
    }
}

pub fn generate_source(file: &FileDescriptor, config: &GeneratorConfig) -> String {
    build_source(file, config).to_artifact().render()
}
