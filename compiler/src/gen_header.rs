use crate::{
    artifact::Artifact,
    config::GeneratorConfig,
    types::{FieldDescriptor, FileDescriptor, StructDescriptor},
    utils::quote,
};

pub const GENERATED_NOTICE: &str = "// !!NOTICE: This file is generated by tinyobj, DON'T EDIT!";

/// The value-object header of one schema file, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFile {
    pub banner:    Option<String>,
    pub guard:     String,
    pub includes:  Vec<String>,
    pub namespace: String,
    pub structs:   Vec<ValueStruct>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueStruct {
    pub name:    String,
    pub comment: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub value_type:  String,
    pub name:        String,
    pub initializer: Option<String>,
    pub comment:     String,
}

pub fn header_file_name(file: &FileDescriptor) -> String {
    format!("{}.h", file.name)
}

/// String-like scalars always get an initializer, quoted, even when empty.
/// Everything else gets a bare initializer only for a non-empty default.
fn initializer(field: &FieldDescriptor) -> Option<String> {
    if field.is_string_like() {
        Some(quote(&field.default_value))
    } else if !field.default_value.is_empty() {
        Some(field.default_value.clone())
    } else {
        None
    }
}

fn build_struct(def: &StructDescriptor) -> ValueStruct {
    ValueStruct {
        name:    def.name.clone(),
        comment: def.comment.clone(),
        members: def
            .fields
            .iter()
            .map(|f| Member {
                value_type:  f.value_type.clone(),
                name:        f.name.clone(),
                initializer: initializer(f),
                comment:     f.comment.clone(),
            })
            .collect(),
    }
}

pub fn build_header(file: &FileDescriptor, config: &GeneratorConfig) -> HeaderFile {
    let mut includes = vec![config.runtime_include.clone()];
    includes.extend(file.imports.iter().map(|i| format!("{}.h", i)));

    HeaderFile {
        banner:    config.banner.clone(),
        guard:     format!("{}{}__", config.guard_prefix, file.name.to_uppercase()),
        includes,
        namespace: config.namespace.clone(),
        structs:   file.structs.iter().map(build_struct).collect(),
    }
}

impl ValueStruct {
    pub fn to_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        out.blank();
        if !self.comment.is_empty() {
            out.push("//").push(format!("// {}", self.comment)).push("//");
        }
        out.open(format!("struct {} {{", self.name));
        out.push("//").push("// Serialization Support").push("//");
        out.push("std::string serialize() const;");
        out.push("bool deserialize(const std::string &data);");
        out.blank();

        for member in &self.members {
            if !member.comment.is_empty() {
                out.push(format!("// {}", member.comment));
            }
            match &member.initializer {
                Some(init) => {
                    out.push(format!("{} {} = {};", member.value_type, member.name, init))
                }
                None => out.push(format!("{} {};", member.value_type, member.name)),
            };
        }
        out.close("};");
        out
    }
}

impl HeaderFile {
    pub fn to_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        if let Some(banner) = &self.banner {
            out.raw(banner).blank();
        }
        out.push(GENERATED_NOTICE).blank();
        out.push(format!("#ifndef {}", self.guard));
        out.push(format!("#define {}", self.guard));
        out.blank();
        for include in &self.includes {
            out.push(format!("#include {}", quote(include)));
        }
        out.blank();
        out.push(format!("namespace {} {{", self.namespace));
        for def in &self.structs {
            out.append(&def.to_artifact());
        }
        out.blank();
        out.push(format!("}} // namespace {}", self.namespace));
        out.blank();
        out.push(format!("#endif // {}", self.guard));
        out
    }
}

pub fn generate_header(file: &FileDescriptor, config: &GeneratorConfig) -> String {
    build_header(file, config).to_artifact().render()
}
