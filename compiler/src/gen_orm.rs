use crate::{
    artifact::Artifact,
    config::GeneratorConfig,
    types::{FieldDescriptor, FileDescriptor, StructDescriptor},
    utils::quote,
};

/// One link of the `TableFactory` builder chain.
#[derive(Debug, Clone, PartialEq)]
pub enum OrmClause {
    Field {
        member:       String,
        column:       String,
        storage_type: String,
        default:      Option<String>,
        size:         Option<u32>,
    },
    Index(String),
    /// `terminal` is set on the last key only; it closes the statement.
    Key { column: String, terminal: bool },
}

/// The registration statement binding one struct to its table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrmRegistration {
    pub structure: String,
    pub namespace: String,
    pub table:     String,
    pub clauses:   Vec<OrmClause>,
}

fn field_clause(def: &StructDescriptor, field: &FieldDescriptor) -> OrmClause {
    // a size always comes with its default, even an empty one
    let default = if field.size_bound.is_some() || !field.default_value.is_empty() {
        Some(field.default_value.clone())
    } else {
        None
    };
    OrmClause::Field {
        member:       format!("&{}::{}", def.name, field.name),
        column:       field.storage_name.clone(),
        storage_type: field.storage_type.clone(),
        default,
        size:         field.size_bound,
    }
}

pub fn build_registration(def: &StructDescriptor, config: &GeneratorConfig) -> OrmRegistration {
    let mut clauses: Vec<OrmClause> = def.fields.iter().map(|f| field_clause(def, f)).collect();
    clauses.extend(def.indexes.iter().cloned().map(OrmClause::Index));

    let last = def.primary_keys.len().saturating_sub(1);
    clauses.extend(def.primary_keys.iter().enumerate().map(|(i, key)| OrmClause::Key {
        column:   key.clone(),
        terminal: i == last,
    }));

    OrmRegistration {
        structure: def.name.clone(),
        namespace: config.namespace.clone(),
        table:     def.storage_name.clone(),
        clauses,
    }
}

/// Registrations for every struct that has ORM output enabled.
pub fn build_registrations(
    file: &FileDescriptor,
    config: &GeneratorConfig,
) -> Vec<OrmRegistration> {
    file.structs
        .iter()
        .filter(|d| d.generate_orm)
        .map(|d| build_registration(d, config))
        .collect()
}

impl OrmClause {
    pub fn render(&self) -> String {
        match self {
            OrmClause::Field { member, column, storage_type, default, size } => {
                let mut args = vec![
                    member.clone(),
                    quote(column),
                    format!("FieldType::{}", storage_type),
                ];
                if let Some(default) = default {
                    args.push(quote(default));
                }
                if let Some(size) = size {
                    args.push(size.to_string());
                }
                format!(".field({})", args.join(", "))
            }
            OrmClause::Index(column) => format!(".index({})", quote(column)),
            OrmClause::Key { column, terminal } => {
                format!(".key({}){}", quote(column), if *terminal { ";" } else { "" })
            }
        }
    }
}

impl OrmRegistration {
    pub fn to_artifact(&self) -> Artifact {
        let mut out = Artifact::new();
        out.open(format!("RUN_ONCE({}ORM) {{", self.structure));
        out.push(format!("using namespace {};", self.namespace));
        out.push(format!(
            "TableFactory::instance().table<{}>({})",
            self.structure,
            quote(&self.table)
        ));
        out.indent();
        for clause in &self.clauses {
            out.push(clause.render());
        }
        out.dedent();
        out.close("}");
        out
    }
}
