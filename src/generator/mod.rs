pub mod accessor;
pub mod builder;
pub mod constructor;
pub mod handler;
pub mod stub;

pub use accessor::AccessorNaming;
pub use handler::HttpMethod;

use thiserror::Error;
use tracing::debug;

use crate::model::{Field, Label, Record, SourceFile};

/// What to generate, with every name already chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Getter {
        record: String,
        field: String,
        naming: AccessorNaming,
    },
    Setter {
        record: String,
        field: String,
    },
    Constructor {
        record: String,
    },
    Builder {
        record: String,
    },
    Stubs {
        interface: String,
        target: String,
    },
    Handler {
        target: String,
        verbs: Vec<HttpMethod>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("No struct named `{0}`")]
    UnknownRecord(String),

    #[error("Struct `{record}` has no private field `{field}`")]
    UnknownField { record: String, field: String },

    #[error("No interface named `{0}`")]
    UnknownContract(String),

    #[error("`{0}` only names a type; an interface needs a target type and a handler needs verbs")]
    IncompleteLabel(String),

    #[error("{0}")]
    UnknownVerb(String),
}

impl Request {
    /// Maps a record label back to the request it stands for. Bare names
    /// are ambiguous on their own and are rejected.
    pub fn from_label(label: &Label, naming: AccessorNaming) -> Result<Self, GenerateError> {
        match label {
            Label::Getter {
                type_name, field, ..
            } => Ok(Request::Getter {
                record: type_name.clone(),
                field: field.clone(),
                naming,
            }),
            Label::Setter {
                type_name, field, ..
            } => Ok(Request::Setter {
                record: type_name.clone(),
                field: field.clone(),
            }),
            Label::Constructor { type_name } => Ok(Request::Constructor {
                record: type_name.clone(),
            }),
            Label::Builder { type_name } => Ok(Request::Builder {
                record: type_name.clone(),
            }),
            Label::Named(name) => Err(GenerateError::IncompleteLabel(name.clone())),
        }
    }
}

/// Parses a comma separated verb list such as `GET,post`.
pub fn parse_verbs(list: &str) -> Result<Vec<HttpMethod>, GenerateError> {
    list.split(',')
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<HttpMethod>().map_err(GenerateError::UnknownVerb))
        .collect()
}

/// Produces the fragment for `request` from the declarations in `source`.
pub fn generate(source: &SourceFile, request: &Request) -> Result<String, GenerateError> {
    debug!(?request, "generating");

    match request {
        Request::Getter {
            record,
            field,
            naming,
        } => {
            let (record, field) = lookup_field(source, record, field)?;
            Ok(accessor::getter(&record.name, field, *naming))
        }
        Request::Setter { record, field } => {
            let (record, field) = lookup_field(source, record, field)?;
            Ok(accessor::setter(&record.name, field))
        }
        Request::Constructor { record } => {
            Ok(constructor::constructor(lookup_record(source, record)?))
        }
        Request::Builder { record } => Ok(builder::builder(lookup_record(source, record)?)),
        Request::Stubs { interface, target } => {
            let contract = source
                .contract(interface)
                .ok_or_else(|| GenerateError::UnknownContract(interface.clone()))?;
            Ok(stub::stubs(contract, target))
        }
        Request::Handler { target, verbs } => Ok(handler::handler(target, verbs)),
    }
}

fn lookup_record<'a>(source: &'a SourceFile, name: &str) -> Result<&'a Record, GenerateError> {
    source
        .record(name)
        .ok_or_else(|| GenerateError::UnknownRecord(name.to_string()))
}

fn lookup_field<'a>(
    source: &'a SourceFile,
    record: &str,
    field: &str,
) -> Result<(&'a Record, &'a Field), GenerateError> {
    let record = lookup_record(source, record)?;
    let field = record.field(field).ok_or_else(|| GenerateError::UnknownField {
        record: record.name.clone(),
        field: field.to_string(),
    })?;
    Ok((record, field))
}
