//! Pick-list labels shown by the editor and parsed back into a selection.
//!
//! Record labels look like `User Get name ( string )`, `User Set name ( string )`,
//! `User Constructor` and `User Builder`; interfaces and handler targets are
//! listed by bare name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ast::SourceFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Getter {
        type_name: String,
        field: String,
        field_type: String,
    },
    Setter {
        type_name: String,
        field: String,
        field_type: String,
    },
    Constructor { type_name: String },
    Builder { type_name: String },
    Named(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Empty label")]
    Empty,

    #[error("Unknown action `{action}` in label `{label}`")]
    UnknownAction { label: String, action: String },

    #[error("Malformed accessor label `{0}`: expected `<Type> Get|Set <field> ( <type> )`")]
    MalformedAccessor(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Getter {
                type_name,
                field,
                field_type,
            } => write!(f, "{} Get {} ( {} )", type_name, field, field_type),
            Label::Setter {
                type_name,
                field,
                field_type,
            } => write!(f, "{} Set {} ( {} )", type_name, field, field_type),
            Label::Constructor { type_name } => write!(f, "{} Constructor", type_name),
            Label::Builder { type_name } => write!(f, "{} Builder", type_name),
            Label::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(LabelError::Empty),
            [name] => Ok(Label::Named(name.to_string())),
            [type_name, "Constructor"] => Ok(Label::Constructor {
                type_name: type_name.to_string(),
            }),
            [type_name, "Builder"] => Ok(Label::Builder {
                type_name: type_name.to_string(),
            }),
            [type_name, action @ ("Get" | "Set"), field, "(", ty @ .., ")"] if !ty.is_empty() => {
                let type_name = type_name.to_string();
                let field = field.to_string();
                let field_type = ty.join(" ");
                Ok(if *action == "Get" {
                    Label::Getter {
                        type_name,
                        field,
                        field_type,
                    }
                } else {
                    Label::Setter {
                        type_name,
                        field,
                        field_type,
                    }
                })
            }
            [_, "Get" | "Set", ..] => Err(LabelError::MalformedAccessor(s.to_string())),
            [_, action, ..] => Err(LabelError::UnknownAction {
                label: s.to_string(),
                action: action.to_string(),
            }),
        }
    }
}

/// Every record label for `source`, record by record, followed by the bare
/// interface names.
pub fn labels_for(source: &SourceFile) -> Vec<Label> {
    let mut labels = Vec::new();

    for record in source.records() {
        for field in &record.fields {
            labels.push(Label::Getter {
                type_name: record.name.clone(),
                field: field.name.clone(),
                field_type: field.ty.clone(),
            });
            labels.push(Label::Setter {
                type_name: record.name.clone(),
                field: field.name.clone(),
                field_type: field.ty.clone(),
            });
        }
        labels.push(Label::Constructor {
            type_name: record.name.clone(),
        });
        labels.push(Label::Builder {
            type_name: record.name.clone(),
        });
    }

    for contract in source.contracts() {
        labels.push(Label::Named(contract.name.clone()));
    }

    labels
}
