pub mod ast;
pub mod label;

pub use ast::{Contract, DeclKind, Field, MethodSignature, Record, SourceFile};
pub use label::{labels_for, Label, LabelError};
