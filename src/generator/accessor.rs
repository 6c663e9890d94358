use crate::model::Field;
use crate::text::{capitalize, receiver_name};

/// How getter methods are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessorNaming {
    /// `count` gets a `Count()` getter, exporting the private field.
    #[default]
    Exported,
    /// The getter keeps the field's own name. Go rejects a method named
    /// like a field of the same type, so this only suits fields whose names
    /// already differ from the getter wanted, e.g. when the struct is
    /// being renamed around the generated methods.
    Verbatim,
}

pub fn getter(type_name: &str, field: &Field, naming: AccessorNaming) -> String {
    let recv = receiver_name(type_name, &[]);
    let method = match naming {
        AccessorNaming::Exported => capitalize(&field.name),
        AccessorNaming::Verbatim => field.name.clone(),
    };

    format!(
        "\nfunc ({recv} *{ty}) {method}() {ret} {{\n\treturn {recv}.{field}\n}}",
        recv = recv,
        ty = type_name,
        method = method,
        ret = field.ty,
        field = field.name,
    )
}

pub fn setter(type_name: &str, field: &Field) -> String {
    let recv = receiver_name(type_name, &[field.name.as_str()]);

    format!(
        "\nfunc ({recv} *{ty}) Set{method}({field} {arg}) {{\n\t{recv}.{field} = {field}\n}}",
        recv = recv,
        ty = type_name,
        method = capitalize(&field.name),
        field = field.name,
        arg = field.ty,
    )
}
