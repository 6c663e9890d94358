use crate::model::Record;
use crate::text::{capitalize, receiver_name};

/// A `TBuilder` companion: the builder struct, `NewTBuilder()`, one
/// chainable setter per field and a terminal `Build()`.
pub fn builder(record: &Record) -> String {
    let builder = format!("{}Builder", record.name);
    let taken: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    let recv = receiver_name(&builder, &taken);

    let mut output = format!("\ntype {} struct {{\n", builder);
    for field in &record.fields {
        output.push_str(&format!("\t{} {}\n", field.name, field.ty));
    }
    output.push_str("}\n");

    output.push_str(&format!(
        "\nfunc New{b}() *{b} {{\n\treturn &{b}{{}}\n}}\n",
        b = builder
    ));

    for field in &record.fields {
        output.push_str(&format!(
            "\nfunc ({recv} *{b}) {method}({field} {ty}) *{b} {{\n\t{recv}.{field} = {field}\n\treturn {recv}\n}}\n",
            recv = recv,
            b = builder,
            method = capitalize(&field.name),
            field = field.name,
            ty = field.ty,
        ));
    }

    output.push_str(&format!(
        "\nfunc ({} *{}) Build() *{} {{\n\treturn &{}{{\n",
        recv, builder, record.name, record.name
    ));
    for field in &record.fields {
        output.push_str(&format!("\t\t{}: {}.{},\n", field.name, recv, field.name));
    }
    output.push_str("\t}\n}");

    output
}
