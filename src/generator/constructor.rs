use crate::model::Record;
use crate::text::receiver_name;

/// `NewT(...)` taking one parameter per field, in field order.
pub fn constructor(record: &Record) -> String {
    let taken: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    let var = receiver_name(&record.name, &taken);

    let params = record
        .fields
        .iter()
        .map(|f| format!("{} {}", f.name, f.ty))
        .collect::<Vec<_>>()
        .join(", ");

    let mut output = format!(
        "\nfunc New{ty}({params}) *{ty} {{\n\t{var} := new({ty})\n",
        ty = record.name,
        params = params,
        var = var,
    );
    for field in &record.fields {
        output.push_str(&format!("\t{}.{} = {}\n", var, field.name, field.name));
    }
    output.push_str(&format!("\treturn {}\n}}", var));
    output
}
