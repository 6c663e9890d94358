use crate::model::{Contract, MethodSignature};
use crate::text::{name_parameters_avoiding, receiver_name, result_names};

/// One `TODO` method on `target` satisfying `method` of `interface`.
pub fn stub(interface: &str, method: &MethodSignature, target: &str) -> String {
    let results = result_names(&method.returns);
    let reserved: Vec<&str> = results.iter().map(String::as_str).collect();
    let params = name_parameters_avoiding(method.params(), &reserved);

    // parameters and named results share the receiver's scope
    let taken: Vec<&str> = params
        .iter()
        .map(|(name, _)| name.as_str())
        .chain(reserved.iter().copied())
        .collect();
    let recv = receiver_name(target, &taken);

    let params = params
        .iter()
        .map(|(name, ty)| format!("{} {}", name, ty))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = if method.returns.is_empty() {
        String::new()
    } else {
        format!(" {}", method.returns)
    };

    format!(
        "\n// {name} implements {iface}.\nfunc ({recv} *{target}) {name}({params}){returns} {{\n\t// TODO: implement\n\tpanic(\"not implemented\")\n}}",
        name = method.name(),
        iface = interface,
        recv = recv,
        target = target,
        params = params,
        returns = returns,
    )
}

/// Stubs for every method of `contract`, in declaration order.
pub fn stubs(contract: &Contract, target: &str) -> String {
    contract
        .methods
        .iter()
        .map(|m| stub(&contract.name, m, target))
        .collect::<Vec<_>>()
        .join("\n")
}
