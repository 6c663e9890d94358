use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod generator;
mod model;
mod parser;
mod text;

#[cfg(test)]
mod tests;

use generator::{AccessorNaming, Request};
use model::{labels_for, Label, SourceFile};

fn main() -> Result<()> {
    let input = || {
        Arg::with_name("INPUT")
            .help("Go source file")
            .required(true)
            .index(1)
    };

    let matches = App::new("gogen")
        .version("0.1.0")
        .about("Generates Go boilerplate from struct and interface declarations")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Write the generated code to FILE instead of stdout")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log parsing details to stderr")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the labels that can be passed to `generate`")
                .arg(input()),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Prints the private struct fields and interface methods found")
                .arg(input()),
        )
        .subcommand(
            SubCommand::with_name("generate")
                .about("Generates accessors, constructors or builders for the given labels")
                .arg(input())
                .arg(
                    Arg::with_name("label")
                        .short("l")
                        .long("label")
                        .value_name("LABEL")
                        .help("A label as printed by `list`, e.g. \"User Get name ( string )\"")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("verbatim")
                        .long("verbatim")
                        .help("Name getters after the field itself instead of capitalizing it"),
                ),
        )
        .subcommand(
            SubCommand::with_name("implement")
                .about("Generates stub methods implementing an interface")
                .arg(input())
                .arg(
                    Arg::with_name("interface")
                        .short("i")
                        .long("interface")
                        .value_name("NAME")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("type")
                        .short("t")
                        .long("type")
                        .value_name("NAME")
                        .help("The implementing type")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("handler")
                .about("Generates a ServeHTTP method dispatching on the request method")
                .arg(
                    Arg::with_name("type")
                        .short("t")
                        .long("type")
                        .value_name("NAME")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("verbs")
                        .long("verbs")
                        .value_name("LIST")
                        .help("Comma separated HTTP methods, in the order the cases should appear")
                        .takes_value(true)
                        .default_value("GET"),
                ),
        )
        .get_matches();

    let (command, sub) = matches.subcommand();
    let sub = sub.ok_or_else(|| anyhow!("No subcommand given"))?;
    init_logging(sub.is_present("verbose"));

    let output = match command {
        "list" => {
            let source = load(sub)?;
            labels_for(&source)
                .iter()
                .map(Label::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        }
        "extract" => extract(sub)?,
        "generate" => {
            let source = load(sub)?;
            let naming = if sub.is_present("verbatim") {
                AccessorNaming::Verbatim
            } else {
                AccessorNaming::Exported
            };

            let mut fragments = Vec::new();
            for text in sub.values_of("label").into_iter().flatten() {
                let label: Label = text
                    .parse()
                    .with_context(|| format!("Invalid label: {}", text))?;
                let request = Request::from_label(&label, naming)?;
                fragments.push(
                    generator::generate(&source, &request)
                        .with_context(|| format!("Failed to generate code for `{}`", label))?,
                );
            }
            fragments.concat()
        }
        "implement" => {
            let source = load(sub)?;
            let request = Request::Stubs {
                interface: required(sub, "interface")?,
                target: required(sub, "type")?,
            };
            generator::generate(&source, &request)?
        }
        "handler" => {
            let verbs = generator::parse_verbs(sub.value_of("verbs").unwrap_or_default())?;
            let request = Request::Handler {
                target: required(sub, "type")?,
                verbs,
            };
            generator::generate(&SourceFile::default(), &request)?
        }
        other => return Err(anyhow!("Unknown subcommand: {}", other)),
    };

    match sub.value_of("output") {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            info!(path, "wrote generated code");
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .value_of(name)
        .map(String::from)
        .ok_or_else(|| anyhow!("Missing --{}", name))
}

fn read_input(matches: &ArgMatches) -> Result<String> {
    let path = required(matches, "INPUT")?;
    fs::read_to_string(&path).with_context(|| format!("Failed to read input file: {}", path))
}

fn load(matches: &ArgMatches) -> Result<SourceFile> {
    let source = read_input(matches)?;
    let file = parser::parse(&source).with_context(|| "Failed to parse Go source")?;
    if file.is_empty() {
        warn!("no struct or interface declarations found");
    }
    Ok(file)
}

fn extract(matches: &ArgMatches) -> Result<String> {
    Ok(describe(&load(matches)?))
}

/// One line per declaration, followed by its indented members.
fn describe(source: &SourceFile) -> String {
    let mut lines = Vec::new();

    for record in source.records() {
        lines.push(format!("struct {}", record.name));
        for field in &record.fields {
            lines.push(format!("\t{} {}", field.name, field.ty));
        }
    }
    for contract in source.contracts() {
        lines.push(format!("interface {}", contract.name));
        for method in &contract.methods {
            lines.push(format!("\t{} {}", method.signature, method.returns).trim_end().to_string());
        }
    }

    lines.join("\n")
}
