use std::borrow::Cow;

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Contract, DeclKind, Field, MethodSignature, Record, SourceFile};
use crate::text::{closing_paren, collapse_whitespace, is_identifier, is_private, split_top_level};

/// Braces nested deeper than this are blanked before scanning; the grammar
/// recurses once per level.
const MAX_NESTING: usize = 256;

#[derive(Parser)]
#[grammar = "parser/go.pest"]
pub struct GoParser;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to scan Go source: {0}")]
    Grammar(Box<pest::error::Error<Rule>>),
}

/// Scans `source` for struct and interface declarations.
///
/// Malformed bodies never fail the scan: unterminated declarations are
/// skipped and lines that do not look like members are ignored.
pub fn parse(source: &str) -> Result<SourceFile, ParseError> {
    let source = limit_nesting(source, MAX_NESTING);
    let pairs = GoParser::parse(Rule::file, &source)
        .map_err(|e| ParseError::Grammar(Box::new(e)))?;

    let mut file = SourceFile::default();

    for pair in pairs.flat_map(|p| p.into_inner()) {
        if pair.as_rule() != Rule::declaration {
            continue;
        }

        let mut name = "";
        let mut kind = DeclKind::Record;
        let mut body = "";
        for token in pair.into_inner() {
            match token.as_rule() {
                Rule::name => name = token.as_str(),
                Rule::kind => {
                    kind = if token.as_str() == "interface" {
                        DeclKind::Contract
                    } else {
                        DeclKind::Record
                    }
                }
                Rule::body => body = token.as_str(),
                _ => {}
            }
        }

        match kind {
            DeclKind::Record => {
                let record = parse_record(name, body);
                debug!(record = name, fields = record.fields.len(), "found struct");
                file.insert_record(record);
            }
            DeclKind::Contract => {
                let contract = parse_contract(name, body);
                debug!(interface = name, methods = contract.methods.len(), "found interface");
                file.insert_contract(contract);
            }
        }
    }

    Ok(file)
}

/// Replaces every brace pair opened beyond `max` levels with spaces, so the
/// enclosing declaration still balances and byte offsets are unchanged.
fn limit_nesting(source: &str, max: usize) -> Cow<'_, str> {
    let mut depth = 0usize;
    let mut suppressed = 0usize;
    let mut limited: Option<String> = None;

    for (i, c) in source.char_indices() {
        let blank = match c {
            '{' if depth >= max => {
                suppressed += 1;
                true
            }
            '{' => {
                depth += 1;
                false
            }
            '}' if suppressed > 0 => {
                suppressed -= 1;
                true
            }
            '}' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => false,
        };

        if blank {
            limited.get_or_insert_with(|| source[..i].to_string()).push(' ');
        } else if let Some(out) = limited.as_mut() {
            out.push(c);
        }
    }

    match limited {
        Some(out) => {
            warn!(max, "blanked braces nested too deeply to scan");
            Cow::Owned(out)
        }
        None => Cow::Borrowed(source),
    }
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn extract_records(source: &str) -> Result<Vec<Record>, ParseError> {
    Ok(parse(source)?.records().to_vec())
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn extract_contracts(source: &str) -> Result<Vec<Contract>, ParseError> {
    Ok(parse(source)?.contracts().to_vec())
}

fn parse_record(name: &str, body: &str) -> Record {
    let mut record = Record {
        name: name.to_string(),
        fields: Vec::new(),
    };

    for line in logical_lines(body) {
        for (field, ty) in split_members(&line) {
            if !is_private(&field) {
                continue;
            }
            match record.fields.iter_mut().find(|f| f.name == field) {
                Some(existing) => existing.ty = ty,
                None => record.fields.push(Field { name: field, ty }),
            }
        }
    }

    record
}

fn parse_contract(name: &str, body: &str) -> Contract {
    let mut contract = Contract {
        name: name.to_string(),
        methods: Vec::new(),
    };

    for line in logical_lines(body) {
        if !line.contains('(') {
            debug!(interface = name, line = %line, "skipping embedded interface");
            continue;
        }
        match closing_paren(&line) {
            Some(close) => contract.methods.push(MethodSignature {
                signature: line[..=close].trim().to_string(),
                returns: line[close + 1..].trim().to_string(),
            }),
            None => warn!(interface = name, line = %line, "skipping unterminated method"),
        }
    }

    contract
}

/// Splits one member line into `(name, type)` pairs.
///
/// `x, y int` declares both names with the shared trailing type, `name T`
/// declares one, and anything else (an embedded type) declares nothing.
fn split_members(line: &str) -> Vec<(String, String)> {
    let parts = split_top_level(line, ',');

    if parts.len() > 1 {
        let (last, names) = match parts.split_last() {
            Some(split) => split,
            None => return Vec::new(),
        };
        let last = last.trim();
        let (last_name, ty) = match last.split_once(char::is_whitespace) {
            Some((name, ty)) => (name, collapse_whitespace(ty)),
            None => ("", last.to_string()),
        };
        if ty.is_empty() {
            return Vec::new();
        }

        return names
            .iter()
            .map(|n| n.trim())
            .chain(std::iter::once(last_name))
            .filter(|n| !n.is_empty())
            .map(|n| (n.to_string(), ty.clone()))
            .collect();
    }

    match line.split_once(char::is_whitespace) {
        Some((name, ty)) if is_identifier(name) && !ty.trim().is_empty() => {
            vec![(name.to_string(), collapse_whitespace(ty))]
        }
        _ => {
            debug!(line, "skipping embedded member");
            Vec::new()
        }
    }
}

/// Breaks a declaration body into member lines. Newlines and `;` end a
/// line only outside nested brackets, so an inline `struct { ... }` or a
/// multi-line function type stays on the line that declares it. Comments
/// and trailing struct tags are dropped.
fn logical_lines(body: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().map_or(false, |&n| n != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                current.push(' ');
            }
            '`' => {
                // struct tag; only meaningful as a trailing annotation
                for n in chars.by_ref() {
                    if n == '`' {
                        break;
                    }
                }
            }
            '"' => {
                current.push(c);
                while let Some(n) = chars.next() {
                    current.push(n);
                    match n {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                current.push(escaped);
                            }
                        }
                        '"' | '\n' => break,
                        _ => {}
                    }
                }
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '\n' | ';' if depth == 0 => push_line(&mut lines, &mut current),
            '\n' | '\r' | '\t' => current.push(' '),
            _ => current.push(c),
        }
    }
    push_line(&mut lines, &mut current);

    lines
}

fn push_line(lines: &mut Vec<String>, current: &mut String) {
    let line = collapse_whitespace(current);
    current.clear();
    if !line.is_empty() {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_lines_strip_comments_and_tags() {
        let body = "\n\tid   int `json:\"id\"` // primary key\n\t/* gone */ name string\n";
        assert_eq!(logical_lines(body), vec!["id int", "name string"]);
    }

    #[test]
    fn test_logical_lines_keep_nested_blocks_together() {
        let body = "\n\tmeta struct {\n\t\ta int\n\t}\n\tb bool; c byte\n";
        assert_eq!(
            logical_lines(body),
            vec!["meta struct { a int }", "b bool", "c byte"]
        );
    }

    #[test]
    fn test_split_members() {
        assert_eq!(
            split_members("x, y int"),
            vec![
                ("x".to_string(), "int".to_string()),
                ("y".to_string(), "int".to_string())
            ]
        );
        assert_eq!(
            split_members("x, , y int"),
            vec![
                ("x".to_string(), "int".to_string()),
                ("y".to_string(), "int".to_string())
            ]
        );
        assert_eq!(
            split_members("cb func(a, b int) error"),
            vec![("cb".to_string(), "func(a, b int) error".to_string())]
        );
        assert_eq!(
            split_members("ch chan int"),
            vec![("ch".to_string(), "chan int".to_string())]
        );
        assert_eq!(
            split_members("done func() error"),
            vec![("done".to_string(), "func() error".to_string())]
        );
        assert!(split_members("sync.Mutex").is_empty());
        assert!(split_members("*Base").is_empty());
    }

    #[test]
    fn test_parse_contract_signatures() {
        let contract = parse_contract(
            "Store",
            "\n\tio.Closer\n\tGet(string) ([]byte, error)\n\tPut(key string, value []byte) error\n\tReset()\n",
        );
        assert_eq!(contract.methods.len(), 3);
        assert_eq!(contract.methods[0].signature, "Get(string)");
        assert_eq!(contract.methods[0].returns, "([]byte, error)");
        assert_eq!(contract.methods[1].name(), "Put");
        assert_eq!(contract.methods[2].returns, "");
    }

    #[test]
    fn test_declaration_needs_word_boundary() -> anyhow::Result<()> {
        let file = parse("var subtype Foo struct {\n\ta int\n}\n")?;
        assert!(file.is_empty());
        Ok(())
    }

    #[test]
    fn test_limit_nesting() {
        assert_eq!(limit_nesting("a{{b}}c", 5), "a{{b}}c");
        assert_eq!(limit_nesting("a{{{b}}}c", 1), "a{  b  }c");
        assert!(matches!(limit_nesting("x { y }", 4), Cow::Borrowed(_)));
    }

    #[test]
    fn test_deep_nesting_keeps_other_declarations() -> anyhow::Result<()> {
        let depth = 5000;
        let source = format!(
            "type Deep struct {{\n\tx {}{}\n\ty int\n}}\n\ntype Ok struct {{\n\tb int\n}}\n",
            "{".repeat(depth),
            "}".repeat(depth)
        );
        let file = parse(&source)?;
        assert_eq!(file.record("Deep").and_then(|r| r.field("y")).map(|f| f.ty.as_str()), Some("int"));
        assert_eq!(file.record("Ok").map(|r| r.fields.len()), Some(1));
        Ok(())
    }

    #[test]
    fn test_unterminated_declaration_is_skipped() -> anyhow::Result<()> {
        let source = "type Broken struct {\n\ta int\n\ntype Ok struct {\n\tb int\n}\n";
        let file = parse(source)?;
        assert!(file.record("Broken").is_none());
        assert_eq!(file.record("Ok").map(|r| r.fields.len()), Some(1));
        Ok(())
    }
}
