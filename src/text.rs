//! Small text helpers shared by the parser and the generators.

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character, leaving the rest untouched.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A Go identifier is unexported when its first letter is not uppercase.
/// Empty tokens and tokens starting with something other than a letter
/// are never treated as private, so no accessor is generated for them.
pub fn is_private(token: &str) -> bool {
    match token.trim().chars().next() {
        Some(first) if first.is_alphabetic() => !first.is_uppercase(),
        _ => false,
    }
}

pub fn is_go_keyword(s: &str) -> bool {
    GO_KEYWORDS.contains(&s)
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_') && !is_go_keyword(s)
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Picks a receiver variable for `type_name`: its lowercase initial,
/// lengthened one character at a time until it clashes with nothing in
/// `taken`, then suffixed with underscores as a last resort.
pub fn receiver_name(type_name: &str, taken: &[&str]) -> String {
    let lower = decapitalize(type_name);
    let chars: Vec<char> = lower.chars().collect();
    if chars.is_empty() {
        return unique_ident("recv", taken);
    }

    for len in 1..=chars.len() {
        let candidate: String = chars[..len].iter().collect();
        if is_identifier(&candidate) && !taken.contains(&candidate.as_str()) {
            return candidate;
        }
    }
    unique_ident(&format!("{}_", lower), taken)
}

fn unique_ident(base: &str, taken: &[&str]) -> String {
    let mut candidate = base.to_string();
    while taken.contains(&candidate.as_str()) || !is_identifier(&candidate) {
        candidate.push('_');
    }
    candidate
}

/// Derives a parameter name from a type token: `int` -> `int`,
/// `*http.Request` -> `request`, `[]byte` -> `byte`, `...string` -> `string`.
pub fn ident_from_type(ty: &str) -> String {
    let trimmed = ty.trim_start_matches(|c: char| matches!(c, '*' | '[' | ']' | '.' | '&'));
    let base: String = trimmed
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    let base = base.rsplit('.').next().unwrap_or_default();
    let name = decapitalize(base);

    if is_identifier(&name) {
        name
    } else {
        "arg".to_string()
    }
}

/// Splits on `sep` wherever it is not nested inside `()`, `[]` or `{}`.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte index of the `)` closing the first `(` in `text`.
pub fn closing_paren(text: &str) -> Option<usize> {
    let open = text.find('(')?;
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Gives every parameter of an interface method a name.
///
/// Go lets consecutive parameters share one type (`a, b int`) and lets
/// interfaces omit names entirely (`int, string`). An entry with a name
/// and a type names itself and types the run of bare entries before it;
/// bare entries left over at the end are types in their own right and get
/// a name derived from that type.
pub fn name_parameters(params: &str) -> Vec<(String, String)> {
    name_parameters_avoiding(params, &[])
}

/// Like [`name_parameters`], but synthesized names also stay clear of
/// `reserved` (the method's named results, for instance).
pub fn name_parameters_avoiding(params: &str, reserved: &[&str]) -> Vec<(String, String)> {
    let mut entries: Vec<(Option<String>, String)> = Vec::new();
    let mut pending: Vec<usize> = Vec::new();

    for entry in split_top_level(params, ',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        match entry.split_once(char::is_whitespace) {
            Some((name, ty)) if is_identifier(name) => {
                let ty = collapse_whitespace(ty);
                for idx in pending.drain(..) {
                    let bare = std::mem::take(&mut entries[idx].1);
                    entries[idx] = (Some(bare), ty.clone());
                }
                entries.push((Some(name.to_string()), ty));
            }
            Some(_) => entries.push((None, collapse_whitespace(entry))),
            None => {
                pending.push(entries.len());
                entries.push((None, entry.to_string()));
            }
        }
    }

    let mut used: Vec<String> = entries
        .iter()
        .filter_map(|(n, _)| n.clone())
        .chain(reserved.iter().map(|r| r.to_string()))
        .collect();
    entries
        .into_iter()
        .map(|(name, ty)| match name {
            Some(name) => (name, ty),
            None => {
                let base = ident_from_type(&ty);
                let mut candidate = base.clone();
                let mut n = 1;
                while used.contains(&candidate) {
                    candidate = format!("{}{}", base, n);
                    n += 1;
                }
                used.push(candidate.clone());
                (candidate, ty)
            }
        })
        .collect()
}

/// Names declared by a result list such as `(n int, err error)`. Unnamed
/// results (`(int, error)`) and single result types declare none.
pub fn result_names(returns: &str) -> Vec<String> {
    let inner = match returns.trim().strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => inner,
        None => return Vec::new(),
    };

    let named = split_top_level(inner, ',').iter().any(|entry| {
        matches!(entry.trim().split_once(char::is_whitespace), Some((name, _)) if is_identifier(name))
    });
    if !named {
        return Vec::new();
    }

    name_parameters(inner).into_iter().map(|(name, _)| name).collect()
}
