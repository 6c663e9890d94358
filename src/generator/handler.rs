use std::fmt;
use std::str::FromStr;

use crate::text::receiver_name;

/// HTTP request methods a dispatch handler can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
}

impl HttpMethod {
    /// The `net/http` constant naming this method.
    pub fn constant(&self) -> &'static str {
        match self {
            HttpMethod::Get => "http.MethodGet",
            HttpMethod::Post => "http.MethodPost",
            HttpMethod::Put => "http.MethodPut",
            HttpMethod::Patch => "http.MethodPatch",
            HttpMethod::Delete => "http.MethodDelete",
            HttpMethod::Head => "http.MethodHead",
            HttpMethod::Options => "http.MethodOptions",
            HttpMethod::Connect => "http.MethodConnect",
            HttpMethod::Trace => "http.MethodTrace",
        }
    }

    pub fn success_status(&self) -> &'static str {
        match self {
            HttpMethod::Post => "http.StatusCreated",
            HttpMethod::Delete => "http.StatusNoContent",
            _ => "http.StatusOK",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "CONNECT" => Ok(HttpMethod::Connect),
            "TRACE" => Ok(HttpMethod::Trace),
            _ => Err(format!("Unsupported HTTP method: {}", s)),
        }
    }
}

/// A `ServeHTTP` method on `target` answering each of `verbs`, in the
/// order given; anything else is rejected with 405.
pub fn handler(target: &str, verbs: &[HttpMethod]) -> String {
    let recv = receiver_name(target, &["w", "r"]);

    let mut output = format!(
        "\nfunc ({} *{}) ServeHTTP(w http.ResponseWriter, r *http.Request) {{\n\tswitch r.Method {{\n",
        recv, target
    );

    let mut seen = Vec::new();
    for verb in verbs {
        if seen.contains(verb) {
            continue;
        }
        seen.push(*verb);
        output.push_str(&format!(
            "\tcase {}:\n\t\tw.WriteHeader({})\n",
            verb.constant(),
            verb.success_status()
        ));
    }

    output.push_str("\tdefault:\n\t\tw.WriteHeader(http.StatusMethodNotAllowed)\n\t}\n}");
    output
}
