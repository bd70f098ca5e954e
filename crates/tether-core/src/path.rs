//! Route normalization for endpoint matching.
//!
//! Steps, in order: strip one leading `/`, drop every `/:param` segment,
//! strip one trailing `/`, collapse `//` to `/`. The pipeline repeats until
//! the text stops changing so that normalizing twice is the same as once.
//! Case, query strings, and percent-encoding are left untouched.

use std::sync::OnceLock;

use regex::Regex;

fn dynamic_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/:\w+").expect("dynamic segment pattern is valid"))
}

/// Canonicalize a route for equality comparison. Total over all inputs.
pub fn normalize(path: &str) -> String {
    let mut current = path.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(path: &str) -> String {
    let stripped = path.strip_prefix('/').unwrap_or(path);
    let without_params = dynamic_segment().replace_all(stripped, "");
    let trimmed = without_params
        .strip_suffix('/')
        .unwrap_or(&without_params);
    trimmed.replace("//", "/")
}

/// Two routes match when their normalized forms are equal.
pub fn paths_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
