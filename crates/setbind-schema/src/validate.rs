use crate::{MAX_IDENT_LEN, error::SchemaError};

// strict and reserved keywords that cannot name a field or parameter
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

// raw identifiers cannot spell these
const NON_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Ensure an identifier can be emitted verbatim into generated code.
///
/// Raw identifiers (`r#type`) are accepted for every keyword except the
/// path keywords that cannot be raw.
pub fn validate_ident(ident: &str) -> Result<(), SchemaError> {
    let fail = |reason: &str| {
        Err(SchemaError::InvalidIdent {
            ident: ident.to_string(),
            reason: reason.to_string(),
        })
    };

    let (body, raw) = match ident.strip_prefix("r#") {
        Some(body) => (body, true),
        None => (ident, false),
    };

    if body.is_empty() {
        return fail("ident is empty");
    }
    if body.len() > MAX_IDENT_LEN {
        return fail(&format!("exceeds max length {MAX_IDENT_LEN}"));
    }

    let mut chars = body.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
    if !starts_ok || !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return fail("must be an ASCII identifier");
    }
    if body == "_" {
        return fail("the wildcard '_' is not a name");
    }

    if raw {
        if NON_RAW.contains(&body) {
            return fail("cannot be a raw identifier");
        }
    } else if KEYWORDS.contains(&body) {
        return fail("it is a reserved keyword");
    }

    Ok(())
}
