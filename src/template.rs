//! Placeholder expansion for template bodies.
//!
//! Syntax:
//!
//! - `$NAME` or `${NAME}` is replaced by the mapped value
//! - `$$` produces a literal `$` (needed for CMake's own `${VAR}` syntax)
//!
//! Expansion is strict: an unknown placeholder or a `$` that starts neither
//! form is an error, so a typo in a template never leaks into generated files.

use std::collections::BTreeMap;
use thiserror::Error;

pub type Mapping = BTreeMap<&'static str, String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder '{name}' at line {line}")]
    UnknownPlaceholder { name: String, line: usize },

    #[error("invalid placeholder at line {line}")]
    InvalidPlaceholder { line: usize },
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn expand(body: &str, mapping: &Mapping) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        if c != '$' {
            out.push(c);
            continue;
        }

        let name = match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push('$');
                continue;
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) if is_ident_char(ch) => name.push(ch),
                        _ => return Err(TemplateError::InvalidPlaceholder { line }),
                    }
                }
                if !name.starts_with(is_ident_start) {
                    return Err(TemplateError::InvalidPlaceholder { line });
                }
                name
            }
            Some(ch) if is_ident_start(ch) => {
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if !is_ident_char(ch) {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                name
            }
            _ => return Err(TemplateError::InvalidPlaceholder { line }),
        };

        match mapping.get(name.as_str()) {
            Some(value) => out.push_str(value),
            None => return Err(TemplateError::UnknownPlaceholder { name, line }),
        }
    }

    Ok(out)
}
