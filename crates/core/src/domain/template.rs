// Message template rendering
//
// Templates use positional placeholders (`{0}`, `{1}`) with `{{` and `}}` as
// literal braces. A leading `ABC1234:` prefix is a diagnostic code.

use std::fmt::{Display, Write};

use crate::domain::error::{DomainError, Result};

/// Render `template` with positional `args`.
///
/// With no arguments the template is returned verbatim, braces included.
/// Extra arguments are ignored; a placeholder without a matching argument
/// is a [`DomainError::Format`] error.
pub fn format_template(key: &str, template: &str, args: &[&dyn Display]) -> Result<String> {
    if args.is_empty() {
        return Ok(template.to_string());
    }

    let format_error = |reason: String| DomainError::Format {
        key: key.to_string(),
        reason,
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut placeholder = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    placeholder.push(c);
                }
                if !closed {
                    return Err(format_error(format!("unclosed '{{' at byte {}", pos)));
                }

                let index: usize = placeholder.parse().map_err(|_| {
                    format_error(format!("invalid placeholder '{{{}}}'", placeholder))
                })?;
                let arg = args.get(index).ok_or_else(|| {
                    format_error(format!(
                        "placeholder {{{}}} has no argument ({} supplied)",
                        index,
                        args.len()
                    ))
                })?;

                // Writing into a String cannot fail
                let _ = write!(out, "{}", arg);
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(format_error(format!("unmatched '}}' at byte {}", pos)));
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

/// Split a leading diagnostic code (`letters` + `digits` + `:`) off a message.
///
/// Returns the code (if any) and the remaining message text. Without a code
/// the message is returned unchanged.
pub fn extract_message_code(message: &str) -> (Option<&str>, &str) {
    let trimmed = message.trim_start();
    let letters = trimmed
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let digits = trimmed[letters..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let code_len = letters + digits;

    if letters == 0 || digits == 0 || !trimmed[code_len..].starts_with(':') {
        return (None, message);
    }

    (
        Some(&trimmed[..code_len]),
        trimmed[code_len + 1..].trim_start(),
    )
}
