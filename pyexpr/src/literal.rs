//! Decoding of raw string-literal tokens.
use crate::ast::{Constant, ExprKind};

struct RawLiteral<'src> {
    prefix: &'src str,
    body: &'src str,
}

impl<'src> RawLiteral<'src> {
    fn split(raw: &'src str) -> Self {
        let quote_at = raw.find(['\'', '"']).unwrap_or(raw.len());
        let (prefix, quoted) = raw.split_at(quote_at);
        let quote_len = if quoted.starts_with("'''") || quoted.starts_with("\"\"\"") {
            3
        } else {
            1
        };
        let body = quoted
            .get(quote_len..quoted.len().saturating_sub(quote_len))
            .unwrap_or("");
        Self { prefix, body }
    }

    fn has_prefix(&self, c: char) -> bool {
        self.prefix.chars().any(|p| p.eq_ignore_ascii_case(&c))
    }

    fn decoded(&self) -> String {
        if self.has_prefix('r') {
            self.body.to_string()
        } else {
            unescape(self.body)
        }
    }
}

/// Build the node kind for a run of adjacent string literals (`"a" "b"` is one literal).
pub(crate) fn concat(parts: &[&str]) -> ExprKind {
    let literals: Vec<RawLiteral<'_>> = parts.iter().map(|raw| RawLiteral::split(raw)).collect();

    if literals.iter().any(|lit| lit.has_prefix('f')) {
        return ExprKind::JoinedStr(parts.join(" "));
    }

    let value: String = literals.iter().map(RawLiteral::decoded).collect();
    if literals.iter().all(|lit| lit.has_prefix('b')) {
        ExprKind::Constant(Constant::Bytes(value))
    } else {
        ExprKind::Constant(Constant::Str(value))
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };

        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code_point(&mut out, &digits, 8, next);
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                push_code_point(&mut out, &digits, 16, next);
            }
            other => {
                // Unknown escapes are kept verbatim, as Python does.
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_code_point(out: &mut String, digits: &str, radix: u32, escape: char) {
    match u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
    {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(escape);
            out.push_str(digits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(parts: &[&str]) -> ExprKind {
        concat(parts)
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(
            value(&[r#""a\tb\n\x41é""#]),
            ExprKind::Constant(Constant::Str("a\tb\nAé".into()))
        );
    }

    #[test]
    fn raw_strings_keep_backslashes() {
        assert_eq!(
            value(&[r"r'\d+'"]),
            ExprKind::Constant(Constant::Str(r"\d+".into()))
        );
    }

    #[test]
    fn adjacent_literals_concatenate() {
        assert_eq!(
            value(&["'x '", "\"positive\""]),
            ExprKind::Constant(Constant::Str("x positive".into()))
        );
        assert_eq!(
            value(&["'''tri'''"]),
            ExprKind::Constant(Constant::Str("tri".into()))
        );
    }

    #[test]
    fn bytes_and_fstrings() {
        assert_eq!(
            value(&["b'raw'"]),
            ExprKind::Constant(Constant::Bytes("raw".into()))
        );
        assert_eq!(
            value(&["f'{x}'"]),
            ExprKind::JoinedStr("f'{x}'".into())
        );
    }
}
