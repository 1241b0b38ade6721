//! printf-style template engine.
//!
//! Supports the directive grammar `%[flags][width][.precision]verb` with
//! flags `-` (left justify), `+` (always sign numbers) and `0` (zero pad
//! numbers), and the verbs:
//!
//! | verb  | accepts                 | output                          |
//! |-------|-------------------------|---------------------------------|
//! | `%s`  | string, number, bool    | plain text                      |
//! | `%v`  | anything                | plain text, JSON for containers |
//! | `%d`  | integer                 | decimal                         |
//! | `%f`  | number                  | fixed point, 6 places default   |
//! | `%t`  | bool                    | `true` / `false`                |
//! | `%q`  | string                  | double-quoted, JSON-escaped     |
//! | `%x`  | integer, string         | lower-case hex                  |
//! | `%X`  | integer, string         | upper-case hex                  |
//!
//! `%%` is a literal percent sign. Operands are consumed left to right and
//! every operand must be consumed exactly once.

use serde_json::Value;
use std::iter::Peekable;
use std::str::Chars;

use crate::kind::ValueKind;

const KNOWN_VERBS: &[char] = &['s', 'v', 'd', 'f', 't', 'q', 'x', 'X', '%'];

/// Errors raised while applying a format template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("format {format:?}: directive at end of template is incomplete")]
    Incomplete { format: String },

    #[error("format {format:?}: unknown verb %{verb}")]
    UnknownVerb { format: String, verb: char },

    #[error("format {format:?}: missing operand for directive {position}")]
    MissingOperand { format: String, position: usize },

    #[error("format {format:?}: {extra} operand(s) left unused")]
    ExtraOperands { format: String, extra: usize },

    #[error("format {format:?}: verb %{verb} does not accept {kind}")]
    BadVerb {
        format: String,
        verb: char,
        kind: ValueKind,
    },
}

#[derive(Debug, Default)]
struct Directive {
    left: bool,
    plus: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

/// Apply `format` to `args`, substituting operands positionally.
pub fn sprintf(format: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let directive = parse_directive(&mut chars).ok_or_else(|| FormatError::Incomplete {
            format: format.to_string(),
        })?;

        if !KNOWN_VERBS.contains(&directive.verb) {
            return Err(FormatError::UnknownVerb {
                format: format.to_string(),
                verb: directive.verb,
            });
        }
        if directive.verb == '%' {
            out.push('%');
            continue;
        }

        let arg = args.get(next_arg).ok_or_else(|| FormatError::MissingOperand {
            format: format.to_string(),
            position: next_arg,
        })?;
        next_arg += 1;

        let body = render(&directive, arg).ok_or_else(|| FormatError::BadVerb {
            format: format.to_string(),
            verb: directive.verb,
            kind: ValueKind::of(arg),
        })?;
        out.push_str(&pad(&directive, body));
    }

    if next_arg < args.len() {
        return Err(FormatError::ExtraOperands {
            format: format.to_string(),
            extra: args.len() - next_arg,
        });
    }

    Ok(out)
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Option<Directive> {
    let mut directive = Directive::default();

    while let Some(&c) = chars.peek() {
        match c {
            '-' => directive.left = true,
            '+' => directive.plus = true,
            '0' => directive.zero = true,
            _ => break,
        }
        chars.next();
    }

    directive.width = parse_number(chars);

    if chars.peek() == Some(&'.') {
        chars.next();
        directive.precision = Some(parse_number(chars).unwrap_or(0));
    }

    directive.verb = chars.next()?;
    Some(directive)
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
    }
    value
}

/// Render one operand, or `None` if the verb does not accept its kind.
fn render(directive: &Directive, arg: &Value) -> Option<String> {
    match directive.verb {
        's' => {
            let text = match arg {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(match directive.precision {
                Some(p) => text.chars().take(p).collect(),
                None => text,
            })
        }
        'v' => Some(match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        'd' => match arg {
            Value::Number(n) => {
                let text = if let Some(i) = n.as_i64() {
                    i.to_string()
                } else {
                    n.as_u64()?.to_string()
                };
                Some(signed(directive, text))
            }
            _ => None,
        },
        'f' => match arg {
            Value::Number(n) => {
                let precision = directive.precision.unwrap_or(6);
                let text = format!("{:.*}", precision, n.as_f64()?);
                Some(signed(directive, text))
            }
            _ => None,
        },
        't' => match arg {
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        },
        'q' => match arg {
            Value::String(_) => Some(arg.to_string()),
            _ => None,
        },
        'x' | 'X' => {
            let text = match arg {
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        let digits = format!("{:x}", i.unsigned_abs());
                        if i < 0 {
                            format!("-{}", digits)
                        } else {
                            digits
                        }
                    } else {
                        format!("{:x}", n.as_u64()?)
                    }
                }
                Value::String(s) => s.bytes().map(|b| format!("{:02x}", b)).collect(),
                _ => return None,
            };
            Some(if directive.verb == 'X' {
                text.to_uppercase()
            } else {
                text
            })
        }
        _ => None,
    }
}

fn signed(directive: &Directive, text: String) -> String {
    if directive.plus && !text.starts_with('-') {
        format!("+{}", text)
    } else {
        text
    }
}

fn pad(directive: &Directive, body: String) -> String {
    let len = body.chars().count();
    let width = match directive.width {
        Some(w) if w > len => w,
        _ => return body,
    };
    let fill = width - len;

    if directive.left {
        return format!("{}{}", body, " ".repeat(fill));
    }

    let numeric = matches!(directive.verb, 'd' | 'f' | 'x' | 'X');
    if directive.zero && numeric {
        // Zeros go between the sign and the digits
        let (sign, digits) = match body.chars().next() {
            Some(c @ ('-' | '+')) => (c.to_string(), &body[1..]),
            _ => (String::new(), body.as_str()),
        };
        return format!("{}{}{}", sign, "0".repeat(fill), digits);
    }

    format!("{}{}", " ".repeat(fill), body)
}
