//! printf-style template rendering
//!
//! Supports the verbs `%s %v %q %d %i %f %F %e %E %g %x %X %o %b %t %c` and
//! the literal `%%`, with the flags `- + # 0 space`, a width and a precision.
//! Rendering never fails: mismatches are written inline as diagnostics.
//!
//! | problem                       | rendered as            |
//! |-------------------------------|------------------------|
//! | verb does not fit the operand | `%!d(str=hi)`          |
//! | operand missing               | `%!s(MISSING)`         |
//! | operands left over            | `%!(EXTRA int=3)`      |
//! | `%` at the end of the text    | `%!(NOVERB)`           |

use super::value::Value;
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

/// Widths and precisions are clamped to this
const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Render `template` with `args` substituted positionally.
pub fn render(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let directive = parse_directive(&mut chars);
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                match format_arg(verb, &directive, arg) {
                    Some(text) => out.push_str(&text),
                    None => bad_verb(&mut out, verb, arg),
                }
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        let extra: Vec<String> = args[next_arg..]
            .iter()
            .map(|a| format!("{}={}", a.type_name(), a))
            .collect();
        out.push_str(&extra.join(", "));
        out.push(')');
    }

    out
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Directive {
    let mut directive = Directive::default();

    while let Some(&c) = chars.peek() {
        match c {
            '-' => directive.minus = true,
            '+' => directive.plus = true,
            '#' => directive.sharp = true,
            '0' => directive.zero = true,
            ' ' => directive.space = true,
            _ => break,
        }
        chars.next();
    }

    directive.width = parse_number(chars);
    if chars.peek() == Some(&'.') {
        chars.next();
        directive.precision = Some(parse_number(chars).unwrap_or(0));
    }

    directive
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut n: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = Some(
            n.unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(d as usize)
                .min(MAX_WIDTH),
        );
        chars.next();
    }
    n
}

fn bad_verb(out: &mut String, verb: char, arg: &Value) {
    let _ = write!(out, "%!{}({}={})", verb, arg.type_name(), arg);
}

/// Returns `None` when the verb does not apply to the operand.
fn format_arg(verb: char, directive: &Directive, arg: &Value) -> Option<String> {
    let text = match verb {
        's' | 'v' => {
            let s = match arg {
                Value::Float(f) => float_general(*f, directive),
                _ => arg.to_string(),
            };
            match (verb, directive.precision, arg) {
                ('s', Some(p), Value::Str(_) | Value::Error(_) | Value::Debug(_)) => {
                    s.chars().take(p).collect()
                }
                _ => s,
            }
        }
        'q' => match arg {
            Value::Str(s) | Value::Error(s) | Value::Debug(s) => format!("{:?}", s),
            Value::Char(c) => format!("{:?}", c),
            _ => return None,
        },
        'd' | 'i' => match arg {
            Value::Int(i) => with_sign(i.unsigned_abs().to_string(), *i < 0, directive),
            Value::UInt(u) => with_sign(u.to_string(), false, directive),
            _ => return None,
        },
        'f' | 'F' => match arg {
            Value::Float(f) => float_fixed(*f, directive),
            _ => return None,
        },
        'e' | 'E' => match arg {
            Value::Float(f) => {
                let s = float_exp(*f, directive);
                if verb == 'E' {
                    s.to_uppercase()
                } else {
                    s
                }
            }
            _ => return None,
        },
        'g' => match arg {
            Value::Float(f) => float_general(*f, directive),
            _ => return None,
        },
        'x' | 'X' | 'o' | 'b' => {
            let s = radix(verb, directive, arg)?;
            if verb == 'X' {
                s.to_uppercase()
            } else {
                s
            }
        }
        't' => match arg {
            Value::Bool(b) => b.to_string(),
            _ => return None,
        },
        'c' => match arg {
            Value::Char(c) => c.to_string(),
            Value::Int(i) => char::from_u32(u32::try_from(*i).ok()?)?.to_string(),
            Value::UInt(u) => char::from_u32(u32::try_from(*u).ok()?)?.to_string(),
            _ => return None,
        },
        _ => return None,
    };

    let numeric = matches!(verb, 'd' | 'i' | 'f' | 'F' | 'e' | 'E' | 'g' | 'x' | 'X' | 'o' | 'b')
        && !matches!(arg, Value::Str(_));
    Some(pad(text, directive, numeric))
}

fn with_sign(digits: String, negative: bool, directive: &Directive) -> String {
    if negative {
        format!("-{}", digits)
    } else if directive.plus {
        format!("+{}", digits)
    } else if directive.space {
        format!(" {}", digits)
    } else {
        digits
    }
}

fn non_finite(f: f64) -> Option<&'static str> {
    if f.is_nan() {
        Some("NaN")
    } else if f.is_infinite() {
        Some(if f > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        None
    }
}

fn float_fixed(f: f64, directive: &Directive) -> String {
    let precision = directive.precision.unwrap_or(6);
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }
    with_sign(
        format!("{:.*}", precision, f.abs()),
        f.is_sign_negative(),
        directive,
    )
}

/// C-style exponent: at least two exponent digits with an explicit sign.
fn float_exp(f: f64, directive: &Directive) -> String {
    let precision = directive.precision.unwrap_or(6);
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }
    let raw = format!("{:.*e}", precision, f.abs());
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (exp_sign, exp_digits) = match exponent.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exponent),
    };
    with_sign(
        format!("{}e{}{:0>2}", mantissa, exp_sign, exp_digits),
        f.is_sign_negative(),
        directive,
    )
}

/// `%g`: exponent form when the decimal exponent is below -4 or at least
/// the precision (6 for the shortest representation), plain decimal
/// otherwise. Trailing zeros are dropped either way.
fn float_general(f: f64, directive: &Directive) -> String {
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }

    let (digits, exp) = decimal_digits(f.abs(), directive.precision);
    let nd = digits.len() as i32;
    let dp = exp + 1;
    let eprec = match directive.precision {
        None => 6,
        Some(p) => {
            let p = p.max(1) as i32;
            if p > nd && nd >= dp {
                nd
            } else {
                p
            }
        }
    };

    let body = if exp < -4 || exp >= eprec {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{:02}", lead, exp_sign, exp.unsigned_abs())
        } else {
            format!("{}.{}e{}{:02}", lead, rest, exp_sign, exp.unsigned_abs())
        }
    } else if dp <= 0 {
        format!("0.{}{}", "0".repeat(dp.unsigned_abs() as usize), digits)
    } else if dp >= nd {
        format!("{}{}", digits, "0".repeat((dp - nd) as usize))
    } else {
        let (int, frac) = digits.split_at(dp as usize);
        format!("{}.{}", int, frac)
    };

    with_sign(body, f.is_sign_negative(), directive)
}

/// Significant digits without trailing zeros, and the decimal exponent, of
/// a finite non-negative `f`. With no precision the digits are the shortest
/// that round-trip.
fn decimal_digits(f: f64, precision: Option<usize>) -> (String, i32) {
    let raw = match precision {
        None => format!("{:e}", f),
        Some(p) => format!("{:.*e}", p.max(1) - 1, f),
    };
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp = exponent.parse().unwrap_or(0);

    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }
    (digits, exp)
}

/// Shortest `%v` rendering of a float
pub(crate) fn shortest_float(f: f64) -> String {
    float_general(f, &Directive::default())
}

fn radix(verb: char, directive: &Directive, arg: &Value) -> Option<String> {
    let (magnitude, negative) = match arg {
        Value::Int(i) => (i.unsigned_abs(), *i < 0),
        Value::UInt(u) => (*u, false),
        Value::Str(s) if matches!(verb, 'x' | 'X') => {
            return Some(s.bytes().map(|b| format!("{:02x}", b)).collect());
        }
        _ => return None,
    };

    let (digits, prefix) = match verb {
        'x' | 'X' => (format!("{:x}", magnitude), "0x"),
        'o' => (format!("{:o}", magnitude), "0"),
        _ => (format!("{:b}", magnitude), "0b"),
    };
    let digits = if directive.sharp {
        format!("{}{}", prefix, digits)
    } else {
        digits
    };
    Some(with_sign(digits, negative, directive))
}

fn pad(text: String, directive: &Directive, numeric: bool) -> String {
    let Some(width) = directive.width else {
        return text;
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = width - len;

    if directive.minus {
        format!("{}{}", text, " ".repeat(fill))
    } else if directive.zero && numeric {
        // zeros go between the sign and the digits
        let sign_len = text
            .chars()
            .next()
            .filter(|c| matches!(c, '-' | '+' | ' '))
            .map_or(0, |_| 1);
        let (sign, digits) = text.split_at(sign_len);
        format!("{}{}{}", sign, "0".repeat(fill), digits)
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}
