//! Message formatting strategies

use super::template;
use super::value::Value;

/// Turns the arguments of a log call into the message payload.
///
/// The logger adds the timestamp and name prefixes itself, so a formatter
/// only ever decides what the message body looks like.
///
/// # Examples
///
/// ```
/// use loki_logger::{Formatter, Value};
///
/// struct ErrFormatter;
///
/// impl Formatter for ErrFormatter {
///     fn format(&self, args: &[Value]) -> String {
///         match args.first() {
///             Some(err) => format!("Error {}", err),
///             None => String::new(),
///         }
///     }
/// }
///
/// assert_eq!(ErrFormatter.format(&["boom".into()]), "Error boom");
/// ```
pub trait Formatter: Send + Sync {
    fn format(&self, args: &[Value]) -> String;
}

/// printf-style formatting of `[template, operands...]`
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFormatter;

impl StandardFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for StandardFormatter {
    fn format(&self, args: &[Value]) -> String {
        match args.split_first() {
            None => String::new(),
            Some((Value::Str(template), rest)) => template::render(template, rest),
            Some(_) => {
                let raw: Vec<String> = args.iter().map(Value::to_string).collect();
                format!("Logger format error with args [{}]", raw.join(" "))
            }
        }
    }
}

impl<F> Formatter for F
where
    F: Fn(&[Value]) -> String + Send + Sync,
{
    fn format(&self, args: &[Value]) -> String {
        self(args)
    }
}
