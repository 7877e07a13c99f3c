//! Custom method handlers.
//!
//! A custom method is a user function from the call's arguments to either a
//! single value or an ordered sequence of values. Its output is normalized
//! into loggable parts and sent down the same prefix and sink path as the
//! built-ins, always on the plain channel.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use crate::value::LogValue;

/// Return value of a custom handler.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Logged as one part.
    Single(LogValue),
    /// Each element logged as a separate part, in order.
    Sequence(Vec<LogValue>),
}

impl HandlerOutput {
    /// Normalizes the output into the parts handed to the sink.
    #[must_use]
    pub fn into_parts(self) -> Vec<LogValue> {
        match self {
            Self::Single(value) => vec![value],
            Self::Sequence(values) => values,
        }
    }
}

macro_rules! single_output {
    ($($ty:ty),*) => {
        $(impl From<$ty> for HandlerOutput {
            fn from(value: $ty) -> Self {
                Self::Single(LogValue::from(value))
            }
        })*
    };
}

single_output!(&str, String, bool, i32, i64, u32, u64, usize, f64, serde_json::Value);

impl From<LogValue> for HandlerOutput {
    fn from(value: LogValue) -> Self {
        Self::Single(value)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for HandlerOutput {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

type HandlerFn = dyn Fn(&[LogValue]) -> HandlerOutput + Send + Sync;

/// A user-supplied custom method body.
#[derive(Clone)]
pub struct CustomHandler {
    inner: Arc<HandlerFn>,
}

impl CustomHandler {
    /// Wraps a function whose output converts into [`HandlerOutput`].
    pub fn new<F, R>(handler: F) -> Self
    where
        F: Fn(&[LogValue]) -> R + Send + Sync + 'static,
        R: Into<HandlerOutput>,
    {
        Self {
            inner: Arc::new(move |args: &[LogValue]| -> HandlerOutput { handler(args).into() }),
        }
    }

    /// Builds a handler from a format template.
    ///
    /// `{}` takes the next argument in order, `{N}` takes argument `N`.
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn template(template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(move |args| render_template(&template, args))
    }

    /// Runs the handler and normalizes its output.
    #[must_use]
    pub fn invoke(&self, args: &[LogValue]) -> Vec<LogValue> {
        (self.inner)(args).into_parts()
    }
}

impl fmt::Debug for CustomHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomHandler").finish_non_exhaustive()
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d*)\}").expect("placeholder pattern is valid"));

fn render_template(template: &str, args: &[LogValue]) -> String {
    let mut next = 0;
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let index = match caps[1].parse::<usize>() {
                Ok(index) => index,
                Err(_) => {
                    next += 1;
                    next - 1
                }
            };
            args.get(index)
                .map_or_else(|| caps[0].to_string(), ToString::to_string)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts;

    #[test]
    fn bare_value_is_one_part() {
        let handler =
            CustomHandler::new(|args: &[LogValue]| format!("User {} did {}", args[0], args[1]));
        assert_eq!(
            handler.invoke(&parts!["Alice", "Login"]),
            parts!["User Alice did Login"]
        );
    }

    #[test]
    fn sequence_keeps_order() {
        let handler = CustomHandler::new(|args: &[LogValue]| {
            args.iter().rev().cloned().collect::<Vec<_>>()
        });
        assert_eq!(handler.invoke(&parts![1, 2, 3]), parts![3, 2, 1]);
    }

    #[test]
    fn empty_sequence_yields_no_parts() {
        let handler = CustomHandler::new(|_: &[LogValue]| Vec::<String>::new());
        assert!(handler.invoke(&parts!["ignored"]).is_empty());
    }

    #[test]
    fn template_positional_and_sequential() {
        let handler = CustomHandler::template("User {0} did {1}");
        assert_eq!(handler.invoke(&parts!["Alice", "Login"]), parts!["User Alice did Login"]);

        let handler = CustomHandler::template("{} -> {}");
        assert_eq!(handler.invoke(&parts!["a", 2]), parts!["a -> 2"]);
    }

    #[test]
    fn template_keeps_unmatched_placeholders() {
        let handler = CustomHandler::template("{0} and {5}");
        assert_eq!(handler.invoke(&parts!["x"]), parts!["x and {5}"]);
    }

    #[test]
    fn debug_does_not_expose_closure() {
        let handler = CustomHandler::template("x");
        assert_eq!(format!("{handler:?}"), "CustomHandler { .. }");
    }
}
