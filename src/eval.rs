use crate::error::EvalError;

/// Outcome of evaluating an expression as a boolean in the paused frame.
///
/// `Failed` collapses to "not a hit" at the call site; a broken condition
/// never pauses execution and never surfaces as an engine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    Failed,
}

impl Truth {
    pub fn holds(self) -> bool {
        self == Truth::True
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

/// Expression evaluation inside the VM frame the hook stopped in.
pub trait FrameEval {
    /// Evaluate `expr` and report whether the result is boolean true.
    fn eval_bool(&mut self, expr: &str) -> Truth;

    /// Evaluate `expr` and stringify the result.
    fn eval_str(&mut self, expr: &str) -> Result<String, EvalError>;
}

/// Render a logpoint template.
///
/// `{expr}` tokens are evaluated and stringified, literal text is copied
/// verbatim. An unmatched `{` ends substitution and the remainder stays
/// literal. An evaluation failure substitutes the failure's description,
/// the rest of the template still renders.
pub fn render_log(template: &str, eval: &mut impl FrameEval) -> String {
    let mut out = String::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open + 1..].find('}') else {
            break;
        };

        out.push_str(&rest[..open]);

        let expr = &rest[open + 1..open + 1 + len];
        match eval.eval_str(expr) {
            Ok(value) => out.push_str(&value),
            Err(e) => out.push_str(&e.to_string()),
        }

        rest = &rest[open + 1 + len + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct StubEval {
        values: HashMap<&'static str, &'static str>,
    }

    impl StubEval {
        fn new<const N: usize>(values: [(&'static str, &'static str); N]) -> Self {
            Self {
                values: HashMap::from(values),
            }
        }
    }

    impl FrameEval for StubEval {
        fn eval_bool(&mut self, _expr: &str) -> Truth {
            Truth::Failed
        }

        fn eval_str(&mut self, expr: &str) -> Result<String, EvalError> {
            self.values
                .get(expr)
                .map(|value| value.to_string())
                .ok_or_else(|| EvalError::new(format!("attempt to index a nil value '{}'", expr)))
        }
    }

    #[test]
    fn test_render_literal() {
        let mut eval = StubEval::new([]);

        assert_eq!(render_log("", &mut eval), "");
        assert_eq!(render_log("plain text\n", &mut eval), "plain text\n");
    }

    #[test]
    fn test_render_substitutions() {
        let mut eval = StubEval::new([("x", "7"), ("y + 1", "3")]);

        assert_eq!(render_log("value is {x}\n", &mut eval), "value is 7\n");
        assert_eq!(render_log("{x} and {y + 1}\n", &mut eval), "7 and 3\n");
        assert_eq!(render_log("{x}{x}\n", &mut eval), "77\n");
    }

    #[test]
    fn test_render_unmatched_braces() {
        let mut eval = StubEval::new([("x", "7")]);

        assert_eq!(render_log("left { open\n", &mut eval), "left { open\n");
        assert_eq!(render_log("{x} then { broken\n", &mut eval), "7 then { broken\n");
        assert_eq!(render_log("close } first {x}\n", &mut eval), "close } first 7\n");
    }

    #[test]
    fn test_render_stray_open_inside_token() {
        // the token runs from the first open brace to the next close brace
        let mut eval = StubEval::new([("a{b", "ok")]);

        assert_eq!(render_log("{a{b}\n", &mut eval), "ok\n");
    }

    #[test]
    fn test_render_failed_expression() {
        let mut eval = StubEval::new([("y", "2")]);

        assert_eq!(
            render_log("x={x}, y={y}\n", &mut eval),
            "x=attempt to index a nil value 'x', y=2\n"
        );
    }
}
