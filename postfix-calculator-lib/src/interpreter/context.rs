use std::collections::HashMap;

/// Variable bindings an expression is evaluated against.
///
/// Unbound variables read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    variables: HashMap<String, f64>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    /// Returns the value bound to `name`, or `0` if it has never been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use postfix_calculator::interpreter::context::Context;
    ///
    /// let mut context = Context::new();
    /// context.set("x", 5.0);
    ///
    /// assert_eq!(context.get("x"), 5.0);
    /// assert_eq!(context.get("y"), 0.0);
    /// ```
    pub fn get(&self, name: &str) -> f64 {
        self.variables.get(name).copied().unwrap_or(0.0)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Context {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(bindings: I) -> Self {
        let mut context = Context::new();
        for (name, value) in bindings {
            context.set(name, value);
        }
        context
    }
}
