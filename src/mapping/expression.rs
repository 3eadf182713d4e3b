//! Dynamic column-name expressions
//!
//! Column-name overrides may contain `#{variable}` placeholders, for example
//! `events_#{env}`. The mapping context evaluates them through an
//! [`ExpressionEvaluator`] before building the identifier. Without an
//! evaluator the override is used literally.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use super::errors::MappingError;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"#\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}").unwrap();
}

/// Synchronous, side-effect free evaluation of name expressions
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<String, MappingError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str) -> Result<String, MappingError> + Send + Sync,
{
    fn evaluate(&self, expression: &str) -> Result<String, MappingError> {
        self(expression)
    }
}

/// Check whether text contains a `#{...}` template marker
pub fn is_template(text: &str) -> bool {
    text.contains("#{")
}

/// Evaluator substituting `#{name}` placeholders from a variable map
#[derive(Debug, Clone, Default)]
pub struct TemplateEvaluator {
    variables: BTreeMap<String, String>,
}

impl TemplateEvaluator {
    pub fn new(variables: BTreeMap<String, String>) -> Self {
        TemplateEvaluator { variables }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

impl ExpressionEvaluator for TemplateEvaluator {
    fn evaluate(&self, expression: &str) -> Result<String, MappingError> {
        if !is_template(expression) {
            return Ok(expression.to_string());
        }

        let mut result = String::with_capacity(expression.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(expression) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let literal = &expression[last..whole.start()];
            if is_template(literal) {
                return Err(malformed(expression));
            }
            result.push_str(literal);

            let value = self
                .variables
                .get(name.as_str())
                .ok_or_else(|| MappingError::Expression {
                    expression: expression.to_string(),
                    message: format!("unknown variable '{}'", name.as_str()),
                })?;
            result.push_str(value);
            last = whole.end();
        }

        let tail = &expression[last..];
        if is_template(tail) {
            return Err(malformed(expression));
        }
        result.push_str(tail);

        log::debug!("Evaluated name expression '{}' -> '{}'", expression, result);
        Ok(result)
    }
}

fn malformed(expression: &str) -> MappingError {
    MappingError::Expression {
        expression: expression.to_string(),
        message: "malformed or unterminated '#{' placeholder".to_string(),
    }
}
