//! Builder for `Q` filter expressions.
//!
//! BoldDesk list endpoints accept a small filter language of `field:value`
//! terms joined with `AND`, for example `status:[1,2] AND createdon:today`.

use std::fmt;

/// Joins `field:value` terms with `" AND "`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterExpression {
    terms: Vec<String>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field:value`
    pub fn eq(self, field: &str, value: impl fmt::Display) -> Self {
        self.push(field, value.to_string())
    }

    /// `field:[a,b,c]`. An empty list adds nothing.
    pub fn any_of<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.is_empty() {
            return self;
        }
        self.push(field, format!("[{}]", values.join(",")))
    }

    /// `field:"text"`, with embedded quotes escaped.
    pub fn text(self, field: &str, value: &str) -> Self {
        self.push(field, format!("\"{}\"", value.replace('"', "\\\"")))
    }

    /// Appends a pre-formed term verbatim. Blank input is ignored.
    pub fn raw(mut self, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.terms.push(term.to_string());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The joined expression, or `None` when there are no terms.
    pub fn build(&self) -> Option<String> {
        if self.terms.is_empty() {
            None
        } else {
            Some(self.terms.join(" AND "))
        }
    }

    fn push(mut self, field: &str, value: String) -> Self {
        let field = field.trim().to_ascii_lowercase();
        if !field.is_empty() {
            self.terms.push(format!("{}:{}", field, value));
        }
        self
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_terms_with_and() {
        let expr = FilterExpression::new()
            .any_of("status", [1, 2])
            .eq("createdon", "today");
        assert_eq!(expr.build().as_deref(), Some("status:[1,2] AND createdon:today"));
    }

    #[test]
    fn empty_builds_none() {
        let expr = FilterExpression::new().any_of("status", Vec::<u32>::new()).raw("  ");
        assert!(expr.is_empty());
        assert_eq!(expr.build(), None);
    }

    #[test]
    fn field_names_are_normalized() {
        let expr = FilterExpression::new().eq(" BrandId ", 4).eq("", 5);
        assert_eq!(expr.terms(), ["brandid:4"]);
    }

    #[test]
    fn text_values_are_quoted() {
        let expr = FilterExpression::new().text("subject", r#"printer "jam""#);
        assert_eq!(expr.to_string(), r#"subject:"printer \"jam\"""#);
    }
}
