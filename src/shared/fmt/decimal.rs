//! Amount display: splitting off the trailing zeros renderers de-emphasize.

/// An amount split for display: the significant part and the trailing
/// zeros a renderer dims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountParts {
    pub body: String,
    pub dim: String,
}

impl AmountParts {
    pub fn plain(amount: impl Into<String>) -> Self {
        Self {
            body: amount.into(),
            dim: String::new(),
        }
    }
}

/// Split `123.4500000` into `123.45` + `00000`. Amounts without a
/// fractional part pass through untouched.
pub fn lighten_zeros(amount: &str) -> AmountParts {
    if !amount.contains('.') {
        return AmountParts::plain(amount);
    }
    let trimmed = amount.trim_end_matches('0');
    // All-zero fractions keep one digit lit: "5.000" -> "5.0" + "00"
    let body_end = if trimmed.ends_with('.') {
        trimmed.len() + 1
    } else {
        trimmed.len()
    };
    let body_end = body_end.min(amount.len());
    AmountParts {
        body: amount[..body_end].to_string(),
        dim: amount[body_end..].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeros_dimmed() {
        let parts = lighten_zeros("123.4500000");
        assert_eq!(parts.body, "123.45");
        assert_eq!(parts.dim, "00000");
    }

    #[test]
    fn test_integer_untouched() {
        let parts = lighten_zeros("120");
        assert_eq!(parts.body, "120");
        assert_eq!(parts.dim, "");
    }

    #[test]
    fn test_all_zero_fraction_keeps_one_digit() {
        let parts = lighten_zeros("5.0000000");
        assert_eq!(parts.body, "5.0");
        assert_eq!(parts.dim, "000000");
    }

    #[test]
    fn test_no_trailing_zeros() {
        let parts = lighten_zeros("0.1234567");
        assert_eq!(parts.body, "0.1234567");
        assert_eq!(parts.dim, "");
    }
}
