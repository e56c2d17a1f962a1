//! List-limit value object.

/// How many records a list request may return.
///
/// The raw query value is untrusted free text. Non-numeric or non-positive
/// input falls back to the default; anything above the ceiling clamps to it.
/// Construction never fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ListLimit(i64);

impl ListLimit {
    pub const DEFAULT: i64 = 10;
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 100;

    /// Build a limit from a raw query-string value.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
            Some(n) if n >= Self::MIN => Self(n.min(Self::MAX)),
            _ => Self(Self::DEFAULT),
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(ListLimit::from_param(Some("1")).as_i64(), 1);
        assert_eq!(ListLimit::from_param(Some("42")).as_i64(), 42);
        assert_eq!(ListLimit::from_param(Some("100")).as_i64(), 100);
    }

    #[test]
    fn missing_or_non_numeric_falls_back_to_default() {
        assert_eq!(ListLimit::from_param(None).as_i64(), 10);
        assert_eq!(ListLimit::from_param(Some("")).as_i64(), 10);
        assert_eq!(ListLimit::from_param(Some("abc")).as_i64(), 10);
        assert_eq!(ListLimit::from_param(Some("3.5")).as_i64(), 10);
    }

    #[test]
    fn non_positive_falls_back_to_default() {
        assert_eq!(ListLimit::from_param(Some("0")).as_i64(), 10);
        assert_eq!(ListLimit::from_param(Some("-7")).as_i64(), 10);
    }

    #[test]
    fn oversized_values_clamp_to_ceiling() {
        assert_eq!(ListLimit::from_param(Some("101")).as_i64(), 100);
        assert_eq!(ListLimit::from_param(Some("99999")).as_i64(), 100);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(ListLimit::from_param(Some(" 25 ")).as_i64(), 25);
    }

    proptest! {
        #[test]
        fn any_input_yields_a_limit_in_range(raw in any::<Option<String>>()) {
            let limit = ListLimit::from_param(raw.as_deref()).as_i64();
            prop_assert!((ListLimit::MIN..=ListLimit::MAX).contains(&limit));
        }

        #[test]
        fn numeric_inputs_never_error(n in any::<i64>()) {
            let limit = ListLimit::from_param(Some(&n.to_string())).as_i64();
            if n >= ListLimit::MIN {
                prop_assert_eq!(limit, n.min(ListLimit::MAX));
            } else {
                prop_assert_eq!(limit, ListLimit::DEFAULT);
            }
        }
    }
}
