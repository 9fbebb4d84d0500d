//! Property tests for job environment expansion.

use proptest::prelude::*;

use redeploy::{JobContext, JobKind};

fn plain_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ./_*{}-]{0,32}").unwrap()
}

fn variable_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z_][A-Z0-9_]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: text without `$` is never changed.
    #[test]
    fn property_plain_text_is_untouched(text in plain_text()) {
        let job = JobContext::new("job", JobKind::Freestyle, "/ws").with_env("APP", "shop");
        prop_assert_eq!(job.expand(&text), text);
    }

    /// PROPERTY: a braced reference to a known variable is replaced by its value.
    #[test]
    fn property_braced_variable_is_substituted(
        prefix in plain_text(),
        suffix in plain_text(),
        key in variable_name(),
        value in "[a-z0-9.-]{0,12}",
    ) {
        let job = JobContext::new("job", JobKind::Pipeline, "/ws").with_env(key.as_str(), value.as_str());
        let input = format!("{}${{{}}}{}", prefix, key, suffix);

        prop_assert_eq!(job.expand(&input), format!("{}{}{}", prefix, value, suffix));
    }

    /// PROPERTY: unknown variables stay verbatim.
    #[test]
    fn property_unknown_variables_are_kept(
        prefix in plain_text(),
        key in variable_name(),
    ) {
        let job = JobContext::new("job", JobKind::Freestyle, "/ws");
        let input = format!("{}${{{}}}", prefix, key);

        prop_assert_eq!(job.expand(&input), input);
    }
}
