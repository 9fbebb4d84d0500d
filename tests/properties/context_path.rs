//! Property tests for context path normalisation.

use proptest::prelude::*;

use redeploy::ContextPath;

fn raw_context_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9/._-]{1,32}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing never panics, and only blank input is rejected.
    #[test]
    fn property_only_blank_input_is_rejected(s in "(?s).{0,64}") {
        let parsed = ContextPath::new(&s);
        prop_assert_eq!(parsed.is_err(), s.trim().is_empty());
    }

    /// PROPERTY: the manager path is absolute and parses back to the same value.
    #[test]
    fn property_manager_path_round_trips(s in raw_context_path()) {
        let path = ContextPath::new(&s).unwrap();
        let manager = path.manager_path();

        prop_assert!(manager.starts_with('/'));
        prop_assert!(manager == "/" || !manager.ends_with('/'));
        prop_assert_eq!(ContextPath::new(&manager).unwrap(), path);
    }

    /// PROPERTY: the webapps file name is a single path segment.
    #[test]
    fn property_war_file_name_is_flat(s in raw_context_path()) {
        let name = ContextPath::new(&s).unwrap().war_file_name();

        prop_assert!(!name.contains('/'));
        prop_assert!(name.ends_with(".war"));
        prop_assert!(name.len() > ".war".len());
    }
}
