//! Property tests for the two persisted forms of a deploy step.
//!
//! Whatever is rendered as a step snippet or a TOML job definition must parse
//! back to the same step, minus values equal to the job's defaults.

use std::path::Path;

use proptest::prelude::*;

use redeploy::config::parse_with_warnings;
use redeploy::{
    parse_step, render_step, AdapterDefinition, AdapterRegistry, DeployStep, HostDefaults,
    JobContext, JobDefinition, JobKind,
};

fn adapter_definition() -> impl Strategy<Value = AdapterDefinition> {
    let home = || proptest::string::string_regex("/[A-Za-z0-9/._-]{0,24}").unwrap();
    prop_oneof![
        Just(AdapterDefinition::new("pipeline")),
        Just(AdapterDefinition::new("legacy")),
        home()
            .prop_map(|home| AdapterDefinition::new("tomcat-home").with("home", home)),
        (home(), 1u16..=u16::MAX, proptest::option::of("[a-z][a-z0-9-]{0,8}")).prop_map(
            |(home, port, credentials)| {
                let definition = AdapterDefinition::new("glassfish3x")
                    .with("home", home)
                    .with("admin_port", port.to_string());
                match credentials {
                    Some(id) => definition.with("credentials_id", id),
                    None => definition,
                }
            }
        ),
    ]
}

fn job_definition() -> impl Strategy<Value = JobDefinition> {
    (
        "\\PC{1,32}".prop_filter("war must not be blank", |s: &String| !s.trim().is_empty()),
        proptest::option::of("\\PC{1,16}"),
        proptest::option::of(any::<bool>()),
        proptest::collection::vec(adapter_definition(), 0..4),
    )
        .prop_map(|(war, context_path, on_failure, adapters)| JobDefinition {
            war,
            context_path,
            on_failure,
            adapters,
        })
}

fn job_kind() -> impl Strategy<Value = JobKind> {
    prop_oneof![Just(JobKind::Freestyle), Just(JobKind::Pipeline)]
}

fn build(definition: &JobDefinition, registry: &AdapterRegistry) -> DeployStep {
    definition.into_step(registry).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing never panics on arbitrary snippets.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,200}") {
        let _ = parse_step(&s, &AdapterRegistry::builtin());
    }

    /// PROPERTY: render then parse yields the minimized step.
    #[test]
    fn property_snippet_round_trips(definition in job_definition(), kind in job_kind()) {
        let registry = AdapterRegistry::builtin();
        let job = JobContext::new("job", kind, "/ws");
        let step = build(&definition, &registry);

        let snippet = render_step(&step, &registry, &HostDefaults, &job).unwrap();
        let parsed = parse_step(&snippet, &registry).unwrap();

        prop_assert_eq!(&parsed, &step.minimized(&HostDefaults, &job));
        prop_assert_eq!(render_step(&parsed, &registry, &HostDefaults, &job).unwrap(), snippet);
    }

    /// PROPERTY: TOML serialisation then parsing yields the minimized step.
    #[test]
    fn property_toml_round_trips(definition in job_definition(), kind in job_kind()) {
        let registry = AdapterRegistry::builtin();
        let job = JobContext::new("job", kind, "/ws");
        let step = build(&definition, &registry);

        let persisted = JobDefinition::from_step(&step, &registry, &HostDefaults, &job).unwrap();
        let toml = persisted.to_toml_string().unwrap();
        let (reparsed, warnings) = parse_with_warnings(Path::new("job.toml"), &toml).unwrap();

        prop_assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        prop_assert_eq!(build(&reparsed, &registry), step.minimized(&HostDefaults, &job));
    }
}
