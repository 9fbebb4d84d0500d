//! End-to-end tests for `redeploy deploy`

mod common;

use std::fs;

use common::*;

fn tomcat_home_call(env: &TestEnv) -> String {
    format!("tomcatHome(home: '{}')", snippet_path(env.tomcat_home.path()))
}

#[test]
fn empty_adapter_list_is_a_successful_no_op() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let result = env.deploy_step("deploy adapters: [], war: 'target/app.war'", &[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result
        .stdout
        .contains("No container adapters configured; nothing to deploy"));
    assert!(!result.stdout.contains("Deploying"));
}

#[test]
fn empty_adapter_list_skips_archive_resolution() {
    let env = TestEnv::new();

    let result = env.deploy_step("deploy adapters: [], war: 'target/missing.war'", &[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
}

#[test]
fn legacy_adapter_fails_with_maintainer_notice() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let result = env.deploy_step(
        "deploy adapters: [legacyAdapter()], war: 'target/app.war', onFailure: true",
        &[],
    );

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result
        .stdout
        .contains("Please contact the plugin maintainer"));
    assert!(result.stdout.contains("Deploy finished with FAILURE"));
}

#[test]
fn legacy_adapter_marks_freestyle_job_unstable_by_default() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let result = env.deploy_step(
        "deploy adapters: [legacyAdapter()], war: 'target/app.war'",
        &[],
    );

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert!(result.stdout.contains("Deploy finished with UNSTABLE"));
}

#[test]
fn two_adapters_deploy_in_list_order() {
    let env = TestEnv::new();
    let second = tempfile::tempdir().unwrap();
    fs::create_dir(second.path().join("webapps")).unwrap();
    env.write_workspace_file("target/app.war", WAR_V1);

    let snippet = format!(
        "deploy adapters: [{}, tomcatHome(home: '{}')], war: 'target/*.war'",
        tomcat_home_call(&env),
        snippet_path(second.path())
    );
    let result = env.deploy_step(&snippet, &[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert_eq!(fs::read(env.webapps().join("app.war")).unwrap(), WAR_V1);
    assert_eq!(
        fs::read(second.path().join("webapps/app.war")).unwrap(),
        WAR_V1
    );

    let first_home = path_str(env.tomcat_home.path());
    let second_home = path_str(second.path());
    let attempts: Vec<&str> = result
        .stdout
        .lines()
        .filter(|l| l.contains("Deploying"))
        .collect();
    assert_eq!(attempts.len(), 2, "{}", result.stdout);
    assert!(attempts[0].contains(&first_home));
    assert!(attempts[1].contains(&second_home));
    assert!(result
        .stdout
        .contains("Deploy finished with SUCCESS: 2 deployed, 0 failed, 0 skipped"));
}

#[test]
fn context_path_defaults_to_archive_base_name() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let snippet = format!(
        "deploy adapters: [{}], war: 'target/app.war'",
        tomcat_home_call(&env)
    );
    let result = env.deploy_step(&snippet, &[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result.stdout.contains("at context path /app"));
    assert!(env.webapps().join("app.war").is_file());
}

#[test]
fn explicit_context_path_is_expanded_from_job_environment() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V2);

    let snippet = format!(
        "deploy adapters: [{}], war: 'target/app.war', contextPath: 'shop-${{BUILD_NUMBER}}'",
        tomcat_home_call(&env)
    );
    let result = env.deploy_step(&snippet, &["--env", "BUILD_NUMBER=42"]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert_eq!(fs::read(env.webapps().join("shop-42.war")).unwrap(), WAR_V2);
}

#[test]
fn failing_adapter_does_not_stop_the_next_one() {
    let env = TestEnv::new();
    let broken = tempfile::tempdir().unwrap();
    env.write_workspace_file("target/app.war", WAR_V1);

    let snippet = format!(
        "deploy adapters: [tomcatHome(home: '{}'), {}], war: 'target/app.war'",
        snippet_path(broken.path()),
        tomcat_home_call(&env)
    );
    let result = env.deploy_step(&snippet, &["--on-failure", "false"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert!(result.stdout.contains("is not a directory"));
    assert!(env.webapps().join("app.war").is_file());
    assert!(result
        .stdout
        .contains("Deploy finished with UNSTABLE: 1 deployed, 1 failed, 0 skipped"));
}

#[test]
fn pipeline_jobs_fail_the_build_by_default() {
    let env = TestEnv::new();
    let broken = tempfile::tempdir().unwrap();
    env.write_workspace_file("target/app.war", WAR_V1);

    let snippet = format!(
        "deploy adapters: [tomcatHome(home: '{}')], war: 'target/app.war'",
        snippet_path(broken.path())
    );
    let result = env.deploy_step(&snippet, &["--pipeline"]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
}

#[test]
fn on_failure_environment_variable_overrides_the_step() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);
    let workspace = path_str(env.workspace.path());

    let result = env.run_with_env(
        &[
            "deploy",
            "--workspace",
            &workspace,
            "--step",
            "deploy adapters: [legacyAdapter()], war: 'target/app.war', onFailure: false",
        ],
        &[("REDEPLOY_ON_FAILURE", "true")],
    );

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
}

#[test]
fn unmatched_archive_pattern_is_a_configuration_error() {
    let env = TestEnv::new();
    let snippet = format!(
        "deploy adapters: [{}], war: 'target/*.war'",
        tomcat_home_call(&env)
    );

    let result = env.deploy_step(&snippet, &[]);

    assert_eq!(result.exit_code, 3, "{}", result.combined_output());
    assert!(result.stderr.contains("no artifacts matched 'target/*.war'"));
    assert!(!result.stdout.contains("Deploying"));
}

#[test]
fn every_matching_archive_is_deployed() {
    let env = TestEnv::new();
    env.write_workspace_file("target/api.war", WAR_V1);
    env.write_workspace_file("target/web.war", WAR_V2);

    let snippet = format!(
        "deploy adapters: [{}], war: 'target/*.war'",
        tomcat_home_call(&env)
    );
    let result = env.deploy_step(&snippet, &[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert_eq!(fs::read(env.webapps().join("api.war")).unwrap(), WAR_V1);
    assert_eq!(fs::read(env.webapps().join("web.war")).unwrap(), WAR_V2);
}

#[test]
fn job_definition_file_drives_the_deploy() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);
    let job = env.write_workspace_file(
        "job.toml",
        tomcat_home_job(env.tomcat_home.path()).as_bytes(),
    );
    let workspace = path_str(env.workspace.path());
    let job = path_str(&job);

    let result = env.run(&["deploy", "--workspace", &workspace, "--job", &job]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(env.webapps().join("app.war").is_file());
}

#[test]
fn unknown_job_keys_warn_but_deploy() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);
    let content = format!(
        "contextpath = \"shop\"\n{}",
        tomcat_home_job(env.tomcat_home.path())
    );
    let job = env.write_workspace_file("job.toml", content.as_bytes());
    let workspace = path_str(env.workspace.path());
    let job = path_str(&job);

    let result = env.run(&["deploy", "--workspace", &workspace, "--job", &job]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result.stderr.contains("unknown key 'contextpath'"));
    assert!(result.stderr.contains("did you mean 'context_path'?"));
}

#[test]
fn unknown_adapter_kind_is_a_configuration_error() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let result = env.deploy_step("deploy adapters: [jboss7()], war: 'target/app.war'", &[]);

    assert_eq!(result.exit_code, 3, "{}", result.combined_output());
    assert!(result.stderr.contains("jboss7"));
}

#[test]
fn pipeline_adapter_logs_what_it_would_deploy() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);

    let result = env.deploy_step(
        "deploy adapters: [workflowAdapter()], war: 'target/app.war'",
        &["--job-name", "nightly", "--pipeline"],
    );

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result
        .stdout
        .contains("[pipeline] Would deploy app.war to /app (job 'nightly')"));
}

#[test]
fn json_output_is_an_ndjson_event_stream() {
    let env = TestEnv::new();
    env.write_workspace_file("target/app.war", WAR_V1);
    let snippet = format!(
        "deploy adapters: [{}, legacyAdapter()], war: 'target/app.war'",
        tomcat_home_call(&env)
    );

    let result = env.deploy_step(&snippet, &["--json"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    let names = result.event_names();
    assert_eq!(names.first().map(String::as_str), Some("archives_resolved"));
    assert_eq!(names.last().map(String::as_str), Some("complete"));

    let events = result.events();
    let failure = events
        .iter()
        .find(|e| e["event"] == "attempt_failure")
        .expect("failure event");
    assert_eq!(failure["adapter"], "legacy");
    assert_eq!(failure["legacy"], true);

    let complete = events.last().unwrap();
    assert_eq!(complete["status"], "UNSTABLE");
    assert_eq!(complete["deployed"], 1);
    assert_eq!(complete["failed"], 1);
    assert!(complete["timestamp"].is_string());
}

#[test]
fn json_errors_are_reported_as_events() {
    let env = TestEnv::new();

    let result = env.deploy_step("deploy adapters: [workflowAdapter()], war: 'x.war'", &["--json"]);

    assert_eq!(result.exit_code, 3);
    let events = result.events();
    assert_eq!(events.len(), 1, "{}", result.stdout);
    assert_eq!(events[0]["event"], "error");
    assert!(events[0]["message"]
        .as_str()
        .unwrap()
        .contains("no artifacts matched"));
}
