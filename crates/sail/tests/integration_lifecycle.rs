#![cfg(unix)]
//! Lifecycle verbs against a fake docker runtime.

mod support;

use predicates::prelude::*;
use support::FakeDocker;

#[test]
fn test_start_from_absent_builds_and_starts() {
    let docker = FakeDocker::new();

    docker
        .sail()
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Started container sail-dev"));

    assert_eq!(docker.state(), "running");
    assert_eq!(docker.calls_to("build").len(), 1);
    assert_eq!(docker.calls_to("create").len(), 1);
    assert_eq!(docker.calls_to("start").len(), 1);
    assert!(docker.calls_to("rm").is_empty());
}

#[test]
fn test_start_is_idempotent() {
    let docker = FakeDocker::new();
    docker.with_image();

    docker.sail().arg("start").assert().success();
    docker.clear_calls();

    docker
        .sail()
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("already running"));

    assert_eq!(docker.state(), "running");
    assert!(docker.calls_to("create").is_empty());
    assert!(docker.calls_to("start").is_empty());
    assert!(docker.calls_to("rm").is_empty());
}

#[test]
fn test_start_replaces_stale_container() {
    let docker = FakeDocker::new();
    docker.with_image().set_state("exited");

    docker.sail().arg("start").assert().success();

    let calls = docker.calls();
    let rm = calls.iter().position(|c| c.starts_with("rm ")).unwrap();
    let create = calls.iter().position(|c| c.starts_with("create ")).unwrap();
    assert!(rm < create);
    assert!(docker.calls_to("build").is_empty());
    assert_eq!(docker.state(), "running");
}

#[test]
fn test_create_arguments() {
    let docker = FakeDocker::new();
    docker.with_image();
    std::fs::write(docker.project().join(".env"), "GITHUB_TOKEN=abc\n").unwrap();

    docker.sail().arg("start").assert().success();

    let create = docker.calls_to("create").pop().unwrap();
    assert!(create.contains("--name sail-dev"), "create: {}", create);
    assert!(create.contains("target=/workspace"), "create: {}", create);
    assert!(create.contains("--env-file"), "create: {}", create);
    assert!(create.contains("--workdir /workspace"), "create: {}", create);
    assert!(create.ends_with("sail-dev:latest sleep infinity"), "create: {}", create);
}

#[test]
fn test_start_without_env_file() {
    let docker = FakeDocker::new();
    docker.with_image();

    docker.sail().arg("start").assert().success();

    let create = docker.calls_to("create").pop().unwrap();
    assert!(!create.contains("--env-file"), "create: {}", create);
}

#[test]
fn test_stop_and_stop_again() {
    let docker = FakeDocker::new();
    docker.with_image().set_state("running");

    docker
        .sail()
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped container sail-dev"));
    assert_eq!(docker.state(), "exited");

    docker
        .sail()
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("not running"));
    assert_eq!(docker.calls_to("stop").len(), 1);
}

#[test]
fn test_restart_recreates_container() {
    let docker = FakeDocker::new();
    docker.with_image().set_state("running");

    docker.sail().arg("restart").assert().success();

    let verbs: Vec<String> = docker
        .calls()
        .iter()
        .filter_map(|c| c.split_whitespace().next().map(String::from))
        .filter(|v| ["stop", "rm", "create", "start"].contains(&v.as_str()))
        .collect();
    assert_eq!(verbs, vec!["stop", "rm", "create", "start"]);
    assert_eq!(docker.state(), "running");
}

#[test]
fn test_build_options_pass_through() {
    let docker = FakeDocker::new();

    docker
        .sail()
        .args(["build", "--no-cache", "--pull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built image sail-dev:latest"));

    let build = docker.calls_to("build").pop().unwrap();
    assert!(build.contains("--tag sail-dev:latest"), "build: {}", build);
    assert!(build.contains("--no-cache"), "build: {}", build);
    assert!(build.contains("--pull"), "build: {}", build);
}

#[test]
fn test_config_file_sets_container_name() {
    let docker = FakeDocker::new();
    std::fs::write(
        docker.project().join("sail.toml"),
        "image = \"agents-lab:latest\"\ncontainer_name = \"agents-lab\"\n",
    )
    .unwrap();

    docker.sail().arg("start").assert().success();

    let create = docker.calls_to("create").pop().unwrap();
    assert!(create.contains("--name agents-lab"), "create: {}", create);
    assert!(docker
        .calls_to("build")
        .pop()
        .unwrap()
        .contains("--tag agents-lab:latest"));
}

#[test]
fn test_env_overrides_container_name() {
    let docker = FakeDocker::new();
    docker.with_image().set_state("running");

    docker
        .sail()
        .env("SAIL_CONTAINER", "other-box")
        .arg("stop")
        .assert()
        .success();

    assert!(docker.calls_to("stop").pop().unwrap().ends_with("other-box"));
}
