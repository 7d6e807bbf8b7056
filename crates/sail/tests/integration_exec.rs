#![cfg(unix)]
//! Exec-style verbs: exit code propagation and refusal when not running.

mod support;

use predicates::prelude::*;
use support::FakeDocker;

#[test]
fn test_exec_propagates_exit_code() {
    let docker = FakeDocker::new();
    docker.with_image().set_state("running");

    docker
        .sail()
        .args(["exec", "sh", "-c", "exit 7"])
        .assert()
        .code(7);

    let exec = docker.calls_to("exec").pop().unwrap();
    assert_eq!(exec, "exec -i sail-dev sh -c exit 7");
}

#[test]
fn test_exec_reports_interrupted_command() {
    let docker = FakeDocker::new();
    docker.set_state("running");

    docker
        .sail()
        .args(["exec", "sh", "-c", "kill -INT $$"])
        .assert()
        .code(130);
}

#[test]
fn test_exec_streams_output() {
    let docker = FakeDocker::new();
    docker.set_state("running");

    docker
        .sail()
        .args(["exec", "echo", "hello from container"])
        .assert()
        .success()
        .stdout(predicate::str::diff("hello from container\n"));
}

#[test]
fn test_exec_style_verbs_refuse_when_stopped() {
    for state in ["absent", "exited"] {
        let docker = FakeDocker::new();
        docker.with_image().set_state(state);

        for args in [
            vec!["exec", "ls"],
            vec!["shell"],
            vec!["logs"],
            vec!["python", "-V"],
            vec!["pip", "list"],
        ] {
            docker
                .sail()
                .args(&args)
                .assert()
                .failure()
                .code(1)
                .stderr(predicate::str::contains("sail start"));
        }

        assert!(docker.calls_to("exec").is_empty());
        assert!(docker.calls_to("logs").is_empty());
        assert!(docker.calls_to("start").is_empty());
        assert!(docker.calls_to("create").is_empty());
        assert_eq!(docker.state(), state);
    }
}

#[test]
fn test_sugar_verbs_build_exec_commands() {
    let docker = FakeDocker::new();
    docker.set_state("running");

    // The fake runtime runs the command on the host; only the call matters here
    let _ = docker.sail().args(["python", "-c", "print(1)"]).output().unwrap();
    let _ = docker.sail().args(["pip", "--version"]).output().unwrap();
    let _ = docker.sail().arg("shell").output().unwrap();

    assert_eq!(
        docker.calls_to("exec"),
        vec![
            "exec -i sail-dev python -c print(1)",
            "exec -i sail-dev pip --version",
            "exec -i sail-dev bash",
        ]
    );
}

#[test]
fn test_logs_pass_options_through() {
    let docker = FakeDocker::new();
    docker.set_state("running");

    docker
        .sail()
        .args(["logs", "--tail", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("container log line"));

    assert_eq!(
        docker.calls_to("logs"),
        vec!["logs --tail 5 sail-dev".to_string()]
    );
}
