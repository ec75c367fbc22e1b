#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;

    #[test]
    fn test_cli_help_output() {
        let mut cmd = Command::cargo_bin("infractl").unwrap();

        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Commands:"));
        for command in ["task", "tenant", "project", "vm", "disk", "cluster"] {
            assert!(help_output.contains(command), "missing command {}", command);
        }

        assert!(help_output.contains("--endpoint"));
        assert!(help_output.contains("--non-interactive"));
        assert!(help_output.contains("-V, --version"));
    }

    #[test]
    fn test_cluster_help_lists_wait_options() {
        Command::cargo_bin("infractl")
            .unwrap()
            .args(["cluster", "create", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--wait-for-ready"))
            .stdout(predicate::str::contains("--workers"));
    }

    #[test]
    fn test_no_arguments_prints_help() {
        Command::cargo_bin("infractl")
            .unwrap()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        Command::cargo_bin("infractl")
            .unwrap()
            .args(["tenant", "list", "--format", "xml"])
            .env_remove("INFRACTL_FORMAT")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value 'xml'"));
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        Command::cargo_bin("infractl")
            .unwrap()
            .args(["cluster", "resize", "c1", "--workers", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--workers"));
    }
}
