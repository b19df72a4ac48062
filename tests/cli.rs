use assert_cmd::Command;
use predicates::str::contains;

const BINARY_NAME: &str = "branchscope";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("start"))
        .stdout(contains("branches"))
        .stdout(contains("search"));
}

#[test]
/// A blank query is rejected before any network call is attempted.
fn search_rejects_blank_query() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["search", "--query", "   "]);
    cmd.assert()
        .failure()
        .stderr(contains("Search query cannot be empty"));
}

#[test]
/// Manual coordinates must come as a pair.
fn search_rejects_partial_coordinates() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["search", "--query", "pharmacy", "--lat", "12.97"]);
    cmd.assert()
        .failure()
        .stderr(contains("Latitude and longitude must be provided together"));
}

#[test]
/// Export format values are validated by the CLI itself.
fn search_rejects_unknown_export_format() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args([
        "search",
        "--query",
        "pharmacy",
        "--export",
        "parquet",
    ]);
    cmd.assert().failure().stderr(contains("parquet"));
}

#[test]
#[ignore] // This requires a reachable backend.
fn branches_lists_branch_network() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["branches", "--env", "local"]);
    cmd.assert().success().stdout(contains("Branch network"));
}
