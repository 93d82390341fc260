use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::path::Path;

fn run_script(home: &Path, script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("wishlist_cli").unwrap();
    cmd.env("WISHLIST_CLI_SCRIPT", "1")
        .env("WISHLIST_HOME", home)
        .env_remove("RUST_LOG")
        .write_stdin(script.to_string())
        .assert()
        .success()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
add Laptop 4000 high Tech
add Monitor 1200
set-budget 10000 400 3000
list priority
summary
exit
";
    run_script(home.path(), script).stdout(
        contains("Added `Laptop`")
            .and(contains("Budget saved"))
            .and(contains("Laptop"))
            .and(contains("Monitor"))
            .and(contains("Items         : 2"))
            .and(contains("Total value   : 5200.00 SAR"))
            .and(contains("Nearest goal  : Monitor in 3 month(s)")),
    );

    let stored = home.path().join("wishlists").join("default.json");
    let json = std::fs::read_to_string(stored).unwrap();
    assert!(json.contains("\"Laptop\""));
    assert!(json.contains("\"HIGH\""));
}

#[test]
fn wishlist_persists_between_runs() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "open Gifts\nadd Scarf 90\nexit\n")
        .stdout(contains("Opened wishlist `Gifts`"));

    run_script(home.path(), "list\nwishlists\n")
        .stdout(contains("Wishlist: Gifts").and(contains("Scarf")).and(contains("gifts")));
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "sumary\nexit\n").stdout(
        contains("Unknown command `sumary`").and(contains("Suggestion: `summary`?")),
    );
}

#[test]
fn command_errors_do_not_stop_the_shell() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
add Phone abc
buy zzz
set-budget 0 100
add Phone 300
exit
";
    run_script(home.path(), script).stdout(
        contains("price must be a number")
            .and(contains("No product matches `zzz`"))
            .and(contains("monthly income must be greater than zero"))
            .and(contains("Added `Phone`")),
    );
}

#[test]
fn offers_can_be_seeded_and_listed() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "offers\nseed-offers\noffers\n").stdout(
        contains("No active offers")
            .and(contains("Seeded 3 sample offer(s)."))
            .and(contains("AirPods Pro"))
            .and(contains("20%")),
    );
}

#[test]
fn backups_can_be_listed_and_restored() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
add Laptop 4000
backup before trip
add Tent 700
restore 1
list
backups
";
    run_script(home.path(), script).stdout(
        contains("_before-trip.json")
            .and(contains("Restored from"))
            .and(contains("Laptop")),
    );
}

#[test]
fn summary_can_be_printed_as_json() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "add Mouse 80\nset-budget 5000 100\nsummary json\n").stdout(
        contains("\"count\": 1")
            .and(contains("\"months_needed\": 1"))
            .and(contains("\"wishlist\": \"default\"")),
    );
}

#[test]
fn config_changes_are_persisted() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "config set theme plain\nconfig get theme\n")
        .stdout(contains("theme = plain"));
    assert!(home.path().join("config").join("config.json").exists());

    run_script(home.path(), "config set colour red\n").stdout(contains("Unknown setting `colour`"));
}

#[test]
fn version_and_help_are_available() {
    let home = tempfile::tempdir().unwrap();
    run_script(home.path(), "version\nhelp\nhelp list\n").stdout(
        contains("Wishlist ")
            .and(contains("Available commands"))
            .and(contains("usage      : list [recent|priority|price] [low|medium|high]")),
    );
}
