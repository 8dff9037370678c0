use assert_cmd::{cargo, prelude::*};
use httpmock::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

const PAGES: [(&str, &str); 4] = [
    ("/united-states/inflation-cpi", " 3.2% "),
    ("/united-states/producer-prices-change", "-0.4"),
    ("/india/inflation-cpi", "5.1"),
    ("/india/wholesale-price-index", "2.04%"),
];

fn page(cell: &str) -> String {
    format!(
        "<html><body><table><tr><td class=\"datatable-item\">{}</td></tr></table></body></html>",
        cell
    )
}

fn base_cmd(home: &TempDir, server: &MockServer) -> Command {
    cmd_with_api(home, server, &server.base_url())
}

fn cmd_with_api(home: &TempDir, server: &MockServer, api_base_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("inflation-watch"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("INFLATION_WATCH_API_KEY")
        .arg("--no-color")
        .arg("--scrape-base-url")
        .arg(server.base_url())
        .arg("--api-base-url")
        .arg(api_base_url);
    cmd
}

#[test]
fn console_mode_prints_lines_and_table() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(page(cell));
        });
    }

    base_cmd(&home, &server)
        .arg("--mode")
        .arg("console")
        .assert()
        .success()
        .stdout(predicate::str::contains("LATEST INFLATION DATA (US & INDIA)"))
        .stdout(predicate::str::contains("US_CPI: 3.2%"))
        .stdout(predicate::str::contains("India_WPI: 2.04%"))
        .stdout(predicate::str::contains("United States"))
        .stdout(predicate::str::contains("\u{001b}[").not());

    assert!(!home.path().join("us_india_inflation.svg").exists());
}

#[test]
fn default_mode_writes_bar_chart_despite_failed_source() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES.iter().skip(1) {
        server.mock(|when, then| {
            when.method(GET).path(*path);
            then.status(200).body(page(cell));
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/united-states/inflation-cpi");
        then.status(500);
    });

    base_cmd(&home, &server)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error fetching"))
        .stdout(predicate::str::contains("/united-states/inflation-cpi"))
        .stdout(predicate::str::contains("HTTP status 500"))
        .stdout(predicate::str::contains("US_CPI: N/A"))
        .stdout(predicate::str::contains("Bar chart saved to"));

    let svg = std::fs::read_to_string(home.path().join("us_india_inflation.svg"))
        .expect("bar chart should exist in the working directory");
    assert!(svg.contains("India CPI (5.1)"));
}

#[test]
fn slow_source_times_out_and_run_continues() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES.iter().skip(1) {
        server.mock(|when, then| {
            when.method(GET).path(*path);
            then.status(200).body(page(cell));
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/united-states/inflation-cpi");
        then.status(200)
            .body(page("9.9"))
            .delay(Duration::from_secs(4));
    });

    base_cmd(&home, &server)
        .arg("--mode")
        .arg("console")
        .arg("--timeout")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("/united-states/inflation-cpi"))
        .stdout(predicate::str::contains("timed out"))
        .stdout(predicate::str::contains("US_CPI: N/A"))
        .stdout(predicate::str::contains("US_PPI: -0.4"));
}

#[test]
fn historical_mode_without_key_skips_trend_charts() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(page(cell));
        });
    }

    base_cmd(&home, &server)
        .arg("--mode")
        .arg("historical")
        .arg("--output")
        .arg("charts/latest.svg")
        .assert()
        .success()
        .stdout(predicate::str::contains("API key not provided"))
        .stdout(predicate::str::contains("Fetching historical data").not());

    assert!(home.path().join("charts").join("latest.svg").exists());
    assert!(!home.path().join("cpi_trend.svg").exists());
}

#[test]
fn unreachable_history_api_does_not_leak_key() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(page(cell));
        });
    }

    let output = cmd_with_api(&home, &server, "http://127.0.0.1:9")
        .env("RUST_LOG", "inflation_watch=debug")
        .arg("--mode")
        .arg("historical")
        .arg("--timeout")
        .arg("2")
        .arg("--api-key")
        .arg("SECRETKEY123")
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Error fetching US_CPI history from http://127.0.0.1:9/"));
    assert!(stdout.contains("client=REDACTED"));
    assert!(stdout.contains("No historical CPI data"));
    assert!(!stdout.contains("SECRETKEY123"), "stdout leaked key:\n{}", stdout);
    assert!(!stderr.contains("SECRETKEY123"), "stderr leaked key:\n{}", stderr);
}

#[test]
fn json_flag_emits_json_only() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();
    for (path, cell) in PAGES {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(page(cell));
        });
    }

    let output = base_cmd(&home, &server)
        .arg("--mode")
        .arg("console")
        .arg("--json")
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(4));
    assert_eq!(parsed[0]["value"], "3.2%");
}

#[test]
fn missing_config_file_fails() {
    let home = TempDir::new().expect("failed to create temp home");
    let server = MockServer::start();

    base_cmd(&home, &server)
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}
