use assert_cmd::Command;
use regex::Regex;
use std::fs;

fn lineup() -> Command {
    Command::cargo_bin("lineup").expect("binary builds")
}

fn count(pattern: &str, haystack: &str) -> usize {
    Regex::new(pattern).unwrap().find_iter(haystack).count()
}

#[test]
fn test_formations_for_one_size() {
    let output = lineup().args(["formations", "--size", "7"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2-3-1"));
    assert!(stdout.contains("3-2-1"));
    assert!(!stdout.contains("4-4-2"));
}

#[test]
fn test_formations_rejects_unknown_size() {
    lineup().args(["formations", "--size", "6"]).assert().failure();
}

#[test]
fn test_render_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("five.svg");

    lineup()
        .args([
            "render",
            "--size",
            "5",
            "--formation",
            "1-2-2",
            "--title",
            "Five & Dime",
            "--subtitle",
            "Tuesday",
            "--captain",
            "1",
            "--motm",
            "Player 2",
            "--club-badge",
            "--out",
        ])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(count(r#"<g class="slot""#, &svg), 5);
    assert!(svg.contains("FIVE &amp; DIME"));
    assert!(svg.contains(">1-2-2<"));
    assert!(svg.contains(r#"class="club-badge""#));
    assert!(!svg.contains(r#"class="manager""#));
    assert_eq!(count(r#">C</text>"#, &svg), 1);
    assert_eq!(count(r#">★</text>"#, &svg), 1);
}

#[test]
fn test_saved_lineup_can_be_rendered_again() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("lineup.json");
    let first = dir.path().join("first.svg");
    let second = dir.path().join("second.svg");

    lineup()
        .args(["render", "--flip", "--hide-formation", "--save"])
        .arg(&saved)
        .arg("--out")
        .arg(&first)
        .assert()
        .success();

    lineup()
        .arg("render")
        .arg("--input")
        .arg(&saved)
        .arg("--out")
        .arg(&second)
        .assert()
        .success();

    let a = fs::read_to_string(&first).unwrap();
    let b = fs::read_to_string(&second).unwrap();
    assert_eq!(a, b);
    assert_eq!(count(r#"<g class="slot""#, &a), 11);
    assert!(!a.contains(r#"class="formation""#));
}

#[test]
fn test_render_rejects_unknown_formation() {
    let dir = tempfile::tempdir().unwrap();
    lineup()
        .args(["render", "--formation", "9-9-9", "--out"])
        .arg(dir.path().join("x.svg"))
        .assert()
        .failure();
}

#[test]
fn test_short_search_skips_the_network() {
    lineup()
        .args(["search", "ne", "--search-url", "http://127.0.0.1:9"])
        .assert()
        .success();
}
