use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated config and data directories for one test. Every command runs with
/// both env overrides set so nothing touches the real home directory.
struct TestEnv {
    config: TempDir,
    data: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            config: tempfile::tempdir().unwrap(),
            data: tempfile::tempdir().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tourlog").unwrap();
        cmd.env("TOURLOG_CONFIG_DIR", self.config.path())
            .env("TOURLOG_DATA_DIR", self.data.path());
        cmd
    }

    fn init(&self) {
        self.cmd()
            .args(["init", "--data-dir", &self.data.path().to_string_lossy()])
            .assert()
            .success();
    }

    /// Run `add` and return the id the command printed.
    fn add(&self, args: &[&str]) -> String {
        let output = self.cmd().arg("add").args(args).output().unwrap();
        assert!(output.status.success(), "add failed: {output:?}");
        let stdout = String::from_utf8(output.stdout).unwrap();
        stdout
            .lines()
            .find_map(|l| l.strip_prefix("Id: "))
            .expect("add should print the new id")
            .trim()
            .to_string()
    }
}

#[test]
fn test_help_shows_description() {
    Command::cargo_bin("tourlog")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeshare tour sales tracker"));
}

#[test]
fn test_init_creates_data_files() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init", "--data-dir", &env.data.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tourlog at"));

    assert!(env.config.path().join("settings.json").exists());
    assert!(env.data.path().join("sales.json").exists());
    assert!(env.data.path().join("monthly_targets.json").exists());
    assert!(env.data.path().join("exports").is_dir());

    let sales = std::fs::read_to_string(env.data.path().join("sales.json")).unwrap();
    assert_eq!(sales, "[]\n");
}

#[test]
fn test_init_is_idempotent() {
    let env = TestEnv::new();
    env.init();

    // Seed some history, then re-run init: the slots must survive
    env.add(&["--client", "Keeper", "--tour", "1", "--outcome", "sold"]);
    env.init();

    let sales = std::fs::read_to_string(env.data.path().join("sales.json")).unwrap();
    assert!(sales.contains("Keeper"));
}

#[test]
fn test_add_then_list_roundtrip() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .args([
            "add",
            "--client",
            "John Smith",
            "--tour",
            "1",
            "--outcome",
            "sold",
            "--date",
            "2024-03-05",
            "--amount",
            "25000",
            "--bonus-points",
            "5000",
            "--membership-id",
            "#1-697522610",
            "--notes",
            "Upgraded from trial",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Recorded tour #1 for John Smith on 2024-03-05: SOLD",
        ));

    env.cmd()
        .args(["list", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MARCH (2024)"))
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("$25,000"))
        .stdout(predicate::str::contains("#1-697522610"))
        .stdout(predicate::str::contains("1 tours, 1 sold"));
}

#[test]
fn test_list_search_filters() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);
    env.add(&[
        "--client", "Jane Doe", "--tour", "2", "--outcome", "no-sale", "--date", "2024-03-06",
    ]);

    env.cmd()
        .args(["list", "--month", "2024-03", "--search", "JANE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("John Smith").not())
        .stdout(predicate::str::contains("1 tours, 0 sold"));
}

#[test]
fn test_list_other_month_is_empty() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);

    env.cmd()
        .args(["list", "--month", "2024-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tours recorded"));
}

#[test]
fn test_add_rejects_bad_date() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args([
            "add", "--client", "X", "--tour", "1", "--outcome", "sold", "--date", "03/05/2024",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '03/05/2024'"));
}

#[test]
fn test_add_rejects_blank_client() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["add", "--client", "  ", "--tour", "1", "--outcome", "sold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: client"));
}

#[test]
fn test_delete_by_id_prefix() {
    let env = TestEnv::new();
    env.init();
    let id = env.add(&[
        "--client", "Jane Doe", "--tour", "1", "--outcome", "courtesy", "--date", "2024-03-05",
    ]);

    env.cmd()
        .args(["delete", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted sale {id}")));

    env.cmd()
        .args(["list", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tours recorded"));
}

#[test]
fn test_delete_unknown_id_reports_no_match() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["delete", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sale matching id zzz"));
}

#[test]
fn test_delete_ambiguous_prefix_fails() {
    let env = TestEnv::new();
    env.init();

    // Two records sharing an id prefix, written straight into the slot
    let crafted = r#"[
  {"id": "aaa-1", "date": "2024-03-05", "clientName": "A", "tourNumber": 1,
   "outcome": "SOLD", "ownershipType": "DEED"},
  {"id": "aaa-2", "date": "2024-03-06", "clientName": "B", "tourNumber": 2,
   "outcome": "SOLD", "ownershipType": "DEED"}
]"#;
    std::fs::write(env.data.path().join("sales.json"), crafted).unwrap();

    env.cmd()
        .args(["delete", "aaa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is ambiguous (2 matches)"));

    env.cmd()
        .args(["list", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 tours"));
}

#[test]
fn test_delete_rejects_empty_id() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "Only One", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);

    // The empty prefix would match the lone record
    env.cmd()
        .args(["delete", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: id"));

    env.cmd()
        .args(["list", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Only One"));
}

#[test]
fn test_stats_report() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
        "--amount", "25000", "--bonus-points", "5000",
    ]);
    env.add(&[
        "--client", "Jane Doe", "--tour", "2", "--outcome", "no-sale", "--date", "2024-03-06",
    ]);

    env.cmd()
        .args(["stats", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tours:         2"))
        .stdout(predicate::str::contains("Sold:          1"))
        .stdout(predicate::str::contains("Conversion:    50.0%"))
        .stdout(predicate::str::contains("Total sales:   $25,000"))
        .stdout(predicate::str::contains("Bonus points:  5,000"))
        .stdout(predicate::str::contains("target $25,000"))
        .stdout(predicate::str::contains("$25,000 of $400,000"))
        .stdout(predicate::str::contains("(6.3%)"));
}

#[test]
fn test_stats_search_scopes_aggregates() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
        "--amount", "25000",
    ]);
    env.add(&[
        "--client", "Jane Doe", "--tour", "2", "--outcome", "sold", "--date", "2024-03-06",
        "--amount", "10000",
    ]);

    env.cmd()
        .args(["stats", "--month", "2024-03", "--search", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tours:         1"))
        .stdout(predicate::str::contains("Total sales:   $10,000"));
}

#[test]
fn test_target_set_and_show() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .args(["target", "set", "--month", "2024-03", "--asp", "30000"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Targets for MARCH (2024): ASP $30,000, goal $400,000",
        ));

    env.cmd()
        .args(["target", "show", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASP target:  $30,000"))
        .stdout(predicate::str::contains("Sales goal:  $400,000"))
        .stdout(predicate::str::contains("(defaults)").not());

    // An untouched month still resolves to the defaults
    env.cmd()
        .args(["target", "show", "--month", "2024-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(defaults)"))
        .stdout(predicate::str::contains("ASP target:  $25,000"));
}

#[test]
fn test_target_set_keeps_other_side() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["target", "set", "--month", "2024-03", "--asp", "30000"])
        .assert()
        .success();
    env.cmd()
        .args(["target", "set", "--month", "2024-03", "--goal", "500000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASP $30,000, goal $500,000"));
}

#[test]
fn test_export_writes_csv() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
        "--amount", "25000",
    ]);

    let out = env.data.path().join("out.csv");
    env.cmd()
        .args(["export", "--month", "2024-03", "--output", &out.to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 tours to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Date,Tour,Client,Outcome"));
    assert!(content.contains("John Smith"));
    assert!(content.contains("25000.00"));
}

#[test]
fn test_export_default_path() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);

    env.cmd()
        .args(["export", "--month", "2024-03"])
        .assert()
        .success();

    assert!(env
        .data
        .path()
        .join("exports")
        .join("sales-2024-03.csv")
        .exists());
}

#[test]
fn test_export_search_filters_rows() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);
    env.add(&[
        "--client", "Jane Doe", "--tour", "2", "--outcome", "no-sale", "--date", "2024-03-06",
    ]);

    let out = env.data.path().join("filtered.csv");
    env.cmd()
        .args([
            "export", "--month", "2024-03", "--search", "jane", "--output",
            &out.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 tours to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("Jane Doe"));
    assert!(!content.contains("John Smith"));
}

#[test]
fn test_demo_loads_once() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"))
        .stdout(predicate::str::contains("Try these next:"));

    env.cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data skipped"));

    // The seeded history lands in the current month too
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tours recorded").not());
}

#[test]
fn test_status_before_init() {
    let env = TestEnv::new();
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sale history found"));
}

#[test]
fn test_status_reports_history() {
    let env = TestEnv::new();
    env.init();
    env.add(&[
        "--client", "John Smith", "--tour", "1", "--outcome", "sold", "--date", "2024-03-05",
    ]);

    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data dir:"))
        .stdout(predicate::str::contains("Sales:      1"))
        .stdout(predicate::str::contains("Months:     1"))
        .stdout(predicate::str::contains("sales.json"))
        .stdout(predicate::str::contains("monthly_targets.json"));
}

#[test]
fn test_invalid_month_is_an_error() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["list", "--month", "2024-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month '2024-3'"));
}
