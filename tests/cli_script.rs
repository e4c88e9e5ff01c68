use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

fn run_script(home: &TempDir, script: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("sme_ledger_cli")
        .unwrap()
        .env("SME_LEDGER_CLI_SCRIPT", "1")
        .env("SME_LEDGER_HOME", home.path())
        .env("RUST_LOG", "off")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn script_mode_registers_and_collects() {
    let home = tempfile::tempdir().unwrap();
    run_script(
        &home,
        "sme add \"Alpha Textiles\" \"Sewing Machine\" 500 10 555-0101\n\
         pay 001 200 \"Kofi Mensah\" 2024-03-01\n\
         pay 001 300 \"Kofi Mensah\" 2024-03-02\n\
         sme list\n\
         exit\n",
    )
    .success()
    .stdout(contains("Registered `Alpha Textiles` with ID 001."))
    .stdout(contains("Payment logged. Receipt R-101."))
    .stdout(contains("SME 001 has paid off their tool."))
    .stdout(contains("Paid Off"));
}

#[test]
fn receipt_and_dashboard_after_demo() {
    let home = tempfile::tempdir().unwrap();
    run_script(
        &home,
        "demo\npay 003 50 Adjoa 2024-04-02\nreceipt R-101\ndashboard\n",
    )
    .success()
    .stdout(contains("Loaded 5 demo SMEs."))
    .stdout(contains("Gamma Food (ID: 003)"))
    .stdout(contains("₵150.00"))
    .stdout(contains("Receipt_R-101.pdf"))
    .stdout(contains("Total portfolio : ₵2,350.00"));
}

#[test]
fn errors_are_reported_and_the_shell_keeps_going() {
    let home = tempfile::tempdir().unwrap();
    run_script(
        &home,
        "sme add Beta Oven abc 5\nsme edit 042 Ghost Saw 1 1\nrecipt R-101\nsme add Beta Oven 300 5\n",
    )
    .success()
    .stdout(contains("Validation failed"))
    .stdout(contains("Not found: SME `042`"))
    .stdout(contains("Suggestion: `receipt`?"))
    .stdout(contains("Registered `Beta` with ID 001."));
}

#[test]
fn unknown_sme_payment_is_logged_with_a_warning() {
    let home = tempfile::tempdir().unwrap();
    run_script(&home, "pay 999 50 Kofi 2024-03-01\ntxn list\n")
        .success()
        .stdout(contains("Receipt R-101"))
        .stdout(contains("No SME with ID `999` is registered"))
        .stdout(contains("Unknown"));
}

#[test]
fn export_writes_csv_into_configured_directory() {
    let home = tempfile::tempdir().unwrap();
    let exports = home.path().join("exports");
    let script = format!(
        "config set export_dir {}\nconfig set export_prefix portfolio\ndemo\nexport sewing\n",
        exports.display()
    );
    run_script(&home, &script)
        .success()
        .stdout(contains("Exported 2 SME(s)").and(contains("portfolio_")));

    let file = std::fs::read_dir(&exports)
        .unwrap()
        .filter_map(Result::ok)
        .find(|entry| entry.file_name().to_string_lossy().starts_with("portfolio_"))
        .expect("export file");
    let text = std::fs::read_to_string(file.path()).unwrap();
    assert!(text.starts_with("ID,Name,Phone,Tool Given,Total Cost,Daily Rate,Total Paid,Balance,Status\n"));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn config_persists_between_runs() {
    let home = tempfile::tempdir().unwrap();
    run_script(&home, "config set currency_symbol GH₵\n").success();
    run_script(&home, "config show\n")
        .success()
        .stdout(contains("currency_symbol   : GH₵"));
}
