use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = "\
reception_id,reception_date,reception_number,counterparty,subdivision,position,service,item,work_group,transaction_type,price,quantity,equipment
,14.03.2025,R-100,Volga Motors,Workshop 2,1,Engine overhaul,Inspection,,Расходы,\"1 200,50\",1,INV-7
,14.03.2025,R-100,Volga Motors,Workshop 2,1,Engine overhaul,Filter,Engine,expense,350,2,INV-7
,14.03.2025,R-101,Volga Motors,Workshop 2,2,Washing,Washing,,income,500,1,
";

fn acceptance(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("acceptance").unwrap();
    cmd.env("ACCEPTANCE_CLI_DATA_DIR", data_dir.path());
    cmd
}

fn upload(data_dir: &TempDir) {
    let file = data_dir.path().join("export.csv");
    std::fs::write(&file, EXPORT).unwrap();
    acceptance(data_dir)
        .arg("upload")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 rows in 2 positions"));
}

#[test]
fn test_full_reconciliation_flow() {
    let data_dir = TempDir::new().unwrap();
    acceptance(&data_dir).arg("init").assert().success();
    upload(&data_dir);

    acceptance(&data_dir)
        .args(["duplicate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Position 1 duplicated as position 3"));

    acceptance(&data_dir)
        .args(["add-group", "Engine", "Oil", "--price", "10", "--quantity", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added \"Oil\" to work group \"Engine\" of position 1",
        ));

    acceptance(&data_dir)
        .args(["delete", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Position 2 deleted (1 rows)"));

    acceptance(&data_dir)
        .args(["show", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 rows, 2 positions"));

    acceptance(&data_dir)
        .arg("save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 5 rows in 2 positions"));

    acceptance(&data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft is empty"));

    acceptance(&data_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 rows, 2 positions"));

    acceptance(&data_dir)
        .args(["history", "--audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SAVE"))
        .stdout(predicate::str::contains("DUPLICATE"));
}

#[test]
fn test_delete_declined_at_prompt() {
    let data_dir = TempDir::new().unwrap();
    upload(&data_dir);

    acceptance(&data_dir)
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete position 1?"))
        .stdout(predicate::str::contains("Aborted."));

    acceptance(&data_dir)
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Position 1 deleted (2 rows)"));
}

#[test]
fn test_unknown_position_is_reported() {
    let data_dir = TempDir::new().unwrap();
    upload(&data_dir);

    acceptance(&data_dir)
        .args(["duplicate", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Position 9 not found"));

    acceptance(&data_dir)
        .args(["delete", "9", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Position 9 not found"));
}

#[test]
fn test_empty_draft_actions_fail() {
    let data_dir = TempDir::new().unwrap();

    acceptance(&data_dir)
        .args(["add-group", "Engine", "Oil", "--price", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("upload acceptance data first"));

    acceptance(&data_dir)
        .arg("save")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to save"));
}

#[test]
fn test_cancel_discards_draft() {
    let data_dir = TempDir::new().unwrap();
    upload(&data_dir);

    acceptance(&data_dir)
        .arg("cancel")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded 3 rows"));

    acceptance(&data_dir)
        .arg("save")
        .assert()
        .failure();
}

#[test]
fn test_upload_refuses_to_overwrite_draft() {
    let data_dir = TempDir::new().unwrap();
    upload(&data_dir);

    let file = data_dir.path().join("export.csv");
    acceptance(&data_dir)
        .arg("upload")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    acceptance(&data_dir)
        .arg("upload")
        .arg(&file)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_edit_position_fields() {
    let data_dir = TempDir::new().unwrap();
    upload(&data_dir);

    acceptance(&data_dir)
        .args(["edit", "position", "1", "--counterparty", "Kama Trucks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 2 rows of position 1"));

    acceptance(&data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kama Trucks"));
}
