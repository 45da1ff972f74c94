//! End-to-end tests for the offline annotation commands. Everything here
//! runs against a temp data directory and never touches the network.

use assert_cmd::Command;

fn chardex(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("chardex").unwrap();
    cmd.env("CHARDEX_DATA_DIR", data_dir);
    cmd
}

#[test]
fn fav_list_starts_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["fav", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No favorites."));
}

#[test]
fn fav_export_of_nothing_is_a_valid_empty_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["fav", "export", "--format", "json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"count\": 0"))
        .stdout(predicates::str::contains("\"version\": \"1.0\""));

    chardex(temp_dir.path())
        .args(["fav", "export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicates::str::contains("ID,Name,Status,Species,Added At"));
}

#[test]
fn fav_export_rejects_unknown_formats() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["fav", "export", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unknown export format"));
}

#[test]
fn note_lifecycle_persists_across_invocations() {
    let temp_dir = tempfile::tempdir().unwrap();

    chardex(temp_dir.path())
        .args([
            "note", "add", "1", "--title", "Grandpa", "--content", "Turned himself into a pickle",
            "--tag", "science",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("added."));

    // A fresh process sees the persisted note.
    chardex(temp_dir.path())
        .args(["note", "list", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Grandpa"))
        .stdout(predicates::str::contains("science"));

    chardex(temp_dir.path())
        .args(["note", "clear"])
        .assert()
        .success();
    chardex(temp_dir.path())
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No notes."));
}

#[test]
fn note_add_surfaces_validation_errors() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["note", "add", "1", "--title", "", "--content", "body"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Title is required"));

    // Nothing was written.
    chardex(temp_dir.path())
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No notes."));
}

#[test]
fn note_delete_of_unknown_id_is_a_no_op() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["note", "delete", "no-such-id"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No such note."));
}

#[test]
fn list_rejects_invalid_status() {
    let temp_dir = tempfile::tempdir().unwrap();
    chardex(temp_dir.path())
        .args(["list", "--status", "zombie"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unknown status"));
}
