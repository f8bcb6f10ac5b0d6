use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn students(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("students").unwrap();
    cmd.env("STUDENT_RECORDS_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn add_student(dir: &Path, id: &str, first: &str, major: &str) {
    students(dir)
        .args([
            "student",
            "add",
            "--id",
            id,
            "--first-name",
            first,
            "--last-name",
            "lovelace",
            "--email",
            &format!("{}@example.com", first),
            "--phone",
            "555-123-4567",
            "--dob",
            "2000-01-15",
            "--major",
            major,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added student"));
}

#[test]
fn add_then_show_and_list() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "stu001", "ada", "Mathematics");

    students(temp.path())
        .args(["student", "show", "STU001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("ada@example.com"));

    students(temp.path())
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STU001"))
        .stdout(predicate::str::contains("1 student(s)"));
}

#[test]
fn empty_list_says_so() {
    let temp = TempDir::new().unwrap();

    students(temp.path())
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students found."));
}

#[test]
fn duplicate_id_is_rejected() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    students(temp.path())
        .args([
            "student",
            "add",
            "--id",
            "stu001",
            "--first-name",
            "Grace",
            "--last-name",
            "Hopper",
            "--email",
            "grace@example.com",
            "--phone",
            "5559876543",
            "--dob",
            "1999-12-09",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_fields_fail_without_writing() {
    let temp = TempDir::new().unwrap();

    students(temp.path())
        .args([
            "student",
            "add",
            "--id",
            "S1",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "not-an-email",
            "--phone",
            "123",
            "--dob",
            "2000-01-15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert!(!temp.path().join("data").join("students.json").exists());
}

#[test]
fn courses_grades_and_transcript() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    students(temp.path())
        .args(["course", "add", "STU001", "Algebra"])
        .assert()
        .success();
    students(temp.path())
        .args(["course", "add", "STU001", "Biology"])
        .assert()
        .success();

    students(temp.path())
        .args(["grade", "add", "STU001", "Algebra", "3.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPA is now 3.50"));

    students(temp.path())
        .args(["grade", "add", "STU001", "Chemistry", "3.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    students(temp.path())
        .args(["grade", "add", "STU001", "Biology", "4.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Grade must be between"));

    students(temp.path())
        .args(["transcript", "STU001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algebra"))
        .stdout(predicate::str::contains("In progress"))
        .stdout(predicate::str::contains("GPA: 3.50"));

    students(temp.path())
        .args(["course", "remove", "STU001", "Algebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPA is now 0.00"));
}

#[test]
fn delete_requires_force() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    students(temp.path())
        .args(["student", "delete", "STU001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to confirm deletion"));

    students(temp.path())
        .args(["student", "show", "STU001"])
        .assert()
        .success();

    students(temp.path())
        .args(["student", "delete", "STU001", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted student"));

    students(temp.path())
        .args(["student", "show", "STU001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student not found: STU001"));
}

#[test]
fn search_and_stats() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");
    add_student(temp.path(), "STU002", "grace", "Computer Science");

    students(temp.path())
        .args(["search", "--major", "computer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STU002"))
        .stdout(predicate::str::contains("STU001").not());

    students(temp.path())
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total students:    2"));
}

#[test]
fn export_then_import_into_fresh_store() {
    let source = TempDir::new().unwrap();
    add_student(source.path(), "STU001", "ada", "Mathematics");
    add_student(source.path(), "STU002", "grace", "Physics");

    let csv_path = source.path().join("out.csv");
    students(source.path())
        .args(["export", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 student(s)"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    assert!(contents.starts_with("student_id,first_name,last_name,email"));

    let target = TempDir::new().unwrap();
    students(target.path())
        .args(["import", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 student(s)"));

    students(target.path())
        .args(["student", "show", "STU002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Physics"));
}

#[test]
fn import_reports_bad_rows() {
    let temp = TempDir::new().unwrap();
    let csv_path = temp.path().join("in.csv");
    fs::write(
        &csv_path,
        "student_id,first_name,last_name,email,phone,date_of_birth\n\
         STU010,Grace,Hopper,grace@example.com,555-987-6543,1990-12-09\n\
         STU011,Alan,Turing,bad-email,555-987-6543,1990-06-23\n",
    )
    .unwrap();

    students(temp.path())
        .args(["import", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 student(s), 1 row(s) failed"))
        .stdout(predicate::str::contains("line 3"));
}

#[test]
fn import_into_non_empty_store_needs_force() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    let csv_path = temp.path().join("in.csv");
    fs::write(
        &csv_path,
        "student_id,first_name,last_name,email,phone,date_of_birth\n\
         STU010,Grace,Hopper,grace@example.com,555-987-6543,1990-12-09\n",
    )
    .unwrap();

    students(temp.path())
        .args(["import", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    students(temp.path())
        .args(["student", "show", "STU010"])
        .assert()
        .failure();

    students(temp.path())
        .args(["import", csv_path.to_str().unwrap(), "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 student(s)"));
}

#[test]
fn backup_list_and_restore_latest() {
    let temp = TempDir::new().unwrap();

    students(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found."));

    add_student(temp.path(), "STU001", "ada", "Mathematics");
    add_student(temp.path(), "STU002", "grace", "Physics");

    students(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("students_backup_"))
        .stdout(predicate::str::contains("Total: 1 backup(s)"));

    students(temp.path())
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    students(temp.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 student(s)"));

    students(temp.path())
        .args(["student", "show", "STU002"])
        .assert()
        .failure();
}

#[test]
fn corrupt_data_file_points_to_restore() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    fs::write(
        temp.path().join("data").join("students.json"),
        "{ this is not json",
    )
    .unwrap();

    students(temp.path())
        .args(["student", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt data"))
        .stderr(predicate::str::contains("backup restore latest --force"));

    students(temp.path())
        .args(["backup", "list"])
        .assert()
        .success();
}

#[test]
fn history_shows_audit_entries() {
    let temp = TempDir::new().unwrap();
    add_student(temp.path(), "STU001", "ada", "Mathematics");

    students(temp.path())
        .args(["student", "edit", "STU001", "--major", "Physics"])
        .assert()
        .success();

    students(temp.path())
        .args(["history", "STU001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("UPDATE"))
        .stdout(predicate::str::contains("Physics"));
}
