use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn task_cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TASK_CLI_TASKS_FILE")
        .env_remove("TASK_CLI_STRICT");
    cmd
}

#[test]
fn add_and_list_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_cli(&dir)
        .args(["add", "buy milk"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 1)\n");
    task_cli(&dir)
        .args(["add", "wash car"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 2)\n");

    task_cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1     todo         buy milk"))
        .stdout(predicate::str::contains("2     todo         wash car"));

    dir.child("tasks.json")
        .assert(predicate::str::contains("\"description\": \"buy milk\""))
        .assert(predicate::str::contains("\"status\": \"todo\""));
    Ok(())
}

#[test]
fn status_changes_and_filtered_listing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    task_cli(&dir).args(["add", "buy milk"]).assert().success();
    task_cli(&dir).args(["add", "wash car"]).assert().success();

    task_cli(&dir)
        .args(["mark-done", "1"])
        .assert()
        .success()
        .stdout("Task 1 marked as 'done' successfully\n");
    task_cli(&dir)
        .args(["mark-in-progress", "2"])
        .assert()
        .success()
        .stdout("Task 2 marked as 'in-progress' successfully\n");

    task_cli(&dir)
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buy milk"))
        .stdout(predicate::str::contains("wash car").not());
    task_cli(&dir)
        .args(["list", "todo"])
        .assert()
        .success()
        .stdout("No tasks with status 'todo' found.\n");
    Ok(())
}

#[test]
fn update_and_delete_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    task_cli(&dir).args(["add", "buy milk"]).assert().success();

    task_cli(&dir)
        .args(["update", "1", "buy oat milk"])
        .assert()
        .success()
        .stdout("Task 1 updated successfully\n");
    task_cli(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("buy oat milk"));

    task_cli(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout("Task 1 deleted successfully\n");
    task_cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found.\n");
    Ok(())
}

#[test]
fn unknown_id_is_reported_without_failing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_cli(&dir)
        .args(["delete", "7"])
        .assert()
        .success()
        .stdout("Task with ID 7 not found\n");

    dir.child("tasks.json").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn invalid_arguments_are_usage_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_cli(&dir)
        .args(["list", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status 'finished'"));
    task_cli(&dir)
        .args(["update", "one", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    task_cli(&dir).arg("add").assert().failure();
    task_cli(&dir)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
    Ok(())
}

#[test]
fn help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_cli(&dir)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mark-in-progress"))
        .stdout(predicate::str::contains("Add a new task"));
    Ok(())
}

#[test]
fn corrupt_file_is_treated_as_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str("not json at all")?;

    task_cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found.\n");
    task_cli(&dir)
        .args(["add", "fresh start"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 1)\n");
    Ok(())
}

#[test]
fn strict_mode_rejects_corrupt_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str("not json at all")?;

    task_cli(&dir)
        .env("TASK_CLI_STRICT", "true")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not valid JSON"));

    dir.child("tasks.json").assert("not json at all");
    Ok(())
}

#[test]
fn task_file_location_is_configurable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("task-cli.toml")
        .write_str("tasks_file = \"from-config.json\"\n")?;

    task_cli(&dir).args(["add", "configured"]).assert().success();
    dir.child("from-config.json")
        .assert(predicate::str::contains("configured"));

    task_cli(&dir)
        .env("TASK_CLI_TASKS_FILE", "from-env.json")
        .args(["add", "from env"])
        .assert()
        .success();
    dir.child("from-env.json")
        .assert(predicate::str::contains("from env"));

    task_cli(&dir)
        .args(["add", "flagged", "--file", "data/flag.json"])
        .assert()
        .success();
    dir.child("data/flag.json")
        .assert(predicate::str::contains("flagged"));

    dir.child("tasks.json").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn interactive_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_cli(&dir)
        .arg("interactive")
        .write_stdin("1\nbuy milk\n6\n1\n2\ndone\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"))
        .stdout(predicate::str::contains("Task 1 marked as 'done' successfully"))
        .stdout(predicate::str::contains("1     done         buy milk"))
        .stdout(predicate::str::ends_with("Goodbye!\n"));
    Ok(())
}
