//! Unit tests for the environment lifecycle manager

use std::fs;
use std::path::PathBuf;

use manven::{CreateOptions, CreateOutcome, LastActivated, ManvenError, ShellKind, ToolOptions};

use super::helpers::{make_env, FakeRunner, TestStore};

fn no_packages() -> CreateOptions {
    CreateOptions::default()
}

fn with_packages(packages: &[&str]) -> CreateOptions {
    CreateOptions {
        packages: packages.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

// ============================================================================
// create
// ============================================================================

#[test]
fn create_runs_virtualenv_in_store_root() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());
    let options = CreateOptions {
        tool: ToolOptions {
            python: Some("python3.11".to_string()),
            always_copy: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let outcome = manager.create("web", &options).unwrap();

    assert_eq!(outcome, CreateOutcome::Created);
    let calls = manager.runner().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, PathBuf::from("virtualenv"));
    assert_eq!(calls[0].args, vec!["--python=python3.11", "--always-copy", "web"]);
    assert_eq!(calls[0].cwd.as_deref(), Some(store.root.as_path()));
    assert!(store.root.join("web/bin/activate").exists());
}

#[test]
fn create_existing_environment_is_a_no_op() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());

    let outcome = manager.create("web", &with_packages(&["manven"])).unwrap();

    assert_eq!(outcome, CreateOutcome::Kept);
    assert!(manager.runner().calls().is_empty());
}

#[test]
fn create_with_replace_starts_from_scratch() {
    let store = TestStore::new();
    let env = make_env(&store.root, "web");
    fs::write(env.join("leftover.txt"), "old").unwrap();
    let manager = store.manager(FakeRunner::new());

    let options = CreateOptions {
        replace: true,
        ..Default::default()
    };
    let outcome = manager.create("web", &options).unwrap();

    assert_eq!(outcome, CreateOutcome::Replaced);
    assert!(!env.join("leftover.txt").exists());
    assert!(env.join("bin/activate").exists());
}

#[test]
fn half_created_directory_does_not_count_as_existing() {
    let store = TestStore::new();
    fs::create_dir_all(store.root.join("web")).unwrap();
    let manager = store.manager(FakeRunner::new());

    let outcome = manager.create("web", &no_packages()).unwrap();

    assert_eq!(outcome, CreateOutcome::Created);
    assert_eq!(manager.runner().programs(), vec!["virtualenv"]);
}

#[test]
fn create_without_virtualenv_fails_before_touching_disk() {
    let store = TestStore::new();
    let runner = FakeRunner {
        missing: vec!["virtualenv".to_string()],
        ..Default::default()
    };
    let manager = store.manager(runner);

    let err = manager.create("web", &no_packages()).unwrap_err();

    assert!(matches!(err, ManvenError::ToolMissing { ref tool } if tool == "virtualenv"));
    assert!(!store.root.exists());
    assert!(manager.runner().calls().is_empty());
}

#[test]
fn creation_failure_carries_tool_stderr() {
    let store = TestStore::new();
    let runner = FakeRunner {
        fail_create: true,
        ..Default::default()
    };
    let manager = store.manager(runner);

    let err = manager.create("web", &no_packages()).unwrap_err();

    match err {
        ManvenError::CreationFailed { name, stderr } => {
            assert_eq!(name, "web");
            assert!(stderr.contains("interpreter not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn packages_are_installed_with_the_environment_pip() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());
    let options = CreateOptions {
        packages: vec!["requests".to_string(), "rich".to_string()],
        installer_flags: vec!["--quiet".to_string()],
        ..Default::default()
    };

    manager.create("web", &options).unwrap();

    let calls = manager.runner().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].program, store.root.join("web/bin/pip"));
    assert_eq!(calls[1].args, vec!["install", "--quiet", "requests", "rich"]);
}

#[test]
fn empty_package_list_skips_pip() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    manager.create("web", &no_packages()).unwrap();

    assert_eq!(manager.runner().programs(), vec!["virtualenv"]);
}

#[test]
fn install_failure_is_reported() {
    let store = TestStore::new();
    let runner = FakeRunner {
        fail_install: true,
        ..Default::default()
    };
    let manager = store.manager(runner);

    let err = manager.create("web", &with_packages(&["numpy"])).unwrap_err();

    match err {
        ManvenError::InstallFailed {
            name,
            packages,
            stderr,
        } => {
            assert_eq!(name, "web");
            assert_eq!(packages, "numpy");
            assert!(stderr.contains("No matching distribution"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn installing_manven_runs_the_self_check_and_touches_its_command_file() {
    let store = TestStore::new();
    let reported = store.temp.path().join("inner").join("to_execute.sh");
    let runner = FakeRunner {
        self_check_output: Some(reported.clone()),
        ..Default::default()
    };
    let manager = store.manager(runner);

    manager.create("web", &with_packages(&["manven"])).unwrap();

    let calls = manager.runner().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].program, store.root.join("web/bin/manven"));
    assert_eq!(calls[2].args, vec!["get", "command-file"]);
    assert!(calls[2].capture_stdout);
    assert!(reported.exists());
}

#[test]
fn failing_self_check_does_not_fail_creation() {
    let store = TestStore::new();
    let runner = FakeRunner {
        fail_self_check: true,
        ..Default::default()
    };
    let manager = store.manager(runner);

    let outcome = manager.create("web", &with_packages(&["manven"])).unwrap();

    assert_eq!(outcome, CreateOutcome::Created);
}

// ============================================================================
// clone
// ============================================================================

#[test]
fn clone_copies_source_and_skips_packages() {
    let store = TestStore::new();
    make_env(&store.root, "base");
    let manager = store.manager(FakeRunner::new());
    let options = CreateOptions {
        clone_from: Some("base".to_string()),
        packages: vec!["manven".to_string()],
        ..Default::default()
    };

    let outcome = manager.create("copy", &options).unwrap();

    assert_eq!(outcome, CreateOutcome::Cloned);
    let calls = manager.runner().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, PathBuf::from("virtualenv-clone"));
    assert_eq!(
        calls[0].args,
        vec![store.root.join("base").display().to_string(), "copy".to_string()]
    );
    assert_eq!(calls[0].cwd.as_deref(), Some(store.root.as_path()));
    assert!(store.root.join("copy/bin/activate").exists());
}

#[test]
fn clone_of_missing_source_is_not_found() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());
    let options = CreateOptions {
        clone_from: Some("ghost".to_string()),
        ..Default::default()
    };

    let err = manager.create("copy", &options).unwrap_err();

    assert!(matches!(err, ManvenError::NotFound { ref name } if name == "ghost"));
    assert!(manager.runner().calls().is_empty());
}

#[test]
fn clone_without_clone_tool_is_tool_missing() {
    let store = TestStore::new();
    make_env(&store.root, "base");
    let runner = FakeRunner {
        missing: vec!["virtualenv-clone".to_string()],
        ..Default::default()
    };
    let manager = store.manager(runner);
    let options = CreateOptions {
        clone_from: Some("base".to_string()),
        ..Default::default()
    };

    let err = manager.create("copy", &options).unwrap_err();

    assert!(matches!(err, ManvenError::ToolMissing { ref tool } if tool == "virtualenv-clone"));
}

#[test]
fn clone_failure_carries_tool_stderr() {
    let store = TestStore::new();
    make_env(&store.root, "base");
    let runner = FakeRunner {
        fail_clone: true,
        ..Default::default()
    };
    let manager = store.manager(runner);
    let options = CreateOptions {
        clone_from: Some("base".to_string()),
        ..Default::default()
    };

    let err = manager.create("copy", &options).unwrap_err();

    assert!(matches!(err, ManvenError::CloneFailed { ref from, .. } if from == "base"));
}

// ============================================================================
// activate / deactivate
// ============================================================================

#[test]
fn activate_writes_source_line_and_record() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());

    manager.activate("web").unwrap();

    assert_eq!(
        store.pending(),
        format!("source {}", store.root.join("web/bin/activate").display())
    );
    let record = LastActivated::load(&store.state.last_activated)
        .unwrap()
        .unwrap();
    assert_eq!(record, LastActivated::new("web", &store.root));
}

#[test]
fn activate_uses_the_script_of_the_detected_shell() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager_with(store.settings(), ShellKind::Fish, FakeRunner::new());

    manager.activate("web").unwrap();

    assert_eq!(
        store.pending(),
        format!("source {}", store.root.join("web/bin/activate.fish").display())
    );
}

#[test]
fn activate_missing_environment_writes_nothing() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());
    manager.relay().reset().unwrap();

    let err = manager.activate("ghost").unwrap_err();

    assert!(matches!(err, ManvenError::NotFound { ref name } if name == "ghost"));
    assert_eq!(store.pending(), "");
    assert!(!store.state.last_activated.exists());
}

#[test]
fn activate_queues_nothing_when_record_cannot_be_saved() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    fs::create_dir_all(&store.state.last_activated).unwrap();
    let manager = store.manager(FakeRunner::new());
    manager.relay().reset().unwrap();

    let err = manager.activate("web").unwrap_err();

    assert!(matches!(err, ManvenError::Io { .. }));
    assert_eq!(store.pending(), "");
}

#[test]
fn deactivate_writes_deactivate() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    manager.deactivate().unwrap();

    assert_eq!(store.pending(), "deactivate");
}

// ============================================================================
// list
// ============================================================================

#[test]
fn list_is_sorted_and_excludes_temporaries_by_default() {
    let store = TestStore::new();
    make_env(&store.root, "zeta");
    make_env(&store.root, "alpha");
    make_env(&store.temp_root(), "temp_venv_0");
    let manager = store.manager(FakeRunner::new());

    assert_eq!(manager.list(false).unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn list_all_appends_temporaries_after_named_environments() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    make_env(&store.temp_root(), "temp_venv_1");
    make_env(&store.temp_root(), "temp_venv_0");
    let manager = store.manager(FakeRunner::new());

    assert_eq!(
        manager.list(true).unwrap(),
        vec!["web", ".temp/temp_venv_0", ".temp/temp_venv_1"]
    );
}

#[test]
fn list_of_missing_store_is_empty() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    assert!(manager.list(true).unwrap().is_empty());
}

// ============================================================================
// temporary environments
// ============================================================================

#[test]
fn activate_temp_creates_and_activates_in_temp_store() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    let first = manager.activate_temp(&no_packages()).unwrap();
    let second = manager.activate_temp(&no_packages()).unwrap();

    assert_eq!(first, ".temp/temp_venv_0");
    assert_eq!(second, ".temp/temp_venv_1");
    assert_eq!(
        store.pending(),
        format!(
            "source {}",
            store.temp_root().join("temp_venv_1/bin/activate").display()
        )
    );
    let record = LastActivated::load(&store.state.last_activated)
        .unwrap()
        .unwrap();
    assert_eq!(record, LastActivated::new("temp_venv_1", store.temp_root()));
}

#[test]
fn prune_removes_every_entry_in_name_order() {
    let store = TestStore::new();
    make_env(&store.temp_root(), "temp_venv_1");
    make_env(&store.temp_root(), "temp_venv_0");
    fs::write(store.temp_root().join("stray.txt"), "x").unwrap();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());

    let removed = manager.prune_temp().unwrap();

    assert_eq!(removed, vec!["stray.txt", "temp_venv_0", "temp_venv_1"]);
    assert_eq!(fs::read_dir(store.temp_root()).unwrap().count(), 0);
    assert!(store.root.join("web/bin/activate").exists());
}

#[test]
fn prune_without_temp_store_is_a_no_op() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    assert!(manager.prune_temp().unwrap().is_empty());
}

#[test]
fn prune_refuses_while_a_temporary_environment_is_active() {
    let store = TestStore::new();
    let active = make_env(&store.temp_root(), "temp_venv_0");
    make_env(&store.temp_root(), "temp_venv_1");
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(active));

    let err = manager.prune_temp().unwrap_err();

    assert!(matches!(err, ManvenError::Busy { ref name } if name == ".temp/temp_venv_0"));
    assert!(store.temp_root().join("temp_venv_1").exists());
}

#[cfg(unix)]
#[test]
fn prune_refuses_when_active_path_is_resolved_through_a_symlinked_store() {
    let store = TestStore::new();
    let real_root = store.temp.path().join("real_venvs");
    fs::create_dir_all(&real_root).unwrap();
    std::os::unix::fs::symlink(&real_root, &store.root).unwrap();
    make_env(&store.temp_root(), "temp_venv_0");
    let active = real_root
        .canonicalize()
        .unwrap()
        .join(".temp")
        .join("temp_venv_0");
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(active));

    let err = manager.prune_temp().unwrap_err();

    assert!(matches!(err, ManvenError::Busy { ref name } if name == ".temp/temp_venv_0"));
    assert!(store.temp_root().join("temp_venv_0/bin/activate").exists());
}

#[test]
fn prune_is_allowed_while_a_named_environment_is_active() {
    let store = TestStore::new();
    let active = make_env(&store.root, "web");
    make_env(&store.temp_root(), "temp_venv_0");
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(active));

    assert_eq!(manager.prune_temp().unwrap(), vec!["temp_venv_0"]);
}

// ============================================================================
// remove
// ============================================================================

#[test]
fn remove_deletes_the_environment() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());

    assert!(manager.remove("web").unwrap());
    assert!(!store.root.join("web").exists());
    assert!(manager.list(false).unwrap().is_empty());
}

#[test]
fn remove_missing_environment_is_silent() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    assert!(!manager.remove("ghost").unwrap());
}

#[test]
fn remove_refuses_the_active_environment() {
    let store = TestStore::new();
    let active = make_env(&store.root, "web");
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(active));

    let err = manager.remove("web").unwrap_err();

    assert!(matches!(err, ManvenError::Busy { ref name } if name == "web"));
    assert!(store.root.join("web/bin/activate").exists());
}

// ============================================================================
// open_last / active_environment
// ============================================================================

#[test]
fn open_last_without_record_does_nothing() {
    let store = TestStore::new();
    let manager = store.manager(FakeRunner::new());

    assert_eq!(manager.open_last().unwrap(), None);
    assert_eq!(store.pending(), "");
}

#[test]
fn open_last_reactivates_the_recorded_environment() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());
    manager.activate("web").unwrap();
    let expected = store.pending();
    manager.relay().reset().unwrap();

    let record = manager.open_last().unwrap().unwrap();

    assert_eq!(record.name, "web");
    assert_eq!(store.pending(), expected);
}

#[test]
fn open_last_with_corrupt_record_is_an_error() {
    let store = TestStore::new();
    fs::create_dir_all(store.state.last_activated.parent().unwrap()).unwrap();
    fs::write(&store.state.last_activated, "web\n").unwrap();
    let manager = store.manager(FakeRunner::new());

    let err = manager.open_last().unwrap_err();

    assert!(matches!(err, ManvenError::CorruptRecord { .. }));
}

#[test]
fn open_last_of_removed_environment_is_not_found() {
    let store = TestStore::new();
    make_env(&store.root, "web");
    let manager = store.manager(FakeRunner::new());
    manager.activate("web").unwrap();
    manager.remove("web").unwrap();

    let err = manager.open_last().unwrap_err();

    assert!(matches!(err, ManvenError::NotFound { .. }));
}

#[test]
fn active_environment_is_relative_to_the_store() {
    let store = TestStore::new();
    let temp_env = store.temp_root().join("temp_venv_2");
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(temp_env));

    assert_eq!(
        manager.active_environment().as_deref(),
        Some(".temp/temp_venv_2")
    );
}

#[test]
fn active_environment_outside_the_store_is_ignored() {
    let store = TestStore::new();
    let manager = store
        .manager(FakeRunner::new())
        .with_active_env(Some(PathBuf::from("/opt/other/venv")));

    assert_eq!(manager.active_environment(), None);
}
