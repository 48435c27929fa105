use std::{fs, path::PathBuf};

use tempfile::tempdir;

use pyut::ProjectStore;
use pyut_cli::{Args, Command, run, summarize};

/// Collects all .put files from a directory
fn collect_put_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("put")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo projects live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn resave_args(input: &str, output: &str) -> Args {
    Args {
        command: Command::Resave {
            input: input.to_string(),
            output: Some(output.to_string()),
        },
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_put_files(demos_path());

    assert!(!valid_demos.is_empty(), "No demo projects found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy();
        let first = temp_dir.path().join(format!("{stem}.put"));
        let second = temp_dir.path().join(format!("{stem}.again.put"));

        let result = run(&resave_args(
            &demo_path.to_string_lossy(),
            &first.to_string_lossy(),
        ))
        .and_then(|()| {
            run(&resave_args(
                &first.to_string_lossy(),
                &second.to_string_lossy(),
            ))
        });

        match result {
            Ok(()) => {
                let first = fs::read_to_string(&first).unwrap();
                let second = fs::read_to_string(&second).unwrap();
                assert_eq!(first, second, "{} is not stable", demo_path.display());
            }
            Err(err) => failed_demos.push((demo_path.clone(), err)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemo projects that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo project(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let error_demos = collect_put_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let args = Args {
            command: Command::Inspect {
                file: demo_path.to_string_lossy().to_string(),
            },
            config: None,
            log_level: "off".to_string(),
        };

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_resave_uses_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[writer]\nindent = 0\nxml_declaration = false\n").unwrap();
    let output = temp_dir.path().join("compact.put");

    let mut args = resave_args(
        &demos_path().join("feeding.put").to_string_lossy(),
        &output.to_string_lossy(),
    );
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("resave should succeed");

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("<PyutProject"));
    assert!(!text.contains('\n'));
}

#[test]
fn e2e_resave_defaults_to_configured_filename() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("fallback.put");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[project]\ndefault_filename = {:?}\n", output.to_string_lossy()),
    )
    .unwrap();

    let args = Args {
        command: Command::Resave {
            input: demos_path().join("feeding.put").to_string_lossy().to_string(),
            output: None,
        },
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };
    run(&args).expect("resave should succeed");

    let project = ProjectStore::default()
        .load_from_path(&output)
        .expect("saved project should load");
    assert_eq!(project.documents().len(), 2);
}

#[test]
fn e2e_summary_of_feeding_demo() {
    let project = ProjectStore::default()
        .load_from_path(demos_path().join("feeding.put"))
        .expect("demo should load");

    assert_eq!(
        summarize(&project),
        "Code path: \n\
         Document 1: Use-Case Diagram (3 entities)\n  \
         actor: 1\n  \
         use case: 1\n  \
         link: 1\n\
         Document 2: Sequence Diagram (4 entities)\n  \
         sequence instance: 2\n  \
         sequence message: 2\n"
    );
}
