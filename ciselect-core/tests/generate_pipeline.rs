//! End-to-end pipeline runs against real git repositories.

use camino::{Utf8Path, Utf8PathBuf};
use ciselect_core::adapters::{FsTemplateSource, FsWritePort, ShellGit};
use ciselect_core::pipeline::{run_generate, write_generate_artifacts};
use ciselect_core::settings::GenerateSettings;
use ciselect_types::selection::{SelectionReason, ToolInfo};
use pretty_assertions::assert_eq;
use std::process::Command;
use tempfile::TempDir;

const TEMPLATE: &str = "\
workflows:
  build:
    jobs:
{{#each projects}}
      - {{job}}
{{/each}}
";

fn run_git(root: &Utf8Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .expect("run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn write(root: &Utf8Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn commit(root: &Utf8Path, message: &str) -> String {
    run_git(root, &["add", "-A"]);
    run_git(root, &["commit", "--quiet", "-m", message]);
    run_git(root, &["rev-parse", "HEAD"])
}

fn repo_with_feature_branch() -> (TempDir, Utf8PathBuf, String) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    run_git(&root, &["init", "--quiet"]);
    run_git(&root, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    run_git(&root, &["config", "user.email", "test@example.com"]);
    run_git(&root, &["config", "user.name", "Test User"]);
    run_git(&root, &["config", "commit.gpgsign", "false"]);

    write(&root, ".circleci/ci-template.yml", TEMPLATE);
    write(&root, "backend/api/app.py", "print('a')\n");
    write(&root, "frontend/app.js", "x\n");
    // Generated output must not dirty the checkouts below.
    write(&root, ".gitignore", "generated_config.yml\nartifacts/\n");
    commit(&root, "init");

    run_git(&root, &["checkout", "--quiet", "-b", "feature"]);
    write(&root, "backend/api/app.py", "print('b')\n");
    let head = commit(&root, "api change");
    (temp, root, head)
}

fn tool() -> ToolInfo {
    ToolInfo {
        name: "ciselect".to_string(),
        version: Some("0.0.0".to_string()),
    }
}

#[test]
fn feature_branch_renders_only_touched_project() {
    let (_temp, root, head) = repo_with_feature_branch();
    let settings = GenerateSettings {
        repo_root: root.clone(),
        head: Some(head.clone()),
        report: Some(Utf8PathBuf::from("artifacts/ciselect/selection.json")),
        ..Default::default()
    };

    let git = ShellGit::new(root.clone());
    let outcome = run_generate(&settings, &git, &FsTemplateSource, tool()).expect("generate");
    write_generate_artifacts(&settings, &outcome, &FsWritePort).expect("write");

    let generated = std::fs::read_to_string(root.join("generated_config.yml")).unwrap();
    assert!(generated.contains("- build-backend-api"), "{generated}");
    assert!(!generated.contains("build-frontend"), "{generated}");
    assert!(generated.ends_with('\n'));

    let report: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(root.join("artifacts/ciselect/selection.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["head"], head.as_str());
    assert_eq!(report["baseline"], "merge_base");
    assert_eq!(report["changed_files"], serde_json::json!(["backend/api/app.py"]));
}

#[test]
fn unknown_head_renders_every_project() {
    let (_temp, root, _head) = repo_with_feature_branch();
    let settings = GenerateSettings {
        repo_root: root.clone(),
        head: Some("0123456789abcdef0123456789abcdef01234567".to_string()),
        ..Default::default()
    };

    let git = ShellGit::new(root.clone());
    let outcome = run_generate(&settings, &git, &FsTemplateSource, tool()).expect("generate");

    assert_eq!(outcome.report.reason, SelectionReason::Fallback);
    assert!(outcome.report.detection_error.is_some());
    for job in ["build-backend-api", "build-backend-consumer", "build-frontend"] {
        assert!(outcome.rendered.contains(job), "missing {job}");
    }
}
