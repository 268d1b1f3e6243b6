//! End-to-end tests for the `seed` binary.
//!
//! Each test runs the real binary inside a scratch project and checks the
//! files it leaves behind.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_seed(project_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seed"))
        .args(args)
        .current_dir(project_dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run seed")
}

fn output_text(output: &Output) -> String {
    format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn seed_ok(project_dir: &Path, args: &[&str]) -> String {
    let output = run_seed(project_dir, args);
    let text = output_text(&output);
    assert!(output.status.success(), "seed {:?} failed.\n{}", args, text);
    text
}

fn module_dir(root: &Path, domain: &str, module: &str) -> std::path::PathBuf {
    root.join("Engine/Source").join(domain).join(module)
}

#[test]
fn add_module_writes_manifest_and_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    seed_ok(root, &["add", "module", "Runtime", "Common", "--target", "static"]);

    let module = module_dir(root, "Runtime", "Common");
    let manifest = fs::read_to_string(module.join("Module.json")).unwrap();
    assert!(manifest.contains("\"BuildTarget\": \"Static\""));
    assert!(manifest.contains("\"GenerateCMake\": \"True\""));
    assert!(module.join("CMakeLists.txt").is_file());
    assert!(module.join("Public/Common.hpp").is_file());
    assert!(module.join("Public/CommonAPI.hpp").is_file());
    assert!(root.join("Engine/Source/CMakeLists.txt").is_file());

    let again = run_seed(root, &["add", "module", "Runtime", "Common"]);
    assert!(!again.status.success());
    assert!(output_text(&again).contains("already exists"));
}

#[test]
fn dependency_round_trip_through_cli() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    seed_ok(root, &["add", "module", "Runtime", "Common"]);
    seed_ok(root, &["add", "module", "Runtime", "Math"]);

    seed_ok(root, &["add", "dep", "Runtime", "Math", "Runtime", "Common"]);
    let text = seed_ok(root, &["add", "dep", "Runtime", "Math", "Runtime", "Common"]);
    assert!(text.contains("already depends on"), "{}", text);

    let api = fs::read_to_string(module_dir(root, "Runtime", "Math").join("Public/MathAPI.hpp"))
        .unwrap();
    assert!(api.contains("#include \"Common.hpp\""));

    let deps = seed_ok(root, &["list", "dep", "Runtime", "Math"]);
    assert!(deps.contains("Runtime/Common"), "{}", deps);
    let refs = seed_ok(root, &["list", "ref", "Runtime", "Common", "--recursive"]);
    assert!(refs.contains("Runtime/Math"), "{}", refs);

    seed_ok(root, &["remove", "dep", "Runtime", "Math", "Runtime", "Common"]);
    let cmake = fs::read_to_string(module_dir(root, "Runtime", "Math").join("CMakeLists.txt"))
        .unwrap();
    assert!(!cmake.contains("runtime-common"));
}

#[test]
fn regenall_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    seed_ok(root, &["add", "module", "Runtime", "Common"]);
    seed_ok(root, &["add", "class", "Runtime", "Common", "Log", "--folder", "Logging"]);
    seed_ok(root, &["add", "test", "Runtime", "Common", "Log"]);

    let cmake_path = module_dir(root, "Runtime", "Common").join("CMakeLists.txt");
    seed_ok(root, &["regenall"]);
    let first = fs::read(&cmake_path).unwrap();
    seed_ok(root, &["regenall"]);
    assert_eq!(fs::read(&cmake_path).unwrap(), first);

    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("Private/Logging/Log.cpp"));
    assert!(text.contains("Test/TestRuntimeCommonLog.cpp"));
}

#[test]
fn invalid_names_are_rejected_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let output = run_seed(root, &["add", "module", "Runtime", "not-valid"]);
    assert!(!output.status.success());
    assert!(output_text(&output).contains("invalid module name"));
    assert!(!root.join("Engine").exists());
}

#[test]
fn todo_writes_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("Engine")).unwrap();
    fs::write(root.join("Engine/Main.cpp"), "int main() {} // TODO: wire editor\n").unwrap();

    seed_ok(root, &["todo"]);
    assert_eq!(
        fs::read_to_string(root.join("ToDoLists.txt")).unwrap(),
        "ENGINE: [Main.cpp line 1]: wire editor\n"
    );
}

#[test]
fn seed_toml_moves_the_source_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("seed.toml"), "[project]\nsource_dir = \"src\"\n").unwrap();

    seed_ok(root, &["add", "module", "Core", "Memory"]);
    assert!(root.join("src/Core/Memory/Module.json").is_file());
}

#[test]
fn modules_sharing_a_cmake_target_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    seed_ok(root, &["add", "module", "Runtime", "GameplayCore"]);

    let output = run_seed(root, &["add", "module", "RuntimeGameplay", "Core"]);
    assert!(!output.status.success());
    let text = output_text(&output);
    assert!(text.contains("runtime-gameplay-core"), "{}", text);
    assert!(!root.join("Engine/Source/RuntimeGameplay").exists());
}
