use assert_cmd::Command;
use std::path::Path;

pub fn codex_cmd() -> Command {
    let mut cmd = Command::cargo_bin("codex").unwrap();
    cmd.env_remove("CODEX_ROOT");
    cmd.env_remove("CODEX_LOG");
    cmd
}

/// Run `codex init` in `dir`
#[allow(dead_code)]
pub fn init_archive(dir: &Path) {
    codex_cmd().arg("init").arg(dir).assert().success();
}

/// Run a command inside `dir` and return its stdout
#[allow(dead_code)]
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = codex_cmd().current_dir(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "codex {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Id printed by `codex new`: "Created <title> (<id>)"
#[allow(dead_code)]
pub fn created_id(stdout: &str) -> String {
    let start = stdout.rfind('(').unwrap() + 1;
    let end = stdout.rfind(')').unwrap();
    stdout[start..end].to_string()
}
