use std::env;
use std::process::Command;

const PREFIX: &str = "VITALITY_BUILD";

fn main() {
    for watched in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let tree = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean".to_string(),
        Some(_) => "dirty".to_string(),
        None => "unknown".to_string(),
    };

    let stamps = [
        ("HASH", command_stdout("git", &["rev-parse", "--short", "HEAD"])),
        ("STATUS", Some(tree)),
        (
            "TIMESTAMP",
            Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        ),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", command_stdout("rustc", &["--version"])),
    ];

    for (key, value) in stamps {
        let value = value.filter(|v| !v.is_empty()).unwrap_or_else(|| "unknown".into());
        println!("cargo:rustc-env={PREFIX}_{key}={value}");
    }
}

/// Trimmed stdout of a successful command, `None` if it could not run.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
