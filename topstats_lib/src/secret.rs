//! Secret backends for reading the topstats.gg API token.
//!
//! Used by [`crate::helpers::get_token`] when no token was passed explicitly.

use std::process::{Command, Stdio};

/// Trimmed, non-empty environment variable.
fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Run a secret CLI and return its trimmed stdout. Stderr is discarded.
fn run_cmd(args: &[&str], env_extra: &[(&str, &str)]) -> Option<String> {
    let (bin, rest) = args.split_first()?;
    let mut cmd = Command::new(bin);
    cmd.args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    for (k, v) in env_extra {
        cmd.env(k, v);
    }
    let out = cmd.output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 1Password CLI (`op read`).
///
/// - `TOPSTATS_OP_ENTRY_PATH`: `op://Vault/Item`
/// - `TOPSTATS_OP_FIELD`: field name, default `TOKEN`
pub fn one_password() -> Option<String> {
    let path = env_nonempty("TOPSTATS_OP_ENTRY_PATH")?;
    let field = std::env::var("TOPSTATS_OP_FIELD").unwrap_or_else(|_| "TOKEN".to_string());
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    let uri = format!("{}/{}", path.trim_end_matches('/'), field);
    run_cmd(&["op", "read", &uri], &[])
}

/// Bitwarden CLI (`bw get password`).
///
/// - `TOPSTATS_BW_ITEM_ID`: login item UUID
/// - `TOPSTATS_BW_SESSION`: optional session key, passed on as `BW_SESSION`
pub fn bitwarden() -> Option<String> {
    let id = env_nonempty("TOPSTATS_BW_ITEM_ID")?;
    match env_nonempty("TOPSTATS_BW_SESSION") {
        Some(session) => run_cmd(
            &["bw", "get", "password", &id],
            &[("BW_SESSION", session.as_str())],
        ),
        None => run_cmd(&["bw", "get", "password", &id], &[]),
    }
}
