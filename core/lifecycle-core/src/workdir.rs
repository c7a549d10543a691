//! Working directory reminders for the startup context.

use std::path::Path;

/// Converts a path to the forward-slash form shells on every platform accept.
///
/// Backslashes become `/` and a Windows drive prefix `C:` becomes `/c`.
pub fn shell_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let mut chars = forward.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            format!("/{}{}", drive.to_ascii_lowercase(), &forward[2..])
        }
        _ => forward,
    }
}

/// Body of the working-directory comment block.
pub fn working_directory_context(cwd: &Path) -> String {
    let dir = shell_path(&cwd.to_string_lossy());
    format!(
        "WORKING_DIRECTORY: {dir}\n\
         CRITICAL_REMINDERS:\n\
         - cd commands are BANNED (do not persist between bash calls)\n\
         - Use absolute paths: {dir}/tests/\n\
         - Use relative paths: tests/\n\
         - NEVER chain with cd: cd /path && command"
    )
}
