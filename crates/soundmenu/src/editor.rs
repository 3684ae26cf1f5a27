use anyhow::{anyhow, Result};
use soundmenu_core::config::Config;
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use tracing::debug;

/// Candidate editors, tried in order. The first one that spawns wins.
const EDITORS: [&str; 8] = [
    "code", "cursor", "gedit", "kate", "mousepad", "xed", "pluma", "xdg-open",
];

/// Open the configuration file in an external editor, writing a starter
/// file first if none exists. Returns the editor that launched.
pub fn open_config() -> Result<&'static str> {
    let path = Config::ensure_config_file()?;

    for editor in EDITORS {
        match Command::new(editor)
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_child) => return Ok(editor),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(editor, "not installed, trying next");
            }
            Err(e) => {
                debug!(editor, error = %e, "failed to launch, trying next");
            }
        }
    }

    Err(anyhow!("none of the candidate editors could be launched"))
}

#[cfg(test)]
mod tests {
    use super::EDITORS;

    #[test]
    fn candidate_list_ends_with_the_system_fallback() {
        assert_eq!(EDITORS.last(), Some(&"xdg-open"));
    }
}
