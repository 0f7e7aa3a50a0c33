//! Best-effort browser launching for the "open in browser" answer.

use std::io;
use std::process::{Command, Stdio};

/// Opens a URL in an external viewer.
pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Platform launcher: `open` on macOS, `start` on Windows, `xdg-open` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        launch_detached(launcher_command(url))
    }
}

/// Spawn `cmd` and return once it has started.
///
/// Some launchers stay alive until the browser exits, so the child is reaped
/// on a background thread instead of being waited on here.
fn launch_detached(mut cmd: Command) -> io::Result<()> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    std::thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => {
            tracing::debug!("browser launcher exited with {status}");
        }
        Ok(_) => {}
        Err(err) => tracing::debug!("failed to reap browser launcher: {err}"),
    });
    Ok(())
}

fn launcher_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }
    #[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_receives_url_argument() {
        let cmd = launcher_command("https://github.com/octo/widget");
        let args: Vec<_> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args.last().map(String::as_str), Some("https://github.com/octo/widget"));
    }

    #[cfg(unix)]
    #[test]
    fn long_running_launcher_does_not_block() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let started = std::time::Instant::now();
        launch_detached(cmd).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn missing_launcher_is_an_error() {
        let cmd = Command::new("forksweep-no-such-launcher");
        assert!(launch_detached(cmd).is_err());
    }
}
