//! Abstract process-spawn interface and its `tokio::process`
//! backed implementation, including cancellation (SIGTERM then SIGKILL)
//! over the child's process group.

use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::time::timeout;

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Abstract over process spawning so `CommandTool` can be tested without a
/// real subprocess. `call_timeout` of `None` waits forever.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        command: &str,
        args: &[String],
        working_dir: Option<&str>,
        env: &HashMap<String, String>,
        call_timeout: Option<Duration>,
    ) -> std::io::Result<ExecOutput>;
}

/// Grace period between SIGTERM and SIGKILL on cancellation.
const KILL_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// `tokio::process`-backed [`Executor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(
        &self,
        command: &str,
        args: &[String],
        working_dir: Option<&str>,
        env: &HashMap<String, String>,
        call_timeout: Option<Duration>,
    ) -> std::io::Result<ExecOutput> {
        let mut cmd = Command::new(command);
        cmd.args(args)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        #[cfg(unix)]
        set_new_session(&mut cmd);

        let mut guard = ChildGuard::new(cmd.spawn()?);

        let capture = capture(&mut guard);
        let result = match call_timeout {
            None => capture.await,
            Some(deadline) => match timeout(deadline, capture).await {
                Ok(result) => result,
                Err(_) => {
                    guard.terminate_with_grace(KILL_GRACE_PERIOD).await;
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("call exceeded timeout of {deadline:?}; process signaled"),
                    ));
                }
            },
        };
        guard.disarm();
        result
    }
}

async fn capture(guard: &mut ChildGuard) -> std::io::Result<ExecOutput> {
    let mut stdout_buf = String::new();
    let mut stderr_buf = String::new();
    if let Some(mut stdout) = guard.child_mut().stdout.take() {
        let _ = stdout.read_to_string(&mut stdout_buf).await;
    }
    if let Some(mut stderr) = guard.child_mut().stderr.take() {
        let _ = stderr.read_to_string(&mut stderr_buf).await;
    }
    let status = guard.child_mut().wait().await?;
    Ok(ExecOutput {
        stdout: stdout_buf,
        stderr: stderr_buf,
        exit_code: status.code().unwrap_or(-1),
    })
}

#[cfg(unix)]
fn set_new_session(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

/// RAII guard that kills a child process (and its process group on Unix)
/// on drop. Wrap a spawned child immediately after `spawn()`; call
/// `disarm()` once it has exited normally.
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn child_mut(&mut self) -> &mut Child {
        self.child.as_mut().expect("child present while guard is armed")
    }

    fn disarm(&mut self) {
        self.child = None;
    }

    /// Send SIGTERM, wait up to `grace`, then escalate to SIGKILL if the
    /// process is still running.
    async fn terminate_with_grace(&mut self, grace: Duration) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        send_signal(child, TermSignal::Term);
        if timeout(grace, child.wait()).await.is_err() {
            send_signal(child, TermSignal::Kill);
            let _ = child.wait().await;
        }
        self.disarm();
    }
}

#[derive(Debug, Clone, Copy)]
enum TermSignal {
    Term,
    Kill,
}

fn send_signal(child: &mut Child, signal: TermSignal) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            let sig = match signal {
                TermSignal::Term => libc::SIGTERM,
                TermSignal::Kill => libc::SIGKILL,
            };
            unsafe {
                if libc::killpg(pid as i32, sig) == -1 {
                    let _ = child.start_kill();
                }
            }
        }
    }
    #[cfg(windows)]
    {
        let _ = signal;
        let _ = child.start_kill();
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        send_signal(child, TermSignal::Kill);
        let _ = child.try_wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn process_executor_captures_stdout_and_exit_code() {
        let executor = ProcessExecutor;
        let output = executor
            .execute("echo", &["hello".to_string()], None, &HashMap::new(), None)
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.exit_code, 0);
    }

    #[tokio::test]
    async fn nonzero_exit_code_is_captured_not_an_error() {
        let executor = ProcessExecutor;
        let output = executor
            .execute(
                "sh",
                &["-c".to_string(), "exit 7".to_string()],
                None,
                &HashMap::new(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(output.exit_code, 7);
    }

    #[tokio::test]
    async fn working_dir_is_passed_to_the_spawned_process() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let executor = ProcessExecutor;
        let output = executor
            .execute(
                "pwd",
                &[],
                Some(canonical.to_str().unwrap()),
                &HashMap::new(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), canonical.to_str().unwrap());
    }

    #[tokio::test]
    async fn timeout_terminates_long_running_process() {
        let executor = ProcessExecutor;
        let result = executor
            .execute(
                "sleep",
                &["30".to_string()],
                None,
                &HashMap::new(),
                Some(Duration::from_millis(100)),
            )
            .await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::TimedOut);
    }
}
