//! External-process backend using an Apache Tika server
//!
//! `load` spawns `java -jar <tika-server.jar>` and waits until the server
//! answers on its HTTP endpoint; the JAR is a separately provisioned
//! artifact (config `tika_jar`, env `TIKA_JAR`). `parse` uploads the
//! document to `/tika` and takes the plain-text response. There is no
//! startup timeout: the readiness loop fails only if the child process
//! exits, otherwise a hung server hangs the run.

use crate::backend::{Backend, ParsedDocument};
use crate::config::BenchConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr, Command};
use tokio::task::JoinHandle;

const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Largest amount of startup log output kept for error reporting
const STDERR_CAPTURE_LIMIT: usize = 64 * 1024;

/// Read the child's stderr to the end, keeping a bounded prefix
///
/// Draining must start at spawn time: a server that logs more than one pipe
/// buffer before binding its port would otherwise block on the stderr write
/// and never become ready.
fn spawn_stderr_drain(mut stderr: ChildStderr) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut captured = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            match stderr.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(read) => {
                    if captured.len() < STDERR_CAPTURE_LIMIT {
                        let take = read.min(STDERR_CAPTURE_LIMIT - captured.len());
                        captured.extend_from_slice(&chunk[..take]);
                    }
                }
            }
        }
        String::from_utf8_lossy(&captured).into_owned()
    })
}

/// Tika-server-backed extraction variant
pub struct TikaBackend {
    jar: PathBuf,
    port: u16,
    client: reqwest::Client,
    server: Option<Child>,
}

impl TikaBackend {
    pub const NAME: &'static str = "tika-server";

    /// Create the variant without spawning anything yet
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            jar: config.tika_jar.clone(),
            port: config.tika_port,
            client: reqwest::Client::new(),
            server: None,
        }
    }

    fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}/tika", self.port)
    }

    fn load_error(&self, message: impl Into<String>) -> Error {
        Error::Load {
            backend: Self::NAME.to_string(),
            message: message.into(),
        }
    }

    fn parse_error(&self, file: &Path, message: impl Into<String>) -> Error {
        Error::Parse {
            backend: Self::NAME.to_string(),
            file: file.to_path_buf(),
            message: message.into(),
        }
    }

    /// Poll the server endpoint until it answers, failing if the child exits
    async fn wait_until_ready(&self, child: &mut Child, stderr_capture: Option<JoinHandle<String>>) -> Result<()> {
        loop {
            if let Some(status) = child.try_wait().map_err(Error::Io)? {
                let mut message = format!("Tika server exited during startup with {status}");
                if let Some(capture) = stderr_capture {
                    if let Ok(captured) = capture.await {
                        if !captured.trim().is_empty() {
                            message.push_str(&format!("\nstderr: {}", captured.trim()));
                        }
                    }
                }
                return Err(self.load_error(message));
            }

            match self.client.get(self.endpoint()).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                _ => tokio::time::sleep(READINESS_POLL_INTERVAL).await,
            }
        }
    }
}

#[async_trait(?Send)]
impl Backend for TikaBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn load(&mut self) -> Result<()> {
        if !self.jar.exists() {
            return Err(self.load_error(format!(
                "Tika server JAR not found: {} (download from https://archive.apache.org/dist/tika/, or set TIKA_JAR)",
                self.jar.display()
            )));
        }

        let java = which::which("java").map_err(|e| self.load_error(format!("Java runtime not found: {e}")))?;

        let mut child = Command::new(java)
            .arg("-jar")
            .arg(&self.jar)
            .arg("--port")
            .arg(self.port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.load_error(format!("failed to spawn Tika server: {e}")))?;

        // The drain task keeps consuming log output after startup too, so
        // the pipe never backs up.
        let stderr_capture = child.stderr.take().map(spawn_stderr_drain);

        self.wait_until_ready(&mut child, stderr_capture).await?;

        self.server = Some(child);
        Ok(())
    }

    async fn parse(&mut self, path: &Path) -> Result<ParsedDocument> {
        if self.server.is_none() {
            return Err(self.parse_error(path, "parse called before load"));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| self.parse_error(path, format!("failed to read document: {e}")))?;

        let response = self
            .client
            .put(self.endpoint())
            .header(reqwest::header::ACCEPT, "text/plain")
            .body(bytes)
            .send()
            .await
            .map_err(|e| self.parse_error(path, format!("request to Tika server failed: {e}")))?;

        if !response.status().is_success() {
            return Err(self.parse_error(path, format!("Tika server answered {}", response.status())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.parse_error(path, format!("failed to read Tika response: {e}")))?;

        let mut parsed = ParsedDocument::new();
        parsed.push_text("text", text);

        Ok(parsed)
    }
}

impl Drop for TikaBackend {
    fn drop(&mut self) {
        if let Some(server) = self.server.as_mut() {
            let _ = server.start_kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backend_name() {
        let backend = TikaBackend::new(&BenchConfig::default());
        assert_eq!(backend.name(), "tika-server");
    }

    #[tokio::test]
    async fn test_load_fails_when_jar_is_missing() {
        let tmp = TempDir::new().unwrap();
        let config = BenchConfig {
            tika_jar: tmp.path().join("no-such-tika-server.jar"),
            ..Default::default()
        };

        let mut backend = TikaBackend::new(&config);
        let err = backend.load().await.unwrap_err();

        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("JAR not found"));
    }

    #[tokio::test]
    async fn test_parse_before_load_is_rejected() {
        let mut backend = TikaBackend::new(&BenchConfig::default());
        let err = backend.parse(Path::new("missing.pdf")).await.unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("before load"));
    }

    /// Answers every connection with an empty 200 so the readiness loop can
    /// succeed without a real Tika server.
    async fn ok_endpoint() -> u16 {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;
                let _ = socket.write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n").await;
            }
        });

        port
    }

    #[tokio::test]
    async fn test_noisy_startup_logs_do_not_stall_readiness() {
        let config = BenchConfig {
            tika_port: ok_endpoint().await,
            ..Default::default()
        };
        let backend = TikaBackend::new(&config);

        // Writes a full megabyte to stderr before idling, far more than one
        // pipe buffer; without the spawn-time drain this never comes up.
        let mut child = Command::new("sh")
            .arg("-c")
            .arg("head -c 1048576 /dev/zero | tr '\\0' 'x' 1>&2; sleep 30")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let capture = child.stderr.take().map(spawn_stderr_drain);

        let ready = tokio::time::timeout(
            Duration::from_secs(10),
            backend.wait_until_ready(&mut child, capture),
        )
        .await;

        let _ = child.start_kill();
        assert!(matches!(ready, Ok(Ok(()))), "readiness stalled behind startup logs");
    }

    #[tokio::test]
    async fn test_exit_during_startup_reports_captured_stderr() {
        // A port nothing listens on, so readiness can only fail.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = BenchConfig {
            tika_port: port,
            ..Default::default()
        };
        let backend = TikaBackend::new(&config);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg("echo boom 1>&2; exit 3")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let capture = child.stderr.take().map(spawn_stderr_drain);

        let err = backend.wait_until_ready(&mut child, capture).await.unwrap_err();

        assert!(matches!(err, Error::Load { .. }));
        let message = err.to_string();
        assert!(message.contains("exited during startup"));
        assert!(message.contains("boom"));
    }
}
