//! Test harness for isolated test execution.
//!
//! `TestHarness` owns a temp directory that input files are written into and
//! read back from, so tests exercise the same path-based loading a caller
//! would. `MockBackend` answers exactly one HTTP request with a canned
//! response and hands the raw request back for inspection.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use spoofscan::config::AnalyzerConfig;
use spoofscan::extractor::InputFile;
use spoofscan::pipeline::{BatchOutcome, BatchPipeline, ProgressEvent, ProgressReporter};
use spoofscan::DocumentAnalyzer;

/// Test harness providing an isolated input directory.
pub struct TestHarness {
    temp_dir: TempDir,
    /// Directory that test files are written into.
    pub input_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input_dir = temp_dir.path().join("input");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input directory");

        Self {
            temp_dir,
            input_dir,
        }
    }

    /// Write a file into the input directory and return its path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.input_dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a file and load it back as an `InputFile`.
    pub fn input(&self, name: &str, contents: impl AsRef<[u8]>) -> InputFile {
        let path = self.write_file(name, contents);
        InputFile::from_path(&path).expect("Failed to load test file")
    }

    /// Run a batch and collect every progress message.
    pub async fn run_batch<A: DocumentAnalyzer>(
        &self,
        pipeline: &BatchPipeline<A>,
        files: Vec<InputFile>,
    ) -> (BatchOutcome, Vec<String>) {
        let progress = CollectingProgress::default();
        let outcome = pipeline.run(files, &progress).await;
        let messages = progress.0.into_inner().expect("progress lock poisoned");
        (outcome, messages)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct CollectingProgress(pub std::sync::Mutex<Vec<String>>);

impl ProgressReporter for CollectingProgress {
    fn report(&self, event: ProgressEvent) {
        self.0
            .lock()
            .expect("progress lock poisoned")
            .push(event.to_string());
    }
}

/// A local HTTP endpoint that serves one canned response.
pub struct MockBackend {
    base_url: String,
    request: oneshot::Receiver<String>,
}

impl MockBackend {
    /// Start listening; the response is sent to the first connection only.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let body = body.into();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
            let _ = tx.send(request);
        });

        Self {
            base_url: format!("http://{}", addr),
            request: rx,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Analyzer config pointing at this backend with short timeouts.
    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            base_url: self.base_url.clone(),
            connect_timeout_secs: 2,
            request_timeout_secs: 5,
            ..AnalyzerConfig::default()
        }
    }

    /// The raw request the backend received, headers and body.
    pub async fn received(self) -> String {
        self.request.await.expect("Mock backend received no request")
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
