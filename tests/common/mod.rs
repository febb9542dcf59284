//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a temporary projects directory
//! and folders file and builds a full [`AppContext`] over them. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port
//! for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use tempfile::TempDir;

use fd_core::config::Config;
use fd_server::context::AppContext;
use fd_server::router::build_router;

/// Test harness wrapping an [`AppContext`] rooted in a temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a harness with an empty projects directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let projects = dir.path().join("projects");
        std::fs::create_dir_all(&projects).expect("failed to create projects dir");

        let mut config = Config::default();
        config.library.projects_dir = projects;
        config.library.folders_file = dir.path().join("config").join("folders.json");

        let ctx = AppContext::new(config);
        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn router(&self) -> Router {
        build_router(self.ctx.clone(), None)
    }

    pub fn projects_dir(&self) -> &Path {
        &self.ctx.config.library.projects_dir
    }

    pub fn folders_file(&self) -> &Path {
        &self.ctx.config.library.folders_file
    }

    /// Write `data` to `relative` under the projects directory.
    pub fn write_project_file(&self, relative: &str, data: &[u8]) -> PathBuf {
        write_file(&self.projects_dir().join(relative), data)
    }

    /// Create a directory outside the projects directory, for folder tests.
    pub fn external_dir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join("external").join(name);
        std::fs::create_dir_all(&path).expect("failed to create external dir");
        path
    }
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, data: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(path, data).expect("failed to write file");
    path.to_path_buf()
}

/// Deterministic payload of `len` bytes.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// A minimal project file with a tempo, title and version event.
pub fn flp_bytes(bpm: u16, title: &str, version: &str) -> Vec<u8> {
    let mut events = vec![66];
    events.extend_from_slice(&bpm.to_le_bytes());
    for (id, text) in [(194u8, title), (199u8, version)] {
        events.push(id);
        events.push(text.len() as u8 + 1);
        events.extend_from_slice(text.as_bytes());
        events.push(0);
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(b"FLhd");
    buf.extend_from_slice(&6u32.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&96u16.to_le_bytes());
    buf.extend_from_slice(b"FLdt");
    buf.extend_from_slice(&(events.len() as u32).to_le_bytes());
    buf.extend_from_slice(&events);
    buf
}
