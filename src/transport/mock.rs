//! In-memory transport for tests
//!
//! Every open, write and close lands in a shared [`Journal`] so tests can
//! assert on the exact sequence of link operations.

use crate::transport::traits::{PortOpener, TransportConnector, TransportStream};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Open(String),
    Write(String),
    Close(String),
}

/// Link events, stamped with the tokio clock when they happened
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<(Instant, LinkEvent)>>>);

impl Journal {
    fn push(&self, event: LinkEvent) {
        self.0.lock().unwrap().push((Instant::now(), event));
    }

    pub fn timed(&self) -> Vec<(Instant, LinkEvent)> {
        self.0.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<LinkEvent> {
        self.timed().into_iter().map(|(_, event)| event).collect()
    }

    pub fn writes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LinkEvent::Write(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    pub fn closes(&self, target: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, LinkEvent::Close(t) if t == target))
            .count()
    }
}

pub struct MockStream {
    journal: Journal,
    target: String,
    fail_writes: bool,
}

impl AsyncRead for MockStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.fail_writes {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "link dropped",
            )));
        }
        let data = String::from_utf8_lossy(buf).into_owned();
        self.journal.push(LinkEvent::Write(data));
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl TransportStream for MockStream {
    async fn shutdown(&mut self) -> Result<()> {
        self.journal.push(LinkEvent::Close(self.target.clone()));
        Ok(())
    }
}

/// Connector to a single fake device
#[derive(Clone, Default)]
pub struct MockConnector {
    pub journal: Journal,
    pub refuse: bool,
    pub fail_writes: bool,
}

impl MockConnector {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Default::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl TransportConnector for MockConnector {
    type Stream = MockStream;

    async fn connect(&self) -> Result<Self::Stream> {
        if self.refuse {
            return Err(anyhow!("connection refused"));
        }
        self.journal.push(LinkEvent::Open(self.target()));
        Ok(MockStream {
            journal: self.journal.clone(),
            target: self.target(),
            fail_writes: self.fail_writes,
        })
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn target(&self) -> String {
        "mock-lamp".into()
    }
}

/// Opener for fake device paths; paths in `missing` fail to open
#[derive(Clone, Default)]
pub struct MockOpener {
    pub journal: Journal,
    pub missing: HashSet<String>,
    pub fail_writes: bool,
}

impl MockOpener {
    pub fn with_missing(paths: &[&str]) -> Self {
        Self {
            missing: paths.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PortOpener for MockOpener {
    type Stream = MockStream;

    async fn open(&self, target: &str) -> Result<Self::Stream> {
        if self.missing.contains(target) {
            return Err(anyhow!("No such file or directory: {}", target));
        }
        self.journal.push(LinkEvent::Open(target.into()));
        Ok(MockStream {
            journal: self.journal.clone(),
            target: target.into(),
            fail_writes: self.fail_writes,
        })
    }
}
