//! Deterministic in-memory clients for tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use contentlink_shared::{ContentLinkError, Result};

use crate::client::{
    ProbeClient, ProbeRequest, ProbeResponse, ReadClient, ReadRequest, ReadResponse,
};

type ProbeFn = dyn Fn(&ProbeRequest) -> Result<ProbeResponse> + Send + Sync;
type ReadFn = dyn Fn(&ReadRequest) -> Result<ReadResponse> + Send + Sync;

pub(crate) struct StubProbe {
    handler: Box<ProbeFn>,
    calls: AtomicUsize,
}

impl StubProbe {
    pub(crate) fn new(
        handler: impl Fn(&ProbeRequest) -> Result<ProbeResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fixed answers keyed by full URL; anything else is a network error.
    pub(crate) fn routes(routes: &[(&str, u16, Option<&str>)]) -> Self {
        let table: HashMap<String, ProbeResponse> = routes
            .iter()
            .map(|(url, status, location)| {
                (
                    (*url).to_string(),
                    ProbeResponse {
                        status: *status,
                        location: location.map(str::to_owned),
                    },
                )
            })
            .collect();
        Self::new(move |request| {
            table
                .get(request.url.as_str())
                .cloned()
                .ok_or_else(|| ContentLinkError::Network(format!("{}: unreachable", request.url)))
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbeClient for StubProbe {
    async fn probe(&self, request: ProbeRequest) -> Result<ProbeResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(&request)
    }
}

pub(crate) struct StubRead {
    handler: Box<ReadFn>,
    calls: AtomicUsize,
}

impl StubRead {
    pub(crate) fn new(
        handler: impl Fn(&ReadRequest) -> Result<ReadResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadClient for StubRead {
    async fn get(&self, request: ReadRequest) -> Result<ReadResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(&request)
    }
}

/// Collects formatted log lines emitted on the current thread.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route events to this capture until the guard is dropped. Spawned tasks
    /// are covered on a current-thread runtime.
    pub(crate) fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
