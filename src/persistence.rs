use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;
use log::debug;

use crate::error::{PersistenceError, PersistenceResult};

/// File name of the exported gesture classes inside the configured directory
pub const GESTURE_CLASS_FILE: &str = "gestureClasses.json";
/// File name used when saving the drawing as SVG
pub const DRAWING_FILE: &str = "drawing.svg";

/// Capability to write a named blob somewhere.
///
/// Implementations must not block the caller: the outcome is reported
/// through the returned [`ExportTicket`].
pub trait BlobWriter {
    fn write_blob(&self, path: PathBuf, content: String) -> ExportTicket;
}

/// Completion handle of one blob write
#[derive(Debug)]
pub struct ExportTicket {
    rx: oneshot::Receiver<PersistenceResult<()>>,
}

impl ExportTicket {
    /// Create a ticket along with the sender the writer reports on
    pub fn channel() -> (oneshot::Sender<PersistenceResult<()>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A ticket that has already finished with `result`
    pub fn ready(result: PersistenceResult<()>) -> Self {
        let (tx, ticket) = Self::channel();
        let _ = tx.send(result);
        ticket
    }

    /// Check for a result without blocking. `None` while still in flight.
    pub fn try_result(&mut self) -> Option<PersistenceResult<()>> {
        match self.rx.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(PersistenceError::Cancelled)),
        }
    }
}

impl Future for ExportTicket {
    type Output = PersistenceResult<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(Err(PersistenceError::Cancelled)))
    }
}

/// Writes blobs to the local filesystem on a background thread
#[derive(Debug, Clone, Default)]
pub struct FsBlobWriter;

impl FsBlobWriter {
    pub fn new() -> Self {
        Self
    }
}

impl BlobWriter for FsBlobWriter {
    fn write_blob(&self, path: PathBuf, content: String) -> ExportTicket {
        let (tx, ticket) = ExportTicket::channel();
        thread::spawn(move || {
            let result = write_file(&path, content.as_bytes());
            if result.is_ok() {
                debug!("Wrote {} bytes to {}", content.len(), path.display());
            }
            let _ = tx.send(result);
        });
        ticket
    }
}

fn write_file(path: &Path, content: &[u8]) -> PersistenceResult<()> {
    let to_error = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
