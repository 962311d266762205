// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Completion-signaled byte acquisition.
//!
//! The fetch runs on a worker thread and hands the finished buffer over a
//! bounded channel of capacity one. Receiving from that channel is the
//! completion signal: a buffer is only ever observed whole.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use tracing::debug;

use super::source::FeedSource;
use crate::core::{CodecError, Result};
use crate::encoding::protobuf::{DecodeReport, ProtobufDecoder};
use crate::schema::SchemaNode;

/// A fetch in progress.
pub struct PendingFeed {
    receiver: Receiver<Result<Vec<u8>>>,
    source: String,
}

/// Start fetching from `source` on a worker thread.
///
/// The worker is detached and cannot be cancelled. It runs until
/// `FeedSource::fetch` returns, even if every waiter has given up; a buffer
/// that arrives after that is dropped and the thread exits. Sources that may
/// block indefinitely must enforce their own deadline, or each timed-out
/// fetch keeps one thread alive.
pub fn spawn_fetch<S>(mut source: S) -> PendingFeed
where
    S: FeedSource + 'static,
{
    let (sender, receiver) = bounded(1);
    let description = source.describe();

    thread::spawn(move || {
        let result = source.fetch();
        // The receiver may already be gone after a timeout.
        let _ = sender.send(result);
    });

    PendingFeed {
        receiver,
        source: description,
    }
}

impl PendingFeed {
    /// Origin of the bytes being fetched.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check whether the buffer has arrived, without blocking.
    pub fn is_ready(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Block until the fetch completes.
    pub fn wait(self) -> Result<Vec<u8>> {
        let result = self.receiver.recv().map_err(|_| self.closed())?;
        self.complete(result)
    }

    /// Block until the fetch completes or `timeout` elapses.
    ///
    /// On timeout the worker keeps running until its source returns; see
    /// [`spawn_fetch`].
    pub fn wait_timeout(self, timeout: Duration) -> Result<Vec<u8>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => self.complete(result),
            Err(RecvTimeoutError::Timeout) => Err(CodecError::acquisition(format!(
                "{}: no complete buffer after {timeout:?}",
                self.source
            ))),
            Err(RecvTimeoutError::Disconnected) => Err(self.closed()),
        }
    }

    fn complete(&self, result: Result<Vec<u8>>) -> Result<Vec<u8>> {
        let bytes = result?;
        debug!(source = %self.source, bytes = bytes.len(), "feed buffer complete");
        Ok(bytes)
    }

    fn closed(&self) -> CodecError {
        CodecError::acquisition(format!(
            "{}: fetch ended without delivering a buffer",
            self.source
        ))
    }
}

/// Wait for a pending fetch, then decode the complete buffer.
pub fn decode_when_ready(
    pending: PendingFeed,
    decoder: &ProtobufDecoder,
    schema: &SchemaNode,
) -> Result<DecodeReport> {
    let bytes = pending.wait()?;
    decoder.decode_report(&bytes, schema)
}
