//! The device session: owns one backend and drives the status and print
//! protocols over it.
//!
//! All waiting is bounded polling. The backend contract only offers "write"
//! and "try read", so each operation interleaves reads with fixed sleeps up
//! to a retry budget and reports a timeout when the budget runs out. One
//! session per channel; operations are serialized by `&mut self`.

use crate::backend::Backend;
use crate::catalog::{LabelCatalog, LabelSpec, ModelCatalog, ModelSpec};
use crate::error::{Error, Result};
use crate::status::Status;
use crate::values::{Value, media_type, status_type};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Status information request (ESC i S).
const STATUS_REQUEST: [u8; 3] = [0x1B, 0x69, 0x53];

/// Sleep between empty reads.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Read budget for a status query reply.
const STATUS_ATTEMPTS: u32 = 10;

/// Read budget for each print handshake step. Printing is much slower than
/// a status round-trip, so each step gets a larger budget at the same
/// polling interval.
const PRINT_ATTEMPTS: u32 = 250;

/// A prepared raster job: the bytes an external renderer produced, plus the
/// label media they were rendered for.
#[derive(Clone, Debug)]
pub struct PrintJob {
    data: Vec<u8>,
    label: String,
}

impl PrintJob {
    pub fn new(data: Vec<u8>, label: impl Into<String>) -> Self {
        PrintJob {
            data,
            label: label.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Identifier of the label media this job targets.
    pub fn label(&self) -> &str {
        &self.label
    }
}

pub struct Printer<B: Backend> {
    backend: B,
}

impl<B: Backend> Printer<B> {
    /// Take ownership of a backend for the lifetime of this session. The
    /// underlying channel is released when the session drops, on every
    /// exit path.
    pub fn new(backend: B) -> Self {
        Printer { backend }
    }

    /// Request and decode a status reply.
    pub fn status(&mut self) -> Result<Status> {
        self.backend.write(&STATUS_REQUEST)?;
        let data = self.poll(STATUS_ATTEMPTS)?;
        Status::from_bytes(&data)
    }

    /// Resolve the printer's identity and loaded media against the given
    /// catalogs.
    ///
    /// Fails fast with [`Error::Printer`] when the device reports active
    /// errors. A reported media type of "no media" yields `None` for the
    /// label; that is a legitimate state, not an error. An unknown media
    /// geometry or model identifier is a fatal [`Error::Lookup`].
    pub fn info(
        &mut self,
        models: &impl ModelCatalog,
        labels: &impl LabelCatalog,
    ) -> Result<(ModelSpec, Option<LabelSpec>)> {
        let status = self.status()?;

        let errors = status.errors();
        if !errors.is_empty() {
            return Err(Error::Printer(errors));
        }

        let label = if status.media_type().is(&media_type::NO_MEDIA) {
            None
        } else {
            let width = status.media_width_mm();
            let length = status.media_length();
            let spec = labels.find_by_size(width, length).ok_or_else(|| {
                Error::Lookup(format!(
                    "unknown label type: {}mm x {}mm ({})",
                    width,
                    length,
                    status.media_type().description()
                ))
            })?;
            Some(spec.clone())
        };

        let identifier = status.model().description();
        let model = models
            .find(identifier)
            .ok_or_else(|| Error::Lookup(format!("unknown model: {}", identifier)))?
            .clone();

        Ok((model, label))
    }

    /// Send raster data and see the print through to completion.
    ///
    /// A print request is answered three times:
    ///   1. phase change to printing
    ///   2. printing completed
    ///   3. phase change back to ready
    ///
    /// Each reply gets its own polling budget. A reply with active errors
    /// aborts with [`Error::Printer`]; a reply of the wrong status type
    /// aborts with [`Error::Protocol`] and is never retried.
    pub fn print(&mut self, data: &[u8]) -> Result<()> {
        self.backend.write(data)?;
        debug!(bytes = data.len(), "print data sent");

        for expected in [
            &status_type::PHASE_CHANGE,
            &status_type::COMPLETE,
            &status_type::PHASE_CHANGE,
        ] {
            let reply = self.poll(PRINT_ATTEMPTS)?;
            let status = Status::from_bytes(&reply)?;

            let errors = status.errors();
            if !errors.is_empty() {
                return Err(Error::Printer(errors));
            }

            if !status.status_type().is(expected) {
                return Err(Error::Protocol {
                    expected: Value::Known(expected),
                    observed: status.status_type(),
                });
            }
            debug!(step = expected.description, "handshake step confirmed");
        }

        Ok(())
    }

    /// Validate the loaded media against the job's declared label, then
    /// print.
    pub fn print_job(
        &mut self,
        job: &PrintJob,
        models: &impl ModelCatalog,
        labels: &impl LabelCatalog,
    ) -> Result<()> {
        let (_, loaded) = self.info(models, labels)?;
        let loaded = loaded.ok_or_else(|| Error::Lookup("no media loaded".to_string()))?;

        if loaded.identifier != job.label() {
            return Err(Error::Lookup(format!(
                "loaded media \"{}\" does not match job target \"{}\"",
                loaded.identifier,
                job.label()
            )));
        }

        self.print(job.data())
    }

    /// Poll the backend until it yields data, sleeping between empty reads,
    /// up to `attempts` reads.
    fn poll(&mut self, attempts: u32) -> Result<Vec<u8>> {
        for _ in 0..attempts {
            if let Some(data) = self.backend.read()? {
                return Ok(data);
            }
            thread::sleep(POLL_INTERVAL);
        }
        Err(Error::Timeout { attempts })
    }
}
