//! Executor shared by every application command.

use std::io::Write;

use tracing::debug;

use super::Action;
use crate::client::Transport;
use crate::error::CliError;
use crate::output::Formatter;

/// Runs an [`Action`] against a transport and writes the rendered result.
pub struct AppCommand<'a, T: ?Sized> {
    transport: &'a T,
    formatter: &'a Formatter,
}

impl<'a, T> AppCommand<'a, T>
where
    T: Transport + ?Sized,
{
    /// Creates a new command executor.
    #[must_use]
    pub const fn new(transport: &'a T, formatter: &'a Formatter) -> Self {
        Self {
            transport,
            formatter,
        }
    }

    /// Executes `action` with its positional `args`.
    ///
    /// Exactly one request is sent. Nothing is written unless the request
    /// succeeds, the status is accepted and the body renders.
    ///
    /// # Errors
    ///
    /// Returns an error on a wrong argument count, an unreadable document
    /// file, a transport failure, a rejected status code, or an undecodable
    /// body.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        action: Action,
        args: &[String],
    ) -> Result<(), CliError> {
        let request = action.request(self.transport, args)?;
        debug!(%action, method = %request.method, path = %request.path, "Executing");

        let response = self.transport.send(request)?;
        action.check_status(response.status)?;

        let text = self
            .formatter
            .format(response.body, |body| action.humanize(body))?;
        writeln!(out, "{text}")?;
        Ok(())
    }
}

/// Fake transport for testing: records requests and answers with a canned
/// response.
#[cfg(test)]
pub struct FakeTransport {
    status: u16,
    body: String,
    fail: bool,
    requests: std::cell::RefCell<Vec<crate::client::Request>>,
}

#[cfg(test)]
impl FakeTransport {
    /// Create a fake that answers every request with `status` and `body`.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            fail: false,
            requests: std::cell::RefCell::new(Vec::new()),
        }
    }

    /// Create a fake whose sends always fail.
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::new(0, "")
        }
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<crate::client::Request> {
        self.requests.borrow().clone()
    }
}

#[cfg(test)]
impl Transport for FakeTransport {
    fn send(
        &self,
        request: crate::client::Request,
    ) -> Result<crate::client::Response, CliError> {
        self.requests.borrow_mut().push(request);
        if self.fail {
            return Err(CliError::Transport("connection refused".into()));
        }
        Ok(crate::client::Response::new(
            self.status,
            std::io::Cursor::new(self.body.clone().into_bytes()),
        ))
    }
}
