//! Application lifecycle actions.
//!
//! Each [`Action`] variant is one API operation. The variant fixes the
//! argument count, the request shape, the accepted status codes and the
//! human-readable rendering; [`AppCommand`](super::AppCommand) drives them
//! all through the same request/check/render sequence.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use tracing::trace;

use crate::api::{Application, Applications, Deployment, Versions};
use crate::client::{Request, Transport};
use crate::columnize::columnize;
use crate::error::CliError;

/// Characters escaped in a path segment: everything but unreserved ones.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Output of a successful destroy in human mode.
pub const DESTROYED: &str = "DESTROYED";

/// An application lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List all applications.
    List,
    /// List the versions of one application.
    Versions,
    /// Show one version of an application.
    Show,
    /// Create an application from a JSON document.
    Create,
    /// Replace an application definition from a JSON document.
    Update,
    /// Restart all instances of an application.
    Restart,
    /// Destroy an application.
    Destroy,
}

/// Which response status codes an action accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any status is rendered.
    Any,
    /// Any status except this one.
    Reject(u16),
    /// Only this status.
    Require(u16),
}

impl StatusPolicy {
    /// Whether `code` passes the policy.
    #[must_use]
    pub const fn accepts(self, code: u16) -> bool {
        match self {
            Self::Any => true,
            Self::Reject(rejected) => code != rejected,
            Self::Require(required) => code == required,
        }
    }
}

impl Action {
    /// Every action, in CLI help order.
    pub const ALL: [Self; 7] = [
        Self::List,
        Self::Versions,
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Restart,
        Self::Destroy,
    ];

    /// Subcommand name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Versions => "versions",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Restart => "restart",
            Self::Destroy => "destroy",
        }
    }

    /// Number of positional arguments the action takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::List => 0,
            Self::Versions | Self::Create | Self::Restart | Self::Destroy => 1,
            Self::Show | Self::Update => 2,
        }
    }

    /// Positional argument synopsis.
    #[must_use]
    pub const fn synopsis(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Versions => "versions <ID>",
            Self::Show => "show <ID> <VERSION>",
            Self::Create => "create <FILE>",
            Self::Update => "update <ID> <FILE>",
            Self::Restart => "restart <ID>",
            Self::Destroy => "destroy <ID>",
        }
    }

    /// Accepted response status codes.
    #[must_use]
    pub const fn status_policy(self) -> StatusPolicy {
        match self {
            Self::List | Self::Versions | Self::Show | Self::Restart => StatusPolicy::Any,
            Self::Create => StatusPolicy::Reject(409),
            // The API documents 204 for delete, but a successful delete is
            // only recognized as 200.
            Self::Update | Self::Destroy => StatusPolicy::Require(200),
        }
    }

    /// Validate `args` and build the action's request.
    ///
    /// Create and update read their document file here; the file is closed
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] on a wrong argument count (before any
    /// I/O), or an IO error if a document file cannot be read.
    pub fn request<T>(self, transport: &T, args: &[String]) -> Result<Request, CliError>
    where
        T: Transport + ?Sized,
    {
        if args.len() != self.arity() {
            return Err(CliError::Usage(format!(
                "{} (expected {} argument(s), got {})",
                self.synopsis(),
                self.arity(),
                args.len()
            )));
        }

        let request = match self {
            Self::List => transport.get("/apps"),
            Self::Versions => transport.get(&format!("/apps/{}/versions", segment(&args[0]))),
            Self::Show => transport.get(&format!(
                "/apps/{}/versions/{}",
                segment(&args[0]),
                segment(&args[1])
            )),
            Self::Create => transport.post("/apps", Some(read_document(&args[0])?)),
            Self::Update => {
                let body = read_document(&args[1])?;
                transport.put(&format!("/apps/{}?force=true", segment(&args[0])), body)
            }
            Self::Restart => {
                transport.post(&format!("/apps/{}/restart?force=true", segment(&args[0])), None)
            }
            Self::Destroy => transport.delete(&format!("/apps/{}", segment(&args[0]))),
        };
        Ok(request)
    }

    /// Check a response status against the action's policy.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Status`] carrying `code` if it is not accepted.
    pub fn check_status(self, code: u16) -> Result<(), CliError> {
        let policy = self.status_policy();
        trace!(action = self.name(), code, ?policy, "Checking status");
        if policy.accepts(code) {
            return Ok(());
        }

        let what = match self {
            Self::Create => "app already exists",
            Self::Update => "update failed",
            Self::Destroy => "destroy failed",
            _ => "unexpected status",
        };
        let reason = match StatusCode::from_u16(code).ok().and_then(|s| s.canonical_reason()) {
            Some(phrase) => format!("{what} ({phrase})"),
            None => what.to_owned(),
        };
        Err(CliError::status(code, reason))
    }

    /// Decode `body` and render it as text.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Decode`] if the body is not the expected JSON.
    pub fn humanize(self, body: &mut dyn Read) -> Result<String, CliError> {
        let text = match self {
            Self::List => render_apps(&serde_json::from_reader::<_, Applications>(body)?),
            Self::Versions => render_versions(&serde_json::from_reader::<_, Versions>(body)?),
            Self::Show => render_application(&serde_json::from_reader::<_, Application>(body)?),
            Self::Create => render_created(&serde_json::from_reader::<_, Application>(body)?),
            Self::Update | Self::Restart => {
                render_deployment(&serde_json::from_reader::<_, Deployment>(body)?)
            }
            Self::Destroy => DESTROYED.to_owned(),
        };
        Ok(text)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percent-encode one path segment.
fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Read a whole JSON document into memory.
fn read_document(path: impl AsRef<Path>) -> Result<Vec<u8>, CliError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open {}: {e}", path.display()),
        ))
    })?;
    let mut body = Vec::new();
    file.read_to_end(&mut body)?;
    Ok(body)
}

fn render_apps(apps: &Applications) -> String {
    let mut text = String::from("APP VERSION USER\n");
    for app in &apps.apps {
        text.push_str(&format!("{} {} {}\n", app.id, app.version, app.user));
    }
    columnize(&text)
}

fn render_versions(versions: &Versions) -> String {
    let mut text = String::from("VERSIONS\n");
    for version in &versions.versions {
        text.push_str(version);
        text.push('\n');
    }
    text
}

fn render_application(app: &Application) -> String {
    columnize(&format!(
        "INSTANCES MEM CMD\n{} {:.2} {}",
        app.instances, app.mem, app.cmd
    ))
}

fn render_created(app: &Application) -> String {
    columnize(&format!("APPID VERSION\n{} {}", app.id, app.version))
}

fn render_deployment(deployment: &Deployment) -> String {
    columnize(&format!(
        "DEPLOYID VERSION\n{} {}",
        deployment.deployment_id, deployment.version
    ))
}
