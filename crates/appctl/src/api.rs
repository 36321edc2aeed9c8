//! Response payloads of the orchestration API.
//!
//! Only the fields the CLI renders are modeled; everything else in a
//! response is ignored on decode.

use serde::{Deserialize, Deserializer};

/// Envelope returned by `GET /apps`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Applications {
    /// Deployed applications.
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: Vec<AppSummary>,
}

/// One entry of [`Applications`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppSummary {
    /// Application identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Current version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Owning user.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
}

/// Envelope returned by `GET /apps/{id}/versions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Versions {
    /// Version strings, oldest first as returned by the API.
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<String>,
}

/// Application definition as returned by show and create.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Application {
    /// Application identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Version of this definition.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Number of instances.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: i64,
    /// Memory per instance in MiB.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mem: f64,
    /// Launch command.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cmd: String,
}

/// Deployment handle returned by update and restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Identifier of the triggered deployment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub deployment_id: String,
    /// Version the deployment rolls out.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

/// Decode an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
