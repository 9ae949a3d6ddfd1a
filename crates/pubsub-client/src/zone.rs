//! Pub-sub zone in a multi-site topology.
//!
//! The pub-sub capability is provisioned as a zone of tier type `pubsub`. Such
//! a zone is read-only and never owns bucket data, only notification
//! configuration and event queues. Zone creation itself belongs to the
//! multi-site tooling and is reached through [`ZoneCommandRunner`].

use serde_json::Value;
use tracing::info;

use crate::error::ClientResult;
use crate::resource::validate_name;

/// Tier type of a pub-sub zone.
pub const PUBSUB_TIER_TYPE: &str = "pubsub";

/// Properties every zone variant exposes to multi-site tooling.
pub trait Zone {
    /// Zone name.
    fn name(&self) -> &str;

    /// Tier type passed to the zone-creation command, if any.
    fn tier_type(&self) -> Option<&str> {
        None
    }

    /// Whether clients may write objects through this zone.
    fn is_read_only(&self) -> bool {
        false
    }

    /// Whether this zone stores bucket data.
    fn has_buckets(&self) -> bool {
        true
    }
}

/// Runs zone-management commands against a cluster and returns their
/// structured (JSON) output.
pub trait ZoneCommandRunner {
    /// Handle to the cluster the command runs against.
    type Cluster: ?Sized;

    /// Run `zone <command> <args...>` for `zone` on `cluster`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Zone`](crate::ClientError::Zone) when the
    /// command fails or its output is not JSON.
    fn json_command(
        &self,
        cluster: &Self::Cluster,
        zone: &str,
        command: &str,
        args: &[String],
    ) -> ClientResult<Value>;
}

/// A zone of tier type `pubsub`.
#[derive(Debug, Clone)]
pub struct PubSubZone<R> {
    name: String,
    runner: R,
}

impl<R: ZoneCommandRunner> PubSubZone<R> {
    /// A pub-sub zone named `name`, managed through `runner`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if `name` is blank.
    pub fn new(name: impl Into<String>, runner: R) -> ClientResult<Self> {
        let name = name.into();
        validate_name("zone", &name)?;
        Ok(Self { name, runner })
    }

    /// Create the zone on `cluster` with `--tier-type pubsub` appended to `args`.
    pub fn create(
        &self,
        cluster: &R::Cluster,
        args: impl IntoIterator<Item = String>,
    ) -> ClientResult<Value> {
        let mut args: Vec<String> = args.into_iter().collect();
        args.push("--tier-type".to_owned());
        args.push(PUBSUB_TIER_TYPE.to_owned());

        info!(zone = %self.name, ?args, "creating pub-sub zone");
        self.runner
            .json_command(cluster, &self.name, "create", &args)
    }
}

impl<R> Zone for PubSubZone<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier_type(&self) -> Option<&str> {
        Some(PUBSUB_TIER_TYPE)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn has_buckets(&self) -> bool {
        false
    }
}
