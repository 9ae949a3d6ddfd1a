//! Subcommands and their execution against a [`PubSubClient`].

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pubsub_client::{ConfigReply, PubSubClient, RawResponse, ResourceClient};
use pubsub_xml::NotificationConfiguration;

/// Resource to operate on.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage topics
    #[command(subcommand)]
    Topic(TopicCommand),

    /// Manage native bucket notifications
    #[command(subcommand)]
    Notification(NotificationCommand),

    /// Manage pull subscriptions and their events
    #[command(subcommand)]
    Subscription(SubscriptionCommand),

    /// Manage S3-compatible bucket notifications
    #[command(subcommand)]
    S3Notification(S3NotificationCommand),
}

/// Push endpoint flags shared by topics and subscriptions.
#[derive(Debug, Args)]
pub struct EndpointArgs {
    /// Push endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Pre-encoded endpoint arguments appended to the query (`k=v&k2=v2`)
    #[arg(long, requires = "endpoint")]
    endpoint_args: Option<String>,
}

/// Topic operations.
#[derive(Debug, Subcommand)]
pub enum TopicCommand {
    /// Create a topic
    Set {
        /// Topic name
        name: String,
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Read a topic
    Get {
        /// Topic name
        name: String,
    },
    /// Delete a topic
    Del {
        /// Topic name
        name: String,
    },
    /// List all topics
    List,
}

/// Native notification operations.
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Bind a bucket to a topic
    Set {
        /// Bucket name
        bucket: String,
        /// Topic name
        topic: String,
        /// Comma-separated event filter; all events when omitted
        #[arg(long, default_value = "")]
        events: String,
    },
    /// Read every notification of a bucket
    Get {
        /// Bucket name
        bucket: String,
        /// Topic name
        topic: String,
    },
    /// Remove a bucket-topic binding
    Del {
        /// Bucket name
        bucket: String,
        /// Topic name
        topic: String,
        /// Comma-separated event filter
        #[arg(long, default_value = "")]
        events: String,
    },
}

/// Subscription operations.
#[derive(Debug, Subcommand)]
pub enum SubscriptionCommand {
    /// Create a subscription on a topic
    Set {
        /// Subscription name
        name: String,
        /// Topic name
        topic: String,
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Read a subscription
    Get {
        /// Subscription name
        name: String,
        /// Topic name
        topic: String,
    },
    /// Delete a subscription
    Del {
        /// Subscription name
        name: String,
        /// Topic name
        topic: String,
        /// Address the deletion by topic instead of by name alone
        #[arg(long)]
        by_topic: bool,
    },
    /// Pull pending events
    Events {
        /// Subscription name
        name: String,
        /// Topic name
        topic: String,
        /// Maximum number of events to return
        #[arg(long)]
        max_entries: Option<u32>,
        /// Resume after this marker
        #[arg(long)]
        marker: Option<String>,
    },
    /// Acknowledge one event
    Ack {
        /// Subscription name
        name: String,
        /// Topic name
        topic: String,
        /// Event id
        event_id: String,
    },
}

/// S3-compatible notification operations.
#[derive(Debug, Subcommand)]
pub enum S3NotificationCommand {
    /// Create a notification through the S3 API
    Set {
        /// Bucket name
        bucket: String,
        /// Notification id
        id: String,
        /// Topic ARN
        topic_arn: String,
        /// Event type, may be repeated
        #[arg(long = "event")]
        events: Vec<String>,
    },
    /// Read one notification, or every notification with `--all`
    Get {
        /// Bucket name
        bucket: String,
        /// Notification id
        id: String,
        /// Read the whole bucket configuration
        #[arg(long)]
        all: bool,
    },
    /// Delete one notification, or every notification with `--all`
    Del {
        /// Bucket name
        bucket: String,
        /// Notification id
        id: String,
        /// Delete the whole bucket configuration
        #[arg(long)]
        all: bool,
    },
}

/// Human-readable result of one command.
#[derive(Debug)]
pub struct Outcome {
    /// HTTP status line, e.g. `200 OK`.
    pub status: String,
    /// Response body or rendered configuration.
    pub body: String,
}

impl From<RawResponse> for Outcome {
    fn from(response: RawResponse) -> Self {
        Self {
            status: response.status.to_string(),
            body: response.body_text(),
        }
    }
}

fn configuration_outcome(reply: &ConfigReply<NotificationConfiguration>) -> Result<Outcome> {
    let body = match &reply.output {
        Some(output) => {
            serde_json::to_string_pretty(output).context("rendering notification configuration")?
        }
        None => String::new(),
    };
    Ok(Outcome {
        status: reply.status.to_string(),
        body,
    })
}

fn with_endpoint<T>(
    client: T,
    args: EndpointArgs,
    attach: impl FnOnce(T, String, Option<String>) -> T,
) -> T {
    match args.endpoint {
        Some(url) => attach(client, url, args.endpoint_args),
        None => client,
    }
}

/// Run `command` and describe what the gateway answered.
pub async fn run(client: &PubSubClient, command: Command) -> Result<Outcome> {
    let outcome: Outcome = match command {
        Command::Topic(cmd) => match cmd {
            TopicCommand::Set { name, endpoint } => {
                let topic = with_endpoint(client.topic(name)?, endpoint, |t, url, args| {
                    t.with_endpoint(url, args)
                });
                topic.set_config().await?.into()
            }
            TopicCommand::Get { name } => client.topic(name)?.get_config().await?.into(),
            TopicCommand::Del { name } => client.topic(name)?.del_config().await?.into(),
            TopicCommand::List => client.list_topics().await?.into(),
        },
        Command::Notification(cmd) => match cmd {
            NotificationCommand::Set {
                bucket,
                topic,
                events,
            } => {
                client
                    .notification(bucket, topic, &events)?
                    .set_config()
                    .await?
                    .into()
            }
            NotificationCommand::Get { bucket, topic } => {
                client
                    .notification(bucket, topic, "")?
                    .get_config()
                    .await?
                    .into()
            }
            NotificationCommand::Del {
                bucket,
                topic,
                events,
            } => {
                client
                    .notification(bucket, topic, &events)?
                    .del_config()
                    .await?
                    .into()
            }
        },
        Command::Subscription(cmd) => run_subscription(client, cmd).await?,
        Command::S3Notification(cmd) => match cmd {
            S3NotificationCommand::Set {
                bucket,
                id,
                topic_arn,
                events,
            } => {
                let reply = client
                    .s3_notification(bucket, id, topic_arn, events)?
                    .set_config()
                    .await?;
                Outcome {
                    status: reply.status.to_string(),
                    body: String::new(),
                }
            }
            S3NotificationCommand::Get { bucket, id, all } => {
                let reply = client
                    .s3_notification(bucket, id, "", Vec::new())?
                    .get_config(all)
                    .await?;
                configuration_outcome(&reply)?
            }
            S3NotificationCommand::Del { bucket, id, all } => {
                client
                    .s3_notification(bucket, id, "", Vec::new())?
                    .del_config(all)
                    .await?
                    .into()
            }
        },
    };
    Ok(outcome)
}

async fn run_subscription(client: &PubSubClient, cmd: SubscriptionCommand) -> Result<Outcome> {
    let outcome: Outcome = match cmd {
        SubscriptionCommand::Set {
            name,
            topic,
            endpoint,
        } => {
            let sub = with_endpoint(
                client.subscription(name, topic)?,
                endpoint,
                |s, url, args| s.with_endpoint(url, args),
            );
            sub.set_config().await?.into()
        }
        SubscriptionCommand::Get { name, topic } => {
            client.subscription(name, topic)?.get_config().await?.into()
        }
        SubscriptionCommand::Del {
            name,
            topic,
            by_topic,
        } => {
            let sub = client.subscription(name, topic)?;
            if by_topic {
                sub.del_config_for_topic().await?.into()
            } else {
                sub.del_config().await?.into()
            }
        }
        SubscriptionCommand::Events {
            name,
            topic,
            max_entries,
            marker,
        } => {
            client
                .subscription(name, topic)?
                .get_events(max_entries, marker.as_deref())
                .await?
                .into()
        }
        SubscriptionCommand::Ack {
            name,
            topic,
            event_id,
        } => {
            client
                .subscription(name, topic)?
                .ack_events(&event_id)
                .await?
                .into()
        }
    };
    Ok(outcome)
}
