use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    Shard,
    MessageSender,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::gateway::payload::incoming::{MessageCreate, Ready as ReadyPayload};
use twilight_model::id::marker::{ChannelMarker, MessageMarker};
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::{ConnectionStatus, PlatformIntegration};
use crate::services::reply_rules::{self, IncomingMessage, ReplyAction, ReplyConfig};

/// Parses a Discord snowflake given as text.
pub fn parse_channel_id(channel: &str) -> Result<Id<ChannelMarker>, Error> {
    channel
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| Error::Platform(format!("Invalid channel ID: {channel}")))
}

/// The shard runner:
///   - calls `shard.next_event(...)`
///   - runs the reply rules on every non-bot message
///   - executes the resulting actions over HTTP.
async fn shard_runner(
    mut shard: Shard,
    http: Arc<HttpClient>,
    replies: Arc<ReplyConfig>,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        match item {
            Ok(event) => match &event {
                Event::Ready(ready) => {
                    let data: &ReadyPayload = ready.as_ref();
                    info!(
                        "Shard {shard_id} => READY as {} (ID={})",
                        data.user.name, data.user.id
                    );
                }
                Event::MessageCreate(msg_create) => {
                    let msg: &MessageCreate = msg_create;
                    if msg.author.bot {
                        debug!("Ignoring bot message from {}", msg.author.name);
                        continue;
                    }

                    let incoming = IncomingMessage {
                        author_id: msg.author.id.to_string(),
                        author_is_bot: msg.author.bot,
                        content: msg.content.clone(),
                    };
                    let actions = {
                        let mut rng = rand::rng();
                        reply_rules::evaluate(&incoming, &replies, &mut rng)
                    };

                    if !actions.is_empty() {
                        debug!(
                            "Message {} from {} => {} reply action(s)",
                            msg.id, msg.author.name, actions.len()
                        );
                        run_actions(&http, msg.channel_id, msg.id, actions).await;
                    }
                }
                _ => {
                    trace!("Shard {shard_id} => unhandled event: {event:?}");
                }
            },
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// Runs actions in order; a failed action is logged and the rest still run.
async fn run_actions(
    http: &HttpClient,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    actions: Vec<ReplyAction>,
) {
    for action in actions {
        match action {
            ReplyAction::Reply(text) => {
                if let Err(e) = http
                    .create_message(channel_id)
                    .content(&text)
                    .reply(message_id)
                    .await
                {
                    warn!("Failed to reply in channel {channel_id}: {e:?}");
                }
            }
            ReplyAction::React(emoji) => {
                let reaction = RequestReactionType::Unicode { name: &emoji };
                if let Err(e) = http.create_reaction(channel_id, message_id, &reaction).await {
                    warn!("Failed to react to message {message_id}: {e:?}");
                }
            }
        }
    }
}

/// Discord bot connection: shard runners for inbound messages plus the
/// shared HTTP client used for replies and live notifications.
pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    pub shard_tasks: Vec<JoinHandle<()>>,
    pub shard_senders: Vec<MessageSender>,

    pub http: Option<Arc<HttpClient>>,
    replies: Arc<ReplyConfig>,
}

impl DiscordPlatform {
    pub fn new(token: String, replies: ReplyConfig) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http: None,
            replies: Arc::new(replies),
        }
    }

    /// The HTTP client, available once connected.
    pub fn http(&self) -> Option<Arc<HttpClient>> {
        self.http.clone()
    }
}

/// Connect, build the HTTP client and spawn one shard runner per recommended shard
#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        if self.token.is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build()
        );
        self.http = Some(http_client.clone());

        let config = Config::new(
            self.token.clone(),
            Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT,
        );

        let shards = gateway::create_recommended(&http_client, config, |_, b| b.build())
            .await
            .map_err(|e| {
                self.connection_status = ConnectionStatus::Error(e.to_string());
                Error::Platform(format!("create_recommended error: {e}"))
            })?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let http_for_shard = http_client.clone();
            let replies_for_shard = self.replies.clone();

            let handle = tokio::spawn(async move {
                shard_runner(shard, http_for_shard, replies_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        // Gracefully close shards
        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        // Wait for them
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();
        Ok(())
    }

    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error> {
        Ok(self.connection_status.clone())
    }
}
