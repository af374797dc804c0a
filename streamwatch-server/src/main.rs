use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use streamwatch_common::traits::SystemClock;
use streamwatch_core::Error;
use streamwatch_core::config::{parse_interval, BotConfig};
use streamwatch_core::http::{DefaultHttpClient, HttpClient};
use streamwatch_core::platforms::PlatformIntegration;
use streamwatch_core::platforms::discord::runtime::parse_channel_id;
use streamwatch_core::platforms::discord::{DiscordLiveNotifier, DiscordPlatform};
use streamwatch_core::platforms::twitch::{ClientCredentialsAuthenticator, TokenCache, TwitchHelixClient};
use streamwatch_core::services::{LiveNotifier, LogNotifier};
use streamwatch_core::tasks::{spawn_stream_watch_task, PollerContext, StreamWatcher};

#[derive(Parser, Debug, Clone)]
#[command(name = "streamwatch")]
#[command(author, version, about = "Discord bot that announces when watched Twitch channels go live")]
struct Args {
    /// Poll interval in seconds (overrides POLL_INTERVAL_SECS)
    #[arg(long)]
    poll_interval_secs: Option<String>,

    /// Twitch login to watch; repeat for several (overrides WATCH_STREAMERS)
    #[arg(long = "streamer")]
    streamers: Vec<String>,

    /// Only poll Twitch and log live events; do not connect to Discord
    #[arg(long, default_value = "false")]
    watch_only: bool,
}

fn init_tracing() {
    let _ = tracing_log::LogTracer::init();
    let filter = EnvFilter::from_default_env()
        .add_directive("streamwatch=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenv::dotenv() {
        // Not fatal: plain environment variables work too.
        eprintln!("No .env loaded: {e}");
    }
    init_tracing();
    let args = Args::parse();
    info!("streamwatch starting. watch_only={}", args.watch_only);

    if let Err(e) = run(args).await {
        error!("Fatal: {:?}", e);
        return Err(e.into());
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run(args: Args) -> Result<(), Error> {
    let mut config = BotConfig::from_env()?;
    if let Some(raw) = args.poll_interval_secs.as_deref() {
        config.poll_interval = parse_interval(raw)?;
    }
    if !args.streamers.is_empty() {
        config.streamers = args.streamers.clone();
    }

    // 1) Discord side (or the log-only notifier).
    let mut discord: Option<DiscordPlatform> = None;
    let notifier: Arc<dyn LiveNotifier> = if args.watch_only {
        info!("--watch-only: live events are logged, not posted");
        Arc::new(LogNotifier)
    } else {
        let discord_cfg = config.discord.clone().ok_or_else(|| {
            Error::Config("BOT_TOKEN and DISCORD_CHANNEL_ID must be set (or use --watch-only)".into())
        })?;
        let channel_id = parse_channel_id(&discord_cfg.channel_id)?;

        let mut platform = DiscordPlatform::new(discord_cfg.bot_token, config.replies.clone());
        platform.connect().await?;
        info!("Discord status: {:?}", platform.get_connection_status().await?);
        let http = platform
            .http()
            .ok_or_else(|| Error::Platform("Discord HTTP client missing after connect".into()))?;
        discord = Some(platform);
        Arc::new(DiscordLiveNotifier::new(http, channel_id))
    };

    // 2) Twitch side.
    let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
    let authenticator = ClientCredentialsAuthenticator::new(
        http.clone(),
        config.twitch.client_id.clone(),
        config.twitch.client_secret.clone(),
    )
    .with_token_url(config.twitch.auth_url.clone());
    let tokens = TokenCache::new(Arc::new(authenticator), Arc::new(SystemClock));
    let helix = TwitchHelixClient::new(http, &config.twitch.client_id)
        .with_api_base(&config.twitch.api_base);

    let watcher = StreamWatcher::new(helix, config.streamers.clone(), notifier);
    let watch_handle = spawn_stream_watch_task(
        watcher,
        PollerContext::new(tokens),
        config.poll_interval,
    );

    // 3) Run until Ctrl-C; an in-flight tick is simply dropped.
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("Ctrl-C handler error: {:?}", e);
            }
            info!("Ctrl-C detected; shutting down.");
        }
        res = watch_handle => {
            warn!("Stream watcher task ended unexpectedly: {:?}", res);
        }
    }

    if let Some(mut platform) = discord {
        match tokio::time::timeout(Duration::from_secs(5), platform.disconnect()).await {
            Ok(Ok(())) => info!("Discord disconnected."),
            Ok(Err(e)) => warn!("Discord disconnect error: {:?}", e),
            Err(_) => warn!("Discord disconnect timed out."),
        }
    }

    Ok(())
}
