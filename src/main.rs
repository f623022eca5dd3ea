mod api;
mod commands;
mod gateway;

use clap::{Parser, Subcommand};
use matdev_autoreact::{classify, score, ReactionEngine};
use matdev_channels::{BridgeChannel, ConsoleChannel};
use matdev_core::{config, traits::Channel};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "matdev",
    version,
    about = "MATDEV: WhatsApp bot with sentiment auto-reactions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "MATDEV_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show config and auto-react settings.
    Status,
    /// Classify a text and print the reaction it would get.
    Classify {
        /// The text to classify.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

/// Install the global subscriber: stderr always, plus a daily log file when
/// `log_dir` is given. The returned guard must live as long as the process.
fn init_tracing(level: &str, log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, "matdev.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().with_ansi(false).with_writer(writer)),
                    Some(guard),
                )
            }
            Err(e) => {
                eprintln!("cannot create log dir {}: {e}", dir.display());
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    match cli.command {
        Commands::Start => {
            let log_dir = PathBuf::from(config::shellexpand(&cfg.matdev.data_dir)).join("logs");
            let _log_guard = init_tracing(&cfg.matdev.log_level, Some(log_dir));

            // Build channels.
            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

            if let Some(ref console) = cfg.channel.console {
                if console.enabled {
                    let channel = ConsoleChannel::new(console.clone());
                    channels.insert("console".to_string(), Arc::new(channel));
                }
            }

            if let Some(ref bridge) = cfg.channel.bridge {
                if bridge.enabled {
                    if bridge.base_url.trim().is_empty() {
                        anyhow::bail!(
                            "Bridge is enabled but base_url is empty. Set it in [channel.bridge]."
                        );
                    }
                    let channel = BridgeChannel::new(bridge.clone());
                    channels.insert("bridge".to_string(), Arc::new(channel));
                }
            }

            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in config.toml.");
            }

            let engine = Arc::new(ReactionEngine::new(
                cfg.autoreact,
                Some(cli.config.clone()),
            ));

            println!("{}: starting...", cfg.matdev.name);
            let gw = Arc::new(gateway::Gateway::new(
                channels,
                engine,
                cfg.commands.clone(),
                cfg.api.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            init_tracing(&cfg.matdev.log_level, None);
            let ar = &cfg.autoreact;
            println!("{}: status\n", cfg.matdev.name);
            println!("Config: {}", cli.config);
            println!("Data dir: {}", config::shellexpand(&cfg.matdev.data_dir));
            println!();
            println!(
                "  message reactions: {} (delay: {})",
                if ar.message_reactions { "on" } else { "off" },
                ar.message_delay.as_str()
            );
            println!(
                "  status reactions:  {} (delay: {})",
                if ar.status_reactions { "on" } else { "off" },
                ar.status_delay.as_str()
            );
            println!("  ledger sweep:      every {}h", ar.ledger_sweep_hours);
            println!();

            let console = match cfg.channel.console {
                Some(ref c) if c.enabled => "enabled",
                Some(_) => "disabled",
                None => "not configured",
            };
            println!("  console: {console}");
            match cfg.channel.bridge {
                Some(ref b) if b.enabled => println!("  bridge: enabled ({})", b.base_url),
                Some(_) => println!("  bridge: disabled"),
                None => println!("  bridge: not configured"),
            }
            if cfg.api.enabled {
                println!("  api: {}:{}", cfg.api.host, cfg.api.port);
            } else {
                println!("  api: disabled");
            }
        }
        Commands::Classify { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: matdev classify <text>");
            }
            let text = text.join(" ");
            let Some(mood) = classify(&text) else {
                anyhow::bail!("nothing to classify");
            };
            println!("{} {}", mood.glyph(), mood.as_str());
            println!("{}", commands::format_score(&score(&text)));
        }
    }

    Ok(())
}
