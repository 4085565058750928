//! `bd`: bot detector rule engine from the command line.
//!
//! Usage:
//!   bd check --rules rules.official.json --players playerlist.official.json --name "(1)bot"
//!   bd hash-avatar avatar.jpg
//!   bd voice-ban dump voice_ban.dt
//!   bd voice-ban export --players playerlist.official.json --tf2-dir ~/tf2/tf

use anyhow::{Context, Result};
use bd_cli::{check, dump_voice_bans, hash_avatar_file, load_engine, CheckQuery, ListFiles};
use bd_rules::EngineConfig;
use bd_types::SteamId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "bd")]
#[command(about = "Match players against bot detector rule and player lists")]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match a player against the given lists and print the results as JSON
    Check {
        #[command(flatten)]
        lists: ListArgs,

        /// Steam id in any common form
        #[arg(long)]
        steam_id: Option<SteamId>,

        /// Player name
        #[arg(long)]
        name: Option<String>,

        /// Chat message
        #[arg(long)]
        message: Option<String>,

        /// Avatar image file
        #[arg(long)]
        avatar: Option<PathBuf>,
    },

    /// Print the digest avatar rules compare against
    HashAvatar {
        /// Avatar image file
        file: PathBuf,
    },

    /// Read or write the game's voice ban file
    #[command(subcommand)]
    VoiceBan(VoiceBanCommand),
}

#[derive(Subcommand, Debug)]
enum VoiceBanCommand {
    /// Print every Steam id in a voice ban file
    Dump {
        /// Path to voice_ban.dt
        file: PathBuf,
    },

    /// Write the newest tagged players into the game's voice ban file
    Export {
        #[command(flatten)]
        lists: ListArgs,

        /// Game directory holding voice_ban.dt
        #[arg(long)]
        tf2_dir: PathBuf,

        /// Attributes that get a player voice banned
        #[arg(long = "tag", default_value = "cheater")]
        tags: Vec<String>,

        /// Maximum number of players written
        #[arg(long, default_value_t = EngineConfig::default().voice_ban_limit)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Rule list files
    #[arg(long = "rules")]
    rules: Vec<PathBuf>,

    /// Player list files
    #[arg(long = "players")]
    players: Vec<PathBuf>,

    /// Previously exported local player list
    #[arg(long)]
    local: Option<PathBuf>,
}

impl From<ListArgs> for ListFiles {
    fn from(args: ListArgs) -> Self {
        Self {
            rules: args.rules,
            players: args.players,
            local: args.local,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Check {
            lists,
            steam_id,
            name,
            message,
            avatar,
        } => {
            let engine = load_engine(&lists.into(), EngineConfig::default())?;
            let query = CheckQuery {
                steam_id,
                name,
                message,
                avatar,
            };
            let report = check(&engine, &query)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to encode results")?
            );
            // Exit status 1 when nothing matched, like grep.
            if report.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::HashAvatar { file } => {
            println!("{}", hash_avatar_file(&file)?);
        }
        Command::VoiceBan(VoiceBanCommand::Dump { file }) => {
            for steam_id in dump_voice_bans(&file)? {
                println!("{}", steam_id.steam3());
            }
        }
        Command::VoiceBan(VoiceBanCommand::Export {
            lists,
            tf2_dir,
            tags,
            limit,
        }) => {
            let config = EngineConfig {
                voice_ban_limit: limit,
                ..EngineConfig::default()
            };
            let engine = load_engine(&lists.into(), config)?;
            let written = engine
                .export_voice_bans(&tf2_dir, &tags)
                .with_context(|| format!("Failed to export voice bans to {}", tf2_dir.display()))?;
            info!(count = written, "Voice ban export finished");
        }
    }

    Ok(ExitCode::SUCCESS)
}
