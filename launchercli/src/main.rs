use anyhow::Result;
use clap::{Parser, Subcommand};
use launcher_core::{CapabilityBridge, Conf, Operation};
use launchercli::{exit_status, write_outcome, DesktopServices};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "launchercli", version, about = "Call the launcher capability bridge from a desktop session")]
struct Cli {
    /// Path to bridge.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Invoke a bridge method by its channel name
    Call {
        method: String,

        /// Where to write image payloads
        #[arg(short, long, default_value = "wallpaper.png")]
        out: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the methods the bridge answers
    Methods,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let conf = match cli.config {
        Some(path) => Conf::load_or_default(path)?,
        None => Conf::new()?,
    };

    match cli.command {
        Command::Methods => {
            println!("channel: {}", conf.bridge.channel);
            for operation in Operation::ALL {
                let capability = operation.capability();
                let permission = capability
                    .permission
                    .map(|p| format!(" permission={} (API {}+)", p.short_name(), p.enforced_from()))
                    .unwrap_or_default();
                let min_sdk = capability
                    .min_sdk
                    .map(|level| format!(" min_sdk={}", level))
                    .unwrap_or_default();
                println!("  {}{}{}", operation, permission, min_sdk);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { method, out, json } => {
            let bridge = CapabilityBridge::new(DesktopServices, conf.bridge);
            let envelope = bridge.handle(&method);
            let report = write_outcome(&method, envelope, &out)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.success {
                println!("{}", report);
            } else {
                eprintln!("{}", report);
            }

            Ok(ExitCode::from(exit_status(&report)))
        }
    }
}
