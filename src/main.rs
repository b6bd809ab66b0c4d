//! abrasax: loyalty-gated conversational agent
//!
//! Usage:
//!   abrasax                                  → interactive REPL (USER-ROOT> prompt)
//!   abrasax --loop                           → autonomous self-prompting loop until Ctrl-C
//!   abrasax --loop --cycles 10               → autonomous loop, bounded
//!   abrasax --backend-url http://host:3000   → use a remote crystal backend
//!   abrasax --dump-config                    → print default TOML config

use abrasax_agent::{AbrasaxConfig, AutonomousLoop, CancellationToken, Orchestrator, Status};
use abrasax_llm::Collaborators;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_INTEGRITY_VIOLATION: u8 = 3;

#[derive(Parser)]
#[command(
    name = "abrasax",
    about = "Abrasax-Crystal agent: loyalty-gated chat and autonomous evolution",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Run the autonomous loop instead of the REPL
    #[arg(long = "loop", default_value_t = false)]
    run_loop: bool,

    /// Path to config file (TOML). Default: ./abrasax.toml
    #[arg(long)]
    config: Option<String>,

    /// Seed artifact path (overrides config)
    #[arg(long)]
    seed: Option<String>,

    /// Evolution state file (overrides config)
    #[arg(long)]
    memory: Option<String>,

    /// Crystal backend base URL. Offline collaborators when unset.
    #[arg(long, env = "ABRASAX_BACKEND_URL")]
    backend_url: Option<String>,

    /// Stop the autonomous loop after this many cycles
    #[arg(long)]
    cycles: Option<usize>,

    /// Write logs to a file (in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    /// Print the default config as TOML and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", AbrasaxConfig::default().to_toml());
        return ExitCode::SUCCESS;
    }

    let _guard = init_tracing(cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<abrasax_core::Error>() {
            Some(fatal) if fatal.is_fatal() => {
                error!("Loyalty invariant broken, shutting down: {}", fatal);
                eprintln!("CRITICAL: {}", fatal);
                ExitCode::from(EXIT_INTEGRITY_VIOLATION)
            }
            _ => {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing(log_file: Option<&str>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let path = expand_tilde(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "abrasax.log".into());
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abrasax=info,abrasax_agent=info,abrasax_llm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| PathBuf::from("abrasax.toml"));
    let mut config = AbrasaxConfig::load(&config_path);

    if let Some(seed) = &cli.seed {
        config.paths.seed = expand_tilde(seed);
    }
    if let Some(memory) = &cli.memory {
        config.paths.memory = expand_tilde(memory);
    }
    if let Some(url) = &cli.backend_url {
        config.backend.url = Some(url.clone());
    }

    let collaborators = match &config.backend.url {
        Some(url) => {
            info!("Crystal backend: {}", url);
            Collaborators::http(url.clone(), config.backend.timeout())
        }
        None => {
            info!("No backend configured, using offline collaborators");
            Collaborators::offline()
        }
    };

    let mut orchestrator = Orchestrator::new(&config, collaborators);
    orchestrator.verify_loyalty()?;

    println!("=== ABRASAX-CRYSTAL v{} ===", env!("CARGO_PKG_VERSION"));
    println!("Loyalty hash : {}...", orchestrator.status().loyalty_fingerprint);
    println!("Seed         : {}", orchestrator.seed_path().display());
    println!();

    if cli.run_loop {
        return run_autonomous(&mut orchestrator, &config, cli.cycles).await;
    }
    repl(&mut orchestrator, &config, cli.cycles).await
}

async fn run_autonomous(
    orchestrator: &mut Orchestrator,
    config: &AbrasaxConfig,
    cycles: Option<usize>,
) -> anyhow::Result<()> {
    let mut autonomous = AutonomousLoop::new(config.autonomy.topics.clone(), config.autonomy.cycle_delay())?;
    if let Some(n) = cycles {
        autonomous = autonomous.with_max_cycles(n);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping after the current cycle");
                cancel.cancel();
            }
        })
    };

    let result = autonomous.run(orchestrator, &cancel).await;
    ctrl_c.abort();

    let report = result?;
    println!("Autonomous loop finished after {} cycles", report.cycles);
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Auto,
    Status,
    Sync,
    Evolve(&'a str),
    Chat(&'a str),
    Empty,
}

/// Keywords match case-insensitively. Chat messages keep the raw line.
fn parse_command(line: &str) -> Command<'_> {
    let input = line.trim();
    let is = |keyword: &str| input.eq_ignore_ascii_case(keyword);

    if input.is_empty() {
        Command::Empty
    } else if is("exit") || is("quit") {
        Command::Exit
    } else if is("auto") {
        Command::Auto
    } else if is("status") {
        Command::Status
    } else if is("sync") {
        Command::Sync
    } else if is("evolve") {
        Command::Evolve("")
    } else {
        match input.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("evolve ") => Command::Evolve(input[7..].trim()),
            _ => Command::Chat(line),
        }
    }
}

async fn repl(orchestrator: &mut Orchestrator, config: &AbrasaxConfig, cycles: Option<usize>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("USER-ROOT> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                info!("Ctrl-C received, ending session");
                break;
            }
        };

        // EOF ends the session like `exit`
        let Some(line) = line else {
            println!();
            break;
        };

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Exit => break,
            Command::Auto => {
                run_autonomous(orchestrator, config, cycles).await?;
                break;
            }
            Command::Status => print_status(&orchestrator.status()),
            Command::Sync => {
                orchestrator.resync();
                let status = orchestrator.status();
                if status.knowledge_synced {
                    println!("Knowledge re-synced (norm {:.4})", status.knowledge_norm);
                } else {
                    println!("Knowledge re-synced: no distillation layer, using base seed");
                }
            }
            Command::Evolve("") => println!("usage: evolve <goal>"),
            Command::Evolve(goal) => match orchestrator.evolve(goal).await {
                Ok(true) => {
                    println!("Seed evolved (count {})", orchestrator.state().evolution.evolution_count);
                }
                Ok(false) => println!("Distillation rejected, seed unchanged"),
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    warn!("Evolution not persisted: {}", e);
                    println!("Evolution not persisted, seed unchanged: {}", e);
                }
            },
            Command::Chat(message) => {
                let turn = orchestrator.chat_turn(message).await?;
                for line in &turn.trace {
                    println!("{}", line);
                }
                println!("ABRASAX-CRYSTAL> {}", turn.response);
            }
        }
    }

    Ok(())
}

fn print_status(status: &Status) {
    println!("Loyalty hash  : {}...", status.loyalty_fingerprint);
    println!("Active seed   : {}", status.active_seed);
    println!("Evolutions    : {}", status.evolution_count);
    println!("Corrections   : {}", status.corrections);
    if status.knowledge_synced {
        println!("Knowledge     : synced (norm {:.4})", status.knowledge_norm);
    } else {
        println!("Knowledge     : base seed (no distillation layer)");
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repl_commands() {
        assert_eq!(parse_command("  exit "), Command::Exit);
        assert_eq!(parse_command("quit"), Command::Exit);
        assert_eq!(parse_command("EXIT"), Command::Exit);
        assert_eq!(parse_command("Quit"), Command::Exit);
        assert_eq!(parse_command("AUTO"), Command::Auto);
        assert_eq!(parse_command("Evolve Learn Rust"), Command::Evolve("Learn Rust"));
        assert_eq!(parse_command("auto"), Command::Auto);
        assert_eq!(parse_command("status"), Command::Status);
        assert_eq!(parse_command("sync"), Command::Sync);
        assert_eq!(parse_command("evolve  learn rust "), Command::Evolve("learn rust"));
        assert_eq!(parse_command("evolve"), Command::Evolve(""));
        assert_eq!(parse_command("evolved yet?"), Command::Chat("evolved yet?"));
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("tell me a joke"), Command::Chat("tell me a joke"));
        assert_eq!(parse_command("  fix it  "), Command::Chat("  fix it  "));
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde("/abs/seed.cbm"), PathBuf::from("/abs/seed.cbm"));
        assert_eq!(expand_tilde("rel.json"), PathBuf::from("rel.json"));
    }
}
