mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use fd_core::config::Config;

fn start_server(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    projects_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = projects_dir {
        config.library.projects_dir = dir;
    }

    tracing::info!("Starting flpdeck");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(fd_server::start(config))?;
    Ok(())
}

fn inspect_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let buf = std::fs::read(file)?;
    let (header, _) = fd_flp::read_header(&buf)?;
    let meta = fd_flp::parse_metadata(&buf)?;

    if json {
        let out = serde_json::json!({
            "file": file.display().to_string(),
            "size": buf.len(),
            "header": header,
            "metadata": meta,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Size: {} bytes", buf.len());
    println!(
        "Header: format {}, {} channels, {} ppq",
        header.format, header.channels, header.ppq
    );
    match meta.bpm {
        Some(bpm) => println!("Tempo: {bpm} BPM"),
        None => println!("Tempo: unknown"),
    }
    println!("Title: {}", meta.title.as_deref().unwrap_or("-"));
    println!("Version: {}", meta.version.as_deref().unwrap_or("-"));
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)?;
            let config = Config::from_json(&contents)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Projects: {}", config.library.projects_dir.display());
    println!("  Folders file: {}", config.library.folders_file.display());

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "flpdeck=trace,fd_server=trace,fd_flp=debug,fd_core=debug,tower_http=debug".to_string()
        } else {
            "flpdeck=info,fd_server=info,fd_flp=info,fd_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Start {
            host,
            port,
            projects_dir,
        } => start_server(cli.config.as_deref(), host, port, projects_dir),
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("flpdeck {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
