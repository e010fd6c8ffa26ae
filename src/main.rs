use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use yamlshape::config::YamlConfiguration;
use yamlshape::file::loader::{read_yaml_file, read_yaml_from_stdin};
use yamlshape::manifest::{decode_or_none_with, ActionType, Metadata, Typing};
use yamlshape::Yaml;

/// yamlshape - decode GitHub Action manifests and typings with precise errors
#[derive(Parser)]
#[command(name = "yamlshape")]
#[command(version)]
#[command(about = "Decode action manifests and their typings", long_about = None)]
struct Cli {
    /// Manifest file (action.yml); omit or use "-" to read from stdin
    manifest: Option<String>,

    /// Typing file (action-types.yml) to decode alongside the manifest
    #[arg(short, long)]
    typing: Option<PathBuf>,

    /// Reject keys the models don't describe
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Skip keys the models don't describe (default)
    #[arg(long)]
    lenient: bool,

    /// Print the decoded models as YAML
    #[arg(long)]
    dump: bool,

    /// Log decoding details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Config file (default: ~/.config/yamlshape/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_configuration(cli: &Cli) -> YamlConfiguration {
    let mut config = match &cli.config {
        Some(path) => YamlConfiguration::load_from(path),
        None => YamlConfiguration::load(),
    };
    // Manifests are decoded leniently unless asked otherwise.
    config.strict_mode = cli.strict && !cli.lenient;
    config
}

fn read_manifest(manifest: Option<&str>) -> Result<String> {
    match manifest {
        Some("-") => read_yaml_from_stdin(),
        Some(path) => read_yaml_file(path),
        None if !io::stdin().is_terminal() => read_yaml_from_stdin(),
        None => anyhow::bail!("No manifest given and stdin is a terminal"),
    }
}

fn print_names(title: &str, names: impl ExactSizeIterator<Item = String>) {
    println!("{}", title);
    if names.len() == 0 {
        println!("  <none>");
    }
    for name in names {
        println!("  {}", name);
    }
}

fn print_manifest(manifest: Option<&Metadata>) {
    println!("Manifest:");
    match manifest {
        Some(manifest) => {
            print_names("Inputs", manifest.inputs.keys().cloned());
            print_names("Outputs", manifest.outputs.keys().cloned());
        }
        None => println!("  <no data>"),
    }
}

fn print_typing(typing: Option<&Typing>) {
    fn describe((name, action_type): (&String, &ActionType)) -> String {
        format!("{}: {}", name, action_type.kind)
    }

    println!("Typing:");
    match typing {
        Some(typing) => {
            print_names("Inputs", typing.inputs.iter().map(describe));
            print_names("Outputs", typing.outputs.iter().map(describe));
        }
        None => println!("  <no data>"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let yaml = Yaml::new(load_configuration(&cli));

    let source = read_manifest(cli.manifest.as_deref())?;
    let manifest: Option<Metadata> = decode_or_none_with(&yaml, &source);
    print_manifest(manifest.as_ref());

    let typing: Option<Typing> = match &cli.typing {
        Some(path) => {
            let source = read_yaml_file(path)
                .with_context(|| format!("Failed to load typing {}", path.display()))?;
            println!();
            let typing = decode_or_none_with(&yaml, &source);
            print_typing(typing.as_ref());
            typing
        }
        None => None,
    };

    if cli.dump {
        if let Some(manifest) = &manifest {
            println!();
            print!("{}", serde_yaml::to_string(manifest)?);
        }
        if let Some(typing) = &typing {
            println!();
            print!("{}", serde_yaml::to_string(typing)?);
        }
    }

    Ok(())
}
