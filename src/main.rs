use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

mod commands;

use env_yaml::EnvYamlError;
use env_yaml::logging;

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Env,
    Json,
}

#[derive(Parser)]
#[command(name = "env-yaml")]
#[command(about = "Print the entries of .env.yaml as shell-safe KEY=VALUE lines")]
#[command(
    long_about = "env-yaml reads a flat YAML mapping from .env.yaml and prints one KEY=VALUE line per entry, quoted so a POSIX shell can evaluate it.\n\nExample: eval \"$(env-yaml --export)\""
)]
#[command(version)]
struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "ENV_YAML_DIR",
        help = "Directory containing .env.yaml (default: current directory)"
    )]
    dir: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "format",
        value_enum,
        default_value = "env",
        help = "Output format: env or json (default: env)"
    )]
    format: OutputFormat,

    #[arg(short = 'e', long, help = "Prefix every line with 'export '")]
    export: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Execute a command with the entries added to its environment")]
    Exec {
        #[arg(help = "Command to execute")]
        program: String,
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            help = "Arguments passed to the command"
        )]
        args: Vec<String>,
    },
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    env_yaml::set_base_dir(cli.dir);

    let result: Result<(), EnvYamlError> = match cli.command {
        None => commands::print(&cli.format, cli.export),
        Some(Commands::Exec { program, args }) => commands::exec(&program, &args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
