//! greenroom-launch entry point.

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use greenroom_launch::generate_launch_description;
use launch_core::{
    environment::{CONSOLE_OUTPUT_FORMAT, CONSOLE_OUTPUT_FORMAT_VAR},
    render,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the launch description as YAML (default)
    Describe,
    /// Write parameter files and print one shell command per process
    Commands {
        /// Directory receiving the generated parameter files
        #[arg(long, default_value = "params")]
        params_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let descriptor =
        generate_launch_description().wrap_err("Failed to build the launch description")?;

    info!(entries = descriptor.len(), "Launch description built");

    match cli.command.unwrap_or(Command::Describe) {
        Command::Describe => {
            print!("{}", descriptor.to_yaml()?);
        }
        Command::Commands { params_dir } => {
            let parameter_files = render::write_all_parameter_files(&descriptor, &params_dir)?;

            info!(params_dir = %params_dir.display(), "Parameter files written");

            println!(
                "export {}={}",
                CONSOLE_OUTPUT_FORMAT_VAR,
                render::shell_quote(CONSOLE_OUTPUT_FORMAT)
            );
            for (spec, files) in descriptor.iter().zip(&parameter_files) {
                println!("{}", render::shell_line(&render::command_line(spec, files)));
            }
        }
    }

    Ok(())
}
