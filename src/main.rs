mod cli;
mod db;
mod enrich;
mod error;
mod loader;
mod models;
mod sentiment;
mod server;

use clap::Parser;
use cli::{App, Cli, Commands, LoadArgs, ServeArgs};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use error::Result;
use std::net::{IpAddr, Ipv4Addr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    info!("Initializing tweet enrichment app...");

    // Initialize the application state (DB connection, loaders)
    let app = match App::new().await {
        Ok(app) => {
            info!("Application initialized successfully.");
            app
        }
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!(
                "{}",
                "Error: Failed to initialize application. Check logs.".red()
            );
            return Err(e);
        }
    };

    // Non-interactive mode: run the given subcommand and exit
    if let Some(command) = cli.command {
        return app.run_command(command).await;
    }

    println!(
        "{}",
        "Welcome to the Tweet Threat Monitoring CLI!".cyan().bold()
    );

    // Main interactive loop
    loop {
        let options = &[
            "Initialize Database Schema",
            "Load Tweet Dataset",
            "Run Enrichment",
            "Show Flagged Tweets with Weapons",
            "Show Tweets with Multiple Weapons",
            "Start API Server",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()? // Handles cancellation (e.g., Ctrl+C)
            .unwrap_or(options.len() - 1); // Default to Exit if cancelled

        println!("\n---\n");

        // Handle the user's choice
        let command_result = match selection {
            0 => app.run_command(Commands::InitDb).await,
            1 => match cli::prompt_source() {
                Ok(source) => {
                    app.run_command(Commands::Load(LoadArgs {
                        source,
                        source_type: None,
                    }))
                    .await
                }
                Err(e) => {
                    println!("{} {}", "Failed to get input:".red(), e);
                    continue;
                }
            },
            2 => {
                app.run_command(Commands::Enrich {
                    batch_size: enrich::DEFAULT_BATCH_SIZE,
                })
                .await
            }
            3 => app.run_command(Commands::AntisemiticWeapons).await,
            4 => app.run_command(Commands::MultiWeapon).await,
            5 => match cli::prompt_port() {
                Ok(port) => {
                    app.run_command(Commands::Serve(ServeArgs {
                        host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                        port,
                    }))
                    .await
                }
                Err(e) => {
                    println!("{} {}", "Failed to get port:".red(), e);
                    continue;
                }
            },
            6 => {
                println!("{}", "Exiting application. Goodbye!".green());
                break;
            }
            _ => unreachable!(),
        };

        // Handle potential errors from command execution
        if let Err(e) = command_result {
            error!("Command execution failed: {:?}", e);
            println!(
                "{} {}",
                "Error executing command:".red(),
                e.to_string().red()
            );
        }

        println!("\n---\n");
    }

    Ok(())
}
