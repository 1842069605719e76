//! CLI module for the product catalog service

pub mod serve;

use clap::{Parser, Subcommand};

/// Product catalog service - paginated listing and soft-delete CRUD
#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
