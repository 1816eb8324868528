//! sockkv CLI Client
//!
//! Command-line interface for interacting with sockkv.

use clap::{Parser, Subcommand};
use sockkv::config::DEFAULT_SOCKET_PATH;
use sockkv::protocol::{Command, Response};
use sockkv::Client;

/// sockkv CLI
#[derive(Parser, Debug)]
#[command(name = "sockkv-cli")]
#[command(about = "CLI for the sockkv key-value store")]
struct Args {
    /// Server socket path
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },
}

fn main() {
    let args = Args::parse();
    let client = Client::new(&args.socket);

    let command = match args.command {
        Commands::Get { key } => Command::Get {
            key: key.into_bytes(),
        },
        Commands::Set { key, value } => Command::Set {
            key: key.into_bytes(),
            value: value.join(" ").into_bytes(),
        },
    };

    match client.send(&command) {
        Ok(Response::Ok) => println!("OK"),
        Ok(Response::Value(value)) => println!("{}", String::from_utf8_lossy(&value)),
        Ok(Response::NotFound) => {
            println!("NOT_FOUND");
            std::process::exit(1);
        }
        Ok(Response::Error) => {
            eprintln!("ERROR");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Request to {} failed: {}", args.socket, e);
            std::process::exit(1);
        }
    }
}
