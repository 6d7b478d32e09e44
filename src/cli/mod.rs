//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::core::config::data::path_display;
use crate::core::config::{Config, Overrides, Settings};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{self, LogTarget};

#[derive(Parser)]
#[command(name = "gemchat", version)]
#[command(about = "A terminal chat interface for the Gemini API")]
#[command(
    long_about = "gemchat is a full-screen terminal chat interface that sends each message \
to the Gemini generateContent endpoint and shows the reply.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    Your Gemini API key (required by the API)\n\
  GEMINI_BASE_URL   Custom API base URL (optional, defaults to \
https://generativelanguage.googleapis.com/v1beta)\n\
  RUST_LOG          Log filter used with --log-file\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Alt+1..Alt+4      Send a suggested prompt (empty chat)\n\
  Ctrl+L            Clear the chat\n\
  Ctrl+T            Toggle dark/light theme\n\
  Alt+Up/Alt+Down   Select a message\n\
  Ctrl+Y            Copy the selected message or last reply\n\
  PgUp/PgDn         Scroll the transcript\n\
  Esc               Drop the selection, or quit\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use (overrides default-model)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// API base URL (overrides GEMINI_BASE_URL and base-url)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Theme to start with: dark or light
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt and print the reply
    Say {
        /// Prompt text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value
    Set {
        /// Configuration key: default-model, base-url or theme
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key: default-model, base-url or theme
        key: String,
    },
    /// Print the stored configuration
    Config,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            theme: self.theme.clone(),
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let overrides = args.overrides();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            logging::init(
                &LogTarget::file_or(args.log_file.as_deref(), LogTarget::Disabled),
                "info",
            )?;
            let config = Config::load()?;
            let settings = Settings::resolve(&config, &overrides);
            run_chat(settings).await
        }
        Commands::Say { prompt } => {
            logging::init(
                &LogTarget::file_or(args.log_file.as_deref(), LogTarget::Stderr),
                "warn",
            )?;
            let config = Config::load()?;
            let settings = Settings::resolve(&config, &overrides);
            run_say(prompt, settings).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.join(" ");
            if let Err(message) = config.set_key(&key, &value) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            let path = config.save()?;
            println!("✅ Set {key} to: {value} ({})", path_display(path));
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            if let Err(message) = config.unset_key(&key) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            Ok(())
        }
    }
}
