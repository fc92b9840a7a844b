//! Command-line surface and dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use itertools::Itertools;
use std::io::Write;
use tracing::debug;

use crate::client::StreamingClient;
use crate::model::KNOWN_MODELS;
use crate::options::{ModelOptions, CODE_TEMPERATURE};
use crate::prompts::{self, Preset};

/// CLI arguments for the cerebras client
#[derive(Debug, Parser)]
#[command(name = "cerebras")]
#[command(about = "Cerebras inference client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model to use (overrides CEREBRAS_MODEL and the config file)
    #[arg(long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Log requests and responses to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Simple completion
    Complete {
        /// Prompt text
        prompt: String,

        /// System prompt
        #[arg(long)]
        system: Option<String>,

        /// Stream output
        #[arg(long)]
        stream: bool,
    },

    /// Code generation
    Code {
        /// Task description
        task: String,

        /// Code context
        #[arg(long)]
        context: Option<String>,

        #[arg(long, default_value = "python")]
        language: String,
    },

    /// Chat mode
    Chat {
        /// User message
        message: String,

        /// Additional context
        #[arg(long)]
        context: Option<String>,

        /// System prompt
        #[arg(long)]
        system: Option<String>,
    },

    /// Use a preset task
    Preset {
        #[arg(value_enum)]
        name: Preset,

        /// Code to process
        #[arg(long)]
        context: String,

        /// Target language (for translate)
        #[arg(long)]
        target_lang: Option<String>,
    },

    /// List known models
    Models,
}

/// Run one API-backed subcommand and write its output to `out`.
///
/// `Commands::Models` needs no client; see [`list_models`].
pub async fn dispatch<C, W>(command: &Commands, client: &C, out: &mut W) -> Result<()>
where
    C: StreamingClient + ?Sized,
    W: Write,
{
    let defaults = ModelOptions::default();

    match command {
        Commands::Complete {
            prompt,
            system,
            stream: true,
        } => {
            let mut fragments = client.stream(prompt, system.as_deref(), &defaults).await?;
            while let Some(fragment) = fragments.next().await {
                out.write_all(fragment?.as_bytes())?;
                out.flush()?;
            }
            writeln!(out)?;
            debug!(dropped_frames = fragments.dropped_frames(), "stream finished");
        }
        Commands::Complete {
            prompt,
            system,
            stream: false,
        } => {
            let result = client.complete(prompt, system.as_deref(), &defaults).await?;
            writeln!(out, "{result}")?;
        }
        Commands::Code {
            task,
            context,
            language,
        } => {
            let result = client.code(task, context.as_deref(), language).await?;
            writeln!(out, "{result}")?;
        }
        Commands::Chat {
            message,
            context,
            system,
        } => {
            let prompt = prompts::chat_prompt(message, context.as_deref());
            let result = client.complete(&prompt, system.as_deref(), &defaults).await?;
            writeln!(out, "{result}")?;
        }
        Commands::Preset {
            name,
            context,
            target_lang,
        } => {
            let prompt = prompts::preset_prompt(*name, context, target_lang.as_deref());
            let options = defaults.with_temperature(CODE_TEMPERATURE);
            let result = client.complete(&prompt, None, &options).await?;
            writeln!(out, "{result}")?;
        }
        Commands::Models => list_models(out, None)?,
    }

    Ok(())
}

/// Print the known model identifiers, marking `active` with `*`.
pub fn list_models<W: Write>(out: &mut W, active: Option<&str>) -> std::io::Result<()> {
    let listing = KNOWN_MODELS
        .iter()
        .map(|model| {
            let marker = if Some(*model) == active { "*" } else { " " };
            format!("{marker} {model}")
        })
        .join("\n");
    writeln!(out, "{listing}")
}
