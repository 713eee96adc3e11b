use clap::{Parser, Subcommand};

/// Declarative time triggers for the desk buddy.
///
/// Loads a YAML trigger configuration and either reports upcoming
/// activations or runs the timer loop, logging every firing.
#[derive(Parser, Debug)]
#[command(name = "desky", version, about = "Declarative time triggers for the desk buddy")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/desky/config.toml)
    #[arg(long, env = "DESKY_CONFIG", global = true)]
    pub config: Option<String>,

    /// Fixed UTC offset for times of day, e.g. "+02:00" or "Z"
    #[arg(long, env = "DESKY_UTC_OFFSET", global = true, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Time zone for times of day, e.g. "Europe/Berlin" (default: local time zone)
    #[arg(long, env = "DESKY_TIMEZONE", global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the next activation times.
    Next {
        /// Trigger file (overrides the config file)
        #[arg(long, env = "DESKY_TRIGGERS")]
        triggers: Option<String>,

        /// Number of activations to print
        #[arg(long, short = 'n', default_value = "5")]
        count: usize,
    },

    /// Run the timer loop until interrupted.
    Run {
        /// Trigger file (overrides the config file)
        #[arg(long, env = "DESKY_TRIGGERS")]
        triggers: Option<String>,

        /// Stop after this many firings
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Parse a duration string and print it in milliseconds.
    Duration {
        /// Duration text, e.g. "5 minutes 3 seconds"
        text: String,
    },
}
