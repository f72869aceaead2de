use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apchu-bot")]
#[command(author, version, about = "Inline Telegram bot that measures your Апщу", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling) together with the HTTP health server
    Run,

    /// Generate sizes locally without Telegram
    Roll {
        /// How many sizes to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Seed for a reproducible sequence
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the sorted sample and chosen index too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the sponsors stored in the database
    Sponsors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
