use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "boxhunt-bot", about = "Find-the-surprise mini-game bot for group chats")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/boxhunt.toml")]
    pub config: String,
}
