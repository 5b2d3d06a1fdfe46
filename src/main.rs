use clap::Parser;

mod cli;
mod config;
mod dispatch;
mod gateways;
mod location;
mod screen;
mod terminal;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    cli::run(args)
}
