use std::env;

use anyhow::Result;
use dotenvy::dotenv;
use libris_clean::config::Config;
use tracing_subscriber::EnvFilter;

mod command_parser;
mod libris;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = command_parser::arg_parser().get_matches_from(env::args_os());

    match args.subcommand() {
        Some(("serve", _)) => {
            let config = Config::read_config()?;
            let client = libris::client(&config)?;
            server::start(config, client).await?;
        }
        Some(("fetch", matches)) => {
            let config = Config::read_config()?;
            let client = libris::client(&config)?;
            let libris_id = matches
                .get_one::<String>("libris_id")
                .ok_or(anyhow::anyhow!("Missing libris id"))?;
            let record = libris::create_by_libris_id(libris_id, &client, &config).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Some(("config", _)) => {
            print!("{}", Config::default_as_string()?);
        }
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}
