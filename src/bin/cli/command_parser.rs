use clap::{Arg, Command};

pub fn arg_parser() -> Command {
    Command::new("libris-clean")
        .about("Normalize Libris catalog records into flat JSON")
        .subcommand_required(true)
        .subcommand(Command::new("serve").about("Serve the index page and the /api/<id> endpoint"))
        .subcommand(
            Command::new("fetch")
                .about("Fetch and normalize a single record, print it as JSON")
                .arg(Arg::new("libris_id").required(true)),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}
