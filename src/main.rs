use clap::Parser;
use std::process;

use todoq::cli;
use todoq::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let user_flag = cli_args.user.clone();
    let user = user_flag.as_deref();

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::User(cmd) => cli::user::run(cmd, json_output, user),
        Commands::Add(args) => cli::task::run_add(args, json_output, user),
        Commands::List(args) => cli::list::run(args, json_output, user),
        Commands::Show { id } => cli::task::run_show(&id, json_output, user),
        Commands::Edit(args) => cli::task::run_edit(args, json_output, user),
        Commands::Done { id } => cli::task::run_done(&id, json_output, user),
        Commands::Undo { id } => cli::task::run_undo(&id, json_output, user),
        Commands::Delete { id } => cli::task::run_delete(&id, json_output, user),
    };

    process::exit(exit_code);
}
