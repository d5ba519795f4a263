use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "datachore", version, about = "Local agent for natural-language data chores")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Explicit config file; replaces the ~/.datachore and ./config.toml lookup.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Root directory holding task inputs and outputs.
    #[arg(long, global = true)]
    pub data_root: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Instruction in plain language, e.g. "sort the contacts by last name".
    #[arg(required = true, num_args = 1..)]
    pub task: Vec<String>,
}

impl RunArgs {
    pub fn instruction(&self) -> String {
        self.task.join(" ")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP agent (default).
    Serve(ServeArgs),
    /// Execute a single instruction and exit.
    Run(RunArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let args = Args::try_parse_from(["datachore"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn serve_flags_parse() {
        let args = Args::try_parse_from([
            "datachore",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--data-root",
            "/tmp/chores",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Serve(serve)) => {
                assert_eq!(serve.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(serve.port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.data_root.as_deref(), Some("/tmp/chores"));
    }

    #[test]
    fn run_joins_words_into_one_instruction() {
        let args =
            Args::try_parse_from(["datachore", "run", "count", "the", "wednesdays"]).unwrap();
        match args.command {
            Some(Commands::Run(run)) => assert_eq!(run.instruction(), "count the wednesdays"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_requires_an_instruction() {
        assert!(Args::try_parse_from(["datachore", "run"]).is_err());
    }
}
