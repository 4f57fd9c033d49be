mod check;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use check::{build_env, render_schema, run_check, Profile};

#[derive(Parser)]
#[command(name = "pictl")]
#[command(version, about = "PDF Insights configuration tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an environment against a configuration schema
    ///
    /// The environment is the current process environment, overlaid by the
    /// env file when one is given. Every problem is listed, not just the first.
    ///
    /// Exit status: 0 when valid, 1 when there are violations, 2 on usage or
    /// I/O errors.
    ///
    /// Examples:
    ///     pictl check --profile service
    ///     pictl check --profile web --env-file .env.production
    ///     pictl check --env-file .env --no-process-env --json
    #[command(verbatim_doc_comment)]
    Check {
        /// Schema variant to validate against
        #[arg(short, long, value_enum, default_value_t = Profile::Service)]
        profile: Profile,

        /// Dotenv file whose values override the process environment
        #[arg(short, long, value_name = "PATH")]
        env_file: Option<PathBuf>,

        /// Ignore the process environment and read only the env file
        #[arg(long, requires = "env_file")]
        no_process_env: bool,

        /// Emit a JSON report
        #[arg(short, long)]
        json: bool,
    },

    /// Print the declared fields of a configuration schema
    Schema {
        /// Schema variant to describe
        #[arg(short, long, value_enum, default_value_t = Profile::Service)]
        profile: Profile,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check {
            profile,
            env_file,
            no_process_env,
            json,
        } => {
            let env = build_env(env_file.as_deref(), !no_process_env)?;
            let outcome = run_check(profile, &env, json)?;
            println!("{}", outcome.output);
            Ok(if outcome.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Schema { profile } => {
            print!("{}", render_schema(profile));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_process_env_requires_env_file() {
        assert!(Cli::try_parse_from(["pictl", "check", "--no-process-env"]).is_err());
        assert!(
            Cli::try_parse_from(["pictl", "check", "--no-process-env", "-e", ".env"]).is_ok()
        );
    }
}
