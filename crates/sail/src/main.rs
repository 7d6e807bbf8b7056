use anyhow::Result;
use clap::Parser;
use sail_core::errors::SailError;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let parsed = cli::Cli::parse();

    match parsed.dispatch().await {
        Ok(0) => Ok(()),
        // Propagate the exit code of the command run in the container
        Ok(code) => std::process::exit(code),
        Err(err) => {
            if let Some(sail_error) = err.downcast_ref::<SailError>() {
                if sail_error.is_docker_missing() {
                    eprintln!("Error: {}", sail_error);
                    eprintln!("Install Docker or point --docker-path at the docker binary.");
                    std::process::exit(1);
                }
            }

            Err(err)
        }
    }
}
