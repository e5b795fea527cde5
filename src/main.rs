// src/main.rs

use execprobe::{cli, config, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("execprobe error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    if args.command.is_empty() {
        eprintln!("[Error] execprobe: no command");
        return Ok(1);
    }

    let config = config::load_from_env()?;
    logging::init_logging(config.log.level)?;
    Ok(run(args, config).await?)
}
