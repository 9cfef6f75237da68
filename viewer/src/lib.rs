use std::time::Duration;

use clap::Parser;

use triangles::DemoKind;

pub mod app;
pub mod args;
pub mod demo;

use app::{App, AppError};
use args::Args;
use demo::Demo;

/// Runs one of the demos until Escape or window close; exits with -1 if setup fails.
pub fn launch(kind: DemoKind) -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <Args as Parser>::parse();

    match start(kind, &args) {
        Ok((app, demo, frame_interval)) => app.run(demo, frame_interval),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(-1);
        }
    }
}

fn start(kind: DemoKind, args: &Args) -> Result<(App, Demo, Duration), AppError> {
    let config = args.load_config()?;

    let app = App::new(&config, kind)?;
    let demo = Demo::new(kind, &config)?;

    Ok((app, demo, Duration::from_millis(config.frame_interval_ms)))
}
