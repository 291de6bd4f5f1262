//! V2V Safety Shell - console entry point
//!
//! Reads commands from stdin and prints the active dashboard to stdout.
//! Logs go to stderr.

use std::io::Write;
use std::rc::Rc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use v2v_shell::config::{self, Config};
use v2v_shell::dashboards::Dashboard;
use v2v_shell::feed::{OperationalFeed, StaticFeed};
use v2v_shell::shell::{CommandError, Shell, ShellError, Step};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "v2v_shell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting V2V Safety Shell");

    // Load configuration
    let config = config::load_config()?;
    tracing::info!(?config, "Configuration loaded");

    let feed: Rc<dyn OperationalFeed> = match &config.feed.path {
        Some(path) => Rc::new(StaticFeed::from_file(path)?),
        None => {
            tracing::info!("No feed file configured, using demo fleet");
            Rc::new(StaticFeed::demo())
        }
    };

    // The session is single-threaded; everything runs on one LocalSet
    LocalSet::new().run_until(run(config, feed)).await
}

async fn run(config: Config, feed: Rc<dyn OperationalFeed>) -> Result<()> {
    let shell = Shell::new(&config, feed, |dashboard| {
        if let Err(e) = write_dashboard(&mut std::io::stdout(), dashboard) {
            tracing::warn!(error = %e, "Failed to print dashboard");
        }
    });
    shell.start();
    print!("{}", shell.chat().to_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                None
            }
        };
        // EOF or Ctrl-C
        let Some(line) = line else {
            println!();
            break;
        };

        match shell.handle_line(&line) {
            Ok(Step::Quit) => break,
            Ok(Step::Continue(Some(output))) => print!("{output}"),
            Ok(Step::Continue(None)) => {}
            Err(ShellError::Command(CommandError::Empty)) => {}
            Err(e) => eprintln!("{e}"),
        }
    }

    shell.shutdown();
    Ok(())
}

fn write_dashboard(out: &mut impl Write, dashboard: &Dashboard) -> std::io::Result<()> {
    out.write_all(dashboard.to_text().as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use v2v_shell::dashboards;
    use v2v_shell::session::SessionState;

    /// Accepts writes, fails on flush
    struct BrokenPipe(Vec<u8>);

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    fn driver_dashboard() -> Dashboard {
        dashboards::render(
            &SessionState::default(),
            &StaticFeed::demo().snapshot(),
        )
    }

    #[test]
    fn test_write_dashboard() {
        let mut out = Vec::new();
        write_dashboard(&mut out, &driver_dashboard()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Driver Dashboard"));
    }

    #[test]
    fn test_write_dashboard_reports_flush_failure() {
        let mut out = BrokenPipe(Vec::new());
        let err = write_dashboard(&mut out, &driver_dashboard()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        assert!(!out.0.is_empty());
    }
}
