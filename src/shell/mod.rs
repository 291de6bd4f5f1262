//! Shell - composition root for one operator session
//!
//! Owns the session store and everything mounted on it:
//! - the connectivity monitor (released when the shell goes away)
//! - the view router
//! - the role view dispatcher, which pushes rendered dashboards to a sink
//! - the chat overlay, mounted beside the routed dashboard

pub mod commands;

use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;
use v2v_events::LinkEvent;

use crate::chat::ChatOverlay;
use crate::config::Config;
use crate::connectivity::ConnectivityMonitor;
use crate::dashboards::{self, Dashboard, RoleViewDispatcher};
use crate::feed::OperationalFeed;
use crate::router::ViewRouter;
use crate::session::{SessionState, SessionStore, SharedStore};

pub use commands::{CommandError, ShellCommand, HELP};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What the console loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep going, printing the text if any
    Continue(Option<String>),
    Quit,
}

pub struct Shell {
    store: SharedStore,
    feed: Rc<dyn OperationalFeed>,
    monitor: ConnectivityMonitor,
    router: ViewRouter,
    chat: ChatOverlay,
    dispatcher: RoleViewDispatcher,
    handshake_timeout: Duration,
}

impl Shell {
    /// Build the session, navigate to the configured initial path and mount
    /// the dispatcher. `sink` receives every rendered dashboard.
    pub fn new(
        config: &Config,
        feed: Rc<dyn OperationalFeed>,
        sink: impl Fn(&Dashboard) + 'static,
    ) -> Self {
        let store = SessionStore::shared();

        let router = ViewRouter::new(store.clone());
        router.navigate(&config.initial_path);

        let dispatcher = RoleViewDispatcher::attach(&store, feed.clone(), sink);
        let chat = ChatOverlay::new(store.clone(), config.chat.max_message_len);
        let monitor = ConnectivityMonitor::new(store.clone());

        Self {
            store,
            feed,
            monitor,
            router,
            chat,
            dispatcher,
            handshake_timeout: config.connectivity.handshake_timeout(),
        }
    }

    /// Schedule the handshake. Must run inside a `LocalSet`.
    pub fn start(&self) {
        info!(
            timeout_ms = self.handshake_timeout.as_millis() as u64,
            "Waiting for V2V link"
        );
        self.monitor.start(self.handshake_timeout);
    }

    /// Release the pending handshake and unmount the dispatcher
    pub fn shutdown(&self) {
        self.monitor.cancel();
        self.dispatcher.detach();
        info!("Shell shut down");
    }

    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    pub fn chat(&self) -> &ChatOverlay {
        &self.chat
    }

    /// Parse and run one console line
    pub fn handle_line(&self, line: &str) -> Result<Step, ShellError> {
        let command = ShellCommand::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&self, command: ShellCommand) -> Result<Step, ShellError> {
        let output = match command {
            ShellCommand::Navigate(path) => {
                let before = self.router.current();
                let view = self.router.navigate(&path);
                // The dispatcher only re-renders on change; show it again on request
                (view == before).then(|| self.render_current().to_text())
            }
            ShellCommand::ChatOpen => {
                self.chat.open();
                Some(self.chat.to_text())
            }
            ShellCommand::ChatClose => {
                self.chat.close();
                Some(self.chat.to_text())
            }
            ShellCommand::ChatToggle => {
                self.chat.toggle();
                Some(self.chat.to_text())
            }
            ShellCommand::Say(text) => match self.chat.send(&text) {
                Ok(_) if self.chat.is_open() => Some(self.chat.to_text()),
                Ok(_) => Some("sent (chat closed, 'chat open' to view)\n".to_string()),
                Err(e) => Some(format!("chat: {e}\n")),
            },
            ShellCommand::Link(event) => {
                let restart = event == LinkEvent::Reset;
                self.monitor.on_link_event(event);
                if restart {
                    self.monitor.start(self.handshake_timeout);
                }
                None
            }
            ShellCommand::State => {
                let json = serde_json::to_string_pretty(&self.store.state())?;
                Some(format!("{json}\n"))
            }
            ShellCommand::Help => Some(HELP.to_string()),
            ShellCommand::Quit => return Ok(Step::Quit),
        };
        Ok(Step::Continue(output))
    }

    fn render_current(&self) -> Dashboard {
        self.store
            .with_state(|state| dashboards::render(state, &self.feed.snapshot()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::StaticFeed;
    use crate::session::{ConnectivityStatus, ViewVariant};
    use std::cell::RefCell;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    fn shell_with_log(config: &Config) -> (Shell, Rc<RefCell<Vec<ViewVariant>>>) {
        let rendered = Rc::new(RefCell::new(Vec::new()));
        let log = rendered.clone();
        let shell = Shell::new(config, Rc::new(StaticFeed::demo()), move |d| {
            log.borrow_mut().push(d.variant)
        });
        (shell, rendered)
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_session() {
        LocalSet::new()
            .run_until(async {
                let (shell, _rendered) = shell_with_log(&Config::default());

                let state = shell.state();
                assert_eq!(state.active_view, ViewVariant::Driver);
                assert_eq!(state.connectivity, ConnectivityStatus::Connecting);
                assert!(state.chat.messages.is_empty());

                shell.start();
                sleep(Duration::from_millis(2001)).await;
                let state = shell.state();
                assert_eq!(state.active_view, ViewVariant::Driver);
                assert_eq!(state.connectivity, ConnectivityStatus::Connected);
                assert!(state.chat.messages.is_empty());

                shell.handle_line("/fleet").unwrap();
                let state = shell.state();
                assert_eq!(state.active_view, ViewVariant::FleetManager);
                assert_eq!(state.connectivity, ConnectivityStatus::Connected);
                assert!(state.chat.messages.is_empty());

                shell.handle_line("say hi").unwrap();
                let state = shell.state();
                assert_eq!(state.active_view, ViewVariant::FleetManager);
                assert_eq!(state.connectivity, ConnectivityStatus::Connected);
                assert_eq!(state.chat.messages.len(), 1);
                assert_eq!(state.chat.messages[0].text, "hi");
                assert_eq!(state.chat.messages[0].sender, "Fleet Manager");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_survives_navigation() {
        LocalSet::new()
            .run_until(async {
                let (shell, _rendered) = shell_with_log(&Config::default());
                shell.handle_line("chat open").unwrap();
                shell.handle_line("say first").unwrap();

                for path in ["/emergency", "/", "/fleet", "/nowhere", "/driver"] {
                    shell.handle_line(path).unwrap();
                    assert!(shell.chat().is_open());
                    assert_eq!(shell.chat().messages().len(), 1);
                }
            })
            .await;
    }

    #[test]
    fn test_initial_path_from_config() {
        let config = Config {
            initial_path: "/emergency".to_string(),
            ..Config::default()
        };
        let (shell, rendered) = shell_with_log(&config);
        assert_eq!(shell.state().active_view, ViewVariant::EmergencyResponder);
        assert_eq!(*rendered.borrow(), vec![ViewVariant::EmergencyResponder]);
    }

    #[test]
    fn test_renavigating_same_view_reprints() {
        let (shell, rendered) = shell_with_log(&Config::default());
        let step = shell.handle_line("/driver").unwrap();
        match step {
            Step::Continue(Some(text)) => assert!(text.contains("Driver Dashboard")),
            other => panic!("unexpected step {other:?}"),
        }
        // Dispatcher did not render again
        assert_eq!(rendered.borrow().len(), 1);

        assert_eq!(shell.handle_line("/fleet").unwrap(), Step::Continue(None));
        assert_eq!(rendered.borrow().len(), 2);
    }

    #[test]
    fn test_rejected_chat_and_bad_commands() {
        let (shell, _rendered) = shell_with_log(&Config::default());
        assert_eq!(
            shell.handle_line("say   ").unwrap(),
            Step::Continue(Some("chat: message is empty\n".to_string()))
        );
        assert!(shell.state().chat.messages.is_empty());

        assert!(matches!(
            shell.handle_line("launch"),
            Err(ShellError::Command(CommandError::Unknown(_)))
        ));
        assert_eq!(shell.handle_line("quit").unwrap(), Step::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_commands_and_shutdown() {
        LocalSet::new()
            .run_until(async {
                let (shell, _rendered) = shell_with_log(&Config::default());
                shell.start();

                shell.handle_line("link down rsu lost").unwrap();
                sleep(Duration::from_secs(5)).await;
                assert_eq!(shell.state().connectivity, ConnectivityStatus::Disconnected);

                // Reset restarts the simulated handshake
                shell.handle_line("link reset").unwrap();
                assert_eq!(shell.state().connectivity, ConnectivityStatus::Connecting);
                sleep(Duration::from_millis(2001)).await;
                assert_eq!(shell.state().connectivity, ConnectivityStatus::Connected);

                shell.handle_line("link reset").unwrap();
                shell.shutdown();
                sleep(Duration::from_secs(5)).await;
                assert_eq!(shell.state().connectivity, ConnectivityStatus::Connecting);
            })
            .await;
    }

    #[test]
    fn test_state_prints_json() {
        let (shell, _rendered) = shell_with_log(&Config::default());
        let Step::Continue(Some(json)) = shell.handle_line("state").unwrap() else {
            panic!("expected output");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["active_view"], "driver");
    }
}
