//! Opening selected results.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{LatelyError, Result};
use crate::record::LaunchTarget;

/// What happened when a result was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The handler was started.
    Launched,
    /// No handler could be started. The reason is meant for diagnostics.
    Failed(String),
}

impl ActivationOutcome {
    /// Check whether the handler was started.
    pub fn is_launched(&self) -> bool {
        matches!(self, ActivationOutcome::Launched)
    }
}

/// Opens a record location with its launch target.
pub trait Activator: Send + Sync + fmt::Debug {
    /// Start the handler for `location`.
    fn activate(&self, target: &LaunchTarget, location: &str) -> Result<()>;
}

/// Activator that spawns external programs.
///
/// - `Command` targets run `program args.. location`.
/// - `Application` targets run `app_launcher id location`.
/// - Records without a target run `default_opener location` when an opener
///   is configured.
#[derive(Debug, Clone)]
pub struct CommandActivator {
    app_launcher: String,
    default_opener: Option<String>,
}

impl Default for CommandActivator {
    fn default() -> Self {
        CommandActivator {
            app_launcher: "gtk-launch".to_string(),
            default_opener: Some("xdg-open".to_string()),
        }
    }
}

impl CommandActivator {
    /// Create an activator with the desktop defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program used to start application ids.
    pub fn with_app_launcher<S: Into<String>>(mut self, launcher: S) -> Self {
        self.app_launcher = launcher.into();
        self
    }

    /// Set the program used for records without a launch target.
    pub fn with_default_opener(mut self, opener: Option<String>) -> Self {
        self.default_opener = opener;
        self
    }

    /// Build the command line for a target, without running it.
    pub fn command_line(&self, target: &LaunchTarget, location: &str) -> Result<Vec<String>> {
        let mut argv = match target {
            LaunchTarget::Command { program, args } => {
                let mut argv = Vec::with_capacity(args.len() + 2);
                argv.push(program.clone());
                argv.extend(args.iter().cloned());
                argv
            }
            LaunchTarget::Application { id } => vec![self.app_launcher.clone(), id.clone()],
            LaunchTarget::None => match &self.default_opener {
                Some(opener) => vec![opener.clone()],
                None => {
                    return Err(LatelyError::activation(format!(
                        "no handler found for {location}"
                    )));
                }
            },
        };

        if argv[0].is_empty() {
            return Err(LatelyError::activation(format!(
                "empty program for {location}"
            )));
        }

        argv.push(location.to_string());
        Ok(argv)
    }
}

impl Activator for CommandActivator {
    fn activate(&self, target: &LaunchTarget, location: &str) -> Result<()> {
        let argv = self.command_line(target, location)?;
        debug!(?argv, "spawning handler");

        Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    LatelyError::activation(format!("no handler found: {}", argv[0]))
                }
                _ => LatelyError::Io(e),
            })?;

        Ok(())
    }
}

/// Activator backed by a closure.
pub struct FnActivator<F>
where
    F: Fn(&LaunchTarget, &str) -> anyhow::Result<()> + Send + Sync,
{
    handler: F,
}

impl<F> FnActivator<F>
where
    F: Fn(&LaunchTarget, &str) -> anyhow::Result<()> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(handler: F) -> Self {
        FnActivator { handler }
    }
}

impl<F> fmt::Debug for FnActivator<F>
where
    F: Fn(&LaunchTarget, &str) -> anyhow::Result<()> + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnActivator").finish_non_exhaustive()
    }
}

impl<F> Activator for FnActivator<F>
where
    F: Fn(&LaunchTarget, &str) -> anyhow::Result<()> + Send + Sync,
{
    fn activate(&self, target: &LaunchTarget, location: &str) -> Result<()> {
        (self.handler)(target, location)?;
        Ok(())
    }
}
