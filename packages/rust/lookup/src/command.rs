//! The `docs` chat command.

use tracing::debug;

use crate::fetch::Fetcher;
use crate::normalize::normalize_query;
use crate::resolver::DocsResolver;

/// Name the command is invoked by.
pub const COMMAND_NAME: &str = "docs";

/// A command name with its whitespace-split parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub parameters: Vec<String>,
}

impl Command {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line such as `docs str_replace` into name and parameters.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        Some(Self::new(name, tokens))
    }
}

/// Answers `docs <terms...>` with exactly one message.
pub struct DocsCommand<F> {
    resolver: DocsResolver<F>,
}

impl<F: Fetcher> DocsCommand<F> {
    pub fn new(resolver: DocsResolver<F>) -> Self {
        Self { resolver }
    }

    /// Whether this command should run for `command` at all.
    pub fn accepts(command: &Command) -> bool {
        command.name == COMMAND_NAME && !command.parameters.is_empty()
    }

    /// Resolve the command's terms. `None` means nothing should be posted.
    pub async fn handle(&self, command: &Command) -> Option<String> {
        if !Self::accepts(command) {
            debug!(name = %command.name, "ignoring command");
            return None;
        }

        let pattern = normalize_query(&command.parameters);
        Some(self.resolver.resolve(&pattern).await)
    }
}
