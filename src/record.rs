//! Recently used file records.
//!
//! A [`Record`] is one entry of the user's file history as handed over by a
//! record source. Records are immutable once built; the relevance score of a
//! record for a given search lives on [`crate::query::ranker::RecordHit`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// What to run when a record is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaunchTarget {
    /// No handler was recorded; the host default opener may be used.
    #[default]
    None,
    /// An executable that receives the record location as last argument.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// An application identifier (e.g. a desktop file id).
    Application { id: String },
}

impl LaunchTarget {
    /// Create a command launch target without extra arguments.
    pub fn command<S: Into<String>>(program: S) -> Self {
        LaunchTarget::Command {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create an application launch target.
    pub fn application<S: Into<String>>(id: S) -> Self {
        LaunchTarget::Application { id: id.into() }
    }

    /// Check whether a handler was recorded.
    pub fn is_none(&self) -> bool {
        matches!(self, LaunchTarget::None)
    }
}

/// One recently used file entry.
///
/// Every field defaults when missing so that a malformed row coming from a
/// source turns into a record with empty strings instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Location identifier, usually a URI.
    #[serde(default, alias = "uri")]
    pub location: String,
    /// Time of the last visit, if known.
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
    /// Handler used to open the record.
    #[serde(default)]
    pub launch_target: LaunchTarget,
    /// Icon name hint supplied by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Record {
    /// Create a new record with a name and a location.
    pub fn new<S: Into<String>, T: Into<String>>(name: S, location: T) -> Self {
        Record {
            name: name.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// Create a new record builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    /// Case-folded display name.
    pub fn folded_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-folded location.
    pub fn folded_location(&self) -> String {
        self.location.to_lowercase()
    }

    /// Path on the local file system, for `file://` URIs and absolute paths.
    ///
    /// URIs are percent-decoded. A `file://` URI naming a remote host has no
    /// local path.
    pub fn local_path(&self) -> Option<PathBuf> {
        if self.location.starts_with('/') {
            return Some(PathBuf::from(&self.location));
        }

        let url = Url::parse(&self.location).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

/// A builder for constructing records in a fluent manner.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Create a new record builder.
    pub fn new() -> Self {
        RecordBuilder {
            record: Record::default(),
        }
    }

    /// Set the display name.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.record.name = name.into();
        self
    }

    /// Set the location identifier.
    pub fn location<S: Into<String>>(mut self, location: S) -> Self {
        self.record.location = location.into();
        self
    }

    /// Set the last visit time.
    pub fn last_visited(mut self, visited: DateTime<Utc>) -> Self {
        self.record.last_visited = Some(visited);
        self
    }

    /// Set the last visit time from seconds since the Unix epoch.
    ///
    /// Out of range values leave the visit time unset.
    pub fn last_visited_secs(mut self, secs: i64) -> Self {
        self.record.last_visited = DateTime::from_timestamp(secs, 0);
        self
    }

    /// Set the launch target.
    pub fn launch_target(mut self, target: LaunchTarget) -> Self {
        self.record.launch_target = target;
        self
    }

    /// Set the icon name hint.
    pub fn icon<S: Into<String>>(mut self, icon: S) -> Self {
        self.record.icon = Some(icon.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> Record {
        self.record
    }
}
