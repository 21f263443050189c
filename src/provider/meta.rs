//! Display metadata for ranked results.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::query::ranker::RecordHit;
use crate::record::LaunchTarget;

/// Everything the presentation layer needs to show one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    /// Stable identifier of the result. This is the record location.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Location identifier.
    pub location: String,
    /// Icon name, if one could be resolved.
    pub icon: Option<String>,
    /// Handler used when the result is activated.
    pub launch_target: LaunchTarget,
    /// Relevance score.
    pub score: u32,
}

impl ResultMeta {
    /// Build metadata for a hit, resolving the icon if the record has no hint.
    pub fn from_hit(hit: &RecordHit, icons: Option<&dyn IconResolver>) -> Self {
        let record = &hit.record;
        let icon = record
            .icon
            .clone()
            .or_else(|| icons.and_then(|resolver| resolver.icon_for(&record.location)));

        ResultMeta {
            id: record.location.clone(),
            name: record.name.clone(),
            location: record.location.clone(),
            icon,
            launch_target: record.launch_target.clone(),
            score: hit.score,
        }
    }
}

/// Looks up an icon name for a location.
pub trait IconResolver: Send + Sync + Debug {
    /// Get an icon name for `location`, if any.
    fn icon_for(&self, location: &str) -> Option<String>;
}

/// Maps file extensions to freedesktop icon names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionIconResolver;

impl ExtensionIconResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        ExtensionIconResolver
    }
}

impl IconResolver for ExtensionIconResolver {
    fn icon_for(&self, location: &str) -> Option<String> {
        if location.ends_with('/') {
            return Some("folder".to_string());
        }

        let file_name = location.rsplit('/').next().unwrap_or(location);
        let extension = file_name.rsplit_once('.')?.1.to_lowercase();

        let icon = match extension.as_str() {
            "pdf" => "application-pdf",
            "txt" | "md" | "rst" | "log" => "text-x-generic",
            "rs" | "c" | "h" | "py" | "js" | "sh" => "text-x-script",
            "html" | "htm" => "text-html",
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => "image-x-generic",
            "mp3" | "ogg" | "flac" | "wav" => "audio-x-generic",
            "mp4" | "mkv" | "webm" | "avi" => "video-x-generic",
            "odt" | "doc" | "docx" => "x-office-document",
            "ods" | "xls" | "xlsx" | "csv" => "x-office-spreadsheet",
            "odp" | "ppt" | "pptx" => "x-office-presentation",
            "zip" | "tar" | "gz" | "xz" | "7z" => "package-x-generic",
            _ => return None,
        };
        Some(icon.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::record::Record;

    #[test]
    fn test_extension_icons() {
        let resolver = ExtensionIconResolver::new();
        assert_eq!(
            resolver.icon_for("file:///home/u/budget.PDF").as_deref(),
            Some("application-pdf")
        );
        assert_eq!(
            resolver.icon_for("file:///home/u/notes.md").as_deref(),
            Some("text-x-generic")
        );
        assert_eq!(resolver.icon_for("file:///home/u/").as_deref(), Some("folder"));
        assert_eq!(resolver.icon_for("file:///home/u/Makefile"), None);
        assert_eq!(resolver.icon_for("file:///home/u/a.unknown"), None);
    }

    #[test]
    fn test_meta_prefers_record_icon() {
        let record = Record::builder()
            .name("budget")
            .location("file:///budget.pdf")
            .icon("custom-icon")
            .build();
        let hit = RecordHit::new(Arc::new(record), 4);

        let meta = ResultMeta::from_hit(&hit, Some(&ExtensionIconResolver));
        assert_eq!(meta.icon.as_deref(), Some("custom-icon"));
        assert_eq!(meta.id, "file:///budget.pdf");
        assert_eq!(meta.location, "file:///budget.pdf");
        assert_eq!(meta.name, "budget");
        assert_eq!(meta.score, 4);
    }

    #[test]
    fn test_meta_falls_back_to_resolver() {
        let hit = RecordHit::new(Arc::new(Record::new("budget", "file:///budget.pdf")), 1);

        let meta = ResultMeta::from_hit(&hit, Some(&ExtensionIconResolver));
        assert_eq!(meta.icon.as_deref(), Some("application-pdf"));

        let meta = ResultMeta::from_hit(&hit, None);
        assert_eq!(meta.icon, None);
    }
}
