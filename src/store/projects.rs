//! Saved analysis projects.

use super::{LocalStore, StoreError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

const PROJECTS_KEY: &str = "seo-projects";

/// A URL plus the optional inputs that go with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    /// Milliseconds since the epoch at save time.
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_keywords: Option<Vec<String>>,
    pub date: String,
}

/// What the user typed in before saving.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub url: String,
    pub html_snippet: Option<String>,
    /// Comma-separated keywords.
    pub keywords: Option<String>,
}

/// Splits a comma-separated list. `None` when nothing is left.
pub fn parse_keywords(raw: &str) -> Option<Vec<String>> {
    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

pub struct ProjectStore<'a> {
    store: &'a LocalStore,
}

impl<'a> ProjectStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// All saved projects, oldest first.
    pub fn list(&self) -> Result<Vec<SavedProject>, StoreError> {
        match self.store.get_item(PROJECTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: PROJECTS_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, projects: &[SavedProject]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(projects).map_err(|source| StoreError::Corrupt {
            key: PROJECTS_KEY.to_string(),
            source,
        })?;
        self.store.set_item(PROJECTS_KEY, &raw)
    }

    pub fn save(&self, draft: ProjectDraft) -> Result<SavedProject, StoreError> {
        let mut projects = self.list()?;

        let now = Utc::now();
        // ids must stay unique even for saves within the same millisecond
        let id = projects
            .iter()
            .map(|p| p.id + 1)
            .max()
            .map_or(now.timestamp_millis(), |next| next.max(now.timestamp_millis()));

        let name = draft
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Project {}", projects.len() + 1));

        let project = SavedProject {
            id,
            name,
            url: draft.url,
            html_snippet: draft.html_snippet.filter(|s| !s.is_empty()),
            target_keywords: draft.keywords.as_deref().and_then(parse_keywords),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        projects.push(project.clone());
        self.write(&projects)?;
        info!("Saved project {:?} ({})", project.name, project.id);
        Ok(project)
    }

    /// Looks a project up by id, then by exact name.
    pub fn find(&self, name_or_id: &str) -> Result<SavedProject, StoreError> {
        let projects = self.list()?;
        let by_id = name_or_id
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| projects.iter().find(|p| p.id == id));

        by_id
            .or_else(|| projects.iter().find(|p| p.name == name_or_id))
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(name_or_id.to_string()))
    }

    /// Returns whether anything was removed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut projects = self.list()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.write(&projects)?;
        info!("Deleted project {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn draft(url: &str) -> ProjectDraft {
        ProjectDraft {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords(" sourdough, , rye bread ,"),
            Some(vec!["sourdough".to_string(), "rye bread".to_string()])
        );
        assert_eq!(parse_keywords(" , "), None);
        assert_eq!(parse_keywords(""), None);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        let projects = ProjectStore::new(&store);

        let saved = projects
            .save(ProjectDraft {
                name: Some("Bakery".into()),
                url: "https://bakery.example".into(),
                html_snippet: Some("<h1>Bread</h1>".into()),
                keywords: Some("sourdough, rye".into()),
            })
            .unwrap();

        let reloaded = ProjectStore::new(&LocalStore::open(dir.path())).find("Bakery").unwrap();
        assert_eq!(reloaded, saved);
        assert_eq!(reloaded.url, "https://bakery.example");
        assert_eq!(reloaded.html_snippet.as_deref(), Some("<h1>Bread</h1>"));
        assert_eq!(reloaded.target_keywords, Some(vec!["sourdough".into(), "rye".into()]));
    }

    #[test]
    fn test_default_names_and_unique_ids() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        let projects = ProjectStore::new(&store);

        let first = projects.save(draft("a.example")).unwrap();
        let second = projects.save(draft("b.example")).unwrap();
        assert_eq!(first.name, "Project 1");
        assert_eq!(second.name, "Project 2");
        assert!(second.id > first.id);
        assert_eq!(second.target_keywords, None);

        assert_eq!(projects.find(&second.id.to_string()).unwrap().url, "b.example");
    }

    #[test]
    fn test_stored_json_shape() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        ProjectStore::new(&store).save(draft("a.example")).unwrap();

        let raw = store.get_item("seo-projects").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["url"], "a.example");
        assert!(value[0].get("htmlSnippet").is_none());
        assert!(value[0]["id"].is_i64());
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        let projects = ProjectStore::new(&store);
        let saved = projects.save(draft("a.example")).unwrap();

        assert!(projects.delete(saved.id).unwrap());
        assert!(!projects.delete(saved.id).unwrap());
        assert!(projects.list().unwrap().is_empty());
        assert!(matches!(projects.find("Project 1"), Err(StoreError::ProjectNotFound(_))));
    }

    #[test]
    fn test_corrupt_list_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        store.set_item("seo-projects", "not json").unwrap();
        assert!(matches!(
            ProjectStore::new(&store).list(),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
