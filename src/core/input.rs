//! Backlog input loading
//!
//! Reads the JSON array of user stories named by `import.items_path`. Any problem
//! here is fatal for the run: nothing is sent until the whole file decodes.

use crate::domain::{ImportError, Result, UserStory};
use std::fs;
use std::path::Path;

/// Load user stories from a JSON file
///
/// # Errors
///
/// Returns [`ImportError::Input`] if the file cannot be read or is not a JSON
/// array of user stories.
///
/// # Example
///
/// ```no_run
/// use ado_batch::core::input::load_user_stories;
///
/// let stories = load_user_stories("data/items.json").expect("Failed to load backlog");
/// println!("{} user stories", stories.len());
/// ```
pub fn load_user_stories(path: impl AsRef<Path>) -> Result<Vec<UserStory>> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        ImportError::Input(format!(
            "Failed to read items file in location {}: {}",
            path.display(),
            e
        ))
    })?;

    let stories: Vec<UserStory> = serde_json::from_str(&contents).map_err(|e| {
        ImportError::Input(format!(
            "Failed to decode items file {}: {}",
            path.display(),
            e
        ))
    })?;

    for (index, story) in stories.iter().enumerate() {
        if story.name.trim().is_empty() {
            tracing::warn!(index, "User story has an empty name");
        }
    }

    tracing::info!(
        path = %path.display(),
        user_stories = stories.len(),
        tasks = stories.iter().map(|s| s.tasks.len()).sum::<usize>(),
        "Loaded backlog items"
    );

    Ok(stories)
}
