//! Iteration lookup capability
//!
//! A story may name its iteration explicitly or leave it to its team's next
//! sprint. Resolving either needs a lookup against the project's iteration tree,
//! which is modelled as an optional [`IterationResolver`]. The default
//! [`NoIterationResolver`] never resolves anything, so no iteration path is sent
//! and Azure DevOps falls back to the project's default iteration.

use crate::domain::UserStory;
use async_trait::async_trait;

/// Resolves iteration references to iteration paths
#[async_trait]
pub trait IterationResolver: Send + Sync {
    /// Iteration path of the next iteration for a team, by date
    async fn find_next_iteration(&self, team: &str) -> Option<String>;

    /// Iteration path for an iteration referenced by name
    async fn find_iteration(&self, iteration: &str) -> Option<String>;
}

/// Resolver used when no iteration lookup is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIterationResolver;

#[async_trait]
impl IterationResolver for NoIterationResolver {
    async fn find_next_iteration(&self, _team: &str) -> Option<String> {
        None
    }

    async fn find_iteration(&self, _iteration: &str) -> Option<String> {
        None
    }
}

/// Resolve the iteration path for a story
///
/// The story's explicit iteration reference wins; otherwise its team's next
/// iteration is used. Returns `None` when neither resolves.
pub async fn resolve_iteration(
    resolver: &dyn IterationResolver,
    story: &UserStory,
) -> Option<String> {
    if let Some(reference) = story.iteration.as_deref().filter(|s| !s.trim().is_empty()) {
        if let Some(path) = resolver.find_iteration(reference).await {
            return Some(path);
        }
        tracing::debug!(
            name = %story.name,
            iteration = %reference,
            "Iteration reference did not resolve"
        );
    }

    if story.team.trim().is_empty() {
        return None;
    }

    resolver.find_next_iteration(&story.team).await
}
