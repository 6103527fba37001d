//! Field mapping from backlog records to patch documents
//!
//! Every work item gets the same core fields in the same order: title,
//! description, assignee, priority, state, the automation tag and the area path.
//! Tasks always take the area of their user story and carry one extra relation
//! linking them to it.

use crate::adapters::devops::{
    fields, PatchOperation, RelationAttributes, WorkItemRelation, HIERARCHY_REVERSE,
};
use crate::domain::{Task, UserStory, WorkItemId};
use url::Url;

/// Tag stamped on every work item created by the importer
pub const AUTOMATION_TAG: &str = "system_automated";

/// Comment attached to the task → story link
pub const PARENT_LINK_COMMENT: &str = "Linking task to user story";

/// A user story that already exists remotely
#[derive(Debug, Clone, Copy)]
pub struct CreatedParent<'a> {
    /// The story as read from input
    pub story: &'a UserStory,

    /// Id assigned when the story was created
    pub id: WorkItemId,

    /// Iteration path resolved for the story, if any
    pub iteration: Option<&'a str>,
}

/// API URL of a work item, used as a relation target
///
/// ```
/// use ado_batch::core::mapping::work_item_url;
/// use ado_batch::domain::WorkItemId;
/// use url::Url;
///
/// let org = Url::parse("https://dev.azure.com/my-org").unwrap();
/// let id = WorkItemId::new(100).unwrap();
/// assert_eq!(
///     work_item_url(&org, id),
///     "https://dev.azure.com/my-org/_apis/wit/workItems/100"
/// );
/// ```
pub fn work_item_url(organization_url: &Url, id: WorkItemId) -> String {
    let mut url = organization_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(["_apis", "wit", "workItems", &id.to_string()]);
    }
    url.into()
}

/// Patch document creating a user story
pub fn user_story_document(story: &UserStory, iteration: Option<&str>) -> Vec<PatchOperation> {
    core_fields(
        &story.name,
        &story.description,
        &story.owner,
        story.priority,
        &story.state,
        &story.area,
        iteration,
    )
}

/// Patch document creating a task under an existing user story
pub fn task_document(
    task: &Task,
    parent: &CreatedParent<'_>,
    organization_url: &Url,
) -> Vec<PatchOperation> {
    let mut document = core_fields(
        &task.name,
        &task.description,
        &task.owner,
        task.priority,
        &task.state,
        &parent.story.area,
        parent.iteration,
    );

    document.push(PatchOperation::add_relation(WorkItemRelation {
        rel: HIERARCHY_REVERSE.to_string(),
        url: work_item_url(organization_url, parent.id),
        attributes: RelationAttributes {
            comment: PARENT_LINK_COMMENT.to_string(),
        },
    }));

    document
}

fn core_fields(
    name: &str,
    description: &str,
    owner: &str,
    priority: i32,
    state: &str,
    area: &str,
    iteration: Option<&str>,
) -> Vec<PatchOperation> {
    let mut document = vec![
        PatchOperation::add(fields::TITLE, name),
        PatchOperation::add(fields::DESCRIPTION, description),
        PatchOperation::add(fields::ASSIGNED_TO, owner),
        PatchOperation::add(fields::PRIORITY, priority),
        PatchOperation::add(fields::STATE, state),
        PatchOperation::add(fields::TAGS, AUTOMATION_TAG),
        PatchOperation::add(fields::AREA_PATH, area),
    ];

    if let Some(path) = iteration {
        document.push(PatchOperation::add(fields::ITERATION_PATH, path));
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::devops::{PatchOp, PatchValue};

    fn org(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn story() -> UserStory {
        UserStory {
            name: "US1".to_string(),
            item_type: "User Story".to_string(),
            description: "<b>As a user</b> I want <i>things</i>".to_string(),
            owner: "dev@example.com".to_string(),
            state: "New".to_string(),
            priority: 2,
            area: "Project\\TeamA".to_string(),
            path: "Project\\Sprint 1".to_string(),
            tasks: vec![Task {
                name: "T1".to_string(),
                item_type: "Task".to_string(),
                description: "Write the thing".to_string(),
                owner: "other@example.com".to_string(),
                state: "To Do".to_string(),
                priority: 1,
                estimate: 3,
            }],
            iteration: None,
            team: "TeamA".to_string(),
        }
    }

    fn value_at<'a>(document: &'a [PatchOperation], path: &str) -> Option<&'a PatchValue> {
        document.iter().find(|op| op.path == path).map(|op| &op.value)
    }

    #[test]
    fn test_user_story_document_order_and_values() {
        let story = story();
        let document = user_story_document(&story, None);

        let paths: Vec<&str> = document.iter().map(|op| op.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                fields::TITLE,
                fields::DESCRIPTION,
                fields::ASSIGNED_TO,
                fields::PRIORITY,
                fields::STATE,
                fields::TAGS,
                fields::AREA_PATH,
            ]
        );
        assert!(document.iter().all(|op| op.op == PatchOp::Add));
        assert_eq!(
            value_at(&document, fields::PRIORITY),
            Some(&PatchValue::Number(2))
        );
        assert_eq!(
            value_at(&document, fields::TAGS),
            Some(&PatchValue::Text(AUTOMATION_TAG.to_string()))
        );
    }

    #[test]
    fn test_fields_preserved_verbatim() {
        let story = story();
        let document = user_story_document(&story, None);

        assert_eq!(
            value_at(&document, fields::TITLE),
            Some(&PatchValue::Text(story.name.clone()))
        );
        assert_eq!(
            value_at(&document, fields::DESCRIPTION),
            Some(&PatchValue::Text(story.description.clone()))
        );
        assert_eq!(
            value_at(&document, fields::ASSIGNED_TO),
            Some(&PatchValue::Text(story.owner.clone()))
        );
        assert_eq!(
            value_at(&document, fields::STATE),
            Some(&PatchValue::Text(story.state.clone()))
        );
    }

    #[test]
    fn test_no_iteration_operation_without_resolution() {
        let mut story = story();
        story.iteration = Some("Sprint 1".to_string());
        let document = user_story_document(&story, None);
        assert!(value_at(&document, fields::ITERATION_PATH).is_none());
    }

    #[test]
    fn test_resolved_iteration_is_mapped() {
        let story = story();
        let document = user_story_document(&story, Some("Project\\Sprint 1"));
        assert_eq!(
            value_at(&document, fields::ITERATION_PATH),
            Some(&PatchValue::Text("Project\\Sprint 1".to_string()))
        );
    }

    #[test]
    fn test_task_document_links_to_parent_and_inherits_area() {
        let story = story();
        let parent = CreatedParent {
            story: &story,
            id: WorkItemId::new(100).unwrap(),
            iteration: None,
        };
        let document = task_document(&story.tasks[0], &parent, &org("https://dev.azure.com/my-org"));

        assert_eq!(document.len(), 8);
        assert_eq!(
            value_at(&document, fields::AREA_PATH),
            Some(&PatchValue::Text("Project\\TeamA".to_string()))
        );
        assert_eq!(
            value_at(&document, fields::TITLE),
            Some(&PatchValue::Text("T1".to_string()))
        );
        assert_eq!(
            value_at(&document, fields::PRIORITY),
            Some(&PatchValue::Number(1))
        );
        assert_eq!(
            value_at(&document, fields::TAGS),
            Some(&PatchValue::Text(AUTOMATION_TAG.to_string()))
        );

        let last = document.last().unwrap();
        assert_eq!(last.path, fields::RELATIONS);
        let relation = last.relation().unwrap();
        assert_eq!(relation.rel, HIERARCHY_REVERSE);
        assert_eq!(
            relation.url,
            "https://dev.azure.com/my-org/_apis/wit/workItems/100"
        );
        assert_eq!(relation.attributes.comment, PARENT_LINK_COMMENT);
    }

    #[test]
    fn test_task_document_carries_parent_iteration() {
        let story = story();
        let parent = CreatedParent {
            story: &story,
            id: WorkItemId::new(7).unwrap(),
            iteration: Some("Project\\Sprint 2"),
        };
        let document = task_document(&story.tasks[0], &parent, &org("https://dev.azure.com/o/"));
        assert_eq!(
            value_at(&document, fields::ITERATION_PATH),
            Some(&PatchValue::Text("Project\\Sprint 2".to_string()))
        );
        assert_eq!(
            document.last().and_then(|op| op.relation()).map(|r| r.url.as_str()),
            Some("https://dev.azure.com/o/_apis/wit/workItems/7")
        );
    }
}
