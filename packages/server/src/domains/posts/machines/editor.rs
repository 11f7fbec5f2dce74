//! Admin post editor state machine
//!
//! `Idle -> Editing -> Submitting -> Idle`. A failed submit (validation or
//! store error) drops back to `Editing` with the draft intact and an error
//! notification queued; nothing in the store changes.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::common::{Notification, PostId};
use crate::domains::posts::models::{BlogPost, PostDraft};
use crate::domains::posts::PostError;
use crate::kernel::BasePostStore;

/// What the editor is writing to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing(PostId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Idle,
    Editing { target: EditorTarget, draft: PostDraft },
    Submitting { target: EditorTarget, draft: PostDraft },
}

impl EditorState {
    fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Editing { .. } => "editing",
            EditorState::Submitting { .. } => "submitting",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

#[derive(Debug)]
pub struct PostEditor {
    state: EditorState,
    notification: Option<Notification>,
}

impl Default for PostEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
            notification: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Open an empty form
    pub fn start_new(&mut self) -> Result<(), EditorError> {
        self.require_idle("start a new post")?;
        self.state = EditorState::Editing {
            target: EditorTarget::New,
            draft: PostDraft::default(),
        };
        Ok(())
    }

    /// Open the form pre-filled from an existing post
    pub fn start_edit(&mut self, post: &BlogPost) -> Result<(), EditorError> {
        self.require_idle("edit a post")?;
        self.state = EditorState::Editing {
            target: EditorTarget::Existing(post.id),
            draft: PostDraft::from_post(post),
        };
        Ok(())
    }

    /// Mutate the draft being edited
    pub fn update_draft(&mut self, edit: impl FnOnce(&mut PostDraft)) -> Result<(), EditorError> {
        match &mut self.state {
            EditorState::Editing { draft, .. } => {
                edit(draft);
                Ok(())
            }
            other => Err(EditorError::InvalidTransition {
                state: other.name(),
                action: "edit the draft",
            }),
        }
    }

    /// Editing -> Submitting; hands back what to write
    pub fn begin_submit(&mut self) -> Result<(EditorTarget, PostDraft), EditorError> {
        match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Editing { target, draft } => {
                self.state = EditorState::Submitting {
                    target,
                    draft: draft.clone(),
                };
                Ok((target, draft))
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(EditorError::InvalidTransition {
                    state,
                    action: "submit",
                })
            }
        }
    }

    /// Submitting -> Idle on success, Submitting -> Editing on failure
    pub fn finish_submit(
        &mut self,
        outcome: &Result<BlogPost, PostError>,
    ) -> Result<Notification, EditorError> {
        let (target, draft) = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Submitting { target, draft } => (target, draft),
            other => {
                let state = other.name();
                self.state = other;
                return Err(EditorError::InvalidTransition {
                    state,
                    action: "finish submitting",
                });
            }
        };

        let notification = match outcome {
            Ok(post) => {
                let verb = match target {
                    EditorTarget::New => "created",
                    EditorTarget::Existing(_) => "updated",
                };
                Notification::success(format!("Post \"{}\" {}", post.title, verb))
            }
            Err(e) => {
                self.state = EditorState::Editing { target, draft };
                Notification::error(e.user_message())
            }
        };

        self.notification = Some(notification.clone());
        Ok(notification)
    }

    /// Drop the draft and return to idle
    pub fn cancel(&mut self) {
        self.state = EditorState::Idle;
    }

    /// Notifications are shown once
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    fn require_idle(&self, action: &'static str) -> Result<(), EditorError> {
        match self.state {
            EditorState::Idle => Ok(()),
            ref other => Err(EditorError::InvalidTransition {
                state: other.name(),
                action,
            }),
        }
    }
}

/// Drive one submit through validation and the store
///
/// The editor ends `Idle` on success or back in `Editing` on failure, with the
/// matching notification queued either way.
pub async fn submit(
    editor: &mut PostEditor,
    store: &dyn BasePostStore,
    today: NaiveDate,
) -> Result<Result<BlogPost, PostError>, EditorError> {
    let (target, draft) = editor.begin_submit()?;

    let outcome = match draft.validate(today) {
        Ok(input) => match target {
            EditorTarget::New => store.create(input).await,
            EditorTarget::Existing(id) => store.update(id, input).await,
        },
        Err(e) => Err(e),
    };

    match &outcome {
        Ok(post) => debug!(post_id = %post.id, slug = %post.slug, "Post saved"),
        Err(e) => warn!(error = %e, "Post submit failed"),
    }

    editor.finish_submit(&outcome)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::posts::models::Category;
    use crate::kernel::memory::InMemoryPostStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    fn fill(draft: &mut PostDraft) {
        draft.title = "Finding the Right Therapist".to_string();
        draft.excerpt = "What to ask on a first call.".to_string();
        draft.content = "<p>Start with fit.</p>".to_string();
        draft.author_name = "Dr. Michael Chen".to_string();
        draft.category = Some(Category::Therapy);
    }

    #[tokio::test]
    async fn test_new_post_goes_idle_after_success() {
        let store = InMemoryPostStore::new();
        let mut editor = PostEditor::new();

        editor.start_new().unwrap();
        editor.update_draft(fill).unwrap();
        let post = submit(&mut editor, &store, today()).await.unwrap().unwrap();

        assert_eq!(post.slug, "finding-the-right-therapist");
        assert_eq!(editor.state(), &EditorState::Idle);
        let note = editor.take_notification().unwrap();
        assert!(!note.is_error());
        assert!(editor.take_notification().is_none());
    }

    #[tokio::test]
    async fn test_validation_failure_returns_to_editing() {
        let store = InMemoryPostStore::new();
        let mut editor = PostEditor::new();

        editor.start_new().unwrap();
        editor.update_draft(|d| d.title = "Only a title".to_string()).unwrap();
        let outcome = submit(&mut editor, &store, today()).await.unwrap();

        assert!(matches!(outcome, Err(PostError::Validation(_))));
        match editor.state() {
            EditorState::Editing { target, draft } => {
                assert_eq!(*target, EditorTarget::New);
                assert_eq!(draft.title, "Only a title");
            }
            other => panic!("expected editing, got {:?}", other),
        }
        assert!(editor.take_notification().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_store_failure_returns_to_editing() {
        let store = InMemoryPostStore::new();
        let mut editor = PostEditor::new();

        editor.start_new().unwrap();
        editor.update_draft(fill).unwrap();
        submit(&mut editor, &store, today()).await.unwrap().unwrap();

        // Same title again: slug collision
        editor.start_new().unwrap();
        editor.update_draft(fill).unwrap();
        let outcome = submit(&mut editor, &store, today()).await.unwrap();

        assert!(matches!(outcome, Err(PostError::SlugTaken(_))));
        assert!(matches!(editor.state(), EditorState::Editing { .. }));
    }

    #[tokio::test]
    async fn test_edit_existing_updates_in_place() {
        let store = InMemoryPostStore::new();
        let mut editor = PostEditor::new();
        editor.start_new().unwrap();
        editor.update_draft(fill).unwrap();
        let created = submit(&mut editor, &store, today()).await.unwrap().unwrap();

        editor.start_edit(&created).unwrap();
        editor.update_draft(|d| d.featured = true).unwrap();
        let updated = submit(&mut editor, &store, today()).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert!(updated.featured);
        assert!(editor.take_notification().unwrap().message.contains("updated"));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut editor = PostEditor::new();
        assert_eq!(
            editor.begin_submit().unwrap_err(),
            EditorError::InvalidTransition {
                state: "idle",
                action: "submit"
            }
        );
        assert!(editor.update_draft(|_| {}).is_err());

        editor.start_new().unwrap();
        assert!(editor.start_new().is_err());
        editor.begin_submit().unwrap();
        assert!(editor.update_draft(|_| {}).is_err());
        assert!(editor.begin_submit().is_err());
        assert!(matches!(editor.state(), EditorState::Submitting { .. }));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = PostEditor::new();
        editor.start_new().unwrap();
        editor.cancel();
        assert_eq!(editor.state(), &EditorState::Idle);
    }
}
