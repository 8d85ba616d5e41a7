//! egui review panel for one catalogue resource.

use edushare_core::{
    CatalogResult, HeadlessDocument, Library, Rating, RatingWidget, ResourceId, UserId,
    WidgetConfig,
};
use edushare_widgets::{RatingBadge, RatingStars};
use egui::Context;

/// Actions requested by the panel, applied by the host to its [`Library`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Store the user's review of a resource.
    SubmitReview {
        resource: ResourceId,
        rating: Rating,
        comment: String,
    },
}

/// State of the review panel.
pub struct UiState {
    pub resource: ResourceId,
    pub title: String,
    /// Average shown in the badge.
    pub average: Option<f64>,
    /// Comment being typed.
    pub comment: String,
    doc: HeadlessDocument,
    widget: Option<RatingWidget<HeadlessDocument>>,
}

impl UiState {
    /// Panel for `resource` as seen by `user`.
    ///
    /// The stars start at the user's existing rating, or unrated.
    pub fn for_resource(
        config: &WidgetConfig,
        library: &Library,
        user: UserId,
        resource: ResourceId,
    ) -> CatalogResult<Self> {
        let title = library.resource(resource)?.title.clone();
        let existing = library.reviews_for(resource).find(|r| r.user == user);
        let initial = existing.map(|r| r.rating.to_string());

        let mut doc = HeadlessDocument::new();
        doc.add_container(&config.container_id, &config.initial_attribute, initial.as_deref());
        doc.add_field(&config.field_id, "");
        let widget = RatingWidget::mount(&mut doc, config.clone());

        Ok(Self {
            resource,
            title,
            average: library.average_rating(resource),
            comment: existing.map(|r| r.comment.clone()).unwrap_or_default(),
            doc,
            widget,
        })
    }

    /// Rating currently shown by the stars, `None` while unrated.
    pub fn rating(&self) -> Option<Rating> {
        self.widget.as_ref().and_then(|w| w.rating())
    }

    /// The review the submit button would send.
    pub fn pending_review(&self) -> Option<UiAction> {
        Some(UiAction::SubmitReview {
            resource: self.resource,
            rating: self.rating()?,
            comment: self.comment.trim().to_string(),
        })
    }

    /// Re-read the average after the host applied an action.
    pub fn refresh(&mut self, library: &Library) {
        self.average = library.average_rating(self.resource);
    }
}

/// Render the review panel. Returns the action to apply, if any.
pub fn render_ui(ctx: &Context, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(&state.title);
        let _ = RatingBadge::new(state.average).show(ui);
        ui.separator();

        if let Some(widget) = state.widget.as_mut() {
            let stars = RatingStars::new(widget, &mut state.doc).show(ui);
            if let Some(rating) = stars.selected {
                log::debug!("Review panel rating set to {}", rating);
            }
        }
        ui.text_edit_multiline(&mut state.comment);

        let submit = ui.add_enabled(state.rating().is_some(), egui::Button::new("Submit review"));
        if submit.clicked() {
            action = state.pending_review();
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use edushare_core::NewResource;
    use egui::RawInput;

    fn library_with_review() -> (Library, UserId, ResourceId) {
        let mut library = Library::new();
        let alice = UserId::from_u128(1);
        let id = library
            .add_resource(alice, NewResource::new("notes.pdf").title("Notes"))
            .unwrap()
            .id;
        library
            .submit_review(alice, id, Rating::new(6).unwrap(), "clear")
            .unwrap();
        (library, alice, id)
    }

    #[test]
    fn test_starts_from_existing_review() {
        let (library, alice, id) = library_with_review();
        let state = UiState::for_resource(&WidgetConfig::default(), &library, alice, id).unwrap();

        assert_eq!(state.title, "Notes");
        assert_eq!(state.average, Some(6.0));
        assert_eq!(state.comment, "clear");
        assert_eq!(state.rating(), Rating::new(6).ok());
        assert_eq!(
            state.pending_review(),
            Some(UiAction::SubmitReview {
                resource: id,
                rating: Rating::new(6).unwrap(),
                comment: "clear".to_string(),
            })
        );
    }

    #[test]
    fn test_other_user_starts_unrated() {
        let (library, _, id) = library_with_review();
        let bob = UserId::from_u128(2);
        let state = UiState::for_resource(&WidgetConfig::default(), &library, bob, id).unwrap();

        assert_eq!(state.rating(), None);
        assert_eq!(state.pending_review(), None);
        assert!(state.comment.is_empty());
    }

    #[test]
    fn test_unknown_resource() {
        let (library, alice, _) = library_with_review();
        let missing = ResourceId::from_u128(99);
        assert!(UiState::for_resource(&WidgetConfig::default(), &library, alice, missing).is_err());
    }

    #[test]
    fn test_render_without_input_and_refresh() {
        let (mut library, alice, id) = library_with_review();
        let mut state =
            UiState::for_resource(&WidgetConfig::default(), &library, alice, id).unwrap();

        let ctx = Context::default();
        let mut action = None;
        let _ = ctx.run(RawInput::default(), |ctx| {
            action = render_ui(ctx, &mut state);
        });
        assert_eq!(action, None);

        let Some(UiAction::SubmitReview {
            resource,
            comment,
            ..
        }) = state.pending_review()
        else {
            panic!("Expected a pending review");
        };
        library
            .submit_review(UserId::from_u128(2), resource, Rating::MAX, &comment)
            .unwrap();
        state.refresh(&library);
        assert_eq!(state.average, Some(8.0));
    }
}
