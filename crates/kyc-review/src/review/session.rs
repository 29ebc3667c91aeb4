//! Reviewer session state machine.
//!
//! A session holds the in-memory UI state for one review screen: the
//! moderation modal, the image zoom modal, the selected result card, and the
//! show-more toggle. Transitions fire on reviewer clicks; the only
//! asynchronous edge is the refetch requested whenever the moderation modal
//! toggles, which the shell performs and feeds back through
//! [`ReviewSession::accept_snapshot`].

use super::moderation::{Moderation, ModerationStatus};

/// The flattened three-card layout of the results modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectedCard {
    #[default]
    Ocr,
    Face,
    Liveliness,
}

impl SelectedCard {
    pub const fn label(self) -> &'static str {
        match self {
            SelectedCard::Ocr => "ocr",
            SelectedCard::Face => "face",
            SelectedCard::Liveliness => "liveliness",
        }
    }
}

/// Side effect a transition asks the shell to perform. Refetches are
/// fire-and-forget: they never gate the transition itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    /// Re-read the KYC record; the epoch fences the eventual response.
    Refetch { epoch: u64 },
}

/// What the moderation modal should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView {
    Closed,
    /// Pipeline still running; results and card navigation are suppressed.
    Waiting,
    /// Pipeline reported failure; terminal for this session's modal.
    Failed,
    Results(SelectedCard),
}

#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    review_modal_open: bool,
    selected_image: Option<String>,
    selected_card: SelectedCard,
    show_extracted_images: bool,
    update_in_flight: bool,
    fetch_epoch: u64,
    accepted_epoch: u64,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn review_modal_open(&self) -> bool {
        self.review_modal_open
    }

    pub fn selected_card(&self) -> SelectedCard {
        self.selected_card
    }

    pub fn show_extracted_images(&self) -> bool {
        self.show_extracted_images
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    pub fn update_in_flight(&self) -> bool {
        self.update_in_flight
    }

    /// Open or close the moderation modal. Either direction requests a
    /// refetch so the snapshot is current both entering and leaving; no
    /// other selection state is reset.
    pub fn toggle_review_modal(&mut self) -> SessionEffect {
        self.review_modal_open = !self.review_modal_open;
        self.fetch_epoch += 1;
        SessionEffect::Refetch {
            epoch: self.fetch_epoch,
        }
    }

    /// Fence an arriving snapshot against out-of-order completion: a fetch
    /// older than the newest accepted one is discarded.
    pub fn accept_snapshot(&mut self, epoch: u64) -> bool {
        if epoch < self.accepted_epoch {
            return false;
        }
        self.accepted_epoch = epoch;
        true
    }

    pub fn select_card(&mut self, card: SelectedCard) {
        self.selected_card = card;
    }

    /// Show-more control for the extracted OCR images; independent of every
    /// other axis.
    pub fn toggle_show_more(&mut self) -> bool {
        self.show_extracted_images = !self.show_extracted_images;
        self.show_extracted_images
    }

    pub fn open_image_modal(&mut self, reference: impl Into<String>) {
        self.selected_image = Some(reference.into());
    }

    pub fn close_image_modal(&mut self) {
        self.selected_image = None;
    }

    pub fn image_modal_open(&self) -> bool {
        self.selected_image.is_some()
    }

    /// Approve/decline concurrency gate. Returns false when a request is
    /// already in flight, refusing a duplicate submission.
    pub fn begin_status_update(&mut self) -> bool {
        if self.update_in_flight {
            return false;
        }
        self.update_in_flight = true;
        true
    }

    pub fn finish_status_update(&mut self) {
        self.update_in_flight = false;
    }

    /// Resolve the modal's current view. Rendering branches on the
    /// moderation status before any card navigation: `Pending` and `Failed`
    /// block the results outright. An absent moderation branch renders the
    /// results view with all-default verdicts.
    pub fn modal_view(&self, moderation: Option<&Moderation>) -> ModalView {
        if !self.review_modal_open {
            return ModalView::Closed;
        }
        match moderation.map(|m| m.status) {
            Some(ModerationStatus::Pending) => ModalView::Waiting,
            Some(ModerationStatus::Failed) => ModalView::Failed,
            Some(ModerationStatus::Completed) | None => ModalView::Results(self.selected_card),
        }
    }
}
