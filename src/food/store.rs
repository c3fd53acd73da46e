use log::debug;
use parking_lot::Mutex;

use super::models::{FoodRecord, UploadedImage};
use super::state::{Tab, Ticket, ViewState, Workflow};

/// Sole owner of the view state. Every mutation goes through the lock, which is
/// never held across an `.await`.
#[derive(Debug, Default)]
pub struct StateStore {
    state: Mutex<ViewState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(tab: Tab) -> Self {
        Self {
            state: Mutex::new(ViewState {
                active_tab: tab,
                ..Default::default()
            }),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.state.lock().search_query = query.into();
    }

    /// Replaces the held image and drops any label result computed for the old one.
    /// A scan of the old image that is still in flight will not be written.
    pub fn select_image(&self, image: UploadedImage) {
        let mut state = self.state.lock();
        state.uploaded_image = Some(image);
        state.label_analysis = None;
        state.in_flight.invalidate(Workflow::LabelScan);
    }

    pub fn switch_tab(&self, tab: Tab) {
        self.state.lock().active_tab = tab;
    }

    pub fn set_categories(&self, categories: Vec<String>) {
        self.state.lock().categories = categories;
    }

    pub fn set_healthy_foods(&self, foods: Vec<FoodRecord>) {
        self.state.lock().healthy_foods = foods;
    }

    /// Marks a request as outstanding for `workflow`.
    pub fn begin(&self, workflow: Workflow) -> Ticket {
        self.state.lock().in_flight.issue(workflow)
    }

    /// Takes the held image and marks a label scan of it as outstanding, under one
    /// lock so a concurrent `select_image` either precedes the ticket or stales it.
    pub fn begin_scan(&self) -> Option<(UploadedImage, Ticket)> {
        let mut state = self.state.lock();
        let image = state.uploaded_image.clone()?;
        let ticket = state.in_flight.issue(Workflow::LabelScan);
        Some((image, ticket))
    }

    /// Retires `ticket` and applies its outcome, unless a newer request of the same
    /// workflow was issued meanwhile. Returns whether the outcome was applied.
    pub fn finish(&self, ticket: Ticket, apply: impl FnOnce(&mut ViewState)) -> bool {
        let mut state = self.state.lock();
        if state.in_flight.complete(ticket) {
            apply(&mut state);
            true
        } else {
            debug!(
                "Discarding stale {:?} response (request #{})",
                ticket.workflow, ticket.seq
            );
            false
        }
    }
}
