//! User-facing workflows: each one sequences a backend call and writes its
//! outcome into the shared [`StateStore`].

mod analysis;
mod bootstrap;
mod label;
mod search;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::TransportError;
use crate::food::api::Gateway;
use crate::food::state::{Tab, Ticket, ViewState};
use crate::food::store::StateStore;

pub const ANALYSIS_FAILED: &str = "Failed to analyze food item";
pub const LABEL_ANALYSIS_FAILED: &str = "Failed to analyze food label";

/// What became of a workflow invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions not met; no request was issued.
    Skipped,
    /// The response (or its error record) was written to the state.
    Applied,
    /// A newer request of the same workflow superseded this one; nothing was written.
    Stale,
}

#[derive(Clone)]
pub struct FoodScanner {
    gateway: Arc<dyn Gateway>,
    store: Arc<StateStore>,
    healthy_limit: u32,
}

impl FoodScanner {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<StateStore>, healthy_limit: u32) -> Self {
        Self {
            gateway,
            store,
            healthy_limit,
        }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn state(&self) -> ViewState {
        self.store.snapshot()
    }

    pub fn healthy_limit(&self) -> u32 {
        self.healthy_limit
    }

    pub fn switch_tab(&self, tab: Tab) {
        self.store.switch_tab(tab);
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let value = self.gateway.request(Method::GET, path, None).await?;
        decode(value)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, TransportError> {
        let value = self.gateway.request(Method::POST, path, Some(body)).await?;
        decode(value)
    }

    fn finish(&self, ticket: Ticket, apply: impl FnOnce(&mut ViewState)) -> Outcome {
        if self.store.finish(ticket, apply) {
            Outcome::Applied
        } else {
            Outcome::Stale
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    Ok(serde_json::from_value(value)?)
}


#[cfg(test)]
mod tests {
    use super::test_support::{food, scanner};
    use super::*;
    use crate::food::api::{search_path, ANALYZE_PATH};
    use crate::food::state::Workflow;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_finishing_first_keeps_analysis_loading() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::GET,
            &search_path("apple"),
            json!({ "results": [food("Apple", "Fruit")] }),
        );
        let release = gateway.gated(
            Method::POST,
            ANALYZE_PATH,
            json!({ "health_risk": "Low", "recommendations": [] }),
        );

        let probe = scanner.clone();
        let (analysis, _) = tokio::join!(scanner.analyze("Apple"), async move {
            assert_eq!(probe.search("apple").await, Outcome::Applied);

            let state = probe.state();
            assert_eq!(state.search_results.len(), 1);
            assert!(!state.is_loading(Workflow::Search));
            assert!(state.is_loading(Workflow::Analysis));
            assert!(state.loading());

            release.notify_one();
        });

        assert_eq!(analysis, Outcome::Applied);
        let state = scanner.state();
        assert!(!state.loading());
        assert_eq!(state.selected_food_name.as_deref(), Some("Apple"));
    }

    #[tokio::test]
    async fn test_stale_search_does_not_overwrite_newer() {
        let (scanner, gateway) = scanner();
        let release_old = gateway.gated(
            Method::GET,
            &search_path("pi"),
            json!({ "results": [food("Pie", "Dessert"), food("Pita", "Bread")] }),
        );
        gateway.on(
            Method::GET,
            &search_path("pizza"),
            json!({ "results": [food("Pizza", "Fast Food")] }),
        );

        let newer = scanner.clone();
        let (old, new) = tokio::join!(scanner.search("pi"), async move {
            let outcome = newer.search("pizza").await;
            release_old.notify_one();
            outcome
        });

        assert_eq!(old, Outcome::Stale);
        assert_eq!(new, Outcome::Applied);

        let state = scanner.state();
        assert_eq!(state.search_results.len(), 1);
        assert_eq!(state.search_results[0].name, "Pizza");
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_decode_failure_is_transport_error() {
        let (scanner, gateway) = scanner();
        gateway.on(Method::GET, "/food/categories", json!({ "categories": "not a list" }));

        let result: Result<crate::food::models::CategoriesResponse, _> =
            scanner.get("/food/categories").await;
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }
}
