use log::error;
use serde_json::json;

use super::{FoodScanner, Outcome, ANALYSIS_FAILED};
use crate::food::api::ANALYZE_PATH;
use crate::food::models::FoodAnalysis;
use crate::food::state::Workflow;

impl FoodScanner {
    /// Requests a health analysis of `food_name`.
    ///
    /// On success the analysis and the name it was computed for are written
    /// together. On failure an error record takes the analysis slot and the
    /// previously selected name is kept.
    pub async fn analyze(&self, food_name: &str) -> Outcome {
        let ticket = self.store.begin(Workflow::Analysis);
        let body = json!({ "food_name": food_name });

        match self.post::<FoodAnalysis>(ANALYZE_PATH, body).await {
            Ok(analysis) => self.finish(ticket, |state| {
                state.analysis = Some(analysis);
                state.selected_food_name = Some(food_name.to_string());
            }),
            Err(e) => {
                error!("Analysis error: {}", e);
                self.finish(ticket, |state| {
                    state.analysis = Some(FoodAnalysis::failed(ANALYSIS_FAILED));
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::scanner;
    use super::*;
    use crate::food::models::Level;
    use reqwest::Method;

    #[tokio::test]
    async fn test_success_sets_analysis_and_name() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::POST,
            ANALYZE_PATH,
            json!({
                "health_risk": "Low",
                "processing_level": "Low",
                "nutritional_density": "High",
                "recommendations": ["Eat with the skin on."]
            }),
        );

        assert_eq!(scanner.analyze("apple").await, Outcome::Applied);

        let state = scanner.state();
        assert_eq!(state.selected_food_name.as_deref(), Some("apple"));
        let analysis = state.analysis.unwrap();
        assert!(analysis.error.is_none());
        assert_eq!(analysis.health_risk.level, Level::Low);
        assert_eq!(analysis.nutritional_density.level, Level::High);
        assert_eq!(analysis.recommendations, vec!["Eat with the skin on."]);
        assert!(!state.in_flight.any());

        let calls = gateway.calls();
        assert_eq!(calls[0].body, Some(json!({ "food_name": "apple" })));
    }

    #[tokio::test]
    async fn test_failure_keeps_selected_name() {
        let (scanner, gateway) = scanner();
        gateway.on(Method::POST, ANALYZE_PATH, json!({ "health_risk": "High" }));
        scanner.analyze("donut").await;

        gateway.fail(Method::POST, ANALYZE_PATH, 503);
        assert_eq!(scanner.analyze("kale").await, Outcome::Applied);

        let state = scanner.state();
        assert_eq!(
            state.analysis.as_ref().and_then(|a| a.error.as_deref()),
            Some(ANALYSIS_FAILED)
        );
        assert_eq!(state.selected_food_name.as_deref(), Some("donut"));
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_replace_newer_analysis() {
        let (scanner, gateway) = scanner();
        let release = gateway.gated_failure(Method::POST, ANALYZE_PATH, 500);

        let newer = scanner.clone();
        let gateway_for_newer = gateway.clone();
        let (old, new) = tokio::join!(scanner.analyze("donut"), async move {
            gateway_for_newer.on(Method::POST, ANALYZE_PATH, json!({ "health_risk": "Low" }));
            let outcome = newer.analyze("kale").await;
            release.notify_one();
            outcome
        });

        assert_eq!(old, Outcome::Stale);
        assert_eq!(new, Outcome::Applied);
        let state = scanner.state();
        assert!(!state.loading());
        assert_eq!(state.selected_food_name.as_deref(), Some("kale"));
        assert!(!state.analysis.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::POST,
            ANALYZE_PATH,
            json!({ "recommendations": "not a list" }),
        );

        scanner.analyze("apple").await;

        let state = scanner.state();
        assert!(state.analysis.unwrap().is_error());
        assert!(state.selected_food_name.is_none());
    }
}
