use log::{error, info};

use super::FoodScanner;
use crate::error::TransportError;
use crate::food::api::{healthy_path, CATEGORIES_PATH};
use crate::food::models::{CategoriesResponse, HealthyFoodsResponse};

impl FoodScanner {
    /// Startup fetch of the category list and the healthy-foods sample.
    ///
    /// Both requests run concurrently and land independently. Failures are logged
    /// and leave the field as it was.
    pub async fn bootstrap(&self) {
        futures::join!(self.load_categories(), self.load_healthy_foods());
    }

    /// Re-fetches the healthy-foods sample, optionally narrowed to one category.
    /// Returns how many foods were received.
    pub async fn refresh_healthy(&self, category: Option<&str>) -> Result<usize, TransportError> {
        let path = healthy_path(self.healthy_limit, category);
        let response = self.get::<HealthyFoodsResponse>(&path).await?;
        let count = response.healthy_foods.len();
        self.store.set_healthy_foods(response.healthy_foods);
        Ok(count)
    }

    async fn load_categories(&self) {
        match self.get::<CategoriesResponse>(CATEGORIES_PATH).await {
            Ok(response) => {
                info!("Loaded {} food categories", response.categories.len());
                self.store.set_categories(response.categories);
            }
            Err(e) => error!("Error fetching categories: {}", e),
        }
    }

    async fn load_healthy_foods(&self) {
        match self.refresh_healthy(None).await {
            Ok(count) => info!("Loaded {} healthy foods", count),
            Err(e) => error!("Error fetching healthy foods: {}", e),
        }
    }
}
