use log::{error, info};
use std::path::Path;

use super::{decode, FoodScanner, Outcome, LABEL_ANALYSIS_FAILED};
use crate::food::api::ANALYZE_LABEL_PATH;
use crate::food::models::{LabelAnalysisResult, UploadedImage};

impl FoodScanner {
    /// Holds `path` as the image to scan and clears any previous label result.
    /// Nothing about the file is checked here; the backend judges it.
    pub fn select_image(&self, path: impl AsRef<Path>) -> UploadedImage {
        let image = UploadedImage::from_path(path);
        info!("Selected label image {}", image.file_name);
        self.store.select_image(image.clone());
        image
    }

    /// Uploads the held image for label reading and health analysis.
    /// Skipped when no image has been selected.
    pub async fn analyze_label(&self) -> Outcome {
        let Some((image, ticket)) = self.store.begin_scan() else {
            return Outcome::Skipped;
        };

        let result = self
            .gateway
            .upload(ANALYZE_LABEL_PATH, &image)
            .await
            .and_then(decode::<LabelAnalysisResult>)
            .unwrap_or_else(|e| {
                error!("Label analysis error: {}", e);
                LabelAnalysisResult::failed(LABEL_ANALYSIS_FAILED)
            });

        self.finish(ticket, |state| state.label_analysis = Some(result))
    }
}
