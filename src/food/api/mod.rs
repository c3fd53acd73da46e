pub mod http;
pub mod traits;

#[cfg(test)]
pub(crate) mod scripted;

pub use http::HttpGateway;
pub use traits::Gateway;

pub const CATEGORIES_PATH: &str = "/food/categories";
pub const HEALTHY_PATH: &str = "/food/healthy";
pub const SEARCH_PATH: &str = "/food/search";
pub const ANALYZE_PATH: &str = "/food/analyze";
pub const ANALYZE_LABEL_PATH: &str = "/food/analyze-from-label";

pub fn search_path(query: &str) -> String {
    format!("{}?query={}", SEARCH_PATH, urlencoding::encode(query))
}

pub fn healthy_path(limit: u32, category: Option<&str>) -> String {
    match category {
        Some(category) => format!(
            "{}?limit={}&category={}",
            HEALTHY_PATH,
            limit,
            urlencoding::encode(category)
        ),
        None => format!("{}?limit={}", HEALTHY_PATH, limit),
    }
}
