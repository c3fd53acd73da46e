use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Closed vocabulary the backend uses for risk, processing and density ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    Low,
    Moderate,
    High,
    #[default]
    Unknown,
}

impl Level {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Level::Low,
            "moderate" => Level::Moderate,
            "high" => Level::High,
            _ => Level::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Moderate => "Moderate",
            Level::High => "High",
            Level::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rating as received: the parsed level plus the backend's own text for display.
///
/// Deserialisation never fails. Numeric scores, unexpected strings and nulls all
/// become `Level::Unknown`; the raw text is kept so the user still sees what the
/// backend sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelValue {
    pub level: Level,
    pub raw: Option<String>,
}

impl LevelValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => Self {
                level: Level::parse(s),
                raw: Some(s.clone()),
            },
            other => Self {
                level: Level::Unknown,
                raw: Some(other.to_string()),
            },
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl From<Level> for LevelValue {
    fn from(level: Level) -> Self {
        Self {
            level,
            raw: Some(level.as_str().to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for LevelValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl fmt::Display for LevelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => f.write_str(self.level.as_str()),
        }
    }
}

/// One row of the food database, as returned by search and the healthy-foods sample.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "Food_Name")]
    pub name: String,
    #[serde(rename = "Food_Category", default)]
    pub category: String,
    // The healthy-foods sample leaves calories out.
    #[serde(rename = "Calories_per_100g", default)]
    pub calories_per_100g: Option<f64>,
    #[serde(rename = "Processing_Level", default)]
    pub processing_level: LevelValue,
    #[serde(rename = "Nutritional_Density", default)]
    pub nutritional_density: LevelValue,
}

/// Health analysis of a single named food.
///
/// A failed request is stored as a record carrying only `error`, so "not analysed
/// yet" (no record) and "analysis failed" stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FoodAnalysis {
    #[serde(default)]
    pub health_risk: LevelValue,
    #[serde(default)]
    pub processing_level: LevelValue,
    #[serde(default)]
    pub nutritional_density: LevelValue,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FoodAnalysis {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A value from the label's nutrition table: usually a number, sometimes free text
/// such as a serving size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientValue::Number(n) => f.write_str(&trim_float(*n)),
            NutrientValue::Text(s) => f.write_str(s),
            NutrientValue::Other(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabelReading {
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub nutritional_data: Option<BTreeMap<String, NutrientValue>>,
    #[serde(default)]
    pub per_100g_data: Option<BTreeMap<String, NutrientValue>>,
    #[serde(default)]
    pub food_category: Option<String>,
    /// Backend estimate on a 1-10 scale, 10 being most processed.
    #[serde(default)]
    pub processing_level: Option<NutrientValue>,
    /// Backend estimate on a 1-10 scale, 10 being most nutrient dense.
    #[serde(default)]
    pub nutritional_density: Option<NutrientValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NutritionalAnalysis {
    /// 0-100
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub concerns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthAnalysis {
    #[serde(default)]
    pub predicted_disease: Option<String>,
    /// 0.0-1.0
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub nutritional_analysis: Option<NutritionalAnalysis>,
    #[serde(default)]
    pub all_probabilities: Option<BTreeMap<String, f64>>,
}

/// Top-level response of the label scan.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabelAnalysisResult {
    #[serde(default)]
    pub label_reading: Option<LabelReading>,
    #[serde(default)]
    pub health_analysis: Option<HealthAnalysis>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LabelAnalysisResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A file the user picked for scanning. Only the path is held; the bytes are read
/// when the upload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub path: PathBuf,
    pub file_name: String,
}

impl UploadedImage {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthyFoodsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub healthy_foods: Vec<FoodRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<FoodRecord>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole numbers print without a trailing `.0`.
pub(crate) fn trim_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
