//! Terminal rendering of the view state.

use colored::Colorize;
use std::collections::BTreeMap;

use crate::food::models::{FoodAnalysis, FoodRecord, LabelAnalysisResult, NutrientValue};
use crate::food::presentation::{
    badge, field_label, format_calories, format_confidence, format_health_score,
    risk_color_class,
};
use crate::food::state::{Section, Tab, ViewState, Workflow};

/// Draws every section eligible under the active tab.
pub fn render_view(state: &ViewState) -> String {
    let mut lines = vec![render_tabs(state.active_tab)];

    let busy = in_flight(state);
    if !busy.is_empty() {
        lines.push(format!("⏳ Working: {}", busy.join(", ")).yellow().to_string());
    }

    let sections = state.sections();
    if sections.is_empty() {
        lines.push(empty_hint(state.active_tab).dimmed().to_string());
    }
    for section in sections {
        lines.push(String::new());
        lines.push(render_section(state, section));
    }

    lines.join("\n")
}

pub fn render_section(state: &ViewState, section: Section) -> String {
    match section {
        Section::SearchResults => {
            let mut lines = vec![format!("🔍 Results for \"{}\":", state.search_query.trim())];
            for (i, food) in state.search_results.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, food_line(food, true)));
            }
            lines.join("\n")
        }
        Section::Analysis => match &state.analysis {
            Some(analysis) => render_analysis(state.selected_food_name.as_deref(), analysis),
            None => String::new(),
        },
        Section::HealthyFoods => {
            let mut lines = vec!["🥦 Healthy picks:".to_string()];
            for food in &state.healthy_foods {
                lines.push(format!("  • {}", food_line(food, false)));
            }
            lines.join("\n")
        }
        Section::UploadedImage => match &state.uploaded_image {
            Some(image) => format!(
                "🖼️  Image: {} ({})",
                image.file_name.bright_yellow(),
                image.path.display()
            ),
            None => String::new(),
        },
        Section::LabelAnalysis => match &state.label_analysis {
            Some(result) => render_label(result),
            None => String::new(),
        },
    }
}

pub fn render_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories loaded.".dimmed().to_string();
    }
    let mut lines = vec!["📂 Categories:".to_string()];
    lines.extend(categories.iter().map(|c| format!("  • {}", c)));
    lines.join("\n")
}

fn render_tabs(active: Tab) -> String {
    let tab = |tab: Tab, title: &str| {
        if tab == active {
            format!("[{}]", title).bold().to_string()
        } else {
            title.dimmed().to_string()
        }
    };
    format!("{} | {}", tab(Tab::Search, "Search"), tab(Tab::Scan, "Scan"))
}

fn empty_hint(tab: Tab) -> &'static str {
    match tab {
        Tab::Search => "Type a food name to search.",
        Tab::Scan => "Pick a label photo with: image <path>",
    }
}

fn in_flight(state: &ViewState) -> Vec<&'static str> {
    Workflow::ALL
        .iter()
        .filter(|w| state.is_loading(**w))
        .map(|w| match w {
            Workflow::Search => "search",
            Workflow::Analysis => "analysis",
            Workflow::LabelScan => "label scan",
        })
        .collect()
}

fn food_line(food: &FoodRecord, with_calories: bool) -> String {
    let mut line = format!("{} ({})", food.name.bold(), food.category);
    if with_calories {
        line.push_str(&format!(" - {}", format_calories(food.calories_per_100g)));
    }
    line.push_str(&format!(
        " · Processing: {} · Density: {}",
        badge(&food.processing_level),
        badge(&food.nutritional_density)
    ));
    line
}

fn render_analysis(name: Option<&str>, analysis: &FoodAnalysis) -> String {
    let mut lines = vec![format!("🧪 Analysis: {}", name.unwrap_or("?").bold())];
    if let Some(error) = &analysis.error {
        lines.push(format!("  ❌ {}", error).red().to_string());
        return lines.join("\n");
    }

    lines.push(format!("  Health risk: {}", badge(&analysis.health_risk)));
    lines.push(format!("  Processing: {}", badge(&analysis.processing_level)));
    lines.push(format!("  Nutritional density: {}", badge(&analysis.nutritional_density)));
    if !analysis.recommendations.is_empty() {
        lines.push("  💡 Recommendations:".to_string());
        lines.extend(analysis.recommendations.iter().map(|r| format!("    - {}", r)));
    }
    lines.join("\n")
}

fn render_label(result: &LabelAnalysisResult) -> String {
    let mut lines = vec!["📄 Label analysis".to_string()];
    if let Some(error) = &result.error {
        lines.push(format!("  ❌ {}", error).red().to_string());
        return lines.join("\n");
    }

    if let Some(reading) = &result.label_reading {
        if let Some(text) = reading.extracted_text.as_deref().filter(|t| !t.trim().is_empty()) {
            lines.push("  Extracted text:".to_string());
            lines.extend(text.lines().map(|l| format!("    {}", l.dimmed())));
        }
        if let Some(category) = &reading.food_category {
            lines.push(format!("  Category: {}", category));
        }
        if let Some(data) = &reading.nutritional_data {
            lines.extend(nutrient_table("Nutrition facts", data));
        }
        if let Some(data) = &reading.per_100g_data {
            lines.extend(nutrient_table("Per 100g", data));
        }
        if let Some(level) = &reading.processing_level {
            lines.push(format!("  Processing score: {}/10", level));
        }
        if let Some(density) = &reading.nutritional_density {
            lines.push(format!("  Density score: {}/10", density));
        }
    }

    if let Some(health) = &result.health_analysis {
        lines.push("  🩺 Health analysis:".to_string());
        if let Some(disease) = health.predicted_disease.as_deref() {
            let class = risk_color_class(Some(disease));
            lines.push(format!("    Predicted risk: {}", class.paint(disease)));
        }
        if let Some(confidence) = health.confidence {
            lines.push(format!("    Confidence: {}", format_confidence(confidence)));
        }
        if let Some(nutrition) = &health.nutritional_analysis {
            lines.push(format!(
                "    Health score: {}",
                format_health_score(nutrition.health_score)
            ));
            if let Some(concerns) = nutrition.concerns.as_ref().filter(|c| !c.is_empty()) {
                lines.push("    ⚠️  Concerns:".to_string());
                lines.extend(concerns.iter().map(|c| format!("      - {}", c)));
            }
            if let Some(recs) = nutrition.recommendations.as_ref().filter(|r| !r.is_empty()) {
                lines.push("    💡 Recommendations:".to_string());
                lines.extend(recs.iter().map(|r| format!("      - {}", r)));
            }
        }
        if let Some(probabilities) = health.all_probabilities.as_ref().filter(|p| !p.is_empty()) {
            let mut ranked: Vec<_> = probabilities.iter().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(a.1));
            lines.push("    Probabilities:".to_string());
            lines.extend(
                ranked
                    .into_iter()
                    .map(|(name, p)| format!("      {}: {}", name, format_confidence(*p))),
            );
        }
    }
    lines.join("\n")
}

fn nutrient_table(title: &str, data: &BTreeMap<String, NutrientValue>) -> Vec<String> {
    if data.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("  {}:", title)];
    lines.extend(
        data.iter()
            .map(|(key, value)| format!("    {}: {}", field_label(key), value)),
    );
    lines
}
