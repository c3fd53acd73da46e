use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

use super::view::{render_categories, render_section, render_view};
use crate::food::state::{Section, Tab};
use crate::food::workflows::{FoodScanner, Outcome};

/// Runs `task` under a terminal spinner.
pub async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    let output = task.await;
    pb.finish_and_clear();
    output
}

pub async fn search(scanner: &FoodScanner, query: &str) -> Result<String, String> {
    if query.trim().is_empty() {
        return Err("Please specify a food to search. Usage: search <food>".to_string());
    }
    let outcome = with_spinner(&format!("Searching for {}...", query.trim()), scanner.search(query)).await;
    let state = scanner.state();
    match outcome {
        Outcome::Applied if state.search_results.is_empty() => {
            Ok(format!("No foods found for \"{}\".", query.trim()).yellow().to_string())
        }
        Outcome::Applied => Ok(render_section(&state, Section::SearchResults)),
        _ => Ok(String::new()),
    }
}

/// `target` is either a food name or the 1-based number of a search result.
pub async fn analyze(scanner: &FoodScanner, target: &str) -> Result<String, String> {
    let target = target.trim();
    if target.is_empty() {
        return Err("Please specify a food to analyze. Usage: analyze <name|number>".to_string());
    }
    let name = resolve_food(scanner, target);
    let outcome = with_spinner(&format!("Analyzing {}...", name), scanner.analyze(&name)).await;
    match outcome {
        Outcome::Applied => Ok(render_section(&scanner.state(), Section::Analysis)),
        _ => Ok(String::new()),
    }
}

pub async fn healthy(scanner: &FoodScanner, category: &str) -> Result<String, String> {
    let category = Some(category.trim()).filter(|c| !c.is_empty());
    let count = with_spinner("Fetching healthy foods...", scanner.refresh_healthy(category))
        .await
        .map_err(|e| format!("Failed to fetch healthy foods: {}", e))?;
    if count == 0 {
        return Ok("No healthy foods found.".yellow().to_string());
    }
    Ok(render_section(&scanner.state(), Section::HealthyFoods))
}

pub fn categories(scanner: &FoodScanner) -> Result<String, String> {
    Ok(scanner.store().read(|state| render_categories(&state.categories)))
}

pub fn select_image(scanner: &FoodScanner, path: &str) -> Result<String, String> {
    let path = path.trim();
    if path.is_empty() {
        return Err("Please specify an image file. Usage: image <path>".to_string());
    }
    let image = scanner.select_image(path);
    Ok(format!(
        "🖼️  Selected {}. Type 'scan' to analyze the label.",
        image.file_name.bright_yellow()
    ))
}

pub async fn scan(scanner: &FoodScanner) -> Result<String, String> {
    let outcome = with_spinner("Reading label...", scanner.analyze_label()).await;
    match outcome {
        Outcome::Skipped => Err("No image selected. Usage: image <path>".to_string()),
        Outcome::Applied => Ok(render_section(&scanner.state(), Section::LabelAnalysis)),
        Outcome::Stale => Ok(String::new()),
    }
}

pub fn switch_tab(scanner: &FoodScanner, tab: &str) -> Result<String, String> {
    if tab.trim().is_empty() {
        return Ok(format!("Current tab: {}", scanner.state().active_tab));
    }
    let tab: Tab = tab.parse()?;
    scanner.switch_tab(tab);
    Ok(render_view(&scanner.state()))
}

fn resolve_food(scanner: &FoodScanner, target: &str) -> String {
    let picked = target.parse::<usize>().ok().and_then(|n| {
        scanner.store().read(|state| {
            n.checked_sub(1)
                .and_then(|i| state.search_results.get(i))
                .map(|food| food.name.clone())
        })
    });
    picked.unwrap_or_else(|| target.to_string())
}
