use std::fmt;
use std::str::FromStr;

use super::models::{FoodAnalysis, FoodRecord, LabelAnalysisResult, UploadedImage};

/// Which half of the tool the user is looking at. Switching never clears data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Scan,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" => Ok(Tab::Search),
            "scan" | "label" => Ok(Tab::Scan),
            _ => Err(format!("Unknown tab: {}. Use search or scan", s)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Search => write!(f, "search"),
            Tab::Scan => write!(f, "scan"),
        }
    }
}

/// Workflows that hold the loading state while their request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Search,
    Analysis,
    LabelScan,
}

impl Workflow {
    pub const ALL: [Workflow; 3] = [Workflow::Search, Workflow::Analysis, Workflow::LabelScan];

    fn index(self) -> usize {
        match self {
            Workflow::Search => 0,
            Workflow::Analysis => 1,
            Workflow::LabelScan => 2,
        }
    }
}

/// Proof that a request was issued; handed back when its outcome arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub workflow: Workflow,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Lane {
    issued: u64,
    pending: u32,
}

/// Outstanding requests, tracked per workflow.
///
/// Each workflow has its own pending count, so one finishing never clears
/// another's loading state, and its own sequence, so only the newest request's
/// outcome may be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    lanes: [Lane; 3],
}

impl InFlight {
    pub fn issue(&mut self, workflow: Workflow) -> Ticket {
        let lane = &mut self.lanes[workflow.index()];
        lane.issued += 1;
        lane.pending += 1;
        Ticket {
            workflow,
            seq: lane.issued,
        }
    }

    /// Makes every outstanding ticket of `workflow` stale without issuing a new one.
    pub fn invalidate(&mut self, workflow: Workflow) {
        self.lanes[workflow.index()].issued += 1;
    }

    /// Retires the ticket. Returns whether it was the latest one issued for its workflow.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        let lane = &mut self.lanes[ticket.workflow.index()];
        lane.pending = lane.pending.saturating_sub(1);
        ticket.seq == lane.issued
    }

    pub fn is_pending(&self, workflow: Workflow) -> bool {
        self.lanes[workflow.index()].pending > 0
    }

    pub fn any(&self) -> bool {
        Workflow::ALL.iter().any(|w| self.is_pending(*w))
    }
}

/// A block of output that may be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    SearchResults,
    Analysis,
    HealthyFoods,
    UploadedImage,
    LabelAnalysis,
}

/// Everything the presentation layer draws from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search_query: String,
    pub search_results: Vec<FoodRecord>,
    pub selected_food_name: Option<String>,
    pub analysis: Option<FoodAnalysis>,
    pub categories: Vec<String>,
    pub healthy_foods: Vec<FoodRecord>,
    pub label_analysis: Option<LabelAnalysisResult>,
    pub uploaded_image: Option<UploadedImage>,
    pub active_tab: Tab,
    pub in_flight: InFlight,
}

impl ViewState {
    pub fn loading(&self) -> bool {
        self.in_flight.any()
    }

    pub fn is_loading(&self, workflow: Workflow) -> bool {
        self.in_flight.is_pending(workflow)
    }

    /// Sections with something to show under the active tab, in display order.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::new();
        match self.active_tab {
            Tab::Search => {
                if !self.search_results.is_empty() {
                    sections.push(Section::SearchResults);
                }
                if self.analysis.is_some() {
                    sections.push(Section::Analysis);
                }
                if !self.healthy_foods.is_empty() {
                    sections.push(Section::HealthyFoods);
                }
            }
            Tab::Scan => {
                if self.uploaded_image.is_some() {
                    sections.push(Section::UploadedImage);
                }
                if self.label_analysis.is_some() {
                    sections.push(Section::LabelAnalysis);
                }
            }
        }
        sections
    }
}
