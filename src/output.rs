//! CLI output formatting for every subcommand.
//!
//! Output leads with what an entity *is* (positional index and title) and
//! shows identifiers, paths and links as indented context lines underneath.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Services
//! 001 Stock Bricks [manufacturing]
//!     Id: stock-bricks
//! 002 Delivery & Logistics [delivery]
//!     Id: delivery
//!
//! Gallery
//! 001 Brick production
//!
//! Config
//!     Source: config.toml
//!     Endpoint: https://formspree.io/f/abc
//! ```
//!
//! ## Search
//!
//! ```text
//! 2 services match "brick" (any, relevance)
//! 001 Stock Bricks [manufacturing]
//!     Traditional face bricks for walls and domestic housing.
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Services (delivery, relevance) → services-delivery-relevance.html
//!
//! Generated 15 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::catalog::{Catalog, Service};
use crate::config::SiteConfig;
use crate::generate::GeneratedPage;
use crate::overlay::DetailContent;
use crate::query::Query;
use crate::submit::{FallbackReason, SubmitOutcome};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Service header: positional index, title and category.
///
/// ```text
/// 001 Stock Bricks [manufacturing]
/// ```
fn service_header(index: usize, service: &Service) -> String {
    format!("{} {} [{}]", format_index(index), service.title, service.category)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Inventory of the catalog and the config it will be built with.
///
/// `config_source` names where the config came from (a file name, or
/// "stock defaults").
pub fn format_check_output(catalog: &Catalog, config: &SiteConfig, config_source: &str) -> Vec<String> {
    let mut lines = vec!["Services".to_string()];
    if catalog.services().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, service) in catalog.services().iter().enumerate() {
        lines.push(service_header(i + 1, service));
        lines.push(format!("    Id: {}", service.id));
        lines.push(format!("    Specs: {}", service.specs.len()));
    }

    lines.push(String::new());
    lines.push("Gallery".to_string());
    if catalog.gallery().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, image) in catalog.gallery().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.alt));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!("    Source: {config_source}"));
    lines.push(format!("    Endpoint: {}", config.submission.endpoint));
    lines.push(format!("    Contact: {}", config.contact.email));
    lines.push(format!(
        "    Map: {}",
        if config.map.enabled { "enabled" } else { "disabled" }
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, config: &SiteConfig, config_source: &str) {
    print_lines(format_check_output(catalog, config, config_source));
}

// ============================================================================
// search
// ============================================================================

pub fn format_search_output(query: &Query, results: &[&Service]) -> Vec<String> {
    let noun = if results.len() == 1 { "service" } else { "services" };
    let verb = if results.len() == 1 { "matches" } else { "match" };
    let mut lines = vec![format!(
        "{} {noun} {verb} \"{}\" ({}, {})",
        results.len(),
        query.term,
        query.category,
        query.sort
    )];
    for (i, service) in results.iter().enumerate() {
        lines.push(service_header(i + 1, service));
        lines.push(format!("    {}", truncate(&service.short, 60)));
    }
    lines
}

pub fn print_search_output(query: &Query, results: &[&Service]) {
    print_lines(format_search_output(query, results));
}

// ============================================================================
// show
// ============================================================================

/// Everything the detail overlay shows for one service.
pub fn format_detail(content: &DetailContent) -> Vec<String> {
    let mut lines = vec![content.title.clone(), format!("    {}", content.description)];
    for spec in &content.specs {
        lines.push(format!("    - {spec}"));
    }
    lines.push(format!("    Enquire: {}", content.enquiry_href));
    lines
}

pub fn print_detail(content: &DetailContent) {
    print_lines(format_detail(content));
}

// ============================================================================
// submit
// ============================================================================

pub fn format_submit_outcome(outcome: &SubmitOutcome) -> Vec<String> {
    let mut lines = vec![outcome.message().to_string()];
    match outcome {
        SubmitOutcome::Rejected { flagged, .. } => {
            for name in flagged {
                lines.push(format!("    Invalid: {name}"));
            }
        }
        SubmitOutcome::Sent { .. } => {}
        SubmitOutcome::FellBack { reason, mailto, .. } => {
            let why = match reason {
                FallbackReason::Status(code) => format!("server answered {code}"),
                FallbackReason::Transport(err) => err.clone(),
            };
            lines.push(format!("    Reason: {why}"));
            lines.push(format!("    Mail: {mailto}"));
        }
    }
    lines
}

pub fn print_submit_outcome(outcome: &SubmitOutcome) {
    print_lines(format_submit_outcome(outcome));
}

// ============================================================================
// build
// ============================================================================

pub fn format_generate_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|page| format!("{} \u{2192} {}", page.title, page.path))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} page{}",
        pages.len(),
        if pages.len() == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_generate_output(pages: &[GeneratedPage]) {
    print_lines(format_generate_output(pages));
}
