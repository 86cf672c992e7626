//! HTML site generation.
//!
//! Takes the catalog and site config and writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, services preview, search box
//! - **Services** (`/services.html`): full listing with filter/sort links and
//!   search, plus one detail overlay per service
//! - **Filtered listings** (`/services-<category>-<sort>.html`): one page per
//!   category filter and sort mode
//! - **Gallery** (`/gallery.html`): thumbnail grid and lightboxes
//! - **Enquiry** (`/enquiry.html`): enquiry form
//! - **Contact** (`/contact.html`): contact form and map
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── services.html
//! ├── services-any-alphabetical.html
//! ├── services-delivery-relevance.html
//! ├── ...
//! ├── gallery.html
//! ├── enquiry.html
//! └── contact.html
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles, including `:target` overlays
//! - `static/site.js`: `#q=` search, `#service=` prefill, home search forwarding
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::form::{EMAIL_PATTERN, Field, FieldKind, Form, PHONE_PATTERN, contact_form, enquiry_form};
use crate::map;
use crate::query::{CategoryFilter, Query, SortMode, filter_and_sort};
use crate::render::{self, Rendered};
use crate::submit::{FallbackReason, fallback_message, messages};
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// A page written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// Shared per-build context for page renderers.
struct Site<'a> {
    catalog: &'a Catalog,
    config: &'a SiteConfig,
    year: i32,
}

pub fn generate(
    catalog: &Catalog,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let site = Site {
        catalog,
        config,
        year: chrono::Local::now().year(),
    };

    fs::create_dir_all(output_dir)?;
    let mut pages = Vec::new();
    let mut write = |path: String, title: &str, markup: Markup| -> Result<(), GenerateError> {
        fs::write(output_dir.join(&path), markup.into_string())?;
        tracing::debug!("generated {path}");
        pages.push(GeneratedPage {
            title: title.to_string(),
            path,
        });
        Ok(())
    };

    write("index.html".into(), "Home", render_index(&site))?;
    write(
        "services.html".into(),
        "Services",
        render_services_page(&site, CategoryFilter::Any, SortMode::Relevance),
    )?;
    for category in CategoryFilter::all() {
        for sort in SortMode::ALL {
            let title = format!("Services ({category}, {sort})");
            write(
                listing_page(category, sort),
                &title,
                render_services_page(&site, category, sort),
            )?;
        }
    }
    write("gallery.html".into(), "Gallery", render_gallery_page(&site))?;
    write("enquiry.html".into(), "Enquiry", render_enquiry_page(&site))?;
    write("contact.html".into(), "Contact", render_contact_page(&site))?;

    tracing::info!(pages = pages.len(), "site generated at {}", output_dir.display());
    Ok(pages)
}

/// File name of a pre-rendered listing.
pub fn listing_page(category: CategoryFilter, sort: SortMode) -> String {
    format!("services-{category}-{sort}.html")
}

// ============================================================================
// HTML Components
// ============================================================================

const NAV: &[(&str, &str)] = &[
    ("index.html", "Home"),
    ("services.html", "Services"),
    ("gallery.html", "Gallery"),
    ("enquiry.html", "Enquiry"),
    ("contact.html", "Contact"),
];

/// Renders the base HTML document structure
fn base_document(site: &Site, title: &str, current: &str, head_extra: Markup, content: Markup) -> Markup {
    let full_title = format!("{title} | {}", site.config.site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                style { (PreEscaped(CSS)) }
                (head_extra)
            }
            body {
                (site_header(site, current))
                main { (content) }
                (site_footer(site))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with navigation; `current` is the active page.
fn site_header(site: &Site, current: &str) -> Markup {
    html! {
        header.site-header {
            a.brand href="index.html" { (site.config.site.name) }
            input.nav-toggle type="checkbox" id="menuToggle";
            label.nav-hamburger for="menuToggle" aria-label="Menu" { "☰" }
            nav.main-nav {
                ul {
                    @for (href, label) in NAV {
                        li class=[(*href == current).then_some("current")] {
                            a href=(href) { (label) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    let contact = &site.config.contact;
    html! {
        footer.site-footer {
            p {
                "© " span.year { (site.year) } " " (site.config.site.name)
                " · " (contact.address)
                " · " a href={ "mailto:" (contact.email) } { (contact.email) }
                " · " (contact.phone)
            }
        }
    }
}

fn service_grid(id: &str, rendered: Rendered) -> Markup {
    html! {
        div.services-grid id=(id) { (rendered.markup) }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Home page: hero, preview cards, search forwarding to the listing.
fn render_index(site: &Site) -> Markup {
    let preview = site.catalog.preview(site.config.listing.preview_count);
    let content = html! {
        section.hero {
            h1 { (site.config.site.name) }
            p.tagline { (site.config.site.tagline) }
            form.search-form id="homeSearch" action="services.html" method="get" {
                input type="search" id="serviceSearch" name="q" placeholder="Search services";
                button.btn type="submit" { "Search" }
            }
        }
        @if !preview.is_empty() {
            section.preview {
                h2 { "Our services" }
                (service_grid("servicesPreview", render::render_preview(site.catalog, site.config.listing.preview_count)))
                a.btn id="openServices" href="services.html" { "All services" }
            }
            (render::detail_overlays(preview))
        }
    };
    base_document(site, "Home", "index.html", html! {}, content)
}

/// Listing page for one category filter and sort mode.
fn render_services_page(site: &Site, category: CategoryFilter, sort: SortMode) -> Markup {
    let query = Query::new("", category, sort);
    let results = filter_and_sort(site.catalog, &query);

    let content = html! {
        h1 { "Services" }
        div.listing-controls {
            input type="search" id="servicesSearch" placeholder="Search services" aria-controls="servicesList";
            nav.filters aria-label="Category" {
                @for option in CategoryFilter::all() {
                    @let label = match option {
                        CategoryFilter::Any => "All",
                        CategoryFilter::Only(c) => c.label(),
                    };
                    a.filter.active[option == category] href=(listing_page(option, sort)) { (label) }
                }
            }
            nav.sorts aria-label="Sort" {
                @for mode in SortMode::ALL {
                    a.sort.active[mode == sort] href=(listing_page(category, mode)) {
                        @match mode {
                            SortMode::Relevance => { "Relevance" }
                            SortMode::Alphabetical => { "A–Z" }
                        }
                    }
                }
            }
        }
        (service_grid("servicesList", render::render_listing(&results)))
        p.empty-notice id="servicesEmpty" hidden[!results.is_empty()] { "No services match your search." }
        (render::detail_overlays(results.iter().copied()))
    };
    base_document(site, "Services", "services.html", html! {}, content)
}

fn render_gallery_page(site: &Site) -> Markup {
    let content = html! {
        h1 { "Gallery" }
        @if !site.catalog.gallery().is_empty() {
            div.gallery-grid id="galleryGrid" { (render::render_gallery(site.catalog).markup) }
            (render::lightboxes(site.catalog))
        }
    };
    base_document(site, "Gallery", "gallery.html", html! {}, content)
}

fn render_enquiry_page(site: &Site) -> Markup {
    let titles: Vec<&str> = site.catalog.services().iter().map(|s| s.title.as_str()).collect();
    let form = enquiry_form(&titles);
    let content = html! {
        h1 { "Request a quote" }
        p { "Tell us what you need and we will respond within 1 business day." }
        (render_form(site, &form))
    };
    base_document(site, "Enquiry", "enquiry.html", html! {}, content)
}

fn render_contact_page(site: &Site) -> Markup {
    let form = contact_form();
    let contact = &site.config.contact;
    let content = html! {
        h1 { "Contact us" }
        address {
            (contact.address) br;
            a href={ "mailto:" (contact.email) } { (contact.email) } br;
            (contact.phone)
        }
        (render_form(site, &form))
        (map::widget(&site.config.map))
    };
    base_document(site, "Contact", "contact.html", map::head(&site.config.map), content)
}

/// Renders a form from its field definitions.
///
/// Native validation is switched off; site.js applies the pipeline's rules
/// in the same order, reading the shared patterns from `data-*-pattern`.
/// The `required`/`minlength`/`pattern` attributes remain as hints.
fn render_form(site: &Site, form: &Form) -> Markup {
    let contact = &site.config.contact.email;
    let msgs = messages(form.kind);
    let http_failed = fallback_message(form.kind, &FallbackReason::Status(0), contact);
    let network_failed = fallback_message(form.kind, &FallbackReason::Transport(String::new()), contact);
    html! {
        form.site-form id=(form.kind.id()) method="post" action=(site.config.submission.endpoint) novalidate
            data-contact=(contact)
            data-email-pattern=(EMAIL_PATTERN)
            data-phone-pattern=(PHONE_PATTERN)
            data-invalid=(msgs.invalid)
            data-pending=(msgs.pending)
            data-success=(msgs.success)
            data-http-failed=(http_failed)
            data-network-failed=(network_failed)
            data-carries-service[form.kind.carries_service()] {
            @for field in &form.fields {
                (render_field(field))
            }
            p.form-result id=(form.kind.result_id()) aria-live="polite" {}
        }
    }
}

fn render_field(field: &Field) -> Markup {
    let min = field.min_length;
    let pattern = (field.name == "phone").then_some(PHONE_PATTERN);
    html! {
        @match &field.kind {
            FieldKind::Button => {
                button.btn type="submit" { (field.label) }
            }
            FieldKind::TextArea => {
                label {
                    (field.label)
                    textarea name=(field.name) rows="5" required[field.required] minlength=[min] {}
                }
            }
            FieldKind::Select(options) => {
                label {
                    (field.label)
                    select name=(field.name) required[field.required] {
                        option value="" { "Choose…" }
                        @for option in options {
                            option value=(option) { (option) }
                        }
                    }
                }
            }
            kind => {
                label {
                    (field.label)
                    input type=(kind.input_type()) name=(field.name) required[field.required] minlength=[min] pattern=[pattern];
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
