//! Markup for cards, grids and overlays.
//!
//! Every render function returns a [`Rendered`]: the markup plus the list of
//! interactive triggers it contains. Rendering never attaches behaviour; the
//! [`interaction`](crate::interaction) binder does that from the trigger list.
//! A new render replaces the old output and trigger list wholesale.
//!
//! Overlays are `:target` sections. A "Details" trigger links to
//! `#detail-<id>`, a gallery thumbnail to `#image-<n>`, and both the close
//! control and the backdrop link back to `#`, so the pages work without a
//! script runtime.

use crate::catalog::{Catalog, Service};
use crate::overlay::{DetailContent, LightboxContent};
use crate::query::search_haystack;
use maud::{Markup, html};

/// An interactive element produced by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Open the detail overlay for a service id.
    ShowDetails { service_id: String },
    /// Open the lightbox on a gallery index.
    OpenLightbox { index: usize },
    /// Follow a link to another page.
    Navigate { href: String },
}

impl Trigger {
    pub fn href(&self) -> String {
        match self {
            Trigger::ShowDetails { service_id } => format!("#{}", detail_anchor(service_id)),
            Trigger::OpenLightbox { index } => format!("#{}", lightbox_anchor(*index)),
            Trigger::Navigate { href } => href.clone(),
        }
    }
}

pub fn detail_anchor(service_id: &str) -> String {
    format!("detail-{service_id}")
}

pub fn lightbox_anchor(index: usize) -> String {
    format!("image-{index}")
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub markup: Markup,
    pub triggers: Vec<Trigger>,
}

impl Rendered {
    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

/// Which page a card lives on; decides its navigation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardContext {
    /// Landing-page preview: "More" goes to the listing.
    Preview,
    /// Full listing: "Enquire" goes to the enquiry form.
    Listing,
}

impl CardContext {
    fn nav(self) -> (&'static str, &'static str) {
        match self {
            CardContext::Preview => ("More", "services.html"),
            CardContext::Listing => ("Enquire", "enquiry.html"),
        }
    }
}

/// One service card and the two triggers it carries.
pub fn service_card(service: &Service, context: CardContext) -> Rendered {
    let details = Trigger::ShowDetails {
        service_id: service.id.clone(),
    };
    let (nav_label, nav_href) = context.nav();
    let nav = Trigger::Navigate {
        href: nav_href.to_string(),
    };
    let lazy = (context == CardContext::Listing).then_some("lazy");

    let markup = html! {
        article.service-card data-id=(service.id) data-category=(service.category.as_str()) data-search=(search_haystack(service)) {
            img src=(service.image) alt=(service.title) loading=[lazy];
            h4 { (service.title) }
            p.small { (service.short) }
            div.card-actions {
                a.btn.small.show-service href=(details.href()) data-id=(service.id) { "Details" }
                a.btn.ghost.small href=(nav.href()) { (nav_label) }
            }
        }
    };

    Rendered {
        markup,
        triggers: vec![details, nav],
    }
}

fn cards<'a>(services: impl IntoIterator<Item = &'a Service>, context: CardContext) -> Rendered {
    let rendered: Vec<Rendered> = services
        .into_iter()
        .map(|service| service_card(service, context))
        .collect();
    let triggers = rendered
        .iter()
        .flat_map(|card| card.triggers.iter().cloned())
        .collect();
    let markup = html! {
        @for card in &rendered {
            (card.markup)
        }
    };
    Rendered { markup, triggers }
}

/// Landing-page preview: the first `count` services, ignoring any query.
pub fn render_preview(catalog: &Catalog, count: usize) -> Rendered {
    cards(catalog.preview(count), CardContext::Preview)
}

/// Full listing for a query result.
pub fn render_listing(results: &[&Service]) -> Rendered {
    cards(results.iter().copied(), CardContext::Listing)
}

/// Gallery thumbnails, each opening the lightbox on its index.
pub fn render_gallery(catalog: &Catalog) -> Rendered {
    let triggers: Vec<Trigger> = (0..catalog.gallery().len())
        .map(|index| Trigger::OpenLightbox { index })
        .collect();
    let markup = html! {
        @for (image, trigger) in catalog.gallery().iter().zip(&triggers) {
            a.gallery-link href=(trigger.href()) {
                img.gallery-thumb src=(image.src) alt=(image.alt) loading="lazy";
            }
        }
    };
    Rendered { markup, triggers }
}

fn modal(anchor: &str, title_id: Option<&str>, body: Markup) -> Markup {
    html! {
        section.modal id=(anchor) role="dialog" aria-modal="true" aria-labelledby=[title_id] {
            a.modal-backdrop href="#" aria-label="Close" {}
            div.modal-content {
                a.modal-close href="#" aria-label="Close" { "✕" }
                (body)
            }
        }
    }
}

/// Detail overlay section for one service.
pub fn detail_overlay(content: &DetailContent) -> Markup {
    let anchor = detail_anchor(&content.id);
    let title_id = format!("{anchor}-title");
    modal(
        &anchor,
        Some(&title_id),
        html! {
            h3 id=(title_id) { (content.title) }
            p { (content.description) }
            ul.specs {
                @for spec in &content.specs {
                    li { (spec) }
                }
            }
            a.btn href=(content.enquiry_href) { "Enquire about this" }
        },
    )
}

/// Detail overlays for every listed service.
pub fn detail_overlays<'a>(services: impl IntoIterator<Item = &'a Service>) -> Markup {
    html! {
        @for service in services {
            (detail_overlay(&DetailContent::for_service(service)))
        }
    }
}

pub fn lightbox(content: &LightboxContent) -> Markup {
    modal(
        &lightbox_anchor(content.index),
        None,
        html! {
            img.lightbox-image src=(content.src) alt=(content.alt);
        },
    )
}

pub fn lightboxes(catalog: &Catalog) -> Markup {
    html! {
        @for (index, image) in catalog.gallery().iter().enumerate() {
            (lightbox(&LightboxContent::for_image(index, image)))
        }
    }
}
