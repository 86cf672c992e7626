//! Binds rendered triggers to overlay and navigation behaviour.
//!
//! A [`Session`] models one page: it owns the currently bound trigger set and
//! the page's overlays. Binding a new render discards every previous binding,
//! the same way replacing markup discards the handlers attached to it.

use crate::catalog::Catalog;
use crate::overlay::Overlays;
use crate::query::{Query, filter_and_sort};
use crate::render::{self, Rendered, Trigger};

/// What activating a trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    DetailOpened,
    LightboxOpened,
    Navigate(String),
    /// The trigger is not bound, or its target does not exist.
    Ignored,
}

pub struct Session<'a> {
    catalog: &'a Catalog,
    bound: Vec<Trigger>,
    pub overlays: Overlays,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            bound: Vec::new(),
            overlays: Overlays::default(),
        }
    }

    /// Replace the bound trigger set with the one from `rendered`.
    pub fn bind(&mut self, rendered: &Rendered) {
        self.bound = rendered.triggers.clone();
    }

    pub fn bound(&self) -> &[Trigger] {
        &self.bound
    }

    /// Render the listing for `query` and bind its triggers.
    pub fn render_listing(&mut self, query: &Query) -> Rendered {
        let results = filter_and_sort(self.catalog, query);
        let rendered = render::render_listing(&results);
        self.bind(&rendered);
        rendered
    }

    /// Render the gallery grid and bind its triggers.
    pub fn render_gallery(&mut self) -> Rendered {
        let rendered = render::render_gallery(self.catalog);
        self.bind(&rendered);
        rendered
    }

    /// Dispatch a trigger. Triggers from a previous render are ignored.
    pub fn activate(&mut self, trigger: &Trigger) -> Effect {
        if !self.bound.contains(trigger) {
            tracing::debug!(?trigger, "activation of unbound trigger ignored");
            return Effect::Ignored;
        }
        match trigger {
            Trigger::ShowDetails { service_id } => {
                if self.overlays.open_detail(self.catalog, service_id) {
                    Effect::DetailOpened
                } else {
                    Effect::Ignored
                }
            }
            Trigger::OpenLightbox { index } => {
                if self.overlays.open_lightbox(self.catalog, *index) {
                    Effect::LightboxOpened
                } else {
                    Effect::Ignored
                }
            }
            Trigger::Navigate { href } => Effect::Navigate(href.clone()),
        }
    }
}
