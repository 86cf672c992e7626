//! Overlay controller: service detail and image lightbox.
//!
//! Each overlay is either hidden or visible with populated content. The two
//! are independent; opening one never touches the other. Both start hidden.

use crate::catalog::{Catalog, GalleryImage, Service};
use crate::fragment;

/// Content of the service detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailContent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub specs: Vec<String>,
    /// Enquiry page link carrying the service title.
    pub enquiry_href: String,
}

impl DetailContent {
    pub fn for_service(service: &Service) -> Self {
        Self {
            id: service.id.clone(),
            title: service.title.clone(),
            description: service.description.clone(),
            specs: service.specs.clone(),
            enquiry_href: fragment::enquiry_link("enquiry.html", &service.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxContent {
    pub index: usize,
    pub src: String,
    pub alt: String,
}

impl LightboxContent {
    pub fn for_image(index: usize, image: &GalleryImage) -> Self {
        Self {
            index,
            src: image.src.clone(),
            alt: image.alt.clone(),
        }
    }
}

/// Where a click inside an open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay element itself, outside its content box.
    Backdrop,
    /// Anything inside the content box.
    Content,
    CloseButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay<C> {
    Hidden,
    Visible(C),
}

impl<C> Default for Overlay<C> {
    fn default() -> Self {
        Overlay::Hidden
    }
}

impl<C> Overlay<C> {
    pub fn is_visible(&self) -> bool {
        matches!(self, Overlay::Visible(_))
    }

    pub fn content(&self) -> Option<&C> {
        match self {
            Overlay::Visible(c) => Some(c),
            Overlay::Hidden => None,
        }
    }

    pub fn close(&mut self) {
        *self = Overlay::Hidden;
    }

    /// Close on the close control or a backdrop click; content clicks do nothing.
    pub fn click(&mut self, target: ClickTarget) {
        if matches!(target, ClickTarget::Backdrop | ClickTarget::CloseButton) {
            self.close();
        }
    }

    /// Value for the overlay element's `aria-hidden` attribute.
    pub fn aria_hidden(&self) -> &'static str {
        if self.is_visible() { "false" } else { "true" }
    }
}

/// The detail and lightbox overlays for one page.
#[derive(Debug, Default)]
pub struct Overlays {
    pub detail: Overlay<DetailContent>,
    pub lightbox: Overlay<LightboxContent>,
}

impl Overlays {
    /// Show the detail overlay for `id`. Unknown ids leave it untouched.
    pub fn open_detail(&mut self, catalog: &Catalog, id: &str) -> bool {
        match catalog.service(id) {
            Some(service) => {
                self.detail = Overlay::Visible(DetailContent::for_service(service));
                true
            }
            None => {
                tracing::debug!(id, "detail requested for unknown service");
                false
            }
        }
    }

    /// Show the lightbox for gallery image `index`. Out-of-range is a no-op.
    pub fn open_lightbox(&mut self, catalog: &Catalog, index: usize) -> bool {
        match catalog.image(index) {
            Some(image) => {
                self.lightbox = Overlay::Visible(LightboxContent::for_image(index, image));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stock_catalog;

    #[test]
    fn both_start_hidden() {
        let overlays = Overlays::default();
        assert!(!overlays.detail.is_visible());
        assert!(!overlays.lightbox.is_visible());
        assert_eq!(overlays.detail.aria_hidden(), "true");
    }

    #[test]
    fn open_detail_populates_content() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        assert!(overlays.open_detail(&catalog, "kerbs"));
        let content = overlays.detail.content().unwrap();
        assert_eq!(content.title, "Kerbs & Channels");
        assert_eq!(content.specs.len(), 2);
        assert_eq!(content.enquiry_href, "enquiry.html#service=Kerbs%20%26%20Channels");
        assert_eq!(overlays.detail.aria_hidden(), "false");
    }

    #[test]
    fn unknown_id_stays_hidden() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        assert!(!overlays.open_detail(&catalog, "does-not-exist"));
        assert_eq!(overlays.detail, Overlay::Hidden);
    }

    #[test]
    fn unknown_id_keeps_open_detail() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        overlays.open_detail(&catalog, "pavers");
        overlays.open_detail(&catalog, "nope");
        assert_eq!(overlays.detail.content().unwrap().id, "pavers");
    }

    #[test]
    fn overlays_are_independent() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        overlays.open_detail(&catalog, "pavers");
        overlays.open_lightbox(&catalog, 2);
        assert!(overlays.detail.is_visible());
        assert!(overlays.lightbox.is_visible());
        overlays.lightbox.close();
        assert!(overlays.detail.is_visible());
        assert!(!overlays.lightbox.is_visible());
    }

    #[test]
    fn lightbox_out_of_range_is_noop() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        assert!(!overlays.open_lightbox(&catalog, 99));
        assert!(!overlays.lightbox.is_visible());
    }

    #[test]
    fn clicks_on_content_do_not_close() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        overlays.open_lightbox(&catalog, 0);
        overlays.lightbox.click(ClickTarget::Content);
        assert!(overlays.lightbox.is_visible());
        overlays.lightbox.click(ClickTarget::Backdrop);
        assert!(!overlays.lightbox.is_visible());
    }

    #[test]
    fn close_button_closes() {
        let catalog = stock_catalog();
        let mut overlays = Overlays::default();
        overlays.open_detail(&catalog, "delivery");
        overlays.detail.click(ClickTarget::CloseButton);
        assert!(!overlays.detail.is_visible());
    }
}
