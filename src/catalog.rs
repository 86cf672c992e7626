//! The catalog store: services and gallery images.
//!
//! The catalog is built once at startup and never mutated afterwards. Every
//! other module borrows it: the query engine filters it, the renderer turns it
//! into cards, the overlay controller looks records up by id or index.
//!
//! ## Sources
//!
//! Without a `catalog.toml` in the content directory the stock catalog is
//! used. A catalog file replaces the stock data wholesale:
//!
//! ```toml
//! [[services]]
//! id = "pavers"
//! title = "Pavers & Interlocking Blocks"
//! category = "manufacturing"
//! short = "Driveways, patios and commercial yards."
//! description = "Slip-resistant finishes..."
//! specs = ["Thickness: 60/80mm"]
//! image = "https://example.com/pavers.jpg"
//!
//! [[gallery]]
//! src = "https://example.com/yard.jpg"
//! alt = "Paving example"
//! ```
//!
//! Unknown keys are rejected, service ids must be unique and titles non-empty.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Duplicate service id: {0}")]
    DuplicateId(String),
    #[error("Service {0} has an empty title")]
    EmptyTitle(String),
}

/// The fixed set of service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Manufacturing,
    Delivery,
    Installation,
    Technical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Manufacturing,
        Category::Delivery,
        Category::Installation,
        Category::Technical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Manufacturing => "manufacturing",
            Category::Delivery => "delivery",
            Category::Installation => "installation",
            Category::Technical => "technical",
        }
    }

    /// Human label used in filter controls.
    pub fn label(self) -> &'static str {
        match self {
            Category::Manufacturing => "Manufacturing",
            Category::Delivery => "Delivery & Logistics",
            Category::Installation => "Installation",
            Category::Technical => "Technical Support",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry describing a product or service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// One-line summary shown on cards.
    pub short: String,
    /// Long description shown in the detail overlay.
    pub description: String,
    #[serde(default)]
    pub specs: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// Immutable, ordered catalog of services and gallery images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    gallery: Vec<GalleryImage>,
}

impl Catalog {
    /// Build a catalog, enforcing unique ids and non-empty titles.
    pub fn new(services: Vec<Service>, gallery: Vec<GalleryImage>) -> Result<Self, CatalogError> {
        let catalog = Self { services, gallery };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::DuplicateId(service.id.clone()));
            }
            if service.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(service.id.clone()));
            }
        }
        Ok(())
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn gallery(&self) -> &[GalleryImage] {
        &self.gallery
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn image(&self, index: usize) -> Option<&GalleryImage> {
        self.gallery.get(index)
    }

    /// The first `count` services in store order, ignoring any query.
    pub fn preview(&self, count: usize) -> &[Service] {
        &self.services[..count.min(self.services.len())]
    }
}

/// Load `catalog.toml` from the content directory, or the stock catalog when
/// the file does not exist.
pub fn load_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    let path = root.join("catalog.toml");
    if !path.exists() {
        tracing::debug!("no catalog.toml in {}, using stock catalog", root.display());
        return Ok(stock_catalog());
    }
    let content = fs::read_to_string(&path)?;
    let catalog: Catalog = toml::from_str(&content)?;
    catalog.validate()?;
    tracing::info!(
        services = catalog.services.len(),
        images = catalog.gallery.len(),
        "loaded {}",
        path.display()
    );
    Ok(catalog)
}

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w={width}&q=60")
}

fn service(
    id: &str,
    title: &str,
    category: Category,
    short: &str,
    description: &str,
    specs: &[&str],
    photo: &str,
) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        category,
        short: short.to_string(),
        description: description.to_string(),
        specs: specs.iter().map(|s| s.to_string()).collect(),
        image: unsplash(photo, 800),
    }
}

fn gallery_image(photo: &str, alt: &str) -> GalleryImage {
    GalleryImage {
        src: unsplash(photo, 1200),
        alt: alt.to_string(),
    }
}

/// The built-in catalog shipped with the binary.
pub fn stock_catalog() -> Catalog {
    use Category::*;
    let services = vec![
        service(
            "stock-bricks",
            "Stock Bricks",
            Manufacturing,
            "Traditional face bricks for walls and domestic housing.",
            "Available in multiple colours and strengths. Manufactured to resist local climatic variations and designed for ease of laying.",
            &["SANS tested", "Colours: red, brown, facebrick", "MOQ: 500 units"],
            "1509395176047-4a66953fd231",
        ),
        service(
            "block-bricks",
            "Block Bricks (Hollow & Solid)",
            Manufacturing,
            "Structural and non-structural block solutions.",
            "High compressive strength options, suitable for load-bearing walls and civil applications.",
            &[
                "Height: 200mm standard",
                "Compressive strength: up to 10 MPa",
                "Available reinforced",
            ],
            "1554774853-d1c02a1aa0c2",
        ),
        service(
            "pavers",
            "Pavers & Interlocking Blocks",
            Manufacturing,
            "Driveways, patios and commercial yards.",
            "Slip-resistant finishes, multiple patterns and long-life performance under seasonal rains.",
            &[
                "Thickness: 60/80mm",
                "Colours & patterns",
                "Geotextile recommended for subbase",
            ],
            "1505765053127-7a1b2b4a0e7e",
        ),
        service(
            "kerbs",
            "Kerbs & Channels",
            Manufacturing,
            "Road edge kerbs and drainage channels.",
            "Manufactured to SANS tolerances and available in standard and custom profiles.",
            &["Standard profiles R221/R222", "Custom lengths on request"],
            "1508385082359-f0d6b6b2d0f1",
        ),
        service(
            "precast",
            "Concrete Columns & Precast",
            Manufacturing,
            "Structural columns, lintels and decorative precast elements.",
            "Custom sizes and reinforcement options for housing and light commercial frames.",
            &["Custom designs", "Factory-cured concrete", "Reinforced options"],
            "1560448204-e02f11c3d0e2",
        ),
        service(
            "delivery",
            "Delivery & Logistics",
            Delivery,
            "Site delivery across Gauteng & Mpumalanga.",
            "We coordinate truck loading, offloading and short-distance haulage with clear lead times and tracking for bulk orders.",
            &[
                "Tracked deliveries (X km radius)",
                "Cranes or manual offload options",
            ],
            "1519681393784-d120267933ba",
        ),
        service(
            "turnkey",
            "Turnkey Installation & Masonry",
            Installation,
            "Full site preparation, foundations and finishes.",
            "Experienced teams delivering small-to-medium residential builds and landscaping installations.",
            &["Site prep", "Masonry", "Finishes & handover"],
            "1541888946425-d81bb19240f5",
        ),
        service(
            "testing",
            "Technical Support & Testing",
            Technical,
            "Quality assurance testing and technical drawings.",
            "On-request cube-testing, compressive strength tests and SANS-compliant certificates for tenders.",
            &[
                "Cube testing",
                "Material specifications",
                "Technical documentation",
            ],
            "1521791136064-7986c2920216",
        ),
    ];

    let gallery = vec![
        gallery_image("1509395176047-4a66953fd231", "Brick production"),
        gallery_image("1542314831-068cd1dbfeeb", "Factory quality control"),
        gallery_image("1505765053127-7a1b2b4a0e7e", "Paving example"),
        gallery_image("1519681393784-d120267933ba", "Logistics truck"),
    ];

    Catalog { services, gallery }
}
