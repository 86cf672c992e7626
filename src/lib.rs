//! # Brickyard
//!
//! A static marketing site for a building materials supplier, plus the form
//! pipeline behind its enquiry and contact pages.
//!
//! The catalog (services and gallery images) and a `config.toml` are the only
//! inputs. The output is plain HTML with embedded CSS and a small script; the
//! pages work without the script, which only adds live search, form
//! prefilling and JSON form submission.
//!
//! # Architecture
//!
//! ```text
//! catalog.toml ─┐
//!               ├─▶ query (filter + sort) ─▶ render (cards, overlays) ─▶ generate ─▶ dist/
//! config.toml ──┘                                                        ▲
//!                   form definitions ─────────────────────────────────────┘
//!                        │
//!                        └─▶ submit: validate ─▶ POST JSON ─▶ mailto fallback
//! ```
//!
//! Rendering is pure: every render function returns markup plus the list of
//! triggers it contains, and [`interaction`] binds those triggers to
//! [`overlay`] state. The same [`form`] definitions produce the HTML inputs
//! and drive validation in [`submit`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Service and gallery records, `catalog.toml` loading, stock catalog |
//! | [`query`] | Category filter, term match and sort over the catalog |
//! | [`fragment`] | `#q=` and `#service=` fragment reading and link building |
//! | [`form`] | Form definitions, validation rules, ordered payloads |
//! | [`mailto`] | `mailto:` fallback subject and body |
//! | [`submit`] | Submission pipeline with retry, timeout and mail fallback |
//! | [`overlay`] | Detail and lightbox overlay state |
//! | [`render`] | Maud markup for cards, grids and overlays |
//! | [`interaction`] | Trigger binding and activation per page |
//! | [`map`] | Leaflet map widget for the contact page |
//! | [`generate`] | Writes every page of the site |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Overlays Without a Script Runtime
//!
//! Detail overlays and lightboxes are `:target` sections. Opening one is a
//! link to its anchor; the close control and the backdrop both link to `#`.
//! A listing page carries one overlay per card it shows.
//!
//! ## Pre-Rendered Listings
//!
//! Every category filter and sort mode combination is its own page
//! (`services-<category>-<sort>.html`). The term search narrows the cards on
//! the current page in the browser, using the same lowercase haystack the
//! [`query`] engine matches against.

pub mod catalog;
pub mod config;
pub mod form;
pub mod fragment;
pub mod generate;
pub mod interaction;
pub mod logging;
pub mod mailto;
pub mod map;
pub mod output;
pub mod overlay;
pub mod query;
pub mod render;
pub mod submit;
