//! Embedded map widget for the contact page.
//!
//! Emits a container, the Leaflet stylesheet and script, and a short init
//! script. The init script does nothing when the container or the library is
//! missing, so a blocked CDN degrades to an empty box.

use crate::config::MapConfig;
use maud::{Markup, PreEscaped, html};
use serde_json::json;

pub const CONTAINER_ID: &str = "map";

/// The init script, with every configured value embedded as a JSON literal.
pub fn init_script(config: &MapConfig) -> String {
    let options = json!({
        "center": [config.latitude, config.longitude],
        "zoom": config.zoom,
        "tiles": config.tile_url,
        "attribution": config.attribution,
        "popup": config.popup,
    });
    // `</` is escaped so a popup label cannot close the script element
    let options = options.to_string().replace("</", "<\\/");
    format!(
        r#"(function () {{
  var el = document.getElementById('{CONTAINER_ID}');
  if (!el || typeof L === 'undefined') return;
  var o = {options};
  var map = L.map('{CONTAINER_ID}').setView(o.center, o.zoom);
  L.tileLayer(o.tiles, {{ attribution: o.attribution }}).addTo(map);
  L.marker(o.center).addTo(map).bindPopup(o.popup).openPopup();
}})();"#
    )
}

/// Head elements for the map library. Empty when the map is disabled.
pub fn head(config: &MapConfig) -> Markup {
    html! {
        @if config.enabled {
            link rel="stylesheet" href=(config.leaflet_css);
        }
    }
}

/// Map container and scripts. Empty when the map is disabled.
pub fn widget(config: &MapConfig) -> Markup {
    html! {
        @if config.enabled {
            div.map id=(CONTAINER_ID) {}
            script src=(config.leaflet_js) defer {}
            script { (PreEscaped(format!("window.addEventListener('load', function () {{ {} }});", init_script(config)))) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_centers_on_configured_coordinates() {
        let script = init_script(&MapConfig::default());
        assert!(script.contains("[-25.595,29.155]"));
        assert!(script.contains(r#""zoom":11"#));
        assert!(script.contains("tile.openstreetmap.org/{z}/{x}/{y}.png"));
        assert!(script.contains("Kings Park, KwaMhlanga"));
    }

    #[test]
    fn script_guards_missing_library() {
        let script = init_script(&MapConfig::default());
        assert!(script.contains("typeof L === 'undefined'"));
        assert!(script.contains("if (!el"));
    }

    #[test]
    fn popup_cannot_break_out_of_script() {
        let config = MapConfig {
            popup: "</script><script>alert(1)</script>".into(),
            ..MapConfig::default()
        };
        assert!(!init_script(&config).contains("</script>"));
    }

    #[test]
    fn disabled_map_renders_nothing() {
        let config = MapConfig {
            enabled: false,
            ..MapConfig::default()
        };
        assert!(widget(&config).into_string().is_empty());
        assert!(head(&config).into_string().is_empty());
    }

    #[test]
    fn enabled_map_has_container_and_library() {
        let html = widget(&MapConfig::default()).into_string();
        assert!(html.contains(r#"id="map""#));
        assert!(html.contains("leaflet.js"));
    }
}
