//! Browser tests for `:target` overlays and fragment-driven search.
//!
//! Run with: `cargo test --test browser_overlay -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

/// Builds the stock site once per test run.
fn generated_dir() -> &'static Path {
    static OUT: OnceLock<TempDir> = OnceLock::new();
    OUT.get_or_init(|| {
        let out = TempDir::new().expect("failed to create output dir");
        let empty_source = out.path().join("content");
        std::fs::create_dir_all(&empty_source).unwrap();
        let status = Command::new(env!("CARGO_BIN_EXE_brickyard"))
            .args(["build", "--source"])
            .arg(&empty_source)
            .arg("--output")
            .arg(out.path().join("dist"))
            .status()
            .expect("failed to run brickyard");
        assert!(status.success(), "site generation failed");
        out
    })
    .path()
}

fn page(name: &str) -> PathBuf {
    generated_dir().join("dist").join(name)
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn open(name: &str, fragment: &str) -> Arc<Tab> {
    let file = page(name);
    assert!(file.exists(), "missing: {}", file.display());
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&format!("file://{}{}", file.display(), fragment))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn eval_u64(tab: &Tab, js: &str) -> u64 {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .and_then(|v| v.as_u64())
        .expect("no numeric value returned")
}

fn is_displayed(id: &str) -> String {
    format!("getComputedStyle(document.getElementById('{id}')).display !== 'none'")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn overlays_hidden_by_default() {
    let tab = open("services.html", "");
    assert!(!eval_bool(&tab, &is_displayed("detail-pavers")));
}

#[test]
#[ignore]
fn details_link_opens_detail_overlay() {
    let tab = open("services.html", "");
    tab.find_element(r#"a.show-service[data-id="pavers"]"#)
        .unwrap()
        .click()
        .unwrap();
    assert!(eval_bool(&tab, &is_displayed("detail-pavers")));
    assert!(!eval_bool(&tab, &is_displayed("detail-kerbs")));
}

#[test]
#[ignore]
fn close_control_hides_overlay() {
    let tab = open("services.html", "#detail-pavers");
    assert!(eval_bool(&tab, &is_displayed("detail-pavers")));
    tab.find_element("#detail-pavers .modal-close")
        .unwrap()
        .click()
        .unwrap();
    assert!(!eval_bool(&tab, &is_displayed("detail-pavers")));
}

#[test]
#[ignore]
fn gallery_thumbnail_opens_lightbox() {
    let tab = open("gallery.html", "");
    tab.find_element(r##"a[href="#image-2"]"##)
        .unwrap()
        .click()
        .unwrap();
    assert!(eval_bool(&tab, &is_displayed("image-2")));
}

#[test]
#[ignore]
fn fragment_term_filters_listing() {
    let tab = open("services.html", "#q=brick");
    let value = tab
        .evaluate("document.getElementById('servicesSearch').value", false)
        .unwrap()
        .value
        .unwrap();
    assert_eq!(value.as_str(), Some("brick"));
    let visible = eval_u64(
        &tab,
        "Array.from(document.querySelectorAll('#servicesList .service-card')).filter(c => !c.hidden).length",
    );
    assert_eq!(visible, 2);
}

#[test]
#[ignore]
fn unmatched_term_shows_empty_notice() {
    let tab = open("services.html", "#q=granite");
    assert!(eval_bool(&tab, "!document.getElementById('servicesEmpty').hidden"));
}

#[test]
#[ignore]
fn enquiry_fragment_preselects_service() {
    let tab = open("enquiry.html", "#service=Delivery%20%26%20Logistics");
    let value = tab
        .evaluate("document.querySelector('select[name=\"service\"]').value", false)
        .unwrap()
        .value
        .unwrap();
    assert_eq!(value.as_str(), Some("Delivery & Logistics"));
}

#[test]
#[ignore]
fn fragment_term_keeps_trailing_space() {
    let tab = open("services.html", "#q=logistics");
    let visible = "Array.from(document.querySelectorAll('#servicesList .service-card')).filter(c => !c.hidden).length";
    assert_eq!(eval_u64(&tab, visible), 1);

    let tab = open("services.html", "#q=logistics%20");
    assert_eq!(eval_u64(&tab, visible), 0);
    assert!(eval_bool(&tab, "!document.getElementById('servicesEmpty').hidden"));
}

#[test]
#[ignore]
fn fragment_term_never_spans_fields() {
    // pavers title ends in "blocks", its short text starts with "driveways"
    let tab = open("services.html", "#q=blocks%0Adriveways");
    assert!(eval_bool(&tab, "!document.getElementById('servicesEmpty').hidden"));
}

/// Replaces `fetch` with a recorder that answers 200 to every POST.
const RECORD_POSTS: &str = r#"
    window.posts = [];
    window.fetch = function (url, opts) {
        window.posts.push(JSON.parse(opts.body));
        return Promise.resolve({ ok: true });
    };
"#;

fn fill_enquiry(tab: &Tab, email: &str) {
    tab.evaluate(RECORD_POSTS, false).unwrap();
    tab.evaluate(
        &format!(
            r#"
            var form = document.getElementById('enquiryForm');
            form.querySelector('[name="name"]').value = 'Sipho';
            form.querySelector('[name="email"]').value = '{email}';
            form.querySelector('[name="message"]').value = 'Pricing for a 300 m2 driveway';
            "#
        ),
        false,
    )
    .unwrap();
}

fn submit_enquiry(tab: &Tab) {
    tab.evaluate("document.getElementById('enquiryForm').requestSubmit()", false)
        .unwrap();
}

#[test]
#[ignore]
fn browser_rejects_email_the_pipeline_rejects() {
    let tab = open("enquiry.html", "");
    fill_enquiry(&tab, "a@b");
    submit_enquiry(&tab);
    assert!(eval_bool(
        &tab,
        "document.querySelector('#enquiryForm [name=\"email\"]').classList.contains('invalid')"
    ));
    assert_eq!(eval_u64(&tab, "window.posts.length"), 0);
}

#[test]
#[ignore]
fn visitor_choice_overrides_carried_service() {
    let tab = open("enquiry.html", "#service=Stock%20Bricks");
    fill_enquiry(&tab, "sipho@example.co.za");
    tab.evaluate(
        "document.querySelector('select[name=\"service\"]').value = 'Kerbs & Channels'",
        false,
    )
    .unwrap();
    submit_enquiry(&tab);
    assert_eq!(eval_u64(&tab, "window.posts.length"), 1);
    let service = tab
        .evaluate("window.posts[0].service", false)
        .unwrap()
        .value
        .unwrap();
    assert_eq!(service.as_str(), Some("Kerbs & Channels"));
}
