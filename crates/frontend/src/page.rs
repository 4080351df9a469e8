//! DOM wiring for the static landing page: mobile nav, in-page anchors,
//! footer year and the contact form placeholder.
//!
//! Every hook is optional; a page without the element simply skips it.

use chrono::Datelike;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub fn install(document: &Document) {
    stamp_year(document);
    wire_nav_toggle(document);
    wire_smooth_scroll(document);
    wire_contact_form(document);
}

/// Display value the mobile nav takes after a toggle click.
pub fn next_nav_display(current: &str) -> &'static str {
    if current == "flex" {
        "none"
    } else {
        "flex"
    }
}

/// Fragment an in-page anchor points at, if any.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Selector matching an element by its `name` attribute.
pub fn name_selector(name: &str) -> Option<String> {
    if name.contains(|c: char| c == '"' || c == '\\') {
        return None;
    }
    Some(format!("[name=\"{}\"]", name))
}

pub fn acknowledgment(email: &str) -> String {
    format!("Thanks! We'll follow up at {}.", email)
}

fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn mobile_nav(document: &Document) -> Option<HtmlElement> {
    query(document, ".mobile-nav").and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("display", value) {
        tracing::debug!("Failed to set display: {:?}", e);
    }
}

fn stamp_year(document: &Document) {
    if let Some(year) = document.get_element_by_id("year") {
        let current = chrono::Local::now().year();
        year.set_text_content(Some(&current.to_string()));
    }
}

fn wire_nav_toggle(document: &Document) {
    let (Some(toggle), Some(nav)) = (query(document, ".nav-toggle"), mobile_nav(document)) else {
        return;
    };

    EventListener::new(&toggle, "click", move |_| {
        let current = nav.style().get_property_value("display").unwrap_or_default();
        set_display(&nav, next_nav_display(&current));
    })
    .forget();
}

fn find_target(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id).or_else(|| {
        name_selector(id).and_then(|selector| document.query_selector(&selector).ok().flatten())
    })
}

fn wire_smooth_scroll(document: &Document) {
    let Ok(anchors) = document.query_selector_all("a[href^=\"#\"]") else {
        return;
    };

    for index in 0..anchors.length() {
        let Some(anchor) = anchors
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();

        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(target) = anchor_target_id(&href).and_then(|id| find_target(&document, id))
                else {
                    return;
                };

                event.prevent_default();

                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);

                if let Some(nav) = mobile_nav(&document) {
                    set_display(&nav, "none");
                }
            },
        )
        .forget();
    }
}

fn wire_contact_form(document: &Document) {
    let Some(form) = query(document, ".cta-form").and_then(|e| e.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };

    let target = form.clone();
    EventListener::new_with_options(
        &target,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();

            let email = form
                .query_selector("input[type=\"email\"]")
                .ok()
                .flatten()
                .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            if let Some(window) = web_sys::window() {
                if let Err(e) = window.alert_with_message(&acknowledgment(&email)) {
                    tracing::debug!("Alert failed: {:?}", e);
                }
            }
            form.reset();
        },
    )
    .forget();
}
