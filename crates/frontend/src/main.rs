mod api;
mod auth_widget;
mod page;

use crate::auth_widget::AuthWidget;

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    page::install(&document);

    match document.get_element_by_id("auth-widget") {
        Some(root) => {
            yew::Renderer::<AuthWidget>::with_root(root).render();
        }
        None => tracing::warn!("No #auth-widget element, sign-in controls disabled"),
    }
}
