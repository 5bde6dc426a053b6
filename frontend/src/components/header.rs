use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-images"></i> {" Skin Image Detection Model"}</h1>
            <p class="subtitle">{"Upload an image and let our AI detect, segment and classify the disease"}</p>
        </header>
    }
}
