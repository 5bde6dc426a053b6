use super::super::{Model, Msg, SelectedImage};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let image = match &model.image {
        Some(image) => image,
        None => return html! {},
    };

    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            { render_selected_image_preview(ctx, image) }
            <div class="button-container">
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--danger-color);"
                    title="Clear the uploaded image and its results"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearImage)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(ctx: &Context<Model>, image: &SelectedImage) -> Html {
    match &image.preview_url {
        Some(url) => html! {
            <img id="actual-image-preview"
                src={url.clone()}
                alt="Original uploaded image"
                onerror={ctx.link().callback(|_| Msg::PreviewFailed)} />
        },
        None => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Loading preview..."}</p>
            </div>
        },
    }
}
