use super::super::Model;
use crate::state::Phase;
use shared::LabeledImage;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    match model.analysis.phase() {
        Phase::Processing { .. } => html! {
            <div class="processing-indicator">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p>{"Processing your image..."}</p>
            </div>
        },
        Phase::Ready { results } => html! {
            <div class="results-container">
                <h2>{"Processing Results"}</h2>
                <div class="results-grid">
                    { for results.iter().map(render_result_item) }
                </div>
            </div>
        },
        _ => html! {},
    }
}

fn render_result_item(result: &LabeledImage) -> Html {
    let label = result.kind.to_string();

    html! {
        <div class="result-item" key={label.clone()}>
            <img
                src={format!("data:image/png;base64,{}", result.png_base64)}
                alt={format!("AI processed {}", label)}
            />
            <p class="result-label">{ label }</p>
        </div>
    }
}
