use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_file::callbacks::FileReader;
use shared::ProcessingResponse;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

mod components;
mod state;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use state::AnalysisState;

/// The processing service is external to this app and listens locally.
pub const PROCESSING_ENDPOINT: &str = "http://127.0.0.1:5000/api/upload";

// Models
#[derive(Clone)]
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview_url: Option<String>,
}

// Yew msg components
pub enum Msg {
    // File operations
    FileSelected(GlooFile),
    PreviewReady(String),
    PreviewFailed,
    ClearImage,

    // Processing operations
    ProcessingFinished(u64, Result<ProcessingResponse, String>),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    pub image: Option<SelectedImage>,
    pub analysis: AnalysisState,
    pub is_dragging: bool,
    pub reader: Option<FileReader>,
    paste_listener: Option<EventListener>,
}

// Yew component implementation
impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            image: None,
            analysis: AnalysisState::new(),
            is_dragging: false,
            reader: None,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::PreviewReady(url) => handlers::handle_preview_ready(self, ctx, url),
            Msg::PreviewFailed => handlers::handle_preview_failed(self),
            Msg::ClearImage => handlers::handle_clear_image(self),

            // Processing operations
            Msg::ProcessingFinished(request, outcome) => {
                handlers::handle_processing_finished(self, request, outcome)
            }

            // UI states
            Msg::SetError(error) => handlers::handle_set_error(self, error),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_preview_area(self, ctx) }
                    { render_error_message(self) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Skin Image Analysis | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
