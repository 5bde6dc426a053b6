use super::super::{Model, Msg, PROCESSING_ENDPOINT, SelectedImage};
use gloo_file::File as GlooFile;
use gloo_file::callbacks;
use gloo_net::http::Request;
use shared::ProcessingResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

/// Shown for every processing failure; the real cause only goes to the log.
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing image. Please try again.";
pub const PREVIEW_ERROR_MESSAGE: &str = "Error loading image";

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    model.analysis.reset();
    model.image = Some(SelectedImage {
        file: file.clone(),
        preview_url: None,
    });

    // The upload itself is triggered by PreviewReady, so the preview is
    // always on screen before the request goes out.
    let link = ctx.link().clone();
    model.reader = Some(callbacks::read_as_data_url(&file, move |result| {
        match result {
            Ok(url) => link.send_message(Msg::PreviewReady(url)),
            Err(e) => {
                log::error!("Failed to read selected file: {}", e);
                link.send_message(Msg::PreviewFailed);
            }
        }
    }));

    true
}

pub fn handle_preview_ready(model: &mut Model, ctx: &Context<Model>, url: String) -> bool {
    model.reader = None;

    if let Some(image) = model.image.as_mut() {
        image.preview_url = Some(url);

        let request = model.analysis.begin();
        let file = image.file.clone();
        send_processing_request(ctx, request, file);
        true
    } else {
        // Cleared while the reader was still running.
        false
    }
}

pub fn handle_preview_failed(model: &mut Model) -> bool {
    model.reader = None;
    model.analysis.fail(PREVIEW_ERROR_MESSAGE);
    true
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.image = None;
    model.reader = None;
    model.analysis.reset();
    true
}

pub fn handle_processing_finished(
    model: &mut Model,
    request: u64,
    outcome: Result<ProcessingResponse, String>,
) -> bool {
    let outcome = outcome
        .and_then(|response| {
            response
                .into_labeled()
                .map_err(|e| format!("Invalid response: {}", e))
        })
        .map_err(|detail| {
            log::error!("Processing request {} failed: {}", request, detail);
            PROCESSING_ERROR_MESSAGE.to_string()
        });

    if model.analysis.finish(request, outcome) {
        true
    } else {
        log::warn!("Dropping stale response for request {}", request);
        false
    }
}

pub fn handle_set_error(model: &mut Model, error: Option<String>) -> bool {
    match error {
        Some(message) => model.analysis.fail(message),
        None => {
            if model.analysis.error().is_some() {
                model.analysis.reset();
            }
        }
    }
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

/// Picks the first image out of a dropped or pasted file list. This is a
/// single-image app, so the rest is ignored with a note in the log.
pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    for i in 0..file_list.length() {
        if let Some(file) = file_list.item(i) {
            if file.type_().starts_with("image/") {
                if file_list.length() > i + 1 {
                    log::warn!("Ignoring {} extra dropped files", file_list.length() - i - 1);
                }
                ctx.link().send_message(Msg::FileSelected(GlooFile::from(file)));
                return;
            }
            log::warn!("Skipping non-image file: {}", file.name());
        }
    }

    ctx.link()
        .send_message(Msg::SetError(Some("No valid image files selected.".into())));
}

pub fn send_processing_request(ctx: &Context<Model>, request: u64, file: GlooFile) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let form_data = web_sys::FormData::new().unwrap();
            form_data.append_with_blob("image", file.as_ref()).unwrap();

            let req = Request::post(PROCESSING_ENDPOINT)
                .body(form_data)
                .expect("Failed to build request.");

            let outcome = match req.send().await {
                Ok(response) if response.ok() => response
                    .json::<ProcessingResponse>()
                    .await
                    .map_err(|e| format!("Failed to parse response: {}", e)),
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    Err(format!("Server error: {} - {}", status, body))
                }
                Err(e) => Err(format!("Network error: {}", e)),
            };

            link.send_message(Msg::ProcessingFinished(request, outcome));
        }
    });
}
