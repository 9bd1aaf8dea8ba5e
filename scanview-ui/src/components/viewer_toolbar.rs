use crate::hooks::{LoadedImage, ViewerHandle};
use leptos::*;
use scanview_core::download_file_name;

/// Start a browser download of `url`.
fn download(url: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("No document"))?;
    let link = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    link.set_href(url);
    link.set_download(download_file_name(url));
    link.click();
    Ok(())
}

/// Zoom, fit and download controls plus the image dimensions.
#[component]
pub fn ViewerToolbar(viewer: ViewerHandle) -> impl IntoView {
    let loaded = viewer.loaded();
    let no_image = move || loaded.with(Option::is_none);

    let on_download = move |_| {
        let Some(url) = loaded.with_untracked(|l| l.as_ref().map(|l| l.url.clone())) else {
            return;
        };
        if let Err(e) = download(&url) {
            log::warn!("Download failed: {:?}", e);
        }
    };

    view! {
        <div class="viewer-toolbar">
            <button class="btn" title="Zoom in" disabled=no_image on:click=move |_| viewer.zoom_in()>
                "+"
            </button>
            <button class="btn" title="Zoom out" disabled=no_image on:click=move |_| viewer.zoom_out()>
                "−"
            </button>
            <button class="btn" title="Fit to view" disabled=no_image on:click=move |_| viewer.fit()>
                "Fit"
            </button>
            <button class="btn" title="Download" disabled=no_image on:click=on_download>
                "Download"
            </button>
            <span class="image-info">
                {move || loaded.with(|l| l.as_ref().map(LoadedImage::dimensions_label))}
            </span>
        </div>
    }
}
