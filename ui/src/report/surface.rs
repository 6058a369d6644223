//! Platform hand-off for rendered reports and exports.
//!
//! On the web a document opens in a new tab (ready to print or save) and an
//! export goes through a synthetic anchor download. Off-web both land as
//! files under the app data directory.

#[cfg(target_arch = "wasm32")]
fn blob_url(mime: &str, parts: &js_sys::Array) -> Result<String, String> {
    use web_sys::{Blob, BlobPropertyBag, Url};

    let mut opts = BlobPropertyBag::new();
    opts.type_(mime);
    let blob = Blob::new_with_str_sequence_and_options(parts, &opts)
        .map_err(|_| "failed to create blob".to_string())?;
    Url::create_object_url_with_blob(&blob).map_err(|_| "unable to create object URL".to_string())
}

/// Hand a rendered document to a new display surface.
#[cfg(target_arch = "wasm32")]
pub fn open_document(_filename: &str, html: &str) -> Result<(), String> {
    use wasm_bindgen::JsValue;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(html));
    let url = blob_url("text/html", &parts)?;

    let window = web_sys::window().ok_or("window unavailable")?;
    // The object URL stays alive for the lifetime of the page; the new tab
    // needs it until the user closes it.
    match window.open_with_url_and_target(&url, "_blank") {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err("popup blocked".into()),
        Err(_) => Err("unable to open report window".into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlAnchorElement, Url};

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let mut opts = web_sys::BlobPropertyBag::new();
    opts.type_(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "failed to create blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "unable to create download".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "unable to create anchor")?
        .dyn_into()
        .map_err(|_| "anchor cast failed")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or("missing body")?
        .append_child(&anchor)
        .ok();
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();

    Ok(None)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_document(filename: &str, html: &str) -> Result<(), String> {
    download_bytes(filename, "text/html", html.as_bytes().to_vec()).map(|_| ())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    use std::fs;
    use std::io::Write;

    let _ = mime;
    let dir = export_dir()?;
    fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
    let path = dir.join(filename);
    let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
    file.write_all(&bytes).map_err(|err| err.to_string())?;
    Ok(Some(path.to_string_lossy().to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("ai", "LeafGuard", "LeafGuard")
        .ok_or("unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}
