use base64::{engine::general_purpose::STANDARD, Engine as _};
use dioxus::prelude::*;

/// 10 MB cap, matching what the classification service accepts.
const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// A chosen leaf photo, held in memory until the analysis completes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub name: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
    /// Data URL used for the preview and as the stored image reference.
    pub preview: String,
}

impl SelectedImage {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

fn mime_for_name(name: &str) -> Option<&'static str> {
    let extension = name.rsplit('.').next()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// File picker with preview. Writes the chosen image into `selection`.
#[component]
pub fn ImageUploadField(selection: Signal<Option<SelectedImage>>, disabled: bool) -> Element {
    let mut upload_error = use_signal(|| None::<String>);

    let on_change = move |evt: FormEvent| {
        let Some(file_engine) = evt.files() else {
            return;
        };
        let Some(name) = file_engine.files().first().cloned() else {
            return;
        };
        upload_error.set(None);

        spawn(async move {
            let Some(mime) = mime_for_name(&name) else {
                upload_error.set(Some("Unsupported file type. Use JPEG, PNG, or WebP.".into()));
                return;
            };
            let Some(bytes) = file_engine.read_file(&name).await else {
                upload_error.set(Some("Couldn't read the selected file.".into()));
                return;
            };
            let size_bytes = bytes.len() as u64;
            if size_bytes > MAX_IMAGE_BYTES {
                upload_error.set(Some("Image is larger than 10 MB.".into()));
                return;
            }

            let preview = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
            selection.set(Some(SelectedImage {
                name,
                size_bytes,
                bytes,
                preview,
            }));
        });
    };

    rsx! {
        div { class: "upload-field",
            if let Some(image) = selection() {
                div { class: "upload-field__preview",
                    img { src: "{image.preview}", alt: "Selected leaf" }
                    button {
                        r#type: "button",
                        class: "button button--ghost upload-field__clear",
                        disabled,
                        onclick: move |_| selection.set(None),
                        "Remove"
                    }
                }
            } else {
                label { class: "upload-field__dropzone",
                    input {
                        r#type: "file",
                        accept: ".jpg,.jpeg,.png,.webp",
                        disabled,
                        onchange: on_change,
                    }
                    span { class: "upload-field__title", "Upload leaf image" }
                    span { class: "upload-field__hint",
                        "Drag and drop or click to select an apple leaf photo"
                    }
                    span { class: "upload-field__meta", "Supports: JPEG, PNG, WebP • Max size: 10MB" }
                }
            }

            if let Some(message) = upload_error() {
                p { class: "upload-field__error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_detection_follows_extension_case_insensitively() {
        assert_eq!(mime_for_name("leaf.JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_name("leaf.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for_name("leaf.png"), Some("image/png"));
        assert_eq!(mime_for_name("leaf.webp"), Some("image/webp"));
        assert_eq!(mime_for_name("leaf.gif"), None);
        assert_eq!(mime_for_name("leaf"), None);
    }

    #[test]
    fn size_reports_in_megabytes() {
        let image = SelectedImage {
            name: "leaf.png".into(),
            size_bytes: 2 * 1024 * 1024,
            bytes: Vec::new(),
            preview: String::new(),
        };
        assert_eq!(image.size_mb(), 2.0);
    }
}
