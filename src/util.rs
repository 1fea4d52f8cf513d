// Small browser-facing helpers shared by components.
use crate::model::{ImageMetadata, MediaKind};

pub fn random() -> f64 {
    js_sys::Math::random()
}

/// Download name for a media item: `Sunset at Sea!` + jpg -> `sunset_at_sea_.jpg`.
pub fn media_file_name(meta: &ImageMetadata) -> String {
    let stem: String = meta
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let ext = match meta.kind {
        MediaKind::Video => "mp4".to_owned(),
        MediaKind::Image => url_extension(&meta.image_url).unwrap_or_else(|| "jpg".to_owned()),
    };
    format!("{stem}.{ext}")
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn share_url(origin: &str, path: &str, id: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(id).into();
    format!("{origin}{path}?image_id={encoded}")
}

/// Outcome of a clipboard action, shown on its button for a moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardFeedback {
    Copied,
    Failed,
    Unsupported,
}

impl ClipboardFeedback {
    pub fn label(self) -> &'static str {
        match self {
            Self::Copied => "Copied!",
            Self::Failed => "Failed",
            Self::Unsupported => "N/A for video",
        }
    }

    pub fn from_result<E>(result: &Result<(), E>) -> Self {
        if result.is_ok() { Self::Copied } else { Self::Failed }
    }
}

/// Videos can't be placed on the clipboard; answer immediately without fetching.
pub fn image_copy_precheck(meta: &ImageMetadata) -> Option<ClipboardFeedback> {
    match meta.kind {
        MediaKind::Video => Some(ClipboardFeedback::Unsupported),
        MediaKind::Image => None,
    }
}

/// `image_id` from the current page's query string.
pub fn deep_link_id() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("image_id").filter(|id| !id.is_empty())
}
