//! Core data models for the postcard gallery.
//! Metadata as decoded from `images.json`, per-card transforms, scatter layout
//! and the gallery reducer driving the app.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::Reducible;

use crate::util;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Link to the raw data behind the image.
    #[serde(default)]
    pub data: String,
    /// Link to where the image came from.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageMetadata {
    /// Thumbnail when present, full media otherwise.
    pub fn preview_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.image_url)
    }

    /// Case-insensitive search on title/description plus optional tag membership.
    pub fn matches(&self, query: &str, tag: Option<&str>) -> bool {
        let matches_search = query.is_empty() || {
            let q = query.to_lowercase();
            self.title.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
        };
        let matches_tag = tag.is_none_or(|t| self.tags.iter().any(|own| own == t));
        matches_search && matches_tag
    }

    pub fn shares_tag_with(&self, other: &ImageMetadata) -> bool {
        self.tags.iter().any(|t| other.tags.contains(t))
    }
}

/// Visual state of one card: translation (px), rotation (deg), scale and stacking index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub z: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            z: 0,
        }
    }
}

impl Transform {
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.x, self.y, self.rotation, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn from_window() -> Self {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: f64| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
        };
        match web_sys::window() {
            Some(win) => Self {
                width: dim(win.inner_width(), 1280.0),
                height: dim(win.inner_height(), 800.0),
            },
            None => Self {
                width: 1280.0,
                height: 800.0,
            },
        }
    }
}

/// Where freshly loaded or shuffled cards may land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Room kept free on the right/bottom edge so a card stays on screen.
    pub card_footprint: f64,
    /// Header safe area.
    pub top_offset: f64,
    pub rotation_spread: f64,
    pub scale_base: f64,
    pub scale_spread: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_footprint: 350.0,
            top_offset: 100.0,
            rotation_spread: 40.0,
            scale_base: 0.8,
            scale_spread: 0.2,
        }
    }
}

impl LayoutConfig {
    /// Random position and rotation inside the viewport; scale and z stay untouched.
    pub fn scatter(&self, viewport: Viewport, t: &mut Transform, rng: &mut impl FnMut() -> f64) {
        let span_x = (viewport.width - self.card_footprint).max(0.0);
        let span_y = (viewport.height - self.card_footprint - self.top_offset).max(0.0);
        t.x = rng() * span_x;
        t.y = self.top_offset + rng() * span_y;
        t.rotation = rng() * self.rotation_spread - self.rotation_spread / 2.0;
    }

    pub fn initial(&self, viewport: Viewport, z: i32, rng: &mut impl FnMut() -> f64) -> Transform {
        let mut t = Transform {
            z,
            ..Transform::default()
        };
        self.scatter(viewport, &mut t, rng);
        t.scale = rng() * self.scale_spread + self.scale_base;
        t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryEntry {
    pub meta: Rc<ImageMetadata>,
    pub transform: Transform,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryState {
    pub entries: Vec<GalleryEntry>,
    pub search: String,
    pub active_tag: Option<String>,
    pub layout: LayoutConfig,
}

impl GalleryState {
    pub fn load_with(
        &mut self,
        images: Vec<ImageMetadata>,
        viewport: Viewport,
        rng: &mut impl FnMut() -> f64,
    ) {
        let layout = self.layout;
        self.entries = images
            .into_iter()
            .enumerate()
            .map(|(i, meta)| GalleryEntry {
                meta: Rc::new(meta),
                transform: layout.initial(viewport, i32::try_from(i).unwrap_or(i32::MAX), rng),
            })
            .collect();
    }

    pub fn shuffle_with(&mut self, viewport: Viewport, rng: &mut impl FnMut() -> f64) {
        let layout = self.layout;
        for entry in &mut self.entries {
            layout.scatter(viewport, &mut entry.transform, rng);
        }
    }

    pub fn settle(&mut self, id: &str, transform: Transform) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.meta.id == id) {
            entry.transform = transform;
        }
    }

    pub fn max_z(&self) -> i32 {
        self.entries.iter().map(|e| e.transform.z).max().unwrap_or(0)
    }

    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .entries
            .iter()
            .flat_map(|e| e.meta.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_owned).collect()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries
            .iter()
            .filter(|e| e.meta.matches(&self.search, self.active_tag.as_deref()))
    }

    pub fn find(&self, id: &str) -> Option<Rc<ImageMetadata>> {
        self.entries
            .iter()
            .find(|e| e.meta.id == id)
            .map(|e| e.meta.clone())
    }

    pub fn images(&self) -> Vec<Rc<ImageMetadata>> {
        self.entries.iter().map(|e| e.meta.clone()).collect()
    }
}

/// Up to `limit` other images sharing a tag with `image`, in shuffled order.
pub fn related(
    image: &ImageMetadata,
    all: &[Rc<ImageMetadata>],
    limit: usize,
    rng: &mut impl FnMut() -> f64,
) -> Vec<Rc<ImageMetadata>> {
    let mut matches: Vec<Rc<ImageMetadata>> = all
        .iter()
        .filter(|other| other.id != image.id && other.shares_tag_with(image))
        .cloned()
        .collect();
    for i in (1..matches.len()).rev() {
        let j = ((rng() * (i + 1) as f64).floor() as usize).min(i);
        matches.swap(i, j);
    }
    matches.truncate(limit);
    matches
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GalleryAction {
    Loaded { images: Vec<ImageMetadata>, viewport: Viewport },
    Shuffle { viewport: Viewport },
    /// A card finished a gesture; remember where it ended up.
    Settle { id: String, transform: Transform },
    SetSearch(String),
    SetActiveTag(Option<String>),
}

impl Reducible for GalleryState {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GalleryAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded { images, viewport } => {
                log::info!("gallery: {} items loaded", images.len());
                new.load_with(images, viewport, &mut util::random);
            }
            Shuffle { viewport } => {
                log::debug!("gallery: shuffle");
                new.shuffle_with(viewport, &mut util::random);
            }
            Settle { id, transform } => {
                if self.entries.iter().any(|e| e.meta.id == id && e.transform == transform) {
                    return self;
                }
                new.settle(&id, transform);
            }
            SetSearch(q) => {
                if q == self.search {
                    return self;
                }
                new.search = q;
            }
            SetActiveTag(tag) => {
                if tag == self.active_tag {
                    return self;
                }
                new.active_tag = tag;
            }
        }
        Rc::new(new)
    }
}
