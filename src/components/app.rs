use super::{
    header::Header, loading_spinner::LoadingSpinner, media_modal::MediaModal,
    postcard::Postcard, slideshow_view::SlideshowView,
};
use crate::loader::{self, METADATA_URL};
use crate::model::{GalleryAction, GalleryState, ImageMetadata, Transform, Viewport};
use crate::state::StackOrder;
use crate::util;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Keeps the spinner up briefly so the first scatter doesn't flash in.
const LOADING_DELAY_MS: u32 = 500;

#[function_component(App)]
pub fn app() -> Html {
    let gallery = use_reducer(GalleryState::default);
    let stack = use_state(StackOrder::default);
    let loading = use_state(|| true);
    let selected = use_state(|| None::<Rc<ImageMetadata>>);
    let slideshow_active = use_state(|| false);
    let hovered = use_state(|| None::<String>);

    // Load metadata once
    {
        let gallery = gallery.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                log::info!("gallery: loading {}", METADATA_URL);
                match loader::fetch_metadata(METADATA_URL).await {
                    Ok(images) => gallery.dispatch(GalleryAction::Loaded {
                        images,
                        viewport: Viewport::from_window(),
                    }),
                    Err(err) => log::error!("gallery: failed to load metadata: {err}"),
                }
                TimeoutFuture::new(LOADING_DELAY_MS).await;
                loading.set(false);
            });
            || ()
        });
    }
    // New entries: make sure bring-to-front lands above every existing card
    {
        let stack = (*stack).clone();
        let gallery = gallery.clone();
        use_effect_with(gallery.entries.len(), move |_| {
            stack.seed(gallery.max_z());
            || ()
        });
    }
    // Deep link (?image_id=...) once loading finished
    {
        let gallery = gallery.clone();
        let selected = selected.clone();
        use_effect_with((*loading, gallery.entries.len()), move |(loading, count)| {
            if !*loading && *count > 0 {
                if let Some(meta) = util::deep_link_id().and_then(|id| gallery.find(&id)) {
                    log::debug!("gallery: deep link to {}", meta.id);
                    selected.set(Some(meta));
                }
            }
            || ()
        });
    }

    let on_search = {
        let gallery = gallery.clone();
        Callback::from(move |q: String| gallery.dispatch(GalleryAction::SetSearch(q)))
    };
    let on_select_tag = {
        let gallery = gallery.clone();
        Callback::from(move |tag: Option<String>| gallery.dispatch(GalleryAction::SetActiveTag(tag)))
    };
    let on_shuffle = {
        let gallery = gallery.clone();
        Callback::from(move |_| {
            gallery.dispatch(GalleryAction::Shuffle {
                viewport: Viewport::from_window(),
            })
        })
    };
    let on_play = {
        let slideshow_active = slideshow_active.clone();
        Callback::from(move |_| {
            log::debug!("slideshow: open");
            slideshow_active.set(true)
        })
    };
    let on_close_slideshow = {
        let slideshow_active = slideshow_active.clone();
        Callback::from(move |_| {
            log::debug!("slideshow: close");
            slideshow_active.set(false)
        })
    };
    let on_select = {
        let selected = selected.clone();
        Callback::from(move |meta: Rc<ImageMetadata>| selected.set(Some(meta)))
    };
    let on_close_modal = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };
    let on_hover = {
        let hovered = hovered.clone();
        Callback::from(move |meta: Option<Rc<ImageMetadata>>| {
            hovered.set(meta.map(|m| m.preview_url().to_owned()))
        })
    };
    let on_settle = {
        let gallery = gallery.clone();
        Callback::from(move |(id, transform): (String, Transform)| {
            gallery.dispatch(GalleryAction::Settle { id, transform })
        })
    };

    let backdrop_style = match &*hovered {
        Some(url) => format!(
            "position:absolute; inset:0; background-image:url('{url}'); background-size:cover; background-position:center; opacity:0.1; filter:blur(20px); transition:opacity 0.5s;"
        ),
        None => "position:absolute; inset:0; opacity:0; transition:opacity 0.5s;".to_owned(),
    };

    let content = if *loading {
        html! { <LoadingSpinner /> }
    } else {
        let all_images = gallery.images();
        html! {
            <>
                <Header
                    on_search={on_search}
                    on_play={on_play}
                    on_shuffle={on_shuffle}
                    tags={gallery.all_tags()}
                    active_tag={gallery.active_tag.clone()}
                    on_select_tag={on_select_tag}
                />
                <main style="width:100%; height:100%;">
                    { for gallery.filtered().map(|entry| html! {
                        <Postcard
                            key={entry.meta.id.clone()}
                            image={entry.meta.clone()}
                            placement={entry.transform}
                            stack={(*stack).clone()}
                            on_select={on_select.clone()}
                            on_hover={on_hover.clone()}
                            on_settle={on_settle.clone()}
                        />
                    }) }
                </main>
                <div style="position:absolute; right:16px; bottom:16px; z-index:0; max-width:24rem; text-align:right; font-size:12px; color:#6b7280; pointer-events:none;">
                    <p>{"Images are for viewing purposes only. Do not redistribute, copy, or use without permission."}</p>
                </div>
                if let Some(image) = (*selected).clone() {
                    <MediaModal
                        image={image}
                        all_images={all_images.clone()}
                        on_close={on_close_modal}
                        on_select_another={on_select.clone()}
                    />
                }
                if *slideshow_active {
                    <SlideshowView images={all_images} on_close={on_close_slideshow} />
                }
            </>
        }
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#111827; color:#fff; font-family:sans-serif;">
            <div style={backdrop_style}></div>
            { content }
        </div>
    }
}
