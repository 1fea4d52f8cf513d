use std::rc::Rc;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Blob, ClipboardItem, KeyboardEvent, Response};
use yew::prelude::*;

use crate::model::{related, ImageMetadata, MediaKind};
use crate::util::{self, ClipboardFeedback};

const RELATED_LIMIT: usize = 4;
const FEEDBACK_RESET_MS: u32 = 2_000;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Related,
    Sources,
}

#[derive(Properties, PartialEq, Clone)]
pub struct MediaModalProps {
    pub image: Rc<ImageMetadata>,
    pub all_images: Vec<Rc<ImageMetadata>>,
    pub on_close: Callback<()>,
    pub on_select_another: Callback<Rc<ImageMetadata>>,
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

async fn copy_text(text: &str) -> Result<(), JsValue> {
    let promise = window()?.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await?;
    Ok(())
}

/// Fetches the media and places it on the clipboard under its own MIME type.
async fn copy_image(url: &str) -> Result<(), JsValue> {
    let win = window()?;
    let resp: Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let blob: Blob = JsFuture::from(resp.blob()?).await?.dyn_into()?;
    let entry = js_sys::Object::new();
    js_sys::Reflect::set(&entry, &JsValue::from_str(&blob.type_()), &blob)?;
    let item = ClipboardItem::new_with_record_from_str_to_blob_promise(&entry)?;
    let items = js_sys::Array::of1(&item);
    JsFuture::from(win.navigator().clipboard().write(&items)).await?;
    Ok(())
}

/// Shows `feedback` on a button, then restores `idle` after a short delay.
async fn flash_label(label: UseStateHandle<&'static str>, feedback: ClipboardFeedback, idle: &'static str) {
    label.set(feedback.label());
    TimeoutFuture::new(FEEDBACK_RESET_MS).await;
    label.set(idle);
}

fn current_share_url(id: &str) -> Option<String> {
    let location = web_sys::window()?.location();
    let origin = location.origin().ok()?;
    let path = location.pathname().ok()?;
    Some(util::share_url(&origin, &path, id))
}

#[function_component(MediaModal)]
pub fn media_modal(props: &MediaModalProps) -> Html {
    let related_items = {
        let image = props.image.clone();
        let all = props.all_images.clone();
        use_memo((props.image.id.clone(), all.len()), move |_| {
            related(&image, &all, RELATED_LIMIT, &mut util::random)
        })
    };
    let has_related = !related_items.is_empty();
    let tab = use_state(|| if has_related { Tab::Related } else { Tab::Sources });
    let share_label = use_state(|| "Share");
    let copy_label = use_state(|| "Copy");

    // Reset tab and feedback when switching to another item.
    {
        let tab = tab.clone();
        let share_label = share_label.clone();
        let copy_label = copy_label.clone();
        use_effect_with((props.image.id.clone(), has_related), move |(_, has_related)| {
            tab.set(if *has_related { Tab::Related } else { Tab::Sources });
            share_label.set("Share");
            copy_label.set("Copy");
            || ()
        });
    }

    // Escape closes
    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if e.key() == "Escape" {
                    on_close.emit(());
                }
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_share = {
        let share_label = share_label.clone();
        let id = props.image.id.clone();
        Callback::from(move |_| {
            let share_label = share_label.clone();
            let url = current_share_url(&id);
            spawn_local(async move {
                let result = match url {
                    Some(url) => copy_text(&url).await,
                    None => Err(JsValue::from_str("no location")),
                };
                if let Err(err) = &result {
                    log::warn!("failed to copy share link: {:?}", err);
                }
                flash_label(share_label, ClipboardFeedback::from_result(&result), "Share").await;
            });
        })
    };
    let on_copy = {
        let copy_label = copy_label.clone();
        let image = props.image.clone();
        Callback::from(move |_| {
            let copy_label = copy_label.clone();
            let image = image.clone();
            spawn_local(async move {
                let feedback = match util::image_copy_precheck(&image) {
                    Some(feedback) => feedback,
                    None => {
                        let result = copy_image(&image.image_url).await;
                        if let Err(err) = &result {
                            log::warn!("failed to copy image {}: {:?}", image.id, err);
                        }
                        ClipboardFeedback::from_result(&result)
                    }
                };
                flash_label(copy_label, feedback, "Copy").await;
            });
        })
    };
    let backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let close = backdrop.clone();
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());
    let select_tab = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_| tab.set(target))
    };
    let tab_style = |target: Tab| {
        if *tab == target {
            "padding:12px 4px; background:none; border:none; border-bottom:2px solid #3b82f6; color:#60a5fa; font-weight:500; cursor:pointer;"
        } else {
            "padding:12px 4px; background:none; border:none; border-bottom:2px solid transparent; color:#9ca3af; font-weight:500; cursor:pointer;"
        }
    };

    let image = &props.image;
    let action = "display:flex; align-items:center; gap:8px; background:#374151; color:#fff; border:none; padding:6px 12px; border-radius:6px; font-size:14px; cursor:pointer; text-decoration:none;";
    let media = match image.kind {
        MediaKind::Video => html! {
            <video key={image.id.clone()} src={image.image_url.clone()} controls=true autoplay=true loop=true
                style="max-width:100%; max-height:60vh; object-fit:contain;" />
        },
        MediaKind::Image => html! {
            <img src={image.image_url.clone()} alt={image.title.clone()}
                style="max-width:100%; max-height:60vh; object-fit:contain;" />
        },
    };

    let tab_body = match *tab {
        Tab::Related if has_related => html! {
            <div style="display:grid; grid-template-columns:repeat(4, 1fr); gap:12px;">
                { for related_items.iter().map(|item| {
                    let cb = props.on_select_another.clone();
                    let picked = item.clone();
                    let onclick = Callback::from(move |_| cb.emit(picked.clone()));
                    html! {
                        <div key={item.id.clone()} {onclick} style="cursor:pointer;">
                            <img src={item.preview_url().to_owned()} alt={item.title.clone()}
                                style="width:100%; height:96px; object-fit:cover; border-radius:6px;" />
                            <p style="margin:4px 0 0 0; font-size:12px; color:#d1d5db; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                                { item.title.clone() }
                            </p>
                        </div>
                    }
                }) }
            </div>
        },
        _ => html! {
            <div style="display:flex; align-items:center; gap:24px;">
                <a href={image.data.clone()} target="_blank" rel="noopener noreferrer" style="color:#60a5fa;">{"Raw Data"}</a>
                <a href={image.source.clone()} target="_blank" rel="noopener noreferrer" style="color:#60a5fa;">{"Source Link"}</a>
            </div>
        },
    };

    html! {
        <div onclick={backdrop} class="zoom-in" style="position:fixed; inset:0; z-index:9999; background:rgba(0,0,0,0.8); backdrop-filter:blur(12px); display:flex; align-items:center; justify-content:center;">
            <div onclick={swallow} style="position:relative; background:#111827; color:#fff; border-radius:8px; width:92%; max-width:1024px; max-height:90vh; display:flex; flex-direction:column; overflow:hidden;">
                <div style="width:100%; background:#000; display:flex; align-items:center; justify-content:center; flex-shrink:0;">
                    { media }
                </div>
                <div style="padding:24px 32px; overflow-y:auto;">
                    <div style="display:flex; justify-content:space-between; align-items:flex-start; gap:16px; margin-bottom:16px;">
                        <h2 style="margin:0; font-size:24px;">{ image.title.clone() }</h2>
                        <div style="display:flex; gap:8px; flex-shrink:0;">
                            <a href={image.image_url.clone()} download={util::media_file_name(image)} style={action}>{"Download"}</a>
                            <button onclick={on_copy} style={action}>{ *copy_label }</button>
                            <button onclick={on_share} style={action}>{ *share_label }</button>
                        </div>
                    </div>
                    <p style="color:#d1d5db; margin:0 0 24px 0;">{ image.description.clone() }</p>
                    <nav style="border-bottom:1px solid #374151; display:flex; gap:24px;" aria-label="Tabs">
                        if has_related {
                            <button onclick={select_tab(Tab::Related)} style={tab_style(Tab::Related)}>{"Related Items"}</button>
                        }
                        <button onclick={select_tab(Tab::Sources)} style={tab_style(Tab::Sources)}>{"Data Sources"}</button>
                    </nav>
                    <div style="padding-top:24px;">{ tab_body }</div>
                </div>
            </div>
            <button onclick={close} style="position:absolute; top:16px; right:16px; background:rgba(0,0,0,0.3); color:#fff; border:none; border-radius:9999px; padding:4px 10px; font-size:24px; cursor:pointer;">{"✕"}</button>
        </div>
    }
}
