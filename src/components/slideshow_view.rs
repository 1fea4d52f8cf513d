use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::model::{ImageMetadata, MediaKind};
use crate::state::{Slideshow, SlideshowAction};

pub const SLIDESHOW_INTERVAL_MS: u32 = 5_000;

#[derive(Properties, PartialEq, Clone)]
pub struct SlideshowViewProps {
    pub images: Vec<Rc<ImageMetadata>>,
    pub on_close: Callback<()>,
}

#[function_component(SlideshowView)]
pub fn slideshow_view(props: &SlideshowViewProps) -> Html {
    let show = use_reducer({
        let len = props.images.len();
        move || Slideshow::new(len)
    });

    {
        let show = show.clone();
        use_effect_with(props.images.len(), move |len| {
            show.dispatch(SlideshowAction::Resize(*len));
            || ()
        });
    }

    // Auto-advance; restarted whenever the slide or pause state changes.
    {
        let show = show.clone();
        use_effect_with((show.index, show.paused), move |(_, paused)| {
            let timer = (!*paused).then(|| {
                let show = show.clone();
                Timeout::new(SLIDESHOW_INTERVAL_MS, move || show.dispatch(SlideshowAction::Next))
            });
            move || drop(timer)
        });
    }

    // Keyboard
    {
        let show = show.clone();
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| match e.key().as_str() {
                "ArrowRight" => show.dispatch(SlideshowAction::Next),
                "ArrowLeft" => show.dispatch(SlideshowAction::Prev),
                "Escape" => on_close.emit(()),
                " " => {
                    e.prevent_default();
                    show.dispatch(SlideshowAction::TogglePause);
                }
                _ => {}
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

    let control = |action: SlideshowAction| {
        let show = show.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            show.dispatch(action);
        })
    };
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(());
        })
    };
    let backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());

    let button = "padding:8px; border:none; border-radius:9999px; background:rgba(0,0,0,0.3); color:#fff; cursor:pointer; font-size:24px;";
    let media = match show.current(&props.images) {
        Some(item) => {
            let media = match item.kind {
                MediaKind::Video => html! {
                    <video key={item.id.clone()} src={item.image_url.clone()} autoplay=true muted=true loop=true
                        style="max-width:90vw; max-height:90vh; object-fit:contain; border-radius:8px;" />
                },
                MediaKind::Image => html! {
                    <img key={item.id.clone()} src={item.image_url.clone()} alt={item.title.clone()}
                        style="max-width:90vw; max-height:90vh; object-fit:contain; border-radius:8px;" />
                },
            };
            html! {
                <div class="fade-in" style="position:relative;">
                    { media }
                    <div style="position:absolute; left:0; right:0; bottom:0; padding:24px; background:linear-gradient(to top, rgba(0,0,0,0.8), transparent); border-radius:0 0 8px 8px; pointer-events:none;">
                        <h2 style="margin:0; font-size:30px;">{ item.title.clone() }</h2>
                        <p style="margin:8px 0 0 0; color:#d1d5db;">{ item.description.clone() }</p>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <div onclick={backdrop} style="position:fixed; inset:0; z-index:10000; background:rgba(0,0,0,0.8); backdrop-filter:blur(12px); display:flex; align-items:center; justify-content:center; color:#fff;">
            <div onclick={swallow} style="position:relative; width:100%; height:100%; display:flex; align-items:center; justify-content:center;">
                { media }
            </div>
            <div style="position:absolute; top:16px; right:16px; display:flex; gap:16px; z-index:10;">
                <button style={button} onclick={control(SlideshowAction::TogglePause)}>
                    { if show.paused { "▶" } else { "⏸" } }
                </button>
                <button style={button} onclick={close}>{"✕"}</button>
            </div>
            <button style={format!("position:absolute; left:16px; top:50%; {}", button)} onclick={control(SlideshowAction::Prev)}>{"‹"}</button>
            <button style={format!("position:absolute; right:16px; top:50%; {}", button)} onclick={control(SlideshowAction::Next)}>{"›"}</button>
        </div>
    }
}
