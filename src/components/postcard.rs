use std::rc::Rc;
use web_sys::{Element, PointerEvent};
use yew::prelude::*;

use crate::model::{ImageMetadata, MediaKind, Transform};
use crate::state::{GestureEngine, GestureHost, GesturePhase, StackOrder};

#[derive(Properties, PartialEq, Clone)]
pub struct PostcardProps {
    pub image: Rc<ImageMetadata>,
    /// Placement owned by the gallery; changes here (shuffle) overwrite position and rotation.
    pub placement: Transform,
    pub stack: StackOrder,
    pub on_select: Callback<Rc<ImageMetadata>>,
    pub on_hover: Callback<Option<Rc<ImageMetadata>>>,
    pub on_settle: Callback<(String, Transform)>,
}

// Bridges engine side effects onto component state and callbacks.
struct CardHost<'a> {
    props: &'a PostcardProps,
    rendered: &'a UseStateHandle<Transform>,
}

impl GestureHost for CardHost<'_> {
    fn bring_to_front(&mut self) -> i32 {
        self.props.stack.raise()
    }

    fn transform_changed(&mut self, transform: &Transform) {
        self.rendered.set(*transform);
    }

    fn select(&mut self) {
        self.props.on_select.emit(self.props.image.clone());
    }

    fn settled(&mut self, transform: &Transform) {
        self.props
            .on_settle
            .emit((self.props.image.id.clone(), *transform));
    }
}

#[function_component(Postcard)]
pub fn postcard(props: &PostcardProps) -> Html {
    let card_ref = use_node_ref();
    let engine = use_mut_ref(|| GestureEngine::new(props.placement));
    let rendered = use_state(|| props.placement);
    let loaded = use_state(|| false);

    // Shuffle: take the new position/rotation, keep our own scale and z.
    {
        let engine = engine.clone();
        let rendered = rendered.clone();
        use_effect_with(props.placement, move |placement| {
            let mut eng = engine.borrow_mut();
            eng.reposition(placement.x, placement.y, placement.rotation);
            rendered.set(eng.transform());
            || ()
        });
    }

    let onpointerdown = {
        let engine = engine.clone();
        let rendered = rendered.clone();
        let card_ref = card_ref.clone();
        let props = props.clone();
        Callback::from(move |e: PointerEvent| {
            e.prevent_default();
            e.stop_propagation();
            if let Some(el) = card_ref.cast::<Element>() {
                if let Err(err) = el.set_pointer_capture(e.pointer_id()) {
                    log::warn!("postcard {}: pointer capture refused: {:?}", props.image.id, err);
                }
            }
            let mut host = CardHost {
                props: &props,
                rendered: &rendered,
            };
            engine.borrow_mut().on_contact_start(
                e.pointer_id(),
                f64::from(e.client_x()),
                f64::from(e.client_y()),
                &mut host,
            );
        })
    };
    let onpointermove = {
        let engine = engine.clone();
        let rendered = rendered.clone();
        let props = props.clone();
        Callback::from(move |e: PointerEvent| {
            let mut host = CardHost {
                props: &props,
                rendered: &rendered,
            };
            engine.borrow_mut().on_contact_move(
                e.pointer_id(),
                f64::from(e.client_x()),
                f64::from(e.client_y()),
                &mut host,
            );
        })
    };
    let onpointerup = {
        let engine = engine.clone();
        let rendered = rendered.clone();
        let card_ref = card_ref.clone();
        let props = props.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(el) = card_ref.cast::<Element>() {
                if let Err(err) = el.release_pointer_capture(e.pointer_id()) {
                    log::warn!("postcard {}: pointer release failed: {:?}", props.image.id, err);
                }
            }
            let mut host = CardHost {
                props: &props,
                rendered: &rendered,
            };
            engine.borrow_mut().on_contact_end(e.pointer_id(), &mut host);
        })
    };
    let onpointercancel = {
        let engine = engine.clone();
        let rendered = rendered.clone();
        let props = props.clone();
        Callback::from(move |e: PointerEvent| {
            let mut host = CardHost {
                props: &props,
                rendered: &rendered,
            };
            engine.borrow_mut().on_contact_cancel(e.pointer_id(), &mut host);
        })
    };
    let onpointerenter = {
        let cb = props.on_hover.clone();
        let image = props.image.clone();
        Callback::from(move |_: PointerEvent| cb.emit(Some(image.clone())))
    };
    let onpointerleave = {
        let cb = props.on_hover.clone();
        Callback::from(move |_: PointerEvent| cb.emit(None))
    };
    let onload = {
        let loaded = loaded.clone();
        Callback::from(move |_: Event| loaded.set(true))
    };

    let t = *rendered;
    // Animate only external moves (shuffle); a live gesture must track the finger.
    let transition = if engine.borrow().phase() == GesturePhase::Idle {
        "transition:transform 0.5s ease-in-out;"
    } else {
        ""
    };
    let style = format!(
        "position:absolute; left:0; top:0; touch-action:none; cursor:pointer; transform:{}; z-index:{}; {}",
        t.css(),
        t.z,
        transition
    );
    let image = &props.image;
    html! {
        <div
            ref={card_ref}
            class="postcard"
            {style}
            {onpointerdown}
            {onpointermove}
            {onpointerup}
            {onpointercancel}
            {onpointerenter}
            {onpointerleave}
        >
            <div style="position:relative; background:#fff; padding:12px 12px 32px 12px; border-radius:6px; box-shadow:0 20px 40px rgba(0,0,0,0.5);">
                <div style="position:relative;">
                    if !*loaded {
                        <div style="width:300px; height:225px; display:flex; align-items:center; justify-content:center; background:#e5e7eb; border-radius:2px;">
                            <div class="spinner" style="width:32px; height:32px; border:4px dashed #9ca3af; border-radius:50%;"></div>
                        </div>
                    }
                    <img
                        src={image.preview_url().to_owned()}
                        alt={image.title.clone()}
                        loading="lazy"
                        draggable="false"
                        {onload}
                        style={if *loaded {
                            "display:block; max-width:300px; max-height:300px; width:auto; height:auto; user-select:none; border-radius:2px;"
                        } else {
                            "display:none;"
                        }}
                    />
                    if *loaded && image.kind == MediaKind::Video {
                        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.3); color:#fff; font-size:48px; border-radius:2px;">
                            {"▶"}
                        </div>
                    }
                </div>
                <div class="postcard-title" style="position:absolute; left:0; right:0; bottom:0; padding:8px; color:#fff; background:rgba(0,0,0,0.5); text-align:center; font-size:12px;">
                    { image.title.clone() }
                </div>
            </div>
        </div>
    }
}
