use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub on_search: Callback<String>,
    pub on_play: Callback<()>,
    pub on_shuffle: Callback<()>,
    pub tags: Vec<String>,
    pub active_tag: Option<String>,
    pub on_select_tag: Callback<Option<String>>,
}

const PILL: &str = "padding:4px 12px; font-size:14px; border-radius:9999px; border:none; cursor:pointer;";
const PILL_ACTIVE: &str = "background:#2563eb; color:#fff; font-weight:600;";
const PILL_IDLE: &str = "background:#374151; color:#e5e7eb;";

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let oninput = {
        let cb = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let shuffle = {
        let cb = props.on_shuffle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let play = {
        let cb = props.on_play.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let pill = |label: String, tag: Option<String>| {
        let active = props.active_tag == tag;
        let cb = props.on_select_tag.clone();
        let onclick = Callback::from(move |_| cb.emit(tag.clone()));
        let style = format!("{} {}", PILL, if active { PILL_ACTIVE } else { PILL_IDLE });
        html! { <button {style} {onclick}>{ label }</button> }
    };

    html! {
        <header style="position:absolute; top:0; left:0; right:0; z-index:20; padding:16px; display:flex; justify-content:space-between; align-items:center; background:linear-gradient(to bottom, rgba(0,0,0,0.6), transparent); pointer-events:none;">
            <div style="display:flex; align-items:center; gap:16px; pointer-events:auto;">
                <input
                    type="text"
                    placeholder="Search..."
                    {oninput}
                    style="background:rgba(31,41,55,0.7); color:#fff; border:1px solid #4b5563; border-radius:9999px; padding:8px 16px; width:220px;"
                />
                <button onclick={shuffle} aria-label="Shuffle Postcards" style="background:rgba(31,41,55,0.7); color:#fff; border:none; border-radius:9999px; padding:10px; cursor:pointer;">
                    {"🔀"}
                </button>
            </div>
            if !props.tags.is_empty() {
                <div style="flex:1; display:flex; justify-content:center; pointer-events:auto; padding:0 16px;">
                    <div style="padding:6px; background:rgba(31,41,55,0.7); border-radius:9999px; display:flex; gap:8px; flex-wrap:wrap; justify-content:center;">
                        { pill("All".to_owned(), None) }
                        { for props.tags.iter().map(|t| pill(t.clone(), Some(t.clone()))) }
                    </div>
                </div>
            }
            <div style="pointer-events:auto;">
                <button onclick={play} aria-label="Start Slideshow" style="background:#2563eb; color:#fff; border:none; border-radius:9999px; padding:12px; cursor:pointer; font-size:20px;">
                    {"▶"}
                </button>
            </div>
        </header>
    }
}
