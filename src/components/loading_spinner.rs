use yew::prelude::*;

#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div style="width:100%; height:100%; display:flex; align-items:center; justify-content:center;">
            <div class="spinner" style="width:64px; height:64px; border:6px dashed #9ca3af; border-radius:50%;"></div>
        </div>
    }
}
