use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusOverlayProps {
    pub text: Option<String>,
    pub session_active: bool,
}

#[function_component]
pub fn StatusOverlay(props: &StatusOverlayProps) -> Html {
    let hint = if props.session_active {
        "Tap the reticle to place. Drag to rotate, pinch to scale."
    } else {
        "Start AR to look for a surface."
    };
    html! {<div id="overlay-content" style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 12px; font-size:13px; font-variant-numeric:tabular-nums; max-width:80vw;">
        { match &props.text {
            Some(text) => html! { <div>{ text.clone() }</div> },
            None => html! { <div style="opacity:0.7;">{ hint }</div> },
        } }
    </div>}
}
