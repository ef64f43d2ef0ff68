use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SessionControlsProps {
    pub session_active: bool,
    pub on_toggle_session: Callback<()>,
    pub on_place: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn SessionControls(props: &SessionControlsProps) -> Html {
    let session_cb = {
        let cb = props.on_toggle_session.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let place_cb = {
        let cb = props.on_place.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let session_label = if props.session_active { "Stop AR" } else { "Start AR" };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:140px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={session_cb}>{ session_label }</button>
        <button onclick={place_cb} disabled={!props.session_active}>{"Place"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
    </div>}
}
