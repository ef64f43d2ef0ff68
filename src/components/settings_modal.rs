use yew::prelude::*;

use crate::config::{ControllerConfig, SingleTouchMode};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub config: ControllerConfig,
    pub on_change: Callback<ControllerConfig>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let edit = |f: fn(&mut ControllerConfig)| {
        let cfg = props.config.clone();
        let cb = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = cfg.clone();
            f(&mut next);
            cb.emit(next);
        })
    };
    let toggle_mode_cb = edit(|c| {
        c.single_touch = match c.single_touch {
            SingleTouchMode::Rotate => SingleTouchMode::Translate,
            SingleTouchMode::Translate => SingleTouchMode::Rotate,
        }
    });
    let toggle_pinch_cb = edit(|c| c.pinch_zoom = !c.pinch_zoom);
    let toggle_duplicates_cb = edit(|c| c.allow_duplicates = !c.allow_duplicates);
    let toggle_reticle_cb =
        edit(|c| c.hide_reticle_after_placement = !c.hide_reticle_after_placement);
    let reset_cb = edit(|c| *c = ControllerConfig::default());

    let cfg = &props.config;
    let mode_label = match cfg.single_touch {
        SingleTouchMode::Rotate => "One finger: rotate",
        SingleTouchMode::Translate => "One finger: move",
    };
    let on_off = |on: bool| if on { "On" } else { "Off" };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:420px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <button onclick={toggle_mode_cb}>{ mode_label }</button>
            <button onclick={toggle_pinch_cb}>{ format!("Pinch to scale: {}", on_off(cfg.pinch_zoom)) }</button>
            <button onclick={toggle_duplicates_cb}>{ format!("Place copies: {}", on_off(cfg.allow_duplicates)) }</button>
            <button onclick={toggle_reticle_cb}>{ format!("Hide reticle after placing: {}", on_off(cfg.hide_reticle_after_placement)) }</button>
            <button onclick={reset_cb} style="background:#da3633; color:white;">{"Restore defaults"}</button>
        </div>
    </div>}
}
