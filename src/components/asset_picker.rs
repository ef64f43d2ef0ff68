use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::catalog::AssetEntry;
use crate::model::AssetId;

#[derive(Properties, PartialEq, Clone)]
pub struct AssetPickerProps {
    pub entries: Vec<AssetEntry>,
    pub selected: Option<AssetId>,
    pub loaded: usize,
    pub total: usize,
    pub on_pick: Callback<AssetId>,
}

#[function_component]
pub fn AssetPicker(props: &AssetPickerProps) -> Html {
    let onchange = {
        let cb = props.on_pick.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(AssetId::new(select.value()));
        })
    };
    html! {<div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px; font-size:13px;">
        <select id="model-select" onchange={onchange}>
            { for props.entries.iter().map(|entry| {
                let is_selected = props.selected.as_ref() == Some(&entry.id);
                html! { <option value={entry.id.to_string()} selected={is_selected}>{ format!("{} ({})", entry.label, entry.kind.label()) }</option> }
            }) }
        </select>
        <div style="font-size:11px; opacity:0.7;">{ format!("Assets loaded: {}/{}", props.loaded, props.total) }</div>
    </div>}
}
