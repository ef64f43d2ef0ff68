use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use super::{
    ar_view::ArView, asset_picker::AssetPicker, session_controls::SessionControls,
    settings_modal::SettingsModal, status_overlay::StatusOverlay,
};
use crate::catalog::AssetManifest;
use crate::config::ControllerConfig;
use crate::controller::{AppController, Controller};
use crate::loader::{AssetLoader, WebAssetLoader};
use crate::model::AssetId;
use crate::scene::SceneGraph;
use crate::session::{PreviewSession, SessionService};
use crate::state::PreviewCamera;

/// Controller shared between the shell and the canvas listeners; compared by identity.
#[derive(Clone)]
pub struct SharedController(pub Rc<RefCell<AppController>>);

impl PartialEq for SharedController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let controller = use_mut_ref(|| {
        Controller::new(
            SceneGraph::default(),
            PreviewSession::new(PreviewCamera::default()),
            ControllerConfig::load(),
        )
    });
    let manifest = use_memo((), |_| {
        AssetManifest::builtin().unwrap_or_else(|err| {
            log::error!("bad asset manifest: {err}");
            AssetManifest::default()
        })
    });
    let entries = manifest.entries();
    let status = use_state(|| None::<String>);
    let loaded = use_state(|| 0usize);
    let session_active = use_state(|| false);
    let first_entry = entries.first().map(|e| e.id.clone());
    let selected = use_state(move || first_entry);
    let config = {
        let controller = controller.clone();
        use_state(move || controller.borrow().config().clone())
    };
    let open_settings = use_state(|| false);

    // Start every load once; completions land in the catalog whenever they arrive
    {
        let controller = controller.clone();
        let manifest = manifest.clone();
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            let loader = WebAssetLoader;
            for entry in manifest.entries() {
                let controller = controller.clone();
                let loaded = loaded.clone();
                loader.load(
                    &entry,
                    Box::new(move |template| {
                        let count = {
                            let mut c = controller.borrow_mut();
                            c.scene_mut().catalog_mut().insert(template);
                            c.scene().catalog().len()
                        };
                        loaded.set(count);
                    }),
                );
            }
            || ()
        });
    }
    // Keep the controller's picked asset in sync with the picker
    {
        let controller = controller.clone();
        use_effect_with((*selected).clone(), move |sel| {
            if let Some(id) = sel {
                controller.borrow_mut().set_selected_asset(id.clone());
            }
            || ()
        });
    }

    let on_pick = {
        let selected = selected.clone();
        Callback::from(move |id: AssetId| selected.set(Some(id)))
    };
    let on_status = {
        let status = status.clone();
        Callback::from(move |text: Option<String>| status.set(text))
    };
    let on_place: Callback<()> = {
        let controller = controller.clone();
        let status = status.clone();
        Callback::from(move |()| {
            let result = controller.borrow_mut().select();
            match result {
                Ok(_) => status.set(controller.borrow().status().map(str::to_owned)),
                Err(err) => log::debug!("select ignored: {err}"),
            }
        })
    };
    let on_toggle_session: Callback<()> = {
        let controller = controller.clone();
        let session_active = session_active.clone();
        Callback::from(move |()| {
            let active = {
                let mut c = controller.borrow_mut();
                if c.session().is_active() {
                    c.end_session();
                } else {
                    c.start_session();
                }
                c.session().is_active()
            };
            session_active.set(active);
        })
    };
    let on_config = {
        let controller = controller.clone();
        let config = config.clone();
        let status = status.clone();
        Callback::from(move |next: ControllerConfig| {
            if let Err(err) = next.save() {
                log::warn!("controller config not saved: {err}");
            }
            controller.borrow_mut().set_config(next.clone());
            status.set(controller.borrow().status().map(str::to_owned));
            config.set(next);
        })
    };
    let open_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(true))
    };
    let close_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };

    let total = entries.len();
    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
        <ArView controller={SharedController(controller.clone())} on_status={on_status} />
        <StatusOverlay text={(*status).clone()} session_active={*session_active} />
        <AssetPicker entries={entries} selected={(*selected).clone()} loaded={*loaded} total={total} on_pick={on_pick} />
        <SessionControls session_active={*session_active} on_toggle_session={on_toggle_session} on_place={on_place} on_open_settings={open_settings_cb} />
        <SettingsModal show={*open_settings} config={(*config).clone()} on_change={on_config} on_close={close_settings_cb} />
    </div>}
}
