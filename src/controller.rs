//! Gesture interaction controller.
//!
//! Turns the "select" trigger, per-frame hit results and raw touch contacts into
//! placement and transform updates on the active selection. Every rejected
//! input degrades to a no-op; the reasons are only reported through `log`.

use crate::config::{ControllerConfig, SingleTouchMode};
use crate::error::InteractionError;
use crate::model::{AssetId, Contact, ObjectHandle, Pose};
use crate::scene::{SceneGraph, SceneNode, SceneService};
use crate::session::{PreviewSession, SessionService};
use crate::state::{GestureUpdate, TouchTracker};
#[cfg(test)]
use crate::state::touch::GestureState;

/// The controller as the browser shell wires it.
pub type AppController = Controller<SceneGraph, PreviewSession>;

pub struct Controller<S, X> {
    scene: S,
    session: X,
    config: ControllerConfig,
    selected_asset: Option<AssetId>,
    /// Most recently placed object; never cleared once set.
    active: Option<ObjectHandle>,
    touch: TouchTracker,
    status: Option<String>,
}

impl<S: SceneService, X: SessionService> Controller<S, X> {
    pub fn new(scene: S, session: X, config: ControllerConfig) -> Self {
        Self {
            scene,
            session,
            config,
            selected_asset: None,
            active: None,
            touch: TouchTracker::default(),
            status: None,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn session(&self) -> &X {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut X {
        &mut self.session
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ControllerConfig) {
        self.config = config;
        self.refresh_status();
    }

    pub fn set_selected_asset(&mut self, asset: AssetId) {
        self.selected_asset = Some(asset);
    }

    pub fn active(&self) -> Option<ObjectHandle> {
        self.active
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[cfg(test)]
    pub fn gesture_state(&self) -> GestureState {
        self.touch.state()
    }

    /// The one-shot "select" trigger: places the picked asset at the reticle.
    pub fn select(&mut self) -> Result<ObjectHandle, InteractionError> {
        let asset = self
            .selected_asset
            .clone()
            .ok_or(InteractionError::NoAssetSelected)?;
        let pose = self.scene.reticle().pose;
        self.place_at(&asset, pose)
    }

    pub fn place_at(&mut self, asset: &AssetId, pose: Pose) -> Result<ObjectHandle, InteractionError> {
        if !self.scene.reticle().visible {
            return Err(InteractionError::ReticleHidden);
        }
        if !self.config.allow_duplicates && self.scene.find_by_name(asset.as_str()).is_some() {
            return Err(InteractionError::DuplicatePlacement(asset.clone()));
        }
        let mut node = self
            .scene
            .create_instance(asset)
            .ok_or_else(|| InteractionError::AssetNotReady(asset.clone()))?;
        node.name = asset.to_string();
        node.transform.position = pose.position();
        node.transform.scale = self.config.placement_scale;
        let handle = self.scene.add_to_scene(node);
        self.active = Some(handle);
        if self.config.hide_reticle_after_placement {
            self.scene.set_reticle_visible(false);
        }
        self.refresh_status();
        log::info!("placed {asset} at {}", pose.position());
        Ok(handle)
    }

    /// Per-frame reticle update from the session's hit results.
    pub fn on_frame(&mut self, timestamp: f64) {
        let hit = self
            .session
            .hit_test(timestamp)
            .and_then(|hits| hits.first().copied());
        match hit {
            Some(hit) => {
                self.scene.set_reticle_pose(hit.pose);
                self.scene.set_reticle_visible(true);
            }
            None => self.scene.set_reticle_visible(false),
        }
        if self.config.hide_reticle_after_placement && self.active.is_some() {
            self.scene.set_reticle_visible(false);
        }
    }

    pub fn start_session(&mut self) {
        self.session.start();
    }

    pub fn end_session(&mut self) {
        self.session.end();
        self.on_session_end();
    }

    /// Placed objects outlive the session; only hit-testing starts over.
    pub fn on_session_end(&mut self) {
        self.session.reset_hit_test();
        self.scene.set_reticle_visible(false);
    }

    pub fn on_touch_start(&mut self, contacts: &[Contact]) {
        self.touch.touch_start(contacts);
    }

    pub fn on_touch_move(&mut self, contacts: &[Contact]) {
        if let Some(update) = self.touch.touch_move(contacts) {
            if let Err(err) = self.apply(update) {
                log::debug!("gesture ignored: {err}");
            }
        }
    }

    pub fn on_touch_end(&mut self) {
        self.touch.touch_end();
    }

    fn apply(&mut self, update: GestureUpdate) -> Result<(), InteractionError> {
        let handle = self.active.ok_or(InteractionError::NoActiveSelection)?;
        let node = self
            .scene
            .node_mut(handle)
            .ok_or(InteractionError::NoActiveSelection)?;
        let t = &mut node.transform;
        match update {
            GestureUpdate::Drag { dx, dy } => match self.config.single_touch {
                SingleTouchMode::Rotate => {
                    t.rotation.y += dx * self.config.rotation_factor;
                    t.rotation.x += dy * self.config.rotation_factor;
                }
                SingleTouchMode::Translate => {
                    t.position.x += dx * self.config.translation_factor;
                    t.position.y -= dy * self.config.translation_factor;
                }
            },
            GestureUpdate::Zoom { factor } => {
                if !self.config.pinch_zoom {
                    return Ok(());
                }
                t.scale *= factor;
            }
        }
        self.refresh_status();
        Ok(())
    }

    fn refresh_status(&mut self) {
        let Some(node) = self.active.and_then(|h| self.scene.node(h)) else {
            return;
        };
        self.status = Some(format_status(node, self.config.pinch_zoom));
    }
}

pub fn format_status(node: &SceneNode, with_scale: bool) -> String {
    let p = node.transform.position;
    let mut status = format!(
        "{} Coordinates: x={:.2}, y={:.2}, z={:.2}",
        node.kind.label(),
        p.x,
        p.y,
        p.z
    );
    if with_scale {
        status.push_str(&format!(" | Scale: {:.2}", node.transform.scale));
    }
    status
}
