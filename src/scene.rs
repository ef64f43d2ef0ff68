//! Scene graph the controller drives: the placed-object registry and the reticle.

use crate::catalog::AssetCatalog;
use crate::model::{AssetId, AssetKind, ObjectHandle, Pose, Transform};

/// A live instance cloned from a catalog template.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Registry name; placement uses the asset id.
    pub name: String,
    pub asset: AssetId,
    pub kind: AssetKind,
    pub aspect: f32,
    pub transform: Transform,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reticle {
    pub pose: Pose,
    pub visible: bool,
}

pub trait SceneService {
    /// Clones the template registered under `template`, detached from the scene.
    fn create_instance(&self, template: &AssetId) -> Option<SceneNode>;
    fn find_by_name(&self, name: &str) -> Option<ObjectHandle>;
    fn add_to_scene(&mut self, node: SceneNode) -> ObjectHandle;
    fn set_reticle_pose(&mut self, pose: Pose);
    fn set_reticle_visible(&mut self, visible: bool);
    fn reticle(&self) -> &Reticle;
    fn node(&self, handle: ObjectHandle) -> Option<&SceneNode>;
    fn node_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneNode>;
}

/// In-memory scene. Objects are never removed, so handles stay valid.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    catalog: AssetCatalog,
    nodes: Vec<SceneNode>,
    reticle: Reticle,
}

impl SceneGraph {
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut AssetCatalog {
        &mut self.catalog
    }

    pub fn nodes(&self) -> impl Iterator<Item = (ObjectHandle, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ObjectHandle(i), node))
    }
}

impl SceneService for SceneGraph {
    fn create_instance(&self, template: &AssetId) -> Option<SceneNode> {
        let template = self.catalog.get(template)?;
        Some(SceneNode {
            name: String::new(),
            asset: template.id.clone(),
            kind: template.kind,
            aspect: template.aspect,
            transform: Transform::default(),
        })
    }

    fn find_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(ObjectHandle)
    }

    fn add_to_scene(&mut self, node: SceneNode) -> ObjectHandle {
        self.nodes.push(node);
        ObjectHandle(self.nodes.len() - 1)
    }

    fn set_reticle_pose(&mut self, pose: Pose) {
        self.reticle.pose = pose;
    }

    fn set_reticle_visible(&mut self, visible: bool) {
        self.reticle.visible = visible;
    }

    fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    fn node(&self, handle: ObjectHandle) -> Option<&SceneNode> {
        self.nodes.get(handle.0)
    }

    fn node_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AssetEntry, AssetTemplate};

    fn graph_with(id: &str) -> SceneGraph {
        let mut graph = SceneGraph::default();
        graph.catalog_mut().insert(AssetTemplate::model(&AssetEntry {
            id: AssetId::new(id),
            kind: AssetKind::Model,
            url: format!("/models/{id}.gltf"),
            label: id.to_string(),
        }));
        graph
    }

    #[test]
    fn create_instance_misses_unknown_templates() {
        let graph = graph_with("chair");
        assert!(graph.create_instance(&AssetId::new("sofa")).is_none());
        let node = graph.create_instance(&AssetId::new("chair")).unwrap();
        assert_eq!(node.kind, AssetKind::Model);
        assert_eq!(node.transform, Transform::default());
    }

    #[test]
    fn created_instances_are_detached_until_added() {
        let mut graph = graph_with("chair");
        let mut node = graph.create_instance(&AssetId::new("chair")).unwrap();
        assert_eq!(graph.nodes().count(), 0);
        node.name = "chair".into();
        let handle = graph.add_to_scene(node);
        assert_eq!(graph.find_by_name("chair"), Some(handle));
        assert_eq!(graph.node(handle).unwrap().asset.as_str(), "chair");
    }

    #[test]
    fn reticle_starts_hidden() {
        let mut graph = SceneGraph::default();
        assert!(!graph.reticle().visible);
        graph.set_reticle_visible(true);
        graph.set_reticle_pose(Pose::from_translation(glam::Vec3::X));
        assert!(graph.reticle().visible);
        assert_eq!(graph.reticle().pose.position(), glam::Vec3::X);
    }
}
