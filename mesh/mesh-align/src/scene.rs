//! A minimal in-memory scene implementing [`SceneHost`].

use crate::{AlignError, AlignResult, SceneHost, WorldTransform};
use hashbrown::HashMap;
use nalgebra::Point3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An object with local vertex positions and a world placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneObject {
    /// Vertex positions in the object's local space.
    pub vertices: Vec<Point3<f64>>,
    /// World placement.
    pub transform: WorldTransform,
}

impl SceneObject {
    /// Creates an object at the world origin.
    #[must_use]
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self {
            vertices,
            transform: WorldTransform::identity(),
        }
    }

    /// Sets the world placement.
    #[must_use]
    pub fn with_transform(mut self, transform: WorldTransform) -> Self {
        self.transform = transform;
        self
    }

    /// All vertices mapped to world space.
    #[must_use]
    pub fn world_vertices(&self) -> Vec<Point3<f64>> {
        self.vertices
            .iter()
            .map(|v| self.transform.transform_point(v))
            .collect()
    }
}

/// Named objects addressed by string handles.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    objects: HashMap<String, SceneObject>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an object, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, object: SceneObject) -> Option<SceneObject> {
        self.objects.insert(name.into(), object)
    }

    /// Removes an object.
    pub fn remove(&mut self, name: &str) -> Option<SceneObject> {
        self.objects.remove(name)
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn object(&self, name: &str) -> AlignResult<&SceneObject> {
        self.objects
            .get(name)
            .ok_or_else(|| AlignError::UnknownObject(name.to_string()))
    }
}

impl SceneHost for Scene {
    type Handle = str;

    fn local_vertex(&self, object: &str, index: usize) -> AlignResult<Point3<f64>> {
        let obj = self.object(object)?;
        obj.vertices
            .get(index)
            .copied()
            .ok_or(AlignError::VertexOutOfBounds {
                index,
                vertex_count: obj.vertices.len(),
            })
    }

    fn world_transform(&self, object: &str) -> AlignResult<WorldTransform> {
        Ok(self.object(object)?.transform)
    }

    fn set_world_transform(&mut self, object: &str, transform: WorldTransform) -> AlignResult<()> {
        let obj = self
            .objects
            .get_mut(object)
            .ok_or_else(|| AlignError::UnknownObject(object.to_string()))?;
        obj.transform = transform;
        Ok(())
    }
}
