//! Diagram canvas state used as the live editing value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub shapes: HashMap<Uuid, Shape>,
    pub connectors: Vec<Connector>,
    pub viewport: Viewport,
    pub background: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: Uuid,
    pub kind: ShapeKind,
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub label: String,
    pub z_order: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Image { source: String },
    Freehand { points: Vec<(f32, f32)> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from_shape: Uuid,
    pub to_shape: Uuid,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan: (f32, f32),
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: (0.0, 0.0),
            zoom: 1.0,
        }
    }
}

impl Canvas {
    pub fn add_shape(&mut self, kind: ShapeKind, position: (f32, f32)) -> Uuid {
        let id = Uuid::new_v4();
        let z_order = self.shapes.values().map(|s| s.z_order + 1).max().unwrap_or(0);
        self.shapes.insert(
            id,
            Shape {
                id,
                kind,
                position,
                size: (120.0, 60.0),
                label: String::new(),
                z_order,
            },
        );
        id
    }

    /// Returns false if the shape does not exist.
    pub fn move_shape(&mut self, id: Uuid, dx: f32, dy: f32) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.position.0 += dx;
                shape.position.1 += dy;
                true
            }
            None => false,
        }
    }

    pub fn set_label(&mut self, id: Uuid, label: impl Into<String>) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Removes a shape along with every connector attached to it.
    pub fn remove_shape(&mut self, id: Uuid) -> bool {
        if self.shapes.remove(&id).is_none() {
            return false;
        }
        self.connectors.retain(|c| c.from_shape != id && c.to_shape != id);
        true
    }

    /// Both ends must exist and be distinct.
    pub fn connect(&mut self, from_shape: Uuid, to_shape: Uuid, label: Option<String>) -> bool {
        if from_shape == to_shape
            || !self.shapes.contains_key(&from_shape)
            || !self.shapes.contains_key(&to_shape)
        {
            return false;
        }
        self.connectors.push(Connector {
            from_shape,
            to_shape,
            label,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_a_shape_drops_its_connectors() {
        let mut canvas = Canvas::default();
        let a = canvas.add_shape(ShapeKind::Rectangle, (0.0, 0.0));
        let b = canvas.add_shape(ShapeKind::Ellipse, (200.0, 0.0));
        let c = canvas.add_shape(ShapeKind::Diamond, (400.0, 0.0));
        assert!(canvas.connect(a, b, None));
        assert!(canvas.connect(b, c, Some("yes".to_string())));

        assert!(canvas.remove_shape(a));
        assert_eq!(canvas.connectors.len(), 1);
        assert_eq!(canvas.connectors[0].from_shape, b);
        assert!(!canvas.remove_shape(a));
    }

    #[test]
    fn connect_rejects_self_loops_and_missing_shapes() {
        let mut canvas = Canvas::default();
        let a = canvas.add_shape(ShapeKind::Text, (0.0, 0.0));
        assert!(!canvas.connect(a, a, None));
        assert!(!canvas.connect(a, Uuid::new_v4(), None));
        assert!(canvas.connectors.is_empty());
    }

    #[test]
    fn new_shapes_stack_on_top() {
        let mut canvas = Canvas::default();
        let a = canvas.add_shape(ShapeKind::Rectangle, (0.0, 0.0));
        let b = canvas.add_shape(ShapeKind::Rectangle, (10.0, 10.0));
        assert!(canvas.shapes[&b].z_order > canvas.shapes[&a].z_order);
    }
}
