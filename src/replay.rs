//! Scripted editing sessions.
//!
//! A script is a JSON list of steps applied to a [`Canvas`] through an
//! [`EditSession`], the same way an editor front end drives the history:
//! every edit that changes the canvas is recorded, undo/redo replace the live
//! canvas with the restored snapshot.
//!
//! Shapes are addressed by the order they were added in the script (`0` is
//! the first `add_shape` step).

use crate::canvas::{Canvas, ShapeKind};
use crate::error::Result;
use crate::session::EditSession;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddShape {
        kind: ShapeKind,
        x: f32,
        y: f32,
        #[serde(default)]
        label: Option<String>,
    },
    Move {
        shape: usize,
        dx: f32,
        dy: f32,
    },
    Label {
        shape: usize,
        text: String,
    },
    Remove {
        shape: usize,
    },
    Connect {
        from: usize,
        to: usize,
        #[serde(default)]
        label: Option<String>,
    },
    Undo,
    Redo,
    Clear,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub steps: Vec<Step>,
}

/// What happened while replaying a script.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    pub canvas: Canvas,
    pub recorded: usize,
    pub undone: usize,
    pub redone: usize,
    /// Undo/redo steps that hit a boundary.
    pub no_ops: usize,
    /// Edits that referenced a shape not on the canvas.
    pub skipped: usize,
    /// Edits that failed to encode, and undo/redo steps whose snapshot failed
    /// to decode. Neither changes the history.
    pub failed: usize,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn run(&self, session: &mut EditSession<Canvas>, initial: Canvas) -> Result<ReplayOutcome> {
        let mut outcome = ReplayOutcome {
            canvas: initial,
            ..Default::default()
        };
        let mut added: Vec<Uuid> = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("step {}: {:?}", index, step);
            let canvas = &mut outcome.canvas;

            let changed = match step {
                Step::AddShape { kind, x, y, label } => {
                    let id = canvas.add_shape(kind.clone(), (*x, *y));
                    if let Some(label) = label {
                        canvas.set_label(id, label.clone());
                    }
                    added.push(id);
                    true
                }
                Step::Move { shape, dx, dy } => canvas.move_shape(resolve(&added, *shape), *dx, *dy),
                Step::Label { shape, text } => canvas.set_label(resolve(&added, *shape), text.clone()),
                Step::Remove { shape } => canvas.remove_shape(resolve(&added, *shape)),
                Step::Connect { from, to, label } => {
                    canvas.connect(resolve(&added, *from), resolve(&added, *to), label.clone())
                }
                Step::Undo => {
                    match session.undo() {
                        Ok(Some(restored)) => {
                            *canvas = restored;
                            outcome.undone += 1;
                        }
                        Ok(None) => outcome.no_ops += 1,
                        Err(e) => {
                            log::warn!("step {}: undo failed, continuing: {}", index, e);
                            outcome.failed += 1;
                        }
                    }
                    continue;
                }
                Step::Redo => {
                    match session.redo() {
                        Ok(Some(restored)) => {
                            *canvas = restored;
                            outcome.redone += 1;
                        }
                        Ok(None) => outcome.no_ops += 1,
                        Err(e) => {
                            log::warn!("step {}: redo failed, continuing: {}", index, e);
                            outcome.failed += 1;
                        }
                    }
                    continue;
                }
                Step::Clear => {
                    session.clear();
                    continue;
                }
            };

            if !changed {
                log::warn!("step {} referenced a missing shape, skipped", index);
                outcome.skipped += 1;
            } else if let Err(e) = session.record(&outcome.canvas) {
                log::warn!("step {}: edit not recorded: {}", index, e);
                outcome.failed += 1;
            } else {
                outcome.recorded += 1;
            }
        }

        Ok(outcome)
    }
}

// Unknown indices map to the nil id, which no shape ever has.
fn resolve(added: &[Uuid], shape: usize) -> Uuid {
    added.get(shape).copied().unwrap_or_else(Uuid::nil)
}
