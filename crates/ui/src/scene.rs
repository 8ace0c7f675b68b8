//! Scene trait, scene identifiers and the scene registry.
//!
//! Applications implement [`Scene`] once per view and register the boxed
//! scenes with the [`UiManager`](crate::UiManager). Scenes never hold the
//! shared application state; the manager lends it to them for the duration
//! of a single call.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, UiError};
use crate::input::Key;
use crate::widgets::Menu;
use crate::window::ConsoleWindow;

/// Key under which a scene is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneId(Cow<'static, str>);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Compile-time id, usable in `static` items.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the manager should do after a scene handled an event.
pub enum SceneCommand<S> {
    /// Stay on the current scene.
    None,
    /// Switch to an already registered scene.
    SwitchTo(SceneId),
    /// Register (or replace) the given scene and switch to it.
    Open(Box<dyn Scene<S>>),
    /// End the event loop.
    Quit,
}

impl<S> fmt::Debug for SceneCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::SwitchTo(id) => f.debug_tuple("SwitchTo").field(id).finish(),
            Self::Open(scene) => f.debug_tuple("Open").field(scene.id()).finish(),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// One interactive view.
///
/// Any state mutation must leave [`Scene::needs_redraw`] returning true; the
/// manager calls [`Scene::clear_redraw`] only after the repaint was flushed.
pub trait Scene<S> {
    fn id(&self) -> &SceneId;

    fn handle_input(&mut self, key: Key, state: &mut S) -> SceneCommand<S>;

    /// Called once per loop iteration after input handling.
    fn update(&mut self, _state: &mut S) -> SceneCommand<S> {
        SceneCommand::None
    }

    /// Repaints the whole scene into `window`.
    fn render(&mut self, window: &mut ConsoleWindow, state: &S);

    fn needs_redraw(&self) -> bool;

    fn request_redraw(&mut self);

    fn clear_redraw(&mut self);

    /// Primary menu of the scene, if it has one.
    fn menu(&self) -> Option<&Menu> {
        None
    }

    /// Called when the scene becomes current.
    fn on_enter(&mut self, _state: &mut S) {}

    /// Called when another scene replaces this one as current.
    fn on_exit(&mut self, _state: &mut S) {}
}

/// Dirty flag most scenes embed. Starts dirty so the first frame is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawFlag(bool);

impl RedrawFlag {
    pub fn new() -> Self {
        Self(true)
    }

    pub fn get(self) -> bool {
        self.0
    }

    pub fn set(&mut self) {
        self.0 = true;
    }

    pub fn clear(&mut self) {
        self.0 = false;
    }

    /// Sets the flag when `changed` is true and passes `changed` through.
    pub fn mark_if(&mut self, changed: bool) -> bool {
        if changed {
            self.0 = true;
        }
        changed
    }
}

impl Default for RedrawFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenes keyed by id, in registration order.
pub struct SceneRegistry<S> {
    scenes: HashMap<SceneId, Box<dyn Scene<S>>>,
    order: Vec<SceneId>,
}

impl<S> SceneRegistry<S> {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Adds a scene. Ids must be unique.
    pub fn register(&mut self, scene: Box<dyn Scene<S>>) -> Result<()> {
        let id = scene.id().clone();
        if self.scenes.contains_key(&id) {
            return Err(UiError::DuplicateScene(id));
        }
        self.order.push(id.clone());
        self.scenes.insert(id, scene);
        Ok(())
    }

    /// Adds a scene, replacing any scene registered under the same id.
    pub fn replace(&mut self, scene: Box<dyn Scene<S>>) -> Option<Box<dyn Scene<S>>> {
        let id = scene.id().clone();
        if !self.scenes.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.scenes.insert(id, scene)
    }

    pub fn get(&self, id: &SceneId) -> Option<&dyn Scene<S>> {
        self.scenes.get(id).map(AsRef::as_ref)
    }

    pub fn get_mut(&mut self, id: &SceneId) -> Option<&mut Box<dyn Scene<S>>> {
        self.scenes.get_mut(id)
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    pub fn ids(&self) -> &[SceneId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl<S> Default for SceneRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
