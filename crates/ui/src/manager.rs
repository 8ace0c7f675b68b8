//! Top-level orchestrator: owns the window, the scenes and the shared state.

use ratatui::{Terminal, backend::Backend};

use crate::error::{Result, UiError};
use crate::input::{InputEvent, InputSource, Key};
use crate::scene::{Scene, SceneCommand, SceneId, SceneRegistry};
use crate::widgets::Menu;
use crate::window::ConsoleWindow;

/// Outcome of dispatching one input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The current scene handled the event and stays current.
    Continue,
    /// The current scene changed to the given id.
    Switched(SceneId),
    /// A scene asked for an unregistered id; the current scene was kept.
    Rejected(SceneId),
    /// The loop should end after this cycle's render.
    Quit,
}

/// Drives the input/render loop for a set of scenes sharing state `S`.
pub struct UiManager<S> {
    window: ConsoleWindow,
    scenes: SceneRegistry<S>,
    current: Option<SceneId>,
    state: S,
}

impl<S> UiManager<S> {
    pub fn new(rows: usize, cols: usize, state: S) -> Self {
        Self::with_window(ConsoleWindow::new(rows, cols), state)
    }

    pub fn with_window(window: ConsoleWindow, state: S) -> Self {
        Self {
            window,
            scenes: SceneRegistry::new(),
            current: None,
            state,
        }
    }

    pub fn window(&self) -> &ConsoleWindow {
        &self.window
    }

    /// Mutable window access, for registering art before the loop starts.
    pub fn window_mut(&mut self) -> &mut ConsoleWindow {
        &mut self.window
    }

    pub fn scenes(&self) -> &SceneRegistry<S> {
        &self.scenes
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn register(&mut self, scene: Box<dyn Scene<S>>) -> Result<()> {
        tracing::debug!("Registering scene {}", scene.id());
        self.scenes.register(scene)
    }

    pub fn scene(&self, id: &SceneId) -> Option<&dyn Scene<S>> {
        self.scenes.get(id)
    }

    pub fn current_scene_id(&self) -> Option<&SceneId> {
        self.current.as_ref()
    }

    pub fn current_scene(&self) -> Option<&dyn Scene<S>> {
        self.current.as_ref().and_then(|id| self.scenes.get(id))
    }

    /// Menu owned by the scene registered under `id`.
    pub fn menu(&self, id: &SceneId) -> Result<&Menu> {
        let scene = self
            .scenes
            .get(id)
            .ok_or_else(|| UiError::SceneNotFound(id.clone()))?;
        scene.menu().ok_or_else(|| UiError::MenuNotFound(id.clone()))
    }

    /// Makes `id` the current scene.
    ///
    /// Unregistered ids fail with [`UiError::SceneNotFound`] and leave the
    /// current scene untouched.
    pub fn set_current_scene(&mut self, id: &SceneId) -> Result<()> {
        if !self.scenes.contains(id) {
            return Err(UiError::SceneNotFound(id.clone()));
        }

        if let Some(previous) = self.current.take()
            && previous != *id
            && let Some(scene) = self.scenes.get_mut(&previous)
        {
            scene.on_exit(&mut self.state);
        }

        if let Some(scene) = self.scenes.get_mut(id) {
            scene.on_enter(&mut self.state);
            scene.request_redraw();
        }
        tracing::debug!("Current scene: {}", id);
        self.current = Some(id.clone());
        Ok(())
    }

    /// Routes one event to the current scene and applies its command.
    pub fn dispatch(&mut self, event: InputEvent) -> Dispatch {
        let key = match event {
            InputEvent::Resize { cols, rows } => {
                self.window.resize(usize::from(rows), usize::from(cols));
                if let Some(scene) = self.current_scene_mut() {
                    scene.request_redraw();
                }
                return Dispatch::Continue;
            }
            InputEvent::Key(Key::Interrupt) => {
                tracing::info!("Interrupted");
                return Dispatch::Quit;
            }
            InputEvent::Key(key) => key,
        };

        let Some(id) = self.current.clone() else {
            return Dispatch::Continue;
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return Dispatch::Continue;
        };

        let command = match scene.handle_input(key, &mut self.state) {
            SceneCommand::None => scene.update(&mut self.state),
            command => command,
        };
        self.apply(command)
    }

    fn apply(&mut self, command: SceneCommand<S>) -> Dispatch {
        match command {
            SceneCommand::None => Dispatch::Continue,
            SceneCommand::Quit => Dispatch::Quit,
            SceneCommand::SwitchTo(id) => match self.set_current_scene(&id) {
                Ok(()) => Dispatch::Switched(id),
                Err(e) => {
                    tracing::warn!("Ignoring transition: {}", e);
                    Dispatch::Rejected(id)
                }
            },
            SceneCommand::Open(scene) => {
                let id = scene.id().clone();
                self.scenes.replace(scene);
                match self.set_current_scene(&id) {
                    Ok(()) => Dispatch::Switched(id),
                    Err(e) => {
                        tracing::warn!("Ignoring transition: {}", e);
                        Dispatch::Rejected(id)
                    }
                }
            }
        }
    }

    /// Repaints the current scene if it is dirty and flushes the window.
    ///
    /// The scene's redraw flag is cleared only after the flush succeeded.
    /// Returns true if a frame was drawn.
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<bool> {
        let Some(id) = self.current.clone() else {
            return Ok(false);
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return Ok(false);
        };

        let dirty = scene.needs_redraw();
        if !dirty && !self.window.is_changed() {
            return Ok(false);
        }
        if dirty {
            scene.render(&mut self.window, &self.state);
        }

        let window = &self.window;
        terminal.draw(|frame| frame.render_widget(window, frame.area()))?;

        self.window.mark_flushed();
        scene.clear_redraw();
        Ok(true)
    }

    /// Runs until a scene quits or `input` is exhausted.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut impl InputSource,
    ) -> Result<()> {
        self.render(terminal)?;

        while let Some(event) = input.next_event()? {
            let outcome = self.dispatch(event);
            self.render(terminal)?;
            if outcome == Dispatch::Quit {
                tracing::info!("Event loop finished");
                break;
            }
        }

        Ok(())
    }

    fn current_scene_mut(&mut self) -> Option<&mut Box<dyn Scene<S>>> {
        let id = self.current.as_ref()?;
        self.scenes.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RedrawFlag;
    use ratatui::backend::TestBackend;

    /// Counts renders; `g` switches to "ghost", `q` quits, anything else dirties.
    struct Probe {
        id: SceneId,
        redraw: RedrawFlag,
        renders: usize,
    }

    impl Probe {
        fn boxed(id: &'static str) -> Box<dyn Scene<Vec<String>>> {
            Box::new(Self {
                id: SceneId::from_static(id),
                redraw: RedrawFlag::new(),
                renders: 0,
            })
        }
    }

    impl Scene<Vec<String>> for Probe {
        fn id(&self) -> &SceneId {
            &self.id
        }

        fn handle_input(&mut self, key: Key, log: &mut Vec<String>) -> SceneCommand<Vec<String>> {
            log.push(format!("{}:{:?}", self.id, key));
            match key {
                Key::Char('g') => SceneCommand::SwitchTo(SceneId::new("ghost")),
                Key::Char('q') => SceneCommand::Quit,
                Key::Char('o') => SceneCommand::SwitchTo(SceneId::new("other")),
                _ => {
                    self.redraw.set();
                    SceneCommand::None
                }
            }
        }

        fn render(&mut self, window: &mut ConsoleWindow, _log: &Vec<String>) {
            self.renders += 1;
            window.clear();
            window.draw_text(0, 0, &format!("{} #{}", self.id, self.renders));
        }

        fn needs_redraw(&self) -> bool {
            self.redraw.get()
        }

        fn request_redraw(&mut self) {
            self.redraw.set();
        }

        fn clear_redraw(&mut self) {
            self.redraw.clear();
        }

        fn on_enter(&mut self, log: &mut Vec<String>) {
            log.push(format!("enter {}", self.id));
        }

        fn on_exit(&mut self, log: &mut Vec<String>) {
            log.push(format!("exit {}", self.id));
        }
    }

    fn manager() -> UiManager<Vec<String>> {
        let mut manager = UiManager::new(4, 20, Vec::new());
        manager.register(Probe::boxed("main")).unwrap();
        manager.register(Probe::boxed("other")).unwrap();
        manager.set_current_scene(&SceneId::new("main")).unwrap();
        manager
    }

    #[test]
    fn unknown_scene_keeps_current() {
        let mut manager = manager();
        let err = manager
            .set_current_scene(&SceneId::new("ghost"))
            .unwrap_err();
        assert!(matches!(err, UiError::SceneNotFound(_)));
        assert_eq!(manager.current_scene_id(), Some(&SceneId::new("main")));

        let outcome = manager.dispatch(Key::Char('g').into());
        assert_eq!(outcome, Dispatch::Rejected(SceneId::new("ghost")));
        assert_eq!(manager.current_scene_id(), Some(&SceneId::new("main")));
    }

    #[test]
    fn switching_runs_lifecycle_hooks() {
        let mut manager = manager();
        assert_eq!(
            manager.dispatch(Key::Char('o').into()),
            Dispatch::Switched(SceneId::new("other"))
        );
        assert_eq!(
            manager.state(),
            &vec!["enter main", "main:Char('o')", "exit main", "enter other"]
        );
    }

    #[test]
    fn duplicate_scene_is_configuration_error() {
        let mut manager = manager();
        let err = manager.register(Probe::boxed("main")).unwrap_err();
        assert!(matches!(err, UiError::DuplicateScene(_)));
    }

    #[test]
    fn menu_lookup_reports_missing_menu() {
        let manager = manager();
        assert!(matches!(
            manager.menu(&SceneId::new("main")),
            Err(UiError::MenuNotFound(_))
        ));
        assert!(matches!(
            manager.menu(&SceneId::new("ghost")),
            Err(UiError::SceneNotFound(_))
        ));
    }

    #[test]
    fn renders_only_when_dirty() {
        let mut manager = manager();
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();

        assert!(manager.render(&mut terminal).unwrap());
        assert!(!manager.current_scene().unwrap().needs_redraw());
        assert!(!manager.render(&mut terminal).unwrap());

        manager.dispatch(Key::Char('x').into());
        assert!(manager.current_scene().unwrap().needs_redraw());
        assert!(manager.render(&mut terminal).unwrap());
        assert_eq!(manager.window().line(0).unwrap().trim_end(), "main #2");

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "m");
        assert_eq!(buffer[(5, 0)].symbol(), "#");
    }

    #[test]
    fn resize_invalidates_current_scene() {
        let mut manager = manager();
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        manager.render(&mut terminal).unwrap();

        let outcome = manager.dispatch(InputEvent::Resize { cols: 30, rows: 6 });
        assert_eq!(outcome, Dispatch::Continue);
        assert_eq!(manager.window().size(), (6, 30));
        assert!(manager.current_scene().unwrap().needs_redraw());
    }

    #[test]
    fn run_stops_on_quit_and_interrupt() {
        use crate::input::ScriptedInput;

        let mut manager = manager();
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        let mut input = ScriptedInput::from_keys([Key::Char('x'), Key::Char('q'), Key::Char('y')]);
        manager.run(&mut terminal, &mut input).unwrap();
        assert_eq!(input.remaining(), 1);

        let mut input = ScriptedInput::from_keys([Key::Interrupt, Key::Char('z')]);
        manager.run(&mut terminal, &mut input).unwrap();
        assert_eq!(input.remaining(), 1);
        assert!(!manager.state().iter().any(|entry| entry.contains("Interrupt")));
    }
}
