use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{config::Conf, math::Vec2i, Result};

/// Settings specifying how to open a window, see [open_with_settings].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings<'a> {
    /// Title/name of the window
    pub name: &'a str,
    /// Size, in pixels
    pub size: Option<Vec2i>,
    /// Whether the window is resizable or not
    pub resizable: bool,
    /// Position, in pixels
    pub pos: Option<Vec2i>,
}

impl<'a> From<&'a Conf> for WindowSettings<'a> {
    fn from(conf: &'a Conf) -> Self {
        Self {
            name: &conf.window_title,
            size: Some(conf.screen_size),
            resizable: false,
            pos: conf.window_position,
        }
    }
}

/// Open a window with the specified window settings
pub fn open_with_settings(
    event_loop: &ActiveEventLoop,
    settings: &WindowSettings,
) -> Result<Arc<Window>> {
    let mut attribs = Window::default_attributes()
        .with_title(settings.name)
        .with_resizable(settings.resizable);
    if let Some(size) = settings.size {
        attribs = attribs.with_inner_size(PhysicalSize::new(
            size.x().max(1) as u32,
            size.y().max(1) as u32,
        ));
    }
    if let Some(pos) = settings.pos {
        attribs = attribs.with_position(PhysicalPosition::new(pos.x(), pos.y()));
    }
    let window = event_loop.create_window(attribs)?;
    log::info!("Opened window {:?} \"{}\"", window.id(), settings.name);
    Ok(Arc::new(window))
}

/// Drives a single window: opens it, hands it to `setup` once, then keeps whatever
/// `setup` built alive until the display time is up.
struct AppHandler<'a, T, F> {
    // Declared before `window` so it is dropped first.
    state: Option<T>,
    window: Option<Arc<Window>>,
    settings: WindowSettings<'a>,
    display_time: Duration,
    setup: Option<F>,
    deadline: Option<Instant>,
    result: Result<()>,
}

impl<T, F: FnOnce(Arc<Window>) -> Result<T>> AppHandler<'_, T, F> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: crate::Error) {
        self.result = Err(err);
        event_loop.exit();
    }
}

impl<T, F: FnOnce(Arc<Window>) -> Result<T>> ApplicationHandler for AppHandler<'_, T, F> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only the first resume builds anything
        let Some(setup) = self.setup.take() else {
            return;
        };
        let window = match open_with_settings(event_loop, &self.settings) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err),
        };
        self.window = Some(window.clone());
        match setup(window) {
            Ok(state) => {
                self.state = Some(state);
                let deadline = Instant::now() + self.display_time;
                self.deadline = Some(deadline);
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
                log::info!("Showing frame for {:?}", self.display_time);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            event_loop.exit();
        }
    }

    // There is no input handling, the window only goes away once the time is up.
    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, ev: WindowEvent) {
        log::trace!("Ignoring {ev:?}");
    }
}

/// Open one window and run `setup` against it, then wait out `display_time` before
/// tearing everything down again.
///
/// Anything `setup` returns is dropped before the window, the window before the event
/// loop.
pub fn run<T>(
    settings: WindowSettings,
    display_time: Duration,
    setup: impl FnOnce(Arc<Window>) -> Result<T>,
) -> Result<()> {
    let event_loop = EventLoop::new().map_err(crate::Error::SubsystemInit)?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = AppHandler {
        state: None,
        window: None,
        settings,
        display_time,
        setup: Some(setup),
        deadline: None,
        result: Ok(()),
    };
    event_loop.run_app(&mut app).map_err(crate::Error::EventLoop)?;
    let AppHandler {
        state,
        window,
        result,
        ..
    } = app;
    drop(state);
    drop(window);
    log::info!("Window closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_conf() {
        let conf = Conf::default();
        let settings = WindowSettings::from(&conf);
        assert_eq!(settings.name, "Hello World!");
        assert_eq!(settings.size, Some(Vec2i::new(640, 480)));
        assert_eq!(settings.pos, Some(Vec2i::new(100, 100)));
        assert!(!settings.resizable);
    }
}
