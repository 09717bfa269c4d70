use crate::debug::fps::Counter;
use crate::debug::logging::LoggingError;
use crate::frame::shader::ShaderError;
use crate::frame::shape::MeshError;
use crate::frame::system::FrameSystem;
use crate::frame::FrameError;
use crate::scene::input::{Flow, InputState};
use crate::scene::Scene;
use crate::settings::{Settings, SettingsError, TITLE};
use glium::backend::glutin::SimpleWindowBuilder;
use glium::glutin::surface::WindowSurface;
use glium::Display;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

/// Pixels of touchpad scrolling that count as one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Debug)]
pub enum StartupError {
    Settings(SettingsError),
    Logging(LoggingError),
    EventLoop(EventLoopError),
    Window(String),
    Shader(ShaderError),
    Mesh(MeshError),
}

impl From<SettingsError> for StartupError {
    fn from(err: SettingsError) -> Self {
        StartupError::Settings(err)
    }
}

impl From<LoggingError> for StartupError {
    fn from(err: LoggingError) -> Self {
        StartupError::Logging(err)
    }
}

impl From<EventLoopError> for StartupError {
    fn from(err: EventLoopError) -> Self {
        StartupError::EventLoop(err)
    }
}

impl From<ShaderError> for StartupError {
    fn from(err: ShaderError) -> Self {
        StartupError::Shader(err)
    }
}

impl From<MeshError> for StartupError {
    fn from(err: MeshError) -> Self {
        StartupError::Mesh(err)
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Settings(err) => write!(f, "{}", err),
            StartupError::Logging(err) => write!(f, "{}", err),
            StartupError::EventLoop(err) => write!(f, "event loop: {}", err),
            StartupError::Window(msg) => write!(f, "Failed to create window: {}", msg),
            StartupError::Shader(err) => write!(f, "{}", err),
            StartupError::Mesh(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StartupError {}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_owned(),
            Err(_) => "unknown error".to_owned(),
        },
    }
}

pub struct State {
    window: Window,
    display: Display<WindowSurface>,
    frame_system: FrameSystem,
    scene: Scene,
    input: InputState,
    counter: Counter,
    last_frame: Instant,
}

impl State {
    fn open_window(
        event_loop: &EventLoop<()>,
        settings: &Settings,
    ) -> Result<(Window, Display<WindowSurface>), StartupError> {
        // glutin reports context creation failures by panicking.
        panic::catch_unwind(AssertUnwindSafe(|| {
            SimpleWindowBuilder::new()
                .with_title(TITLE)
                .with_inner_size(settings.width, settings.height)
                .build(event_loop)
        }))
        .map_err(|payload| StartupError::Window(panic_message(payload)))
    }

    /// Opens the window, loads every asset and runs until the window closes or Escape is
    /// pressed.
    pub fn run_loop(settings: &Settings, scene: Scene) -> Result<(), StartupError> {
        let event_loop = EventLoopBuilder::new().build()?;
        let (window, display) = Self::open_window(&event_loop, settings)?;
        log::info!("Opened {}x{} window", settings.width, settings.height);

        let frame_system = FrameSystem::new(&display, &settings.assets)?;

        let mut state = State {
            window,
            display,
            frame_system,
            scene,
            input: InputState::new(),
            counter: Counter::new(10),
            last_frame: Instant::now(),
        };
        let size = state.window.inner_size();
        state.resize(size);

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => {
                    if state.handle_window_event(event) == Flow::Exit {
                        log::info!("Exit requested");
                        window_target.exit();
                    }
                }
                Event::AboutToWait => state.window.request_redraw(),
                _ => (),
            }
        })?;
        Ok(())
    }

    fn handle_window_event(&mut self, event: WindowEvent) -> Flow {
        match event {
            WindowEvent::CloseRequested => return Flow::Exit,
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                return self.input.key_event(&mut self.scene, code, pressed, repeat);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .cursor_moved(&mut self.scene, position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y_offset = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.input.scrolled(&mut self.scene, y_offset);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
        Flow::Continue
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        log::trace!("resize to {}x{}", size.width, size.height);
        self.display.resize((size.width, size.height));
        self.scene.update_ar(size.width, size.height);
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.input.apply_held(&mut self.scene, delta_time);
        self.scene.sync_flashlight();

        let mut target = self.display.draw();
        let drawn = self.frame_system.render(&mut target, &self.scene);
        let finished = target.finish().map_err(FrameError::from);
        if let Err(err) = drawn.and(finished) {
            log::error!("{}", err);
        }

        if let Some(fps) = self.counter.tick() {
            log::debug!("FPS: {:.1}", fps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_messages() {
        let owned = panic::catch_unwind(|| panic!("no {} context", "GL")).unwrap_err();
        let fixed = panic::catch_unwind(|| panic!("no display")).unwrap_err();

        assert_eq!(panic_message(owned), "no GL context");
        assert_eq!(panic_message(fixed), "no display");
    }

    #[test]
    fn window_error_names_the_failure() {
        let err = StartupError::Window("no display".to_owned());

        assert_eq!(format!("{}", err), "Failed to create window: no display");
    }
}
