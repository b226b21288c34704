use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context as _};
use softbuffer::Surface;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Icon, Window, WindowId};

use crate::loader::{decode_image, UserEvent};
use crate::ui::input::{route, Input, KeySymbol, MouseButton};
use crate::ui::state::{ViewState, WindowRequest, APP_NAME};

pub mod input;
pub mod layout;
pub mod render;
pub mod state;

/// Initial windowed viewport, width x height.
pub const WINDOW_SIZE: (u32, u32) = (600, 800);

/// Poll interval for the resize debounce while one is pending.
const TICK: Duration = Duration::from_millis(16);

const ICON_FILE: &str = "app.png";

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewState,
    pub window: Option<Arc<Window>>,
    pub context: Option<softbuffer::Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    surface_size: (u32, u32),
}

impl App {
    pub fn new(state: ViewState) -> Self {
        Self {
            state,
            window: None,
            context: None,
            surface: None,
            surface_size: (1, 1),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (w, h) = WINDOW_SIZE;
        let attrs = Window::default_attributes()
            .with_title(APP_NAME)
            .with_inner_size(LogicalSize::new(w, h))
            .with_window_icon(load_window_icon());
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);
        let context = softbuffer::Context::new(Arc::clone(&window))
            .map_err(|e| anyhow!("create softbuffer context: {e}"))?;
        let surface = Surface::new(&context, Arc::clone(&window))
            .map_err(|e| anyhow!("create softbuffer surface: {e}"))?;

        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if let Some(ref mut surface) = self.surface {
            match surface.resize(w, h) {
                Ok(()) => self.surface_size = (width, height),
                Err(e) => log::warn!("surface resize failed: {e}"),
            }
        }
    }

    fn dispatch(&mut self, input: Input, event_loop: &ActiveEventLoop) {
        if let Some(action) = route(input) {
            self.state.apply(action);
        }
        self.apply_requests(event_loop);
    }

    fn apply_requests(&mut self, event_loop: &ActiveEventLoop) {
        for request in self.state.take_requests() {
            if request == WindowRequest::Exit {
                self.surface = None;
                self.context = None;
                self.window = None;
                event_loop.exit();
                return;
            }
            let Some(ref window) = self.window else {
                continue;
            };
            match request {
                WindowRequest::Redraw => window.request_redraw(),
                WindowRequest::Title(title) => window.set_title(&title),
                WindowRequest::Fullscreen(on) => {
                    window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
                }
                WindowRequest::InnerSize(w, h) => {
                    let _ = window.request_inner_size(PhysicalSize::new(w, h));
                }
                WindowRequest::Exit => {}
            }
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("{e:#}");
            event_loop.exit();
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(monitor) = window.current_monitor() {
            let size = monitor.size();
            self.state.set_display_size(size.width, size.height);
        }
        let size = window.inner_size();
        self.resize_surface(size.width, size.height);
        self.state
            .on_viewport_resized(size.width, size.height, Instant::now());
        self.state.show_current();
        self.apply_requests(event_loop);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::CatalogScanned(count) => {
                log::debug!("catalog rescanned, {} images", count);
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(Input::CloseRequested, event_loop);
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize_surface(width, height);
                self.dispatch(Input::Resized(width, height), event_loop);
            }

            WindowEvent::DroppedFile(path) => {
                self.dispatch(Input::FileDropped(path), event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                log::debug!("key press {:?}", event.logical_key);
                if let Some(symbol) = key_symbol(&event.logical_key) {
                    self.dispatch(Input::Key(symbol), event_loop);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if state != ElementState::Released {
                    return;
                }
                if let Some(button) = mouse_button(button) {
                    self.dispatch(Input::Click(button), event_loop);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y as f32,
                };
                if y > 0.0 {
                    self.dispatch(Input::WheelUp, event_loop);
                } else if y < 0.0 {
                    self.dispatch(Input::WheelDown, event_loop);
                }
            }

            WindowEvent::RedrawRequested => {
                let (fb_w, fb_h) = self.surface_size;
                if let Some(ref mut surface) = self.surface {
                    match surface.buffer_mut() {
                        Ok(mut buffer) => {
                            self.state.render(&mut buffer, fb_w, fb_h);
                            if let Err(e) = buffer.present() {
                                log::warn!("present failed: {e}");
                            }
                        }
                        Err(e) => log::warn!("no framebuffer: {e}"),
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_quitting() {
            return;
        }
        let now = Instant::now();
        if self.state.settle_resize_if_due(now) {
            self.apply_requests(event_loop);
        }
        if self.state.resize_deadline().is_some() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(now + TICK));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

fn key_symbol(key: &Key) -> Option<KeySymbol> {
    match key {
        Key::Named(NamedKey::Space) => Some(KeySymbol::Space),
        Key::Named(NamedKey::Escape) => Some(KeySymbol::Escape),
        Key::Named(NamedKey::ArrowLeft) => Some(KeySymbol::ArrowLeft),
        Key::Named(NamedKey::ArrowRight) => Some(KeySymbol::ArrowRight),
        Key::Named(NamedKey::PageUp) => Some(KeySymbol::PageUp),
        Key::Named(NamedKey::PageDown) => Some(KeySymbol::PageDown),
        Key::Named(NamedKey::Delete) => Some(KeySymbol::Delete),
        Key::Character(s) => s
            .chars()
            .next()
            .map(|c| KeySymbol::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// `app.png` next to the executable, if there is one.
fn load_window_icon() -> Option<Icon> {
    let exe = std::env::current_exe().ok()?;
    let path = exe.parent()?.join(ICON_FILE);
    if !path.is_file() {
        return None;
    }
    let decoded = match decode_image(&path) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("icon: {e}");
            return None;
        }
    };
    let (w, h) = (decoded.width(), decoded.height());
    Icon::from_rgba(decoded.pixels.into_raw(), w, h)
        .map_err(|e| log::warn!("icon: {e}"))
        .ok()
}
