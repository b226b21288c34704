use std::path::PathBuf;

use crate::loader::Rotation;
use crate::ui::state::ZOOM_STEP;

/// Keys the viewer reacts to, already decoupled from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySymbol {
    Space,
    Escape,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Delete,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Key(KeySymbol),
    Click(MouseButton),
    WheelUp,
    WheelDown,
    Resized(u32, u32),
    FileDropped(PathBuf),
    CloseRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleFullscreen,
    Quit,
    Advance(usize),
    Retreat(usize),
    Rotate(Rotation),
    Save,
    DeleteCurrent,
    ResetZoom,
    ZoomBy(f32),
    ViewportResized(u32, u32),
    OpenPath(PathBuf),
}

/// Map one input to at most one action. Anything unmapped is `None`.
pub fn route(input: Input) -> Option<Action> {
    let action = match input {
        Input::Key(key) => match key {
            KeySymbol::Space => Action::ToggleFullscreen,
            KeySymbol::Escape | KeySymbol::Char('q') => Action::Quit,
            KeySymbol::ArrowLeft => Action::Retreat(1),
            KeySymbol::ArrowRight => Action::Advance(1),
            KeySymbol::PageUp => Action::Retreat(10),
            KeySymbol::PageDown => Action::Advance(10),
            KeySymbol::Char('r') => Action::Rotate(Rotation::Right),
            KeySymbol::Char('l') => Action::Rotate(Rotation::Left),
            KeySymbol::Char('s') => Action::Save,
            KeySymbol::Delete => Action::DeleteCurrent,
            KeySymbol::Char('0') => Action::ResetZoom,
            KeySymbol::Char(_) => return None,
        },
        Input::Click(MouseButton::Left) => Action::Advance(1),
        Input::Click(MouseButton::Right) => Action::Retreat(1),
        Input::Click(MouseButton::Middle) => Action::ResetZoom,
        Input::WheelUp => Action::ZoomBy(ZOOM_STEP),
        Input::WheelDown => Action::ZoomBy(-ZOOM_STEP),
        Input::Resized(w, h) => Action::ViewportResized(w, h),
        Input::FileDropped(path) => Action::OpenPath(path),
        Input::CloseRequested => Action::Quit,
    };
    Some(action)
}
