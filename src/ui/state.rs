use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::catalog::ImageCatalog;
use crate::error::ViewerError;
use crate::loader::{decode_image, encode_image, rotate, scale_to, DecodedImage, Rotation};
use crate::ui::input::Action;
use crate::ui::layout::{layout, Layout};
use crate::ui::render::{
    text_height, text_width, Canvas, BACKDROP_COLOR, BG_COLOR, TEXT_COLOR,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const APP_NAME: &str = "ibadger";

pub const ZOOM_MIN: f32 = 0.8;
pub const ZOOM_MAX: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.05;
const ZOOM_RESET: f32 = 1.0;

/// A resize counts as finished once no further resize arrived for this long.
pub const RESIZE_SETTLE: Duration = Duration::from_millis(50);

/// Decode attempts per `show_current` before giving up on showing anything.
const MAX_LOAD_ATTEMPTS: usize = 3;

const TEXT_ORIGIN: (i32, i32) = (20, 20);
const TEXT_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Window requests and scene
// ---------------------------------------------------------------------------

/// Side effects on the window, queued by the view state and applied by the
/// event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowRequest {
    Redraw,
    Title(String),
    Fullscreen(bool),
    InnerSize(u32, u32),
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub centered: bool,
}

/// Everything the next frame draws.
#[derive(Default)]
pub struct Scene {
    /// Working image already scaled to its draw size, with its placement.
    pub image: Option<(RgbaImage, Layout)>,
    /// Only populated in fullscreen; windowed mode uses the title bar.
    pub overlay: Option<Overlay>,
}

struct WorkingImage {
    path: PathBuf,
    image: DecodedImage,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

pub struct ViewState {
    catalog: ImageCatalog,
    working: Option<WorkingImage>,
    /// Rotated since the last load or save.
    dirty: bool,
    zoom: f32,
    fullscreen: bool,
    viewport: (u32, u32),
    /// Viewport to restore when leaving fullscreen.
    windowed_size: (u32, u32),
    display_size: Option<(u32, u32)>,
    resize_deadline: Option<Instant>,
    scene: Scene,
    requests: Vec<WindowRequest>,
    quitting: bool,
}

impl ViewState {
    pub fn new(catalog: ImageCatalog, viewport: (u32, u32)) -> Self {
        let viewport = (viewport.0.max(1), viewport.1.max(1));
        Self {
            catalog,
            working: None,
            dirty: false,
            zoom: ZOOM_RESET,
            fullscreen: false,
            viewport,
            windowed_size: viewport,
            display_size: None,
            resize_deadline: None,
            scene: Scene::default(),
            requests: Vec::new(),
            quitting: false,
        }
    }

    pub fn apply(&mut self, action: Action) {
        log::debug!("action {:?}", action);
        match action {
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::Quit => self.quit(),
            Action::Advance(n) => self.advance(n),
            Action::Retreat(n) => self.retreat(n),
            Action::Rotate(rotation) => self.rotate(rotation),
            Action::Save => self.save(),
            Action::DeleteCurrent => self.delete_current(),
            Action::ResetZoom => self.reset_zoom(),
            Action::ZoomBy(delta) => self.zoom_by(delta),
            Action::ViewportResized(w, h) => self.on_viewport_resized(w, h, Instant::now()),
            Action::OpenPath(path) => self.on_path_dropped(&path),
        }
    }

    /// Drain the window side effects queued since the last call.
    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    // ------------------------------------------------------------------
    // Showing
    // ------------------------------------------------------------------

    pub fn show_current(&mut self) {
        self.scene = Scene::default();

        if self.catalog.is_empty() {
            self.working = None;
            self.publish_text("no image found".to_string(), true);
            return;
        }

        if self.ensure_loaded() {
            if let Some(ref working) = self.working {
                let (vw, vh) = self.viewport;
                let img = &working.image;
                let placed = layout(img.width(), img.height(), vw, vh, self.zoom);
                let scaled = scale_to(
                    &img.pixels,
                    placed.draw_w.round() as u32,
                    placed.draw_h.round() as u32,
                );
                self.scene.image = Some((scaled, placed));
            }
        }

        let text = match self.catalog.location_label() {
            (_, 0) => "no image found".to_string(),
            (pos, total) => {
                let name = self
                    .working
                    .as_ref()
                    .and_then(|w| w.path.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{}/{} | {}", pos, total, name)
            }
        };
        let centered = self.scene.image.is_none();
        self.publish_text(text, centered);
    }

    /// Make `working` hold the catalog's current image. Files that fail to
    /// decode are dropped from the catalog and the next current one is tried,
    /// at most `MAX_LOAD_ATTEMPTS` times.
    fn ensure_loaded(&mut self) -> bool {
        for _ in 0..MAX_LOAD_ATTEMPTS {
            let Some(path) = self.catalog.current() else {
                break;
            };
            if self.working.as_ref().is_some_and(|w| w.path == path) {
                return true;
            }
            log::debug!("load {}", path.display());
            match decode_image(&path) {
                Ok(image) => {
                    self.working = Some(WorkingImage { path, image });
                    self.dirty = false;
                    return true;
                }
                Err(e) => {
                    self.catalog.remove(&path);
                    log::warn!("{}, dropped ({} left)", e, self.catalog.len());
                }
            }
        }
        self.working = None;
        false
    }

    /// Overlay text in fullscreen, title bar always.
    fn publish_text(&mut self, text: String, centered: bool) {
        self.requests
            .push(WindowRequest::Title(format!("{} - {}", text, APP_NAME)));
        self.scene.overlay = if self.fullscreen {
            Some(Overlay { text, centered })
        } else {
            None
        };
        self.requests.push(WindowRequest::Redraw);
    }

    /// Transient message over the current frame, replaced by the next show.
    fn show_status(&mut self, text: String) {
        self.publish_text(text, false);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn advance(&mut self, n: usize) {
        self.catalog.exit_single_file_mode();
        self.catalog.next(n);
        self.reload();
    }

    pub fn retreat(&mut self, n: usize) {
        self.catalog.exit_single_file_mode();
        self.catalog.prev(n);
        self.reload();
    }

    fn reload(&mut self) {
        self.dirty = false;
        self.working = None;
        self.show_current();
    }

    pub fn on_path_dropped(&mut self, path: &Path) {
        log::info!("opening {}", path.display());
        self.catalog.set_path(path);
        log::debug!("single file: {}", self.catalog.is_single_file());
        self.reload();
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    pub fn zoom_by(&mut self, delta: f32) {
        let zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        log::debug!("zoom level {:.2}", self.zoom);
        self.show_current();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZOOM_RESET;
        log::debug!("zoom level {:.2}", self.zoom);
        self.show_current();
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn rotate(&mut self, rotation: Rotation) {
        let Some(ref mut working) = self.working else {
            return;
        };
        rotate(&mut working.image, rotation);
        self.dirty = true;
        self.show_current();
    }

    /// Write the rotated image over its file. A failed write keeps `dirty`
    /// so the user can try again.
    pub fn save(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(ref working) = self.working else {
            return;
        };
        let path = working.path.clone();
        match encode_image(&working.image, &path) {
            Ok(()) => {
                self.dirty = false;
                log::info!("saved {}", path.display());
                self.show_status(format!("save ok {}", path.display()));
            }
            Err(e) => {
                log::warn!("{}", e);
                self.show_status(format!("save failed: {}", e));
            }
        }
    }

    /// Delete the current file from disk and the catalog. The entry after
    /// it slides into the cursor slot and is shown next.
    pub fn delete_current(&mut self) {
        self.catalog.exit_single_file_mode();
        let Some(path) = self.catalog.current() else {
            self.reload();
            return;
        };

        if path.exists() {
            if let Err(source) = fs::remove_file(&path) {
                let err = ViewerError::Io { path, source };
                log::warn!("delete failed: {}", err);
                self.show_status(format!("delete failed: {}", err));
                return;
            }
            log::info!("deleted {}", path.display());
        } else {
            log::warn!("{} is already gone", path.display());
        }
        self.catalog.remove(&path);
        self.reload();
    }

    // ------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------

    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_size = Some((width.max(1), height.max(1)));
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.resize_deadline = None;
        if self.fullscreen {
            self.viewport = self.display_size.unwrap_or(self.viewport);
        } else {
            self.viewport = self.windowed_size;
            let (w, h) = self.windowed_size;
            self.requests.push(WindowRequest::InnerSize(w, h));
        }
        self.requests.push(WindowRequest::Fullscreen(self.fullscreen));
        self.show_current();
    }

    /// Record a windowed resize and arm the settle deadline; the redraw is
    /// left to `settle_resize_if_due`.
    pub fn on_viewport_resized(&mut self, width: u32, height: u32, now: Instant) {
        if self.fullscreen {
            return;
        }
        self.viewport = (width.max(1), height.max(1));
        self.windowed_size = self.viewport;
        self.resize_deadline = Some(now + RESIZE_SETTLE);
    }

    /// Polled every tick. Returns true when a settled resize was redrawn.
    pub fn settle_resize_if_due(&mut self, now: Instant) -> bool {
        match self.resize_deadline {
            Some(deadline) if now >= deadline => {
                self.resize_deadline = None;
                self.show_current();
                true
            }
            _ => false,
        }
    }

    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize_deadline
    }

    pub fn quit(&mut self) {
        self.quitting = true;
        self.working = None;
        self.scene = Scene::default();
        self.requests.push(WindowRequest::Exit);
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the scene into the softbuffer framebuffer (0x00RRGGBB).
    pub fn render(&self, frame: &mut [u32], fb_w: u32, fb_h: u32) {
        let mut canvas = Canvas {
            buf: frame,
            width: fb_w,
            height: fb_h,
        };
        canvas.clear(BG_COLOR);

        if let Some((ref pixels, placed)) = self.scene.image {
            canvas.blit(
                pixels,
                placed.origin_x.round() as i32,
                placed.origin_y.round() as i32,
            );
        }

        if let Some(ref overlay) = self.scene.overlay {
            let width = text_width(&overlay.text, TEXT_SCALE);
            let (x, y) = if overlay.centered {
                ((fb_w as i32 - width) / 2, fb_h as i32 / 2)
            } else {
                TEXT_ORIGIN
            };
            let pad = 6;
            canvas.fill_rect(
                x - pad,
                y - pad,
                (width + pad * 2).max(0) as u32,
                (text_height(TEXT_SCALE) + pad * 2) as u32,
                BACKDROP_COLOR,
            );
            canvas.draw_text(&overlay.text, x, y, TEXT_SCALE, TEXT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::TempDir;

    fn pattern(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 251) as u8, (y % 251) as u8, 90, 255]))
    }

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        pattern(w, h).save(&path).unwrap();
        path
    }

    fn write_jpg(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(8, 8, Rgb([10, 20, 30])).save(&path).unwrap();
        path
    }

    /// Valid PNG signature followed by garbage: passes the sniff, fails decode.
    fn write_broken(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\x0dIHDR").unwrap();
        path
    }

    fn open(path: &Path) -> ViewState {
        let mut state = ViewState::new(ImageCatalog::new(path), (800, 600));
        state.show_current();
        state
    }

    fn base_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    fn working_name(state: &ViewState) -> Option<String> {
        state.working.as_ref().map(|w| base_name(&w.path))
    }

    fn last_title(state: &mut ViewState) -> Option<String> {
        state
            .take_requests()
            .into_iter()
            .filter_map(|r| match r {
                WindowRequest::Title(t) => Some(t),
                _ => None,
            })
            .last()
    }

    fn two_image_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_jpg(dir.path(), "a.jpg");
        write_png(dir.path(), "b.png", 4, 3);
        dir
    }

    #[test]
    fn first_show_loads_current_image() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        assert_eq!(working_name(&state).as_deref(), Some("a.jpg"));
        assert!(state.scene.image.is_some());
        assert_eq!(last_title(&mut state).unwrap(), "1/2 | a.jpg - ibadger");
    }

    #[test]
    fn advance_moves_to_next_and_labels_position() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.take_requests();

        state.advance(1);
        assert_eq!(working_name(&state).as_deref(), Some("b.png"));
        assert_eq!(state.catalog.location_label(), (2, 2));
        assert_eq!(last_title(&mut state).unwrap(), "2/2 | b.png - ibadger");
    }

    #[test]
    fn retreat_from_first_wraps_to_last() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.retreat(1);
        assert_eq!(working_name(&state).as_deref(), Some("b.png"));
    }

    #[test]
    fn empty_directory_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = open(dir.path());
        assert!(state.scene.image.is_none());
        assert_eq!(state.catalog.location_label(), (0, 0));
        assert_eq!(last_title(&mut state).unwrap(), "no image found - ibadger");

        state.toggle_fullscreen();
        let overlay = state.scene.overlay.clone().unwrap();
        assert_eq!(overlay.text, "no image found");
        assert!(overlay.centered);
    }

    #[test]
    fn undecodable_file_is_dropped_and_another_shown() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 2, 2);
        write_png(dir.path(), "b.png", 2, 2);
        write_broken(dir.path(), "c.png");

        let mut state = open(dir.path());
        assert_eq!(state.catalog.len(), 3);

        state.advance(2);
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(state.catalog.remove(&dir.path().join("c.png")), None);
        let shown = working_name(&state).unwrap();
        assert!(shown == "a.png" || shown == "b.png");
        assert!(state.scene.image.is_some());
    }

    #[test]
    fn load_gives_up_after_three_failures() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            write_broken(dir.path(), name);
        }

        let state = open(dir.path());
        assert_eq!(state.catalog.len(), 1, "exactly three attempts were made");
        assert!(state.working.is_none());
        assert!(state.scene.image.is_none());
    }

    #[test]
    fn zoom_stops_at_bounds() {
        let dir = two_image_dir();
        let mut state = open(dir.path());

        for _ in 0..40 {
            state.zoom_by(ZOOM_STEP);
        }
        assert_eq!(state.zoom, ZOOM_MAX);
        state.take_requests();
        state.zoom_by(ZOOM_STEP);
        assert_eq!(state.zoom, ZOOM_MAX);
        assert!(state.take_requests().is_empty(), "no redraw at the bound");

        for _ in 0..40 {
            state.zoom_by(-ZOOM_STEP);
        }
        assert_eq!(state.zoom, ZOOM_MIN);
        state.take_requests();
        state.zoom_by(-ZOOM_STEP);
        assert_eq!(state.zoom, ZOOM_MIN);
        assert!(state.take_requests().is_empty());

        state.reset_zoom();
        assert_eq!(state.zoom, 1.0);
    }

    #[test]
    fn zoom_scales_the_drawn_image() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "wide.png", 1600, 300);
        let mut state = open(dir.path());

        let (_, placed) = state.scene.image.as_ref().unwrap();
        assert_eq!((placed.draw_w, placed.draw_h), (800.0, 150.0));

        state.zoom_by(ZOOM_STEP);
        let (pixels, placed) = state.scene.image.as_ref().unwrap();
        assert_eq!(placed.draw_w.round() as u32, pixels.width());
        assert!(placed.origin_x < 0.0);
    }

    #[test]
    fn four_right_rotations_restore_pixels() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 5, 3);
        let mut state = open(dir.path());
        let before = state.working.as_ref().unwrap().image.pixels.clone();

        state.rotate(Rotation::Right);
        assert!(state.dirty);
        assert_eq!(state.working.as_ref().unwrap().image.width(), 3);
        for _ in 0..3 {
            state.rotate(Rotation::Right);
        }
        assert_eq!(state.working.as_ref().unwrap().image.pixels, before);
    }

    #[test]
    fn navigation_discards_unsaved_rotation() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.advance(1);
        state.rotate(Rotation::Left);
        assert!(state.dirty);
        assert_eq!(state.working.as_ref().unwrap().image.width(), 3);

        state.advance(1);
        assert!(!state.dirty);
        state.advance(1);
        assert_eq!(working_name(&state).as_deref(), Some("b.png"));
        assert_eq!(state.working.as_ref().unwrap().image.width(), 4);
    }

    #[test]
    fn save_when_clean_writes_nothing() {
        let dir = two_image_dir();
        let path = dir.path().join("a.jpg");
        let before = fs::read(&path).unwrap();
        let mut state = open(dir.path());
        state.take_requests();

        state.save();
        assert!(state.take_requests().is_empty());
        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(state.catalog.location_label(), (1, 2));
    }

    #[test]
    fn save_writes_rotation_and_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 5, 3);
        let mut state = open(dir.path());

        state.rotate(Rotation::Right);
        state.take_requests();
        state.save();
        assert!(!state.dirty);
        let title = last_title(&mut state).unwrap();
        assert!(title.starts_with("save ok "), "{title}");

        let on_disk = decode_image(&path).unwrap();
        assert_eq!((on_disk.width(), on_disk.height()), (3, 5));
    }

    #[test]
    fn failed_save_keeps_dirty_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 5, 3);
        let mut state = open(dir.path());
        state.rotate(Rotation::Right);

        // the target turns into a directory, so the write cannot succeed
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        state.take_requests();
        state.save();

        assert!(state.dirty);
        let title = last_title(&mut state).unwrap();
        assert!(title.starts_with("save failed"), "{title}");
    }

    #[test]
    fn delete_removes_file_and_shows_successor() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_png(dir.path(), name, 2, 2);
        }
        let mut state = open(dir.path());
        state.advance(1);

        state.delete_current();
        assert!(!dir.path().join("b.png").exists());
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(working_name(&state).as_deref(), Some("c.png"));
        assert_eq!(state.catalog.location_label(), (2, 2));
    }

    #[test]
    fn delete_of_file_already_gone_still_drops_entry() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_png(dir.path(), name, 2, 2);
        }
        let mut state = open(dir.path());
        state.advance(1);
        fs::remove_file(dir.path().join("b.png")).unwrap();
        state.take_requests();

        state.delete_current();
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(working_name(&state).as_deref(), Some("c.png"));
        assert_eq!(last_title(&mut state).unwrap(), "2/2 | c.png - ibadger");
    }

    #[test]
    fn delete_last_wraps_to_first() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.advance(1);
        state.delete_current();
        assert_eq!(working_name(&state).as_deref(), Some("a.jpg"));
        assert_eq!(state.catalog.location_label(), (1, 1));
    }

    #[test]
    fn delete_in_single_file_mode_opens_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_png(dir.path(), name, 2, 2);
        }
        let mut state = open(&dir.path().join("b.png"));
        assert!(state.catalog.is_single_file());

        state.delete_current();
        assert!(!state.catalog.is_single_file());
        assert!(!dir.path().join("b.png").exists());
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(working_name(&state).as_deref(), Some("c.png"));
    }

    #[test]
    fn advancing_leaves_single_file_mode() {
        let dir = two_image_dir();
        let mut state = open(&dir.path().join("a.jpg"));
        assert_eq!(state.catalog.len(), 1);

        state.advance(1);
        assert!(!state.catalog.is_single_file());
        assert_eq!(working_name(&state).as_deref(), Some("b.png"));
    }

    #[test]
    fn fullscreen_round_trip_restores_windowed_viewport() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.set_display_size(1920, 1080);
        state.take_requests();

        state.toggle_fullscreen();
        assert!(state.fullscreen);
        assert_eq!(state.viewport, (1920, 1080));
        assert!(state.scene.overlay.is_some());
        assert!(state.take_requests().contains(&WindowRequest::Fullscreen(true)));

        state.toggle_fullscreen();
        assert_eq!(state.viewport, (800, 600));
        assert!(state.scene.overlay.is_none());
        let requests = state.take_requests();
        assert!(requests.contains(&WindowRequest::Fullscreen(false)));
        assert!(requests.contains(&WindowRequest::InnerSize(800, 600)));
    }

    #[test]
    fn resize_redraws_only_after_settling() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.take_requests();

        let t0 = Instant::now();
        state.on_viewport_resized(1000, 700, t0);
        state.on_viewport_resized(1024, 768, t0 + Duration::from_millis(20));
        assert_eq!(state.viewport, (1024, 768));
        assert!(state.take_requests().is_empty());

        assert!(!state.settle_resize_if_due(t0 + Duration::from_millis(60)));
        assert!(state.settle_resize_if_due(t0 + Duration::from_millis(70)));
        assert!(state.resize_deadline().is_none());
        assert!(state.take_requests().contains(&WindowRequest::Redraw));
        assert!(!state.settle_resize_if_due(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn resize_is_ignored_in_fullscreen() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.set_display_size(1920, 1080);
        state.toggle_fullscreen();

        state.on_viewport_resized(640, 480, Instant::now());
        assert_eq!(state.viewport, (1920, 1080));
        assert!(state.resize_deadline().is_none());
    }

    #[test]
    fn dropped_path_replaces_catalog() {
        let first = two_image_dir();
        let second = tempfile::tempdir().unwrap();
        write_png(second.path(), "z.png", 2, 2);

        let mut state = open(first.path());
        state.rotate(Rotation::Right);
        state.on_path_dropped(second.path());
        assert!(!state.dirty);
        assert_eq!(state.catalog.len(), 1);
        assert_eq!(working_name(&state).as_deref(), Some("z.png"));
    }

    #[test]
    fn actions_dispatch_to_operations() {
        let dir = two_image_dir();
        let mut state = open(dir.path());
        state.apply(Action::Advance(1));
        assert_eq!(working_name(&state).as_deref(), Some("b.png"));
        state.apply(Action::ZoomBy(ZOOM_STEP));
        assert!(state.zoom > 1.0);
        state.apply(Action::ResetZoom);
        assert_eq!(state.zoom, 1.0);
        state.apply(Action::Quit);
        assert!(state.is_quitting());
        assert!(state.take_requests().contains(&WindowRequest::Exit));
    }

    #[test]
    fn render_centers_image_on_background() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 4, 4);
        let state = open(dir.path());

        let (w, h) = (800u32, 600u32);
        let mut frame = vec![0u32; (w * h) as usize];
        state.render(&mut frame, w, h);

        let bg = crate::ui::render::rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]);
        assert_eq!(frame[0], bg);
        // 4x4 image centered at (398, 298)
        assert_ne!(frame[(300 * w + 400) as usize], bg);
    }
}
