/// Where and how large to draw the working image inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub draw_w: f32,
    pub draw_h: f32,
    /// Negative when the zoomed image overflows the viewport.
    pub origin_x: f32,
    pub origin_y: f32,
}

/// Two-pass clamp, width first and then height on the result, followed by
/// the zoom multiplier. Not equivalent to a single min-ratio fit when the
/// first pass already satisfies the second.
pub fn fit_and_zoom(src_w: f32, src_h: f32, view_w: f32, view_h: f32, zoom: f32) -> (f32, f32) {
    let (mut w, mut h) = (src_w, src_h);
    if w > view_w {
        h = h * view_w / w;
        w = view_w;
    }
    if h > view_h {
        w = w * view_h / h;
        h = view_h;
    }
    (w * zoom, h * zoom)
}

pub fn layout(src_w: u32, src_h: u32, view_w: u32, view_h: u32, zoom: f32) -> Layout {
    let (vw, vh) = (view_w as f32, view_h as f32);
    let (draw_w, draw_h) = fit_and_zoom(src_w as f32, src_h as f32, vw, vh, zoom);
    Layout {
        draw_w,
        draw_h,
        origin_x: (vw - draw_w) / 2.0,
        origin_y: (vh - draw_h) / 2.0,
    }
}
