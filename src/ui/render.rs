use image::RgbaImage;

pub const BG_COLOR: [u8; 3] = [100, 100, 100];
pub const TEXT_COLOR: (u8, u8, u8, u8) = (255, 255, 255, 255);
pub const BACKDROP_COLOR: (u8, u8, u8, u8) = (0, 0, 0, 128);

// 5x7 bitmap font for ASCII 32..=127, one byte per column, LSB = top row.
#[rustfmt::skip]
static FONT_5X7: [[u8; 5]; 96] = [
    [0x00,0x00,0x00,0x00,0x00], [0x00,0x00,0x5F,0x00,0x00], [0x00,0x07,0x00,0x07,0x00], [0x14,0x7F,0x14,0x7F,0x14], // ' ' ! " #
    [0x24,0x2A,0x7F,0x2A,0x12], [0x23,0x13,0x08,0x64,0x62], [0x36,0x49,0x55,0x22,0x50], [0x00,0x05,0x03,0x00,0x00], // $ % & '
    [0x00,0x1C,0x22,0x41,0x00], [0x00,0x41,0x22,0x1C,0x00], [0x14,0x08,0x3E,0x08,0x14], [0x08,0x08,0x3E,0x08,0x08], // ( ) * +
    [0x00,0x50,0x30,0x00,0x00], [0x08,0x08,0x08,0x08,0x08], [0x00,0x60,0x60,0x00,0x00], [0x20,0x10,0x08,0x04,0x02], // , - . /
    [0x3E,0x51,0x49,0x45,0x3E], [0x00,0x42,0x7F,0x40,0x00], [0x42,0x61,0x51,0x49,0x46], [0x21,0x41,0x45,0x4B,0x31], // 0 1 2 3
    [0x18,0x14,0x12,0x7F,0x10], [0x27,0x45,0x45,0x45,0x39], [0x3C,0x4A,0x49,0x49,0x30], [0x01,0x71,0x09,0x05,0x03], // 4 5 6 7
    [0x36,0x49,0x49,0x49,0x36], [0x06,0x49,0x49,0x29,0x1E], [0x00,0x36,0x36,0x00,0x00], [0x00,0x56,0x36,0x00,0x00], // 8 9 : ;
    [0x08,0x14,0x22,0x41,0x00], [0x14,0x14,0x14,0x14,0x14], [0x00,0x41,0x22,0x14,0x08], [0x02,0x01,0x51,0x09,0x06], // < = > ?
    [0x3E,0x41,0x5D,0x55,0x1E], [0x7E,0x11,0x11,0x11,0x7E], [0x7F,0x49,0x49,0x49,0x36], [0x3E,0x41,0x41,0x41,0x22], // @ A B C
    [0x7F,0x41,0x41,0x22,0x1C], [0x7F,0x49,0x49,0x49,0x41], [0x7F,0x09,0x09,0x09,0x01], [0x3E,0x41,0x49,0x49,0x7A], // D E F G
    [0x7F,0x08,0x08,0x08,0x7F], [0x00,0x41,0x7F,0x41,0x00], [0x20,0x40,0x41,0x3F,0x01], [0x7F,0x08,0x14,0x22,0x41], // H I J K
    [0x7F,0x40,0x40,0x40,0x40], [0x7F,0x02,0x0C,0x02,0x7F], [0x7F,0x04,0x08,0x10,0x7F], [0x3E,0x41,0x41,0x41,0x3E], // L M N O
    [0x7F,0x09,0x09,0x09,0x06], [0x3E,0x41,0x51,0x21,0x5E], [0x7F,0x09,0x19,0x29,0x46], [0x46,0x49,0x49,0x49,0x31], // P Q R S
    [0x01,0x01,0x7F,0x01,0x01], [0x3F,0x40,0x40,0x40,0x3F], [0x1F,0x20,0x40,0x20,0x1F], [0x3F,0x40,0x38,0x40,0x3F], // T U V W
    [0x63,0x14,0x08,0x14,0x63], [0x07,0x08,0x70,0x08,0x07], [0x61,0x51,0x49,0x45,0x43], [0x00,0x7F,0x41,0x41,0x00], // X Y Z [
    [0x02,0x04,0x08,0x10,0x20], [0x00,0x41,0x41,0x7F,0x00], [0x04,0x02,0x01,0x02,0x04], [0x40,0x40,0x40,0x40,0x40], // \ ] ^ _
    [0x00,0x01,0x02,0x04,0x00], [0x20,0x54,0x54,0x54,0x78], [0x7F,0x48,0x44,0x44,0x38], [0x38,0x44,0x44,0x44,0x20], // ` a b c
    [0x38,0x44,0x44,0x48,0x7F], [0x38,0x54,0x54,0x54,0x18], [0x08,0x7E,0x09,0x01,0x02], [0x0C,0x52,0x52,0x52,0x3E], // d e f g
    [0x7F,0x08,0x04,0x04,0x78], [0x00,0x44,0x7D,0x40,0x00], [0x20,0x40,0x44,0x3D,0x00], [0x7F,0x10,0x28,0x44,0x00], // h i j k
    [0x00,0x41,0x7F,0x40,0x00], [0x7C,0x04,0x18,0x04,0x78], [0x7C,0x08,0x04,0x04,0x78], [0x38,0x44,0x44,0x44,0x38], // l m n o
    [0x7C,0x14,0x14,0x14,0x08], [0x08,0x14,0x14,0x18,0x7C], [0x7C,0x08,0x04,0x04,0x08], [0x48,0x54,0x54,0x54,0x20], // p q r s
    [0x04,0x3F,0x44,0x40,0x20], [0x3C,0x40,0x40,0x20,0x7C], [0x1C,0x20,0x40,0x20,0x1C], [0x3C,0x40,0x30,0x40,0x3C], // t u v w
    [0x44,0x28,0x10,0x28,0x44], [0x0C,0x50,0x50,0x50,0x3C], [0x44,0x64,0x54,0x4C,0x44], [0x00,0x08,0x36,0x41,0x00], // x y z {
    [0x00,0x00,0x7F,0x00,0x00], [0x00,0x41,0x36,0x08,0x00], [0x10,0x08,0x08,0x10,0x08], [0x00,0x00,0x00,0x00,0x00], // | } ~ DEL
];

/// Pack RGB into softbuffer's 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn blend(dst: u32, r: u8, g: u8, b: u8, a: u32) -> u32 {
    let (dr, dg, db) = unpack_rgb(dst);
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    rgb(mix(r, dr), mix(g, dg), mix(b, db))
}

/// Framebuffer plus its dimensions; every primitive clips against it.
pub struct Canvas<'a> {
    pub buf: &'a mut [u32],
    pub width: u32,
    pub height: u32,
}

impl Canvas<'_> {
    fn put(&mut self, x: i32, y: i32, color: (u8, u8, u8, u8)) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let off = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.buf.get_mut(off) {
            *px = blend(*px, color.0, color.1, color.2, color.3 as u32);
        }
    }

    pub fn clear(&mut self, color: [u8; 3]) {
        self.buf.fill(rgb(color[0], color[1], color[2]));
    }

    fn draw_char(&mut self, ch: char, px: i32, py: i32, scale: u32, color: (u8, u8, u8, u8)) {
        let idx = (ch as u32).wrapping_sub(32) as usize;
        let Some(glyph) = FONT_5X7.get(idx) else {
            return;
        };
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..7u32 {
                if *bits & (1 << row) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let x = px + (col as u32 * scale + sx) as i32;
                        let y = py + (row * scale + sy) as i32;
                        self.put(x, y, color);
                    }
                }
            }
        }
    }

    /// Draw a string. Returns the x position after the last character.
    pub fn draw_text(&mut self, text: &str, px: i32, py: i32, scale: u32, color: (u8, u8, u8, u8)) -> i32 {
        let mut x = px;
        for ch in text.chars() {
            self.draw_char(ch, x, py, scale, color);
            x += (6 * scale) as i32;
        }
        x
    }

    pub fn fill_rect(&mut self, rx: i32, ry: i32, rw: u32, rh: u32, color: (u8, u8, u8, u8)) {
        for row in 0..rh as i32 {
            for col in 0..rw as i32 {
                self.put(rx + col, ry + row, color);
            }
        }
    }

    /// Copy `src` with its top-left corner at (x0, y0), alpha blended and
    /// clipped to the canvas. The source is already at its final size.
    pub fn blit(&mut self, src: &RgbaImage, x0: i32, y0: i32) {
        let dx_start = x0.max(0);
        let dy_start = y0.max(0);
        let dx_end = (x0 + src.width() as i32).min(self.width as i32);
        let dy_end = (y0 + src.height() as i32).min(self.height as i32);

        for dy in dy_start..dy_end {
            for dx in dx_start..dx_end {
                let p = src.get_pixel((dx - x0) as u32, (dy - y0) as u32).0;
                let di = dy as usize * self.width as usize + dx as usize;
                let Some(dst) = self.buf.get_mut(di) else {
                    continue;
                };
                match p[3] {
                    255 => *dst = rgb(p[0], p[1], p[2]),
                    0 => {}
                    a => *dst = blend(*dst, p[0], p[1], p[2], a as u32),
                }
            }
        }
    }
}

pub fn text_width(text: &str, scale: u32) -> i32 {
    (text.chars().count() as u32 * 6 * scale) as i32
}

pub fn text_height(scale: u32) -> i32 {
    (7 * scale) as i32
}
