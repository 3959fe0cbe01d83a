use image::{Rgba, RgbaImage};

/// Glyph cell width in font units.
pub const GLYPH_W: u32 = 5;
/// Glyph cell height in font units.
pub const GLYPH_H: u32 = 7;
/// Horizontal gap between glyphs, in font units.
const TRACKING: u32 = 1;

/// Built-in 5x7 face covering the watermark charset: uppercase letters,
/// digits, and light punctuation. Lowercase input folds to uppercase. Each
/// glyph row is a 5-bit mask, leftmost pixel in bit 4.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let ch = ch.to_ascii_uppercase();
    let rows = match ch {
        ' ' => [0b00000; 7],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(rows)
}

/// How a run of text is rasterized.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    /// Integer scale applied to the 5x7 cell.
    pub scale: u32,
    /// Bold doubles the strokes by re-drawing one pixel to the right.
    pub bold: bool,
    /// Fill color; the alpha channel is the text opacity.
    pub color: Rgba<u8>,
}

/// Rendered width of `text` in pixels, including the extra bold column.
pub fn text_width(text: &str, style: &TextStyle) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    let advance = (GLYPH_W + TRACKING) * style.scale;
    let base = chars * advance - TRACKING * style.scale;
    if style.bold { base + 1 } else { base }
}

/// Rendered height of a line in pixels.
pub fn line_height(style: &TextStyle) -> u32 {
    GLYPH_H * style.scale
}

fn blend_pixel(base: &mut Rgba<u8>, overlay: Rgba<u8>) {
    let alpha = overlay[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let inv = 1.0 - alpha;
    for idx in 0..3 {
        base[idx] = (overlay[idx] as f32 * alpha + base[idx] as f32 * inv)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    base[3] = 255;
}

fn fill_dot(img: &mut RgbaImage, x: i64, y: i64, style: &TextStyle) {
    let scale = style.scale as i64;
    for dy in 0..scale {
        for dx in 0..scale {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || py < 0 || px >= img.width() as i64 || py >= img.height() as i64 {
                continue;
            }
            blend_pixel(img.get_pixel_mut(px as u32, py as u32), style.color);
        }
    }
}

/// Draw `text` with its top-left corner at `(x, y)`. Glyphs outside the
/// surface are clipped; characters without a glyph are skipped as spaces.
pub fn draw_text(img: &mut RgbaImage, text: &str, x: i64, y: i64, style: &TextStyle) {
    let scale = style.scale.max(1) as i64;
    let advance = ((GLYPH_W + TRACKING) as i64) * scale;

    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, mask) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if mask & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let dot_x = pen_x + col as i64 * scale;
                    let dot_y = y + row as i64 * scale;
                    fill_dot(img, dot_x, dot_y, style);
                    if style.bold {
                        fill_dot(img, dot_x + 1, dot_y, style);
                    }
                }
            }
        }
        pen_x += advance;
    }
}

/// Canvas-style centered text: `center_x` is the horizontal midpoint and
/// `baseline_y` the text baseline, matching `fillText` with `textAlign =
/// "center"`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    text: &str,
    center_x: u32,
    baseline_y: u32,
    style: &TextStyle,
) {
    let width = text_width(text, style) as i64;
    let x = center_x as i64 - width / 2;
    let y = baseline_y as i64 - line_height(style) as i64;
    draw_text(img, text, x, y, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(scale: u32, alpha: u8) -> TextStyle {
        TextStyle {
            scale,
            bold: false,
            color: Rgba([255, 255, 255, alpha]),
        }
    }

    #[test]
    fn widths_scale_linearly() {
        let one = text_width("A", &style(1, 255));
        assert_eq!(one, 5);
        assert_eq!(text_width("AB", &style(1, 255)), 11);
        assert_eq!(text_width("AB", &style(2, 255)), 22);
        assert_eq!(text_width("", &style(2, 255)), 0);
    }

    #[test]
    fn opaque_text_writes_exact_color() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, "I", 4, 4, &style(1, 255));
        // 'I' has its top bar on row 0, columns 1..=3.
        assert_eq!(*img.get_pixel(5, 4), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(4, 4), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn translucent_text_blends() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, "I", 4, 4, &style(1, 128));
        let px = *img.get_pixel(5, 4);
        assert!(px[0] > 100 && px[0] < 160, "expected ~50% gray, got {px:?}");
    }

    #[test]
    fn clipping_never_panics() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, "WWW", -3, -3, &style(3, 255));
        draw_text(&mut img, "WWW", 2, 2, &style(3, 255));
    }

    #[test]
    fn centered_text_is_symmetric() {
        let mut img = RgbaImage::from_pixel(101, 31, Rgba([0, 0, 0, 255]));
        draw_text_centered(&mut img, "H", 50, 20, &style(1, 255));
        // 'H' spans 5 columns centered on x=50.
        assert_eq!(*img.get_pixel(48, 13), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(52, 13), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(47, 13), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn lowercase_folds_to_uppercase() {
        let mut upper = RgbaImage::from_pixel(12, 12, Rgba([0, 0, 0, 255]));
        let mut lower = RgbaImage::from_pixel(12, 12, Rgba([0, 0, 0, 255]));
        draw_text(&mut upper, "K", 2, 2, &style(1, 255));
        draw_text(&mut lower, "k", 2, 2, &style(1, 255));
        assert_eq!(upper.as_raw(), lower.as_raw());
    }
}
