//! Embedded application icon, shared by the window and the tray

use std::io::Cursor;

use anyhow::{Context, Result, anyhow};

const ICON_BYTES: &[u8] = include_bytes!("../../assets/icon.png");

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct RgbaIcon {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbaIcon {
    pub fn into_icon_data(self) -> egui::IconData {
        egui::IconData {
            rgba: self.rgba,
            width: self.width,
            height: self.height,
        }
    }
}

pub fn load_app_icon() -> Result<RgbaIcon> {
    decode_png(ICON_BYTES)
}

fn decode_png(bytes: &[u8]) -> Result<RgbaIcon> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().context("Failed to read PNG header")?;

    let (color_type, _) = reader.output_color_type();
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
    let info = reader
        .next_frame(&mut buf)
        .context("Failed to decode PNG frame")?;
    let pixels = &buf[..info.buffer_size()];

    // tray-icon and egui both expect RGBA
    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(0xFF);
            }
            rgba
        }
        other => {
            return Err(anyhow!(
                "Unsupported icon color type {:?} (expected RGB or RGBA)",
                other
            ));
        }
    };

    Ok(RgbaIcon {
        rgba,
        width: info.width,
        height: info.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_icon_decodes_to_rgba() {
        let icon = load_app_icon().unwrap();
        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_png(b"not a png").is_err());
    }
}
