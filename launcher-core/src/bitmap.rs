use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// In-memory raster image, tightly packed RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// zlib effort used when writing PNG. Every level is lossless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    Default,
    #[default]
    Best,
}

impl From<PngCompression> for png::Compression {
    fn from(level: PngCompression) -> Self {
        match level {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Default => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

impl Bitmap {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Bitmap dimensions must be non-zero, got {}x{}", width, height);
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .context("Bitmap dimensions overflow")?;
        if pixels.len() != expected {
            bail!(
                "Expected {} bytes of RGBA data for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            );
        }
        Ok(Self { width, height, pixels })
    }

    /// Build from Android `ARGB_8888` pixels as returned by `Bitmap.getPixels`
    /// (one `0xAARRGGBB` int per pixel, not premultiplied).
    pub fn from_argb_pixels(width: u32, height: u32, argb: &[i32]) -> Result<Self> {
        let mut pixels = Vec::with_capacity(argb.len() * 4);
        for &color in argb {
            let [a, r, g, b] = (color as u32).to_be_bytes();
            pixels.extend_from_slice(&[r, g, b, a]);
        }
        Self::from_rgba(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn encode_png(&self, compression: PngCompression) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut output, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(compression.into());

            let mut writer = encoder
                .write_header()
                .context("Failed to write PNG header")?;
            writer
                .write_image_data(&self.pixels)
                .context("Failed to write PNG image data")?;
            writer.finish().context("Failed to finish PNG stream")?;
        }
        log::debug!(
            "Encoded {}x{} bitmap into {} bytes of PNG",
            self.width,
            self.height,
            output.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info.width, info.height, buf)
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(Bitmap::from_rgba(0, 4, Vec::new()).is_err());
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_argb_conversion() {
        let bitmap = Bitmap::from_argb_pixels(2, 1, &[0xFF11_2233_u32 as i32, 0x8000_00FF_u32 as i32]).unwrap();
        assert_eq!(bitmap.pixels(), &[0x11, 0x22, 0x33, 0xFF, 0x00, 0x00, 0xFF, 0x80]);
    }

    #[test]
    fn test_png_is_lossless_at_every_level() {
        let pixels: Vec<u8> = (0..(7 * 5 * 4)).map(|i| (i * 37 % 256) as u8).collect();
        let bitmap = Bitmap::from_rgba(7, 5, pixels.clone()).unwrap();

        for level in [PngCompression::Fast, PngCompression::Default, PngCompression::Best] {
            let png = bitmap.encode_png(level).unwrap();
            assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
            let (w, h, decoded) = decode(&png);
            assert_eq!((w, h), (7, 5));
            assert_eq!(decoded, pixels);
        }
    }
}
