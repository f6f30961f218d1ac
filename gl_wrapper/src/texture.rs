use std::ffi::c_void;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Decoded image with 8-bit RGBA pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decodes a PNG stream into RGBA8, expanding palette, grayscale and 16-bit images.
pub fn decode_png<R: Read>(reader: R) -> Result<RgbaImage, TextureError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let pixels = expand_to_rgba(info.color_type, &buf[..info.buffer_size()])?;

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Widens 8-bit decoder output to RGBA.
///
/// `normalize_to_color8` already turns palettes into RGB or RGBA, so `Indexed`
/// only reaches this if the decoder transformations change.
fn expand_to_rgba(color_type: png::ColorType, data: &[u8]) -> Result<Vec<u8>, TextureError> {
    let pixels = match color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => return Err(TextureError::UnsupportedFormat),
    };

    Ok(pixels)
}

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        filter: TextureFilter,
        wrap: TextureWrap,
    ) -> Result<Self, TextureError> {
        if (width as usize * height as usize * TextureFormats::Rgba8.channels() as usize)
            != data.len()
        {
            return Err(TextureError::InvalidSrcLength);
        }

        let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(TextureError::TooLarge),
        };

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap.gl_enum() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap.gl_enum() as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                filter.gl_enum() as i32,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                filter.gl_enum() as i32,
            );

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                TextureFormats::Rgba8 as i32,
                w,
                h,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        log::debug!("created texture {id} ({width}x{height})");

        Ok(Self { id })
    }

    pub fn from_image(image: &RgbaImage) -> Result<Self, TextureError> {
        Self::new(
            image.width,
            image.height,
            &image.pixels,
            TextureFilter::Linear,
            TextureWrap::Repeat,
        )
    }

    /// Loads a PNG file with repeat wrapping and linear filtering.
    pub fn from_png<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let file = File::open(path.as_ref())?;
        let image = decode_png(BufReader::new(file))?;

        log::info!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            image.width,
            image.height
        );

        Self::from_image(&image)
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
    #[error("Texture dimensions exceed GL limits")]
    TooLarge,
    #[error("Unsupported image format")]
    UnsupportedFormat,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Cannot decode png: {0}")]
    Decode(#[from] png::DecodingError),
}

pub enum TextureFormats {
    Rgba8 = gl::RGBA8 as isize,
}

impl TextureFormats {
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormats::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

impl TextureFilter {
    fn gl_enum(&self) -> u32 {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

impl TextureWrap {
    fn gl_enum(&self) -> u32 {
        match self {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
        }
    }
}
