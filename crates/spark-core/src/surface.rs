// File: crates/spark-core/src/surface.rs
// Summary: Drawable backing surfaces. `Surface` is what the renderer draws into;
// `RasterSurface` is the Skia CPU raster implementation used by demos and tests.

use skia_safe as skia;

use crate::error::SparkError;

/// Backing store size a fresh raster surface starts with, in device px.
pub const DEFAULT_SIZE: (i32, i32) = (300, 150);

/// A drawable surface with a device-pixel backing store.
pub trait Surface {
    /// Current backing store size in device pixels.
    fn pixel_size(&self) -> (i32, i32);

    /// Reallocate the backing store. Callers only pass sizes of at least 1x1.
    /// Returns false, keeping the previous store, when allocation fails.
    fn set_pixel_size(&mut self, width: i32, height: i32) -> bool;

    /// 2D drawing context, or `None` while the surface is not attached.
    fn canvas(&mut self) -> Option<&skia::Canvas>;
}

pub struct RasterSurface {
    inner: Option<skia::Surface>,
    size: (i32, i32),
    attached: bool,
    reallocations: usize,
}

impl RasterSurface {
    /// Attached surface at `DEFAULT_SIZE`.
    pub fn new() -> Self {
        let (w, h) = DEFAULT_SIZE;
        Self {
            inner: skia::surfaces::raster_n32_premul((w, h)),
            size: DEFAULT_SIZE,
            attached: true,
            reallocations: 0,
        }
    }

    /// Attached surface of an explicit size.
    pub fn with_size(width: i32, height: i32) -> Result<Self, SparkError> {
        let inner = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(SparkError::Allocation { width, height })?;
        Ok(Self { inner: Some(inner), size: (width, height), attached: true, reallocations: 0 })
    }

    /// Surface that yields no drawing context until `attach` is called.
    pub fn detached() -> Self {
        let mut s = Self::new();
        s.attached = false;
        s
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// How many times the backing store has been reallocated.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Read back the frame as tightly packed, unpremultiplied RGBA8 rows.
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, i32, i32), SparkError> {
        let (width, height) = self.size;
        let surface = self.inner.as_mut().ok_or(SparkError::Detached)?;
        let info = skia::ImageInfo::new(
            (width, height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * height as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(SparkError::Readback { width, height });
        }
        Ok((pixels, width, height))
    }

    /// Encode the current frame as PNG.
    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>, SparkError> {
        let surface = self.inner.as_mut().ok_or(SparkError::Detached)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(SparkError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }
}

impl Default for RasterSurface {
    fn default() -> Self { Self::new() }
}

impl Surface for RasterSurface {
    fn pixel_size(&self) -> (i32, i32) {
        self.size
    }

    fn set_pixel_size(&mut self, width: i32, height: i32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        let Some(inner) = skia::surfaces::raster_n32_premul((width, height)) else {
            tracing::warn!(width, height, "backing store allocation failed; keeping previous surface");
            return false;
        };
        self.inner = Some(inner);
        self.size = (width, height);
        self.reallocations += 1;
        true
    }

    fn canvas(&mut self) -> Option<&skia::Canvas> {
        if !self.attached {
            return None;
        }
        self.inner.as_mut().map(|s| s.canvas())
    }
}
