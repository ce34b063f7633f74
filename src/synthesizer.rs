use crate::{
    encode::{codec, surface::ExportSurface},
    foundation::error::GradientResult,
    render::{
        buffer::PixelBuffer,
        composite::overlay_tiled,
        preview::StyleDescriptor,
        raster::{RasterOpts, rasterize},
    },
    spec::{
        model::{GradientSpec, ImageFormat, NoiseRange, NoiseSpec, RasterTarget},
        presets::TEXTURE_SIZE,
    },
    synth::{field::GradientField, layer::GradientLayers, noise::Grain},
};

/// Entry point for rendering gradients.
///
/// Holds no per-render state: every call takes fresh parameter values and returns freshly
/// allocated output. The only configuration is how raster rows are split across threads,
/// which never changes the produced bytes.
#[derive(Clone, Debug, Default)]
pub struct GradientSynthesizer {
    opts: RasterOpts,
}

impl GradientSynthesizer {
    /// Synthesizer with default raster options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesizer with explicit raster options.
    pub fn with_opts(opts: RasterOpts) -> Self {
        Self { opts }
    }

    /// Raster options in use.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    /// Declarative preview: base layer, Wave hatching, optional grain tile.
    #[tracing::instrument(skip(self))]
    pub fn render_preview(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
    ) -> GradientResult<StyleDescriptor> {
        StyleDescriptor::new(spec, noise)
    }

    /// Clipboard text for the preview, `background: <css>;`.
    pub fn css(&self, spec: &GradientSpec, noise: &NoiseSpec) -> GradientResult<String> {
        Ok(self.render_preview(spec, noise)?.to_css_declaration())
    }

    /// Render `spec` into a `target.width × target.height` RGBA8 buffer.
    ///
    /// Grain uses the amplitude preset selected by `noise.range`.
    #[tracing::instrument(skip(self))]
    pub fn render_raster(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
        target: &RasterTarget,
    ) -> GradientResult<PixelBuffer> {
        self.render_with_range(spec, noise, target, noise.range)
    }

    /// Square texture for the 3D plane preview. Grain always uses [`NoiseRange::Strong`].
    #[tracing::instrument(skip(self))]
    pub fn render_texture(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
    ) -> GradientResult<PixelBuffer> {
        let target = RasterTarget::new(TEXTURE_SIZE, TEXTURE_SIZE, ImageFormat::Png);
        self.render_with_range(spec, noise, &target, NoiseRange::Strong)
    }

    /// Rasterize what the preview shows: the gradient with the grain tile repeated on top
    /// instead of per-pixel grain.
    #[tracing::instrument(skip(self))]
    pub fn flatten_preview(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
        target: &RasterTarget,
    ) -> GradientResult<PixelBuffer> {
        let descriptor = self.render_preview(spec, noise)?;
        target.validate()?;
        let field = GradientField::new(&descriptor.layers(), target.width, target.height)?;
        let mut buf = rasterize(&field, None, target.width, target.height, &self.opts)?;
        if let Some(tile) = &descriptor.overlay {
            overlay_tiled(&mut buf, &tile.rasterize()?)?;
        }
        Ok(buf)
    }

    /// Encode a rendered buffer.
    pub fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> GradientResult<Vec<u8>> {
        codec::encode(buffer, format)
    }

    /// Decode PNG or JPEG bytes back into a buffer.
    pub fn decode(&self, bytes: &[u8], format: ImageFormat) -> GradientResult<PixelBuffer> {
        codec::decode(bytes, format)
    }

    /// Render, encode and hand the file to `surface`. Returns the file name used.
    #[tracing::instrument(skip(self, surface))]
    pub fn export(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
        target: &RasterTarget,
        surface: &mut dyn ExportSurface,
    ) -> GradientResult<String> {
        let buffer = self.render_raster(spec, noise, target)?;
        let bytes = self.encode(&buffer, target.format)?;
        let file_name = target.format.file_name();
        surface.write_export(&file_name, target.format, &bytes)?;
        Ok(file_name)
    }

    fn render_with_range(
        &self,
        spec: &GradientSpec,
        noise: &NoiseSpec,
        target: &RasterTarget,
        range: NoiseRange,
    ) -> GradientResult<PixelBuffer> {
        let layers = GradientLayers::from_spec(spec)?;
        noise.validate()?;
        target.validate()?;

        let field = GradientField::new(&layers, target.width, target.height)?;
        let grain = Grain::with_range(noise, range);
        rasterize(
            &field,
            grain.as_ref(),
            target.width,
            target.height,
            &self.opts,
        )
    }
}
