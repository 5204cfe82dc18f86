//! Salary histogram rendering.
//!
//! Draws bars, axes and horizontal gridlines into an RGB canvas and writes
//! it as a PNG with fixed encoder settings, so the same histogram always
//! produces byte-identical output.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use staffcheck_lint::Histogram;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors from chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("no salaries to plot")]
    NoData,
}

type Rgb = [u8; 3];

const BACKGROUND: Rgb = [255, 255, 255];
const AXIS: Rgb = [60, 60, 60];
const GRID: Rgb = [225, 225, 225];
const BAR: Rgb = [70, 130, 180];
const BAR_EDGE: Rgb = [40, 80, 120];

/// Chart layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Blank border around the plot area, in pixels.
    pub margin: u32,
    /// Number of horizontal gridlines above the x axis.
    pub gridlines: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            margin: 32,
            gridlines: 4,
        }
    }
}

/// An 8-bit RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let data = fill
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Returns the pixel at (x, y), with y growing downwards.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            let i = (y as usize * self.width as usize + x as usize) * 3;
            self.data[i..i + 3].copy_from_slice(&color);
        }
    }

    /// Fills the rectangle spanning `x0..x1` and `y0..y1`.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Renders a histogram into a canvas.
pub fn render_histogram(hist: &Histogram, config: &ChartConfig) -> Result<Canvas, ChartError> {
    if hist.is_empty() || hist.max_count() == 0 {
        return Err(ChartError::NoData);
    }
    if config.width <= config.margin * 2 || config.height <= config.margin * 2 {
        return Err(ChartError::InvalidDimensions(format!(
            "{}x{} leaves no room inside a {}px margin",
            config.width, config.height, config.margin
        )));
    }

    let mut canvas = Canvas::new(config.width, config.height, BACKGROUND);

    let left = config.margin;
    let right = config.width - config.margin;
    let top = config.margin;
    let bottom = config.height - config.margin;
    let plot_h = bottom - top;
    let plot_w = right - left;

    for i in 1..=config.gridlines {
        let y = bottom - plot_h * i / config.gridlines.max(1);
        canvas.fill_rect(left, y, right, y + 1, GRID);
    }

    let bins = hist.len() as u32;
    let max = hist.max_count() as u64;
    for (i, &count) in hist.counts.iter().enumerate() {
        let i = i as u32;
        let x0 = left + plot_w * i / bins;
        let x1 = left + plot_w * (i + 1) / bins;
        let bar_h = (plot_h as u64 * count as u64 / max) as u32;
        if bar_h == 0 {
            continue;
        }
        let y0 = bottom - bar_h;
        canvas.fill_rect(x0, y0, x1, bottom, BAR_EDGE);
        if x1 > x0 + 2 && bar_h > 1 {
            canvas.fill_rect(x0 + 1, y0 + 1, x1 - 1, bottom, BAR);
        }
    }

    // Axes last so bars never cover them.
    canvas.fill_rect(left, bottom, right, bottom + 1, AXIS);
    canvas.fill_rect(left, top, left + 1, bottom + 1, AXIS);

    Ok(canvas)
}

/// Writes a canvas as PNG to any writer.
pub fn write_png_to_writer<W: Write>(canvas: &Canvas, writer: W) -> Result<(), ChartError> {
    let mut encoder = Encoder::new(writer, canvas.width, canvas.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(canvas.as_bytes())?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Renders `hist` and writes it to `path`, returning the PNG's hash.
pub fn write_histogram_png(
    hist: &Histogram,
    path: &Path,
    config: &ChartConfig,
) -> Result<String, ChartError> {
    let canvas = render_histogram(hist, config)?;
    let mut data = Vec::new();
    write_png_to_writer(&canvas, &mut data)?;
    std::fs::write(path, &data)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote histogram");
    Ok(hash_png(&data))
}
