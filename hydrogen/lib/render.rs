//! Filled-contour rendering of density slices into an RGB canvas.
//!
//! All drawing goes through an explicit [`RenderContext`] that owns its canvas;
//! there is no shared figure. A frame is drawn as
//! - a filled contour plot of the density with a fixed number of linearly
//!   spaced levels, colored with the viridis colormap under a logarithmic
//!   normalization whose ceiling is the frame's own maximum;
//! - mirrored about the *z*-axis, so that the half-plane slice covers the full
//!   plot;
//! - with a color bar, axis ticks, axis labels, and a title.

use image::{ Rgb, RgbImage };
use font8x8::{ BASIC_FONTS, UnicodeFonts };
use ndarray as nd;
use crate::{
    Arr2,
    error::{ RenderError, ShapeError },
    grid::SphericalGrid,
    utils::fmax,
};

pub type RenderResult<T> = Result<T, RenderError>;

/// Default figure size in inches.
pub const DEF_FIGSIZE: (f64, f64) = (10.0, 7.0);

/// Default pixel density.
pub const DEF_DPI: u32 = 200;

/// Default floor of the logarithmic color scale.
pub const DEF_VMIN: f64 = 1e-5;

/// Default number of contour levels.
pub const DEF_LEVELS: usize = 100;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Logarithmic normalization of values in [`vmin`, `vmax`] to [0, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogNorm {
    vmin: f64,
    vmax: f64,
}

impl LogNorm {
    /// Create a new normalization.
    ///
    /// Fails unless `0 < vmin < vmax < ∞`.
    pub fn new(vmin: f64, vmax: f64) -> RenderResult<Self> {
        RenderError::check_norm(vmin, vmax)?;
        Ok(Self { vmin, vmax })
    }

    pub fn vmin(&self) -> f64 { self.vmin }

    pub fn vmax(&self) -> f64 { self.vmax }

    /// Map `v` to [0, 1], clipping values outside [`vmin`, `vmax`].
    ///
    /// ```
    /// use hydrogen::render::LogNorm;
    ///
    /// let norm = LogNorm::new(1e-5, 1e-1).unwrap();
    /// assert!((norm.apply(1e-3) - 0.5).abs() < 1e-12);
    /// assert_eq!(norm.apply(0.0), 0.0);
    /// assert_eq!(norm.apply(1.0), 1.0);
    /// ```
    pub fn apply(&self, v: f64) -> f64 {
        if v.is_nan() || v <= self.vmin { return 0.0; }
        if v >= self.vmax { return 1.0; }
        (v / self.vmin).ln() / (self.vmax / self.vmin).ln()
    }

    /// Inverse of [`Self::apply`] for `t` in [0, 1].
    pub fn invert(&self, t: f64) -> f64 {
        self.vmin * (self.vmax / self.vmin).powf(t.clamp(0.0, 1.0))
    }
}

/// `levels` linearly spaced contour levels over [0, `max`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContourLevels {
    max: f64,
    levels: usize,
}

impl ContourLevels {
    /// Create a new set of levels.
    pub fn new(max: f64, levels: usize) -> RenderResult<Self> {
        if levels < 2 { return Err(RenderError::BadLevels(levels)); }
        Ok(Self { max, levels })
    }

    /// Number of filled bands between levels.
    pub fn bands(&self) -> usize { self.levels - 1 }

    /// Index of the band containing `v`, if `v` lies in [0, `max`].
    pub fn band(&self, v: f64) -> Option<usize> {
        if !(0.0..=self.max).contains(&v) { return None; }
        let k = (v / self.max * self.bands() as f64).floor() as usize;
        Some(k.min(self.bands() - 1))
    }

    /// Value a filled band is colored by: the midpoint of its bounding levels.
    pub fn band_value(&self, band: usize) -> f64 {
        self.max * (band as f64 + 0.5) / self.bands() as f64
    }
}

/// Map a normalized value in [0, 1] to a viridis color.
pub fn viridis(t: f64) -> Rgb<u8> {
    let c = colorous::VIRIDIS.eval_continuous(t.clamp(0.0, 1.0));
    Rgb([c.r, c.g, c.b])
}

/// Axis-aligned pixel rectangle; `x1` and `y1` are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn width(&self) -> u32 { self.x1 - self.x0 }

    pub fn height(&self) -> u32 { self.y1 - self.y0 }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }
}

// positions of all figure elements as fractions of the canvas size
#[derive(Copy, Clone, Debug)]
struct Layout {
    plot: Rect,
    cbar: Rect,
    // integer magnification of the 8x8 font
    text_scale: u32,
}

impl Layout {
    fn new(width: u32, height: u32) -> RenderResult<Self> {
        let fx = |f: f64| (f * width as f64).round() as u32;
        let fy = |f: f64| (f * height as f64).round() as u32;
        let plot = Rect { x0: fx(0.11), y0: fy(0.10), x1: fx(0.76), y1: fy(0.88) };
        let cbar = Rect { x0: fx(0.79), y0: plot.y0, x1: fx(0.815), y1: plot.y1 };
        if plot.width() < 2 || plot.height() < 2 || cbar.width() < 1 {
            return Err(RenderError::BadCanvas(width, height));
        }
        let text_scale = (height / 350).max(1);
        Ok(Self { plot, cbar, text_scale })
    }
}

/// Summary of a drawn frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameScale {
    /// Maximum density in the frame; the ceiling of the color scale.
    pub max_density: f64,
    /// Floor of the color scale.
    pub vmin: f64,
}

/// Drawing state for a sequence of frames: one reusable canvas plus the fixed
/// rendering parameters.
///
/// Each call to [`Self::draw_frame`] clears and redraws the whole canvas.
#[derive(Clone, Debug)]
pub struct RenderContext {
    canvas: RgbImage,
    layout: Layout,
    vmin: f64,
    levels: usize,
}

impl RenderContext {
    /// Create a new context with a `width` × `height` pixel canvas.
    pub fn new(width: u32, height: u32, vmin: f64, levels: usize)
        -> RenderResult<Self>
    {
        let layout = Layout::new(width, height)?;
        if levels < 2 { return Err(RenderError::BadLevels(levels)); }
        let canvas = RgbImage::from_pixel(width, height, WHITE);
        Ok(Self { canvas, layout, vmin, levels })
    }

    /// Create a new context sized from a figure size in inches and a pixel
    /// density. Dimensions are rounded to even numbers of pixels, as required
    /// by most video encoders.
    pub fn from_figure(figsize: (f64, f64), dpi: u32, vmin: f64, levels: usize)
        -> RenderResult<Self>
    {
        let even = |inches: f64| {
            let px = (inches * dpi as f64).round().max(0.0) as u32;
            px + px % 2
        };
        Self::new(even(figsize.0), even(figsize.1), vmin, levels)
    }

    /// The current canvas.
    pub fn canvas(&self) -> &RgbImage { &self.canvas }

    pub fn width(&self) -> u32 { self.canvas.width() }

    pub fn height(&self) -> u32 { self.canvas.height() }

    /// Pixel rectangle occupied by the contour plot.
    pub fn plot_area(&self) -> Rect { self.layout.plot }

    /// Pixel rectangle occupied by the color bar.
    pub fn colorbar_area(&self) -> Rect { self.layout.cbar }

    /// Reset the canvas to the background color.
    pub fn clear(&mut self) {
        self.canvas.pixels_mut().for_each(|px| { *px = WHITE; });
    }

    /// Plot coordinates `(X, Z)` of the center of pixel `(px, py)`, for a plot
    /// spanning [-`extent`, `extent`] on both axes.
    pub fn pixel_to_plot(&self, px: u32, py: u32, extent: f64) -> (f64, f64) {
        let plot = self.layout.plot;
        let u = (px as f64 - plot.x0 as f64 + 0.5) / plot.width() as f64;
        let v = (py as f64 - plot.y0 as f64 + 0.5) / plot.height() as f64;
        (extent * (2.0 * u - 1.0), extent * (1.0 - 2.0 * v))
    }

    /// Clear the canvas and draw a full frame for a density sampled on the
    /// `(r, θ)` slice of `grid`.
    pub fn draw_frame<S>(
        &mut self,
        grid: &SphericalGrid,
        density: &Arr2<S>,
        title: &str,
    ) -> RenderResult<FrameScale>
    where S: nd::Data<Elem = f64>
    {
        let n = grid.resolution();
        ShapeError::check(density.shape(), &[n, n])?;
        self.clear();
        let max_density = fmax(density).unwrap_or(f64::NAN);
        let norm = LogNorm::new(self.vmin, max_density)?;
        let levels = ContourLevels::new(max_density, self.levels)?;
        self.draw_contours(grid, density, &norm, &levels);
        self.draw_axes(grid.r_max());
        self.draw_colorbar(&norm);
        self.draw_labels(title);
        Ok(FrameScale { max_density, vmin: self.vmin })
    }

    fn draw_contours<S>(
        &mut self,
        grid: &SphericalGrid,
        density: &Arr2<S>,
        norm: &LogNorm,
        levels: &ContourLevels,
    )
    where S: nd::Data<Elem = f64>
    {
        let plot = self.layout.plot;
        let extent = grid.r_max();
        // one color per band
        let colors: Vec<Rgb<u8>>
            = (0..levels.bands())
            .map(|k| viridis(norm.apply(levels.band_value(k))))
            .collect();
        for py in plot.y0..plot.y1 {
            for px in plot.x0..plot.x1 {
                let (x, z) = self.pixel_to_plot(px, py, extent);
                // both halves of the plot sample the same half-plane slice
                let r = x.hypot(z);
                let theta = x.abs().atan2(z);
                let Some(val) = grid.interp(density, r, theta) else { continue; };
                if let Some(k) = levels.band(val) {
                    self.canvas.put_pixel(px, py, colors[k]);
                }
            }
        }
    }

    fn draw_axes(&mut self, extent: f64) {
        let plot = self.layout.plot;
        let sc = self.layout.text_scale;
        self.stroke_rect(plot);
        let tick_len = 3 * sc;
        for k in 0..5_u32 {
            let frac = k as f64 / 4.0;
            let value = extent * (2.0 * frac - 1.0);
            let label = format!("{:.0}", value);
            // x-axis
            let px = plot.x0 + (frac * (plot.width() - 1) as f64).round() as u32;
            self.fill_rect(px.saturating_sub(sc / 2), plot.y1, sc, tick_len, BLACK);
            let w = text_width(&label, sc);
            self.draw_text(
                px as i64 - w as i64 / 2,
                (plot.y1 + tick_len + 2 * sc) as i64,
                &label,
                sc,
            );
            // z-axis
            let py = plot.y1 - 1 - (frac * (plot.height() - 1) as f64).round() as u32;
            self.fill_rect(
                plot.x0.saturating_sub(tick_len), py.saturating_sub(sc / 2),
                tick_len, sc, BLACK,
            );
            self.draw_text(
                plot.x0 as i64 - (tick_len + 2 * sc + w) as i64,
                py as i64 - 4 * sc as i64,
                &label,
                sc,
            );
        }
    }

    fn draw_colorbar(&mut self, norm: &LogNorm) {
        let cbar = self.layout.cbar;
        let sc = self.layout.text_scale;
        let h = cbar.height();
        for py in cbar.y0..cbar.y1 {
            let t = 1.0 - (py - cbar.y0) as f64 / (h - 1).max(1) as f64;
            let color = viridis(t);
            for px in cbar.x0..cbar.x1 {
                self.canvas.put_pixel(px, py, color);
            }
        }
        self.stroke_rect(cbar);
        // one tick per decade
        let lo = norm.vmin().log10().ceil() as i32;
        let hi = norm.vmax().log10().floor() as i32;
        for e in lo..=hi {
            let t = norm.apply(10_f64.powi(e));
            let py = cbar.y1 - 1 - (t * (h - 1) as f64).round() as u32;
            self.fill_rect(cbar.x1, py.saturating_sub(sc / 2), 3 * sc, sc, BLACK);
            self.draw_text(
                (cbar.x1 + 5 * sc) as i64,
                py as i64 - 4 * sc as i64,
                &format!("1e{}", e),
                sc,
            );
        }
        let label = "Probability Density";
        let x = self.width() as f64 * 0.93;
        let y = (cbar.y0 + cbar.y1) / 2 + text_width(label, sc) / 2;
        self.draw_text_vertical(x as i64, y as i64, label, sc);
    }

    fn draw_labels(&mut self, title: &str) {
        let plot = self.layout.plot;
        let sc = self.layout.text_scale;
        let cx = ((plot.x0 + plot.x1) / 2) as i64;
        let tw = text_width(title, sc) as i64;
        self.draw_text(
            cx - tw / 2, (self.height() as f64 * 0.035) as i64, title, sc);
        let xlabel = "x (in Bohr radii)";
        let xw = text_width(xlabel, sc) as i64;
        self.draw_text(
            cx - xw / 2, (self.height() as f64 * 0.94) as i64, xlabel, sc);
        let ylabel = "z (in Bohr radii)";
        let yw = text_width(ylabel, sc);
        self.draw_text_vertical(
            (self.width() as f64 * 0.02) as i64,
            ((plot.y0 + plot.y1) / 2 + yw / 2) as i64,
            ylabel,
            sc,
        );
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
        let (width, height) = self.canvas.dimensions();
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                self.canvas.put_pixel(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let t = (self.layout.text_scale / 2).max(1);
        let Rect { x0, y0, x1, y1 } = rect;
        let x0 = x0.saturating_sub(t);
        let y0 = y0.saturating_sub(t);
        self.fill_rect(x0, y0, x1 + t - x0, t, BLACK);
        self.fill_rect(x0, y1, x1 + t - x0, t, BLACK);
        self.fill_rect(x0, y0, t, y1 + t - y0, BLACK);
        self.fill_rect(x1, y0, t, y1 + t - y0, BLACK);
    }

    fn plot_dot(&mut self, x: i64, y: i64, sc: u32) {
        if x < 0 || y < 0 { return; }
        self.fill_rect(x as u32, y as u32, sc, sc, BLACK);
    }

    // left-to-right text with its top-left corner at (x, y)
    fn draw_text(&mut self, x: i64, y: i64, text: &str, sc: u32) {
        let sc_i = sc as i64;
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else { continue; };
            let gx = x + i as i64 * 8 * sc_i;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if (*bits >> col) & 1 == 1 {
                        self.plot_dot(gx + col * sc_i, y + row as i64 * sc_i, sc);
                    }
                }
            }
        }
    }

    // bottom-to-top text with its bottom-left corner at (x, y)
    fn draw_text_vertical(&mut self, x: i64, y: i64, text: &str, sc: u32) {
        let sc_i = sc as i64;
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else { continue; };
            let gy = y - (i as i64 + 1) * 8 * sc_i;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if (*bits >> col) & 1 == 1 {
                        self.plot_dot(
                            x + row as i64 * sc_i, gy + (7 - col) * sc_i, sc);
                    }
                }
            }
        }
    }
}

/// Width in pixels of `text` drawn at magnification `sc`.
pub fn text_width(text: &str, sc: u32) -> u32 {
    8 * sc * text.chars().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use crate::{
        state::QuantumState,
        utils::reduce_azimuth,
        wavefunction::{ density, psi_nlm_arr },
    };

    fn ground_state_slice(grid: &SphericalGrid) -> nd::Array2<f64> {
        let gs = QuantumState::new(1, 0, 0).unwrap();
        let psi = psi_nlm_arr(gs, &grid.r(), &grid.theta(), &grid.phi()).unwrap();
        reduce_azimuth(&density(&psi))
    }

    #[test]
    fn log_norm() {
        let norm = LogNorm::new(1e-5, 1e-1).unwrap();
        assert_abs_diff_eq!(norm.apply(1e-4), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(norm.invert(0.75), 1e-2, epsilon = 1e-14);
        assert_eq!(norm.apply(f64::NAN), 0.0);
        assert!(matches!(LogNorm::new(1e-5, 1e-6), Err(RenderError::BadNorm(..))));
        assert!(matches!(LogNorm::new(0.0, 1.0), Err(RenderError::BadNorm(..))));
        assert!(LogNorm::new(1e-5, f64::NAN).is_err());
    }

    #[test]
    fn contour_bands() {
        let levels = ContourLevels::new(1.0, 100).unwrap();
        assert_eq!(levels.bands(), 99);
        assert_eq!(levels.band(0.0), Some(0));
        assert_eq!(levels.band(1.0), Some(98));
        assert_eq!(levels.band(0.5), Some(49));
        assert_eq!(levels.band(1.5), None);
        assert_abs_diff_eq!(levels.band_value(0), 0.5 / 99.0, epsilon = 1e-15);
        assert!(ContourLevels::new(1.0, 1).is_err());
    }

    #[test]
    fn figure_size() {
        let ctx = RenderContext::from_figure(DEF_FIGSIZE, DEF_DPI, DEF_VMIN, DEF_LEVELS)
            .unwrap();
        assert_eq!((ctx.width(), ctx.height()), (2000, 1400));
        assert!(RenderContext::new(10, 10, DEF_VMIN, DEF_LEVELS).is_err());
    }

    #[test]
    fn draws_ground_state() {
        let grid = SphericalGrid::new(60, 40.0, PI / 2.0).unwrap();
        let rho = ground_state_slice(&grid);
        let mut ctx = RenderContext::new(200, 140, DEF_VMIN, DEF_LEVELS).unwrap();
        let scale = ctx.draw_frame(&grid, &rho, "Transition Frame: 0").unwrap();
        assert_abs_diff_eq!(scale.max_density, 1.0 / PI, epsilon = 1e-12);

        let plot = ctx.plot_area();
        let canvas = ctx.canvas();
        // outside r_max, nothing is drawn
        assert_eq!(*canvas.get_pixel(plot.x0, plot.y0), WHITE);
        // near the nucleus the density is high
        let center = canvas.get_pixel(
            (plot.x0 + plot.x1) / 2, (plot.y0 + plot.y1) / 2);
        assert_ne!(*center, WHITE);
        // the plot is symmetric under x → -x
        let cy = (plot.y0 + plot.y1) / 2;
        for d in [3_u32, 10, 25].iter() {
            let left = canvas.get_pixel(plot.x0 + d, cy);
            let right = canvas.get_pixel(plot.x1 - 1 - d, cy);
            assert_eq!(left, right);
        }
        // the color bar runs from dark (bottom) to bright (top)
        let cbar = ctx.colorbar_area();
        let top = canvas.get_pixel(cbar.x0 + cbar.width() / 2, cbar.y0 + 1);
        let bottom = canvas.get_pixel(cbar.x0 + cbar.width() / 2, cbar.y1 - 2);
        assert!(top.0[1] > bottom.0[1]);
        // title ink
        let title_rows = 0..plot.y0;
        assert!(
            title_rows.flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
                .any(|(x, y)| *canvas.get_pixel(x, y) == BLACK)
        );
    }

    #[test]
    fn redraw_clears_previous_frame() {
        let grid = SphericalGrid::new(30, 40.0, PI / 2.0).unwrap();
        let rho = ground_state_slice(&grid);
        let mut ctx = RenderContext::new(200, 140, DEF_VMIN, DEF_LEVELS).unwrap();
        ctx.draw_frame(&grid, &rho, "Transition Frame: 0").unwrap();
        let first = ctx.canvas().clone();
        ctx.draw_frame(&grid, &rho, "Transition Frame: 0").unwrap();
        assert_eq!(&first, ctx.canvas());
    }

    #[test]
    fn rejects_bad_frames() {
        let grid = SphericalGrid::new(30, 40.0, PI / 2.0).unwrap();
        let mut ctx = RenderContext::new(200, 140, DEF_VMIN, DEF_LEVELS).unwrap();
        let zeros = nd::Array2::<f64>::zeros((30, 30));
        assert!(matches!(
            ctx.draw_frame(&grid, &zeros, ""), Err(RenderError::BadNorm(..))));
        let wrong = nd::Array2::<f64>::ones((30, 31));
        assert!(matches!(
            ctx.draw_frame(&grid, &wrong, ""), Err(RenderError::Shape(_))));
    }
}
