use image::{Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);
pub const RED: Rgb<u8> = Rgb([214, 39, 40]);

const MARGIN: u32 = 40;
const GRID_DIVISIONS: u32 = 5;

/// One polyline on a [`LineChart`].
pub struct Series<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub color: Rgb<u8>,
}

/// Bare-bones line chart: white background, grid, axes, no text.
pub struct LineChart {
    pub width: u32,
    pub height: u32,
}

impl Default for LineChart {
    fn default() -> Self {
        LineChart {
            width: 1200,
            height: 600,
        }
    }
}

impl LineChart {
    pub fn render(&self, series: &[Series<'_>]) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, WHITE);
        let x0 = MARGIN as i64;
        let y0 = (self.height - MARGIN) as i64;
        let x1 = (self.width - MARGIN / 2) as i64;
        let y1 = (MARGIN / 2) as i64;

        for i in 0..=GRID_DIVISIONS as i64 {
            let gx = x0 + (x1 - x0) * i / GRID_DIVISIONS as i64;
            let gy = y0 + (y1 - y0) * i / GRID_DIVISIONS as i64;
            draw_line(&mut img, (gx, y0), (gx, y1), GRID, 0);
            draw_line(&mut img, (x0, gy), (x1, gy), GRID, 0);
        }
        draw_line(&mut img, (x0, y0), (x1, y0), AXIS, 0);
        draw_line(&mut img, (x0, y0), (x0, y1), AXIS, 0);

        let Some(((xmin, xmax), (ymin, ymax))) = bounds(series) else {
            return img;
        };
        let to_px = |x: f64, y: f64| -> (i64, i64) {
            let tx = if xmax > xmin { (x - xmin) / (xmax - xmin) } else { 0.5 };
            let ty = if ymax > ymin { (y - ymin) / (ymax - ymin) } else { 0.5 };
            (
                x0 + (tx * (x1 - x0) as f64).round() as i64,
                y0 + (ty * (y1 - y0) as f64).round() as i64,
            )
        };

        for s in series {
            let points: Vec<(i64, i64)> = s
                .xs
                .iter()
                .zip(s.ys)
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(&x, &y)| to_px(x, y))
                .collect();
            for pair in points.windows(2) {
                draw_line(&mut img, pair[0], pair[1], s.color, 1);
            }
            if let [only] = points.as_slice() {
                draw_line(&mut img, *only, *only, s.color, 2);
            }
        }
        img
    }
}

/// Shared x and y range over all series, padded by 5% vertically.
fn bounds(series: &[Series<'_>]) -> Option<((f64, f64), (f64, f64))> {
    let mut xr: Option<(f64, f64)> = None;
    let mut yr: Option<(f64, f64)> = None;
    for s in series {
        for (&x, &y) in s.xs.iter().zip(s.ys) {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            xr = Some(xr.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
            yr = Some(yr.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
        }
    }
    let (x, (ylo, yhi)) = (xr?, yr?);
    let pad = (yhi - ylo) * 0.05;
    Some((x, (ylo - pad, yhi + pad)))
}

/// Bresenham with a square brush of half-width `thickness`.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>, thickness: i64) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        for oy in -thickness..=thickness {
            for ox in -thickness..=thickness {
                put(img, x + ox, y + oy, color);
            }
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
