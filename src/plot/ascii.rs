//! ASCII plotting of the monthly overlap timeline.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - overlap curve: `-` line
//! - months: `*` (peak), `+` (high), `o` (normal)
//! - peak/high thresholds: `.` rows, drawn only on blank cells
//!
//! The y axis is fixed to `[0, 1]` so plots of different profiles compare directly.

use crate::domain::{MonthlyOverlapPoint, PeakLevel};

const THRESHOLDS: [f64; 2] = [0.75, 0.6];

/// Render a timeline (global or one domain) as a `width` × `height` grid.
pub fn render_timeline_plot(points: &[MonthlyOverlapPoint], width: usize, height: usize) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "Plot: no timeline points\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);
    let x_max = (points.len().max(2) - 1) as f64;

    let mut grid = vec![vec![' '; width]; height];

    let curve: Vec<(usize, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (map_x(i as f64, x_max, width), map_y(p.overlap_strength, height)))
        .collect();
    draw_curve(&mut grid, &curve);

    for threshold in THRESHOLDS {
        let row = map_y(threshold, height);
        for cell in grid[row].iter_mut() {
            if *cell == ' ' {
                *cell = '.';
            }
        }
    }

    for (p, &(x, y)) in points.iter().zip(&curve) {
        grid[y][x] = match p.peak_level {
            PeakLevel::Peak => '*',
            PeakLevel::High => '+',
            PeakLevel::Normal => 'o',
        };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: months=[{}, {}] | overlap=[0.00, 1.00]\n",
        first.month, last.month
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn map_x(i: f64, x_max: f64, width: usize) -> usize {
    let u = (i / x_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, height: usize) -> usize {
    let u = y.clamp(0.0, 1.0);
    // y=top is 1.0 -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(usize, usize)]) {
    let mut prev = None;
    for &(x, y) in curve {
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify_peak;

    fn point(month: &str, strength: f64) -> MonthlyOverlapPoint {
        MonthlyOverlapPoint {
            month: month.to_string(),
            overlap_strength: strength,
            time_overlap_weight: 1.0 + 0.3 * strength,
            peak_level: classify_peak(strength),
        }
    }

    #[test]
    fn plot_golden_snapshot_flat() {
        let points = vec![
            point("2025-01", 0.25),
            point("2025-02", 0.25),
            point("2025-03", 0.25),
        ];
        let txt = render_timeline_plot(&points, 12, 5);
        let expected = concat!(
            "Plot: months=[2025-01, 2025-03] | overlap=[0.00, 1.00]\n",
            "            \n",
            "............\n",
            "............\n",
            "o-----o----o\n",
            "            \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn peak_months_are_starred() {
        let points = vec![point("2025-01", 0.1), point("2025-02", 0.95), point("2025-03", 0.65)];
        let txt = render_timeline_plot(&points, 20, 8);
        assert_eq!(txt.matches('*').count(), 1);
        assert_eq!(txt.matches('+').count(), 1);
        assert_eq!(txt.lines().count(), 9);
    }

    #[test]
    fn empty_timeline_has_placeholder() {
        assert_eq!(render_timeline_plot(&[], 40, 10), "Plot: no timeline points\n");
    }
}
