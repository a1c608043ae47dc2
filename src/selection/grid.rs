//! Target retention-time grid.

/// `n` evenly spaced values over `[start, stop]`, both ends included.
///
/// Follows the usual `linspace` conventions: `n == 0` gives an empty grid,
/// `n == 1` gives `[start]`, and the last point is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            grid[n - 1] = stop;
            grid
        }
    }
}
