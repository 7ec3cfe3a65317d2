// A dense 2D grid of values stored row by row, and the window of the
// complex plane that the seed grid samples.

use std::ops::Index;

use num::complex::Complex64;
use rayon::prelude::*;

// Centre of the zoom used when the window is driven by a time parameter
const ZOOM_CENTRE_X : f64 = 0.41187;
const ZOOM_HALF_WIDTH : f64 = 10.0;
// Number of time steps for the window to halve in size
const ZOOM_HALVING_TIME : f64 = 30.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width : usize,
    height : usize,
    cells : Vec<T>
}

impl<T> Grid<T> {
    pub fn from_fn<F>(width : usize, height : usize, mut f : F) -> Grid<T>
        where F : FnMut(usize, usize) -> T
    {
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }
        Grid { width, height, cells }
    }

    pub fn width(self : &Self) -> usize {
        self.width
    }

    pub fn height(self : &Self) -> usize {
        self.height
    }

    // (rows, columns)
    pub fn shape(self : &Self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn cells(self : &Self) -> &[T] {
        &self.cells
    }

    pub(crate) fn cells_mut(self : &mut Self) -> &mut [T] {
        &mut self.cells
    }

    pub fn rows(self : &Self) -> impl Iterator<Item = &[T]> {
        // chunks panics on a zero size so guard the empty grid
        self.cells.chunks(self.width.max(1))
    }
}

impl<T : Clone> Grid<T> {
    pub fn filled(width : usize, height : usize, val : T) -> Grid<T> {
        Grid { width, height, cells : vec![val; width * height] }
    }
}

impl<T : Sync> Grid<T> {
    // Apply f to every cell in parallel keeping the shape
    pub fn map<U, F>(self : &Self, f : F) -> Grid<U>
        where U : Send, F : Fn(&T) -> U + Sync + Send
    {
        Grid {
            width : self.width,
            height : self.height,
            cells : self.cells.par_iter().map(f).collect()
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col) : (usize, usize)) -> &T {
        assert!(col < self.width, "column {} out of range for width {}", col, self.width);
        &self.cells[row * self.width + col]
    }
}

// Evenly spaced samples including both ends
pub fn linspace(start : f64, end : f64, samples : usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (samples - 1) as f64;
            (0..samples).map(
                |i| if i == samples - 1 { end } else { start + step * i as f64 }
            ).collect()
        }
    }
}

// Rectangle of the complex plane. Columns run from x_left to x_right along
// the real axis and rows from y_left to y_right along the imaginary axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub x_left : f64,
    pub x_right : f64,
    pub y_left : f64,
    pub y_right : f64
}

impl Window {
    pub fn new(x_left : f64, x_right : f64, y_left : f64, y_right : f64) -> Window {
        Window { x_left, x_right, y_left, y_right }
    }

    // Window zooming in on a point on the real axis as time increases,
    // halving in size every 30 units of time. The top row is the most
    // positive imaginary part.
    pub fn zoom(time : f64) -> Window {
        let half = ZOOM_HALF_WIDTH / 2.0_f64.powf(time / ZOOM_HALVING_TIME);
        Window {
            x_left : -half + ZOOM_CENTRE_X,
            x_right : half + ZOOM_CENTRE_X,
            y_left : half,
            y_right : -half
        }
    }

    // Grid of starting points real + imaginary * i sampled across the window
    pub fn seed_grid(self : &Self, width : usize, height : usize) -> Grid<Complex64> {
        let xs = linspace(self.x_left, self.x_right, width);
        let ys = linspace(self.y_left, self.y_right, height);
        Grid::from_fn(width, height, |row, col| Complex64::new(xs[col], ys[row]))
    }
}
