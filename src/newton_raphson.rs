// Newton raphson root finding for a polynomial across a grid of the
// complex plane
//
// Every point of the grid is iterated at once. For each point track the
// first iteration at which the newton step became smaller than the
// convergence tolerance; points which never converge keep the iteration
// budget as their count.

use json::JsonValue;
use log::{debug, info};
use num::complex::Complex64;
use rayon::prelude::*;

use std::io::{Error, ErrorKind};

use crate::grid::{Grid, Window};
use crate::polynomial::Polynomial;

// Size of newton step below which a point counts as converged
pub const CONVERGENCE_TOLERANCE : f64 = 1e-7;

const DEFAULT_MAX_ITERATIONS : usize = 30;
const DEFAULT_RESOLUTION : usize = 1024;

// The iterates z0, z1, ... of newton's method from a single starting point.
// The last value computed is not included.
pub fn successive_approximations(
    polynomial : &Polynomial,
    start : Complex64,
    iterations : usize
) -> Vec<Complex64> {
    let mut approximations = Vec::with_capacity(iterations);
    let mut z = start;
    for _ in 0..iterations {
        approximations.push(z);
        z = z - polynomial.evaluate(&z) / polynomial.evaluate_derivative(&z);
    }
    approximations
}

// Iteration state for a whole grid of starting points
pub struct NewtonIteration<'a> {
    polynomial : &'a Polynomial,
    z : Grid<Complex64>,
    iterations_until_rooted : Grid<usize>,
    not_already_at_root : Grid<bool>,
    step : usize,
    max_iterations : usize
}

impl<'a> NewtonIteration<'a> {
    pub fn new(
        polynomial : &'a Polynomial,
        seeds : Grid<Complex64>,
        max_iterations : usize
    ) -> NewtonIteration<'a> {
        let (width, height) = (seeds.width(), seeds.height());
        NewtonIteration {
            polynomial,
            z : seeds,
            iterations_until_rooted : Grid::filled(width, height, max_iterations),
            not_already_at_root : Grid::filled(width, height, true),
            step : 0,
            max_iterations
        }
    }

    // Current approximation at every point
    pub fn current(self : &Self) -> &Grid<Complex64> {
        &self.z
    }

    pub fn iterations_until_rooted(self : &Self) -> &Grid<usize> {
        &self.iterations_until_rooted
    }

    pub fn steps_taken(self : &Self) -> usize {
        self.step
    }

    pub fn active_points(self : &Self) -> usize {
        self.not_already_at_root.cells().iter().filter(|active| **active).count()
    }

    // Take one newton step over the whole grid. Returns false once the
    // iteration budget is used up.
    pub fn step(self : &mut Self) -> bool {
        if self.step >= self.max_iterations {
            return false;
        }
        let f_now = self.polynomial.evaluate(&self.z);
        let f_prime_now = self.polynomial.evaluate_derivative(&self.z);
        let step = self.step;
        // A zero derivative gives a non-finite point which then never converges
        self.z.cells_mut().par_iter_mut()
            .zip(self.iterations_until_rooted.cells_mut().par_iter_mut())
            .zip(self.not_already_at_root.cells_mut().par_iter_mut())
            .zip(f_now.cells().par_iter().zip(f_prime_now.cells().par_iter()))
            .for_each(|(((z, rooted_at), not_at_root), (f, f_prime))| {
                let next = *z - f / f_prime;
                let found_root = (next - *z).norm() < CONVERGENCE_TOLERANCE && *not_at_root;
                if found_root {
                    *rooted_at = step;
                }
                *not_at_root = !found_root && *not_at_root;
                *z = next;
            });
        self.step += 1;
        debug!("Iteration {} of {}: {} points still active", self.step, self.max_iterations, self.active_points());
        true
    }

    // Run out the remaining budget and return the iteration counts
    pub fn finish(mut self) -> Grid<usize> {
        while self.step() {}
        let non_finite = self.z.cells().iter().filter(|z| !z.is_finite()).count();
        if non_finite > 0 {
            debug!("{} points became non-finite", non_finite);
        }
        self.iterations_until_rooted
    }
}

pub struct NewtonRaphson {
    polynomial : Polynomial,
    max_iterations : usize,
    resolution : (usize, usize),
    window : Window
}

impl NewtonRaphson {
    pub fn new(
        polynomial : Polynomial,
        max_iterations : usize,
        resolution : (usize, usize),
        window : Window
    ) -> NewtonRaphson {
        NewtonRaphson { polynomial, max_iterations, resolution, window }
    }

    pub fn from_json(input : &JsonValue) -> std::io::Result<NewtonRaphson> {
        let equation = input["equation"].as_str().ok_or(
            Error::new(ErrorKind::InvalidData, "Missing equation")
        )?;
        let polynomial = Polynomial::parse(equation)?;
        let max_iterations = input["max_iterations"].as_usize().unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(Error::new(ErrorKind::InvalidData, "max_iterations must be positive"));
        }
        let res_x = input["resolution_x"].as_usize().unwrap_or(DEFAULT_RESOLUTION);
        let res_y = input["resolution_y"].as_usize().unwrap_or(DEFAULT_RESOLUTION);
        if res_x == 0 || res_y == 0 {
            return Err(Error::new(ErrorKind::InvalidData, "Resolution must be positive"));
        }
        // Explicit bounds override the zoom window for the given time
        let zoomed = Window::zoom(input["time"].as_f64().unwrap_or(0.0));
        let window = Window {
            x_left : input["x_left"].as_f64().unwrap_or(zoomed.x_left),
            x_right : input["x_right"].as_f64().unwrap_or(zoomed.x_right),
            y_left : input["y_left"].as_f64().unwrap_or(zoomed.y_left),
            y_right : input["y_right"].as_f64().unwrap_or(zoomed.y_right)
        };
        Ok(NewtonRaphson::new(polynomial, max_iterations, (res_x, res_y), window))
    }

    pub fn polynomial(self : &Self) -> &Polynomial {
        &self.polynomial
    }

    pub fn window(self : &Self) -> &Window {
        &self.window
    }

    pub fn iterate(self : &Self) -> NewtonIteration {
        let seeds = self.window.seed_grid(self.resolution.0, self.resolution.1);
        NewtonIteration::new(&self.polynomial, seeds, self.max_iterations)
    }

    // Grid of (resolution_y, resolution_x) iteration counts
    pub fn make_map(self : &Self) -> Grid<usize> {
        info!(
            "Iterating {} (degree {}) over {}x{} points for {} iterations",
            self.polynomial, self.polynomial.degree(), self.resolution.0, self.resolution.1, self.max_iterations
        );
        let counts = self.iterate().finish();
        let rooted = counts.cells().iter().filter(|n| **n < self.max_iterations).count();
        info!("{} of {} points found a root", rooted, counts.cells().len());
        counts
    }
}

pub fn generate(input : &JsonValue) -> std::io::Result<Grid<usize>> {
    info!("Generating newton raphson map");
    let nr = NewtonRaphson::from_json(input)?;
    Ok(nr.make_map())
}
