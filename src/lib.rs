// Newton raphson fractals for polynomials given as text
//
// A polynomial such as "x^3-1" is parsed and differentiated, then newton's
// method is run from every point of a grid over the complex plane. The
// result is a grid holding, for each point, the first iteration at which
// it settled on a root.

use std::io::{Error, ErrorKind, Read};
use std::fs::File;
use std::path::Path;

use json::JsonValue;
use log::info;

pub mod grid;
pub mod logging;
pub mod newton_raphson;
pub mod polynomial;

pub use grid::{Grid, Window};
pub use newton_raphson::{successive_approximations, NewtonIteration, NewtonRaphson};
pub use polynomial::Polynomial;
pub use polynomial::evaluate::{evaluate_equation, EvaluationInput};
pub use polynomial::tokens::{ParseError, Token};

// Iteration counts for the render described by the json input
pub fn generate(input : &JsonValue) -> std::io::Result<Grid<usize>> {
    newton_raphson::generate(input)
}

pub fn load_input<P : AsRef<Path>>(path : P) -> std::io::Result<JsonValue> {
    info!("Loading input file: {}", path.as_ref().display());
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    json::parse(&contents).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't parse input")
    )
}

pub fn generate_from_file<P : AsRef<Path>>(path : P) -> std::io::Result<Grid<usize>> {
    let input = load_input(path)?;
    generate(&input)
}
