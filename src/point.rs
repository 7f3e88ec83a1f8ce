//! # Points and Point Sets
//!
//! A [`Point`] is an immutable named 2-D coordinate; a [`PointSet`] is the
//! ordered list of points a tour visits. Point sets come from either a
//! bounded-rectangle random generator or a tabular loader that skips
//! malformed rows with a diagnostic instead of failing the whole load.
//!
//! ## Example
//!
//! ```rust
//! use tspga::point::PointSet;
//! use tspga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let points = PointSet::generate_random(10, &mut rng).unwrap();
//! assert_eq!(points.len(), 10);
//! ```

use std::io::BufRead;

use tracing::{debug, warn};

use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;

/// Default width of the coordinate space for random generation.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default height of the coordinate space for random generation.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Margin kept between generated points and the space boundary.
pub const DEFAULT_MARGIN: f64 = 50.0;

/// An immutable 2-D point with a display name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    name: String,
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Returns the display name of the point.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Computes the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An ordered, immutable collection of points.
///
/// The point count is carried by the set itself and threaded explicitly into
/// the distance matrix and tour constructors; there is no ambient global
/// count anywhere in the engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Creates a point set from an explicit list of points.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyPointSet`] if `points` is empty.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(TspError::EmptyPointSet);
        }
        Ok(Self { points })
    }

    /// Generates `count` uniformly random points inside the default
    /// 800×600 space, keeping a 50-unit margin from the edges.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyPointSet`] if `count` is zero.
    pub fn generate_random(count: usize, rng: &mut RandomNumberGenerator) -> Result<Self> {
        Self::generate_random_in(
            count,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            DEFAULT_MARGIN,
            rng,
        )
    }

    /// Generates `count` uniformly random points inside
    /// `[margin, width - margin] × [margin, height - margin]`.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyPointSet`] if `count` is zero, or
    /// [`TspError::Configuration`] if the margins leave no interior space.
    pub fn generate_random_in(
        count: usize,
        width: f64,
        height: f64,
        margin: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if count == 0 {
            return Err(TspError::EmptyPointSet);
        }
        if width - margin <= margin || height - margin <= margin {
            return Err(TspError::Configuration(format!(
                "margin {} leaves no interior in a {}x{} space",
                margin, width, height
            )));
        }

        let points = (0..count)
            .map(|i| {
                let x = rng.gen_range(margin, width - margin);
                let y = rng.gen_range(margin, height - margin);
                Point::new(i.to_string(), x, y)
            })
            .collect();

        debug!(count, "generated random point set");
        Ok(Self { points })
    }

    /// Loads points from comma-separated rows of `x,y` or `x,y,name`.
    ///
    /// Rows that do not parse (headers, too few columns, non-numeric
    /// coordinates) are skipped with a `warn!` diagnostic; a row never aborts
    /// the load. Points are named by their position in the set unless the row
    /// carries a third column.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Io`] if reading fails, or
    /// [`TspError::EmptyPointSet`] if no row parsed.
    pub fn load_tabular<R: BufRead>(reader: R) -> Result<Self> {
        let mut points = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            match Self::parse_row(&line, line_no, points.len()) {
                Ok(Some(point)) => points.push(point),
                Ok(None) => {} // blank line
                Err(TspError::InputRow { line, reason }) => {
                    warn!(line, %reason, "skipping malformed input row");
                }
                Err(other) => return Err(other),
            }
        }

        debug!(count = points.len(), "loaded tabular point set");
        Self::from_points(points)
    }

    /// Parses a single input row. `Ok(None)` means the row was blank.
    fn parse_row(line: &str, line_no: usize, position: usize) -> Result<Option<Point>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(TspError::InputRow {
                line: line_no,
                reason: format!("expected at least 2 columns, found {}", fields.len()),
            });
        }

        let x: f64 = fields[0].parse().map_err(|_| TspError::InputRow {
            line: line_no,
            reason: format!("non-numeric x value {:?}", fields[0]),
        })?;
        let y: f64 = fields[1].parse().map_err(|_| TspError::InputRow {
            line: line_no,
            reason: format!("non-numeric y value {:?}", fields[1]),
        })?;

        let name = fields
            .get(2)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| position.to_string());

        Ok(Some(Point::new(name, x, y)))
    }

    /// Returns the number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    ///
    /// Constructors reject empty sets, so this is only `false` in practice;
    /// it exists to satisfy the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at the given index.
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Returns the points in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
