//! Problem instance: the item catalog, the knapsack capacity, and the
//! three-line text format they are loaded from.
//!
//! The text format is:
//!
//! ```text
//! <capacity> <numberOfItems> <initialTemperature> <coolingStep>
//! <value>,<value>,...
//! <weight>,<weight>,...
//! ```
//!
//! Line 2 and 3 are index-aligned and must both contain exactly
//! `numberOfItems` entries. Malformed input fails fast with
//! [`KnapsackError::InvalidInput`] rather than loading a degenerate
//! instance.

use std::fs;
use std::path::Path;

use crate::error::KnapsackError;
use crate::sa::AnnealConfig;

/// One knapsack item. Created once at load time, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Profit contributed when the item is taken.
    pub value: u32,
    /// Capacity consumed when the item is taken.
    pub weight: u32,
}

/// An immutable problem instance: item catalog plus capacity.
///
/// Shared read-only by every candidate in a run; candidates borrow it and
/// never clone it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// The knapsack weight limit.
    pub capacity: u64,
    /// The item catalog. Candidate inclusion vectors are index-aligned
    /// with this list.
    pub items: Vec<Item>,
}

impl Instance {
    /// Creates an instance from a capacity and a catalog.
    pub fn new(capacity: u64, items: Vec<Item>) -> Self {
        Self { capacity, items }
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reads and parses an instance file.
    ///
    /// A missing or unreadable file is fatal ([`KnapsackError::Io`]).
    pub fn from_path(path: &Path) -> Result<(Self, AnnealConfig), KnapsackError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses the three-line instance text.
    ///
    /// Returns the instance together with the annealing parameters carried
    /// on the header line.
    pub fn parse(text: &str) -> Result<(Self, AnnealConfig), KnapsackError> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| invalid(1, "missing header line".into()))?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(invalid(
                1,
                format!(
                    "expected 4 fields (capacity, item count, initial temperature, \
                     cooling step), found {}",
                    fields.len()
                ),
            ));
        }
        let capacity: u64 = fields[0]
            .parse()
            .map_err(|_| invalid(1, format!("capacity is not a non-negative integer: {:?}", fields[0])))?;
        let count: usize = fields[1]
            .parse()
            .map_err(|_| invalid(1, format!("item count is not a non-negative integer: {:?}", fields[1])))?;
        let initial_temperature: f64 = fields[2]
            .parse()
            .map_err(|_| invalid(1, format!("initial temperature is not a number: {:?}", fields[2])))?;
        let cooling_step: f64 = fields[3]
            .parse()
            .map_err(|_| invalid(1, format!("cooling step is not a number: {:?}", fields[3])))?;

        let values = parse_csv_line(lines.next(), 2, count, "value")?;
        let weights = parse_csv_line(lines.next(), 3, count, "weight")?;

        let items = values
            .into_iter()
            .zip(weights)
            .map(|(value, weight)| Item { value, weight })
            .collect();

        let config = AnnealConfig::default()
            .with_initial_temperature(initial_temperature)
            .with_cooling_step(cooling_step);

        Ok((Self::new(capacity, items), config))
    }
}

fn invalid(line: usize, reason: String) -> KnapsackError {
    KnapsackError::InvalidInput { line, reason }
}

/// Parses one comma-separated line of non-negative integers, requiring
/// exactly `expected` entries. A zero-item instance accepts a missing or
/// blank line.
fn parse_csv_line(
    line: Option<&str>,
    line_number: usize,
    expected: usize,
    what: &str,
) -> Result<Vec<u32>, KnapsackError> {
    let line = match line {
        Some(l) => l.trim(),
        None if expected == 0 => return Ok(Vec::new()),
        None => return Err(invalid(line_number, format!("missing {what} line"))),
    };
    if line.is_empty() {
        if expected == 0 {
            return Ok(Vec::new());
        }
        return Err(invalid(
            line_number,
            format!("expected {expected} {what}s, found 0"),
        ));
    }

    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    if tokens.len() != expected {
        return Err(invalid(
            line_number,
            format!("expected {expected} {what}s, found {}", tokens.len()),
        ));
    }
    tokens
        .iter()
        .map(|token| {
            token.parse().map_err(|_| {
                invalid(
                    line_number,
                    format!("{what} is not a non-negative integer: {token:?}"),
                )
            })
        })
        .collect()
}
