//! Reader for the Solomon VRPTW text format.
//!
//! ```text
//! C101
//!
//! VEHICLE
//! NUMBER     CAPACITY
//!   25         200
//!
//! CUSTOMER
//! CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE   TIME
//!
//!     0      40         50          0          0       1236          0
//!     1      45         68         10        912        967         90
//! ```
//!
//! The first line is the instance name. The first numeric line is the
//! vehicle line (`NUMBER CAPACITY`); every numeric line after it is a node,
//! depot first. Header and blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::VrptwError;
use crate::models::{Instance, Node, TimeWindow};

const NODE_FIELDS: usize = 7;

/// Parses a Solomon instance, keeping the depot plus at most
/// `max_customers` customers.
///
/// The vehicle number becomes the fleet bound.
///
/// # Examples
///
/// ```
/// use u_vrptw::io::read_solomon;
///
/// let text = "R101\n\nVEHICLE\nNUMBER CAPACITY\n 25 200\n\nCUSTOMER\n\
///             CUST NO. XCOORD. YCOORD. DEMAND READY TIME DUE DATE SERVICE TIME\n\
///             0 35 35 0 0 230 0\n\
///             1 41 49 10 161 171 10\n\
///             2 35 17 7 50 60 10\n";
/// let instance = read_solomon(text.as_bytes(), Some(1)).unwrap();
/// assert_eq!(instance.name(), "R101");
/// assert_eq!(instance.num_customers(), 1);
/// assert_eq!(instance.capacity(), 200.0);
/// assert_eq!(instance.fleet_size(), Some(25));
/// ```
pub fn read_solomon<R: BufRead>(
    reader: R,
    max_customers: Option<usize>,
) -> Result<Instance, VrptwError> {
    let mut name: Option<String> = None;
    let mut vehicle: Option<(usize, f64)> = None;
    let mut nodes: Vec<Node> = Vec::new();
    let limit = max_customers.map(|n| n + 1);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if name.is_none() {
            name = Some(trimmed.to_string());
            continue;
        }
        let is_numeric = trimmed
            .split_whitespace()
            .next()
            .is_some_and(|token| token.parse::<f64>().is_ok());
        if !is_numeric {
            continue;
        }

        match vehicle {
            None => vehicle = Some(parse_vehicle(trimmed, line_no)?),
            Some(_) => {
                if limit.is_some_and(|limit| nodes.len() >= limit) {
                    break;
                }
                nodes.push(parse_node(trimmed, line_no, nodes.len())?);
            }
        }
    }

    let (number, capacity) =
        vehicle.ok_or_else(|| VrptwError::malformed(None, "missing vehicle line"))?;
    let mut instance = Instance::new(nodes, capacity)?.with_name(name.unwrap_or_default());
    if number > 0 {
        instance = instance.with_fleet_size(number)?;
    }

    debug!(
        component = "io",
        operation = "read_solomon",
        instance = instance.name(),
        customers = instance.num_customers() as u64,
        capacity = instance.capacity(),
        fleet = number as u64,
        "Read Solomon instance"
    );
    Ok(instance)
}

/// Opens and parses a Solomon instance file.
pub fn read_solomon_file(
    path: impl AsRef<Path>,
    max_customers: Option<usize>,
) -> Result<Instance, VrptwError> {
    let file = File::open(path.as_ref())?;
    read_solomon(BufReader::new(file), max_customers)
}

fn parse_fields(line: &str, line_no: usize) -> Result<Vec<f64>, VrptwError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| VrptwError::Parse {
                line: line_no,
                reason: format!("'{token}' is not a number"),
            })
        })
        .collect()
}

fn parse_vehicle(line: &str, line_no: usize) -> Result<(usize, f64), VrptwError> {
    let fields = parse_fields(line, line_no)?;
    match fields.as_slice() {
        &[number, capacity] if number >= 0.0 && number.fract() == 0.0 => {
            Ok((number as usize, capacity))
        }
        _ => Err(VrptwError::Parse {
            line: line_no,
            reason: "expected vehicle line 'NUMBER CAPACITY'".into(),
        }),
    }
}

fn parse_node(line: &str, line_no: usize, index: usize) -> Result<Node, VrptwError> {
    let fields = parse_fields(line, line_no)?;
    if fields.len() < NODE_FIELDS {
        return Err(VrptwError::Parse {
            line: line_no,
            reason: format!("expected {NODE_FIELDS} fields, found {}", fields.len()),
        });
    }
    let (id, x, y, demand, ready, due, service) = (
        fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], fields[6],
    );
    if id < 0.0 || id.fract() != 0.0 {
        return Err(VrptwError::Parse {
            line: line_no,
            reason: format!("node id {id} is not a non-negative integer"),
        });
    }
    let window = TimeWindow::new(ready, due).ok_or_else(|| {
        VrptwError::malformed(Some(index), format!("invalid time window [{ready}, {due}]"))
    })?;
    Ok(Node::new(id as usize, x, y, demand, window, service))
}
