use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::cost::Miles;
use crate::graph::Graph;
use crate::graph::HeuristicTable;
use crate::space::State;

/// Distance value marking "no direct edge" in some input variants.
const NO_EDGE_SENTINEL: i64 = -1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateCodeParseError {
    #[error("State code '{0}' is not two letters long.")]
    WrongLength(String),
    #[error("Invalid character '{0}' in state code.")]
    InvalidCharacter(char),
}

/// A two-letter state identifier, `IL`, `CA`, ...
///
/// Equality is exact; codes are normalized to upper case when parsed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateCode([u8; 2]);

impl State for StateCode {}

impl FromStr for StateCode {
    type Err = StateCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(StateCodeParseError::WrongLength(s.to_string()));
        }
        let mut code = [0u8; 2];
        for (slot, &b) in code.iter_mut().zip(bytes) {
            if !b.is_ascii_alphabetic() {
                return Err(StateCodeParseError::InvalidCharacter(b as char));
            }
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self(code))
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}

impl std::fmt::Debug for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing column '{column}' in header.")]
    MissingColumn { column: &'static str },
    #[error("Line {line}: expected {expected} fields.")]
    ShortRow { line: usize, expected: usize },
    #[error("Line {line}: malformed distance '{value}'.")]
    MalformedDistance { line: usize, value: String },
    #[error("Line {line}: {source}")]
    MalformedState {
        line: usize,
        source: StateCodeParseError,
    },
}

/// Positions of the named columns within a header row.
struct Columns<const N: usize> {
    indices: [usize; N],
    width: usize,
}

impl<const N: usize> Columns<N> {
    fn find(header: &str, names: [&'static str; N]) -> Result<Self, TableError> {
        let fields: Vec<&str> = header.split(',').map(str::trim).collect();
        let mut indices = [0usize; N];
        for (slot, column) in indices.iter_mut().zip(names) {
            *slot = fields
                .iter()
                .position(|f| f.eq_ignore_ascii_case(column))
                .ok_or(TableError::MissingColumn { column })?;
        }
        Ok(Self {
            indices,
            width: fields.len(),
        })
    }

    fn fields<'a>(&self, line: usize, row: &'a str) -> Result<[&'a str; N], TableError> {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() < self.width {
            return Err(TableError::ShortRow {
                line,
                expected: self.width,
            });
        }
        Ok(self.indices.map(|i| fields[i]))
    }
}

fn parse_state(line: usize, field: &str) -> Result<StateCode, TableError> {
    field
        .parse()
        .map_err(|source| TableError::MalformedState { line, source })
}

/// Parses a distance field.
///
/// `-1` is the "no direct edge" sentinel and yields `None`; any other
/// negative or non-numeric value is malformed.
fn parse_distance(line: usize, field: &str) -> Result<Option<Miles>, TableError> {
    let malformed = || TableError::MalformedDistance {
        line,
        value: field.to_string(),
    };
    let distance: i64 = field.parse().map_err(|_| malformed())?;
    if distance == NO_EDGE_SENTINEL {
        return Ok(None);
    }
    let distance: Miles = distance.try_into().map_err(|_| malformed())?;
    Ok(Some(distance))
}

/// Parses `Source,Destination,Distance` records into a driving graph.
pub fn parse_driving_distances(text: &str) -> Result<Graph<StateCode, Miles>, TableError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let (_, header) = lines.next().ok_or(TableError::MissingColumn { column: "Source" })?;
    let columns = Columns::find(header, ["Source", "Destination", "Distance"])?;

    let mut graph = Graph::new();
    for (i, row) in lines {
        let line = i + 1;
        let [source, destination, distance] = columns.fields(line, row)?;
        let Some(distance) = parse_distance(line, distance)? else {
            continue;
        };
        let source = parse_state(line, source)?;
        let destination = parse_state(line, destination)?;
        graph.add_edge(source, destination, distance);
    }
    Ok(graph)
}

/// Parses `State,Heuristic` records into straight-line estimates towards
/// the fixed goal.
pub fn parse_straight_line(text: &str) -> Result<HeuristicTable<StateCode, Miles>, TableError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let (_, header) = lines.next().ok_or(TableError::MissingColumn { column: "State" })?;
    let columns = Columns::find(header, ["State", "Heuristic"])?;

    let mut heuristics = HeuristicTable::new();
    for (i, row) in lines {
        let line = i + 1;
        let [state, estimate] = columns.fields(line, row)?;
        let Some(estimate) = parse_distance(line, estimate)? else {
            // A sentinel here would leave the state unusable; treat it as
            // malformed rather than silently dropping the entry.
            return Err(TableError::MalformedDistance {
                line,
                value: estimate.to_string(),
            });
        };
        heuristics.insert(parse_state(line, state)?, estimate);
    }
    Ok(heuristics)
}

pub fn read_driving_distances(path: &Path) -> Result<Graph<StateCode, Miles>, TableError> {
    let graph = parse_driving_distances(&std::fs::read_to_string(path)?)?;
    log::info!(
        "Loaded {} driving edges from {}",
        graph.num_edges(),
        path.display()
    );
    Ok(graph)
}

pub fn read_straight_line(path: &Path) -> Result<HeuristicTable<StateCode, Miles>, TableError> {
    let heuristics = parse_straight_line(&std::fs::read_to_string(path)?)?;
    log::info!(
        "Loaded {} straight-line estimates from {}",
        heuristics.len(),
        path.display()
    );
    Ok(heuristics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn code(s: &str) -> StateCode {
        s.parse().unwrap()
    }

    #[test]
    fn state_codes_normalize() {
        assert_eq!(code("il"), code("IL"));
        assert_eq!(format!("{}", code("ca")), "CA");
        assert_eq!(
            "I".parse::<StateCode>(),
            Err(StateCodeParseError::WrongLength("I".to_string()))
        );
        assert_eq!(
            "I2".parse::<StateCode>(),
            Err(StateCodeParseError::InvalidCharacter('2'))
        );
    }

    #[test]
    fn parses_driving_table() {
        let graph = parse_driving_distances(indoc! {"
            Source,Destination,Distance
            IL,IN,150
            IN,MO,200
            MO,CA,1700
        "})
        .unwrap();
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.edge_distance(&code("IL"), &code("IN")), Some(150));
        assert_eq!(graph.edge_distance(&code("MO"), &code("CA")), Some(1700));
    }

    #[test]
    fn sentinel_edges_are_filtered() {
        let graph = parse_driving_distances(indoc! {"
            Source,Destination,Distance
            IL,CA,-1
            IL,IN,150
        "})
        .unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edge_distance(&code("IL"), &code("CA")), None);
    }

    #[test]
    fn negative_distance_is_malformed() {
        let err = parse_driving_distances(indoc! {"
            Source,Destination,Distance
            IL,IN,-42
        "})
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedDistance { line: 2, .. }
        ));
    }

    #[test]
    fn missing_column_is_rejected() {
        let err = parse_driving_distances(indoc! {"
            Source,Destination
            IL,IN
        "})
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingColumn { column: "Distance" }
        ));
    }

    #[test]
    fn header_order_is_flexible() {
        let graph = parse_driving_distances(indoc! {"
            Distance,Source,Destination
            150,IL,IN
        "})
        .unwrap();
        assert_eq!(graph.edge_distance(&code("IL"), &code("IN")), Some(150));
    }

    #[test]
    fn parses_straight_line_table() {
        let heuristics = parse_straight_line(indoc! {"
            State,Heuristic
            CA,0
            MO,1500
            IN,1900
            IL,2000
        "})
        .unwrap();
        assert_eq!(heuristics.h(&code("CA")), Some(0));
        assert_eq!(heuristics.h(&code("IL")), Some(2000));
        assert_eq!(heuristics.len(), 4);
    }

    #[test]
    fn straight_line_rejects_sentinel() {
        let err = parse_straight_line(indoc! {"
            State,Heuristic
            CA,-1
        "})
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedDistance { line: 2, .. }
        ));
    }

    #[test]
    fn bundled_dataset_is_searchable() {
        use crate::astar::AStarSearch;
        use crate::greedy::GreedySearch;
        use crate::problem::Problem;

        let graph = read_driving_distances(Path::new("data/driving.csv")).unwrap();
        let heuristics = read_straight_line(Path::new("data/straightline.csv")).unwrap();
        // The sentinel rows never become edges.
        assert_eq!(graph.edge_distance(&code("CA"), &code("IN")), None);

        let problem = Problem::new(code("IN"), code("CA"), graph, heuristics).unwrap();
        let astar = AStarSearch::run(problem.clone());
        let greedy = GreedySearch::run(problem);

        let a = astar.path.unwrap();
        let g = greedy.path.unwrap();
        assert_eq!(a.start(), Some(&code("IN")));
        assert_eq!(a.end(), Some(&code("CA")));
        assert!(a.cost <= g.cost);
        assert!(astar.expanded >= 1);
    }

    #[test]
    fn short_rows_are_rejected() {
        let err = parse_driving_distances(indoc! {"
            Source,Destination,Distance
            IL,IN
        "})
        .unwrap_err();
        assert!(matches!(err, TableError::ShortRow { line: 2, .. }));
    }
}
