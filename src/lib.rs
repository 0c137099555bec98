use std::{
    collections::HashMap,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    iter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug)]
pub enum Error {
    InvalidKey(char),
    InvalidCodeText(String),
    BlockedKeyPair(char, char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidKey(key) => write!(f, "Invalid key({}).", key),
            Error::InvalidCodeText(s) => write!(f, "Invalid text({}) for door code.", s),
            Error::BlockedKeyPair(from_key, to_key) => write!(
                f,
                "No clear route from key({}) to key({}).",
                from_key, to_key
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn key(&self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Keypad {
    keys: Vec<Option<char>>,
    row_n: usize,
    col_n: usize,
}

impl Keypad {
    pub fn new_numeric() -> Self {
        let keys = Vec::from([
            Some('7'),
            Some('8'),
            Some('9'),
            Some('4'),
            Some('5'),
            Some('6'),
            Some('1'),
            Some('2'),
            Some('3'),
            None,
            Some('0'),
            Some('A'),
        ]);

        Self {
            keys,
            row_n: 4,
            col_n: 3,
        }
    }

    pub fn new_directional() -> Self {
        use Direction::{Down, Left, Right, Up};
        let keys = Vec::from([
            None,
            Some(Up.key()),
            Some('A'),
            Some(Left.key()),
            Some(Down.key()),
            Some(Right.key()),
        ]);

        Self {
            keys,
            row_n: 2,
            col_n: 3,
        }
    }

    fn keys(&self) -> impl Iterator<Item = (char, Position)> + '_ {
        self.keys
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(ind, key_op)| {
                key_op.map(|key| (key, Position::new(ind / self.col_n, ind % self.col_n)))
            })
    }

    fn key(&self, pos: &Position) -> Option<&char> {
        self.pos_to_ind(pos)
            .and_then(|ind| self.keys.get(ind).and_then(|key_op| key_op.as_ref()))
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    fn route_blocked(&self, start_pos: &Position, route: &[Direction]) -> bool {
        let mut cur_pos = start_pos.clone();
        for dir in route {
            let Some(next_pos) = cur_pos.neighbor(*dir) else {
                return true;
            };
            if self.key(&next_pos).is_none() {
                return true;
            }
            cur_pos = next_pos;
        }

        false
    }
}

#[derive(Debug)]
pub struct TransitionGraph {
    paths: HashMap<(char, char), String>,
}

impl TransitionGraph {
    pub fn new(keypad: &Keypad) -> Result<Self, Error> {
        let mut paths = HashMap::new();
        for (from_key, from_pos) in keypad.keys() {
            for (to_key, to_pos) in keypad.keys() {
                let [first_route, second_route] = Self::route_candidates(&from_pos, &to_pos);
                let route = if !keypad.route_blocked(&from_pos, &first_route) {
                    first_route
                } else if !keypad.route_blocked(&from_pos, &second_route) {
                    second_route
                } else {
                    return Err(Error::BlockedKeyPair(from_key, to_key));
                };

                let path = route
                    .iter()
                    .map(|dir| dir.key())
                    .chain(iter::once('A'))
                    .collect::<String>();
                paths.insert((from_key, to_key), path);
            }
        }

        Ok(Self { paths })
    }

    pub fn path(&self, from_key: char, to_key: char) -> Option<&str> {
        self.paths
            .get(&(from_key, to_key))
            .map(|path| path.as_str())
    }

    pub fn control_keys(&self, target_keys: &str) -> Result<String, Error> {
        let mut control_keys = String::new();
        let mut cur_key = 'A';
        for key in target_keys.chars() {
            let path = self
                .paths
                .get(&(cur_key, key))
                .ok_or(Error::InvalidKey(key))?;
            control_keys.push_str(path);
            cur_key = key;
        }

        Ok(control_keys)
    }

    // Both candidates press one axis to completion before starting the other,
    // left moves ahead of the vertical run and right moves behind it. Between
    // keys of one pad with a single gap, at most one candidate can run through
    // the gap.
    fn route_candidates(from_pos: &Position, to_pos: &Position) -> [Vec<Direction>; 2] {
        let horizontal = if to_pos.c >= from_pos.c {
            iter::repeat_n(Direction::Right, to_pos.c - from_pos.c)
        } else {
            iter::repeat_n(Direction::Left, from_pos.c - to_pos.c)
        };
        let vertical = if to_pos.r >= from_pos.r {
            iter::repeat_n(Direction::Down, to_pos.r - from_pos.r)
        } else {
            iter::repeat_n(Direction::Up, from_pos.r - to_pos.r)
        };

        let horizontal_first = horizontal
            .clone()
            .chain(vertical.clone())
            .collect::<Vec<_>>();
        let vertical_first = vertical.chain(horizontal).collect::<Vec<_>>();
        if to_pos.c < from_pos.c {
            [horizontal_first, vertical_first]
        } else {
            [vertical_first, horizontal_first]
        }
    }
}

#[test]
fn test_self_transition_presses_activate_only() {
    for keypad in [Keypad::new_numeric(), Keypad::new_directional()] {
        let graph = TransitionGraph::new(&keypad).unwrap();
        for (key, _) in keypad.keys() {
            assert!(graph.path(key, key).unwrap() == "A");
        }
    }
}

#[test]
fn test_path_len_is_manhattan_distance_plus_activate() {
    for keypad in [Keypad::new_numeric(), Keypad::new_directional()] {
        let graph = TransitionGraph::new(&keypad).unwrap();
        for (from_key, from_pos) in keypad.keys() {
            for (to_key, to_pos) in keypad.keys() {
                let path = graph.path(from_key, to_key).unwrap();
                let manhattan_distance =
                    from_pos.r.abs_diff(to_pos.r) + from_pos.c.abs_diff(to_pos.c);
                assert!(path.len() == manhattan_distance + 1);
            }
        }
    }
}

#[test]
fn test_no_path_runs_over_gap() {
    for keypad in [Keypad::new_numeric(), Keypad::new_directional()] {
        let graph = TransitionGraph::new(&keypad).unwrap();
        for (from_key, from_pos) in keypad.keys() {
            for (to_key, _) in keypad.keys() {
                let path = graph.path(from_key, to_key).unwrap();
                let mut cur_pos = from_pos.clone();
                for move_key in path.chars().take(path.len() - 1) {
                    let dir = match move_key {
                        '^' => Direction::Up,
                        '>' => Direction::Right,
                        'v' => Direction::Down,
                        '<' => Direction::Left,
                        other => panic!("Unexpected move key({}).", other),
                    };
                    cur_pos = cur_pos.neighbor(dir).unwrap();
                    assert!(keypad.key(&cur_pos).is_some());
                }
            }
        }
    }
}

#[test]
fn test_known_paths_on_numeric_keypad() {
    let graph = TransitionGraph::new(&Keypad::new_numeric()).unwrap();
    assert!(graph.path('A', '0').unwrap() == "<A");
    assert!(graph.path('0', '2').unwrap() == "^A");
    assert!(graph.path('2', '9').unwrap() == "^^>A");
    assert!(graph.path('9', 'A').unwrap() == "vvvA");
    assert!(graph.path('A', '1').unwrap() == "^<<A");
    assert!(graph.path('A', '7').unwrap() == "^^^<<A");
    assert!(graph.path('7', 'A').unwrap() == ">>vvvA");
}

#[test]
fn test_known_paths_on_directional_keypad() {
    let graph = TransitionGraph::new(&Keypad::new_directional()).unwrap();
    assert!(graph.path('A', '<').unwrap() == "v<<A");
    assert!(graph.path('<', 'A').unwrap() == ">>^A");
    assert!(graph.path('^', '>').unwrap() == "v>A");
    assert!(graph.path('>', '^').unwrap() == "<^A");
    assert!(graph.path('v', 'v').unwrap() == "A");
}

#[test]
fn test_control_keys_through_three_keypads() {
    let door_graph = TransitionGraph::new(&Keypad::new_numeric()).unwrap();
    let robot_graph = TransitionGraph::new(&Keypad::new_directional()).unwrap();

    let radiation_robot_keys = door_graph.control_keys("029A").unwrap();
    assert!(radiation_robot_keys == "<A^A^^>AvvvA");

    let low_temperature_robot_keys = robot_graph.control_keys(&radiation_robot_keys).unwrap();
    assert!(low_temperature_robot_keys.len() == 28);

    let human_keys = robot_graph.control_keys(&low_temperature_robot_keys).unwrap();
    assert!(human_keys.len() == 68);
    assert!(29 * human_keys.len() == 1972);
}

#[test]
fn test_example_codes_sum_of_complexities() {
    let door_graph = TransitionGraph::new(&Keypad::new_numeric()).unwrap();
    let robot_graph = TransitionGraph::new(&Keypad::new_directional()).unwrap();

    let mut sum_of_complexities = 0;
    for text in ["029A", "980A", "179A", "456A", "379A"] {
        let code = DoorCode::try_from(text).unwrap();
        let radiation_robot_keys = door_graph.control_keys(code.text()).unwrap();
        let low_temperature_robot_keys =
            robot_graph.control_keys(&radiation_robot_keys).unwrap();
        let human_keys = robot_graph.control_keys(&low_temperature_robot_keys).unwrap();
        sum_of_complexities += code.number() * human_keys.len();
    }

    assert!(sum_of_complexities == 126384);
}

#[test]
fn test_control_keys_reject_off_keypad_key() {
    let graph = TransitionGraph::new(&Keypad::new_numeric()).unwrap();
    assert!(matches!(
        graph.control_keys("02*A"),
        Err(Error::InvalidKey('*'))
    ));
}

#[test]
fn test_report_fully_blocked_key_pair() {
    let keypad = Keypad {
        keys: Vec::from([Some('a'), None, None, Some('b')]),
        row_n: 2,
        col_n: 2,
    };
    assert!(matches!(
        TransitionGraph::new(&keypad),
        Err(Error::BlockedKeyPair('a', 'b'))
    ));
}

#[derive(Debug, Clone)]
pub struct DoorCode {
    text: String,
    number: usize,
}

impl TryFrom<&str> for DoorCode {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let number_text = value
            .strip_suffix('A')
            .ok_or_else(|| Error::InvalidCodeText(value.to_string()))?;
        let number = number_text
            .parse::<usize>()
            .map_err(|_| Error::InvalidCodeText(value.to_string()))?;

        Ok(Self {
            text: value.to_string(),
            number,
        })
    }
}

impl DoorCode {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn number(&self) -> usize {
        self.number
    }
}

#[test]
fn test_door_code_parse() {
    let code = DoorCode::try_from("083A").unwrap();
    assert!(code.text() == "083A");
    assert!(code.number() == 83);

    assert!(matches!(
        DoorCode::try_from("083"),
        Err(Error::InvalidCodeText(_))
    ));
    assert!(matches!(
        DoorCode::try_from("A"),
        Err(Error::InvalidCodeText(_))
    ));
    assert!(matches!(
        DoorCode::try_from("9x3A"),
        Err(Error::InvalidCodeText(_))
    ));
}

pub fn read_door_codes<P: AsRef<Path>>(path: P) -> Result<Vec<DoorCode>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .map(|(ind, line)| {
            line.with_context(|| {
                format!(
                    "Failed to read line {} in given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
            .and_then(|s| {
                DoorCode::try_from(s.as_str())
                    .with_context(|| format!("Failed to parse door code from given line({}).", s))
            })
        })
        .collect()
}
