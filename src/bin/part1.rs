use anyhow::{Context, Result};
use clap::Parser;
use day21::{CLIArgs, DoorCode, Keypad, TransitionGraph};

const DOOR_CODES: &str = "\
083A
935A
964A
149A
789A";

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let door_codes = match &args.input_path {
        Some(path) => day21::read_door_codes(path).with_context(|| {
            format!(
                "Failed to read door codes from given file({}).",
                path.display()
            )
        })?,
        None => DOOR_CODES
            .lines()
            .map(|line| {
                DoorCode::try_from(line).with_context(|| {
                    format!("Failed to parse door code from built-in line({}).", line)
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    let door_graph = TransitionGraph::new(&Keypad::new_numeric())?;
    let robot_graph = TransitionGraph::new(&Keypad::new_directional())?;

    let mut sum_of_complexities = 0;
    for code in &door_codes {
        let radiation_robot_keys = door_graph.control_keys(code.text())?;
        let low_temperature_robot_keys = robot_graph.control_keys(&radiation_robot_keys)?;
        let human_keys = robot_graph.control_keys(&low_temperature_robot_keys)?;
        println!(
            "Code {} takes {}, {} then {} presses down the robot chain, complexity {}.",
            code.text(),
            radiation_robot_keys.len(),
            low_temperature_robot_keys.len(),
            human_keys.len(),
            code.number() * human_keys.len()
        );
        sum_of_complexities += code.number() * human_keys.len();
    }

    println!(
        "The sum of complexities of given door codes is {}.",
        sum_of_complexities
    );

    Ok(())
}
