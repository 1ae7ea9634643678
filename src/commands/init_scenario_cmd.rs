use std::fs::File;
use std::io;

use crate::services::scenario_yaml::{serialize_scenario_to_yaml, template_scenario};

pub fn init_scenario_command(output: &str) -> io::Result<()> {
    let mut file = File::create(output)?;
    serialize_scenario_to_yaml(&mut file, &template_scenario())?;
    println!("Scenario template written to {output}");
    Ok(())
}
