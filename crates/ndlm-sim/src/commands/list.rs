use std::error::Error;

use ndlm_validate::CheckerId;

pub fn run() -> Result<(), Box<dyn Error>> {
    for (idx, id) in CheckerId::ALL.iter().enumerate() {
        println!("{}. {}", idx + 1, id.name());
        println!("   refs: {}", id.equation_refs());
        println!("   {}", id.description());
    }
    Ok(())
}
