use std::io::Write;

use sevens_ai::{STRATEGY_NAMES, create_strategy};

use crate::error::CliError;

/// Lists each built-in as `builtin:<name>` next to the name it plays under.
pub fn handle_strategies_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Built-in strategies:")?;
    for name in STRATEGY_NAMES {
        let strategy =
            create_strategy(name).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        writeln!(out, "  builtin:{:<20} {}", name, strategy.name())?;
    }
    Ok(())
}
