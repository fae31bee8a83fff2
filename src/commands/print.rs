use std::io::{self, Write};

use env_yaml::EnvYamlError;
use env_yaml::display::{format_json_output, format_lines};

use crate::OutputFormat;

/// Print the loaded entries. Nothing is written to stdout when loading or
/// quoting reported an error.
pub fn print(format: &OutputFormat, export: bool) -> Result<(), EnvYamlError> {
    let rendered = match format {
        OutputFormat::Env => {
            let lines = env_yaml::shell_escaped().into_result()?;
            format_lines(&lines, export)
        }
        OutputFormat::Json => {
            let env = env_yaml::load().into_result()?;
            let mut json = format_json_output(&env);
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
