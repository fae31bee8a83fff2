use std::process::Command;

use env_yaml::EnvYamlError;
use env_yaml::env::missing_from_process;

/// Run `program` with the loaded entries added to its environment.
/// Variables already set in this process are passed through unchanged.
pub fn exec(program: &str, args: &[String]) -> Result<(), EnvYamlError> {
    let loaded = env_yaml::load().into_result()?;
    let added = missing_from_process(&loaded);
    tracing::debug!("running {} with {} added variables", program, added.len());

    let mut cmd = Command::new(program);
    cmd.args(args).envs(&added);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        // Only returns if the exec itself failed.
        let err = cmd.exec();
        tracing::error!("Failed to execute '{}': {}", program, err);
        std::process::exit(127);
    }

    #[cfg(not(unix))]
    {
        match cmd.status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(e) => {
                tracing::error!("Failed to execute '{}': {}", program, e);
                std::process::exit(127);
            }
        }
    }
}
