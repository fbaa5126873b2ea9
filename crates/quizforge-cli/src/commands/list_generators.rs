//! The `quizforge list-generators` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_providers::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    println!("Generators:");
    for name in config.generator_names() {
        let Some(generator) = config.generator(&name) else {
            continue;
        };
        let mut line = format!("  {name} ({})", generator.kind());
        if let Some(model) = generator.model() {
            line.push_str(&format!(" model={model}"));
        }
        if let Some(endpoint) = generator.endpoint() {
            line.push_str(&format!(" endpoint={endpoint}"));
        }
        if name == config.default_generator {
            line.push_str(" [default]");
        }
        println!("{line}");
    }

    if config.generators.is_empty() {
        println!("\nOnly the built-in template generator is available. Run `quizforge init` to create a config file.");
    }

    Ok(())
}
