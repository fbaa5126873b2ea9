//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizforge.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("requests")?;
    write_if_missing(Path::new("requests/example.toml"), EXAMPLE_REQUEST)?;

    write_if_missing(Path::new("gazetteer.toml"), SAMPLE_GAZETTEER)?;

    println!("\nNext steps:");
    println!("  1. Add the names, places and organizations of your document to gazetteer.toml");
    println!("  2. Run: quizforge validate --request requests/example.toml --input <document>");
    println!("  3. Run: quizforge convert --input <document> --request requests/example.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

default_generator = "template"
temperature = 0.0
max_tokens = 128
max_retries = 3
retry_delay_ms = 1000
output_dir = "./quizforge-output"
gazetteer = "gazetteer.toml"

[generators.template]
type = "template"

[generators.ollama]
type = "ollama"
base_url = "http://localhost:11434"
model = "llama3.1"

[generators.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
model = "gpt-4.1-mini"
"#;

const EXAMPLE_REQUEST: &str = r#"# Up to three sets, filled in order from the start of the document.

[[sets]]
questions = 5
difficulty = "easy"
question_type = "mcq"

[[sets]]
questions = 5
difficulty = "medium"
question_type = "true-false"

[[sets]]
questions = 5
difficulty = "hard"
question_type = "fill-blank"
"#;

const SAMPLE_GAZETTEER: &str = r#"# Entity terms recognized in plain-text input.
# Labels: PERSON, ORG, GPE, DATE, NORP, MONEY, PERCENT, TIME, CARDINAL

numeric_rules = true

[entities]
PERSON = ["Ada Lovelace", "Charles Babbage"]
ORG = ["Royal Society"]
GPE = ["London"]
NORP = ["Victorians"]
"#;
