//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizforge(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("QUIZFORGE_OPENAI_KEY");
    cmd
}

const DOCUMENT: &str = r#"{
  "sentences": [
    "Ada Lovelace translated the memoir in London.",
    "Charles Babbage designed the Analytical Engine in 1837.",
    "The Royal Society hosted a lecture by Mary Somerville.",
    "In 1843 Ada Lovelace published her famous notes.",
    "Michael Faraday attended the gathering at the Royal Institution.",
    "The engine was never completed in Babbage's lifetime in England."
  ],
  "entities": [
    {"text": "Ada Lovelace", "label": "PERSON", "sentence_index": 0},
    {"text": "London", "label": "GPE", "sentence_index": 0},
    {"text": "Charles Babbage", "label": "PERSON", "sentence_index": 1},
    {"text": "1837", "label": "DATE", "sentence_index": 1},
    {"text": "Royal Society", "label": "ORG", "sentence_index": 2},
    {"text": "Mary Somerville", "label": "PERSON", "sentence_index": 2},
    {"text": "1843", "label": "DATE", "sentence_index": 3},
    {"text": "Ada Lovelace", "label": "PERSON", "sentence_index": 3},
    {"text": "Michael Faraday", "label": "PERSON", "sentence_index": 4},
    {"text": "Royal Institution", "label": "ORG", "sentence_index": 4},
    {"text": "England", "label": "GPE", "sentence_index": 5}
  ]
}"#;

const REQUEST: &str = r#"
[[sets]]
questions = 2
difficulty = "easy"
question_type = "mcq"

[[sets]]
questions = 2
difficulty = "medium"
question_type = "true-false"

[[sets]]
questions = 2
difficulty = "hard"
question_type = "fill-blank"
"#;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("doc.json"), DOCUMENT).unwrap();
    std::fs::write(dir.path().join("request.toml"), REQUEST).unwrap();
    dir
}

/// The single quiz file written to `dir`, parsed.
fn read_output(dir: &Path) -> serde_json::Value {
    let files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("quiz-") && n.ends_with(".json"))
        })
        .collect();
    assert_eq!(files.len(), 1, "expected one quiz file in {}", dir.display());
    serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap()
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("graded quiz sets"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created requests/example.toml"))
        .stdout(predicate::str::contains("Created gazetteer.toml"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("requests/example.toml").exists());
    assert!(dir.path().join("gazetteer.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge(dir.path()).arg("init").assert().success();

    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_validates() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path()).arg("init").assert().success();

    quizforge(dir.path())
        .args(["validate", "--request", "requests/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Request: 3 sets (15 questions)"))
        .stdout(predicate::str::contains("Request valid."));

    quizforge(dir.path())
        .arg("list-generators")
        .assert()
        .success()
        .stdout(predicate::str::contains("template (template) [default]"))
        .stdout(predicate::str::contains("ollama (ollama) model=llama3.1"));
}

#[test]
fn validate_warns_about_short_document() {
    let dir = setup();
    let big = REQUEST.replace("questions = 2", "questions = 5");
    std::fs::write(dir.path().join("big.toml"), big).unwrap();

    quizforge(dir.path())
        .args(["validate", "--request", "big.toml", "--input", "doc.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document: 6 sentences, 11 entities"))
        .stdout(predicate::str::contains("only 6 sentences"));
}

#[test]
fn validate_rejects_unknown_difficulty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        "[[sets]]\nquestions = 2\ndifficulty = \"extreme\"\nquestion_type = \"mcq\"\n",
    )
    .unwrap();

    quizforge(dir.path())
        .args(["validate", "--request", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .args(["validate", "--request", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn convert_fills_three_sets_in_order() {
    let dir = setup();

    quizforge(dir.path())
        .args([
            "convert",
            "--input",
            "doc.json",
            "--request",
            "request.toml",
            "--seed",
            "7",
            "--output",
            "out",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Set-C"))
        .stderr(predicate::str::contains("Quiz saved to"));

    let output = read_output(&dir.path().join("out"));
    assert_eq!(output["total_questions"], 6);
    assert!(output["text_preview"]
        .as_str()
        .unwrap()
        .starts_with("Ada Lovelace translated"));

    let sets = output["quiz"]["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 3);
    let indices: Vec<Vec<u64>> = sets
        .iter()
        .map(|s| {
            s["questions"]
                .as_array()
                .unwrap()
                .iter()
                .map(|q| q["sentence_index"].as_u64().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(indices, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);

    for q in sets[0]["questions"].as_array().unwrap() {
        assert_eq!(q["choices"].as_array().unwrap().len(), 4);
    }
    assert_eq!(sets[1]["question_type"], "true-false");
    assert_eq!(output["difficulty_summary"][2]["difficulty"], "hard");
    assert_eq!(output["difficulty_summary"][2]["generated"], 2);
}

#[test]
fn convert_is_reproducible_with_seed() {
    let dir = setup();

    for out in ["first", "second"] {
        quizforge(dir.path())
            .args([
                "convert", "--input", "doc.json", "--set", "3:medium:mcq", "--set",
                "3:hard:tf", "--seed", "42", "--output", out,
            ])
            .assert()
            .success();
    }

    let first = read_output(&dir.path().join("first"));
    let second = read_output(&dir.path().join("second"));
    assert_eq!(first["quiz"]["sets"], second["quiz"]["sets"]);
    assert_ne!(first["quiz"]["id"], second["quiz"]["id"]);
}

#[test]
fn convert_plain_text_with_gazetteer() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("notes.txt"),
        "Ada Lovelace worked closely with Charles Babbage.\n\n\
         The Royal Society met in London during 1843.",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("gazetteer.toml"),
        "[entities]\nPERSON = [\"Ada Lovelace\", \"Charles Babbage\"]\nORG = [\"Royal Society\"]\nGPE = [\"London\"]\n",
    )
    .unwrap();

    quizforge(dir.path())
        .args([
            "convert",
            "--input",
            "notes.txt",
            "--gazetteer",
            "gazetteer.toml",
            "--set",
            "2:easy:fill-blank",
            "--seed",
            "1",
            "--output",
            "out",
        ])
        .assert()
        .success();

    let output = read_output(&dir.path().join("out"));
    assert_eq!(output["total_questions"], 2);
    let answers: Vec<&str> = output["quiz"]["sets"][0]["answer_key"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["answer"].as_str().unwrap())
        .collect();
    assert_eq!(answers, vec!["Charles Babbage", "Royal Society"]);
}

#[test]
fn convert_partial_set_when_document_runs_out() {
    let dir = setup();

    quizforge(dir.path())
        .args([
            "convert", "--input", "doc.json", "--set", "10:easy:fill-blank", "--seed", "3",
            "--output", "out",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("(partial)"));

    let output = read_output(&dir.path().join("out"));
    assert_eq!(output["total_questions"], 6);
    assert_eq!(output["difficulty_summary"][0]["requested"], 10);
}

#[test]
fn convert_rejects_too_many_sets() {
    let dir = setup();

    quizforge(dir.path())
        .args([
            "convert", "--input", "doc.json", "--set", "1:easy:mcq", "--set", "1:easy:mcq",
            "--set", "1:easy:mcq", "--set", "1:easy:mcq",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 3"));
}

#[test]
fn convert_rejects_unknown_generator() {
    let dir = setup();

    quizforge(dir.path())
        .args([
            "convert", "--input", "doc.json", "--set", "1:easy:mcq", "--generator", "gpt-9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown generator 'gpt-9'"));
}
