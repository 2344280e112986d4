//! The `leitner init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create leitner.toml
    if std::path::Path::new("leitner.toml").exists() {
        println!("leitner.toml already exists, skipping.");
    } else {
        std::fs::write("leitner.toml", SAMPLE_CONFIG)?;
        println!("Created leitner.toml");
    }

    // Create example vocabulary
    let vocab_path = std::path::Path::new("vocabulary.json");
    if vocab_path.exists() {
        println!("vocabulary.json already exists, skipping.");
    } else {
        std::fs::write(vocab_path, EXAMPLE_VOCABULARY)?;
        println!("Created vocabulary.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit vocabulary.json with your own cards");
    println!("  2. Run: leitner import --vocabulary vocabulary.json");
    println!("  3. Run: leitner review");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# leitner configuration

state_path = "leitner-state.json"
# seed = 42

# Boxes in level order. A box is reviewed every `interval` sessions.
[[boxes]]
name = "daily"
interval = 1

[[boxes]]
name = "every-third"
interval = 3

[[boxes]]
name = "weekly"
interval = 7
"#;

const EXAMPLE_VOCABULARY: &str = r#"[
    {"front": "Gatto", "back": "Cat"},
    {"front": "Cane", "back": "Dog"},
    {"front": "Mela", "back": "Apple"}
]
"#;
