use anyhow::Result;
use regex::Regex;
use rule_chain::{Outcome, Validator};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("=== Username Validation Demo ===");

    let registered = ["admin", "root"];
    let lowercase = Regex::new("^[a-z]+$")?;

    let validator = Validator::new()
        .rule(|v: &String| !v.is_empty(), "is required")
        .rule(
            move |v: &String| lowercase.is_match(v),
            "must be lowercase letters only",
        )
        .rule_async(
            move |v: &String| {
                let taken = registered.contains(&v.as_str());
                async move { Ok(!taken) }
            },
            "is already registered",
        );

    let candidates = ["hello", "Hello", "", "admin", "guest"];

    for candidate in candidates {
        let outcome = validator.validate(&candidate.to_string()).await?;
        match outcome {
            Outcome::Valid => println!("Input: {:?} -> valid", candidate),
            Outcome::Invalid(Some(reason)) => {
                println!("Input: {:?} -> invalid: username {}", candidate, reason)
            }
            Outcome::Invalid(None) => println!("Input: {:?} -> invalid", candidate),
        }
    }

    Ok(())
}
