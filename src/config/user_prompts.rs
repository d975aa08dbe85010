//! Interactive prompts used by configuration commands

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Asks for a new API domain on stdin. An empty answer keeps `current`.
///
/// # Example
/// ```no_run
/// use league_lens::config::user_prompts::prompt_for_api_domain;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api_domain = prompt_for_api_domain("https://www.thesportsdb.com/api/v1/json/3").await?;
/// println!("Using API domain: {}", api_domain);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_api_domain(current: &str) -> Result<String, AppError> {
    println!("Please enter your API domain [{current}]: ");
    let mut input = String::new();
    let mut reader = io::BufReader::new(io::stdin());
    reader.read_line(&mut input).await?;
    Ok(choose_domain(&input, current))
}

fn choose_domain(input: &str, current: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        current.to_string()
    } else {
        input.to_string()
    }
}
