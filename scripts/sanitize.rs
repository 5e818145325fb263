//! Run with: cargo run --bin sanitize < reply.txt
//!
//! Shows what the chat view would display for a raw assistant reply.

use std::io::Read;

use fashion_assistant::config::api::ApiConfig;
use fashion_assistant::services::sanitizer::Sanitizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    let sanitizer = Sanitizer::new(&config.product_image_prefix)?;

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    let reply = sanitizer.sanitize(&raw);

    println!("Text:\n{}\n", reply.clean_text);
    println!("Images ({}):", reply.image_urls.len());
    for url in &reply.image_urls {
        println!("  - {}", url);
    }

    Ok(())
}
