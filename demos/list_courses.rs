//! Lists courses, optionally filtered by external id.
//!
//! Reads `DEGREED_TOKEN` (and optionally `DEGREED_BASE_URL`) from the
//! environment and prints the first page of courses.
//!
//! Run with: `cargo run --example list_courses -- [external-id]`

use degreed::content::courses::CourseListDocument;
use degreed::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("degreed=debug,list_courses=info")
        .init();

    let client = Client::from_env()?;
    let external_id = std::env::args().nth(1);

    match client.courses().all(external_id.as_deref()).await {
        Ok(response) => {
            let page: CourseListDocument = response.json()?;
            println!("{} course(s) in {:?}", page.data.len(), response.latency);
            for course in &page.data {
                println!(
                    "  {} - {}",
                    course.id.as_deref().unwrap_or("?"),
                    course.attributes.title.as_deref().unwrap_or("(untitled)")
                );
            }
            if let Some(next) = response.next_link() {
                println!("More at: {}", next);
            }
        }
        Err(Error::Unauthorized(details)) => {
            eprintln!("Token rejected, set DEGREED_TOKEN: {}", details);
        }
        Err(e) => eprintln!("Request failed: {}", e),
    }

    Ok(())
}
