use std::time::Duration;

use diffrev::{
    ApiKey, ClientConfig, CompletionClient, HttpClientConfig, ReviewRequest, ReviewTemplate,
};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diffrev=debug".into()),
        )
        .init();

    // Tighter policy for rate-limited environments: wait less per attempt,
    // give up sooner overall.
    let resilient = HttpClientConfig {
        timeout: Duration::from_secs(60),
        max_elapsed: Duration::from_secs(120),
        initial_retry_delay: Duration::from_secs(2),
        max_retry_delay: Duration::from_secs(15),
    };

    let config = ClientConfig::new("gpt-4o-mini")
        .with_template(ReviewTemplate::File)
        .with_http_config(resilient);
    let client = CompletionClient::new(config, ApiKey::Default)?;

    let request = ReviewRequest {
        title: String::new(),
        body: String::new(),
        filename: Some("src/retry.rs".to_string()),
        changes: r#"@@ -4,6 +4,8 @@
-    let delay = base * attempt;
+    let delay = base * 2u64.pow(attempt);
+    thread::sleep(Duration::from_millis(delay));
"#
        .to_string(),
    };

    let review = client
        .get_completion(&client.get_file_prompt(&request))
        .await?;
    println!("{review}");

    Ok(())
}
