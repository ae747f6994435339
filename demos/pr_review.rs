use diffrev::{ApiKey, ClientConfig, CompletionClient, ReviewRequest, ReviewTemplate};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = ClientConfig::new("gpt-4o-mini")
        .with_template(ReviewTemplate::PullRequest)
        .with_temperature(0.2);
    let client = CompletionClient::new(config, ApiKey::Default)?;

    let request = ReviewRequest {
        title: "Cache parsed manifests".to_string(),
        body: "Avoids re-reading the manifest on every lookup.".to_string(),
        filename: None,
        changes: r#"--- a/src/manifest.rs
+++ b/src/manifest.rs
@@ -10,7 +10,9 @@
-    pub fn load(path: &Path) -> Result<Manifest> {
-        let text = fs::read_to_string(path)?;
-        toml::from_str(&text)
+    pub fn load(path: &Path) -> Result<Manifest> {
+        if let Some(cached) = CACHE.get(path) {
+            return Ok(cached.clone());
+        }
+        let text = fs::read_to_string(path)?;
+        toml::from_str(&text)
"#
        .to_string(),
    };

    let review = client.get_completion(&client.get_pr_prompt(&request)).await?;
    println!("{review}");

    Ok(())
}
