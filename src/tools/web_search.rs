// ABOUTME: Web search capability - the SearchProvider trait and a DuckDuckGo backend.
// ABOUTME: Scrapes the DuckDuckGo HTML endpoint into numbered text results.

use std::time::Duration;

use async_trait::async_trait;

/// A single-query web search returning text for an agent to read.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, anyhow::Error>;
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Search backend using DuckDuckGo's HTML endpoint.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoSearch {
    /// Create a backend returning at most `max_results` results per query.
    pub fn new(max_results: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                "Mozilla/5.0 (compatible; artctx/",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()?;
        Ok(Self::with_client(client, max_results))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, max_results: usize) -> Self {
        Self {
            client,
            max_results,
        }
    }

    /// Parse DuckDuckGo HTML search results.
    fn parse_results(html: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        let mut remaining = html;

        while let Some(start) = remaining.find("class=\"result__a\"") {
            remaining = &remaining[start..];

            let Some(url) = Self::extract_href(remaining) else {
                remaining = &remaining[1..];
                continue;
            };

            // Title is the anchor text.
            let title = remaining
                .find('>')
                .and_then(|gt| {
                    let after = &remaining[gt + 1..];
                    after.find("</a>").map(|end| Self::strip_tags(&after[..end]))
                })
                .unwrap_or_default();

            // The snippet belongs to this result only if it precedes the next one.
            let next_result = remaining[1..]
                .find("class=\"result__a\"")
                .map_or(remaining.len(), |p| p + 1);
            let snippet = remaining[..next_result]
                .find("class=\"result__snippet\"")
                .and_then(|s| {
                    let content = &remaining[s..];
                    let gt = content.find('>')?;
                    let after = &content[gt + 1..];
                    let end = after.find("</a>").or_else(|| after.find("</div>"))?;
                    Some(Self::strip_tags(&after[..end]))
                })
                .unwrap_or_default();

            if !url.is_empty() && !title.trim().is_empty() {
                results.push(SearchResult {
                    title: title.trim().to_string(),
                    url,
                    snippet: snippet.trim().to_string(),
                });
            }

            remaining = &remaining[1..];
        }

        results
    }

    /// Extract the target URL from an anchor, unwrapping DuckDuckGo redirects.
    fn extract_href(anchor: &str) -> Option<String> {
        let href_start = anchor.find("href=\"")? + 6;
        let href = &anchor[href_start..];
        let raw = &href[..href.find('"')?];

        let Some(pos) = raw.find("uddg=") else {
            return Some(raw.to_string());
        };
        let encoded = &raw[pos + 5..];
        let encoded = encoded.split('&').next().unwrap_or(encoded);
        Some(
            urlencoding::decode(encoded)
                .map(|s| s.into_owned())
                .unwrap_or_default(),
        )
    }

    fn strip_tags(html: &str) -> String {
        let mut text = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }
        text.replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
    }

    /// Render results as the numbered block handed to the agent.
    fn format_results(query: &str, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return format!("No results found for \"{}\".", query);
        }

        let mut output = format!("Found {} results for \"{}\":\n\n", results.len(), query);
        for (i, result) in results.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}\n   {}\n   {}\n\n",
                i + 1,
                result.title,
                result.url,
                if result.snippet.is_empty() {
                    "(no snippet)"
                } else {
                    &result.snippet
                }
            ));
        }
        output
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<String, anyhow::Error> {
        let url = format!(
            "https://html.duckduckgo.com/html/?q={}",
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("search failed with status: {}", status);
        }

        let html = response.text().await?;
        let results: Vec<_> = Self::parse_results(&html)
            .into_iter()
            .take(self.max_results)
            .collect();

        tracing::debug!(query, count = results.len(), "web search complete");
        Ok(Self::format_results(query, &results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<div class="result">
  <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FFrida_Kahlo&amp;rut=abc">Frida <b>Kahlo</b> - Wikipedia</a>
  <a class="result__snippet" href="x">Mexican painter known for <b>self-portraits</b>.</a>
</div>
<div class="result">
  <a rel="nofollow" class="result__a" href="https://www.moma.org/artists/2963">Frida Kahlo | MoMA</a>
</div>
"#;

    #[test]
    fn test_strip_tags() {
        let text = DuckDuckGoSearch::strip_tags("<b>Bold</b> &amp; <i>italic</i>");
        assert_eq!(text, "Bold & italic");
    }

    #[test]
    fn test_parse_empty_results() {
        let results = DuckDuckGoSearch::parse_results("<html><body>No results</body></html>");
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_results_unwraps_redirects() {
        let results = DuckDuckGoSearch::parse_results(SAMPLE);
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Frida Kahlo - Wikipedia");
        assert_eq!(results[0].url, "https://en.wikipedia.org/wiki/Frida_Kahlo");
        assert_eq!(results[0].snippet, "Mexican painter known for self-portraits.");

        assert_eq!(results[1].url, "https://www.moma.org/artists/2963");
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_format_results() {
        let results = DuckDuckGoSearch::parse_results(SAMPLE);
        let text = DuckDuckGoSearch::format_results("frida kahlo", &results);
        assert!(text.starts_with("Found 2 results for \"frida kahlo\":"));
        assert!(text.contains("1. Frida Kahlo - Wikipedia"));
        assert!(text.contains("(no snippet)"));

        let empty = DuckDuckGoSearch::format_results("nothing", &[]);
        assert_eq!(empty, "No results found for \"nothing\".");
    }
}
