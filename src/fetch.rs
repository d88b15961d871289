use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::config::Settings;
use crate::document::Page;
use crate::error::FetchError;
use crate::extract;
use crate::record::InteractionRecord;

/// Blocking HTTP fetcher with a fixed timeout and a browser user agent.
/// One attempt per URL, no retries.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Fetcher { client })
    }

    /// Retrieve the raw HTML of one page.
    pub fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| classify(url, e))?;
        info!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// Retrieve and parse one page.
    pub fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.fetch_html(url).map(|html| Page::parse(&html))
    }

    /// Fetch one page and run the extraction pipeline over it.
    pub fn scrape(&self, url: &str) -> Result<InteractionRecord, FetchError> {
        let page = self.fetch(url)?;
        Ok(extract::extract_all(url, &page))
    }

    /// Scrape several candidates on a pool of at most `workers` threads.
    /// Results come back in the order of `urls`; one failure does not stop the rest.
    pub fn scrape_many(
        &self,
        urls: &[String],
        workers: usize,
    ) -> Vec<Result<InteractionRecord, FetchError>> {
        let pb = ProgressBar::new(urls.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
        {
            pb.set_style(style.progress_chars("=> "));
        }

        let scrape_one = |url: &String| {
            let result = self.scrape(url);
            if let Err(e) = &result {
                warn!("Scrape failed for {}: {}", url, e);
            }
            pb.inc(1);
            result
        };

        let results: Vec<Result<InteractionRecord, FetchError>> = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
        {
            Ok(pool) => pool.install(|| urls.par_iter().map(scrape_one).collect()),
            Err(e) => {
                warn!("Worker pool unavailable ({}), scraping sequentially", e);
                urls.iter().map(scrape_one).collect()
            }
        };

        pb.finish_and_clear();
        results
    }
}

fn classify(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    /// Serve one canned response per connection and report each raw request.
    fn serve(responses: Vec<String>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                }
                let _ = tx.send(String::from_utf8_lossy(&request).to_string());
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        (format!("http://{}", addr), rx)
    }

    fn ok(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    fn fetcher(timeout_secs: u64) -> Fetcher {
        Fetcher::new(&Settings {
            timeout_secs,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn fetch_sends_browser_user_agent() {
        let (base, requests) = serve(vec![ok("<h1>Acebutolol and Taurine Interactions</h1>")]);
        let html = fetcher(5).fetch_html(&format!("{}/drug-interactions/a-with-b-1.html", base)).unwrap();
        assert!(html.contains("Acebutolol"));
        let request = requests.recv().unwrap().to_lowercase();
        assert!(request.starts_with("get /drug-interactions/a-with-b-1.html"));
        assert!(request.contains("user-agent: mozilla/5.0"));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (base, _requests) = serve(vec![
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".into(),
        ]);
        let err = fetcher(5).fetch(&format!("{}/missing.html", base)).err().unwrap();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn refused_connection_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = fetcher(5)
            .fetch(&format!("http://127.0.0.1:{}/x.html", port))
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(3));
        });
        let err = fetcher(1).fetch(&format!("http://{}/slow.html", addr)).err().unwrap();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[test]
    fn scrape_extracts_record() {
        let (base, _requests) = serve(vec![ok(
            r#"<h1>Acebutolol and Taurine Interactions</h1><div class="severity">Minor</div>"#,
        )]);
        let url = format!("{}/drug-interactions/acebutolol-with-taurine-1.html", base);
        let record = fetcher(5).scrape(&url).unwrap();
        assert_eq!(record.url, url);
        assert_eq!(record.drug2.as_deref(), Some("Taurine"));
        assert_eq!(record.severity.map(|s| s.label().to_string()).as_deref(), Some("Minor"));
    }

    #[test]
    fn scrape_many_keeps_input_order_and_isolates_failures() {
        let (base, _requests) = serve(vec![
            ok("<h1>A and B Interactions</h1>"),
            ok("<h1>A and B Interactions</h1>"),
        ]);
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let urls = vec![
            format!("{}/one.html", base),
            format!("http://127.0.0.1:{}/dead.html", closed),
            format!("{}/two.html", base),
        ];
        let results = fetcher(5).scrape_many(&urls, 1);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().url, urls[0]);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().url, urls[2]);
    }
}
