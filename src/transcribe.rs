use std::time::Duration;

use log::{debug, warn};

use crate::{Error, TranscriptArtifact, chapters, extract_video_id, reflow, youtube};

/// Per-instance behavior knobs; replaces any ambient provider state
#[derive(Debug, Clone)]
pub struct Options {
    pub lang: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { lang: "en".to_string() }
    }
}

/// Coordinates one extraction: URL → provider calls → reflow → chapters.
/// Stateless across requests; cheap to clone.
#[derive(Clone)]
pub struct Transcriber {
    client: reqwest::Client,
    options: Options,
}

impl Transcriber {
    pub fn new(client: reqwest::Client, options: Options) -> Self {
        Self { client, options }
    }

    /// Produce the complete artifact for a URL or bare video ID
    pub async fn transcribe(&self, input: &str) -> Result<TranscriptArtifact, Error> {
        let video_id = extract_video_id(input).ok_or_else(|| Error::InvalidUrl(input.to_string()))?;
        debug!("Extracted video ID: {video_id}");

        let player = retry(3, || youtube::fetch_player(&self.client, &video_id, &self.options.lang)).await?;

        let info = player.video_info();
        if info.title.is_empty() {
            warn!("No metadata available for {video_id}, using defaults");
        }

        let track = youtube::select_track(player.caption_tracks(), &self.options.lang)
            .ok_or_else(|| Error::NoTranscript(video_id.clone()))?;

        let fragments = retry(3, || youtube::fetch_track(&self.client, track)).await?;

        let body_text = reflow::reflow(&fragments);
        let chapters = chapters::infer(&info.chapters, &info.description);

        Ok(TranscriptArtifact {
            video_id,
            title: info.title,
            body_text,
            chapters,
            duration_seconds: info.duration_seconds,
            uploader: info.uploader,
            upload_date: info.upload_date,
        })
    }
}

/// Retry an async operation with exponential backoff
async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T, Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, Error>>,
{
    let mut last_err = None;
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    debug!("Attempt {} failed: {e}, retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_provider_call() {
        let transcriber = Transcriber::new(reqwest::Client::new(), Options::default());
        let err = transcriber.transcribe("random text").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result: Result<(), Error> = retry(2, || {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async { Err(Error::Provider("boom".into())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_returns_first_success() {
        let result = retry(3, || async { Ok::<_, Error>(42) }).await.unwrap();
        assert_eq!(result, 42);
    }
}
