//! HTTP 이미지 소스.
//!
//! `ImageSource` 포트 구현. 한 번의 GET으로 원시 바이트를 받아온다.
//! 재시도는 하지 않는다. 실패한 폴링은 다음 주기에 다시 시도된다.

use async_trait::async_trait;
use facecam_core::config::SourceConfig;
use facecam_core::error::CoreError;
use facecam_core::ports::vision::ImageSource;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// 캐시 우회 쿼리 파라미터 이름
const CACHE_BUST_PARAM: &str = "_ts";

fn fetch_error(url: &str, message: impl Into<String>) -> CoreError {
    CoreError::Fetch {
        url: url.to_string(),
        message: message.into(),
    }
}

/// `url`에 `_ts=<unix millis>`를 덧붙인다 (기존 쿼리는 유지)
pub fn cache_busted(url: &str, millis: i64) -> Result<String, CoreError> {
    let mut parsed =
        Url::parse(url).map_err(|e| fetch_error(url, format!("URL 파싱 실패: {e}")))?;
    parsed
        .query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &millis.to_string());
    Ok(parsed.into())
}

/// HTTP(S) 이미지 소스: `ImageSource` 포트 구현
pub struct HttpImageSource {
    client: reqwest::Client,
    cache_bust: bool,
}

impl HttpImageSource {
    /// 소스 설정으로 클라이언트 생성 (타임아웃 + User-Agent)
    pub fn new(config: &SourceConfig) -> Result<Self, CoreError> {
        Self::build(config.timeout(), &config.user_agent, config.cache_bust)
    }

    fn build(timeout: Duration, user_agent: &str, cache_bust: bool) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self { client, cache_bust })
    }

    fn request_url(&self, url: &str) -> Result<String, CoreError> {
        if self.cache_bust {
            cache_busted(url, chrono::Utc::now().timestamp_millis())
        } else {
            Ok(url.to_string())
        }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CoreError> {
        let request_url = self.request_url(url)?;
        debug!("이미지 요청: {request_url}");

        let resp = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    fetch_error(url, format!("요청 타임아웃: {e}"))
                } else {
                    fetch_error(url, format!("요청 실패: {e}"))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fetch_error(url, format!("HTTP {}", status.as_u16())));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| fetch_error(url, format!("본문 읽기 실패: {e}")))?;

        debug!("이미지 수신: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
