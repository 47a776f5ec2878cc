//! facecam 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 타입을 그대로 반환한다. 코어 내부에서는 재시도하지 않으며,
//! 재시도/백오프 정책은 폴링 드라이버(`facecam-app`)의 몫이다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 이미지 다운로드, 디코딩, 도메인 검증, 설정 등 파이프라인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 이미지 다운로드 실패 (연결 실패, 타임아웃, 2xx 이외 응답)
    #[error("이미지 다운로드 실패 ({url}): {message}")]
    Fetch {
        /// 요청 URL
        url: String,
        /// 실패 사유
        message: String,
    },

    /// 이미지 디코딩 실패 (지원하지 않는 포맷, 손상된 데이터)
    #[error("이미지 디코딩 실패: {0}")]
    Decode(String),

    /// 파라미터 도메인이 퇴화했거나 뒤집힘
    #[error("잘못된 파라미터 도메인: u=[{u_min}, {u_max}], v=[{v_min}, {v_max}]")]
    InvalidDomain {
        u_min: f64,
        u_max: f64,
        v_min: f64,
        v_max: f64,
    },

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 호스트 렌더링 표면이 거부함
    #[error("호스트 에러: {0}")]
    Host(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 다음 폴링 주기에 저절로 해소될 수 있는 에러인지 판별
    ///
    /// 웹캠 서버는 쓰기 도중의 JPEG를 돌려주는 일이 잦으므로 디코딩 실패도 일시적으로 본다.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Fetch { .. } | CoreError::Decode(_))
    }

    /// `Validation` 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
