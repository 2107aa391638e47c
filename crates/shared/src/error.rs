use thiserror::Error;

pub const EMPTY_INPUT_MESSAGE: &str = "검색할 용어를 입력해주세요.";
pub const GENERATION_FAILURE_MESSAGE: &str =
    "AI 모델에서 정의를 가져오는 데 실패했습니다. 네트워크 연결을 확인하거나 나중에 다시 시도해주세요.";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "알 수 없는 오류가 발생했습니다. 다시 시도해주세요.";

/// Recognized failure kinds of a definition lookup. The `Display` text of each
/// variant is safe to show to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("{setting} environment variable not set")]
    ConfigurationMissing { setting: &'static str },
    #[error("{}", GENERATION_FAILURE_MESSAGE)]
    GenerationFailure,
}

/// Message to show for a failed lookup. Recognized kinds anywhere in the chain
/// speak for themselves, everything else gets the generic fallback.
pub fn failure_message(err: &anyhow::Error) -> String {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<LookupError>())
        .map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN_FAILURE_MESSAGE.to_string())
}
