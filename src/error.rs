//! 에러 타입 정의

use thiserror::Error;

/// 제안서 생성 공통 에러 타입
///
/// `TemplateFormat`/`SourceRead`는 템플릿 엑셀 자체가 사용 불가능한 경우로,
/// 호출자에게 그대로 전파된다. 개별 행의 형식 이상은 에러로 다루지 않고
/// 빈 값/건너뛰기로 흡수한다.
#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("템플릿 형식 에러: {0}")]
    TemplateFormat(String),

    #[error("템플릿 엑셀을 읽을 수 없습니다: {0}")]
    SourceRead(String),

    #[error("Excel 생성 에러: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON 해석 에러: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, ProposalError>;
