//! 기업 임직원 건강검진 제안서 생성 라이브러리
//!
//! 템플릿 엑셀에서 금액대 옵션을 읽고(load_price_options),
//! 플랜 구성에 맞는 항목 테이블을 파싱해(parse_items),
//! HTML(render_document)과 Excel(render_workbook) 제안서를 만든다.
//! 대화형 UI는 이 라이브러리의 호출자이며 여기 포함되지 않는다.

pub mod content;
pub mod defaults;
pub mod error;
pub mod export;
pub mod merge;
pub mod parser;
pub mod template;
pub mod types;

pub use content::{proposal_title, ProposalText};
pub use defaults::DefaultsTable;
pub use error::{ProposalError, Result};
pub use export::{render_document, render_document_with_text, render_workbook, render_workbook_with_text};
pub use merge::{compute_spans, display_grid, display_value, SpanGrid};
pub use parser::parse_items;
pub use template::load_price_options;
pub use types::{
    Category, GroupDefaults, Identity, Item, ParsedData, Plan, PriceTierOption, SummaryEntry,
};
