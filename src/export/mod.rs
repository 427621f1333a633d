//! 제안서 출력 (HTML / Excel)

pub mod excel;
pub mod html;

pub use excel::{render_workbook, render_workbook_with_text};
pub use html::{render_document, render_document_with_text};
