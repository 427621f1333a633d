//! Excel 제안서 생성
//!
//! HTML 렌더러와 같은 섹션 구성을 rust_xlsxwriter 워크북으로 재현한다.
//! 세로 병합은 merge 모듈의 SpanGrid를 merge_range로 그대로 옮기고,
//! 요약 섹션 뒤와 C그룹 테이블 뒤에 인쇄용 페이지 나누기를 넣는다.

use crate::content::{proposal_title, ProposalText};
use crate::error::Result;
use crate::merge::{compute_spans, display_grid, SpanGrid};
use crate::types::{Identity, Item, ParsedData, Plan, SummaryEntry};
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// A4 용지 코드
const PAPER_A4: u8 = 9;
const SHEET_NAME: &str = "제안서";
const ITEM_COL_WIDTH: f64 = 32.0;
const PLAN_COL_WIDTH: f64 = 20.0;

const NAVY: u32 = 0x2C3E50;
const DARK_NAVY: u32 = 0x1A253A;
const GRAY: u32 = 0x7F8C8D;
const HEADER_FILL: u32 = 0xF0F2F5;
const SUMMARY_FILL: u32 = 0x34495E;
const GROUP_A_FILL: u32 = 0x566573;
const GROUP_B_FILL: u32 = 0x7F8C8D;
const GROUP_C_FILL: u32 = 0x2C3E50;

/// 렌더링에 쓰는 포맷 모음
struct Palette {
    title: Format,
    subtitle: Format,
    plain: Format,
    contact_label: Format,
    contact_name: Format,
    contact_info: Format,
    section_title: Format,
    box_body: Format,
    dark_header: Format,
    summary_header: Format,
    summary_label: Format,
    table_header: Format,
    item_name: Format,
    cell: Format,
    cell_bold: Format,
    cell_select: Format,
    footnote: Format,
}

impl Palette {
    fn new() -> Self {
        let bordered = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(0xCCCCCC))
        };
        Self {
            title: Format::new().set_bold().set_font_size(16.0).set_font_color(Color::RGB(DARK_NAVY)),
            subtitle: Format::new().set_bold().set_font_size(14.0),
            plain: Format::new(),
            contact_label: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(GRAY))
                .set_align(FormatAlign::Right),
            contact_name: Format::new()
                .set_bold()
                .set_font_size(12.0)
                .set_align(FormatAlign::Right),
            contact_info: Format::new().set_align(FormatAlign::Right),
            section_title: Format::new()
                .set_bold()
                .set_font_size(12.0)
                .set_font_color(Color::RGB(NAVY))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Medium)
                .set_border_color(Color::RGB(NAVY)),
            box_body: Format::new()
                .set_text_wrap()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Medium)
                .set_border_color(Color::RGB(NAVY)),
            dark_header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(NAVY))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            summary_header: bordered()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(SUMMARY_FILL))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            summary_label: bordered()
                .set_bold()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            table_header: bordered()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_font_color(Color::RGB(NAVY))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            item_name: bordered()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            cell: bordered()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            cell_bold: bordered()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            cell_select: bordered()
                .set_bold()
                .set_font_color(Color::RGB(NAVY))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            footnote: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(NAVY))
                .set_align(FormatAlign::Right),
        }
    }
}

/// 기본 문구로 Excel 제안서를 생성한다
pub fn render_workbook(
    plans: &[Plan],
    data: &ParsedData,
    summary: &[SummaryEntry],
    identity: &Identity,
) -> Result<Vec<u8>> {
    render_workbook_with_text(plans, data, summary, identity, &ProposalText::default())
}

/// 지정한 문구 설정으로 Excel 제안서를 생성한다
pub fn render_workbook_with_text(
    plans: &[Plan],
    data: &ParsedData,
    summary: &[SummaryEntry],
    identity: &Identity,
    text: &ProposalText,
) -> Result<Vec<u8>> {
    let palette = Palette::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_paper_size(PAPER_A4);
    worksheet.set_margins(0.5, 0.5, 0.5, 0.5, -1.0, -1.0);

    // 마지막 데이터 컬럼(0-base). 담당자 블록 때문에 최소 3컬럼을 쓴다.
    let last_col = ((plans.len() + 1).max(3) - 1) as u16;
    let mut breaks: Vec<u32> = Vec::new();

    write_heading(worksheet, &palette, identity, text, last_col)?;
    let mut row: u32 = 5;

    row = write_guide_box(worksheet, &palette, text, row, last_col)?;
    row = write_group_glossary(worksheet, &palette, text, row, last_col)?;
    row = write_summary(worksheet, &palette, text, plans, summary, row)?;

    // 1~3 섹션까지가 1페이지
    breaks.push(row);
    row += 1;

    row = write_section(worksheet, &palette, &text.section_a_title, &data.a, plans, row, true, false, None)?;
    row = write_section(worksheet, &palette, &text.section_b_title, &data.b, plans, row, true, false, Some(&text.footnote_b))?;
    row = write_section(worksheet, &palette, &text.section_c_title, &data.c, plans, row, true, false, Some(&text.footnote_c))?;

    breaks.push(row);
    row += 1;

    let mut equip_common: Vec<Item> = data.equip.clone();
    equip_common.extend(data.common_blood.iter().cloned());
    row = write_section(worksheet, &palette, &text.section_equip_title, &equip_common, plans, row, false, true, None)?;

    worksheet.merge_range(row + 1, 0, row + 1, last_col, &text.footer, &palette.plain)?;

    worksheet.set_column_width(0, ITEM_COL_WIDTH)?;
    for i in 0..plans.len() {
        worksheet.set_column_width((i + 1) as u16, PLAN_COL_WIDTH)?;
    }
    worksheet.set_page_breaks(&breaks)?;

    let bytes = workbook.save_to_buffer()?;
    Ok(bytes)
}

/// 병원명/제목/제안일자와 우상단 담당자 블록
fn write_heading(
    worksheet: &mut Worksheet,
    palette: &Palette,
    identity: &Identity,
    text: &ProposalText,
    last_col: u16,
) -> Result<()> {
    let title = proposal_title(&identity.company);
    let today = Local::now().format("%Y-%m-%d").to_string();
    let manager = if identity.manager_name.trim().is_empty() {
        "담당자".to_string()
    } else {
        identity.manager_name.trim().to_string()
    };

    worksheet.write_string_with_format(0, 0, &text.hospital_name, &palette.title)?;
    worksheet.write_string_with_format(1, 0, &title, &palette.subtitle)?;
    worksheet.write_string_with_format(2, 0, &format!("제안일자: {}", today), &palette.plain)?;

    worksheet.merge_range(0, last_col - 1, 0, last_col, "담당자", &palette.contact_label)?;
    worksheet.merge_range(1, last_col - 1, 1, last_col, &format!("{} 팀장", manager), &palette.contact_name)?;
    worksheet.merge_range(2, last_col - 1, 2, last_col, &identity.manager_phone, &palette.contact_info)?;
    worksheet.merge_range(3, last_col - 1, 3, last_col, &identity.manager_email, &palette.contact_info)?;
    Ok(())
}

/// 섹션 1: 유동적 그룹 선택 안내 박스 (제목 + 7행 병합 본문)
fn write_guide_box(
    worksheet: &mut Worksheet,
    palette: &Palette,
    text: &ProposalText,
    start: u32,
    last_col: u16,
) -> Result<u32> {
    worksheet.merge_range(start, 0, start, last_col, &text.flexible_title, &palette.section_title)?;

    let mut body_lines: Vec<&str> = text.flexible_rules.iter().map(String::as_str).collect();
    body_lines.push("");
    body_lines.extend(text.flexible_note.iter().map(String::as_str));
    body_lines.push(&text.flexible_example);
    let body = body_lines.join("\n");

    let body_start = start + 1;
    let body_end = body_start + 6;
    worksheet.merge_range(body_start, 0, body_end, last_col, &body, &palette.box_body)?;
    for r in body_start..=body_end {
        worksheet.set_row_height(r, 25)?;
    }
    Ok(body_end + 2)
}

/// 섹션 2: 공통 항목과 A/B/C 그룹 구성 박스
fn write_group_glossary(
    worksheet: &mut Worksheet,
    palette: &Palette,
    text: &ProposalText,
    start: u32,
    last_col: u16,
) -> Result<u32> {
    worksheet.merge_range(start, 0, start, last_col, &text.groups_title, &palette.section_title)?;
    let mut row = start + 1;

    // 공통 항목: 헤더 1행 + 본문 5행
    worksheet.merge_range(row, 0, row, last_col, &text.common_header, &palette.dark_header)?;
    row += 1;
    worksheet.merge_range(row, 0, row + 4, last_col, &text.common_items, &palette.box_body)?;
    for r in row..row + 5 {
        worksheet.set_row_height(r, 20)?;
    }
    row += 5;

    // A/B/C 그룹 박스: 헤더 1컬럼 + 본문 병합, 각 4행
    let groups: [(&str, &str, u32, u32); 3] = [
        (&text.group_a_header, &text.group_a_items, GROUP_A_FILL, 40),
        (&text.group_b_header, &text.group_b_items, GROUP_B_FILL, 25),
        (&text.group_c_header, &text.group_c_items, GROUP_C_FILL, 21),
    ];
    for (header, items, fill, height) in groups {
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(fill))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        worksheet.merge_range(row, 0, row + 3, 0, header, &header_format)?;
        worksheet.merge_range(row, 1, row + 3, last_col, items, &palette.box_body)?;
        for r in row..row + 4 {
            worksheet.set_row_height(r, height as f64)?;
        }
        row += 4;
    }
    Ok(row + 1)
}

/// 섹션 3: 플랜별 규칙 요약 테이블
fn write_summary(
    worksheet: &mut Worksheet,
    palette: &Palette,
    text: &ProposalText,
    plans: &[Plan],
    summary: &[SummaryEntry],
    start: u32,
) -> Result<u32> {
    worksheet.write_string_with_format(start, 0, &text.summary_title, &palette.subtitle)?;
    let mut row = start + 1;

    worksheet.write_string_with_format(row, 0, "구분", &palette.summary_header)?;
    for (i, plan) in plans.iter().enumerate() {
        worksheet.write_string_with_format(row, (i + 1) as u16, &plan.name, &palette.summary_header)?;
    }
    row += 1;

    let summary_rows: [(&str, Vec<&str>); 3] = [
        ("A그룹", summary.iter().map(|s| s.a.as_str()).collect()),
        ("B그룹", summary.iter().map(|s| s.b.as_str()).collect()),
        ("C그룹", summary.iter().map(|s| s.c.as_str()).collect()),
    ];
    for (label, vals) in &summary_rows {
        worksheet.write_string_with_format(row, 0, *label, &palette.summary_label)?;
        for (i, val) in vals.iter().enumerate() {
            worksheet.write_string_with_format(row, (i + 1) as u16, *val, &palette.cell)?;
        }
        row += 1;
    }
    Ok(row + 1)
}

/// 섹션 4~7: 카테고리 상세 테이블 하나
#[allow(clippy::too_many_arguments)]
fn write_section(
    worksheet: &mut Worksheet,
    palette: &Palette,
    title: &str,
    items: &[Item],
    plans: &[Plan],
    start: u32,
    merge: bool,
    show_sub: bool,
    footnote: Option<&str>,
) -> Result<u32> {
    if items.is_empty() {
        return Ok(start);
    }

    worksheet.write_string_with_format(start, 0, title, &palette.subtitle)?;
    let header_row = start + 1;
    worksheet.write_string_with_format(header_row, 0, "검사 항목", &palette.table_header)?;
    for (i, plan) in plans.iter().enumerate() {
        worksheet.write_string_with_format(header_row, (i + 1) as u16, &plan.name, &palette.table_header)?;
    }

    let grid = display_grid(items);
    let spans = if merge {
        compute_spans(&grid)
    } else {
        SpanGrid::unit(grid.len(), plans.len())
    };

    let data_start = header_row + 1;
    for (r, item) in items.iter().enumerate() {
        let row = data_start + r as u32;
        let mut name = if show_sub && !item.category_tag.is_empty() {
            format!("[{}] {}", item.category_tag, item.name)
        } else {
            item.name.clone()
        };
        if !item.description.is_empty() {
            name.push_str(&format!("\n{}", item.description));
        }
        worksheet.write_string_with_format(row, 0, &name, &palette.item_name)?;

        for c in 0..plans.len() {
            if spans.is_absorbed(r, c) {
                continue;
            }
            let val = &grid[r][c];
            let format = if val == "O" {
                &palette.cell_bold
            } else if val.contains("선택") {
                &palette.cell_select
            } else {
                &palette.cell
            };
            let col = (c + 1) as u16;
            let span = spans.span(r, c);
            if span > 1 {
                worksheet.merge_range(row, col, row + span as u32 - 1, col, val, format)?;
            } else if val.is_empty() {
                worksheet.write_blank(row, col, format)?;
            } else {
                worksheet.write_string_with_format(row, col, val, format)?;
            }
        }
    }

    let mut next = data_start + items.len() as u32;
    if let Some(note) = footnote {
        worksheet.merge_range(next, 0, next, plans.len() as u16, note, &palette.footnote)?;
        next += 1;
    }
    Ok(next + 1)
}
