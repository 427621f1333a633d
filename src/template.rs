//! 템플릿 엑셀 스캔: 금액 헤더 행과 금액대 옵션 발견
//!
//! 템플릿은 수기로 관리되는 반정형 시트다. 헤더 행은 앞쪽 20행 안에서
//! "만원" 표기를 포함하는 첫 행으로 정하고, 그 행의 각 금액 셀을
//! 금액대 컬럼 후보로 수집한다.

use crate::defaults::DefaultsTable;
use crate::error::{ProposalError, Result};
use crate::merge::first_number;
use crate::types::{Category, GroupDefaults, PriceTierOption};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// 헤더 탐색 범위 (앞쪽 N행)
const HEADER_SCAN_ROWS: usize = 20;
/// 기본값 스캔 범위 (헤더 아래 N행)
const DEFAULT_SCAN_ROWS: usize = 150;
/// 금액대 단위 표기
const TIER_UNIT_MARKER: &str = "만원";
/// 옵션에서 제외하는 저가 금액대
const EXCLUDED_TIERS: [&str; 2] = ["10만원", "15만원"];
/// 정렬 시 숫자를 못 읽은 라벨에 쓰는 센티널
const UNPARSED_TIER_SENTINEL: u32 = 999;

/// 시트 전체를 절대 좌표(0-base) 기준의 문자열 그리드로 읽는다
///
/// calamine의 Range는 사용 영역 시작점 기준이므로, 앞쪽의 빈 행/열을
/// 채워 넣어 컬럼 번호가 시트 좌표와 일치하도록 맞춘다.
pub(crate) fn read_sheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ProposalError::SourceRead(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ProposalError::SourceRead("시트가 없습니다".into()))?
        .map_err(|e| ProposalError::SourceRead(e.to_string()))?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells: Vec<String> = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Ok(rows)
}

/// 셀 값을 트림된 텍스트로 변환한다. 정수 실수값은 소수점 없이 표기한다.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// 템플릿에서 금액 헤더 행과 금액대 옵션을 읽는다
///
/// 반환되는 헤더 행 번호와 컬럼 번호는 1-base다. 옵션은 금액 오름차순으로
/// 정렬된다. 수동 기본값 테이블에 금액이 있으면 그 값을, 없으면 시트
/// 스캔 결과를 기본값으로 쓴다.
pub fn load_price_options(
    path: impl AsRef<Path>,
    table: &DefaultsTable,
) -> Result<(usize, Vec<PriceTierOption>)> {
    let rows = read_sheet_rows(path.as_ref())?;
    let header_row = find_header_row(&rows)?;
    let options = collect_options(&rows, header_row, table);
    Ok((header_row, options))
}

/// "만원" 셀을 포함하는 첫 행(1-base)을 찾는다
fn find_header_row(rows: &[Vec<String>]) -> Result<usize> {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| row.iter().any(|cell| cell.contains(TIER_UNIT_MARKER)))
        .map(|idx| idx + 1)
        .ok_or_else(|| {
            ProposalError::TemplateFormat(format!(
                "앞쪽 {}행 안에서 금액 헤더('{}')를 찾을 수 없습니다",
                HEADER_SCAN_ROWS, TIER_UNIT_MARKER
            ))
        })
}

fn collect_options(
    rows: &[Vec<String>],
    header_row: usize,
    table: &DefaultsTable,
) -> Vec<PriceTierOption> {
    let header = match rows.get(header_row - 1) {
        Some(row) => row,
        None => return Vec::new(),
    };

    let mut options: Vec<PriceTierOption> = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| {
            cell.contains(TIER_UNIT_MARKER) && !EXCLUDED_TIERS.iter().any(|e| cell.contains(e))
        })
        .map(|(idx, cell)| {
            let col_idx = idx + 1;
            let defaults = first_number(cell)
                .and_then(|price| table.get(price))
                .unwrap_or_else(|| scan_default_counts(rows, col_idx, header_row));
            PriceTierOption {
                label: cell.clone(),
                col_idx,
                defaults,
            }
        })
        .collect();

    options.sort_by_key(|opt| first_number(&opt.label).unwrap_or(UNPARSED_TIER_SENTINEL));
    options
}

/// 헤더 아래 구간에서 그룹별 "선택 N" 최대값을 스캔해 기본값을 추정한다
fn scan_default_counts(rows: &[Vec<String>], col_idx: usize, header_row: usize) -> GroupDefaults {
    let mut counts = GroupDefaults::default();
    let end = (header_row + DEFAULT_SCAN_ROWS).min(rows.len());
    let mut current: Option<Category> = None;

    for row in &rows[header_row..end] {
        let group_cell = row.first().map(String::as_str).unwrap_or("");
        if group_cell.contains("A그룹") {
            current = Some(Category::A);
        } else if group_cell.contains("B그룹") {
            current = Some(Category::B);
        } else if group_cell.contains("C그룹") {
            current = Some(Category::C);
        }

        let cell = row.get(col_idx - 1).map(String::as_str).unwrap_or("");
        if !cell.contains("선택") {
            continue;
        }
        if let (Some(cat), Some(n)) = (current, first_number(cell)) {
            let slot = match cat {
                Category::A => &mut counts.a,
                Category::B => &mut counts.b,
                _ => &mut counts.c,
            };
            if n > *slot {
                *slot = n;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_find_header_row() {
        let sheet = rows(&[
            &["2026 기업검진 단가표"],
            &[],
            &["구분", "검진항목", "내용", "25만원", "70만원"],
        ]);
        assert_eq!(find_header_row(&sheet).unwrap(), 3);
    }

    #[test]
    fn test_find_header_row_missing() {
        let sheet = rows(&[&["구분", "검진항목"], &["A그룹", "갑상선초음파"]]);
        let err = find_header_row(&sheet).unwrap_err();
        assert!(matches!(err, ProposalError::TemplateFormat(_)));
    }

    #[test]
    fn test_collect_options_excludes_and_sorts() {
        let sheet = rows(&[&["구분", "검진항목", "70만원", "10만원", "25만원"]]);
        let table = DefaultsTable::default();
        let options = collect_options(&sheet, 1, &table);

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["25만원", "70만원"]);
        assert_eq!(options[0].col_idx, 5);
        assert_eq!(options[0].defaults, GroupDefaults::new(3, 0, 0));
        assert_eq!(options[1].defaults, GroupDefaults::new(5, 1, 1));
    }

    #[test]
    fn test_scan_default_counts_fallback() {
        // 수동 테이블에 없는 금액(27만원)은 시트 스캔으로 추정한다
        let sheet = rows(&[
            &["구분", "검진항목", "27만원"],
            &["A그룹 (정밀)", "", ""],
            &["", "갑상선초음파", "선택 2"],
            &["", "뇌CT", "선택 4"],
            &["B그룹 (특화)", "", ""],
            &["", "심장초음파", "선택 1"],
        ]);
        let table = DefaultsTable::default();
        let options = collect_options(&sheet, 1, &table);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].defaults, GroupDefaults::new(4, 1, 0));
    }
}
