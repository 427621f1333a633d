//! 표시값 정규화와 세로 병합(span) 계산
//!
//! HTML/Excel 렌더러가 공유하는 유일한 병합 엔진. 두 출력의 병합 경계가
//! 어긋나지 않도록 정규화와 span 계산을 모두 이 모듈을 통해서만 수행한다.

use crate::types::Item;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "선택3", "선택  3" → "선택 3" 표기 통일
    static ref SELECT_RE: Regex = Regex::new(r"(선택)\s*(\d+)").unwrap();
    static ref NUM_RE: Regex = Regex::new(r"\d+").unwrap();
}

/// 미선택으로 간주하는 토큰 (정확히 일치할 때)
const NEGATIVE_TOKENS: [&str; 4] = ["X", "x", "-", "미선택"];
/// 기본 포함으로 간주하는 토큰 (정확히 일치할 때)
const AFFIRMATIVE_TOKENS: [&str; 3] = ["O", "o", "○"];

/// "선택 N" 표기의 공백을 정확히 한 칸으로 통일한다
pub fn normalize_select(text: &str) -> String {
    SELECT_RE.replace_all(text, "$1 $2").into_owned()
}

/// 문자열에서 첫 숫자 덩어리를 추출한다
pub fn first_number(text: &str) -> Option<u32> {
    NUM_RE.find(text).and_then(|m| m.as_str().parse().ok())
}

/// 원시 셀 값을 표시 토큰으로 변환한다
///
/// - 빈 값/미선택 토큰 → 빈 문자열
/// - 긍정 토큰 또는 "기본" 포함 → "O"
/// - "선택" 포함 → 공백 정규화 후 그대로
/// - 그 외 → 원문 그대로
pub fn display_value(raw: &str) -> String {
    let v = raw.trim();
    if v.is_empty() || NEGATIVE_TOKENS.contains(&v) {
        return String::new();
    }
    if AFFIRMATIVE_TOKENS.contains(&v) || v.contains("기본") {
        return "O".into();
    }
    if v.contains("선택") {
        return normalize_select(v);
    }
    v.to_string()
}

/// 항목 목록을 표시값 그리드로 변환한다 (행 = 항목, 열 = 플랜)
pub fn display_grid(items: &[Item]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| item.values.iter().map(|v| display_value(v)).collect())
        .collect()
}

/// 컬럼별 세로 병합 결과
///
/// `span`은 병합 구간 첫 행에 구간 길이를, 나머지 행에는 1을 담는다.
/// `absorbed`가 참인 셀은 위 구간에 흡수된 셀로, 출력 시 건너뛴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanGrid {
    rows: usize,
    cols: usize,
    span: Vec<Vec<usize>>,
    absorbed: Vec<Vec<bool>>,
}

impl SpanGrid {
    /// 병합 없는 그리드 (모든 span = 1)
    pub fn unit(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            span: vec![vec![1; cols]; rows],
            absorbed: vec![vec![false; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn span(&self, row: usize, col: usize) -> usize {
        self.span[row][col]
    }

    pub fn is_absorbed(&self, row: usize, col: usize) -> bool {
        self.absorbed[row][col]
    }

    /// 한 컬럼의 (시작 행, 구간 길이) 목록. 흡수된 행은 포함하지 않는다.
    pub fn runs(&self, col: usize) -> Vec<(usize, usize)> {
        (0..self.rows)
            .filter(|&r| !self.absorbed[r][col])
            .map(|r| (r, self.span[r][col]))
            .collect()
    }
}

/// 표시값 그리드에 대해 컬럼별 세로 run-length 병합을 계산한다
///
/// 비어 있지 않은 동일 문자열이 연속되는 구간만 병합 대상이며,
/// 빈 값은 span 1로 두고 어떤 구간에도 흡수되지 않는다.
/// 컬럼 간 상호작용은 없다.
pub fn compute_spans(grid: &[Vec<String>]) -> SpanGrid {
    let rows = grid.len();
    let cols = grid.first().map(|r| r.len()).unwrap_or(0);
    let mut result = SpanGrid::unit(rows, cols);

    for c in 0..cols {
        for r in 0..rows {
            if result.absorbed[r][c] {
                continue;
            }
            let val = &grid[r][c];
            if val.is_empty() {
                continue;
            }
            let mut span = 1;
            for k in (r + 1)..rows {
                if &grid[k][c] == val {
                    span += 1;
                    result.absorbed[k][c] = true;
                } else {
                    break;
                }
            }
            result.span[r][c] = span;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[&[&str]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_normalize_select_spacing() {
        assert_eq!(display_value("선택5"), "선택 5");
        assert_eq!(display_value("선택 5"), "선택 5");
        assert_eq!(display_value("선택   5"), "선택 5");
    }

    #[test]
    fn test_display_value_negative_tokens() {
        assert_eq!(display_value(""), "");
        assert_eq!(display_value("X"), "");
        assert_eq!(display_value("x"), "");
        assert_eq!(display_value("-"), "");
        assert_eq!(display_value("미선택"), "");
    }

    #[test]
    fn test_display_value_affirmative_tokens() {
        assert_eq!(display_value("O"), "O");
        assert_eq!(display_value("o"), "O");
        assert_eq!(display_value("○"), "O");
        assert_eq!(display_value("기본제공"), "O");
    }

    #[test]
    fn test_display_value_passthrough() {
        assert_eq!(display_value("위내시경"), "위내시경");
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("70만원"), Some(70));
        assert_eq!(first_number("선택 3"), Some(3));
        assert_eq!(first_number("만원"), None);
    }

    #[test]
    fn test_compute_spans_basic_run() {
        let g = grid(&[&["선택 3"], &["선택 3"], &[""]]);
        let spans = compute_spans(&g);
        assert_eq!(spans.span(0, 0), 2);
        assert!(spans.is_absorbed(1, 0));
        assert_eq!(spans.span(2, 0), 1);
        assert!(!spans.is_absorbed(2, 0));
    }

    #[test]
    fn test_compute_spans_empty_not_absorbed() {
        // 빈 값은 병합되지도, 구간을 잇지도 않는다
        let g = grid(&[&["O"], &[""], &["O"]]);
        let spans = compute_spans(&g);
        assert_eq!(spans.span(0, 0), 1);
        assert_eq!(spans.span(1, 0), 1);
        assert_eq!(spans.span(2, 0), 1);
        assert_eq!(spans.runs(0), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_compute_spans_columns_independent() {
        let g = grid(&[&["O", "선택 1"], &["O", "선택 2"], &["X붙임", "선택 2"]]);
        let spans = compute_spans(&g);
        assert_eq!(spans.span(0, 0), 2);
        assert_eq!(spans.span(0, 1), 1);
        assert_eq!(spans.span(1, 1), 2);
        assert!(spans.is_absorbed(2, 1));
        assert_eq!(spans.runs(0), vec![(0, 2), (2, 1)]);
        assert_eq!(spans.runs(1), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_unit_grid() {
        let spans = SpanGrid::unit(2, 3);
        assert_eq!(spans.rows(), 2);
        assert_eq!(spans.cols(), 3);
        assert_eq!(spans.span(1, 2), 1);
        assert!(!spans.is_absorbed(1, 2));
    }
}
