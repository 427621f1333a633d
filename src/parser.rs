//! 항목 파싱: 헤더 아래 행을 단일 패스로 걸어 카테고리별 항목 테이블을 만든다
//!
//! 파싱 상태(현재 카테고리, 플랜별 이월 캐시)는 명시적인 `ParseState` 값으로
//! 행 단위 step 함수에 스레딩한다. 행 하나만으로도 검증할 수 있게 하기 위한
//! 구조이며, 호출 간에 남는 상태는 없다.

use crate::error::{ProposalError, Result};
use crate::template::read_sheet_rows;
use crate::types::{Category, Item, ParsedData, Plan, SummaryEntry};
use std::path::Path;

/// 1열 텍스트에 나타나는 카테고리 전환 마커 (평가 순서 = 우선순위)
const GROUP_MARKERS: [(&str, Category); 5] = [
    ("A그룹", Category::A),
    ("B그룹", Category::B),
    ("C그룹", Category::C),
    ("장비검사", Category::Equip),
    ("소화기검사", Category::Equip),
];

/// 데이터 행이 아닌 중간 소제목 라벨
const STRUCTURAL_LABELS: [&str; 2] = ["검진항목", "내용"];

/// 1열 텍스트에서 카테고리 전환을 감지한다
fn detect_category(col0: &str) -> Option<Category> {
    for (marker, category) in GROUP_MARKERS {
        if col0.contains(marker) {
            return Some(category);
        }
    }
    // 공통 혈액/소변 블록은 두 단어가 함께 나타날 때만 전환
    if col0.contains("혈액") && col0.contains("소변") {
        return Some(Category::CommonBlood);
    }
    None
}

/// 플랜 하나의 A/B/C 이월 캐시
///
/// "선택 N" 셀 아래 빈 셀들이 같은 선택을 이어받는 시트 표기를 복원한다.
#[derive(Debug, Clone, Default)]
struct CarrySlots {
    a: Option<String>,
    b: Option<String>,
    c: Option<String>,
}

impl CarrySlots {
    fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::A => &mut self.a,
            Category::B => &mut self.b,
            _ => &mut self.c,
        }
    }
}

/// 한 번의 파싱 호출에만 존재하는 행 단위 상태
#[derive(Debug, Clone)]
pub(crate) struct ParseState {
    current: Option<Category>,
    carry: Vec<CarrySlots>,
}

impl ParseState {
    pub(crate) fn new(plan_count: usize) -> Self {
        Self {
            current: None,
            carry: vec![CarrySlots::default(); plan_count],
        }
    }

    /// 행 하나를 처리한다. 카테고리 상태를 갱신하고,
    /// 데이터 행이면 소속 카테고리와 항목을 돌려준다.
    pub(crate) fn step(&mut self, row: &[String], plans: &[Plan]) -> Option<(Category, Item)> {
        let col0 = row.first().map(String::as_str).unwrap_or("");
        let col1 = row.get(1).map(String::as_str).unwrap_or("");

        if let Some(category) = detect_category(col0) {
            self.current = Some(category);
        }

        // 2열이 비었거나 소제목 라벨이면 구조 행
        if col1.is_empty() || STRUCTURAL_LABELS.contains(&col1) {
            return None;
        }
        // 카테고리 마커 이전의 행은 버린다
        let category = self.current?;

        let description = row.get(2).cloned().unwrap_or_default();
        let category_tag = if category == Category::Equip && !col0.is_empty() {
            col0.to_string()
        } else {
            String::new()
        };

        let values = plans
            .iter()
            .enumerate()
            .map(|(i, plan)| self.resolve_value(row, category, plan, i))
            .collect();

        Some((
            category,
            Item {
                category_tag,
                name: col1.to_string(),
                description,
                values,
            },
        ))
    }

    /// 플랜 하나의 셀 값을 이월 → 규칙 치환 → 미선택 처리 순서로 확정한다
    fn resolve_value(
        &mut self,
        row: &[String],
        category: Category,
        plan: &Plan,
        plan_idx: usize,
    ) -> String {
        let mut val = row
            .get(plan.col_idx.saturating_sub(1))
            .cloned()
            .unwrap_or_default();

        if category.is_select_group() {
            let slot = self.carry[plan_idx].slot_mut(category);
            if val.contains("선택") {
                *slot = Some(val.clone());
            } else if val.is_empty() {
                if let Some(cached) = slot.as_ref() {
                    val = cached.clone();
                }
            } else {
                // 구체 값이 나오면 이월 사슬이 끊긴다
                *slot = None;
            }

            if val.contains("선택") {
                let rule = plan.group_rule(category);
                if !rule.is_empty() {
                    val = if rule == "-" { String::new() } else { rule.to_string() };
                }
            }
        }

        if val.contains("미선택") {
            val.clear();
        }
        val
    }
}

/// 템플릿에서 플랜 구성에 맞는 항목 테이블과 요약을 만든다
///
/// `header_row`는 `load_price_options`가 돌려준 1-base 행 번호.
/// 형식이 어긋난 개별 행은 에러 없이 건너뛰거나 빈 값으로 처리한다.
pub fn parse_items(
    path: impl AsRef<Path>,
    header_row: usize,
    plans: &[Plan],
) -> Result<(ParsedData, Vec<SummaryEntry>)> {
    let rows = read_sheet_rows(path.as_ref())?;
    if header_row == 0 || header_row > rows.len() {
        return Err(ProposalError::SourceRead(format!(
            "헤더 행 번호가 시트 범위를 벗어났습니다: {}",
            header_row
        )));
    }
    Ok(parse_rows(&rows[header_row..], plans))
}

/// 헤더 아래 행들에 대한 파싱 본체 (파일 I/O와 분리)
pub(crate) fn parse_rows(rows: &[Vec<String>], plans: &[Plan]) -> (ParsedData, Vec<SummaryEntry>) {
    let mut data = ParsedData::default();
    let mut state = ParseState::new(plans.len());

    for row in rows {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if let Some((category, item)) = state.step(row, plans) {
            data.bucket_mut(category).push(item);
        }
    }

    let summary = plans
        .iter()
        .map(|plan| SummaryEntry {
            name: plan.name.clone(),
            a: plan.a_rule.clone(),
            b: plan.b_rule.clone(),
            c: plan.c_rule.clone(),
        })
        .collect();

    (data, summary)
}
